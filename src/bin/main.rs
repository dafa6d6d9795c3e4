//! pypinfo CLI - PyPI download statistics from BigQuery
//!
//! Usage:
//!   pypinfo [OPTIONS] [PROJECT] [FIELDS]...
//!
//! Examples:
//!   pypinfo --auth ~/keys/pypinfo.json
//!   pypinfo requests pyversion
//!   pypinfo --test -d 7 django country installer
//!   pypinfo --sd -60 --ed -30 -l 5 numpy version

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use pypinfo::builder::{build_query, BuildOptions};
use pypinfo::client::{BigQueryClient, ClientError, QueryExecutor};
use pypinfo::config::{Settings, SettingsError};
use pypinfo::fields::{self, FieldError};
use pypinfo::tabulate::{tabulate, TabulateError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pypinfo")]
#[command(about = "Query PyPI download statistics from the public BigQuery dataset")]
#[command(version)]
#[command(after_help = fields_help())]
struct Cli {
    /// Project to query; omit to query every project
    project: Option<String>,

    /// Fields to group downloads by
    fields: Vec<String>,

    /// Execute the query and print a table (default)
    #[arg(long, overrides_with = "test")]
    run: bool,

    /// Print the query instead of running it
    #[arg(long, overrides_with = "run")]
    test: bool,

    /// Save the service-account key location and exit
    #[arg(short, long, value_name = "PATH")]
    auth: Option<PathBuf>,

    /// Query timeout in milliseconds
    #[arg(short, long, default_value_t = 120_000)]
    timeout: u64,

    /// Maximum number of rows (default 20)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(..=i64::MAX as u64))]
    limit: Option<u64>,

    /// Number of days back to query, ending yesterday
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,

    /// First day of the window, as a negative offset (default -31)
    #[arg(
        long = "start-date",
        visible_alias = "sd",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..0)
    )]
    start_date: Option<i64>,

    /// Last day of the window, as a negative offset (default -1)
    #[arg(
        long = "end-date",
        visible_alias = "ed",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..0)
    )]
    end_date: Option<i64>,

    /// Extra WHERE condition, ANDed with the project and date filters
    #[arg(short = 'w', long = "where", value_name = "CONDITION")]
    where_clause: Option<String>,

    /// Column to sort by (descending unless ASC is given)
    #[arg(short, long)]
    order: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Tabulate(#[from] TabulateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn fields_help() -> String {
    format!("Fields:\n  {}", fields::vocabulary())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pypinfo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(key_path) = &cli.auth {
        return cmd_auth(key_path);
    }

    if cli.project.is_none() && cli.fields.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let fields = fields::lookup_all(&cli.fields)?;
    let options = BuildOptions {
        limit: cli.limit,
        days: cli.days,
        start_date: cli.start_date,
        end_date: cli.end_date,
        where_clause: cli.where_clause.clone(),
        order: cli.order.clone(),
    };
    let sql = build_query(cli.project.as_deref(), &fields, &options);

    if cli.test && !cli.run {
        println!("{}", sql);
        return Ok(());
    }

    cmd_run(&sql, Duration::from_millis(cli.timeout))
}

fn cmd_auth(key_path: &Path) -> Result<(), CliError> {
    // Stored absolute so later runs resolve it from any directory.
    let key_path = if key_path.is_absolute() {
        key_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(key_path)
    };

    let config_path = Settings::default_path()?;
    let settings = Settings::load(&config_path)?.with_credentials(key_path.display().to_string());
    settings.save(&config_path)?;

    println!("Credentials location set to \"{}\".", key_path.display());
    Ok(())
}

fn cmd_run(sql: &str, timeout: Duration) -> Result<(), CliError> {
    let settings = Settings::load(Settings::default_path()?)?;
    let key_path = settings.credentials_path()?;

    let client = BigQueryClient::from_key_file(&key_path)?;
    let result = client.execute(sql, timeout)?;

    println!("{}", tabulate(&result)?);
    Ok(())
}
