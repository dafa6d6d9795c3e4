//! Query builder - turns a project and a field list into BigQuery SQL.
//!
//! ```text
//! project + fields + BuildOptions → QuerySpec → Query AST → SQL text
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pypinfo::builder::{build_query, BuildOptions};
//! use pypinfo::fields;
//!
//! let fields = fields::lookup_all(&["pyversion"])?;
//! let sql = build_query(Some("requests"), &fields, &BuildOptions::default());
//! println!("{}", sql);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::Field;
use crate::sql::expr::{col, count_star, func, interval_days, paren, raw_sql, ExprExt};
use crate::sql::query::{OrderByExpr, Query, SelectExpr, TableRef};
use crate::sql::BigQuery;

/// The public PyPI download log.
pub const DOWNLOADS_TABLE: &str = "bigquery-public-data.pypi.file_downloads";

/// Alias of the download-count aggregate.
pub const DOWNLOAD_COUNT: &str = "download_count";

pub const DEFAULT_LIMIT: u64 = 20;
pub const DEFAULT_START_DAYS: i64 = -31;
pub const DEFAULT_END_DAYS: i64 = -1;

static NORMALIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]+").unwrap());

// ============================================================================
// Options
// ============================================================================

/// Caller-tunable parts of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub limit: Option<u64>,
    /// Last N days; takes precedence over `start_date`/`end_date`.
    pub days: Option<u32>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    /// Extra WHERE fragment, ANDed in verbatim.
    pub where_clause: Option<String>,
    /// ORDER BY fragment.
    pub order: Option<String>,
}

impl BuildOptions {
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    pub fn with_start_date(mut self, start: i64) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end_date(mut self, end: i64) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_where(mut self, fragment: impl Into<String>) -> Self {
        self.where_clause = Some(fragment.into());
        self
    }

    pub fn with_order(mut self, fragment: impl Into<String>) -> Self {
        self.order = Some(fragment.into());
        self
    }
}

// ============================================================================
// Date Window
// ============================================================================

/// Inclusive window of day offsets relative to now. Both ends are
/// normally negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: i64,
    pub end: i64,
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_DAYS,
            end: DEFAULT_END_DAYS,
        }
    }
}

impl DateWindow {
    /// `days` wins when present. Otherwise each bound falls back to its
    /// default on its own. Bounds are taken as given, never reordered.
    pub fn resolve(days: Option<u32>, start: Option<i64>, end: Option<i64>) -> Self {
        match days {
            Some(days) => Self {
                start: -i64::from(days),
                end: DEFAULT_END_DAYS,
            },
            None => Self {
                start: start.unwrap_or(DEFAULT_START_DAYS),
                end: end.unwrap_or(DEFAULT_END_DAYS),
            },
        }
    }
}

// ============================================================================
// Query Specification
// ============================================================================

/// Everything needed to render one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Normalized project name; `None` queries all projects.
    pub project: Option<String>,
    pub fields: Vec<&'static Field>,
    pub limit: u64,
    pub date_window: DateWindow,
    pub custom_where: Option<String>,
    pub order_by: Option<String>,
}

impl QuerySpec {
    pub fn new(project: Option<&str>, fields: &[&'static Field], options: &BuildOptions) -> Self {
        Self {
            project: project
                .filter(|p| !p.trim().is_empty())
                .map(normalize_project),
            fields: fields.to_vec(),
            limit: options.limit.unwrap_or(DEFAULT_LIMIT),
            date_window: DateWindow::resolve(options.days, options.start_date, options.end_date),
            custom_where: options
                .where_clause
                .clone()
                .filter(|w| !w.trim().is_empty()),
            order_by: options.order.clone().filter(|o| !o.trim().is_empty()),
        }
    }

    /// Build the query AST.
    pub fn to_query(&self) -> Query {
        let mut select: Vec<SelectExpr> = self
            .fields
            .iter()
            .map(|f| raw_sql(f.column_expression).alias(f.display_label))
            .collect();
        select.push(count_star().alias(DOWNLOAD_COUNT));

        let mut query = Query::new()
            .select(select)
            .from(TableRef::new(DOWNLOADS_TABLE));

        if let Some(project) = &self.project {
            query = query.filter(raw_sql("file.project").eq(project.as_str()));
        }

        query = query.filter(raw_sql("timestamp").between(
            days_from_now(self.date_window.start),
            days_from_now(self.date_window.end),
        ));

        if let Some(fragment) = &self.custom_where {
            query = query.filter(paren(raw_sql(fragment)));
        }

        let group_by: Vec<_> = self
            .fields
            .iter()
            .filter(|f| f.is_grouped())
            .map(|f| raw_sql(f.column_expression))
            .collect();

        let order = match &self.order_by {
            Some(fragment) if has_direction(fragment) => OrderByExpr::new(raw_sql(fragment)),
            Some(fragment) => OrderByExpr::desc(raw_sql(fragment)),
            None => OrderByExpr::desc(col(DOWNLOAD_COUNT)),
        };

        query
            .group_by(group_by)
            .order_by(vec![order])
            .limit(self.limit)
    }

    /// Render BigQuery standard SQL.
    pub fn to_sql(&self) -> String {
        let sql = self.to_query().to_sql(&BigQuery);
        tracing::debug!(%sql, "built query");
        sql
    }
}

/// Build query text in one call.
pub fn build_query(project: Option<&str>, fields: &[&'static Field], options: &BuildOptions) -> String {
    QuerySpec::new(project, fields, options).to_sql()
}

/// PyPI name normalization: lowercase, separator runs collapsed to `-`.
pub fn normalize_project(name: &str) -> String {
    NORMALIZE_RE
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

fn days_from_now(offset: i64) -> crate::sql::Expr {
    func(
        "TIMESTAMP_ADD",
        vec![func("CURRENT_TIMESTAMP", vec![]), interval_days(offset)],
    )
}

/// Whether an ORDER fragment already carries its own direction: an `ASC` or
/// `DESC` keyword anywhere, or a trailing `NULLS FIRST`/`NULLS LAST`.
fn has_direction(fragment: &str) -> bool {
    let words: Vec<&str> = fragment
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect();

    let keyword = words
        .iter()
        .any(|w| w.eq_ignore_ascii_case("asc") || w.eq_ignore_ascii_case("desc"));

    let nulls = match words.as_slice() {
        [.., nulls, last] => {
            nulls.eq_ignore_ascii_case("nulls")
                && (last.eq_ignore_ascii_case("first") || last.eq_ignore_ascii_case("last"))
        }
        _ => false,
    };

    keyword || nulls
}
