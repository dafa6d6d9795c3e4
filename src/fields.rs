//! Field registry - the dimensions a user can group downloads by.
//!
//! Every field maps a command-line token (`pyversion`, `country`, ...) to a
//! BigQuery column expression over `bigquery-public-data.pypi.file_downloads`
//! and the label the result column is aliased to.

use thiserror::Error;

/// Result type for field lookups.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while resolving field tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The token is not part of the field vocabulary.
    #[error("unsupported field: {0}")]
    UnsupportedField(String),

    /// The same token was requested twice; each column alias must be unique.
    #[error("duplicate field: {0}")]
    DuplicateField(String),
}

/// How a field participates in the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A grouping dimension, emitted in both SELECT and GROUP BY.
    Dimension,
    /// An aggregate percentage over the group; never grouped.
    Percent,
}

/// A user-selectable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Command-line token.
    pub name: &'static str,
    /// BigQuery expression evaluated per download row.
    pub column_expression: &'static str,
    /// Result column alias.
    pub display_label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    const fn dimension(
        name: &'static str,
        column_expression: &'static str,
        display_label: &'static str,
    ) -> Self {
        Self {
            name,
            column_expression,
            display_label,
            kind: FieldKind::Dimension,
        }
    }

    const fn percent(
        name: &'static str,
        column_expression: &'static str,
        display_label: &'static str,
    ) -> Self {
        Self {
            name,
            column_expression,
            display_label,
            kind: FieldKind::Percent,
        }
    }

    /// Whether the field belongs in GROUP BY.
    pub fn is_grouped(&self) -> bool {
        self.kind == FieldKind::Dimension
    }
}

/// The full field vocabulary, in documentation order.
pub static FIELDS: &[Field] = &[
    Field::dimension("project", "file.project", "project"),
    Field::dimension("version", "file.version", "version"),
    Field::dimension(
        "pyversion",
        r"REGEXP_EXTRACT(details.python, r'^([^\.]+\.[^\.]+)')",
        "python_version",
    ),
    Field::percent(
        "percent3",
        r"ROUND(100 * SUM(CASE WHEN REGEXP_EXTRACT(details.python, r'^([^\.]+)') = '3' THEN 1 ELSE 0 END) / COUNT(*), 2)",
        "percent_3",
    ),
    Field::percent(
        "percent2",
        r"ROUND(100 * SUM(CASE WHEN REGEXP_EXTRACT(details.python, r'^([^\.]+)') = '2' THEN 1 ELSE 0 END) / COUNT(*), 2)",
        "percent_2",
    ),
    Field::dimension("impl", "details.implementation.name", "implementation"),
    Field::dimension(
        "impl-version",
        r"REGEXP_EXTRACT(details.implementation.version, r'^([^\.]+\.[^\.]+)')",
        "impl_version",
    ),
    Field::dimension(
        "openssl",
        r"REGEXP_EXTRACT(details.openssl_version, r'^OpenSSL ([^ ]+) ')",
        "openssl_version",
    ),
    Field::dimension("date", "FORMAT_TIMESTAMP('%Y-%m-%d', timestamp)", "download_date"),
    Field::dimension("month", "FORMAT_TIMESTAMP('%Y-%m', timestamp)", "download_month"),
    Field::dimension("year", "FORMAT_TIMESTAMP('%Y', timestamp)", "download_year"),
    Field::dimension("country", "country_code", "country"),
    Field::dimension("installer", "details.installer.name", "installer_name"),
    Field::dimension(
        "installer-version",
        "details.installer.version",
        "installer_version",
    ),
    Field::dimension(
        "setuptools-version",
        "details.setuptools_version",
        "setuptools_version",
    ),
    Field::dimension("system", "details.system.name", "system_name"),
    Field::dimension("system-release", "details.system.release", "system_release"),
    Field::dimension("distro", "details.distro.name", "distro_name"),
    Field::dimension("distro-version", "details.distro.version", "distro_version"),
    Field::dimension("cpu", "details.cpu", "cpu"),
];

/// Look up a field by its command-line token (case-sensitive).
pub fn lookup(name: &str) -> FieldResult<&'static Field> {
    FIELDS
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| FieldError::UnsupportedField(name.to_string()))
}

/// Resolve every token in order, failing on the first unknown or repeated one.
pub fn lookup_all<S: AsRef<str>>(names: &[S]) -> FieldResult<Vec<&'static Field>> {
    let mut fields: Vec<&'static Field> = Vec::with_capacity(names.len());
    for name in names {
        let field = lookup(name.as_ref())?;
        if fields.iter().any(|f| f.name == field.name) {
            return Err(FieldError::DuplicateField(field.name.to_string()));
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Find a field by the label its result column is aliased to.
pub fn by_label(label: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.display_label == label)
}

/// Comma-separated list of valid tokens, for help output.
pub fn vocabulary() -> String {
    FIELDS
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ")
}
