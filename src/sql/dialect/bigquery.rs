//! BigQuery SQL dialect.
//!
//! BigQuery standard SQL features that matter here:
//! - Backtick identifier quoting, which also allows dotted table paths
//!   such as `` `project.dataset.table` ``
//! - Backslash escapes inside string literals (`''` is not an escape)
//! - `LIMIT n` pagination

use super::helpers;
use super::SqlDialect;

/// BigQuery SQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigQuery;

impl SqlDialect for BigQuery {
    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick_escaped(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }
}
