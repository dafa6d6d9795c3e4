//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with backticks, escaping embedded backticks and
/// backslashes with a backslash.
/// Used by: BigQuery (standard SQL)
pub fn quote_backtick_escaped(ident: &str) -> String {
    format!("`{}`", escape_backslash(ident, '`'))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes using backslash escapes.
/// Used by: BigQuery
pub fn quote_string_backslash(s: &str) -> String {
    format!("'{}'", escape_backslash(s, '\''))
}

fn escape_backslash(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
