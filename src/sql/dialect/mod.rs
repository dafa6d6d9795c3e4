//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! A dialect decides how the dynamic parts of a token stream are rendered:
//!
//! - Identifier quoting
//! - String literal escaping
//! - Pagination (LIMIT)
//!
//! Only BigQuery standard SQL is implemented; the PyPI download dataset
//! lives there.
//!
//! # Usage
//!
//! ```ignore
//! use pypinfo::sql::dialect::{BigQuery, SqlDialect};
//!
//! let quoted = BigQuery.quote_identifier("download_count");  // `download_count`
//! ```

mod bigquery;
pub mod helpers;

pub use bigquery::BigQuery;

use super::token::{Token, TokenStream};

/// SQL dialect trait - defines how SQL constructs are rendered.
pub trait SqlDialect: std::fmt::Debug {
    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    fn quote_string(&self, s: &str) -> String;

    /// Emit a LIMIT clause.
    ///
    /// Limits past `i64::MAX` are clamped; integer literals are signed
    /// 64-bit.
    fn emit_limit(&self, limit: u64) -> TokenStream {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut ts = TokenStream::new();
        ts.push(Token::Limit).space().push(Token::LitInt(limit));
        ts
    }
}
