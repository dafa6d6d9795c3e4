//! SQL generation module.
//!
//! A small type-safe builder for the BigQuery standard SQL that pypinfo
//! sends. It includes:
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;


// Re-export commonly used types at the sql module level
pub use dialect::{BigQuery, SqlDialect};
pub use expr::{
    col, count_star, func, interval_days, lit_int, lit_str, paren, raw_sql, star, BinaryOperator,
    Expr, ExprExt, Literal,
};
pub use query::{OrderByExpr, Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};
