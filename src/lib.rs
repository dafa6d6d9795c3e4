//! # pypinfo
//!
//! PyPI download statistics from the public BigQuery dataset.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          project + field tokens + BuildOptions           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [fields::lookup_all]
//! ┌─────────────────────────────────────────────────────────┐
//! │                     QuerySpec                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder → sql]
//! ┌─────────────────────────────────────────────────────────┐
//! │             BigQuery standard SQL text                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [client::QueryExecutor]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    QueryResult                           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [tabulate]
//! ┌─────────────────────────────────────────────────────────┐
//! │               table with a Total row                     │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod crypto;
pub mod fields;
pub mod result;
pub mod sql;
pub mod tabulate;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::builder::{build_query, BuildOptions, DateWindow, QuerySpec};
    pub use crate::client::{BigQueryClient, ClientError, QueryExecutor};
    pub use crate::config::Settings;
    pub use crate::fields::{lookup, lookup_all, Field, FieldError, FieldKind};
    pub use crate::result::{QueryResult, Row, Value};
    pub use crate::tabulate::{tabulate, TabulateError};
}

// Also export at crate root for convenience
pub use builder::{build_query, BuildOptions};
pub use fields::{lookup, Field};
pub use result::{QueryResult, Value};
pub use tabulate::tabulate;
