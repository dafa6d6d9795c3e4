//! Execution shell - submits built queries to BigQuery.
//!
//! ```text
//! service-account key → signed JWT → access token → jobs.query → QueryResult
//! ```
//!
//! The [`QueryExecutor`] trait is the seam between the command line and the
//! network; [`BigQueryClient`] is the only real implementation.

mod bigquery;
pub mod credentials;
mod error;
pub mod protocol;

use std::time::Duration;

pub use bigquery::BigQueryClient;
pub use credentials::ServiceAccountKey;
pub use error::{ClientError, ClientResult};

use crate::result::QueryResult;

/// Something that can run a query and hand back rows.
pub trait QueryExecutor {
    /// Run `sql`, waiting at most `timeout` for the job to finish.
    fn execute(&self, sql: &str, timeout: Duration) -> ClientResult<QueryResult>;
}
