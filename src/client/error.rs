//! Errors raised while talking to BigQuery.

use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::CryptoError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to read credentials file {path}: {source}")]
    CredentialsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid credentials file {path}: {source}")]
    CredentialsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Credential signing failed: {0}")]
    Crypto(#[from] CryptoError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("BigQuery API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Query did not complete within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("Malformed BigQuery response: {0}")]
    MalformedResponse(String),
}
