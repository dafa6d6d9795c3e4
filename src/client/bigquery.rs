//! Blocking BigQuery REST client.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::credentials::ServiceAccountKey;
use super::error::{ClientError, ClientResult};
use super::protocol::{ErrorResponse, QueryRequest, QueryResponse, TokenResponse};
use super::QueryExecutor;
use crate::result::QueryResult;

const BIGQUERY_API: &str = "https://bigquery.googleapis.com/bigquery/v2";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Extra time the HTTP layer waits beyond the server-side query timeout.
const HTTP_GRACE: Duration = Duration::from_secs(30);

/// Runs queries with a service-account key, billed to the key's project.
pub struct BigQueryClient {
    key: ServiceAccountKey,
    http: Client,
    api_base: String,
}

impl BigQueryClient {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            http: Client::new(),
            api_base: BIGQUERY_API.to_string(),
        }
    }

    /// Load the key file and build a client.
    pub fn from_key_file(path: &Path) -> ClientResult<Self> {
        debug!(path = %path.display(), "loading service account key");
        Ok(Self::new(ServiceAccountKey::from_file(path)?))
    }

    /// Point the client at another API root.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Use a preconfigured HTTP client (proxy, TLS, or pool settings).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.key.project_id
    }

    /// Exchange a signed assertion for an OAuth access token.
    fn access_token(&self) -> ClientResult<String> {
        let assertion = self.key.assertion(Utc::now())?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()?;
        let status = response.status();
        let body = response.text()?;

        let token = parse_token_response(status, &body)?;
        debug!(expires_in = ?token.expires_in, "obtained access token");
        Ok(token.access_token)
    }
}

impl QueryExecutor for BigQueryClient {
    fn execute(&self, sql: &str, timeout: Duration) -> ClientResult<QueryResult> {
        let token = self.access_token()?;
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        let url = format!("{}/projects/{}/queries", self.api_base, self.key.project_id);
        info!(project = %self.key.project_id, timeout_ms, "submitting query");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .timeout(timeout + HTTP_GRACE)
            .json(&QueryRequest {
                query: sql,
                use_legacy_sql: false,
                timeout_ms,
            })
            .send()?;
        let status = response.status();
        let body = response.text()?;

        completed_result(parse_query_response(status, &body)?, timeout_ms)
    }
}

/// Token endpoint reply; anything but 2xx is an authentication failure.
fn parse_token_response(status: StatusCode, body: &str) -> ClientResult<TokenResponse> {
    if !status.is_success() {
        return Err(ClientError::Auth(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    serde_json::from_str(body)
        .map_err(|e| ClientError::Auth(format!("unreadable token response: {}", e)))
}

/// `jobs.query` reply. A non-2xx status becomes `ClientError::Api`, carrying
/// the error envelope's message when there is one.
fn parse_query_response(status: StatusCode, body: &str) -> ClientResult<QueryResponse> {
    if status.is_success() {
        return serde_json::from_str(body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()));
    }

    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Rows of a finished job; an unfinished one is a timeout.
fn completed_result(response: QueryResponse, timeout_ms: u64) -> ClientResult<QueryResult> {
    if !response.job_complete {
        warn!(timeout_ms, "query job did not complete");
        return Err(ClientError::Timeout { timeout_ms });
    }

    let total_rows = response.total_rows.clone();
    let result = response.into_result()?;
    info!(rows = result.len(), total_rows = ?total_rows, "query finished");
    Ok(result)
}
