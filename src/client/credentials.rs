//! Google service-account keys and the signed JWT assertion exchanged for
//! an access token.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ClientError, ClientResult};
use crate::crypto::{decode_pem_private_key, encode_segment, sign_rs256};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const BIGQUERY_SCOPE: &str = "https://www.googleapis.com/auth/bigquery";

/// Assertions are valid for one hour, the maximum Google accepts.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account JSON key that authentication needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct JwtHeader<'a> {
    alg: &'static str,
    typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<&'a str>,
}

/// JWT claims for the token request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl ServiceAccountKey {
    /// Read a key file from disk.
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ClientError::CredentialsRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ClientError::CredentialsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn claims(&self, now: DateTime<Utc>) -> Claims {
        Claims {
            iss: self.client_email.clone(),
            scope: BIGQUERY_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        }
    }

    /// Build the signed `header.claims.signature` assertion.
    pub fn assertion(&self, now: DateTime<Utc>) -> ClientResult<String> {
        let header = JwtHeader {
            alg: "RS256",
            typ: "JWT",
            kid: self.private_key_id.as_deref(),
        };

        let header_json = serde_json::to_vec(&header)
            .map_err(|e| ClientError::Auth(format!("encoding JWT header: {}", e)))?;
        let claims_json = serde_json::to_vec(&self.claims(now))
            .map_err(|e| ClientError::Auth(format!("encoding JWT claims: {}", e)))?;

        let signing_input = format!(
            "{}.{}",
            encode_segment(&header_json),
            encode_segment(&claims_json)
        );

        let der = decode_pem_private_key(&self.private_key)?;
        let signature = sign_rs256(&der, signing_input.as_bytes())?;

        Ok(format!("{}.{}", signing_input, encode_segment(&signature)))
    }
}
