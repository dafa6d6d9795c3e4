//! TOML-based configuration for pypinfo.
//!
//! The file only remembers where the Google service-account key lives:
//!
//! ```toml
//! credentials = "${HOME}/keys/pypinfo.json"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PYPINFO_CONFIG";

/// Standard Google fallback for the key file.
pub const GOOGLE_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("No config directory available; set {CONFIG_ENV}")]
    NoConfigDir,

    #[error("No credentials configured; run `pypinfo --auth <path/to/key.json>` or set {GOOGLE_CREDENTIALS_ENV}")]
    NoCredentials,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the service-account key (supports ${ENV_VAR} expansion).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

impl Settings {
    /// Default config file: `$PYPINFO_CONFIG`, else `<config_dir>/pypinfo/config.toml`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        dirs::config_dir()
            .map(|dir| dir.join("pypinfo").join("config.toml"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Write settings to a TOML file, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, toml::to_string(self)?)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Builder-style setter for the key path.
    pub fn with_credentials(mut self, path: impl Into<String>) -> Self {
        self.credentials = Some(path.into());
        self
    }

    /// Resolve the key file to use.
    ///
    /// The configured path wins; `$GOOGLE_APPLICATION_CREDENTIALS` is the fallback.
    pub fn credentials_path(&self) -> Result<PathBuf, SettingsError> {
        if let Some(path) = self.credentials.as_deref().filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(expand_env_vars(path)?));
        }

        match env::var(GOOGLE_CREDENTIALS_ENV) {
            Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Err(SettingsError::NoCredentials),
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            // $VAR (ends at non-alphanumeric/underscore)
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                name.push(ch);
                chars.next();
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
