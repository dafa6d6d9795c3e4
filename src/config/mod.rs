//! Configuration module for pypinfo.
//!
//! Handles the persisted credentials location and environment variables.

mod settings;

pub use settings::{expand_env_vars, Settings, SettingsError, CONFIG_ENV, GOOGLE_CREDENTIALS_ENV};
