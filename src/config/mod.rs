//! Configuration module for grid-ops.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, DatabaseSettings, LoggingSettings, Settings, SettingsError, CONFIG_ENV_VAR,
};
