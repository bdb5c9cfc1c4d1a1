//! Configuration error types

use std::path::PathBuf;

use rolegate_types::UnknownAction;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read role table at {path}: {source}")]
    RoleTableRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed role table at {path}: {source}")]
    RoleTableSyntax {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A role table names an action that does not exist.
    #[error("Role table at {path}: role '{role}', module '{module}': {source}")]
    UnknownAction {
        path: PathBuf,
        role: String,
        module: String,
        source: UnknownAction,
    },

    #[error("Invalid logging.level {0:?}: expected trace, debug, info, warn or error")]
    InvalidLogLevel(String),

    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),
}
