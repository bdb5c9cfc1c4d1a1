//! Configuration management for Rolegate
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (ROLEGATE__* prefix, highest precedence)
//! 2. rolegate.local.toml (gitignored, local overrides)
//! 3. rolegate.toml (git-tracked, project config)
//! 4. ~/.config/rolegate/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! A custom role table is kept in its own TOML file (`rbac.roles_file`) and
//! parsed verbatim, so role and module names keep their exact spelling.

use anyhow::Result;
use rolegate_rbac::RolePermissionTable;
use rolegate_types::Action;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

/// Main Rolegate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RolegateConfig {
    pub project: ProjectConfig,
    pub logging: LoggingConfig,
    pub rbac: RbacConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "rolegate-dashboard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// Log every authorization decision.
    pub audit: bool,
    /// TOML file replacing the built-in role table.
    pub roles_file: Option<PathBuf>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            audit: true,
            roles_file: None,
        }
    }
}

impl RbacConfig {
    /// Returns the configured role table.
    ///
    /// Without `roles_file` this is the built-in table.
    pub fn role_table(&self) -> Result<RolePermissionTable, ConfigError> {
        match &self.roles_file {
            Some(path) => load_role_table(path),
            None => Ok(RolePermissionTable::standard()),
        }
    }
}

/// Reads a role table from a TOML file.
///
/// ```toml
/// [vendor]
/// USER = ["READ"]
/// PRODUCT = ["CREATE", "READ", "UPDATE"]
/// ```
///
/// Actions are matched case-insensitively. Unlike session grants, an unknown
/// action here is an error naming the role and module it appears under.
pub fn load_role_table(path: impl AsRef<Path>) -> Result<RolePermissionTable, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::RoleTableRead {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: BTreeMap<String, BTreeMap<String, Vec<String>>> = toml::from_str(&content)
        .map_err(|source| ConfigError::RoleTableSyntax {
            path: path.to_path_buf(),
            source,
        })?;

    let mut builder = RolePermissionTable::builder();
    for (role, modules) in raw {
        builder = builder.role(role.as_str());
        for (module, actions) in modules {
            let actions = actions
                .iter()
                .map(|action| action.parse::<Action>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| ConfigError::UnknownAction {
                    path: path.to_path_buf(),
                    role: role.clone(),
                    module: module.clone(),
                    source,
                })?;
            builder = builder.grant(role.as_str(), module, actions);
        }
    }
    Ok(builder.build())
}

/// Development proxy: forwards selected path prefixes to one upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Upstream origin, e.g. `http://localhost:5000`.
    pub upstream: String,
    /// Rewrite the `Host` header to the upstream's authority.
    pub change_origin: bool,
    pub routes: Vec<ProxyRouteConfig>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream: "http://localhost:5000".to_string(),
            change_origin: true,
            routes: vec![
                ProxyRouteConfig::new("/api", "API"),
                ProxyRouteConfig::new("/uploads", "UPLOADS"),
            ],
        }
    }
}

/// One forwarded path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRouteConfig {
    pub prefix: String,
    /// Tag attached to every log line for this route.
    pub label: String,
}

impl ProxyRouteConfig {
    pub fn new(prefix: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            label: label.into(),
        }
    }
}

impl ProxyConfig {
    /// Checks the proxy section for values the proxy cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let upstream = self.upstream.trim();
        if upstream.is_empty() {
            return Err(ConfigError::InvalidProxy(
                "proxy.upstream must not be empty".to_string(),
            ));
        }
        if !(upstream.starts_with("http://") || upstream.starts_with("https://")) {
            return Err(ConfigError::InvalidProxy(format!(
                "proxy.upstream must be an http(s) origin, got {upstream:?}"
            )));
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.prefix.starts_with('/') {
                return Err(ConfigError::InvalidProxy(format!(
                    "proxy route prefix {:?} must start with '/'",
                    route.prefix
                )));
            }
            if !seen.insert(route.prefix.as_str()) {
                return Err(ConfigError::InvalidProxy(format!(
                    "duplicate proxy route prefix {:?}",
                    route.prefix
                )));
            }
        }

        Ok(())
    }
}

impl RolegateConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        self.proxy.validate()
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        self.rbac.roles_file = self.rbac.roles_file.take().map(|path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        });
    }
}
