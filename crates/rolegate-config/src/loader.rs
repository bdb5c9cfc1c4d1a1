//! Configuration loader with multi-source merging

use crate::RolegateConfig;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `ROLEGATE__PROXY__UPSTREAM`.
const ENV_PREFIX: &str = "ROLEGATE";

/// Git-tracked project configuration.
const PROJECT_CONFIG_FILE: &str = "rolegate.toml";

/// Gitignored per-checkout overrides.
const LOCAL_CONFIG_FILE: &str = "rolegate.local.toml";

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    include_user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            include_user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Skip ~/.config/rolegate/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.include_user_config = false;
        self
    }

    /// Returns the user-wide config file (`~/.config/rolegate/config.toml` on
    /// Linux), or `None` when the platform has no home directory.
    pub fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("com", "Rolegate", "rolegate")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Config files consulted, lowest precedence first. Missing files are
    /// skipped at load time.
    pub fn sources(&self) -> Vec<PathBuf> {
        let mut sources = Vec::with_capacity(3);
        if self.include_user_config {
            sources.extend(Self::user_config_file());
        }
        sources.push(self.project_dir.join(PROJECT_CONFIG_FILE));
        sources.push(self.project_dir.join(LOCAL_CONFIG_FILE));
        sources
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<RolegateConfig> {
        let mut builder = config::Config::builder();

        // Built-in defaults, then user, project and local files
        let defaults = RolegateConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        for file in self.sources().into_iter().filter(|file| file.exists()) {
            builder = builder.add_source(
                config::File::from(file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variables (ROLEGATE__PROXY__UPSTREAM, ...)
        // Double underscore separates sections so field names may contain '_'.
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let mut rolegate_config: RolegateConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        rolegate_config.resolve_paths(&self.project_dir);

        rolegate_config
            .validate()
            .context("Configuration failed validation")?;

        Ok(rolegate_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
