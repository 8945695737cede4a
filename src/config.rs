//! Configuration System
//!
//! Layered configuration: built-in defaults, the global user file, workspace
//! files, then `RPMGEN__*` environment overrides. An explicit config file
//! replaces the global and workspace file layers.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use crate::provider::ProviderConfig;

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

pub use merge::merge_policy::{ENV_PREFIX, ENV_SEPARATOR};
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpmConfig {
    /// Generation service settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    Provider(String),
    Logging(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ConfigValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl RpmConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ConfigValidationError::Provider(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ConfigValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all problems into one `ConfigError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })
    }
}

/// Builds [`RpmConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<RpmConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = merge::merge_policy::with_environment(builder);

        let config: RpmConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), model = %config.provider.model, "Configuration loaded");
        Ok(config)
    }

    /// The configuration a run uses: `explicit` when given, the workspace
    /// layers otherwise. Fails if the result does not validate.
    pub fn resolve(workspace_root: &Path, explicit: Option<&Path>) -> Result<RpmConfig, ApiError> {
        let config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load(workspace_root)?,
        };
        config.ensure_valid()?;
        Ok(config)
    }

    /// Load configuration from one explicit file, skipping the global and
    /// workspace files.
    pub fn load_from_file(path: &Path) -> Result<RpmConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path.to_path_buf()));
        let builder = merge::merge_policy::with_environment(builder);

        let config: RpmConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }
}
