//! Merge rules: built-in defaults and the environment override layer.

use crate::provider::{DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix of environment overrides, e.g. `RPMGEN__PROVIDER__MODEL`.
pub const ENV_PREFIX: &str = "RPMGEN";
pub const ENV_SEPARATOR: &str = "__";

/// Create a Config builder with defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.model", DEFAULT_MODEL)?
        .set_default("provider.endpoint", DEFAULT_ENDPOINT)?
        .set_default("provider.api_key_env", DEFAULT_API_KEY_ENV)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}

/// Environment variables override every file layer.
pub fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR),
    )
}
