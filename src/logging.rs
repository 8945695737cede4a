//! Logging System
//!
//! Structured logging on `tracing`. Level, format and destination come from
//! the configuration, overridden by `RPMGEN_LOG*` environment variables.

use crate::error::ApiError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const ENV_LOG: &str = "RPMGEN_LOG";
pub const ENV_LOG_FORMAT: &str = "RPMGEN_LOG_FORMAT";
pub const ENV_LOG_OUTPUT: &str = "RPMGEN_LOG_OUTPUT";
pub const ENV_LOG_MODULES: &str = "RPMGEN_LOG_MODULES";

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"; defaults to the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

/// `$XDG_DATA_HOME/rpmgen/rpmgen.log` or the platform equivalent.
pub fn default_log_file() -> PathBuf {
    ProjectDirs::from("", "", "rpmgen")
        .map(|dirs| dirs.data_dir().join("rpmgen.log"))
        .unwrap_or_else(|| PathBuf::from("rpmgen.log"))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(format!("Invalid log level: {}", self.level));
        }
        LogFormat::parse(&self.format)?;
        LogOutput::parse(&self.output)?;
        Ok(())
    }

    /// Resolved log file path.
    pub fn log_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_log_file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

impl LogOutput {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            other => Err(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
                other
            )),
        }
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (RPMGEN_LOG, RPMGEN_LOG_FORMAT, ...)
/// 2. The given config (CLI flags are folded in by the caller)
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.color && output != LogOutput::File;

    let registry = Registry::default().with(filter);

    // Each format/writer pair is a distinct layer type.
    macro_rules! install {
        ($writer:expr) => {
            match format {
                LogFormat::Json => registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_writer($writer),
                    )
                    .try_init(),
                LogFormat::Text => registry
                    .with(
                        fmt::layer()
                            .with_target(true)
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(use_color)
                            .with_writer($writer),
                    )
                    .try_init(),
            }
        };
    }

    let installed = match output {
        LogOutput::Stdout => install!(std::io::stdout),
        LogOutput::Stderr => install!(std::io::stderr),
        LogOutput::File => {
            let file = open_log_file(config)?;
            install!(std::sync::Mutex::new(file))
        }
    };

    installed.map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, ApiError> {
    let log_file = config.log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build the filter from RPMGEN_LOG, or from the config plus module directives.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_LOG) {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        filter = filter.add_directive(parse_directive(module, module_level)?);
    }

    if let Ok(modules) = std::env::var(ENV_LOG_MODULES) {
        for spec in modules.split(',') {
            if let Some((module, level)) = spec.split_once('=') {
                filter = filter.add_directive(parse_directive(module.trim(), level.trim())?);
            }
        }
    }

    Ok(filter)
}

fn parse_directive(
    module: &str,
    level: &str,
) -> Result<tracing_subscriber::filter::Directive, ApiError> {
    format!("{}={}", module, level)
        .parse()
        .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))
}

fn determine_format(config: &LoggingConfig) -> Result<LogFormat, ApiError> {
    if let Ok(format) = std::env::var(ENV_LOG_FORMAT) {
        if let Ok(format) = LogFormat::parse(&format) {
            return Ok(format);
        }
    }
    LogFormat::parse(&config.format).map_err(ApiError::ConfigError)
}

fn determine_output(config: &LoggingConfig) -> Result<LogOutput, ApiError> {
    let output = std::env::var(ENV_LOG_OUTPUT).unwrap_or_else(|_| config.output.clone());
    LogOutput::parse(&output).map_err(ApiError::ConfigError)
}
