//! Error types for the lesson-plan generator.

use thiserror::Error;

/// Form validation errors. Reported to the user; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("At least one graduate dimension must be selected")]
    NoDimensions,

    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Session {index} is out of range (session count is {count})")]
    SessionOutOfRange { index: u32, count: u32 },

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Failures of the external generation service, raised before a usable
/// response body was received.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Transport(String),

    #[error("Service returned no content: {0}")]
    EmptyResponse(String),
}

/// Top-level error for every operation the crate exposes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation service error: {0}")]
    GenerationService(#[from] ServiceError),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid form input: {0}")]
    InvalidForm(String),

    #[error("A generation request is already in progress")]
    Busy,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// The notice shown to the person filling the form.
    pub fn user_notice(&self) -> String {
        match self {
            ApiError::Validation(ValidationError::NoDimensions) => {
                "Pilih minimal satu dimensi lulusan.".to_string()
            }
            ApiError::Validation(ValidationError::MissingField(field)) => {
                format!("Kolom wajib belum diisi: {}.", field)
            }
            ApiError::Validation(other) => format!("Input tidak valid: {}.", other),
            ApiError::GenerationService(_) | ApiError::MalformedResponse(_) => {
                "Gagal menghasilkan RPM. Silakan coba lagi.".to_string()
            }
            ApiError::InvalidForm(msg) => format!("Berkas formulir tidak valid: {}", msg),
            ApiError::Busy => "RPM sedang disusun. Mohon tunggu.".to_string(),
            ApiError::ConfigError(msg) => format!("Konfigurasi tidak valid: {}", msg),
            ApiError::Io(e) => format!("Gagal membaca atau menulis berkas: {}", e),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
