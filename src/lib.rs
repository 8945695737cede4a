//! rpmgen: Deep-learning lesson plan (RPM) generator
//!
//! Collects a teacher's lesson-plan form, asks a generative model for a
//! structured plan that conforms to a fixed response schema, and renders the
//! result as a printable document.

pub mod adapter;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod plan;
pub mod prompt;
pub mod provider;
pub mod render;
pub mod schema;
pub mod session;

pub use adapter::GenerationAdapter;
pub use error::{ApiError, ServiceError, ValidationError};
pub use form::LessonPlanRequest;
pub use plan::GeneratedLessonPlan;
pub use session::EditingSession;
