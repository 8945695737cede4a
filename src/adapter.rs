//! Generation Request Adapter
//!
//! Turns a validated [`LessonPlanRequest`] into exactly one call against a
//! [`GenerationServiceClient`] and produces either a [`GeneratedLessonPlan`]
//! or a typed failure. The returned plan is the service's answer unmodified.

use crate::error::ApiError;
use crate::form::LessonPlanRequest;
use crate::plan::GeneratedLessonPlan;
use crate::prompt::build_prompt;
use crate::provider::GenerationServiceClient;
use crate::schema::{check_conformance, response_schema, RESPONSE_SCHEMA_VERSION};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct GenerationAdapter {
    client: Arc<dyn GenerationServiceClient>,
}

impl GenerationAdapter {
    pub fn new(client: Arc<dyn GenerationServiceClient>) -> Self {
        Self { client }
    }

    /// Generate a lesson plan for `request`. One outbound call, no retry.
    pub async fn generate(
        &self,
        request: &LessonPlanRequest,
    ) -> Result<GeneratedLessonPlan, ApiError> {
        let prompt = build_prompt(request);
        debug!(
            prompt_chars = prompt.chars().count(),
            schema_version = RESPONSE_SCHEMA_VERSION,
            "Prepared generation request"
        );
        info!(
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            sessions = request.sessions_count(),
            "Requesting lesson plan"
        );

        let raw = self
            .client
            .generate_structured(&prompt, response_schema())
            .await?;

        let plan = parse_response(&raw)?;
        for warning in plan.consistency_warnings(request) {
            warn!(%warning, "Generated plan does not match request");
        }
        info!(sessions = plan.pengalaman.len(), "Lesson plan received");
        Ok(plan)
    }
}

/// Parse and validate the service's raw text against the response schema.
pub fn parse_response(raw: &str) -> Result<GeneratedLessonPlan, ApiError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ApiError::MalformedResponse(format!("Response is not valid JSON: {}", e)))?;

    let problems = check_conformance(&value);
    if !problems.is_empty() {
        return Err(ApiError::MalformedResponse(format!(
            "Response does not match schema {}: {}",
            RESPONSE_SCHEMA_VERSION,
            problems.join("; ")
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::MalformedResponse(format!("Response has invalid members: {}", e)))
}
