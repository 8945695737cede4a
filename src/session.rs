//! Editing session context.
//!
//! Owns the input record, the current result and the busy flag for one
//! person's editing session, so a driver (CLI, UI, test) holds all mutable
//! state explicitly.

use crate::adapter::GenerationAdapter;
use crate::error::ApiError;
use crate::form::LessonPlanRequest;
use crate::plan::GeneratedLessonPlan;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

/// Shared "generation in progress" flag.
///
/// Clones observe the same flag. At most one [`BusyGuard`] exists at a time;
/// dropping it clears the flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// Set the flag, or `None` when it is already set.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                inner: Arc::clone(&self.inner),
            })
    }
}

/// Holds the busy flag; released on drop, including when the owning future
/// is dropped mid-call.
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct EditingSession {
    pub request: LessonPlanRequest,
    result: Option<GeneratedLessonPlan>,
    busy: BusyFlag,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(request: LessonPlanRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }

    /// Latest successfully generated plan, if any.
    pub fn result(&self) -> Option<&GeneratedLessonPlan> {
        self.result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Handle on the busy flag for observers.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Validate the form and run one generation.
    ///
    /// On success the result is replaced; on any failure the previous result
    /// stays as it was. The busy flag is set for the duration of the call and
    /// cleared on every exit path.
    pub async fn submit(
        &mut self,
        adapter: &GenerationAdapter,
    ) -> Result<&GeneratedLessonPlan, ApiError> {
        self.request.validate_for_submit()?;
        self.request.validate_required_fields()?;

        let _guard = self.busy.try_acquire().ok_or(ApiError::Busy)?;
        info!("Submitting lesson plan request");

        let outcome = adapter.generate(&self.request).await;
        match outcome {
            Ok(plan) => {
                info!(topic = %plan.desain.topik, "Lesson plan generated");
                Ok(self.result.insert(plan))
            }
            Err(e) => {
                error!(error = %e, "Lesson plan generation failed");
                Err(e)
            }
        }
    }
}
