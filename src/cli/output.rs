//! CLI output: error mapping from domain errors to the user-facing notice.

use crate::error::ApiError;

/// Map an error to the text printed on stderr.
///
/// Generation failures share one notice, so the cause follows on a second line.
pub fn map_error(e: &ApiError) -> String {
    let notice = e.user_notice();
    match e {
        ApiError::GenerationService(_) | ApiError::MalformedResponse(_) => {
            format!("{}\n  ({})", notice, e)
        }
        _ => notice,
    }
}
