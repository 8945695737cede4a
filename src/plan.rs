//! The structured lesson plan returned by the generation service.
//!
//! Field names mirror the wire document exactly; every member is required and
//! no member may be null.

use crate::catalog::MoodTag;
use crate::form::LessonPlanRequest;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identitas {
    pub school_name: String,
    pub subject: String,
    pub grade_semester: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifikasi {
    /// Student profile narrative.
    pub siswa: String,
    pub materi: String,
    pub dimensi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desain {
    pub cp: String,
    /// Cross-discipline linkage narrative.
    pub lintas_disiplin: String,
    pub tp: String,
    /// Topic title.
    pub topik: String,
    pub pedagogis: String,
    pub kemitraan: String,
    pub lingkungan: String,
    pub digital: String,
}

/// One session of the learning experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    #[serde(deserialize_with = "deserialize_session_number")]
    pub session_number: u32,
    pub pedagogical_practice: String,
    /// Mood tag as produced by the model; see [`MoodTag::parse`].
    pub tag: String,
    /// Opening phase.
    pub memahami: String,
    /// Core phase.
    pub mengaplikasi: String,
    /// Closing phase.
    pub refleksi: String,
}

impl SessionPlan {
    pub fn mood(&self) -> Option<MoodTag> {
        MoodTag::parse(&self.tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asesmen {
    /// Diagnostic assessment.
    pub awal: String,
    /// Formative assessment.
    pub proses: String,
    /// Summative assessment.
    pub akhir: String,
}

/// A generated lesson plan. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLessonPlan {
    pub identitas: Identitas,
    pub identifikasi: Identifikasi,
    pub desain: Desain,
    pub pengalaman: Vec<SessionPlan>,
    pub asesmen: Asesmen,
}

impl GeneratedLessonPlan {
    /// Cross-field mismatches against the request that produced this plan.
    ///
    /// These are expectations of the document view, not parse failures, so
    /// they are reported rather than enforced.
    pub fn consistency_warnings(&self, request: &LessonPlanRequest) -> Vec<String> {
        let mut warnings = Vec::new();
        let expected = request.sessions_count() as usize;
        if self.pengalaman.len() != expected {
            warnings.push(format!(
                "Expected {} sessions, response has {}",
                expected,
                self.pengalaman.len()
            ));
        }
        for (position, session) in self.pengalaman.iter().enumerate() {
            let position = position as u32 + 1;
            if session.session_number != position {
                warnings.push(format!(
                    "Session at position {} is numbered {}",
                    position, session.session_number
                ));
            }
            if session.mood().is_none() {
                warnings.push(format!(
                    "Session {} has unknown mood tag '{}'",
                    session.session_number, session.tag
                ));
            }
        }
        warnings
    }
}

/// Session numbers arrive as JSON numbers; integral floats such as `2.0` are
/// accepted, fractional or negative values are not.
fn deserialize_session_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "sessionNumber must be a non-negative integer, got {}",
            value
        )));
    }
    Ok(value as u32)
}
