//! Form State Manager
//!
//! Holds the lesson-plan input as one structured record and keeps the
//! per-session practice assignment structurally valid whenever the session
//! count changes. The assignment is a fixed-size ordered sequence: slot `i`
//! (0-based) is the practice of session `i + 1`, and its length always equals
//! the session count.

use crate::catalog::{EducationLevel, GraduateDimension, PedagogicalPractice};
use crate::error::{ApiError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

pub const MIN_SESSIONS: u32 = 1;
pub const MAX_SESSIONS: u32 = 10;

/// Settable form fields, named as the form submits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    SchoolName,
    TeacherName,
    TeacherNip,
    PrincipalName,
    PrincipalNip,
    Level,
    Grade,
    Subject,
    LearningOutcomes,
    LearningObjectives,
    Material,
    SessionsCount,
    DurationPerSession,
}

impl FormField {
    pub const ALL: [FormField; 13] = [
        FormField::SchoolName,
        FormField::TeacherName,
        FormField::TeacherNip,
        FormField::PrincipalName,
        FormField::PrincipalNip,
        FormField::Level,
        FormField::Grade,
        FormField::Subject,
        FormField::LearningOutcomes,
        FormField::LearningObjectives,
        FormField::Material,
        FormField::SessionsCount,
        FormField::DurationPerSession,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::SchoolName => "schoolName",
            FormField::TeacherName => "teacherName",
            FormField::TeacherNip => "teacherNip",
            FormField::PrincipalName => "principalName",
            FormField::PrincipalNip => "principalNip",
            FormField::Level => "level",
            FormField::Grade => "grade",
            FormField::Subject => "subject",
            FormField::LearningOutcomes => "learningOutcomes",
            FormField::LearningObjectives => "learningObjectives",
            FormField::Material => "material",
            FormField::SessionsCount => "sessionsCount",
            FormField::DurationPerSession => "durationPerSession",
        }
    }

    /// Fields that must be non-empty free text at submit time.
    pub fn is_required_text(self) -> bool {
        !matches!(
            self,
            FormField::Level | FormField::Grade | FormField::SessionsCount
        )
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    /// Accepts the camelCase form name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().chars().filter(|c| *c != '_').collect();
        FormField::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

/// The lesson-plan input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlanRequest {
    pub school_name: String,
    pub teacher_name: String,
    pub teacher_nip: String,
    pub principal_name: String,
    pub principal_nip: String,
    level: EducationLevel,
    grade: String,
    pub subject: String,
    pub learning_outcomes: String,
    pub learning_objectives: String,
    pub material: String,
    sessions_count: u32,
    pub duration_per_session: String,
    session_practices: Vec<PedagogicalPractice>,
    dimensions: BTreeSet<GraduateDimension>,
}

impl Default for LessonPlanRequest {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            teacher_name: String::new(),
            teacher_nip: String::new(),
            principal_name: String::new(),
            principal_nip: String::new(),
            level: EducationLevel::SD,
            grade: EducationLevel::SD.first_grade().to_string(),
            subject: String::new(),
            learning_outcomes: String::new(),
            learning_objectives: String::new(),
            material: String::new(),
            sessions_count: MIN_SESSIONS,
            duration_per_session: String::new(),
            session_practices: vec![PedagogicalPractice::default()],
            dimensions: BTreeSet::new(),
        }
    }
}

impl LessonPlanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> EducationLevel {
        self.level
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn sessions_count(&self) -> u32 {
        self.sessions_count
    }

    /// Practices in ascending session order.
    pub fn session_practices(&self) -> &[PedagogicalPractice] {
        &self.session_practices
    }

    /// `(session number, practice)` pairs, session numbers starting at 1.
    pub fn sessions(&self) -> impl Iterator<Item = (u32, PedagogicalPractice)> + '_ {
        self.session_practices
            .iter()
            .enumerate()
            .map(|(i, p)| (i as u32 + 1, *p))
    }

    /// Keyed view of the assignment. Keys are exactly `1..=sessions_count`.
    pub fn practice_map(&self) -> BTreeMap<u32, PedagogicalPractice> {
        self.sessions().collect()
    }

    pub fn dimensions(&self) -> &BTreeSet<GraduateDimension> {
        &self.dimensions
    }

    pub fn has_dimension(&self, dim: GraduateDimension) -> bool {
        self.dimensions.contains(&dim)
    }

    /// Current value of a field, as the form would display it.
    pub fn field(&self, field: FormField) -> String {
        match field {
            FormField::SchoolName => self.school_name.clone(),
            FormField::TeacherName => self.teacher_name.clone(),
            FormField::TeacherNip => self.teacher_nip.clone(),
            FormField::PrincipalName => self.principal_name.clone(),
            FormField::PrincipalNip => self.principal_nip.clone(),
            FormField::Level => self.level.label().to_string(),
            FormField::Grade => self.grade.clone(),
            FormField::Subject => self.subject.clone(),
            FormField::LearningOutcomes => self.learning_outcomes.clone(),
            FormField::LearningObjectives => self.learning_objectives.clone(),
            FormField::Material => self.material.clone(),
            FormField::SessionsCount => self.sessions_count.to_string(),
            FormField::DurationPerSession => self.duration_per_session.clone(),
        }
    }

    /// Apply one field edit.
    ///
    /// The session count never fails: unparsable or non-positive input becomes
    /// 1 and values above [`MAX_SESSIONS`] are clamped. A level change resets
    /// the grade to the level's first grade.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), ValidationError> {
        match field {
            FormField::SchoolName => self.school_name = value.to_string(),
            FormField::TeacherName => self.teacher_name = value.to_string(),
            FormField::TeacherNip => self.teacher_nip = value.to_string(),
            FormField::PrincipalName => self.principal_name = value.to_string(),
            FormField::PrincipalNip => self.principal_nip = value.to_string(),
            FormField::Level => {
                let level = value
                    .parse::<EducationLevel>()
                    .map_err(|_| ValidationError::InvalidValue {
                        field: field.name(),
                        value: value.to_string(),
                    })?;
                self.level = level;
                self.grade = level.first_grade().to_string();
            }
            FormField::Grade => {
                let grade = value.trim();
                if !self.level.has_grade(grade) {
                    return Err(ValidationError::InvalidValue {
                        field: field.name(),
                        value: value.to_string(),
                    });
                }
                self.grade = grade.to_string();
            }
            FormField::Subject => self.subject = value.to_string(),
            FormField::LearningOutcomes => self.learning_outcomes = value.to_string(),
            FormField::LearningObjectives => self.learning_objectives = value.to_string(),
            FormField::Material => self.material = value.to_string(),
            FormField::SessionsCount => {
                let count = parse_session_count(value);
                self.reconcile_sessions(count);
            }
            FormField::DurationPerSession => self.duration_per_session = value.to_string(),
        }
        Ok(())
    }

    /// [`set_field`](Self::set_field) addressed by form name.
    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        let field = name.parse::<FormField>()?;
        self.set_field(field, value)
    }

    /// Resize the practice assignment to `count` sessions.
    ///
    /// New sessions get the default practice, sessions beyond `count` are
    /// dropped, and a session that is dropped and later re-added starts over
    /// from the default. Running it twice with the same count changes nothing.
    pub fn reconcile_sessions(&mut self, count: u32) {
        let count = count.max(MIN_SESSIONS);
        self.sessions_count = count;
        self.session_practices
            .resize(count as usize, PedagogicalPractice::default());
    }

    /// Overwrite the practice of session `index` (1-based).
    pub fn set_session_practice(
        &mut self,
        index: u32,
        practice: PedagogicalPractice,
    ) -> Result<(), ValidationError> {
        let count = self.sessions_count;
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.session_practices.get_mut(i as usize))
            .ok_or(ValidationError::SessionOutOfRange { index, count })?;
        *slot = practice;
        Ok(())
    }

    /// Add `dim` if absent, remove it if present.
    pub fn toggle_dimension(&mut self, dim: GraduateDimension) {
        if !self.dimensions.remove(&dim) {
            self.dimensions.insert(dim);
        }
    }

    /// Submit gate of the form: at least one graduate dimension.
    pub fn validate_for_submit(&self) -> Result<(), ValidationError> {
        if self.dimensions.is_empty() {
            return Err(ValidationError::NoDimensions);
        }
        Ok(())
    }

    /// Re-check of the required free-text fields for entry points that have no
    /// input widgets enforcing them.
    pub fn validate_required_fields(&self) -> Result<(), ValidationError> {
        for field in FormField::ALL.into_iter().filter(|f| f.is_required_text()) {
            if self.field(field).trim().is_empty() {
                return Err(ValidationError::MissingField(field.name()));
            }
        }
        Ok(())
    }
}

/// Parse a session count the way the number input does: leading integer
/// digits count, anything unusable or non-positive becomes 1.
fn parse_session_count(value: &str) -> u32 {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if negative || leading.is_empty() {
        return MIN_SESSIONS;
    }
    match leading.parse::<u64>() {
        Ok(0) => MIN_SESSIONS,
        Ok(n) => n.min(MAX_SESSIONS as u64) as u32,
        // More digits than u64 holds: still a positive number past the cap.
        Err(_) => MAX_SESSIONS,
    }
}

/// Numeric or textual scalar in a form document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormScalar {
    Number(i64),
    Decimal(f64),
    Text(String),
}

impl FormScalar {
    /// The value as the form's text input would hold it.
    fn as_input(&self) -> String {
        match self {
            FormScalar::Number(n) => n.to_string(),
            FormScalar::Decimal(n) => n.to_string(),
            FormScalar::Text(s) => s.clone(),
        }
    }
}

/// A filled-in form stored as TOML or JSON, using the form's field names.
///
/// Loading never writes into a request directly: [`FormInput::apply`] replays
/// the document as form edits so the same repair rules apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_nip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_nip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_outcomes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_objectives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_count: Option<FormScalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_per_session: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,
    /// Session number (as a string key) to practice label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub session_practices: BTreeMap<String, String>,
}

impl FormInput {
    /// Load a form document; `.json` files are JSON, everything else TOML.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ApiError> {
        toml::from_str(content)
            .map_err(|e| ApiError::InvalidForm(format!("Failed to parse TOML form: {}", e)))
    }

    pub fn from_json(content: &str) -> Result<Self, ApiError> {
        serde_json::from_str(content)
            .map_err(|e| ApiError::InvalidForm(format!("Failed to parse JSON form: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::InvalidForm(format!("Failed to serialize form: {}", e)))
    }

    /// Snapshot a request back into a form document.
    pub fn from_request(request: &LessonPlanRequest) -> Self {
        let text = |field: FormField| {
            let value = request.field(field);
            (!value.is_empty()).then_some(value)
        };
        Self {
            school_name: text(FormField::SchoolName),
            teacher_name: text(FormField::TeacherName),
            teacher_nip: text(FormField::TeacherNip),
            principal_name: text(FormField::PrincipalName),
            principal_nip: text(FormField::PrincipalNip),
            level: Some(request.level().label().to_string()),
            grade: Some(request.grade().to_string()),
            subject: text(FormField::Subject),
            learning_outcomes: text(FormField::LearningOutcomes),
            learning_objectives: text(FormField::LearningObjectives),
            material: text(FormField::Material),
            sessions_count: Some(FormScalar::Number(request.sessions_count() as i64)),
            duration_per_session: text(FormField::DurationPerSession),
            dimensions: request
                .dimensions()
                .iter()
                .map(|d| d.label().to_string())
                .collect(),
            session_practices: request
                .sessions()
                .map(|(n, p)| (n.to_string(), p.label().to_string()))
                .collect(),
        }
    }

    /// Replay this document onto `request` as a sequence of form edits.
    ///
    /// Level is applied before grade and the session count before the
    /// per-session practices, matching the order a person fills the form.
    pub fn apply(&self, request: &mut LessonPlanRequest) -> Result<(), ValidationError> {
        let text_fields = [
            (FormField::SchoolName, &self.school_name),
            (FormField::TeacherName, &self.teacher_name),
            (FormField::TeacherNip, &self.teacher_nip),
            (FormField::PrincipalName, &self.principal_name),
            (FormField::PrincipalNip, &self.principal_nip),
            (FormField::Level, &self.level),
            (FormField::Grade, &self.grade),
            (FormField::Subject, &self.subject),
            (FormField::LearningOutcomes, &self.learning_outcomes),
            (FormField::LearningObjectives, &self.learning_objectives),
            (FormField::Material, &self.material),
            (FormField::DurationPerSession, &self.duration_per_session),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                request.set_field(field, value)?;
            }
        }

        if let Some(count) = &self.sessions_count {
            request.set_field(FormField::SessionsCount, &count.as_input())?;
        }

        for (key, label) in &self.session_practices {
            let index = key.trim().parse::<u32>().map_err(|_| ValidationError::InvalidValue {
                field: "sessionPractices",
                value: key.clone(),
            })?;
            let practice =
                label
                    .parse::<PedagogicalPractice>()
                    .map_err(|_| ValidationError::InvalidValue {
                        field: "sessionPractices",
                        value: label.clone(),
                    })?;
            request.set_session_practice(index, practice)?;
        }

        for label in &self.dimensions {
            let dim = label
                .parse::<GraduateDimension>()
                .map_err(|_| ValidationError::InvalidValue {
                    field: "dimensions",
                    value: label.clone(),
                })?;
            if !request.has_dimension(dim) {
                request.toggle_dimension(dim);
            }
        }

        Ok(())
    }

    /// Build a fresh request from this document.
    pub fn into_request(&self) -> Result<LessonPlanRequest, ValidationError> {
        let mut request = LessonPlanRequest::new();
        self.apply(&mut request)?;
        Ok(request)
    }
}
