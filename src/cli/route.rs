//! CLI route: single route table and run context. Dispatches to the form,
//! generation and rendering services and to presentation.

use crate::adapter::GenerationAdapter;
use crate::catalog::{EducationLevel, GraduateDimension, PedagogicalPractice};
use crate::cli::parse::{Commands, FormArgs};
use crate::cli::presentation::{
    format_form_summary, format_options, format_schema, format_success, format_warning,
    format_written,
};
use crate::config::RpmConfig;
use crate::error::{ApiError, ValidationError};
use crate::form::{FormField, FormInput, LessonPlanRequest, MAX_SESSIONS, MIN_SESSIONS};
use crate::prompt::build_prompt;
use crate::provider::{GeminiClient, GenerationServiceClient};
use crate::render::{render_html, render_text};
use crate::session::EditingSession;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Rendered document flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Html,
    Text,
    Json,
}

impl DocumentFormat {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(DocumentFormat::Html),
            "text" | "txt" => Ok(DocumentFormat::Text),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(ValidationError::InvalidValue {
                field: "format",
                value: value.to_string(),
            }
            .into()),
        }
    }
}

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: RpmConfig,
}

impl RunContext {
    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: RpmConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &RpmConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        info!(command = command.name(), "Running command");
        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(command = command.name(), duration_ms, "Command finished"),
            Err(e) => warn!(command = command.name(), duration_ms, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                form,
                output,
                format,
                date,
            } => {
                let provider = &self.config.provider;
                self.handle_generate(
                    form,
                    || {
                        let client: Arc<dyn GenerationServiceClient> =
                            Arc::new(GeminiClient::from_config(provider)?);
                        Ok(client)
                    },
                    output.as_deref(),
                    format,
                    date.as_deref(),
                )
            }
            Commands::Prompt { form } => {
                let request = self.load_request(form)?;
                Ok(build_prompt(&request))
            }
            Commands::Validate { form } => self.handle_validate(form),
            Commands::Schema => format_schema(),
            Commands::Options { level } => {
                let level = level
                    .as_deref()
                    .map(|l| {
                        l.parse::<EducationLevel>()
                            .map_err(|e| ValidationError::InvalidValue {
                                field: "level",
                                value: e.value,
                            })
                    })
                    .transpose()?;
                Ok(format_options(level))
            }
            Commands::Form { output } => self.handle_form_entry(output.as_deref()),
        }
    }

    /// Build the request from the form file and command-line edits.
    ///
    /// Edits apply in order: `--set` fields, then `--practice`, then
    /// `--dimension`, so a practice can target a session added by `--set`.
    pub fn load_request(&self, args: &FormArgs) -> Result<LessonPlanRequest, ApiError> {
        let mut request = match args.input {
            Some(ref path) => {
                let path = self.resolve_path(path);
                FormInput::load(&path)?.into_request()?
            }
            None => LessonPlanRequest::new(),
        };

        for assignment in &args.set {
            let (name, value) =
                assignment
                    .split_once('=')
                    .ok_or_else(|| ValidationError::InvalidValue {
                        field: "set",
                        value: assignment.clone(),
                    })?;
            request.set_field_by_name(name.trim(), value)?;
        }

        for assignment in &args.practice {
            let invalid = || ValidationError::InvalidValue {
                field: "practice",
                value: assignment.clone(),
            };
            let (index, label) = assignment.split_once('=').ok_or_else(invalid)?;
            let index: u32 = index.trim().parse().map_err(|_| invalid())?;
            let practice: PedagogicalPractice = label.parse().map_err(|_| invalid())?;
            request.set_session_practice(index, practice)?;
        }

        for label in &args.dimension {
            let dim: GraduateDimension =
                label.parse().map_err(|_| ValidationError::InvalidValue {
                    field: "dimension",
                    value: label.clone(),
                })?;
            if !request.has_dimension(dim) {
                request.toggle_dimension(dim);
            }
        }

        Ok(request)
    }

    /// Validate, generate once and render.
    ///
    /// `connect` builds the client only once the form passes validation, so
    /// a missing API key never hides a form problem. Tests inject a mock here.
    pub fn handle_generate<F>(
        &self,
        form: &FormArgs,
        connect: F,
        output: Option<&Path>,
        format: &str,
        date: Option<&str>,
    ) -> Result<String, ApiError>
    where
        F: FnOnce() -> Result<Arc<dyn GenerationServiceClient>, ApiError>,
    {
        let format = DocumentFormat::parse(format)?;
        let date = parse_date(date)?;
        let request = self.load_request(form)?;
        request.validate_for_submit()?;
        request.validate_required_fields()?;
        let client = connect()?;

        let adapter = GenerationAdapter::new(client);
        let mut session = EditingSession::with_request(request);

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        let plan = runtime.block_on(session.submit(&adapter))?.clone();

        let document = match format {
            DocumentFormat::Html => render_html(&plan, &session.request, date),
            DocumentFormat::Text => render_text(&plan, &session.request, date),
            DocumentFormat::Json => serde_json::to_string_pretty(&plan).map_err(|e| {
                ApiError::MalformedResponse(format!("Failed to serialize plan: {}", e))
            })?,
        };

        match output {
            Some(path) => {
                let path = self.resolve_path(path);
                std::fs::write(&path, document)?;
                info!(path = %path.display(), "Document written");
                Ok(format_written("RPM", &path))
            }
            None => Ok(document),
        }
    }

    fn handle_validate(&self, form: &FormArgs) -> Result<String, ApiError> {
        let request = self.load_request(form)?;
        let mut out = format_form_summary(&request);
        request.validate_for_submit()?;
        request.validate_required_fields()?;
        out.push('\n');
        out.push_str(&format_success("Formulir siap dikirim."));
        Ok(out)
    }

    /// Interactive form entry. Writes a form file, or returns it as TOML.
    fn handle_form_entry(&self, output: Option<&Path>) -> Result<String, ApiError> {
        use dialoguer::{Input, MultiSelect, Select};

        let input_error = |e: dialoguer::Error| {
            ApiError::ConfigError(format!("Failed to get user input: {}", e))
        };
        let mut request = LessonPlanRequest::new();

        let text_prompts = [
            (FormField::SchoolName, "Satuan Pendidikan"),
            (FormField::TeacherName, "Nama Guru"),
            (FormField::TeacherNip, "NIP Guru"),
            (FormField::PrincipalName, "Nama Kepala Sekolah"),
            (FormField::PrincipalNip, "NIP Kepala Sekolah"),
            (FormField::Subject, "Mata Pelajaran"),
        ];
        for (field, prompt) in text_prompts {
            let value: String = Input::new()
                .with_prompt(prompt)
                .interact_text()
                .map_err(input_error)?;
            request.set_field(field, &value)?;
        }

        let level_labels: Vec<&str> = EducationLevel::ALL.iter().map(|l| l.label()).collect();
        let level_index = Select::new()
            .with_prompt("Jenjang")
            .items(&level_labels)
            .default(0)
            .interact()
            .map_err(input_error)?;
        request.set_field(FormField::Level, level_labels[level_index])?;

        let grades = request.level().grades();
        let grade_index = Select::new()
            .with_prompt("Kelas")
            .items(grades)
            .default(0)
            .interact()
            .map_err(input_error)?;
        request.set_field(FormField::Grade, grades[grade_index])?;

        let long_prompts = [
            (FormField::LearningOutcomes, "Capaian Pembelajaran (CP)"),
            (FormField::LearningObjectives, "Tujuan Pembelajaran (TP)"),
            (FormField::Material, "Materi Pelajaran"),
        ];
        for (field, prompt) in long_prompts {
            let value: String = Input::new()
                .with_prompt(prompt)
                .interact_text()
                .map_err(input_error)?;
            request.set_field(field, &value)?;
        }

        let count: u32 = Input::new()
            .with_prompt(format!("Jumlah Pertemuan ({}-{})", MIN_SESSIONS, MAX_SESSIONS))
            .default(MIN_SESSIONS)
            .interact_text()
            .map_err(input_error)?;
        request.set_field(FormField::SessionsCount, &count.to_string())?;

        let duration: String = Input::new()
            .with_prompt("Durasi per Pertemuan")
            .default("2 x 35 menit".to_string())
            .interact_text()
            .map_err(input_error)?;
        request.set_field(FormField::DurationPerSession, &duration)?;

        let practice_labels: Vec<&str> =
            PedagogicalPractice::ALL.iter().map(|p| p.label()).collect();
        for session in 1..=request.sessions_count() {
            let choice = Select::new()
                .with_prompt(format!("Praktik Pedagogis Pertemuan {}", session))
                .items(&practice_labels)
                .default(0)
                .interact()
                .map_err(input_error)?;
            request.set_session_practice(session, PedagogicalPractice::ALL[choice])?;
        }

        let dimension_labels: Vec<&str> =
            GraduateDimension::ALL.iter().map(|d| d.label()).collect();
        let chosen = MultiSelect::new()
            .with_prompt("Dimensi Lulusan (spasi untuk memilih)")
            .items(&dimension_labels)
            .interact()
            .map_err(input_error)?;
        for index in chosen {
            request.toggle_dimension(GraduateDimension::ALL[index]);
        }

        let toml = FormInput::from_request(&request).to_toml()?;
        let notice = request
            .validate_for_submit()
            .err()
            .map(|e| format_warning(&ApiError::from(e).user_notice()));

        match output {
            Some(path) => {
                let path = self.resolve_path(path);
                std::fs::write(&path, toml)?;
                let mut out = format_written("Form", &path);
                if let Some(notice) = notice {
                    out.push('\n');
                    out.push_str(&notice);
                }
                Ok(out)
            }
            None => Ok(toml),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, ApiError> {
    match date {
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidValue {
                field: "date",
                value: value.to_string(),
            }
            .into()
        }),
        None => Ok(Local::now().date_naive()),
    }
}
