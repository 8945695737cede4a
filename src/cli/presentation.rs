//! CLI presentation: catalog tables, form summary and status lines.

use crate::catalog::{EducationLevel, GraduateDimension, MoodTag, PedagogicalPractice};
use crate::error::ApiError;
use crate::form::{FormField, LessonPlanRequest};
use crate::schema::{response_schema, RESPONSE_SCHEMA_VERSION};
use comfy_table::presets::{UTF8_BORDERS_ONLY, UTF8_FULL};
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

pub fn format_warning(message: &str) -> String {
    format!("{} {}", "!".yellow(), message)
}

/// Catalog listing for `rpmgen options`.
pub fn format_options(level: Option<EducationLevel>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", format_section_heading("Jenjang & Kelas")));
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Jenjang", "Kelas"]);
    let levels: Vec<EducationLevel> = match level {
        Some(level) => vec![level],
        None => EducationLevel::ALL.to_vec(),
    };
    for level in levels {
        table.add_row(vec![level.label().to_string(), level.grades().join(", ")]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n", format_section_heading("Praktik Pedagogis")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Praktik", "Bawaan"]);
    for practice in PedagogicalPractice::ALL {
        let marker = if practice == PedagogicalPractice::default() {
            "ya"
        } else {
            ""
        };
        table.add_row(vec![practice.label(), marker]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n", format_section_heading("Dimensi Lulusan")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["No", "Dimensi"]);
    for (i, dim) in GraduateDimension::ALL.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), dim.label().to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n", format_section_heading("Nuansa Pertemuan")));
    let tags: Vec<&str> = MoodTag::ALL.iter().map(|t| t.label()).collect();
    out.push_str(&format!("  {}\n", tags.join(", ")));
    out
}

/// The form as it would be submitted.
pub fn format_form_summary(request: &LessonPlanRequest) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Formulir RPM")));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kolom", "Isi"]);
    for field in FormField::ALL {
        let value = request.field(field);
        let shown = if value.trim().is_empty() {
            format!("{}", "(kosong)".dimmed())
        } else {
            value
        };
        table.add_row(vec![field.name().to_string(), shown]);
    }
    out.push_str(&format!("{}\n\n", table));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Pertemuan", "Praktik Pedagogis"]);
    for (number, practice) in request.sessions() {
        table.add_row(vec![number.to_string(), practice.label().to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));

    let dimensions: Vec<&str> = request.dimensions().iter().map(|d| d.label()).collect();
    if dimensions.is_empty() {
        out.push_str(&format!("Dimensi Lulusan: {}\n", "(belum dipilih)".dimmed()));
    } else {
        out.push_str(&format!("Dimensi Lulusan: {}\n", dimensions.join(", ")));
    }
    out
}

/// The response schema wrapped with its version, as one JSON document.
pub fn format_schema() -> Result<String, ApiError> {
    let document = serde_json::json!({
        "version": RESPONSE_SCHEMA_VERSION,
        "schema": response_schema(),
    });
    serde_json::to_string_pretty(&document)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize schema: {}", e)))
}

pub fn format_written(what: &str, path: &Path) -> String {
    format_success(&format!("{} written to {}", what, path.display()))
}
