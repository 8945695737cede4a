//! Integration tests for CLI routing with an injected generation client

use clap::Parser;
use rpmgen::cli::{map_error, Cli, Commands, FormArgs, RunContext};
use rpmgen::config::RpmConfig;
use rpmgen::error::{ApiError, ServiceError};
use rpmgen::provider::GenerationServiceClient;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::test_utils::{plan_json, MockClient, COMPLETE_FORM_TOML};

fn workspace_with_form() -> (TempDir, RunContext) {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("form.toml"), COMPLETE_FORM_TOML).unwrap();
    let ctx = RunContext::with_config(temp_dir.path().to_path_buf(), RpmConfig::default());
    (temp_dir, ctx)
}

fn connect(
    mock: &Arc<MockClient>,
) -> impl FnOnce() -> Result<Arc<dyn GenerationServiceClient>, ApiError> {
    let client: Arc<dyn GenerationServiceClient> = mock.clone();
    move || Ok(client)
}

fn form_args() -> FormArgs {
    FormArgs {
        input: Some(PathBuf::from("form.toml")),
        ..FormArgs::default()
    }
}

#[test]
fn test_generate_writes_html_document() {
    let (temp_dir, ctx) = workspace_with_form();
    let mock = Arc::new(MockClient::answering(plan_json(1, "Air di sekitar kita")));

    let out = ctx
        .handle_generate(
            &form_args(),
            connect(&mock),
            Some(PathBuf::from("rpm.html").as_path()),
            "html",
            Some("2026-07-14"),
        )
        .unwrap();
    assert!(out.contains("rpm.html"));
    assert_eq!(mock.call_count(), 1);

    let html = std::fs::read_to_string(temp_dir.path().join("rpm.html")).unwrap();
    assert!(html.contains("Air di sekitar kita"));
    assert!(html.contains("Jakarta, 14 Juli 2026"));
}

#[test]
fn test_generate_json_returns_plan() {
    let (_temp_dir, ctx) = workspace_with_form();
    let mock = Arc::new(MockClient::answering(plan_json(1, "Topik JSON")));

    let out = ctx
        .handle_generate(&form_args(), connect(&mock), None, "json", None)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["desain"]["topik"], "Topik JSON");
    assert_eq!(value["pengalaman"][0]["sessionNumber"], 1);
}

#[test]
fn test_generate_failure_maps_to_notice() {
    let (_temp_dir, ctx) = workspace_with_form();
    let mock = Arc::new(MockClient::failing(ServiceError::RateLimit, "quota exhausted"));

    let err = ctx
        .handle_generate(&form_args(), connect(&mock), None, "text", None)
        .unwrap_err();
    let shown = map_error(&err);
    assert!(shown.starts_with("Gagal menghasilkan RPM. Silakan coba lagi."));
    assert!(shown.contains("quota exhausted"));
}

#[test]
fn test_generate_rejects_unknown_format_before_calling() {
    let (_temp_dir, ctx) = workspace_with_form();
    let mock = Arc::new(MockClient::answering(plan_json(1, "x")));

    assert!(ctx
        .handle_generate(&form_args(), connect(&mock), None, "pdf", None)
        .is_err());
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_generate_reports_form_problem_before_building_client() {
    let (_temp_dir, ctx) = workspace_with_form();
    let mut connected = false;
    let form = FormArgs::default();

    let err = ctx
        .handle_generate(
            &form,
            || {
                connected = true;
                Err(ApiError::ConfigError("No API key configured".to_string()))
            },
            None,
            "html",
            None,
        )
        .unwrap_err();
    assert!(!connected);
    assert_eq!(map_error(&err), "Pilih minimal satu dimensi lulusan.");
}

#[test]
fn test_generate_command_without_api_key_shows_validation_notice() {
    let (_temp_dir, ctx) = workspace_with_form();
    let cli = Cli::try_parse_from(["rpmgen", "generate"]).unwrap();
    let err = ctx.execute(&cli.command).unwrap_err();
    assert_eq!(map_error(&err), "Pilih minimal satu dimensi lulusan.");
}

#[test]
fn test_validate_command_accepts_complete_form() {
    let (_temp_dir, ctx) = workspace_with_form();
    let out = ctx
        .execute(&Commands::Validate { form: form_args() })
        .unwrap();
    assert!(out.contains("Formulir siap dikirim."));
}

#[test]
fn test_parsed_schema_and_options_commands_run() {
    let (_temp_dir, ctx) = workspace_with_form();

    let cli = Cli::try_parse_from(["rpmgen", "schema"]).unwrap();
    let out = ctx.execute(&cli.command).unwrap();
    assert!(out.contains("rpm-response/1"));

    let cli = Cli::try_parse_from(["rpmgen", "options", "--level", "smp"]).unwrap();
    let out = ctx.execute(&cli.command).unwrap();
    assert!(out.contains("Kelas 7, Kelas 8, Kelas 9"));

    let cli = Cli::try_parse_from(["rpmgen", "options", "--level", "TK"]).unwrap();
    assert!(ctx.execute(&cli.command).is_err());
}

#[test]
fn test_prompt_command_applies_cli_edits() {
    let (_temp_dir, ctx) = workspace_with_form();
    let cli = Cli::try_parse_from([
        "rpmgen",
        "prompt",
        "--input",
        "form.toml",
        "--set",
        "sessionsCount=2",
        "--practice",
        "2=Game Based Learning",
    ])
    .unwrap();
    let out = ctx.execute(&cli.command).unwrap();
    assert!(out.contains("Pertemuan 1: Inkuiri-Discovery"));
    assert!(out.contains("Pertemuan 2: Game Based Learning"));
    assert!(out.contains("Jumlah Pertemuan: 2"));
}
