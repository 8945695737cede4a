//! Integration tests for layered configuration

use rpmgen::config::{global_config_path, ConfigLoader};
use rpmgen::provider::DEFAULT_MODEL;
use tempfile::TempDir;

use super::test_utils::env_lock;

/// Point XDG_CONFIG_HOME at `dir` for the duration of `f`.
fn with_config_home<T>(dir: &TempDir, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());
    let out = f();
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    out
}

#[test]
fn test_global_file_is_read_from_xdg_config_home() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("rpmgen")).unwrap();
    std::fs::write(
        home.path().join("rpmgen").join("config.toml"),
        "[provider]\nmodel = \"global-model\"\n\n[logging]\nformat = \"json\"\n",
    )
    .unwrap();

    let (path, config) = with_config_home(&home, || {
        (global_config_path(), ConfigLoader::load(workspace.path()))
    });
    assert_eq!(path, Some(home.path().join("rpmgen").join("config.toml")));

    let config = config.unwrap();
    assert_eq!(config.provider.model, "global-model");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("rpmgen")).unwrap();
    std::fs::write(
        home.path().join("rpmgen").join("config.toml"),
        "[provider]\nmodel = \"global-model\"\napi_key_env = \"MY_KEY\"\n",
    )
    .unwrap();
    std::fs::create_dir_all(workspace.path().join("config")).unwrap();
    std::fs::write(
        workspace.path().join("config").join("config.toml"),
        "[provider]\nmodel = \"workspace-model\"\n",
    )
    .unwrap();

    let config = with_config_home(&home, || ConfigLoader::load(workspace.path())).unwrap();
    assert_eq!(config.provider.model, "workspace-model");
    assert_eq!(config.provider.api_key_env, "MY_KEY");
}

#[test]
fn test_explicit_file_skips_workspace_files() {
    let _lock = env_lock();
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir_all(workspace.path().join("config")).unwrap();
    std::fs::write(
        workspace.path().join("config").join("config.toml"),
        "[provider]\nmodel = \"workspace-model\"\n",
    )
    .unwrap();
    let explicit = workspace.path().join("explicit.toml");
    std::fs::write(&explicit, "[logging]\nlevel = \"warn\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&explicit).unwrap();
    assert_eq!(config.provider.model, DEFAULT_MODEL);
    assert_eq!(config.logging.level, "warn");
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_fail_validation() {
    let _lock = env_lock();
    let workspace = TempDir::new().unwrap();
    let explicit = workspace.path().join("bad.toml");
    std::fs::write(
        &explicit,
        "[provider]\nendpoint = \"ftp://example.com\"\ntemperature = 3.5\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&explicit).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().starts_with("Provider:"));
}
