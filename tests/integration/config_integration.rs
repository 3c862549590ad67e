//! Layered configuration loading against real files and environment variables

use super::test_utils::{env_lock, TestWorkspace};
use outreach::cli::RunContext;
use outreach::config::{ConfigLoader, ENV_NAME_VAR};

#[test]
fn test_workspace_files_and_environment_layering() {
    let _guard = env_lock();
    let ws = TestWorkspace::new();
    ws.write(
        "config/config.toml",
        r#"
[provider]
model = "llama-3.3-70b-versatile"
api_key = "workspace-key"

[batch]
chunk_size = 8
pool_width = 2

[logging]
level = "warn"
"#,
    );
    ws.write("config/production.toml", "[batch]\npool_width = 4\n");

    std::env::set_var(ENV_NAME_VAR, "production");
    std::env::set_var("OUTREACH__RETRY__MAX_ATTEMPTS", "5");
    let loaded = ConfigLoader::load_with_global(&ws.path(), None);
    std::env::remove_var(ENV_NAME_VAR);
    std::env::remove_var("OUTREACH__RETRY__MAX_ATTEMPTS");

    let config = loaded.unwrap();
    assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
    assert_eq!(config.batch.chunk_size, 8);
    assert_eq!(config.batch.pool_width, 4);
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.timeout_secs, 60);
    assert_eq!(config.logging.level, "warn");
    assert!(config.validate().is_ok());
}

#[cfg(target_os = "linux")]
#[test]
fn test_global_file_under_xdg_config_home() {
    let _guard = env_lock();
    let ws = TestWorkspace::new();
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", ws.path().join("xdg"));

    let global = outreach::config::global_config_path().unwrap();
    std::fs::create_dir_all(global.parent().unwrap()).unwrap();
    std::fs::write(&global, "[retry]\nmin_chars = 45\n").unwrap();
    let loaded = ConfigLoader::load(&ws.path().join("project"));

    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert!(global.starts_with(ws.path().join("xdg")));
    assert_eq!(loaded.unwrap().retry.min_chars, 45);
}

#[test]
fn test_invalid_values_are_all_reported() {
    let _guard = env_lock();
    let ws = TestWorkspace::new();
    let file = ws.write(
        "outreach.toml",
        "[provider]\napi_key = \"k\"\nbase_url = \"\"\n\n[batch]\npool_width = 0\n\n[retry]\ntimeout_secs = 0\n",
    );

    let errors = ConfigLoader::load_from_file(&file)
        .unwrap()
        .validate()
        .unwrap_err();
    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(rendered.len(), 3, "{:?}", rendered);
    assert!(rendered.iter().any(|e| e.starts_with("provider:")));
    assert!(rendered.iter().any(|e| e.starts_with("batch:")));
    assert!(rendered.iter().any(|e| e.starts_with("retry:")));
}

#[test]
fn test_run_context_uses_explicit_config_file() {
    let _guard = env_lock();
    let ws = TestWorkspace::new();
    let file = ws.write("custom.toml", "[batch]\nchunk_size = 3\n");

    let ctx = RunContext::new(ws.path(), Some(file)).unwrap();
    assert_eq!(ctx.config().batch.chunk_size, 3);
}

#[test]
fn test_run_context_rejects_missing_config_file() {
    let ws = TestWorkspace::new();
    assert!(RunContext::new(ws.path(), Some(ws.path().join("missing.toml"))).is_err());
}
