//! Integration tests for xss-defender-config

use std::env;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use xss_defender_config::*;
use xss_defender_core::{DefenseStrategy, RouteInfo, XssConfig};

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = temp_file(
        ".toml",
        r#"
        [xss-defender]
        strategy = "throw"
        enabled = true
        "#,
    );

    let properties = DefenderProperties::builder()
        .add_file(file.path().to_str().unwrap())
        .build()
        .unwrap();

    assert_eq!(properties.strategy, "throw");
    assert_eq!(properties.defense_config().unwrap().strategy, DefenseStrategy::Throw);
}

#[test]
fn test_later_files_win() {
    let base = temp_file(".json", r#"{"xss-defender": {"strategy": "escape", "escape-after-trim": true}}"#);
    let overlay = temp_file(".json", r#"{"strategy": "trim"}"#);

    let properties = DefenderProperties::builder()
        .add_file(base.path().to_str().unwrap())
        .add_file(overlay.path().to_str().unwrap())
        .build()
        .unwrap();

    assert_eq!(properties.strategy, "trim");
    assert!(properties.escape_after_trim);
}

#[test]
fn test_explicit_format() {
    let file = temp_file(".conf", "XSS_DEFENDER_STRATEGY=escape\n");

    let properties = DefenderProperties::builder()
        .add_file_with_format(file.path().to_str().unwrap(), FileFormat::Env)
        .build()
        .unwrap();

    assert_eq!(properties.strategy, "escape");
}

#[test]
fn test_unsupported_strategy_fails_build() {
    let file = temp_file(".toml", "strategy = \"ignore\"\n");

    let err = DefenderProperties::builder()
        .add_file(file.path().to_str().unwrap())
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::Defense(_)));
    assert!(err.to_string().contains("ignore"));
}

// std::env::set_var is not thread-safe, so variables are only ever set on a
// child test process started with its own environment.
const CHILD_MARKER: &str = "XSS_DEFENDER_TEST_CHILD";

fn run_in_child(test_name: &str, vars: &[(&str, &str)]) {
    let output = Command::new(env::current_exe().unwrap())
        .args([test_name, "--exact", "--ignored", "--test-threads=1"])
        .env(CHILD_MARKER, "1")
        .envs(vars.iter().copied())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}\n{}", stdout, String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("1 passed"), "{}", stdout);
}

fn in_child() -> bool {
    env::var_os(CHILD_MARKER).is_some()
}

#[test]
fn test_environment_overrides_file() {
    run_in_child(
        "child_environment_overrides_file",
        &[
            ("XSS_ENV_OVERRIDE_TEST_STRATEGY", "throw"),
            ("XSS_ENV_OVERRIDE_TEST_ENABLED", "off"),
        ],
    );
}

#[test]
#[ignore = "started by test_environment_overrides_file"]
fn child_environment_overrides_file() {
    if !in_child() {
        return;
    }
    let file = temp_file(".toml", "strategy = \"escape\"\n");

    let properties = DefenderProperties::builder()
        .with_prefix("XSS_ENV_OVERRIDE_TEST")
        .add_file(file.path().to_str().unwrap())
        .load_env()
        .build()
        .unwrap();

    assert_eq!(properties.strategy, "throw");
    assert!(!properties.enabled);
}

#[test]
fn test_env_loader_with_prefix() {
    run_in_child(
        "child_env_loader_with_prefix",
        &[("XSS_LOADER_PREFIX_TEST_ESCAPE_AFTER_TRIM", "true")],
    );
}

#[test]
#[ignore = "started by test_env_loader_with_prefix"]
fn child_env_loader_with_prefix() {
    if !in_child() {
        return;
    }
    let loader = EnvLoader::new("XSS_LOADER_PREFIX_TEST");

    assert_eq!(loader.load_var("escape-after-trim").unwrap(), "true");
    assert_eq!(
        loader.load().unwrap().get("escape-after-trim").map(String::as_str),
        Some("true")
    );
}

#[test]
fn test_env_file_content_without_process_env() {
    let loader = ConfigLoader::new(FileFormat::Env);
    let table = loader
        .parse("XSS_DEFENDER_STRATEGY=throw\nXSS_DEFENDER_ESCAPE_AFTER_TRIM=true\n")
        .unwrap();

    let mut properties = DefenderProperties::default();
    for (key, value) in &table {
        properties.apply(key, value).unwrap();
    }

    assert_eq!(properties.strategy, "throw");
    assert!(properties.escape_after_trim);
}

#[test]
fn test_disabled_properties_build_passthrough_middleware() {
    let file = temp_file(".json", r#"{"enabled": false, "strategy": "throw"}"#);

    let properties = DefenderProperties::builder()
        .add_file(file.path().to_str().unwrap())
        .build()
        .unwrap();
    let middleware = properties.build_middleware(XssConfig::default()).unwrap();
    let scope = middleware.scope(&RouteInfo::new("/any").with_handler("h"));

    assert!(!scope.is_enabled());
    assert_eq!(scope.defend(Some(" <script>x</script> ")).unwrap(), "<script>x</script>");
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::invalid_value("enabled", "maybe");
    let display = format!("{}", err);
    assert!(display.contains("enabled"));
    assert!(display.contains("maybe"));
}
