//! Integration tests for the `validate` and `init` commands.
//!
//! `validate` runs the whole pipeline but must never write generated code, so
//! these tests only look at what is reported.

use camino::Utf8PathBuf;
use pinggen_lib::Host;
use std::fs;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

#[test]
fn test_validate_console_summary() {
    let mut host = TestHost::new();
    pinggen_lib::run(
        &mut host,
        [
            "pinggen",
            "validate",
            "--color",
            "never",
            "tests/fixtures/typed_pings_metrics.yaml",
            "tests/fixtures/typed_pings.yaml",
        ],
    )
    .expect("validate should succeed");

    insta::assert_snapshot!(host.output_str(), @r"
    Target go: ready to generate server_events.go

    profile
      string : user.locale

    activity
      quantity : user.logins

    lifecycle
      event : user.signed_up
    ");
    assert_eq!(host.exit_code, None);
    assert_eq!(host.error_str(), "");
}

#[test]
fn test_validate_reports_abort() {
    let mut host = TestHost::new();
    pinggen_lib::run(
        &mut host,
        ["pinggen", "validate", "--color", "never", "tests/fixtures/events_custom_ping.yaml"],
    )
    .expect("an aborted plan is not an error");

    assert!(
        host.output_str()
            .starts_with("Target go: nothing to generate: event metrics require a destination ping")
    );
    assert!(host.error_str().contains("❌ event metrics require a destination ping"));
    assert_eq!(host.exit_code, Some(1));
}

#[test]
fn test_validate_json_summary() {
    let mut host = TestHost::new();
    pinggen_lib::run(
        &mut host,
        [
            "pinggen",
            "validate",
            "--json",
            "--target",
            "javascript",
            "tests/fixtures/unsupported_and_string.yaml",
            "tests/fixtures/server_pings.yaml",
        ],
    )
    .expect("validate should succeed");

    let summary: serde_json::Value = serde_json::from_str(&host.output_str()).expect("valid JSON");
    assert_eq!(summary["target"], "javascript");
    assert_eq!(summary["generated_file"], "server_events.js");
    assert_eq!(summary["pings"][0]["name"], "metrics");
    assert_eq!(summary["pings"][0]["metrics"][0]["metrics"][0], "user.locale");
    assert_eq!(summary["diagnostics"][0]["severity"], "warning");
    assert_eq!(summary["diagnostics"][0]["subject"], "user.active");
}

#[test]
fn test_validate_bad_definitions() {
    let mut host = TestHost::new();
    let result = pinggen_lib::run(&mut host, ["pinggen", "validate", "tests/fixtures/invalid_type.yaml"]);

    assert!(result.is_err());
    assert!(host.error_str().starts_with("❌ Validation failed:"));
    assert_eq!(host.exit_code, Some(1));
}

#[test]
fn test_init_writes_loadable_config() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Utf8PathBuf::from_path_buf(dir.path().join("pinggen.toml")).expect("temp dir should be UTF-8");

    let mut host = TestHost::new();
    pinggen_lib::run(&mut host, ["pinggen", "init", config.as_str()]).expect("init should succeed");
    assert!(host.output_str().contains("Generated default configuration file"));

    let text = fs::read_to_string(&config).expect("config written");
    assert!(text.contains("target = \"go\""));

    // the written file is accepted by the other commands
    let mut host = TestHost::new();
    pinggen_lib::run(
        &mut host,
        [
            "pinggen",
            "validate",
            "--config",
            config.as_str(),
            "tests/fixtures/events_default_ping.yaml",
        ],
    )
    .expect("validate with the default config should succeed");
    assert_eq!(host.exit_code, None);
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Utf8PathBuf::from_path_buf(dir.path().join("pinggen.toml")).expect("temp dir should be UTF-8");
    fs::write(&config, "go_package = \"not-an-identifier\"\n").expect("write config");

    let mut host = TestHost::new();
    let result = pinggen_lib::run(
        &mut host,
        ["pinggen", "validate", "--config", config.as_str(), "tests/fixtures/events_default_ping.yaml"],
    );

    let error = result.expect_err("invalid config should fail").to_string();
    assert!(error.contains("go_package"), "{error}");
}
