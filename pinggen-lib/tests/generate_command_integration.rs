//! Integration tests for the `generate` command.
//!
//! Each test drives `pinggen_lib::run` end to end with definition files from
//! `tests/fixtures` and a temporary output directory, then checks which files
//! were written and what was reported.

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

fn fixture(name: &str) -> String {
    format!("tests/fixtures/{name}")
}

fn output_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("out")).expect("temp dir should be UTF-8");
    (dir, path)
}

fn generate(host: &mut TestHost, inputs: &[&str], output: &Utf8PathBuf, extra: &[&str]) {
    let mut args = vec!["pinggen".to_string(), "generate".to_string(), "--color".to_string(), "never".to_string()];
    args.extend(inputs.iter().map(|name| fixture(name)));
    args.extend(["--output-dir".to_string(), output.to_string()]);
    args.extend(extra.iter().map(ToString::to_string));

    pinggen_lib::run(host, args).expect("generate should not fail");
}

fn generated_files(output: &Utf8PathBuf) -> Vec<String> {
    if !output.exists() {
        return Vec::new();
    }

    let mut names: Vec<String> = fs::read_dir(output)
        .expect("output dir should be readable")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_generate_go_server_events() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["server_metrics.yaml", "server_pings.yaml"], &output, &[]);

    assert_eq!(generated_files(&output), ["server_events.go"]);
    assert!(host.output_str().contains("server_events.go"));
    assert_eq!(host.exit_code, None);

    let errors = host.error_str();
    assert!(errors.contains("⚠️"));
    assert!(errors.contains("'backend.signed_in'"));
    assert!(errors.contains("'boolean'"));

    let source = fs::read_to_string(output.join("server_events.go")).expect("generated file");
    assert!(source.starts_with("// Code generated by pinggen v"));
    assert!(source.contains("package glean\n"));
    assert!(source.contains("type EventBackendObjectUpdate struct {"));
    assert!(source.contains("\t\t\"linking\": strconv.FormatInt(e.Linking, 10),"));
    assert!(source.contains("func (g GleanEventsLogger) RecordPingAccountsEvents("));
    assert!(source.contains("func (g GleanEventsLogger) RecordPingEvents("));
    assert!(source.contains("\t\t\t\"backend.request_count\": params.BackendRequestCount,"));
    assert!(!source.contains("signed_in"));
    assert!(!source.contains("SignedIn"));
}

#[test]
fn test_generate_is_deterministic() {
    let (_first_dir, first) = output_dir();
    let (_second_dir, second) = output_dir();

    generate(&mut TestHost::new(), &["server_metrics.yaml", "server_pings.yaml"], &first, &[]);
    generate(&mut TestHost::new(), &["server_metrics.yaml", "server_pings.yaml"], &second, &[]);

    let first_source = fs::read(first.join("server_events.go")).expect("first output");
    let second_source = fs::read(second.join("server_events.go")).expect("second output");
    assert_eq!(first_source, second_source);
}

#[test]
fn test_output_ignores_file_order() {
    let (_first_dir, first) = output_dir();
    let (_second_dir, second) = output_dir();

    generate(&mut TestHost::new(), &["server_metrics.yaml", "search_metrics.yaml", "server_pings.yaml"], &first, &[]);
    generate(&mut TestHost::new(), &["server_pings.yaml", "search_metrics.yaml", "server_metrics.yaml"], &second, &[]);

    let first_source = fs::read_to_string(first.join("server_events.go")).expect("first output");
    let second_source = fs::read_to_string(second.join("server_events.go")).expect("second output");
    assert_eq!(first_source, second_source);

    // within each type bucket, fields follow category then name
    let request_count = first_source.find("\tBackendRequestCount ").expect("request count field");
    let result_count = first_source.find("\tSearchResultCount ").expect("result count field");
    assert!(request_count < result_count);
    let account_id = first_source.find("\tIdentifiersFxaAccountId ").expect("account id field");
    let engine = first_source.find("\tSearchEngine ").expect("engine field");
    assert!(account_id < engine);
}

#[test]
fn test_output_ignores_key_order() {
    let (_first_dir, first) = output_dir();
    let (_second_dir, second) = output_dir();

    generate(&mut TestHost::new(), &["server_metrics.yaml", "server_pings.yaml"], &first, &[]);
    generate(&mut TestHost::new(), &["server_metrics_reordered.yaml", "server_pings.yaml"], &second, &[]);

    let first_source = fs::read(first.join("server_events.go")).expect("first output");
    let second_source = fs::read(second.join("server_events.go")).expect("second output");
    assert_eq!(first_source, second_source);
}

#[test]
fn test_pings_without_metrics_generate_nothing() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["server_pings.yaml"], &output, &[]);

    assert!(generated_files(&output).is_empty());
    assert!(host.error_str().contains("❌ no pings with metrics found"));
    assert_eq!(host.exit_code, None);
}

#[test]
fn test_event_without_destination_generates_nothing() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["events_custom_ping.yaml"], &output, &[]);

    assert!(generated_files(&output).is_empty());
    assert!(
        host.error_str()
            .contains("❌ event metrics require a destination ping; define one or use the default")
    );
}

#[test]
fn test_metrics_without_pings_or_events_generate_nothing() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["metrics_no_events_no_pings.yaml"], &output, &[]);

    assert!(generated_files(&output).is_empty());
    assert!(host.error_str().contains("❌ no ping definition found"));
}

#[test]
fn test_events_in_default_ping_generate_without_ping_definitions() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["events_default_ping.yaml"], &output, &[]);

    assert_eq!(generated_files(&output), ["server_events.go"]);
    let source = fs::read_to_string(output.join("server_events.go")).expect("generated file");
    assert!(source.contains("type PingEvents struct {"));
    assert!(source.contains("func (e EventPageView) isPingEventsEvent() {}"));
}

#[test]
fn test_unsupported_metric_is_left_out() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["unsupported_and_string.yaml", "server_pings.yaml"], &output, &[]);

    assert_eq!(generated_files(&output), ["server_events.go"]);
    let source = fs::read_to_string(output.join("server_events.go")).expect("generated file");
    assert!(source.contains("\t\t\t\"user.locale\": params.UserLocale,"));
    assert!(!source.contains("user.active"));

    let errors = host.error_str();
    assert!(errors.contains("'user.active'"));
    assert!(errors.contains("'boolean'"));
}

#[test]
fn test_one_ping_per_metric_type() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["typed_pings_metrics.yaml", "typed_pings.yaml"], &output, &[]);

    assert_eq!(generated_files(&output), ["server_events.go"]);
    assert_eq!(host.error_str(), "");

    let source = fs::read_to_string(output.join("server_events.go")).expect("generated file");
    assert!(source.contains("type PingProfile struct {\n\tUserLocale string // Locale of the user.\n}"));
    assert!(source.contains("type PingActivity struct {\n\tUserLogins int64 // Number of logins.\n}"));
    assert!(source.contains("type PingLifecycle struct {\n\tEvent PingLifecycleEvent // valid event for this ping\n}"));
}

#[test]
fn test_rejected_extra_type_generates_nothing() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["boolean_extra.yaml"], &output, &[]);

    assert!(generated_files(&output).is_empty());
    let errors = host.error_str();
    assert!(errors.contains("❌ Extra key 'success' of event 'login.attempt' has type 'boolean'"));
}

#[test]
fn test_colliding_names_generate_nothing() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["colliding_names.yaml"], &output, &[]);

    assert!(generated_files(&output).is_empty());
    let errors = host.error_str();
    assert!(errors.contains("❌ Metric 'a_b.c' and metric 'a.b_c' both translate to the go name 'ABC'"));
    assert!(errors.contains("❌ metric definitions cannot be translated for the target"));
}

#[test]
fn test_javascript_target() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["server_metrics.yaml", "server_pings.yaml"], &output, &["--target", "javascript"]);

    assert_eq!(generated_files(&output), ["server_events.js"]);
    let source = fs::read_to_string(output.join("server_events.js")).expect("generated file");
    assert!(source.contains("class AccountsEventsServerEvent {"));
    assert!(source.contains("'identifiers.fxa_account_id': identifiers_fxa_account_id,"));

    // only strings are emitted for JavaScript
    let errors = host.error_str();
    assert!(errors.contains("'backend.object_update'"));
    assert!(errors.contains("'backend.request_count'"));
}

#[test]
fn test_error_if_not_generated() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    generate(&mut host, &["server_pings.yaml"], &output, &["--error-if-not-generated"]);

    assert_eq!(host.exit_code, Some(1));
}

#[test]
fn test_config_file_sets_target_and_package() {
    let (dir, output) = output_dir();
    let config = dir.path().join("pinggen.toml");
    fs::write(&config, "go_package = \"telemetry\"\nmozlog_type = \"accounts-server-event\"\n").expect("write config");

    let mut host = TestHost::new();
    generate(
        &mut host,
        &["server_metrics.yaml", "server_pings.yaml"],
        &output,
        &["--config", config.to_str().expect("UTF-8 path")],
    );

    let source = fs::read_to_string(output.join("server_events.go")).expect("generated file");
    assert!(source.contains("package telemetry\n"));
    assert!(source.contains("var gleanEventMozlogType string = \"accounts-server-event\""));
}

#[test]
fn test_invalid_definitions_are_hard_errors() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    let result = pinggen_lib::run(
        &mut host,
        ["pinggen", "generate", "tests/fixtures/invalid_type.yaml", "--output-dir", output.as_str()],
    );

    let error = result.expect_err("unknown metric type should fail").to_string();
    assert!(error.contains("feeling"), "{error}");
    assert!(generated_files(&output).is_empty());
}

#[test]
fn test_missing_input_is_a_hard_error() {
    let (_dir, output) = output_dir();
    let mut host = TestHost::new();

    let result = pinggen_lib::run(
        &mut host,
        ["pinggen", "generate", "tests/fixtures/does_not_exist.yaml", "--output-dir", output.as_str()],
    );

    assert!(result.is_err());
}
