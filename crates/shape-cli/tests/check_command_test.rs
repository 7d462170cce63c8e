use std::path::Path;
use std::process::{Command, Output};

fn run_check(schema: &str) -> Output {
    let schemas = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata/schemas");
    Command::new(env!("CARGO_BIN_EXE_shape"))
        .args(["check", schema, "--schema-path", schemas.to_string_lossy().as_ref()])
        .env_remove("RUST_LOG")
        .output()
        .expect("shape check should execute")
}

fn assert_exit_code(output: &Output, expected: i32) {
    let actual = output.status.code().unwrap_or(-1);
    assert_eq!(
        actual,
        expected,
        "unexpected exit code; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn check_summarizes_valid_schema() {
    let output = run_check("user");

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Schema 'user' OK"));
    assert!(stdout.contains("7 top-level fields"));
}

#[test]
fn check_accepts_schema_file_path() {
    let schema = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata/schemas/json_api.yaml");
    let output = run_check(schema.to_string_lossy().as_ref());

    assert_exit_code(&output, 0);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Schema 'json_api' OK"));
}

#[test]
fn check_reports_configuration_error() {
    let output = run_check("broken");

    assert_exit_code(&output, 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Schema 'broken' is misconfigured"));
    assert!(stderr.contains("attributes/<string>"));
}

#[test]
fn check_reports_unknown_schema() {
    let output = run_check("no_such_schema");

    assert_exit_code(&output, 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load schema"));
}
