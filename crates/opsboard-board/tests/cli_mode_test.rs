use std::process::{Command, Output};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn run_opsboard(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_opsboard");
    Command::new(binary_path)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("OPSBOARD__API__BASE_URL")
        .output()
        .expect("Failed to start opsboard binary")
}

#[test]
fn dry_run_with_valid_config_exits_cleanly() {
    let config_path = fixture("board.yaml");
    let output = run_opsboard(&["--config", &config_path, "--dry-run"]);

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn check_prints_configuration_summary() {
    let config_path = fixture("board.yaml");
    let output = run_opsboard(&["--config", &config_path, "check"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("api.base_url: http://127.0.0.1:8000"), "{stdout}");
    assert!(stdout.contains("board.project_id: ops-platform"), "{stdout}");
}

#[test]
fn dry_run_rejects_invalid_scheme() {
    let config_path = fixture("invalid_scheme.yaml");
    let output = run_opsboard(&["--config", &config_path, "--dry-run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("http or https"), "{stderr}");
}

#[test]
fn missing_config_file_fails() {
    let config_path = fixture("does_not_exist.yaml");
    let output = run_opsboard(&["--config", &config_path, "--dry-run"]);

    assert!(!output.status.success());
}
