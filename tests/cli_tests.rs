//! CLI integration tests

use std::process::Command;

fn clipstack_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clipstack"))
}

#[test]
fn help_output() {
    let output = clipstack_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("history"));
    assert!(stdout.contains("--history-depth"));
    assert!(stdout.contains("--exclude"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("ctl"));
}

#[test]
fn version_output() {
    let output = clipstack_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipstack"));
}

#[test]
fn config_path_command() {
    let output = clipstack_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipstack"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = clipstack_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn ctl_help() {
    let output = clipstack_bin()
        .args(["ctl", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("toggle"));
    assert!(stdout.contains("select"));
    assert!(stdout.contains("rebind-begin"));
}

#[test]
fn config_set_rejects_out_of_range_depth() {
    let output = clipstack_bin()
        .args(["config", "set", "history_depth", "500"])
        .output()
        .expect("Failed to execute command");

    // Validation fails before anything is written
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("between 1 and 100"),
        "Expected range error, got: {}",
        stderr
    );
}

#[test]
fn config_set_rejects_unknown_key() {
    let output = clipstack_bin()
        .args(["config", "set", "bogus_key", "1"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown key"),
        "Expected unknown-key error, got: {}",
        stderr
    );
}

#[test]
fn config_set_rejects_modifierless_mask() {
    let output = clipstack_bin()
        .args(["config", "set", "hotkey_modifiers", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn ctl_fails_cleanly_without_an_agent() {
    let runtime_dir = tempfile::tempdir().expect("tempdir");
    let output = clipstack_bin()
        .env("XDG_RUNTIME_DIR", runtime_dir.path())
        .args(["ctl", "status"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No agent running"),
        "Expected no-agent error, got: {}",
        stderr
    );
}

#[test]
fn invalid_filter_argument_is_rejected_locally() {
    // Filter validity is checked agent-side; an unknown subcommand
    // argument shape is still a local usage error.
    let output = clipstack_bin()
        .args(["ctl", "select", "not-a-number"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

// Note: Running the bare agent is not covered here because it would
// watch the real clipboard until signalled; the event loop is covered
// by the engine tests against mock ports.
