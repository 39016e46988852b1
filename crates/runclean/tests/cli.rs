use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runclean"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute runclean");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Run dialog history"));
    assert!(stdout.contains("list"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runclean"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute runclean");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("runclean"));
}

#[test]
fn list_subcommand_runs() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runclean"));
    cmd.arg("list");

    // Act
    let output = cmd.output().expect("failed to execute runclean");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("found"));
    assert!(!stdout.contains("MRUList"));
}

#[test]
fn list_json_is_an_array() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runclean"));
    cmd.args(["list", "--json"]);

    // Act
    let output = cmd.output().expect("failed to execute runclean");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    assert!(parsed.is_array());
}

#[test]
fn unknown_subcommand_fails() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runclean"));
    cmd.arg("frobnicate");

    // Act
    let output = cmd.output().expect("failed to execute runclean");

    // Assert
    assert!(!output.status.success());
}
