// SPDX-License-Identifier: MPL-2.0
use std::process::Command;

#[test]
fn missing_script_reports_usage_once() {
    let output = Command::new(env!("CARGO_BIN_EXE_riceswipe"))
        .env("RUST_LOG", "error")
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "{stderr}");
    assert!(lines[0].contains("usage: riceswipe"), "{stderr}");
    assert!(output.stdout.is_empty());
}
