use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "rtl-fixer-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_rtl-fixer-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("mode-cycle"));
}

#[test]
fn cli_runs_catalog_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_rtl-fixer-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args(["--report", "json", "--scenarios", "all", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RTL Fixer Scenario Tester"));

    let content = std::fs::read_to_string(output_path).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let entries = report.as_array().expect("array report");
    assert_eq!(entries.len(), 9);
    assert!(entries.iter().all(|entry| entry["passed"] == true));
}

#[test]
fn cli_rejects_invalid_config_file() {
    let exe = env!("CARGO_BIN_EXE_rtl-fixer-tester");
    let config_path = temp_path("config.json");
    std::fs::write(&config_path, r#"{ "content_selectors": [] }"#).expect("write config");
    let output = Command::new(exe)
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid fixer config"));
}

#[test]
fn cli_unknown_scenario_is_not_fatal() {
    let exe = env!("CARGO_BIN_EXE_rtl-fixer-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "does-not-exist", "--report", "markdown"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown scenario"));
}
