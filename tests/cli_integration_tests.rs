use std::fs;
use std::process::Command;
use tempfile::TempDir;

const EVENTS_CSV: &str = "\
ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal
1,\"Michael Fred Phelps, II\",M,19,193,91,United States,USA,2004 Summer,2004,Summer,Athina,Swimming,Swimming Men's 200 metres Butterfly,Gold
2,\"Michael Fred Phelps, II\",M,23,193,91,United States,USA,2008 Summer,2008,Summer,Beijing,Swimming,Swimming Men's 100 metres Butterfly,Gold
3,\"Michael Fred Phelps, II\",M,27,193,91,United States,USA,2012 Summer,2012,Summer,London,Swimming,Swimming Men's 200 metres Butterfly,Silver
4,\"Michael Fred Phelps, II\",M,15,193,NA,United States,USA,2000 Summer,2000,Summer,Sydney,Swimming,Swimming Men's 200 metres Butterfly,NA
5,Armin Hary,M,23,182,72,Germany,GER,1960 Summer,1960,Summer,Roma,Athletics,Athletics Men's 100 metres,NA
6,Dimitrios Loundras,M,10,NA,NA,Ethnikos Gymnastikos Syllogos,GRE,1896 Summer,1896,Summer,Athina,Gymnastics,Gymnastics Men's Parallel Bars,Bronze
";

const REGIONS_CSV: &str = "\
NOC,region,notes
USA,USA,
GER,Germany,
GRE,Greece,
";

/// Test helper to run the CLI against a temporary copy of the dataset
fn run_cli_command(args: &[&str]) -> (String, String, i32) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let events = temp_dir.path().join("athlete_events.csv");
    let regions = temp_dir.path().join("noc_regions.csv");
    fs::write(&events, EVENTS_CSV).expect("Failed to write events CSV");
    fs::write(&regions, REGIONS_CSV).expect("Failed to write regions CSV");

    let output = Command::new(env!("CARGO_BIN_EXE_olympics"))
        .arg("--events")
        .arg(&events)
        .arg("--regions")
        .arg(&regions)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Test helper to check if output contains expected text
fn assert_output_contains(output: &str, expected: &str) {
    assert!(
        output.contains(expected),
        "Output did not contain expected text.\nExpected: {}\nActual output:\n{}",
        expected,
        output
    );
}

#[test]
fn test_cli_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_olympics"))
        .arg("--help")
        .output()
        .expect("Failed to execute CLI command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert_output_contains(&stdout, "Descriptive statistics over the historical Olympic Games dataset");
    assert_output_contains(&stdout, "Commands:");
    assert_output_contains(&stdout, "ranking");
    assert_output_contains(&stdout, "never-medaled");
}

#[test]
fn test_cli_version_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_olympics"))
        .arg("--version")
        .output()
        .expect("Failed to execute CLI command");

    assert_eq!(output.status.code(), Some(0));
    assert_output_contains(&String::from_utf8_lossy(&output.stdout), "0.1.0");
}

#[test]
fn test_cli_athlete_defaults_to_configured_name() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["athlete", "--format", "csv"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "medal,count\nGold,2\nSilver,1\nTotal,3\n");
}

#[test]
fn test_cli_nations_command() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["nations", "-f", "csv"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "nations\n3\n");
}

#[test]
fn test_cli_youngest_table() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["youngest"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "Dimitrios Loundras");
    assert_output_contains(&stdout, "1 row");
}

#[test]
fn test_cli_ranking_csv() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["ranking", "--top", "5", "-f", "csv"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(
        &stdout,
        "country,noc,gold,silver,bronze,total\nUnited States,USA,2,1,0,3\nEthnikos Gymnastikos Syllogos,GRE,0,0,1,1\n",
    );
}

#[test]
fn test_cli_ranking_echarts_chart() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["ranking", "--chart", "echarts"]);

    assert_eq!(exit_code, 0);
    let option: serde_json::Value = serde_json::from_str(&stdout).expect("chart is valid JSON");
    assert_eq!(option["series"][0]["name"], "Gold");
    assert_eq!(option["series"][0]["data"][0].as_f64(), Some(2.0));
    assert_eq!(option["series"][2]["data"][1].as_f64(), Some(1.0));
}

#[test]
fn test_cli_zero_bar_chart_fails() {
    let (_stdout, stderr, exit_code) = run_cli_command(&["ranking", "--top", "0", "--chart", "terminal"]);

    assert_eq!(exit_code, 1);
    assert_output_contains(&stderr, "Presentation error");
}

#[test]
fn test_cli_never_medaled_json() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["never-medaled", "-f", "json"]);

    assert_eq!(exit_code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("output is valid JSON");
    assert_eq!(parsed["data"][0]["country"], "Germany");
    assert_eq!(parsed["metadata"]["row_count"], 1);
}

#[test]
fn test_cli_medaled_map() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["medaled", "--medal", "gold", "--map"]);

    assert_eq!(exit_code, 0);
    let figure: serde_json::Value = serde_json::from_str(&stdout).expect("map is valid JSON");
    assert_eq!(figure["data"][0]["locations"], serde_json::json!(["USA"]));
}

#[test]
fn test_cli_medal_gaps() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["medal-gaps", "-f", "csv"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "any,1\ngold,2\nsilver,2\nbronze,2\n");
}

#[test]
fn test_cli_report_markdown() {
    let (stdout, _stderr, exit_code) = run_cli_command(&["report", "--top", "1"]);

    assert_eq!(exit_code, 0);
    assert_output_contains(&stdout, "# Olympic Games Statistics Report");
    assert_output_contains(&stdout, "| 1 | United States | USA | 2 | 1 | 0 | 3 |");
    assert!(!stdout.contains("| 2 | Ethnikos"));
    assert_output_contains(&stdout, "- Germany");
}

#[test]
fn test_cli_missing_events_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_olympics"))
        .args(["--events", "/nonexistent/athlete_events.csv", "nations"])
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute CLI command");

    assert_eq!(output.status.code(), Some(1));
    assert_output_contains(&String::from_utf8_lossy(&output.stderr), "File not found");
}

#[test]
fn test_cli_invalid_subcommand() {
    let (_stdout, stderr, exit_code) = run_cli_command(&["medals-per-planet"]);

    assert_ne!(exit_code, 0);
    assert_output_contains(&stderr, "unrecognized subcommand");
}
