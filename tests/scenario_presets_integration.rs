use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

#[derive(Debug)]
struct Report {
    final_soc: f64,
    soc_error_pct: f64,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_outcomes() {
    let baseline = run_and_parse_report(&["--scenario", "scenarios/baseline.toml"]);
    let nearly_full = run_and_parse_report(&["--scenario", "scenarios/nearly_full.toml"]);
    let volatile = run_and_parse_report(&["--scenario", "scenarios/volatile.toml"]);

    assert!(baseline.final_soc >= 0.5);
    assert!(nearly_full.final_soc >= 0.9);
    assert!(volatile.final_soc >= 0.2);

    assert!(
        (baseline.final_soc - volatile.final_soc).abs() > 1e-6,
        "expected baseline and volatile to differ: baseline={:.4}, volatile={:.4}",
        baseline.final_soc,
        volatile.final_soc
    );

    for report in [&baseline, &nearly_full, &volatile] {
        let expected = 100.0 * (1.0 - report.final_soc);
        assert!(
            (report.soc_error_pct - expected).abs() < 0.01,
            "SoC error inconsistent with final SoC: {report:?}"
        );
    }
}

#[test]
fn presets_match_scenario_files() {
    for name in ["baseline", "nearly_full", "volatile"] {
        let from_preset = run_quiet(&["--preset", name]);
        let from_file = run_quiet(&["--scenario", &format!("scenarios/{name}.toml")]);
        assert_eq!(from_preset, from_file, "preset {name} differs from its TOML file");
    }
}

#[test]
fn plan_controller_never_overrides() {
    let stdout = run_quiet(&["--controller", "plan"]);
    assert!(
        stdout.contains("0 spike skips, 0 dip charges"),
        "unexpected report: {stdout}"
    );
}

#[test]
fn price_csv_and_telemetry_export_round_trip() {
    let dir = scratch_dir("prices_csv");
    let prices = dir.join("prices.csv");
    let telemetry = dir.join("telemetry.csv");
    fs::write(
        &prices,
        "interval,forecast_price,realized_price\n0,3.0,3.0\n1,1.0,1.0\n2,4.0,4.0\n3,2.0,2.0\n",
    )
    .expect("write prices");

    let output = run(&[
        "--prices",
        path_str(&prices),
        "--intervals",
        "4",
        "--telemetry-out",
        path_str(&telemetry),
    ]);
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let csv = fs::read_to_string(&telemetry).expect("telemetry written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("interval,time_hr,forecast_price,realized_price,planned"));
    // TN clamps to the 4-interval horizon
    assert!(lines[1..].iter().all(|l| l.contains(",true,")));
}

#[test]
fn price_csv_length_mismatch_fails() {
    let dir = scratch_dir("short_csv");
    let prices = dir.join("prices.csv");
    fs::write(&prices, "forecast_price,realized_price\n1.0,1.0\n2.0,2.0\n").expect("write prices");

    let output = run(&["--prices", path_str(&prices)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected 132"), "stderr={stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "nonexistent"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn invalid_override_fails_validation() {
    let output = run(&["--initial-soc", "1.5"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("vehicle.initial_soc"));
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ev-charge-sim"))
        .args(args)
        .output()
        .expect("ev-charge-sim process should run")
}

fn run_quiet(args: &[&str]) -> String {
    let mut all = vec!["--quiet"];
    all.extend_from_slice(args);
    let output = run(&all);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn run_and_parse_report(args: &[&str]) -> Report {
    let stdout = run_quiet(args);
    Report {
        final_soc: parse_metric(&stdout, "Final SoC:", ""),
        soc_error_pct: parse_metric(&stdout, "SoC error:", "%"),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"));

    raw.trim_end_matches(unit)
        .trim()
        .parse::<f64>()
        .unwrap_or_else(|e| panic!("failed to parse `{raw}` as f64: {e}"))
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ev-charge-sim-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}
