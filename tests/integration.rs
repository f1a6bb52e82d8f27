// Integration tests for the conspira CLI.
//
// Offline commands only; snapshot behaviour lives in snapshot_cli.rs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Builds a Command with an isolated HOME so no global config leaks in.
fn conspira(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("conspira").expect("binary should exist");
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_version_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("conspira"));
}

#[test]
fn cli_help_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Astral Intelligence Index"));
}

#[test]
fn score_full_moon_near_perigee() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .args(["--root"])
        .arg(home.path())
        .args([
            "score",
            "--phase",
            "FULL_MOON",
            "--illumination",
            "80",
            "--distance",
            "360000",
            "--format",
            "json",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"score\": 77"))
        .stdout(predicate::str::contains("\"band\": \"high\""))
        .stdout(predicate::str::contains("\"source\": \"manual\""));
}

#[test]
fn score_with_empty_observation_is_base_only() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args(["score", "--format", "text"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("AII 10/100  [Low-charge]"));
}

#[test]
fn score_tolerates_textual_numbers() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args([
            "score",
            "--phase",
            "Waxing Gibbous",
            "--illumination",
            "60,0%",
            "--distance",
            "not-a-number",
            "-f",
            "text",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("AII 45/100  [Charged]"))
        .stdout(predicate::str::contains("Waxing Gibbous | 60.0% | –"));
}

#[test]
fn preset_flag_switches_formula() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args([
            "--preset",
            "classic",
            "score",
            "--phase",
            "FULL_MOON",
            "--illumination",
            "80",
            "--distance",
            "360000",
            "-f",
            "text",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("AII 70/100  [High alert]"));
}

#[test]
fn unknown_preset_is_a_runtime_failure() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args(["--preset", "tarot", "bands"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown scoring preset"));
}

#[test]
fn forecast_starts_with_today_unmodified() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args(["forecast", "--score", "50", "--start", "2026-10-18"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Today     Sun Oct 18  50  Charged"))
        .stdout(predicate::str::contains("Tomorrow  Mon Oct 19  54  Charged"));
}

#[test]
fn forecast_rejects_score_above_index_range() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args(["forecast", "--score", "150", "--days", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Today").not())
        .stderr(predicate::str::contains("150"));
}

#[test]
fn forecast_rejects_bad_start_date() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args(["forecast", "--score", "50", "--start", "18/10/2026"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn forecast_rejects_zero_days() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .args(["forecast", "--score", "50", "--days", "0"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--days must be between 1 and 31"));
}

#[test]
fn bands_follow_repo_config_thresholds() {
    let home = TempDir::new().expect("temp dir should be created");
    let root = TempDir::new().expect("root temp dir should be created");
    fs::write(
        root.path().join("conspira.toml"),
        r#"
[scoring]
preset = "lumen"

[scoring.thresholds]
high = 80
"#,
    )
    .expect("repo config should write");

    conspira(&home)
        .arg("--root")
        .arg(root.path())
        .arg("bands")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("profile: lumen"))
        .stdout(predicate::str::contains("Charged      40-79"))
        .stdout(predicate::str::contains("High alert   80-100"));
}

#[test]
fn invalid_repo_config_is_a_runtime_failure() {
    let home = TempDir::new().expect("temp dir should be created");
    let root = TempDir::new().expect("root temp dir should be created");
    fs::write(
        root.path().join("conspira.toml"),
        "[scoring]\nillumination_weight = -1.0\n",
    )
    .expect("repo config should write");

    conspira(&home)
        .arg("--root")
        .arg(root.path())
        .arg("bands")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("illumination_weight"));
}

#[test]
fn presets_marks_active_profile() {
    let home = TempDir::new().expect("temp dir should be created");
    conspira(&home)
        .arg("--root")
        .arg(home.path())
        .arg("presets")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("* conspira"))
        .stdout(predicate::str::contains("  classic"));
}
