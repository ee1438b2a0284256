//! The `rcos-monitor` binary on rosters that need no network access.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::{OFFLINE_ROSTER, roster_file};

fn monitor() -> Command {
    let mut cmd = Command::cargo_bin("rcos-monitor").unwrap();
    cmd.env_remove("RCOS_MONITOR_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_key_prints_legend() {
    monitor()
        .arg("key")
        .assert()
        .success()
        .stdout(predicate::str::contains("#00ff00"))
        .stdout(predicate::str::contains("#ffff00"))
        .stdout(predicate::str::contains("#ff5000"));
}

#[test]
fn test_rank_text() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);

    monitor()
        .arg("--roster")
        .arg(&path)
        .arg("rank")
        .assert()
        .success()
        .stdout(predicate::str::contains("1100.00"))
        .stdout(predicate::str::contains("3000.00"))
        .stdout(predicate::str::contains("Lighthouse"));
}

#[test]
fn test_rank_json() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);

    let output = monitor().arg("--roster").arg(&path).args(["rank", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let ranked: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ranked[0]["name"], "Lighthouse");
    assert_eq!(ranked[0]["score"], 1100.0);
    assert_eq!(ranked[1]["name"], "Dormant");
    assert_eq!(ranked[1]["rank"], 2);
}

#[test]
fn test_stats_json() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);

    let output = monitor().arg("--roster").arg(&path).args(["stats", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["num_projects"], 2);
    assert_eq!(stats["none"], 1);
    assert_eq!(stats["all_three"], 0);
    assert_eq!(stats["last_week"], 0);
    assert_eq!(stats["members"], 2);
}

#[test]
fn test_laggards_text() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);

    monitor()
        .arg("--roster")
        .arg(&path)
        .arg("laggards")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dormant"))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn test_render_to_file() {
    let (temp, path) = roster_file(OFFLINE_ROSTER);
    let output = temp.path().join("dashboard.html");

    monitor()
        .arg("--roster")
        .arg(&path)
        .arg("render")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<a href=\"git:&#x2F;&#x2F;lighthouse.example.org&#x2F;lighthouse.git\">git</a> (Unavailable)"));
    assert!(html.contains("background-color:#ff5000;"));
}

#[test]
fn test_roster_from_config_file() {
    let (temp, path) = roster_file(OFFLINE_ROSTER);
    let config = temp.path().join("monitor.toml");
    std::fs::write(&config, format!("roster = {:?}\n", path.display().to_string())).unwrap();

    monitor()
        .arg("--config")
        .arg(&config)
        .arg("rank")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lighthouse"));
}

#[test]
fn test_default_config_in_working_directory() {
    let (temp, _path) = roster_file(OFFLINE_ROSTER);
    std::fs::write(temp.path().join("monitor.toml"), "roster = \"projects.yml\"\n").unwrap();

    monitor()
        .current_dir(temp.path())
        .arg("rank")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dormant"));
}

#[test]
fn test_bogus_repository_type_fails() {
    let (_temp, path) = roster_file(
        "- Project Name: Legacy\n  Source Code: https://svn.example.org/legacy\n  Repo:\n    Type: bogus\n    URL: https://svn.example.org/legacy\n",
    );

    monitor()
        .arg("--roster")
        .arg(&path)
        .arg("rank")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Repository type not supported: bogus"));
}

#[test]
fn test_missing_roster_fails() {
    let temp = TempDir::new().unwrap();

    monitor()
        .current_dir(temp.path())
        .arg("rank")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Roster file not found"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("monitor.toml");
    std::fs::write(&config, "cache_max_age_secs = \"soon\"\n").unwrap();

    monitor()
        .arg("--config")
        .arg(&config)
        .arg("key")
        .assert()
        .success();

    monitor()
        .arg("--config")
        .arg(&config)
        .arg("rank")
        .assert()
        .failure()
        .stderr(predicate::str::contains("monitor.toml"));
}
