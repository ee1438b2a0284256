//! Shared helpers for the integration suite.

use chrono::{DateTime, TimeZone, Utc};
use rcos_monitor::roster::{ProjectRecord, parse_roster};
use std::path::PathBuf;
use tempfile::TempDir;

/// Reference time used by passes that pin `now`.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

/// Roster whose passes never touch the network.
pub const OFFLINE_ROSTER: &str = r#"
- Project Name: Lighthouse
  Website: https://lighthouse.example.org
  Contributors: Alan Turing, Grace Hopper
  Source Code: git://lighthouse.example.org/lighthouse.git
  Wiki: https://lighthouse.example.org/wiki
  Repo:
    Type: git
    URL: git://lighthouse.example.org/lighthouse.git

- Project Name: Dormant
  Contributors: Grace Hopper
"#;

/// Parse a roster literal.
pub fn roster(yaml: &str) -> Vec<ProjectRecord> {
    parse_roster(yaml, "test roster").unwrap()
}

/// Write `yaml` to `projects.yml` in a fresh temp dir.
pub fn roster_file(yaml: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("projects.yml");
    std::fs::write(&path, yaml).unwrap();
    (temp, path)
}
