//! Test fixture loader and builders for sequencer golden scenarios and
//! integration tests.
//!
//! Golden scenarios live under `golden/` as JSON and deserialize into
//! [`GoldenScenario`].

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use sequencer_core::config::SequencerConfig;
use sequencer_core::models::{HistorySnapshot, ProMove, WeekAggregate};

/// Root directory of the test-fixtures crate.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// A self-contained ranking/selection scenario with expected results.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub description: String,
    pub reference_week: NaiveDate,
    #[serde(default)]
    pub config: SequencerConfig,
    pub moves: Vec<ProMove>,
    #[serde(default)]
    pub history: HistorySnapshot,
    pub expected: serde_json::Value,
}

/// Load a golden scenario by file name under `golden/`.
pub fn load_scenario(name: &str) -> GoldenScenario {
    load_fixture(&format!("golden/{name}"))
}

// ── Builders ──────────────────────────────────────────────────────────────

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// An active move for role 1 whose competency id equals its id.
pub fn pro_move(id: i64, domain_id: i64) -> ProMove {
    pro_move_for_role(1, id, domain_id)
}

pub fn pro_move_for_role(role_id: i64, id: i64, domain_id: i64) -> ProMove {
    ProMove {
        id,
        statement: format!("Pro-move {id}"),
        competency_id: id,
        domain_id,
        domain_name: format!("Domain {domain_id}"),
        role_id,
        active: true,
    }
}

/// `count` consecutive weekly aggregates ending the week before `reference`.
pub fn flat_history(reference: NaiveDate, count: i64, avg: f64, n: u32) -> Vec<WeekAggregate> {
    (1..=count)
        .rev()
        .map(|back| WeekAggregate::new(reference - chrono::Duration::days(7 * back), avg, n))
        .collect()
}
