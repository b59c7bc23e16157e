#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tapfeed::models::CheckInRecord;

pub fn tf() -> Command {
    cargo_bin_cmd!("tapfeed")
}

/// Create a unique config path inside the system temp dir and remove any existing file
pub fn setup_test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tapfeed.conf", name));
    let cfg_path = path.to_string_lossy().to_string();
    fs::remove_file(&cfg_path).ok();
    cfg_path
}

/// Write `content` to a temp file with the given extension and return its path
pub fn temp_seed(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_seed.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write seed file");
    p
}

/// Four plain records with ids 1..=4 and names A..D
pub fn abcd() -> Vec<CheckInRecord> {
    ["A", "B", "C", "D"]
        .iter()
        .zip(1u32..)
        .map(|(name, id)| CheckInRecord::new(id, *name, format!("30000000{id}"), "09:55 AM", "11:20 AM"))
        .collect()
}

/// Six records P1..P6
pub fn six() -> Vec<CheckInRecord> {
    (1u32..=6)
        .map(|id| CheckInRecord::new(id, format!("P{id}"), format!("3000000{id:02}"), "09:55 AM", "11:20 AM"))
        .collect()
}

pub fn ids(records: &[Arc<CheckInRecord>]) -> Vec<u32> {
    records.iter().map(|r| r.id).collect()
}
