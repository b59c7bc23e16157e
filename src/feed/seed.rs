//! Seed data for the live feed: the built-in demo roster, or a roster read
//! from a YAML / JSON file.

use crate::errors::{AppError, AppResult};
use crate::models::CheckInRecord;
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Six tap-ins for the 10:00 AM - 11:20 AM lecture. One leaves early, one
/// arrives late and has no portrait on file.
pub fn default_seed() -> Vec<CheckInRecord> {
    vec![
        CheckInRecord::new(1, "Christopher King", "300226522", "09:52 AM", "11:20 AM")
            .with_portrait("assets/chrisPhoto.png"),
        CheckInRecord::new(2, "Denzel Shaka", "300185848", "09:55 AM", "11:20 AM")
            .with_portrait("assets/denzelPhoto.png"),
        CheckInRecord::new(3, "Fareis Canoe", "300299663", "09:58 AM", "11:20 AM")
            .with_portrait("assets/farisPhoto.png"),
        CheckInRecord::new(4, "Manan Dayalani", "300256144", "09:50 AM", "10:45 AM")
            .with_portrait("assets/mananPhoto.png"),
        CheckInRecord::new(5, "Eknoor Goraya", "300278785", "09:55 AM", "11:20 AM")
            .with_portrait("assets/eknoorPhoto.png"),
        CheckInRecord::new(6, "Rayane Chemsi", "300324494", "10:15 AM", "11:20 AM"),
    ]
}

/// Read a roster from disk; the format follows the file extension.
pub fn load_seed(path: &str) -> AppResult<Vec<CheckInRecord>> {
    let path = expand_tilde(path);
    let content = fs::read_to_string(&path)?;
    let records = parse_seed(&content, &path)?;
    debug!(path = %path.display(), records = records.len(), "seed loaded");
    Ok(records)
}

pub fn parse_seed(content: &str, path: &Path) -> AppResult<Vec<CheckInRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "yml" | "yaml" => Ok(serde_yaml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(AppError::SeedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}

/// Seed file given on the command line wins over the configured one; with
/// neither, the built-in roster is used.
pub fn resolve_seed(cli_seed: Option<&str>, cfg_seed: Option<&str>) -> AppResult<Vec<CheckInRecord>> {
    match cli_seed.or(cfg_seed) {
        Some(path) => load_seed(path),
        None => Ok(default_seed()),
    }
}
