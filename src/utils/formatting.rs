//! Formatting utilities used for CLI outputs.

use crate::models::CheckInRecord;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// What to show in the portrait slot: the image reference, or the initials
/// in brackets when none is on file.
pub fn portrait_label(record: &CheckInRecord) -> String {
    match record.portrait.as_deref() {
        Some(p) if record.has_portrait() => p.to_string(),
        _ => format!("[{}]", record.initials()),
    }
}
