/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Walk-in / walk-out times: red when they break the lecture window,
/// plain otherwise.
pub fn colorize_time(value: &str, flagged: bool) -> String {
    if value.trim().is_empty() {
        return format!("{GREY}--:--{RESET}");
    }

    if flagged {
        format!("{RED}{value}{RESET}")
    } else {
        value.to_string()
    }
}
