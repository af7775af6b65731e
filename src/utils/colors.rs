/// ANSI color helper utilities for terminal output.
use crate::models::flag::{Confidence, Severity};

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Confidence color:
/// high → green, medium → yellow, low → red.
pub fn color_for_confidence(c: Confidence) -> &'static str {
    match c {
        Confidence::High => GREEN,
        Confidence::Medium => YELLOW,
        Confidence::Low => RED,
    }
}

pub fn color_for_severity(s: Severity) -> &'static str {
    match s {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
        Severity::Info => CYAN,
    }
}

/// Grey out empty/placeholder values ("" or "--").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
