/// ANSI color helper utilities for terminal output.
use crate::models::status::Status;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Pending → yellow, Approved → green, Rejected → red
pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::Pending => YELLOW,
        Status::Approved => GREEN,
        Status::Rejected => RED,
    }
}

pub fn colorize_status(status: Status) -> String {
    format!("{}{}{}", color_for_status(status), status, RESET)
}
