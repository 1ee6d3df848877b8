//! ANSI color helper utilities for terminal output.
use crate::models::lead_type::LeadType;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Color for a stored lead label ("HOT", "WARM", "COLD", "DEAD").
pub fn color_for_lead(lead: &str) -> &'static str {
    match LeadType::from_db_str(lead) {
        Some(LeadType::Hot) => RED,
        Some(LeadType::Warm) => YELLOW,
        Some(LeadType::Cold) => CYAN,
        Some(LeadType::Dead) => GREY,
        None => "",
    }
}

/// GREY for an empty optional value, no color otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => "",
        _ => GREY,
    }
}
