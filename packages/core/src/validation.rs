// ABOUTME: Input validation for ideas and contact-form leads
// ABOUTME: Gates analysis on idea length and checks required lead fields before submission

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::constants::MIN_IDEA_LENGTH;
use crate::types::QuoteRequest;
use crate::utils::idea_length;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Idea is too short: {length} characters (minimum {minimum})")]
    IdeaTooShort { length: usize, minimum: usize },
}

/// Whether an idea is long enough to be sent for analysis
pub fn is_analyzable(idea: &str) -> bool {
    idea_length(idea) >= MIN_IDEA_LENGTH
}

/// Check the fields the contact form marks as required
pub fn validate_quote_request(request: &QuoteRequest) -> Result<(), ValidationError> {
    if request.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }

    let email = request.email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }

    if request.idea.trim().is_empty() {
        return Err(ValidationError::MissingField("idea"));
    }

    Ok(())
}

/// Truncate a string to at most `max_chars` characters for log output
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
