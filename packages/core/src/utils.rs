// ABOUTME: Shared utility functions for the brief flow
// ABOUTME: Idea length measurement and ticket id generation

use rand::Rng;

use crate::constants::MAX_TICKET_ID;

/// Raw length of an idea, counted in characters. Surrounding whitespace is not trimmed.
pub fn idea_length(idea: &str) -> usize {
    idea.chars().count()
}

/// Generate a ticket number in `0..=MAX_TICKET_ID`
pub fn generate_ticket_id() -> u32 {
    rand::thread_rng().gen_range(0..=MAX_TICKET_ID)
}
