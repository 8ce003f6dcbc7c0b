// ABOUTME: Core types, constants, and validation for the Rockspace brief flow
// ABOUTME: Foundational package shared by the AI client, the brief controllers, and the CLI

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{AIAnalysis, BudgetRange, QuoteRequest, Ticket};

// Re-export constants
pub use constants::{
    FALLBACK_ESTIMATED_TIMELINE, FALLBACK_REFINED_BRIEF, FALLBACK_SUGGESTED_STACK,
    MAX_TICKET_ID, MIN_IDEA_LENGTH,
};

// Re-export utilities
pub use utils::{generate_ticket_id, idea_length};

// Re-export validation
pub use validation::{is_analyzable, truncate, validate_quote_request, ValidationError};
