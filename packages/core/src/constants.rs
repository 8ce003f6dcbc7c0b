/// Minimum raw length (in characters) an idea must have before analysis may be requested
pub const MIN_IDEA_LENGTH: usize = 10;

/// Largest ticket number shown on the submission success screen
pub const MAX_TICKET_ID: u32 = 999_998;

/// Acknowledgment returned when the model could not produce a brief
pub const FALLBACK_REFINED_BRIEF: &str = "We received your idea. Our team will analyze it manually.";

/// Placeholder stack returned when the model could not produce a brief
pub const FALLBACK_SUGGESTED_STACK: &[&str] = &["TBD"];

/// Placeholder timeline returned when the model could not produce a brief
pub const FALLBACK_ESTIMATED_TIMELINE: &str = "To be discussed";
