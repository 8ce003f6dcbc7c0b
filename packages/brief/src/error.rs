// ABOUTME: Error types for the brief package
// ABOUTME: Only the contact-form flow can fail; brief analysis always resolves to a value

use rockspace_core::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Invalid lead: {0}")]
    Validation(#[from] ValidationError),

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("This form has already been submitted")]
    AlreadySubmitted,

    #[error("Lead was rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, SubmissionError>;
