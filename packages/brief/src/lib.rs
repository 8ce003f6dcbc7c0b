// ABOUTME: Rockspace brief library - AI-assisted brief refinement and lead submission
// ABOUTME: Provides the brief analyzer, the analysis request controller, and the contact-form flow

pub mod analyzer;
pub mod controller;
pub mod error;
pub mod prompts;
pub mod submission;

pub use analyzer::{Analyze, BriefAnalyzer, BriefModel, BriefRequest};
pub use controller::{AnalysisController, AnalysisState, TriggerOutcome};
pub use error::{Result, SubmissionError};
pub use submission::{FormState, LeadSubmitter, SimulatedSubmitter, SubmissionController};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analyzer::{Analyze, BriefAnalyzer};
    pub use crate::controller::{AnalysisController, AnalysisState, TriggerOutcome};
    pub use crate::error::{Result, SubmissionError};
    pub use crate::submission::{FormState, SimulatedSubmitter, SubmissionController};
    pub use rockspace_core::{AIAnalysis, BudgetRange, QuoteRequest, Ticket};
}
