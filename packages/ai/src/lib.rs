// ABOUTME: Generative model integration for Rockspace
// ABOUTME: Gemini generateContent client with structured (schema-constrained) JSON output

pub mod schema;
pub mod service;

pub use schema::{Schema, SchemaType};
pub use service::{
    AIResponse, AIServiceError, AIServiceResult, GeminiConfig, GeminiService, Usage,
};
