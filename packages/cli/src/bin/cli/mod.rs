pub mod analyze;
pub mod submit;
