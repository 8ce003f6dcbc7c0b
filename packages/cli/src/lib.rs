// ABOUTME: Rockspace CLI library - configuration, logging, and terminal rendering
// ABOUTME: Shared by the rockspace binary and its tests

pub mod config;
pub mod logging;
pub mod progress;
pub mod render;

pub use config::{Config, ConfigError};
pub use logging::init_tracing;
pub use progress::submit_with_progress;

#[cfg(test)]
mod tests;
