// ABOUTME: Configuration constants for Rockspace
// ABOUTME: Environment variable names and defaults shared by the AI client and the CLI

pub mod constants;

pub use constants::*;

use tracing::debug;

/// Read the model API key, preferring `GEMINI_API_KEY` over the legacy `API_KEY`
pub fn api_key_from_env() -> Option<String> {
    [GEMINI_API_KEY, API_KEY].iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .inspect(|_| debug!("Using model API key from {}", name))
    })
}
