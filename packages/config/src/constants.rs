// ABOUTME: Environment variable name constants and their defaults
// ABOUTME: Centralized definitions of all environment variables read by Rockspace

// Generative model access
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const API_KEY: &str = "API_KEY"; // Legacy
pub const ROCKSPACE_GEMINI_MODEL: &str = "ROCKSPACE_GEMINI_MODEL";
pub const ROCKSPACE_GEMINI_API_URL: &str = "ROCKSPACE_GEMINI_API_URL";

// HTTP client
pub const ROCKSPACE_HTTP_TIMEOUT_SECS: &str = "ROCKSPACE_HTTP_TIMEOUT_SECS";
pub const ROCKSPACE_HTTP_CONNECT_TIMEOUT_SECS: &str = "ROCKSPACE_HTTP_CONNECT_TIMEOUT_SECS";

// Perceived-latency floors
pub const ROCKSPACE_SCAN_DELAY_MS: &str = "ROCKSPACE_SCAN_DELAY_MS";
pub const ROCKSPACE_SUBMIT_DELAY_MS: &str = "ROCKSPACE_SUBMIT_DELAY_MS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SCAN_DELAY_MS: u64 = 1500;
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;
pub const DEFAULT_LOG_FILTER: &str = "info";
