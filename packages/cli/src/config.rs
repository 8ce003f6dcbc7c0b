use rockspace_ai::GeminiConfig;
use rockspace_config::{
    DEFAULT_HTTP_CONNECT_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SCAN_DELAY_MS,
    DEFAULT_SUBMIT_DELAY_MS, ROCKSPACE_HTTP_CONNECT_TIMEOUT_SECS, ROCKSPACE_HTTP_TIMEOUT_SECS,
    ROCKSPACE_SCAN_DELAY_MS, ROCKSPACE_SUBMIT_DELAY_MS,
};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' is not a whole number")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

#[derive(Debug)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub scan_delay: Duration,
    pub submit_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout = read_u64(ROCKSPACE_HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout == 0 {
            return Err(ConfigError::ZeroTimeout(ROCKSPACE_HTTP_TIMEOUT_SECS));
        }

        let connect_timeout = read_u64(
            ROCKSPACE_HTTP_CONNECT_TIMEOUT_SECS,
            DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        )?;
        if connect_timeout == 0 {
            return Err(ConfigError::ZeroTimeout(ROCKSPACE_HTTP_CONNECT_TIMEOUT_SECS));
        }

        // Zero delays are allowed: the analyzing state is then only as long as the model call
        let scan_delay = read_u64(ROCKSPACE_SCAN_DELAY_MS, DEFAULT_SCAN_DELAY_MS)?;
        let submit_delay = read_u64(ROCKSPACE_SUBMIT_DELAY_MS, DEFAULT_SUBMIT_DELAY_MS)?;

        let gemini = GeminiConfig {
            timeout: Duration::from_secs(timeout),
            connect_timeout: Duration::from_secs(connect_timeout),
            ..GeminiConfig::from_env()
        };

        Ok(Config {
            gemini,
            scan_delay: Duration::from_millis(scan_delay),
            submit_delay: Duration::from_millis(submit_delay),
        })
    }
}

fn read_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { var, value })
        }
        _ => Ok(default),
    }
}
