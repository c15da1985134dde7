//! Environment-driven configuration.
//!
//! Every knob has a default suitable for local development; set the
//! `SKETCHCALC_*` variables to override.

use std::time::Duration;

/// Default recognition service base URL.
const DEFAULT_API_URL: &str = "http://127.0.0.1:8900";

/// Default canvas width in pixels.
const DEFAULT_WIDTH: u32 = 1280;

/// Default canvas height in pixels.
const DEFAULT_HEIGHT: u32 = 720;

/// Default flat reveal delay in milliseconds.
const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

/// Sketchpad configuration.
#[derive(Debug, Clone)]
pub struct PadConfig {
    /// Recognition service base URL (`SKETCHCALC_API_URL`).
    pub api_url: String,
    /// Canvas width in pixels (`SKETCHCALC_CANVAS_WIDTH`).
    pub width: u32,
    /// Canvas height in pixels (`SKETCHCALC_CANVAS_HEIGHT`).
    pub height: u32,
    /// Flat delay applied to every recognized record before its formula
    /// is revealed (`SKETCHCALC_REVEAL_DELAY_MS`).
    pub reveal_delay: Duration,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
        }
    }
}

impl PadConfig {
    /// Read configuration from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("SKETCHCALC_API_URL").unwrap_or(defaults.api_url),
            width: env_parse("SKETCHCALC_CANVAS_WIDTH").unwrap_or(defaults.width),
            height: env_parse("SKETCHCALC_CANVAS_HEIGHT").unwrap_or(defaults.height),
            reveal_delay: env_parse("SKETCHCALC_REVEAL_DELAY_MS")
                .map_or(defaults.reveal_delay, Duration::from_millis),
        }
    }
}

/// Parse an environment variable, ignoring absent or malformed values.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
