//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for planner-smoke,
//! supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults matching the hosted planner deployment
//! - A process-global accessor initialized on first use
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PLANNER_SMOKE_BASE_URL` | Target page URL | `https://kss1510.github.io/Smart-Study-Planner/` |
//! | `PLANNER_SMOKE_WEBDRIVER_URL` | WebDriver endpoint | `http://localhost:9515` |
//! | `PLANNER_SMOKE_HEADLESS` | Run the browser headless | `true` |
//! | `PLANNER_SMOKE_WAIT_TIMEOUT` | Locate/verify wait timeout (seconds) | `10` |
//! | `PLANNER_SMOKE_POLL_INTERVAL` | Polling interval during waits (ms) | `250` |
//! | `PLANNER_SMOKE_ARTIFACT_DIR` | Directory for screenshot artifacts | `./artifacts` |
//!
//! # Example
//!
//! ```bash
//! # Point the checks at a local build of the planner
//! export PLANNER_SMOKE_BASE_URL="http://localhost:5173/"
//! export PLANNER_SMOKE_WEBDRIVER_URL="http://localhost:4444"
//! ```

use std::env;
use std::sync::OnceLock;
use std::time::Duration;

// ============================================================================
// Default Values
// ============================================================================

/// Default target page URL (the hosted planner)
pub const DEFAULT_BASE_URL: &str = "https://kss1510.github.io/Smart-Study-Planner/";

/// Default WebDriver endpoint (a locally running chromedriver)
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Default headless mode
pub const DEFAULT_HEADLESS: bool = true;

/// Default locate/verify wait timeout (seconds)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;

/// Default polling interval during bounded waits (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Default artifact directory
pub const DEFAULT_ARTIFACT_DIR: &str = "./artifacts";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the target page URL
pub const ENV_BASE_URL: &str = "PLANNER_SMOKE_BASE_URL";

/// Environment variable for the WebDriver endpoint
pub const ENV_WEBDRIVER_URL: &str = "PLANNER_SMOKE_WEBDRIVER_URL";

/// Environment variable for headless mode
pub const ENV_HEADLESS: &str = "PLANNER_SMOKE_HEADLESS";

/// Environment variable for the wait timeout (seconds)
pub const ENV_WAIT_TIMEOUT: &str = "PLANNER_SMOKE_WAIT_TIMEOUT";

/// Environment variable for the poll interval (milliseconds)
pub const ENV_POLL_INTERVAL: &str = "PLANNER_SMOKE_POLL_INTERVAL";

/// Environment variable for the artifact directory
pub const ENV_ARTIFACT_DIR: &str = "PLANNER_SMOKE_ARTIFACT_DIR";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for planner-smoke
#[derive(Debug, Clone)]
pub struct Config {
    /// Target page and driver settings
    pub target: TargetSettings,
    /// Bounded-wait settings
    pub wait: WaitSettings,
    /// Artifact settings
    pub artifacts: ArtifactSettings,
}

/// Target page and WebDriver settings
#[derive(Debug, Clone)]
pub struct TargetSettings {
    /// URL of the page under test
    pub base_url: String,
    /// WebDriver server endpoint
    pub webdriver_url: String,
    /// Whether to launch the browser headless
    pub headless: bool,
}

/// Settings for locate/verify polling waits
#[derive(Debug, Clone)]
pub struct WaitSettings {
    /// Maximum time to wait for a condition (seconds)
    pub timeout_secs: u64,
    /// Delay between condition probes (milliseconds)
    pub poll_interval_ms: u64,
}

/// Screenshot artifact settings
#[derive(Debug, Clone)]
pub struct ArtifactSettings {
    /// Directory where screenshots are written
    pub dir: String,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            target: TargetSettings::from_env(),
            wait: WaitSettings::from_env(),
            artifacts: ArtifactSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            target: TargetSettings::defaults(),
            wait: WaitSettings::defaults(),
            artifacts: ArtifactSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TargetSettings {
    /// Create target settings from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            webdriver_url: env::var(ENV_WEBDRIVER_URL)
                .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string()),
            headless: env::var(ENV_HEADLESS)
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(DEFAULT_HEADLESS),
        }
    }

    /// Create target settings with defaults
    pub fn defaults() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: DEFAULT_HEADLESS,
        }
    }
}

impl WaitSettings {
    /// Create wait settings from environment variables
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env::var(ENV_WAIT_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WAIT_TIMEOUT_SECS),
            poll_interval_ms: env::var(ENV_POLL_INTERVAL)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Create wait settings with defaults
    pub fn defaults() -> Self {
        Self {
            timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// The wait timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The poll interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl ArtifactSettings {
    /// Create artifact settings from environment variables
    pub fn from_env() -> Self {
        Self {
            dir: env::var(ENV_ARTIFACT_DIR).unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string()),
        }
    }

    /// Create artifact settings with defaults
    pub fn defaults() -> Self {
        Self {
            dir: DEFAULT_ARTIFACT_DIR.to_string(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a boolean environment value
/// Accepts: "1"/"0", "true"/"false", "yes"/"no" (case-insensitive)
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_truthy() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
    }

    #[test]
    fn test_parse_bool_falsy() {
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.target.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.target.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert_eq!(config.wait.timeout_secs, DEFAULT_WAIT_TIMEOUT_SECS);
        assert_eq!(config.artifacts.dir, DEFAULT_ARTIFACT_DIR);
    }

    #[test]
    fn test_wait_durations() {
        let wait = WaitSettings::defaults();
        assert_eq!(wait.timeout(), Duration::from_secs(10));
        assert_eq!(wait.poll_interval(), Duration::from_millis(250));
    }
}
