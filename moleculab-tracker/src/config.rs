//! Tracker configuration
//!
//! Defines all configurable parameters for job tracking including the poll
//! cadence, the transient-failure tolerance, and the expected-duration
//! estimate the progress presentation is calibrated against.

use std::time::Duration;

/// Tracker configuration
///
/// Intervals and bounds are configurable to allow tuning for different
/// backends (a local stub completes in seconds, the real multi-agent
/// analysis runs for many minutes).
#[derive(Debug, Clone)]
pub struct Config {
    /// Research backend base URL (e.g., "http://localhost:5000")
    pub backend_url: String,

    /// How often to poll the backend for job status
    pub poll_interval: Duration,

    /// How many consecutive failed polls to tolerate before giving up.
    /// Research jobs run long; short network blips are expected.
    pub max_transient_failures: u32,

    /// Client-side estimate of how long one analysis takes. Drives the
    /// progress percentage and ETA; real terminal state always overrides it.
    pub expected_duration: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            poll_interval: Duration::from_secs(3),
            max_transient_failures: 3,
            expected_duration: Duration::from_secs(600), // 10 minutes
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MOLECULAB_BACKEND_URL (required)
    /// - MOLECULAB_POLL_INTERVAL (optional, seconds, default: 3)
    /// - MOLECULAB_MAX_TRANSIENT_FAILURES (optional, default: 3)
    /// - MOLECULAB_EXPECTED_DURATION_MINS (optional, minutes, default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = std::env::var("MOLECULAB_BACKEND_URL")
            .map_err(|_| anyhow::anyhow!("MOLECULAB_BACKEND_URL environment variable not set"))?;

        let poll_interval = std::env::var("MOLECULAB_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(3));

        let max_transient_failures = std::env::var("MOLECULAB_MAX_TRANSIENT_FAILURES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(3);

        let expected_duration = std::env::var("MOLECULAB_EXPECTED_DURATION_MINS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|mins| Duration::from_secs(mins * 60))
            .unwrap_or(Duration::from_secs(600));

        Ok(Self {
            backend_url,
            poll_interval,
            max_transient_failures,
            expected_duration,
        })
    }

    /// Overrides the expected-duration estimate
    pub fn with_expected_duration(mut self, expected_duration: Duration) -> Self {
        self.expected_duration = expected_duration;
        self
    }

    /// Overrides the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.is_empty() {
            anyhow::bail!("backend_url cannot be empty");
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            anyhow::bail!("backend_url must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.expected_duration.as_secs() == 0 {
            anyhow::bail!("expected_duration must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.max_transient_failures, 3);
        assert_eq!(config.expected_duration, Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty URL should fail
        config.backend_url = String::new();
        assert!(config.validate().is_err());

        // Invalid URL should fail
        config.backend_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.backend_url = "http://localhost:5000".to_string();
        assert!(config.validate().is_ok());

        // Zero poll interval should fail
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::default()
            .with_expected_duration(Duration::from_secs(60))
            .with_poll_interval(Duration::from_secs(2));

        assert_eq!(config.expected_duration, Duration::from_secs(60));
        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }
}
