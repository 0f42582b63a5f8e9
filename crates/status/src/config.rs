//! Tracker configuration
//!
//! Auto-reset behavior is opt-in per outcome: a tracker can revert a
//! successful status back to idle, clear a captured error, or both, after a
//! configurable delay. Every combination of options is valid, so the builder
//! cannot fail.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fallback reset delay applied when none is configured
///
/// A configured delay of zero is treated as "not configured" and falls back
/// to this value as well.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Custom serialization module for Duration as milliseconds
///
/// Reset delays serialize as integer milliseconds for JSON compatibility,
/// matching how UI-facing configuration typically expresses them.
///
/// # Usage
/// ```rust
/// use std::time::Duration;
///
/// use async_status::duration_millis;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "duration_millis")]
///     delay: Duration,
/// }
/// ```
pub mod duration_millis {
    use super::*;

    /// Serde serialization result type
    type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

    /// Serialize a Duration as milliseconds (u64)
    pub fn serialize<S>(duration: &Duration, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    /// Deserialize milliseconds (u64) into a Duration
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Configuration for status tracking behavior
///
/// Missing fields deserialize to their defaults, so partial configuration
/// documents are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Whether a successful status reverts to idle after the reset delay
    pub reset_on_success: bool,
    /// Whether a captured error is cleared after the reset delay
    pub reset_on_error: bool,
    /// Delay before an armed auto-reset fires; zero means "use the default"
    #[serde(with = "duration_millis")]
    pub reset_delay: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { reset_on_success: false, reset_on_error: false, reset_delay: DEFAULT_RESET_DELAY }
    }
}

impl TrackerConfig {
    /// Create a configuration builder
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> TrackerConfigBuilder {
        TrackerConfigBuilder::new()
    }

    /// Create a configuration builder (alias for `new()`)
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::new()
    }

    /// Effective delay used when arming an auto-reset
    ///
    /// A zero `reset_delay` falls back to [`DEFAULT_RESET_DELAY`].
    pub fn reset_delay_or_default(&self) -> Duration {
        if self.reset_delay.is_zero() {
            DEFAULT_RESET_DELAY
        } else {
            self.reset_delay
        }
    }

    /// Whether any auto-reset branch is enabled
    pub const fn auto_reset_enabled(&self) -> bool {
        self.reset_on_success || self.reset_on_error
    }
}

/// Builder for TrackerConfig
#[derive(Debug)]
pub struct TrackerConfigBuilder {
    config: TrackerConfig,
}

impl Default for TrackerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerConfigBuilder {
    pub fn new() -> Self {
        Self { config: TrackerConfig::default() }
    }

    pub fn reset_on_success(mut self, reset: bool) -> Self {
        self.config.reset_on_success = reset;
        self
    }

    pub fn reset_on_error(mut self, reset: bool) -> Self {
        self.config.reset_on_error = reset;
        self
    }

    pub fn reset_delay(mut self, delay: Duration) -> Self {
        self.config.reset_delay = delay;
        self
    }

    /// Build the configuration
    ///
    /// Every combination of options is valid, so building cannot fail.
    pub fn build(self) -> TrackerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for tracker configuration
    //!
    //! Tests cover defaults, the builder, the zero-delay fallback, and the
    //! millisecond serde representation.

    use super::*;

    /// Validates `TrackerConfig::default` behavior for the default
    /// configuration scenario.
    ///
    /// Assertions:
    /// - Ensures `!config.reset_on_success` evaluates to true.
    /// - Ensures `!config.reset_on_error` evaluates to true.
    /// - Confirms `config.reset_delay` equals `Duration::from_millis(3000)`.
    #[test]
    fn test_config_default() {
        let config = TrackerConfig::default();
        assert!(!config.reset_on_success);
        assert!(!config.reset_on_error);
        assert_eq!(config.reset_delay, Duration::from_millis(3000));
        assert!(!config.auto_reset_enabled());
    }

    /// Validates `TrackerConfig::new` behavior for the builder scenario.
    ///
    /// Assertions:
    /// - Confirms each builder option lands on the built configuration.
    #[test]
    fn test_config_builder() {
        let config = TrackerConfig::new()
            .reset_on_success(true)
            .reset_on_error(true)
            .reset_delay(Duration::from_millis(250))
            .build();

        assert!(config.reset_on_success);
        assert!(config.reset_on_error);
        assert_eq!(config.reset_delay, Duration::from_millis(250));
        assert!(config.auto_reset_enabled());
    }

    /// Validates `TrackerConfig::reset_delay_or_default` behavior for the
    /// zero delay scenario.
    ///
    /// Assertions:
    /// - Confirms a zero delay falls back to `DEFAULT_RESET_DELAY`.
    /// - Confirms a non-zero delay is kept as configured.
    #[test]
    fn test_zero_delay_falls_back_to_default() {
        let zero = TrackerConfig::builder().reset_delay(Duration::ZERO).build();
        assert_eq!(zero.reset_delay_or_default(), DEFAULT_RESET_DELAY);

        let configured = TrackerConfig::builder().reset_delay(Duration::from_millis(150)).build();
        assert_eq!(configured.reset_delay_or_default(), Duration::from_millis(150));
    }

    /// Validates `serde_json` behavior for the millisecond representation
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures the serialized form carries the delay as integer
    ///   milliseconds.
    /// - Confirms the round trip preserves the configuration.
    #[test]
    fn test_config_serializes_delay_as_millis() {
        let config = TrackerConfig::builder()
            .reset_on_success(true)
            .reset_delay(Duration::from_millis(1500))
            .build();

        let json = serde_json::to_string(&config).expect("Should serialize config");
        assert!(json.contains("\"reset_delay\":1500"), "Should contain milliseconds value");

        let deserialized: TrackerConfig =
            serde_json::from_str(&json).expect("Should deserialize config");
        assert_eq!(deserialized, config);
    }

    /// Validates `serde_json` behavior for the partial document scenario.
    ///
    /// Assertions:
    /// - Confirms missing fields deserialize to their defaults.
    #[test]
    fn test_config_partial_document_uses_defaults() {
        let json = r#"{"reset_on_error":true}"#;
        let config: TrackerConfig =
            serde_json::from_str(json).expect("Should deserialize partial config");

        assert!(config.reset_on_error);
        assert!(!config.reset_on_success);
        assert_eq!(config.reset_delay, DEFAULT_RESET_DELAY);
    }

    /// Validates `serde_json` behavior for the invalid delay scenario.
    ///
    /// Assertions:
    /// - Ensures a non-numeric delay fails to deserialize.
    #[test]
    fn test_config_rejects_non_numeric_delay() {
        let json = r#"{"reset_delay":"soon"}"#;
        let result: Result<TrackerConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
