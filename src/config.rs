//! Retry policy configuration for [`crate::lock::Multilock`].

use std::time::Duration;

/// Default number of `BLOCKED` replies tolerated before giving up.
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Default sleep between retries.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Retry policy for a [`crate::lock::Multilock`].
///
/// `None` in either field means "use the handle's default", matching the
/// Python original where unset options fall back to the library's chosen
/// defaults rather than a caller-visible constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryConfig {
    /// Maximum number of `BLOCKED` replies tolerated. `Some(0)` fails on the
    /// first `BLOCKED` reply.
    pub retry_count: Option<u32>,
    /// Sleep duration between retries.
    pub retry_delay: Option<Duration>,
}

impl RetryConfig {
    /// Build a config with an explicit retry count and the default delay.
    pub fn with_retry_count(retry_count: u32) -> Self {
        Self {
            retry_count: Some(retry_count),
            retry_delay: None,
        }
    }

    /// Resolved retry count, falling back to [`DEFAULT_RETRY_COUNT`].
    pub fn resolved_retry_count(&self) -> u32 {
        self.retry_count.unwrap_or(DEFAULT_RETRY_COUNT)
    }

    /// Resolved retry delay, falling back to [`DEFAULT_RETRY_DELAY`].
    pub fn resolved_retry_delay(&self) -> Duration {
        self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_when_unset() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.resolved_retry_count(), DEFAULT_RETRY_COUNT);
        assert_eq!(cfg.resolved_retry_delay(), DEFAULT_RETRY_DELAY);
    }

    #[test]
    fn explicit_values_are_honored() {
        let cfg = RetryConfig {
            retry_count: Some(0),
            retry_delay: Some(Duration::from_millis(5)),
        };
        assert_eq!(cfg.resolved_retry_count(), 0);
        assert_eq!(cfg.resolved_retry_delay(), Duration::from_millis(5));
    }
}
