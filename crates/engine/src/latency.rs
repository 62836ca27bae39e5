//! The artificial processing delay simulated before a verdict resolves.

use std::time::Duration;

/// Default artificial delay before a verdict resolves, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 2500;

/// Configurable artificial delay.
///
/// The wait is a plain `tokio` sleep; dropping the future cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyPolicy {
    delay: Option<Duration>,
}

impl LatencyPolicy {
    /// Fixed delay of `ms` milliseconds. `fixed(0)` is equivalent to
    /// [`LatencyPolicy::none`].
    pub fn fixed(ms: u64) -> Self {
        if ms == 0 {
            Self::none()
        } else {
            Self {
                delay: Some(Duration::from_millis(ms)),
            }
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self { delay: None }
    }

    /// The configured delay, if any.
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Sleep for the configured delay.
    pub async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for LatencyPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn default_delay_is_two_and_a_half_seconds() {
        assert_eq!(
            LatencyPolicy::default().delay(),
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn zero_fixed_delay_collapses_to_none() {
        assert_eq!(LatencyPolicy::fixed(0), LatencyPolicy::none());
        assert_eq!(LatencyPolicy::none().delay(), None);
    }

    #[tokio::test]
    async fn fixed_delay_elapses_before_resolving() {
        let policy = LatencyPolicy::fixed(20);
        let start = Instant::now();
        policy.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn none_resolves_immediately() {
        let policy = LatencyPolicy::none();
        let start = Instant::now();
        policy.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
