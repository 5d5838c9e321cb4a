use std::time::Duration;

/// Upper bound of the random delay added to every reconnect backoff
pub const MAX_RECONNECT_JITTER_MS: u64 = 250;

// Doubling stops here; the delay is capped by `max_delay` long before that anyway
const MAX_BACKOFF_EXPONENT: u32 = 10;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// When false, a dropped socket ends the subscription
    pub enabled: bool,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// 0 means unlimited
    pub max_attempts: u32,
}

impl ReconnectPolicy {
    /// `base * 2^(attempt-1)`, capped at `max_delay`, plus the given jitter
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32, jitter: Duration) -> Duration {
        let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
        let delay = self
            .base_delay
            .saturating_mul(1 << exponent)
            .min(self.max_delay);
        delay.saturating_add(jitter)
    }

    #[must_use]
    pub fn attempts_exhausted(&self, attempt: u32) -> bool {
        self.max_attempts > 0 && attempt > self.max_attempts
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            max_attempts: 0,
        }
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsHandlerConfig {
    pub url: String,
    pub subscribe_on_connect: bool,
    pub reconnect: ReconnectPolicy,
}
