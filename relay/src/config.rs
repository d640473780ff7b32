use std::{env, str::FromStr, time::Duration};

use crate::error::{RelayError, RelayResult};

pub const DEFAULT_CHANNEL: &str = "withdrawals";
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_secs(2);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Retry policy and destination for withdrawal notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Operational channel the messages go to
    pub channel: String,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before retry `n` is `n * backoff_step`
    pub backoff_step: Duration,
    /// Upper bound for a single send
    pub attempt_timeout: Duration,
    pub queue_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_step: DEFAULT_BACKOFF_STEP,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl RelayConfig {
    /// Defaults overridden by `RELAY_CHANNEL`, `RELAY_MAX_RETRIES`,
    /// `RELAY_BACKOFF_MS`, `RELAY_ATTEMPT_TIMEOUT_MS` and `RELAY_QUEUE_CAPACITY`
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RelayResult<Self> {
        let mut config = Self::default();

        if let Some(channel) = lookup("RELAY_CHANNEL") {
            if channel.trim().is_empty() {
                return Err(RelayError::InvalidConfig { key: "RELAY_CHANNEL", value: channel });
            }
            config.channel = channel;
        }
        if let Some(value) = parse(&lookup, "RELAY_MAX_RETRIES")? {
            config.max_retries = value;
        }
        if let Some(ms) = parse::<u64>(&lookup, "RELAY_BACKOFF_MS")? {
            config.backoff_step = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64>(&lookup, "RELAY_ATTEMPT_TIMEOUT_MS")? {
            config.attempt_timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse::<usize>(&lookup, "RELAY_QUEUE_CAPACITY")? {
            if capacity == 0 {
                return Err(RelayError::InvalidConfig {
                    key: "RELAY_QUEUE_CAPACITY",
                    value: capacity.to_string(),
                });
            }
            config.queue_capacity = capacity;
        }

        Ok(config)
    }

    /// Delay before retry number `retry` (1-based)
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff_step.saturating_mul(retry)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> RelayResult<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RelayError::InvalidConfig { key, value: raw }),
    }
}
