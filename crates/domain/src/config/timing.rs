use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for every blocking wait the harness performs. There are no
/// unbounded waits and no fixed sleeps: propagation is observed by
/// polling within `propagation_timeout_ms`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_propagation_timeout_ms")]
    pub propagation_timeout_ms: u64,

    #[serde(default = "default_readiness_timeout_ms")]
    pub readiness_timeout_ms: u64,
}

impl TimingConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn propagation_timeout(&self) -> Duration {
        Duration::from_millis(self.propagation_timeout_ms)
    }

    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_millis(self.readiness_timeout_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            propagation_timeout_ms: default_propagation_timeout_ms(),
            readiness_timeout_ms: default_readiness_timeout_ms(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_propagation_timeout_ms() -> u64 {
    10_000
}

fn default_readiness_timeout_ms() -> u64 {
    60_000
}
