use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime-tunable parameters for the threshold policy (C2) and the
/// opportunistic scheduler (C8). Embeddable as a sub-document of the
/// surrounding engine's own configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Checkpoint once at least this many transactions have committed since
    /// the last checkpoint.
    pub transactions_per_checkpoint: u64,
    /// Checkpoint once at least this many log bytes have been written since
    /// the last checkpoint.
    pub bytes_per_checkpoint: u64,
    /// How often the background scheduler calls `checkPointIfNeeded`.
    #[serde(with = "duration_millis")]
    pub scheduler_poll_interval: Duration,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            transactions_per_checkpoint: 100_000,
            bytes_per_checkpoint: 250 * 1024 * 1024,
            scheduler_poll_interval: Duration::from_secs(300),
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        (value.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let config = CheckpointConfig::default();
        assert!(config.transactions_per_checkpoint > 0);
        assert!(config.bytes_per_checkpoint > 0);
        assert!(config.scheduler_poll_interval > Duration::ZERO);
    }
}
