use crate::{config::CheckpointConfig, types::LogPosition, types::TriggerInfo};

/// Policy deciding when an opportunistic checkpoint is warranted.
///
/// `is_needed` must be cheap and callable without the checkpoint mutex held;
/// `on_checkpoint` is only ever called by the coordinator with the mutex
/// held, after a successful append.
pub trait Threshold: Send + 'static {
    fn initialize(&mut self, tx_id: u64, log_pos: LogPosition);

    fn is_needed(&self, tx_id: u64, log_pos: LogPosition, trigger: &TriggerInfo) -> bool;

    fn on_checkpoint(&mut self, tx_id: u64, log_pos: LogPosition);
}

/// Checkpoints once either a transaction-count or a byte-count budget since
/// the last checkpoint has been exceeded. Forced triggers never consult this
/// — the coordinator's forced entry points bypass it entirely.
#[derive(Debug)]
pub struct SizeAndAgeThreshold {
    transactions_per_checkpoint: u64,
    bytes_per_checkpoint: u64,
    last_tx_id: u64,
    last_log_position: LogPosition,
    initialized: bool,
}

impl SizeAndAgeThreshold {
    pub fn new(config: &CheckpointConfig) -> Self {
        Self {
            transactions_per_checkpoint: config.transactions_per_checkpoint,
            bytes_per_checkpoint: config.bytes_per_checkpoint,
            last_tx_id: 0,
            last_log_position: LogPosition::default(),
            initialized: false,
        }
    }
}

impl Threshold for SizeAndAgeThreshold {
    fn initialize(&mut self, tx_id: u64, log_pos: LogPosition) {
        self.last_tx_id = tx_id;
        self.last_log_position = log_pos;
        self.initialized = true;
    }

    fn is_needed(&self, tx_id: u64, log_pos: LogPosition, _trigger: &TriggerInfo) -> bool {
        if !self.initialized {
            return true;
        }
        let transactions_since = tx_id.saturating_sub(self.last_tx_id);
        let bytes_since = log_pos.bytes_since(&self.last_log_position);
        transactions_since >= self.transactions_per_checkpoint
            || bytes_since >= self.bytes_per_checkpoint
    }

    fn on_checkpoint(&mut self, tx_id: u64, log_pos: LogPosition) {
        self.last_tx_id = tx_id;
        self.last_log_position = log_pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> TriggerInfo {
        TriggerInfo::Scheduled
    }

    #[test]
    fn needed_before_initialize() {
        let t = SizeAndAgeThreshold::new(&CheckpointConfig::default());
        assert!(t.is_needed(1, LogPosition::new(0, 1), &trigger()));
    }

    #[test]
    fn not_needed_under_both_budgets() {
        let mut t = SizeAndAgeThreshold::new(&CheckpointConfig {
            transactions_per_checkpoint: 1000,
            bytes_per_checkpoint: 1_000_000,
            ..Default::default()
        });
        t.initialize(10, LogPosition::new(1, 0));
        assert!(!t.is_needed(20, LogPosition::new(1, 500), &trigger()));
    }

    #[test]
    fn needed_once_transaction_budget_exceeded() {
        let mut t = SizeAndAgeThreshold::new(&CheckpointConfig {
            transactions_per_checkpoint: 10,
            bytes_per_checkpoint: 1_000_000_000,
            ..Default::default()
        });
        t.initialize(0, LogPosition::new(0, 0));
        assert!(t.is_needed(10, LogPosition::new(0, 10), &trigger()));
    }

    #[test]
    fn needed_once_byte_budget_exceeded() {
        let mut t = SizeAndAgeThreshold::new(&CheckpointConfig {
            transactions_per_checkpoint: 1_000_000,
            bytes_per_checkpoint: 100,
            ..Default::default()
        });
        t.initialize(0, LogPosition::new(0, 0));
        assert!(t.is_needed(1, LogPosition::new(0, 200), &trigger()));
    }

    #[test]
    fn resets_baseline_after_checkpoint() {
        let mut t = SizeAndAgeThreshold::new(&CheckpointConfig {
            transactions_per_checkpoint: 5,
            bytes_per_checkpoint: 1_000_000_000,
            ..Default::default()
        });
        t.initialize(0, LogPosition::new(0, 0));
        t.on_checkpoint(5, LogPosition::new(0, 100));
        assert!(!t.is_needed(6, LogPosition::new(0, 150), &trigger()));
    }
}
