use std::time::Duration;

use crate::traits::{FlushStats, IoController};

/// Formats the single user-visible completion line for a checkpoint.
///
/// The template (including its irregular spacing before the closing
/// parenthesis) is the coordinator's one piece of stable, user-facing
/// output; keep it byte-for-byte unless operators' log-scraping scripts are
/// also being updated.
pub fn create_checkpoint_message_description(
    reason: &str,
    elapsed: Duration,
    stats: &FlushStats,
    io_controller: &dyn IoController,
) -> String {
    let limit = if io_controller.is_enabled() && io_controller.configured_limit() >= 0 {
        io_controller.configured_limit().to_string()
    } else {
        "unlimited".to_string()
    };
    let ratio_pct = (stats.flush_ratio * 100.0).floor();

    format!(
        "{reason} checkpoint completed in {duration}. Checkpoint flushed {pages} \
         pages ({ratio}% of total available pages), in {ios} IOs. Checkpoint \
         performed with IO limit: {limit}, paused in total {paused} times( {millis} millis).",
        reason = reason,
        duration = format_duration(elapsed),
        pages = stats.pages_flushed,
        ratio = ratio_pct,
        ios = stats.io_performed,
        limit = limit,
        paused = stats.times_paused,
        millis = stats.millis_paused,
    )
}

fn format_duration(d: Duration) -> String {
    format!("{}ms", d.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLimit(bool, i64);
    impl IoController for FixedLimit {
        fn is_enabled(&self) -> bool {
            self.0
        }
        fn configured_limit(&self) -> i64 {
            self.1
        }
    }

    #[test]
    fn formats_with_explicit_limit() {
        let stats = FlushStats {
            pages_flushed: 128,
            io_performed: 64,
            flush_ratio: 0.4321,
            times_paused: 2,
            millis_paused: 15,
        };
        let msg = create_checkpoint_message_description(
            "Scheduled",
            Duration::from_millis(500),
            &stats,
            &FixedLimit(true, 1000),
        );
        assert_eq!(
            msg,
            "Scheduled checkpoint completed in 500ms. Checkpoint flushed 128 \
             pages (43% of total available pages), in 64 IOs. Checkpoint \
             performed with IO limit: 1000, paused in total 2 times( 15 millis)."
        );
    }

    #[test]
    fn unlimited_when_disabled() {
        let stats = FlushStats::default();
        let msg = create_checkpoint_message_description(
            "Forced by operator",
            Duration::from_millis(10),
            &stats,
            &FixedLimit(false, 1000),
        );
        assert!(msg.contains("IO limit: unlimited"));
    }

    #[test]
    fn unlimited_when_limit_negative() {
        let stats = FlushStats::default();
        let msg = create_checkpoint_message_description(
            "Forced by operator",
            Duration::from_millis(10),
            &stats,
            &FixedLimit(true, -1),
        );
        assert!(msg.contains("IO limit: unlimited"));
    }
}
