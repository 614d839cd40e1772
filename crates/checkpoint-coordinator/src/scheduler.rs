use std::sync::Arc;

use tokio::time::interval;
use tracing::{error, info};

use crate::{
    coordinator::Coordinator, threshold::Threshold, traits::CheckpointContext,
    types::TriggerInfo,
};

/// Drives opportunistic checkpoints on a fixed interval.
///
/// Mirrors the poll-loop shape used elsewhere in this workspace for
/// background maintenance tasks: a ticker plus a per-tick handler, logging
/// and continuing on error rather than retrying within the same tick. The
/// coordinator itself never spawns this — the embedder owns the task handle
/// and its shutdown.
pub async fn run_scheduler<C, T>(coordinator: Arc<Coordinator<C, T>>, poll_interval: std::time::Duration)
where
    C: CheckpointContext,
    T: Threshold,
{
    let mut ticker = interval(poll_interval);
    loop {
        ticker.tick().await;
        match coordinator.check_point_if_needed(TriggerInfo::Scheduled) {
            Ok(tx_id) if tx_id >= 0 => info!(tx_id, "opportunistic checkpoint completed"),
            Ok(_) => {}
            Err(err) => error!(%err, "opportunistic checkpoint attempt failed"),
        }
    }
}
