use std::io;

use crate::types::{KernelVersion, LogPosition, TransactionId, TriggerInfo};

/// Snapshot of the last transaction the storage engine considers closed.
///
/// Cheap and lock-free: the coordinator calls this both inside and outside
/// the checkpoint mutex.
pub trait TxIdStore: Send + Sync {
    fn get_last_closed_transaction(&self) -> (TransactionId, LogPosition);
}

/// Counters reported by a flush, used only to format the completion log line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlushStats {
    pub pages_flushed: u64,
    pub io_performed: u64,
    /// Fraction (0.0-1.0) of total available pages that were dirty and had
    /// to be flushed.
    pub flush_ratio: f64,
    pub times_paused: u64,
    pub millis_paused: u64,
}

/// An opaque tracing/version-barrier handle tagged to one checkpoint attempt.
///
/// What `init_write_barrier` actually does is entirely up to the page cache;
/// the coordinator only ever calls it once, at the prescribed point in the
/// protocol, and never inspects the handle afterwards.
pub trait CursorContext: Send {
    fn init_write_barrier(&mut self, tx_id: u64);
}

pub trait CursorContextFactory: Send + Sync {
    type Context: CursorContext;

    fn create(&self, tag: &str) -> Self::Context;
}

/// Flushes all dirty pages to durable storage.
pub trait FlushOperation: Send + Sync {
    fn flush_and_force(&self, cursor: &mut dyn CursorContext) -> io::Result<FlushStats>;
}

/// Appends one checkpoint record to the transaction log. This is the commit
/// point of a checkpoint: once it returns successfully, the checkpoint is
/// real even if nothing downstream of it (threshold update, prune,
/// publication) yet reflects it.
pub trait CheckpointAppender: Send + Sync {
    fn append_checkpoint(
        &self,
        tx: &TransactionId,
        kernel_version: KernelVersion,
        log_pos: &LogPosition,
        instant: std::time::SystemTime,
        trigger: &TriggerInfo,
    ) -> io::Result<()>;
}

/// Drops log segments made unnecessary by a new checkpoint. Idempotent:
/// pruning to a version already pruned is a no-op, not an error.
pub trait LogPruner: Send + Sync {
    fn prune_logs(&self, up_to_log_version: u64) -> io::Result<()>;
}

/// One-way latch set by any subsystem that has detected fatal corruption.
/// Once set it never clears; the coordinator only ever reads it.
pub trait PanicSignal: Send + Sync {
    fn assert_no_panic(&self) -> Result<(), DatabasePanicked>;
}

/// The database has panicked; checkpointing must not proceed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("database has panicked")]
pub struct DatabasePanicked;

/// Rate limiter the flush primitive paces itself against. Read-only from the
/// coordinator's perspective; it only reports the configured limit for the
/// completion log line.
pub trait IoController: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Configured throughput limit. Negative or disabled both render as
    /// `"unlimited"` in the completion log line.
    fn configured_limit(&self) -> i64;
}

pub trait KernelVersionProvider: Send + Sync {
    fn kernel_version(&self) -> KernelVersion;
}

/// Everything the coordinator needs from its surrounding storage engine,
/// bundled into one bound so `Coordinator<C>` needs only one type parameter.
pub trait CheckpointContext:
    TxIdStore
    + FlushOperation
    + CheckpointAppender
    + LogPruner
    + PanicSignal
    + IoController
    + KernelVersionProvider
    + CursorContextFactory
    + Send
    + Sync
    + 'static
{
}

impl<T> CheckpointContext for T where
    T: TxIdStore
        + FlushOperation
        + CheckpointAppender
        + LogPruner
        + PanicSignal
        + IoController
        + KernelVersionProvider
        + CursorContextFactory
        + Send
        + Sync
        + 'static
{
}
