use thiserror::Error;

/// Failures that can abort a checkpoint attempt.
///
/// A `ShutdownRequested` outcome is deliberately *not* a variant here: it is
/// not an error, it is the expected result of calling a triggered checkpoint
/// entry point after [`crate::coordinator::Coordinator::shutdown`], and is
/// represented as `Ok(NO_TX)` instead.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("database panicked before flush; checkpoint aborted")]
    PanicBeforeFlush,

    #[error("database panicked after flush, before append; checkpoint aborted")]
    PanicAfterFlush,

    #[error("flush failed: {0}")]
    FlushFailed(#[source] std::io::Error),

    #[error("checkpoint append failed: {0}")]
    AppendFailed(#[source] std::io::Error),

    #[error("log prune failed: {0}")]
    PruneFailed(#[source] std::io::Error),
}

pub type CheckpointResult<T> = Result<T, CheckpointError>;
