//! Checkpoint coordinator for the storage engine's write-ahead log.
//!
//! Produces durable, recoverable snapshot points in the transaction log so
//! that crash recovery need only replay entries written after the last
//! successful checkpoint. See [`Coordinator`] for the orchestration entry
//! point and [`traits`] for the external collaborators it composes.

mod config;
mod coordinator;
mod errors;
mod mutex;
mod reason;
mod scheduler;
mod threshold;
pub mod traits;
mod types;

pub use config::CheckpointConfig;
pub use coordinator::Coordinator;
pub use errors::{CheckpointError, CheckpointResult};
pub use mutex::{CheckpointGuard, CheckpointMutex};
pub use reason::create_checkpoint_message_description;
pub use scheduler::run_scheduler;
pub use threshold::{SizeAndAgeThreshold, Threshold};
pub use types::{
    KernelVersion, LatestCheckpointInfo, LogPosition, TransactionId, TriggerInfo, NO_TX,
};
