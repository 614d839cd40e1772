mod kernel_version;
mod latest_info;
mod log_position;
mod transaction_id;
mod trigger;

pub use kernel_version::KernelVersion;
pub use latest_info::LatestCheckpointInfo;
pub use log_position::LogPosition;
pub use transaction_id::TransactionId;
pub use trigger::TriggerInfo;

/// Sentinel returned in place of a transaction id when no checkpoint was
/// performed (contention with no wait, threshold not met, or shutdown).
pub const NO_TX: i64 = -1;
