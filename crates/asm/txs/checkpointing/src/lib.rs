//! Helpers for constructing and parsing SPS-50 checkpoint transactions.

pub mod constants;
pub mod errors;
pub mod parser;

pub use constants::{CHECKPOINTING_V0_SUBPROTOCOL_ID, OL_STF_CHECKPOINT_TX_TYPE};
pub use errors::{CheckpointTxError, CheckpointTxResult};
pub use parser::{extract_signed_checkpoint_from_envelope, extract_withdrawal_messages};
