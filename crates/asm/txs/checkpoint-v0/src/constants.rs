use strata_asm_common::SubprotocolId;

/// Subprotocol identifier assigned to checkpoint v0 transactions.
pub const CHECKPOINT_V0_SUBPROTOCOL_ID: SubprotocolId = 10;

/// Transaction type identifier for OL STF checkpoints.
pub const OL_STF_CHECKPOINT_TX_TYPE: u8 = 1;
