use super::{kernel_version::KernelVersion, transaction_id::TransactionId};

/// A published snapshot of the most recently completed checkpoint.
///
/// `Unknown` is the sentinel used before the first successful checkpoint.
/// Written exactly once per successful checkpoint, at the very end of the
/// protocol; read freely and often by everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LatestCheckpointInfo {
    #[default]
    Unknown,
    Known {
        committed_tx: TransactionId,
        kernel_version: KernelVersion,
    },
}

impl LatestCheckpointInfo {
    pub fn known(committed_tx: TransactionId, kernel_version: KernelVersion) -> Self {
        Self::Known {
            committed_tx,
            kernel_version,
        }
    }

    pub fn committed_tx_id(&self) -> Option<u64> {
        match self {
            Self::Unknown => None,
            Self::Known { committed_tx, .. } => Some(committed_tx.id()),
        }
    }

    pub fn committed_tx(&self) -> Option<TransactionId> {
        match self {
            Self::Unknown => None,
            Self::Known { committed_tx, .. } => Some(*committed_tx),
        }
    }

    pub fn kernel_version(&self) -> Option<KernelVersion> {
        match self {
            Self::Unknown => None,
            Self::Known { kernel_version, .. } => Some(*kernel_version),
        }
    }
}
