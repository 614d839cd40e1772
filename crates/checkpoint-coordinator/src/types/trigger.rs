use super::latest_info::LatestCheckpointInfo;

/// Why a checkpoint is being attempted.
///
/// The coordinator treats this opaquely except for logging: every call site
/// picks the variant that describes its own reason for asking, and the
/// coordinator's only obligation is to fold it into the one telemetry line
/// produced per checkpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerInfo {
    /// Raised by the background scheduler when the threshold policy fires.
    Scheduled,
    /// An operator or administrative caller asked for a checkpoint directly.
    ForcedByOperator,
    /// The coordinator is shutting down and is flushing one last time.
    Shutdown,
    /// A backup is about to begin and needs a consistent checkpoint first.
    BackupBegin,
    /// Recovery just replayed the log and wants a fresh checkpoint baseline.
    RecoveryComplete,
}

impl TriggerInfo {
    /// Human-readable reason, used as the leading clause of the completion
    /// log line (see the format in [`crate::reason`]).
    pub fn describe(&self, _latest: &LatestCheckpointInfo) -> String {
        match self {
            Self::Scheduled => "Scheduled".to_string(),
            Self::ForcedByOperator => "Forced by operator".to_string(),
            Self::Shutdown => "Database shutdown".to_string(),
            Self::BackupBegin => "Backup".to_string(),
            Self::RecoveryComplete => "Recovery completed".to_string(),
        }
    }
}

impl std::fmt::Display for TriggerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe(&LatestCheckpointInfo::Unknown))
    }
}
