use std::time::Duration;

use parking_lot::Mutex;

/// How long to sleep between polls in [`CheckpointMutex::try_lock_until`].
///
/// Short enough that a timeout predicate measured in milliseconds is honored
/// promptly, long enough not to spin.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Single-writer serialization primitive for checkpoint execution.
///
/// Three acquisition modes, matching the three call sites in
/// [`crate::coordinator::Coordinator`]: forced (blocking), opportunistic
/// no-wait, and bounded wait-for-join. Guards release on drop, so every exit
/// path of a holding scope — including an early return on error — releases
/// the lock without any explicit cleanup code.
#[derive(Debug, Default)]
pub struct CheckpointMutex {
    inner: Mutex<()>,
}

/// Proof of exclusive checkpoint-execution access. Releases the mutex when
/// dropped.
#[derive(Debug)]
pub struct CheckpointGuard<'a> {
    _guard: parking_lot::MutexGuard<'a, ()>,
}

impl CheckpointMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the mutex is acquired.
    pub fn lock(&self) -> CheckpointGuard<'_> {
        CheckpointGuard {
            _guard: self.inner.lock(),
        }
    }

    /// Acquire only if immediately available.
    pub fn try_lock(&self) -> Option<CheckpointGuard<'_>> {
        self.inner
            .try_lock()
            .map(|_guard| CheckpointGuard { _guard })
    }

    /// Poll for acquisition until either it succeeds or `timed_out` reports
    /// true. `timed_out` is consulted *before* each sleep, so a predicate
    /// that is already true on entry never sleeps at all.
    pub fn try_lock_until(&self, mut timed_out: impl FnMut() -> bool) -> Option<CheckpointGuard<'_>> {
        loop {
            if let Some(guard) = self.try_lock() {
                return Some(guard);
            }
            if timed_out() {
                return None;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}
