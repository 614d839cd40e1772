use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use parking_lot::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::{
    errors::{CheckpointError, CheckpointResult},
    mutex::{CheckpointGuard, CheckpointMutex},
    reason::create_checkpoint_message_description,
    threshold::Threshold,
    traits::CheckpointContext,
    types::{KernelVersion, LatestCheckpointInfo, LogPosition, TransactionId, TriggerInfo, NO_TX},
};

/// Orchestrates checkpoint execution over a storage engine described by
/// `C`, using policy `T` to decide when an opportunistic checkpoint is due.
///
/// Readers of [`latest_check_point_info`](Coordinator::latest_check_point_info)
/// never block on the checkpoint mutex: publication is a single `RwLock`
/// write at the very end of a successful checkpoint, and uncontended reads
/// under `parking_lot` cost a single atomic load, the closest practical
/// stand-in this workspace's dependency set offers for a literal lock-free
/// atomic swap.
pub struct Coordinator<C: CheckpointContext, T: Threshold> {
    ctx: C,
    threshold: Mutex<T>,
    checkpoint_mutex: CheckpointMutex,
    latest_info: RwLock<LatestCheckpointInfo>,
    shutdown: AtomicBool,
}

impl<C: CheckpointContext, T: Threshold> std::fmt::Debug for Coordinator<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("latest_info", &*self.latest_info.read())
            .field("shutdown", &self.shutdown.load(Ordering::Relaxed))
            .finish()
    }
}

impl<C: CheckpointContext, T: Threshold> Coordinator<C, T> {
    pub fn new(ctx: C, threshold: T) -> Self {
        Self {
            ctx,
            threshold: Mutex::new(threshold),
            checkpoint_mutex: CheckpointMutex::new(),
            latest_info: RwLock::new(LatestCheckpointInfo::Unknown),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Initializes the threshold policy from the storage engine's current
    /// state. Must be called once before the first `checkPointIfNeeded`.
    pub fn start(&self) {
        let (tx, log_pos) = self.ctx.get_last_closed_transaction();
        self.threshold.lock().initialize(tx.id(), log_pos);
    }

    /// Latches the shutdown flag under the checkpoint mutex. Blocks until
    /// any in-progress checkpoint finishes; that checkpoint still completes
    /// and publishes normally. Every subsequent triggered call returns
    /// `NO_TX` with a warning instead of attempting a checkpoint.
    pub fn shutdown(&self) {
        let _guard = self.checkpoint_mutex.lock();
        self.shutdown.store(true, Ordering::Release);
        info!("checkpoint coordinator shut down");
    }

    pub fn latest_check_point_info(&self) -> LatestCheckpointInfo {
        *self.latest_info.read()
    }

    /// Blocks until a checkpoint can be performed, then performs one using
    /// the storage engine's current last-closed transaction.
    pub fn force_check_point(&self, trigger: TriggerInfo) -> CheckpointResult<i64> {
        let guard = self.checkpoint_mutex.lock();
        self.run_checkpoint(guard, trigger, None)
    }

    /// Like [`force_check_point`](Self::force_check_point), but checkpoints
    /// an externally-supplied transaction/position pair instead of reading
    /// the storage engine's current one.
    pub fn force_check_point_at(
        &self,
        tx: TransactionId,
        log_pos: LogPosition,
        trigger: TriggerInfo,
    ) -> CheckpointResult<i64> {
        let guard = self.checkpoint_mutex.lock();
        self.run_checkpoint(guard, trigger, Some((tx, log_pos)))
    }

    /// Waits indefinitely for the checkpoint mutex. If it is already held,
    /// joins the running checkpoint instead of starting a new one: once the
    /// mutex is acquired, returns the transaction id just published by
    /// whoever was holding it.
    pub fn try_check_point(&self, trigger: TriggerInfo) -> CheckpointResult<i64> {
        self.try_check_point_with_timeout(trigger, || false)
    }

    /// Same join semantics as [`try_check_point`](Self::try_check_point),
    /// bounded by `timed_out`. Returns `NO_TX` if `timed_out` fires before
    /// the mutex can be acquired.
    pub fn try_check_point_with_timeout(
        &self,
        trigger: TriggerInfo,
        timed_out: impl FnMut() -> bool,
    ) -> CheckpointResult<i64> {
        if let Some(guard) = self.checkpoint_mutex.try_lock() {
            return self.run_checkpoint(guard, trigger, None);
        }

        match self.checkpoint_mutex.try_lock_until(timed_out) {
            Some(guard) => {
                drop(guard);
                info!("checkpoint was already running; completed now");
                Ok(self.latest_check_point_info().committed_tx_id().unwrap_or(NO_TX))
            }
            None => Ok(NO_TX),
        }
    }

    /// Never waits: if the mutex is contended, returns `NO_TX` immediately
    /// without invoking any collaborator.
    pub fn try_check_point_no_wait(&self, trigger: TriggerInfo) -> CheckpointResult<i64> {
        match self.checkpoint_mutex.try_lock() {
            Some(guard) => self.run_checkpoint(guard, trigger, None),
            None => {
                info!("checkpoint already running; not waiting");
                Ok(NO_TX)
            }
        }
    }

    /// Consults the threshold policy *without* acquiring the checkpoint
    /// mutex; only acquires it (and runs a checkpoint) if the policy says a
    /// checkpoint is due.
    pub fn check_point_if_needed(&self, trigger: TriggerInfo) -> CheckpointResult<i64> {
        let (tx, log_pos) = self.ctx.get_last_closed_transaction();
        let needed = self.threshold.lock().is_needed(tx.id(), log_pos, &trigger);
        if !needed {
            return Ok(NO_TX);
        }

        let guard = self.checkpoint_mutex.lock();
        self.run_checkpoint(guard, trigger, None)
    }

    fn run_checkpoint(
        &self,
        _guard: CheckpointGuard<'_>,
        trigger: TriggerInfo,
        external: Option<(TransactionId, LogPosition)>,
    ) -> CheckpointResult<i64> {
        if self.shutdown.load(Ordering::Acquire) {
            warn!("checkpoint requested after shutdown; ignoring");
            return Ok(NO_TX);
        }

        let (tx, log_pos) = external.unwrap_or_else(|| self.ctx.get_last_closed_transaction());
        let reason = trigger.describe(&self.latest_check_point_info());
        let span = tracing::info_span!("checkpoint", reason = %reason, tx_id = tx.id());
        let _entered = span.enter();

        let mut cursor = self.ctx.create("checkpoint");
        cursor.init_write_barrier(tx.id());

        let kernel_version: KernelVersion = self.ctx.kernel_version();
        let ongoing = LatestCheckpointInfo::known(tx, kernel_version);

        if self.ctx.assert_no_panic().is_err() {
            return Err(CheckpointError::PanicBeforeFlush);
        }

        info!(%reason, "checkpoint started");
        let start = Instant::now();

        let flush_stats = {
            let flush_span = tracing::debug_span!("checkpoint.flush");
            let _entered = flush_span.enter();
            self.ctx
                .flush_and_force(&mut cursor)
                .map_err(CheckpointError::FlushFailed)
        };
        let flush_stats = match flush_stats {
            Ok(stats) => stats,
            Err(err) => {
                error!(%err, "Checkpoint failed");
                return Err(err);
            }
        };

        if self.ctx.assert_no_panic().is_err() {
            return Err(CheckpointError::PanicAfterFlush);
        }

        if let Err(err) = self.ctx.append_checkpoint(
            &tx,
            kernel_version,
            &log_pos,
            std::time::SystemTime::now(),
            &trigger,
        ) {
            let err = CheckpointError::AppendFailed(err);
            error!(%err, "Checkpoint failed");
            return Err(err);
        }

        self.threshold.lock().on_checkpoint(tx.id(), log_pos);

        let elapsed = start.elapsed();
        let description =
            create_checkpoint_message_description(&reason, elapsed, &flush_stats, &self.ctx);
        info!("{description}");

        if let Err(err) = self.ctx.prune_logs(log_pos.log_version()) {
            let err = CheckpointError::PruneFailed(err);
            error!(%err, "Checkpoint failed");
            return Err(err);
        }

        *self.latest_info.write() = ongoing;

        Ok(tx.id() as i64)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use super::*;
    use crate::traits::{
        CheckpointAppender, CursorContext, CursorContextFactory, DatabasePanicked, FlushOperation,
        FlushStats, IoController, KernelVersionProvider, LogPruner, PanicSignal, TxIdStore,
    };

    #[derive(Default)]
    struct Calls {
        flush: AtomicUsize,
        append: AtomicUsize,
        prune: AtomicUsize,
    }

    struct FakeCursor;
    impl CursorContext for FakeCursor {
        fn init_write_barrier(&mut self, _tx_id: u64) {}
    }

    /// A hand-rolled test double implementing every external collaborator
    /// trait, recording call counts and able to inject a blocking flush, a
    /// flush failure, or a panic on demand.
    struct FakeContext {
        tx_id: AtomicU64,
        log_version: AtomicU64,
        byte_offset: AtomicU64,
        calls: Arc<Calls>,
        panicked: AtomicBool,
        fail_flush: AtomicBool,
        flush_released: Arc<AtomicBool>,
    }

    impl FakeContext {
        fn new() -> Self {
            Self {
                tx_id: AtomicU64::new(42),
                log_version: AtomicU64::new(7),
                byte_offset: AtomicU64::new(1024),
                calls: Arc::new(Calls::default()),
                panicked: AtomicBool::new(false),
                fail_flush: AtomicBool::new(false),
                flush_released: Arc::new(AtomicBool::new(true)),
            }
        }

        fn hold_flush(&self) {
            self.flush_released.store(false, Ordering::Release);
        }

        fn release_flush(&self) {
            self.flush_released.store(true, Ordering::Release);
        }
    }

    impl TxIdStore for FakeContext {
        fn get_last_closed_transaction(&self) -> (TransactionId, LogPosition) {
            let id = self.tx_id.load(Ordering::SeqCst);
            (
                TransactionId::new(id, 0, 0, 0),
                LogPosition::new(
                    self.log_version.load(Ordering::SeqCst),
                    self.byte_offset.load(Ordering::SeqCst),
                ),
            )
        }
    }

    impl FlushOperation for FakeContext {
        fn flush_and_force(&self, _cursor: &mut dyn CursorContext) -> io::Result<FlushStats> {
            self.calls.flush.fetch_add(1, Ordering::SeqCst);
            while !self.flush_released.load(Ordering::Acquire) {
                std::thread::sleep(Duration::from_millis(5));
            }
            if self.fail_flush.load(Ordering::SeqCst) {
                return Err(io::Error::other("flush failed"));
            }
            Ok(FlushStats {
                pages_flushed: 10,
                io_performed: 5,
                flush_ratio: 0.1,
                times_paused: 0,
                millis_paused: 0,
            })
        }
    }

    impl CheckpointAppender for FakeContext {
        fn append_checkpoint(
            &self,
            _tx: &TransactionId,
            _kernel_version: KernelVersion,
            _log_pos: &LogPosition,
            _instant: std::time::SystemTime,
            _trigger: &TriggerInfo,
        ) -> io::Result<()> {
            self.calls.append.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl LogPruner for FakeContext {
        fn prune_logs(&self, _up_to_log_version: u64) -> io::Result<()> {
            self.calls.prune.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl PanicSignal for FakeContext {
        fn assert_no_panic(&self) -> Result<(), DatabasePanicked> {
            if self.panicked.load(Ordering::SeqCst) {
                Err(DatabasePanicked)
            } else {
                Ok(())
            }
        }
    }

    impl IoController for FakeContext {
        fn is_enabled(&self) -> bool {
            false
        }
        fn configured_limit(&self) -> i64 {
            -1
        }
    }

    impl KernelVersionProvider for FakeContext {
        fn kernel_version(&self) -> KernelVersion {
            KernelVersion::new(1)
        }
    }

    impl CursorContextFactory for FakeContext {
        type Context = FakeCursor;

        fn create(&self, _tag: &str) -> Self::Context {
            FakeCursor
        }
    }

    fn coordinator(ctx: FakeContext) -> Coordinator<FakeContext, SizeAndAgeThreshold> {
        let threshold = SizeAndAgeThreshold::new(&CheckpointConfig::default());
        Coordinator::new(ctx, threshold)
    }

    mod force_check_point {
        use super::*;

        #[test]
        fn cold_start_runs_full_protocol() {
            let ctx = FakeContext::new();
            let calls = ctx.calls.clone();
            let coord = coordinator(ctx);
            coord.start();

            let result = coord.force_check_point(TriggerInfo::ForcedByOperator);

            assert_eq!(result.unwrap(), 42);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
            assert_eq!(calls.append.load(Ordering::SeqCst), 1);
            assert_eq!(calls.prune.load(Ordering::SeqCst), 1);
            assert_eq!(
                coord.latest_check_point_info().committed_tx_id(),
                Some(42)
            );
        }

        #[test]
        fn panic_before_flush_skips_flush_entirely() {
            let ctx = FakeContext::new();
            ctx.panicked.store(true, Ordering::SeqCst);
            let calls = ctx.calls.clone();
            let coord = coordinator(ctx);
            coord.start();

            let result = coord.force_check_point(TriggerInfo::ForcedByOperator);

            assert!(matches!(result, Err(CheckpointError::PanicBeforeFlush)));
            assert_eq!(calls.flush.load(Ordering::SeqCst), 0);
            assert_eq!(calls.append.load(Ordering::SeqCst), 0);
            assert_eq!(calls.prune.load(Ordering::SeqCst), 0);
            assert_eq!(coord.latest_check_point_info(), LatestCheckpointInfo::Unknown);
        }

        #[test]
        fn panic_between_flush_and_append_skips_append_and_prune() {
            // Wrap FakeContext so assert_no_panic succeeds on its first call
            // (pre-flush) and fails on its second (post-flush).
            struct Wrapped {
                inner: FakeContext,
                checks: AtomicUsize,
            }

            impl TxIdStore for Wrapped {
                fn get_last_closed_transaction(&self) -> (TransactionId, LogPosition) {
                    self.inner.get_last_closed_transaction()
                }
            }
            impl FlushOperation for Wrapped {
                fn flush_and_force(&self, cursor: &mut dyn CursorContext) -> io::Result<FlushStats> {
                    self.inner.flush_and_force(cursor)
                }
            }
            impl CheckpointAppender for Wrapped {
                fn append_checkpoint(
                    &self,
                    tx: &TransactionId,
                    kernel_version: KernelVersion,
                    log_pos: &LogPosition,
                    instant: std::time::SystemTime,
                    trigger: &TriggerInfo,
                ) -> io::Result<()> {
                    self.inner
                        .append_checkpoint(tx, kernel_version, log_pos, instant, trigger)
                }
            }
            impl LogPruner for Wrapped {
                fn prune_logs(&self, up_to_log_version: u64) -> io::Result<()> {
                    self.inner.prune_logs(up_to_log_version)
                }
            }
            impl PanicSignal for Wrapped {
                fn assert_no_panic(&self) -> Result<(), DatabasePanicked> {
                    let n = self.checks.fetch_add(1, Ordering::SeqCst);
                    if n >= 1 {
                        Err(DatabasePanicked)
                    } else {
                        Ok(())
                    }
                }
            }
            impl IoController for Wrapped {
                fn is_enabled(&self) -> bool {
                    self.inner.is_enabled()
                }
                fn configured_limit(&self) -> i64 {
                    self.inner.configured_limit()
                }
            }
            impl KernelVersionProvider for Wrapped {
                fn kernel_version(&self) -> KernelVersion {
                    self.inner.kernel_version()
                }
            }
            impl CursorContextFactory for Wrapped {
                type Context = FakeCursor;
                fn create(&self, tag: &str) -> Self::Context {
                    self.inner.create(tag)
                }
            }

            let inner = FakeContext::new();
            let calls = inner.calls.clone();
            let ctx = Wrapped {
                inner,
                checks: AtomicUsize::new(0),
            };
            let threshold = SizeAndAgeThreshold::new(&CheckpointConfig::default());
            let coord = Coordinator::new(ctx, threshold);
            coord.start();

            let result = coord.force_check_point(TriggerInfo::ForcedByOperator);

            assert!(matches!(result, Err(CheckpointError::PanicAfterFlush)));
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
            assert_eq!(calls.append.load(Ordering::SeqCst), 0);
            assert_eq!(calls.prune.load(Ordering::SeqCst), 0);
            assert_eq!(coord.latest_check_point_info(), LatestCheckpointInfo::Unknown);
        }

        #[test]
        fn flush_failure_skips_append_and_prune_and_does_not_publish() {
            let ctx = FakeContext::new();
            ctx.fail_flush.store(true, Ordering::SeqCst);
            let calls = ctx.calls.clone();
            let coord = coordinator(ctx);
            coord.start();

            let result = coord.force_check_point(TriggerInfo::ForcedByOperator);

            assert!(matches!(result, Err(CheckpointError::FlushFailed(_))));
            assert_eq!(calls.append.load(Ordering::SeqCst), 0);
            assert_eq!(calls.prune.load(Ordering::SeqCst), 0);
            assert_eq!(coord.latest_check_point_info(), LatestCheckpointInfo::Unknown);
        }
    }

    mod check_point_if_needed {
        use super::*;

        #[test]
        fn skips_when_threshold_not_met() {
            let ctx = FakeContext::new();
            let calls = ctx.calls.clone();
            let coord = coordinator(ctx);
            coord.start();
            // Default threshold requires 100_000 transactions / 250MiB; a
            // lone call with no state change never crosses it.
            let result = coord.check_point_if_needed(TriggerInfo::Scheduled);

            assert_eq!(result.unwrap(), NO_TX);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 0);
            assert_eq!(calls.append.load(Ordering::SeqCst), 0);
            assert_eq!(calls.prune.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn runs_when_threshold_met() {
            let ctx = FakeContext::new();
            let calls = ctx.calls.clone();
            let coord = Coordinator::new(
                ctx,
                SizeAndAgeThreshold::new(&CheckpointConfig {
                    transactions_per_checkpoint: 1,
                    bytes_per_checkpoint: u64::MAX,
                    ..Default::default()
                }),
            );
            coord.start();

            let result = coord.check_point_if_needed(TriggerInfo::Scheduled);

            assert_eq!(result.unwrap(), 42);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
        }
    }

    mod try_check_point {
        use super::*;

        #[test]
        fn no_wait_returns_immediately_when_contended() {
            let ctx = Arc::new(FakeContext::new());
            ctx.hold_flush();
            let calls = ctx.calls.clone();
            let coord = Arc::new(coordinator_from_arc(ctx.clone()));
            coord.start();

            let coord_a = coord.clone();
            let holder = std::thread::spawn(move || {
                coord_a.force_check_point(TriggerInfo::ForcedByOperator)
            });

            // Give the holder a moment to actually acquire the mutex before
            // we probe contention.
            std::thread::sleep(Duration::from_millis(50));

            let result = coord.try_check_point_no_wait(TriggerInfo::Scheduled);
            assert_eq!(result.unwrap(), NO_TX);

            ctx.release_flush();
            let held_result = holder.join().unwrap();
            assert_eq!(held_result.unwrap(), 42);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn joins_running_checkpoint_instead_of_starting_a_new_one() {
            let ctx = Arc::new(FakeContext::new());
            ctx.hold_flush();
            let calls = ctx.calls.clone();
            let coord = Arc::new(coordinator_from_arc(ctx.clone()));
            coord.start();

            let coord_a = coord.clone();
            let holder = std::thread::spawn(move || {
                coord_a.force_check_point(TriggerInfo::ForcedByOperator)
            });

            std::thread::sleep(Duration::from_millis(50));

            let coord_b = coord.clone();
            let ctx_b = ctx.clone();
            let joiner = std::thread::spawn(move || {
                let _ = ctx_b;
                coord_b.try_check_point_with_timeout(TriggerInfo::Scheduled, || false)
            });

            std::thread::sleep(Duration::from_millis(50));
            ctx.release_flush();

            let held_result = holder.join().unwrap();
            let joined_result = joiner.join().unwrap();

            assert_eq!(held_result.unwrap(), 42);
            assert_eq!(joined_result.unwrap(), 42);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
            assert_eq!(calls.append.load(Ordering::SeqCst), 1);
        }
    }

    mod shutdown {
        use super::*;

        #[test]
        fn triggers_after_shutdown_are_no_ops() {
            let ctx = FakeContext::new();
            let calls = ctx.calls.clone();
            let coord = coordinator(ctx);
            coord.start();

            coord.shutdown();
            let result = coord.force_check_point(TriggerInfo::Shutdown);

            assert_eq!(result.unwrap(), NO_TX);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn shutdown_waits_for_running_checkpoint_to_publish() {
            let ctx = Arc::new(FakeContext::new());
            ctx.hold_flush();
            let calls = ctx.calls.clone();
            let coord = Arc::new(coordinator_from_arc(ctx.clone()));
            coord.start();

            let coord_a = coord.clone();
            let holder = std::thread::spawn(move || {
                coord_a.force_check_point(TriggerInfo::ForcedByOperator)
            });

            // Give A a moment to actually acquire the mutex and block in flush.
            std::thread::sleep(Duration::from_millis(50));

            let shutdown_done = Arc::new(AtomicBool::new(false));
            let shutdown_done_writer = shutdown_done.clone();
            let coord_b = coord.clone();
            let shutdowner = std::thread::spawn(move || {
                coord_b.shutdown();
                shutdown_done_writer.store(true, Ordering::SeqCst);
            });

            // shutdown() must still be blocked behind A's in-flight flush.
            std::thread::sleep(Duration::from_millis(50));
            assert!(!shutdown_done.load(Ordering::SeqCst));

            ctx.release_flush();

            let held_result = holder.join().unwrap();
            shutdowner.join().unwrap();

            assert!(shutdown_done.load(Ordering::SeqCst));
            assert_eq!(held_result.unwrap(), 42);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
            assert_eq!(calls.append.load(Ordering::SeqCst), 1);
            assert_eq!(
                coord.latest_check_point_info().committed_tx_id(),
                Some(42)
            );

            // Shutdown is now latched; any further trigger is a no-op.
            let after = coord.force_check_point(TriggerInfo::ForcedByOperator);
            assert_eq!(after.unwrap(), NO_TX);
            assert_eq!(calls.flush.load(Ordering::SeqCst), 1);
        }
    }

    fn coordinator_from_arc(
        ctx: Arc<FakeContext>,
    ) -> Coordinator<ArcContext, SizeAndAgeThreshold> {
        let threshold = SizeAndAgeThreshold::new(&CheckpointConfig::default());
        Coordinator::new(ArcContext(ctx), threshold)
    }

    /// `Coordinator<C, _>` requires `C: 'static`, which an `Arc<FakeContext>`
    /// satisfies but which a borrowed `&FakeContext` would not; this newtype
    /// lets tests share one `FakeContext` between the coordinator and the
    /// assertions that inspect its call counters.
    struct ArcContext(Arc<FakeContext>);

    impl TxIdStore for ArcContext {
        fn get_last_closed_transaction(&self) -> (TransactionId, LogPosition) {
            self.0.get_last_closed_transaction()
        }
    }
    impl FlushOperation for ArcContext {
        fn flush_and_force(&self, cursor: &mut dyn CursorContext) -> io::Result<FlushStats> {
            self.0.flush_and_force(cursor)
        }
    }
    impl CheckpointAppender for ArcContext {
        fn append_checkpoint(
            &self,
            tx: &TransactionId,
            kernel_version: KernelVersion,
            log_pos: &LogPosition,
            instant: std::time::SystemTime,
            trigger: &TriggerInfo,
        ) -> io::Result<()> {
            self.0
                .append_checkpoint(tx, kernel_version, log_pos, instant, trigger)
        }
    }
    impl LogPruner for ArcContext {
        fn prune_logs(&self, up_to_log_version: u64) -> io::Result<()> {
            self.0.prune_logs(up_to_log_version)
        }
    }
    impl PanicSignal for ArcContext {
        fn assert_no_panic(&self) -> Result<(), DatabasePanicked> {
            self.0.assert_no_panic()
        }
    }
    impl IoController for ArcContext {
        fn is_enabled(&self) -> bool {
            self.0.is_enabled()
        }
        fn configured_limit(&self) -> i64 {
            self.0.configured_limit()
        }
    }
    impl KernelVersionProvider for ArcContext {
        fn kernel_version(&self) -> KernelVersion {
            self.0.kernel_version()
        }
    }
    impl CursorContextFactory for ArcContext {
        type Context = FakeCursor;
        fn create(&self, tag: &str) -> Self::Context {
            self.0.create(tag)
        }
    }
}
