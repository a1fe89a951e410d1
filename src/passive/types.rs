use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Heartbeat record for one discovery listener.
///
/// Created once at startup and alive for the whole process. Two tasks touch
/// it: the owning session's receive callback refreshes `last_seen_ms` and
/// clears `suspecting`, while the liveness monitor reads the silence and sets
/// `suspecting`. Cross-task visibility goes through the atomics; no lock is
/// needed.
pub struct BeaconTracker {
    id: usize,
    /// Whether connector-change events for this tracker are worth a report
    /// line. Probe sessions register non-verbose trackers purely so their
    /// session has a listener.
    verbose: bool,
    anchor: Instant,
    /// Milliseconds since `anchor` at the last received broadcast.
    last_seen_ms: AtomicU64,
    /// Advisory flag: "this listener has not received data within its
    /// timeout window". Never gates behavior beyond logging.
    suspecting: AtomicBool,
}

impl BeaconTracker {
    pub fn new(id: usize, verbose: bool) -> Arc<Self> {
        Arc::new(Self {
            id,
            verbose,
            anchor: Instant::now(),
            last_seen_ms: AtomicU64::new(0),
            suspecting: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn now_ms(&self) -> u64 {
        self.anchor.elapsed().as_millis() as u64
    }

    /// Refreshes the last-seen stamp to now.
    pub fn mark_received(&self) {
        self.last_seen_ms.store(self.now_ms(), Ordering::Release);
    }

    /// How long this listener has gone without a broadcast.
    pub fn silence(&self) -> Duration {
        let last_seen = self.last_seen_ms.load(Ordering::Acquire);
        Duration::from_millis(self.now_ms().saturating_sub(last_seen))
    }

    pub fn begin_suspecting(&self) {
        self.suspecting.store(true, Ordering::Release);
    }

    /// Clears the suspicion flag, returning whether it was set. The receive
    /// callback uses the return value to log the recovery exactly once.
    pub fn clear_suspecting(&self) -> bool {
        self.suspecting.swap(false, Ordering::AcqRel)
    }

    pub fn is_suspecting(&self) -> bool {
        self.suspecting.load(Ordering::Acquire)
    }
}
