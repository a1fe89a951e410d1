use crate::passive::types::BeaconTracker;
use crate::report::service::ReportLog;

use std::sync::Arc;
use std::time::Duration;

/// Cadence of the liveness sweep.
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Watches every heartbeat tracker and reports sustained silence.
///
/// Advisory only: a suspected listener keeps running, and the warning
/// repeats on every sweep until traffic resumes. The receive callback owns
/// clearing the flag.
pub struct LivenessMonitor {
    trackers: Vec<Arc<BeaconTracker>>,
    silence_limit: Duration,
    report: Arc<ReportLog>,
}

impl LivenessMonitor {
    pub fn new(
        trackers: Vec<Arc<BeaconTracker>>,
        silence_limit: Duration,
        report: Arc<ReportLog>,
    ) -> Self {
        Self {
            trackers,
            silence_limit,
            report,
        }
    }

    /// Inspects every tracker once.
    pub fn sweep(&self) {
        for tracker in &self.trackers {
            let silence = tracker.silence();
            if silence > self.silence_limit {
                tracker.begin_suspecting();
                self.report.log(format!(
                    "Listener {} did not receive a packet for {} ms",
                    tracker.id(),
                    silence.as_millis()
                ));
            }
        }
    }

    /// Runs the sweep forever on a fixed cadence. Nothing inside a sweep can
    /// fail, so the loop never exits; this doubles as the process's main
    /// task.
    pub async fn run(self) -> ! {
        tracing::info!(
            "Liveness monitor watching {} listeners (silence limit {} ms)",
            self.trackers.len(),
            self.silence_limit.as_millis()
        );

        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            self.sweep();
        }
    }
}
