use super::types::{CycleOutcome, ProbeConfig, RetryBudget};
use crate::alert::service::AlertHook;
use crate::discovery::session::DiscoverySession;
use crate::discovery::types::BroadcastEndpoint;
use crate::passive::service::TrackingListener;
use crate::passive::types::BeaconTracker;
use crate::report::service::ReportLog;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Internal timeout of the short-lived sessions probes open; intentionally
/// much longer than any sensible per-wait timeout so connector expiry never
/// interferes with a cycle.
const PROBE_SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Tracker id registered on probe sessions, outside the passive pool's
/// id range. The tracker is non-verbose and exists purely so the session
/// has a listener.
const PROBE_TRACKER_ID: usize = 1000;

/// One worker of the active pool.
///
/// Runs an endless sequence of cycles, each against a brand-new discovery
/// session, verifying that a fresh socket on the group still receives
/// broadcasts. Probes never coordinate with each other or with the passive
/// pool; the report log is the only thing they share.
pub struct ActiveProbe {
    config: ProbeConfig,
    alert: Arc<dyn AlertHook>,
    report: Arc<ReportLog>,
}

impl ActiveProbe {
    pub fn new(config: ProbeConfig, alert: Arc<dyn AlertHook>, report: Arc<ReportLog>) -> Self {
        Self {
            config,
            alert,
            report,
        }
    }

    /// The probe's outer loop. One iteration is one cycle; a failed cycle is
    /// logged and absorbed, never fatal to the probe.
    pub async fn run(self) {
        tracing::info!("Probe {} started", self.config.id);

        loop {
            if !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
            }

            match self.run_cycle().await {
                Ok(outcome) => {
                    tracing::debug!("Probe {} finished cycle: {:?}", self.config.id, outcome);
                }
                Err(e) => {
                    self.report
                        .log(format!("Probe {} cycle failed: {:#}", self.config.id, e));
                }
            }
        }
    }

    /// One full cycle: open a fresh session, run the retry loop, stop the
    /// session unconditionally.
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let session = DiscoverySession::new(
            format!("probe-{}", self.config.id),
            self.config.endpoint,
            PROBE_SESSION_TIMEOUT,
        );
        session.register_listener(TrackingListener::new(
            BeaconTracker::new(PROBE_TRACKER_ID, false),
            self.report.clone(),
        ));

        let outcome = match session.start().await {
            Ok(()) => Ok(self.wait_for_first_broadcast(&session).await),
            Err(e) => Err(e),
        };

        // Closed on every path, so the next cycle never overlaps this one.
        session.stop();

        outcome
    }

    /// The inner retry loop, counting wait attempts from 1.
    async fn wait_for_first_broadcast(&self, session: &DiscoverySession) -> CycleOutcome {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            if session.wait_for_broadcast(self.config.wait_timeout).await {
                return CycleOutcome::Received { attempts };
            }

            // The alert fires once per cycle, on the first failed wait only.
            if attempts == 1 {
                self.alert.invoke(attempts);
            }

            self.report.log(format!(
                "Probe {}: brand new session received no data, attempt {} of {}",
                self.config.id, attempts, self.config.budget
            ));

            if self.config.budget.is_exhausted(attempts) {
                self.report.log(format!(
                    "Probe {}: giving up retry loop, moving to a fresh session",
                    self.config.id
                ));
                return CycleOutcome::GaveUp { attempts };
            }
        }
    }
}

/// Spawns the fixed set of active probes.
pub struct ProbePool;

impl ProbePool {
    pub fn start(
        count: usize,
        endpoint: BroadcastEndpoint,
        wait_timeout: Duration,
        pause: Duration,
        budget: RetryBudget,
        alert: Arc<dyn AlertHook>,
        report: Arc<ReportLog>,
    ) {
        for id in 0..count {
            let probe = ActiveProbe::new(
                ProbeConfig {
                    id,
                    endpoint,
                    wait_timeout,
                    pause,
                    budget,
                },
                alert.clone(),
                report.clone(),
            );
            tokio::spawn(probe.run());
        }

        tracing::info!("Started {} active probes on {}", count, endpoint);
    }
}
