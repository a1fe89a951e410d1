use super::types::BeaconTracker;
use crate::discovery::session::DiscoverySession;
use crate::discovery::types::{BroadcastEndpoint, DiscoveryListener};
use crate::report::service::ReportLog;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Bridges a discovery session's events onto a heartbeat tracker.
pub struct TrackingListener {
    tracker: Arc<BeaconTracker>,
    report: Arc<ReportLog>,
}

impl TrackingListener {
    pub fn new(tracker: Arc<BeaconTracker>, report: Arc<ReportLog>) -> Arc<Self> {
        Arc::new(Self { tracker, report })
    }
}

impl DiscoveryListener for TrackingListener {
    fn connectors_changed(&self, count: usize) {
        if self.tracker.is_verbose() {
            self.report.log(format!(
                "Listener {} saw a connector change, current list size :: {}",
                self.tracker.id(),
                count
            ));
        }
    }

    fn broadcast_received(&self) {
        if self.tracker.clear_suspecting() {
            self.report.log(format!(
                "Listener {} receiving data again after {} ms of inactivity",
                self.tracker.id(),
                self.tracker.silence().as_millis()
            ));
        }
        self.tracker.mark_received();
    }
}

/// The fixed set of long-lived observer sessions.
pub struct ListenerPool {
    /// Kept alive for the process lifetime; the sessions are never stopped.
    _sessions: Vec<DiscoverySession>,
    trackers: Vec<Arc<BeaconTracker>>,
}

impl ListenerPool {
    /// Creates and starts `count` passive listeners on the discovery group.
    ///
    /// All listeners must come up cleanly before monitoring begins, so the
    /// first start failure aborts the whole pool with an error the caller
    /// treats as fatal.
    pub async fn start(
        count: usize,
        endpoint: BroadcastEndpoint,
        session_timeout: Duration,
        report: Arc<ReportLog>,
    ) -> Result<Self> {
        let mut sessions = Vec::with_capacity(count);
        let mut trackers = Vec::with_capacity(count);

        for id in 0..count {
            let tracker = BeaconTracker::new(id, true);
            let session =
                DiscoverySession::new(format!("listener-{}", id), endpoint, session_timeout);
            session.register_listener(TrackingListener::new(tracker.clone(), report.clone()));
            session
                .start()
                .await
                .with_context(|| format!("passive listener {} failed to start", id))?;

            trackers.push(tracker);
            sessions.push(session);
        }

        tracing::info!("Started {} passive listeners on {}", count, endpoint);

        Ok(Self {
            _sessions: sessions,
            trackers,
        })
    }

    pub fn trackers(&self) -> &[Arc<BeaconTracker>] {
        &self.trackers
    }
}
