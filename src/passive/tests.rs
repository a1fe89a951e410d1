//! Passive Pool Tests
//!
//! Validates heartbeat bookkeeping and pool startup.
//!
//! ## Test Scopes
//! - **Tracker**: silence measurement, refresh, and suspicion transitions.
//! - **Listener bridge**: report lines for recoveries and connector changes,
//!   silent trackers staying silent.
//! - **Pool**: shared-port startup, fail-fast behavior when the port is
//!   unavailable.

#[cfg(test)]
mod tests {
    use crate::discovery::types::{BroadcastEndpoint, DiscoveryListener};
    use crate::passive::service::{ListenerPool, TrackingListener};
    use crate::passive::types::BeaconTracker;
    use crate::report::service::LogCapture;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    fn free_endpoint() -> BroadcastEndpoint {
        let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = probe.local_addr().unwrap().port();
        BroadcastEndpoint::new(Ipv4Addr::LOCALHOST, port)
    }

    // ============================================================
    // BEACON TRACKER TESTS
    // ============================================================

    #[test]
    fn test_silence_grows_until_refreshed() {
        let tracker = BeaconTracker::new(0, true);

        std::thread::sleep(Duration::from_millis(60));
        let before = tracker.silence();
        assert!(before >= Duration::from_millis(50));

        tracker.mark_received();
        assert!(tracker.silence() < before);
    }

    #[test]
    fn test_suspicion_transitions() {
        let tracker = BeaconTracker::new(0, true);
        assert!(!tracker.is_suspecting());

        tracker.begin_suspecting();
        assert!(tracker.is_suspecting());

        // First clear reports the flag was set, second one does not.
        assert!(tracker.clear_suspecting());
        assert!(!tracker.clear_suspecting());
        assert!(!tracker.is_suspecting());
    }

    // ============================================================
    // TRACKING LISTENER TESTS
    // ============================================================

    #[test]
    fn test_recovery_is_logged_once_and_clears_suspicion() {
        let (report, capture) = LogCapture::new();
        let tracker = BeaconTracker::new(7, true);
        let listener = TrackingListener::new(tracker.clone(), report);

        std::thread::sleep(Duration::from_millis(80));
        tracker.begin_suspecting();

        listener.broadcast_received();

        let recoveries = capture.lines_containing("Listener 7 receiving data again");
        assert_eq!(recoveries.len(), 1);
        assert!(recoveries[0].contains("ms of inactivity"));
        assert!(!tracker.is_suspecting());
        // The stamp was refreshed as part of the same event.
        assert!(tracker.silence() < Duration::from_millis(60));

        // A second broadcast without suspicion logs nothing further.
        listener.broadcast_received();
        assert_eq!(
            capture.lines_containing("receiving data again").len(),
            1
        );
    }

    #[test]
    fn test_verbose_listener_reports_connector_changes() {
        let (report, capture) = LogCapture::new();
        let tracker = BeaconTracker::new(3, true);
        let listener = TrackingListener::new(tracker, report);

        listener.connectors_changed(5);

        let lines = capture.lines_containing("Listener 3 saw a connector change");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(":: 5"));
    }

    #[test]
    fn test_silent_tracker_reports_nothing() {
        let (report, capture) = LogCapture::new();
        let tracker = BeaconTracker::new(1000, false);
        let listener = TrackingListener::new(tracker.clone(), report);

        listener.connectors_changed(2);
        listener.broadcast_received();

        assert!(capture.lines().is_empty());
        // The tracker still does its bookkeeping.
        assert!(tracker.silence() < Duration::from_millis(60));
    }

    // ============================================================
    // LISTENER POOL TESTS
    // ============================================================

    #[tokio::test]
    async fn test_pool_starts_all_listeners_on_one_port() {
        let (report, _capture) = LogCapture::new();
        let endpoint = free_endpoint();

        let pool = ListenerPool::start(3, endpoint, Duration::from_secs(5), report)
            .await
            .expect("all listeners should bind the shared port");

        let ids: Vec<usize> = pool.trackers().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(pool.trackers().iter().all(|t| t.is_verbose()));
    }

    #[tokio::test]
    async fn test_pool_listener_refreshes_tracker_on_traffic() {
        let (report, _capture) = LogCapture::new();
        let endpoint = free_endpoint();
        let pool = ListenerPool::start(1, endpoint, Duration::from_secs(5), report)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        let before = pool.trackers()[0].silence();
        assert!(before >= Duration::from_millis(200));

        let sender = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(b"beacon", endpoint.group_addr()).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(pool.trackers()[0].silence() < before);
    }

    #[tokio::test]
    async fn test_pool_startup_fails_when_port_is_unavailable() {
        let (report, _capture) = LogCapture::new();

        // A plain socket without port reuse makes the port unshareable.
        let blocker = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let endpoint = BroadcastEndpoint::new(
            Ipv4Addr::LOCALHOST,
            blocker.local_addr().unwrap().port(),
        );

        let result = ListenerPool::start(2, endpoint, Duration::from_secs(5), report).await;
        assert!(result.is_err(), "startup must fail fast on a bind error");
    }
}
