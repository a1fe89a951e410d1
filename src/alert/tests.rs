//! Alert Hook Tests
//!
//! ## Test Scopes
//! - **Script hook**: invocation is logged, spawn failures are absorbed.
//! - **No-op hook**: the `null` sentinel path does nothing, quietly.

#[cfg(test)]
mod tests {
    use crate::alert::service::{AlertHook, NoAlert, ScriptAlert, alert_hook};
    use crate::report::service::LogCapture;
    use std::path::Path;

    // ============================================================
    // SCRIPT ALERT TESTS
    // ============================================================

    #[test]
    fn test_script_alert_logs_the_invocation() {
        let (report, capture) = LogCapture::new();
        let alert = ScriptAlert::new("/bin/true", report);

        alert.invoke(1);

        let lines = capture.lines_containing("Running alert script /bin/true");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("(attempt 1)"));
    }

    #[test]
    fn test_missing_script_is_absorbed() {
        let (report, _capture) = LogCapture::new();
        let alert = ScriptAlert::new("/definitely/not/a/script", report);

        // Spawn failure must not panic or surface to the caller.
        alert.invoke(1);
    }

    // ============================================================
    // NO-OP HOOK TESTS
    // ============================================================

    #[test]
    fn test_no_alert_is_silent() {
        NoAlert.invoke(1);
        NoAlert.invoke(42);
    }

    #[test]
    fn test_hook_selection_from_optional_path() {
        let (report, capture) = LogCapture::new();

        let none = alert_hook(None, report.clone());
        none.invoke(1);
        assert!(capture.lines().is_empty());

        let some = alert_hook(Some(Path::new("/bin/true")), report);
        some.invoke(1);
        assert_eq!(capture.lines_containing("Running alert script").len(), 1);
    }
}
