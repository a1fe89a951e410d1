use crate::report::service::ReportLog;

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Side effect a probe triggers on the first failed wait of a cycle.
///
/// Invoked synchronously from the probe's own task; implementations must
/// return promptly and must not propagate failures.
pub trait AlertHook: Send + Sync {
    fn invoke(&self, attempt: u32);
}

/// Spawns an external diagnostic script with the attempt number as its
/// argument. The child process is never awaited and its exit status is
/// never consulted.
pub struct ScriptAlert {
    script: PathBuf,
    report: Arc<ReportLog>,
}

impl ScriptAlert {
    pub fn new(script: impl Into<PathBuf>, report: Arc<ReportLog>) -> Arc<Self> {
        Arc::new(Self {
            script: script.into(),
            report,
        })
    }

    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl AlertHook for ScriptAlert {
    fn invoke(&self, attempt: u32) {
        self.report.log(format!(
            "Running alert script {} (attempt {})",
            self.script.display(),
            attempt
        ));

        match Command::new(&self.script).arg(attempt.to_string()).spawn() {
            Ok(_child) => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to spawn alert script {}: {}",
                    self.script.display(),
                    e
                );
            }
        }
    }
}

/// The "no script configured" hook.
pub struct NoAlert;

impl AlertHook for NoAlert {
    fn invoke(&self, _attempt: u32) {}
}

/// Builds the hook for an optional script path.
pub fn alert_hook(script: Option<&Path>, report: Arc<ReportLog>) -> Arc<dyn AlertHook> {
    match script {
        Some(script) => ScriptAlert::new(script, report),
        None => Arc::new(NoAlert),
    }
}
