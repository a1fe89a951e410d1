use crate::discovery::types::BroadcastEndpoint;
use crate::probe::types::RetryBudget;

use anyhow::{Context, Result};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

/// Literal argument value meaning "no alert script configured".
pub const NO_SCRIPT_SENTINEL: &str = "null";

/// Number of positional arguments the harness requires.
pub const ARG_COUNT: usize = 8;

/// Everything the harness needs, parsed once at startup.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub endpoint: BroadcastEndpoint,
    pub passive_listeners: usize,
    pub active_probes: usize,
    /// Per-wait timeout for probes, doubling as the passive listeners'
    /// silence limit and session timeout.
    pub wait_timeout: Duration,
    /// Fixed sleep each probe takes before opening a cycle.
    pub probe_pause: Duration,
    pub budget: RetryBudget,
    pub alert_script: Option<PathBuf>,
}

impl HarnessConfig {
    /// Parses the positional arguments (program name already stripped).
    pub fn from_args(args: &[String]) -> Result<Self> {
        if args.len() != ARG_COUNT {
            anyhow::bail!("expected {} arguments, got {}", ARG_COUNT, args.len());
        }

        let group: Ipv4Addr = args[0]
            .parse()
            .with_context(|| format!("invalid group address '{}'", args[0]))?;
        let port: u16 = args[1]
            .parse()
            .with_context(|| format!("invalid port '{}'", args[1]))?;
        let passive_listeners: usize = args[2]
            .parse()
            .with_context(|| format!("invalid passive listener count '{}'", args[2]))?;
        let active_probes: usize = args[3]
            .parse()
            .with_context(|| format!("invalid active probe count '{}'", args[3]))?;
        let wait_timeout_ms: u64 = args[4]
            .parse()
            .with_context(|| format!("invalid timeout '{}'", args[4]))?;
        let probe_pause_ms: u64 = args[5]
            .parse()
            .with_context(|| format!("invalid sleep '{}'", args[5]))?;
        let retries: i64 = args[6]
            .parse()
            .with_context(|| format!("invalid max retries '{}'", args[6]))?;
        let alert_script =
            (args[7] != NO_SCRIPT_SENTINEL).then(|| PathBuf::from(&args[7]));

        Ok(Self {
            endpoint: BroadcastEndpoint::new(group, port),
            passive_listeners,
            active_probes,
            wait_timeout: Duration::from_millis(wait_timeout_ms),
            probe_pause: Duration::from_millis(probe_pause_ms),
            budget: RetryBudget::from_limit(retries),
            alert_script,
        })
    }

    /// Usage text printed on a bad invocation.
    pub fn usage(program: &str) -> String {
        format!(
            "Use: {program} group-address group-port passive-listeners active-probes \
             timeout-ms sleep-ms max-retries alert-script\n\
             \n\
             max-retries:: 0 or below means retry forever\n\
             alert-script:: the word '{NO_SCRIPT_SENTINEL}' means no script to run\n\
             example: {program} 231.7.7.7 9876 20 20 10000 0 10 {NO_SCRIPT_SENTINEL}"
        )
    }

    /// One-line settings summary for the report log.
    pub fn describe(&self) -> String {
        format!(
            "Group :: {} passive :: {} active :: {} timeout :: {} ms sleep :: {} ms \
             retries :: {} script :: {}",
            self.endpoint,
            self.passive_listeners,
            self.active_probes,
            self.wait_timeout.as_millis(),
            self.probe_pause.as_millis(),
            self.budget,
            self.alert_script
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
    }
}
