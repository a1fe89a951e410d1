use crate::discovery::types::BroadcastEndpoint;
use std::time::Duration;

/// How many failed waits a probe cycle tolerates before giving up.
///
/// Carried as a tagged value; the command line's "zero or negative means
/// retry forever" convention is translated once at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    Bounded(u32),
    Unbounded,
}

impl RetryBudget {
    /// Translates the CLI integer: positive is a bounded budget, zero or
    /// negative means retry forever.
    pub fn from_limit(limit: i64) -> Self {
        if limit > 0 {
            Self::Bounded(limit as u32)
        } else {
            Self::Unbounded
        }
    }

    /// Whether `attempts` waits have used up the budget. Unbounded budgets
    /// never exhaust.
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        match self {
            Self::Bounded(limit) => attempts >= *limit,
            Self::Unbounded => false,
        }
    }
}

impl std::fmt::Display for RetryBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bounded(limit) => write!(f, "{}", limit),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Immutable settings for one active probe, owned by that probe's task.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub id: usize,
    pub endpoint: BroadcastEndpoint,
    /// Budget for a single wait-for-broadcast attempt.
    pub wait_timeout: Duration,
    /// Optional fixed sleep before each cycle, to stagger load.
    pub pause: Duration,
    pub budget: RetryBudget,
}

/// How one probe cycle ended, with the number of wait attempts performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A broadcast arrived within the retry budget.
    Received { attempts: u32 },
    /// The bounded budget ran out without any traffic.
    GaveUp { attempts: u32 },
}
