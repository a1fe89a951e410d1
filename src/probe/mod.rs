//! Active Probe Pool
//!
//! A fixed set of independent workers that stress-test fresh-connection
//! discovery. Each probe loops forever over cycles: open a brand-new
//! session, wait for the first broadcast with a bounded or unbounded retry
//! budget, alert on the first failure, then tear the session down and start
//! over.
//!
//! ## Core Mechanisms
//! - **Cycle state machine**: opening → waiting → (received | gave up) →
//!   closing. The session is stopped on every exit path, including failed
//!   opens, before the next cycle begins.
//! - **Retry budget**: a tagged `Bounded`/`Unbounded` value. Bounded cycles
//!   stop after the configured number of waits; unbounded ones retry until
//!   traffic appears.
//! - **Error absorption**: a failed cycle is logged and the outer loop moves
//!   on; nothing short of process death stops a probe.

pub mod service;
pub mod types;
