//! Passive Listener Pool
//!
//! A fixed set of long-lived discovery sessions that only observe ongoing
//! traffic. Each session feeds a heartbeat tracker recording when data was
//! last received and whether the listener is currently suspected of silence.
//!
//! ## Core Mechanisms
//! - **Heartbeat tracking**: the receive callback refreshes a last-seen
//!   stamp; the liveness monitor reads it from its own task. Both fields are
//!   atomics, one writer per transition.
//! - **Advisory suspicion**: the `suspecting` flag gates nothing but log
//!   lines. A suspected listener is never torn down; the next broadcast
//!   clears the flag and reports how long the silence lasted.
//! - **Fail-fast startup**: every listener must start cleanly before
//!   monitoring begins; the first failure aborts the process.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
