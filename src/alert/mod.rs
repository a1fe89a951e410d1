//! Alert Hook
//!
//! Fire-and-forget escalation for probe failures. When a brand-new session
//! fails its first wait, the probe invokes the hook once for that cycle,
//! typically to run an operator-supplied diagnostic script. Nothing about
//! the invocation feeds back into the retry state machine.

pub mod service;

#[cfg(test)]
mod tests;
