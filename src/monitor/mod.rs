//! Liveness Monitor
//!
//! A periodic sweep over every heartbeat tracker. Listeners silent for
//! longer than the configured limit are flagged as suspecting and reported;
//! nothing is ever restarted or torn down on the monitor's account.

pub mod service;
