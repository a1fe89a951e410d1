//! UDP Discovery Harness Library
//!
//! This library crate defines the core modules of a diagnostic tool that
//! stress-tests and monitors UDP-broadcast peer discovery for a clustered
//! messaging deployment. It serves as the foundation for the binary
//! executable (`main.rs`).
//!
//! ## Architecture Modules
//! The tool is composed of small, loosely coupled subsystems:
//!
//! - **`report`**: The clock-stamped operator log. Every observation the tool
//!   makes surfaces as one timestamped line on a single shared stream.
//! - **`discovery`**: The UDP session glue. Owns the socket lifecycle, the
//!   connector set derived from datagram sources, and the wait-for-broadcast
//!   primitive the probes block on.
//! - **`passive`**: Long-lived listeners that observe ongoing discovery
//!   traffic, each feeding a heartbeat tracker.
//! - **`monitor`**: The liveness sweep that flags trackers which have gone
//!   silent for longer than the configured limit.
//! - **`probe`**: Active workers that repeatedly open brand-new discovery
//!   sessions and verify a fresh socket still receives broadcasts, with a
//!   bounded or unbounded retry budget per cycle.
//! - **`alert`**: The fire-and-forget script hook invoked on the first failed
//!   wait of a probe cycle.
//! - **`config`**: Positional command-line argument parsing.

pub mod alert;
pub mod config;
pub mod discovery;
pub mod monitor;
pub mod passive;
pub mod probe;
pub mod report;
