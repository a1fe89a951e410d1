//! Discovery Session Glue
//!
//! Owns the UDP plumbing underneath the harness: binding a socket to the
//! discovery group, receiving broadcast datagrams, and exposing the two
//! things the rest of the harness cares about: callback events and a timed
//! wait-for-broadcast primitive.
//!
//! ## Core Mechanisms
//! - **Shared group port**: sockets are built with address/port reuse so any
//!   number of listeners and probes in one process can observe the same
//!   discovery group.
//! - **Connector set**: each session tracks the distinct source addresses it
//!   hears from, expiring entries that stay quiet past the session timeout.
//!   Datagram payloads are never inspected.
//! - **First-broadcast latch**: a watch channel flips once the first datagram
//!   arrives, so waiters resolve immediately on sessions that already saw
//!   traffic.

pub mod session;
pub mod types;
