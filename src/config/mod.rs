//! Command-Line Configuration
//!
//! The harness takes exactly eight positional arguments, in the order
//! operators have always passed them: group address, port, passive listener
//! count, active probe count, per-wait timeout, inter-probe sleep, max
//! retries, and the alert script path (or `null` for none). Anything else
//! prints usage and exits non-zero before a single task starts.

pub mod types;
