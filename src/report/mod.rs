//! Operator Report Log
//!
//! The human-readable output channel of the harness. Internal diagnostics go
//! through `tracing`; the lines an operator actually watches for (silence
//! warnings, probe failures, recoveries) go through [`service::ReportLog`],
//! stamped with wall-clock time and serialized onto a single stream.

pub mod service;
