//! Nodewatch monitor
//!
//! Probes every node the registry advertises through the local mesh
//! participant and deregisters the ones that no longer answer.

pub mod batcher;
pub mod monitor;
pub mod outcome;
pub mod prober;
pub mod shutdown;
pub mod summary;

#[cfg(test)]
mod testing;

pub use batcher::{DeadBatch, DeadBatcher};
pub use monitor::{Monitor, MonitorConfig};
pub use outcome::{ProbeOutcome, SessionError, classify};
pub use prober::{LivenessProber, ProbeConfig};
pub use shutdown::{ShutdownSignal, shutdown_on_signal};
pub use summary::PassSummary;
