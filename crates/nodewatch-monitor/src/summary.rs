//! Per-pass results

use std::time::Duration;

use nodewatch_common::NodeIdentity;
use tracing::info;

/// What one pass over the directory observed and did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Nodes classified alive
    pub online_count: usize,
    /// Nodes a probe was attempted for
    pub probed: usize,
    /// Nodes that could not be judged because the local participant failed
    pub inconclusive_count: usize,
    /// Every node classified dead, whether or not its deregistration succeeded
    pub all_dead: Vec<NodeIdentity>,
    /// Size of each deregistration request, in send order
    pub batch_sizes: Vec<usize>,
    /// Deregistration requests that failed
    pub failed_flushes: usize,
    /// Nodes left unprobed because shutdown cut the pass short
    pub skipped: usize,
    /// The directory could not be read, nothing was probed
    pub directory_unavailable: bool,
    pub elapsed: Duration,
}

impl PassSummary {
    pub fn directory_unavailable() -> Self {
        Self {
            directory_unavailable: true,
            ..Default::default()
        }
    }

    pub fn dead_count(&self) -> usize {
        self.all_dead.len()
    }

    /// Dead identities as comma separated hex, in the order they were found
    pub fn dead_nodes(&self) -> String {
        self.all_dead
            .iter()
            .map(NodeIdentity::to_hex)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn log(&self) {
        if self.directory_unavailable {
            info!("Pass skipped, directory unavailable");
            return;
        }
        info!(
            probed = self.probed,
            online = self.online_count,
            dead = self.dead_count(),
            dead_nodes = %self.dead_nodes(),
            inconclusive = self.inconclusive_count,
            skipped = self.skipped,
            flushes = self.batch_sizes.len(),
            failed_flushes = self.failed_flushes,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Pass complete"
        );
    }
}
