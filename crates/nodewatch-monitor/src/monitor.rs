//! Monitor loop - periodically reconciles the registry against live nodes
//!
//! Each pass fetches the directory, probes every listed node in turn and
//! deregisters the dead ones in batches. Shutdown is observed at the top of
//! each cycle, and optionally before each node.

use std::sync::Arc;
use std::time::{Duration, Instant};

use nodewatch_client::RegistryClient;
use nodewatch_common::{DEFAULT_FLUSH_THRESHOLD, MeshParticipant, MonitorIdentity};
use tracing::{info, warn};

use crate::batcher::{DeadBatch, DeadBatcher};
use crate::outcome::ProbeOutcome;
use crate::prober::{LivenessProber, ProbeConfig};
use crate::shutdown::ShutdownSignal;
use crate::summary::PassSummary;

/// Monitor loop configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Identity presented to the registry on deregistration
    pub identity: MonitorIdentity,
    /// Sleep between passes
    pub cycle_interval: Duration,
    /// Dead nodes per deregistration request
    pub flush_threshold: usize,
    /// Stop probing mid-pass once shutdown is requested
    pub abort_pass_on_shutdown: bool,
    pub probe: ProbeConfig,
}

impl MonitorConfig {
    pub fn new(identity: MonitorIdentity) -> Self {
        Self {
            identity,
            cycle_interval: Duration::from_secs(10 * 60),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            abort_pass_on_shutdown: false,
            probe: ProbeConfig::default(),
        }
    }
}

pub struct Monitor<P: MeshParticipant> {
    config: MonitorConfig,
    registry: RegistryClient,
    prober: LivenessProber<P>,
}

impl<P: MeshParticipant> Monitor<P> {
    pub fn new(config: MonitorConfig, registry: RegistryClient, participant: Arc<P>) -> Self {
        let prober = LivenessProber::new(participant, config.probe.clone());
        Self {
            config,
            registry,
            prober,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run passes until shutdown is observed at the top of a cycle
    pub async fn run(&self, shutdown: ShutdownSignal) {
        info!(
            "Monitor started with cycle interval: {:?}, flush threshold: {}",
            self.config.cycle_interval, self.config.flush_threshold
        );

        loop {
            if shutdown.is_shutdown() {
                info!("Shutdown requested, monitor stopping");
                break;
            }

            let summary = self.run_pass(&shutdown).await;
            summary.log();

            tokio::time::sleep(self.config.cycle_interval).await;
        }
    }

    /// Run one full pass over the directory
    pub async fn run_pass(&self, shutdown: &ShutdownSignal) -> PassSummary {
        let started = Instant::now();

        let nodes = match self.registry.fetch_nodes().await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(error = %e, "Failed to fetch nodes from registry, skipping pass");
                let mut summary = PassSummary::directory_unavailable();
                summary.elapsed = started.elapsed();
                return summary;
            }
        };

        info!(count = nodes.len(), "Starting pass");

        let mut summary = PassSummary::default();
        let mut batcher = DeadBatcher::new(self.config.flush_threshold);

        for (i, node) in nodes.iter().enumerate() {
            if self.config.abort_pass_on_shutdown && shutdown.is_shutdown() {
                summary.skipped = nodes.len() - i;
                info!(skipped = summary.skipped, "Shutdown requested, cutting pass short");
                break;
            }

            summary.probed += 1;
            match self.prober.probe(node).await {
                ProbeOutcome::Alive { latency } => {
                    summary.online_count += 1;
                    info!(node = %node, latency = ?latency, "Node online");
                }
                ProbeOutcome::Dead => {
                    info!(node = %node, "Node dead");
                    batcher.record(*node);
                    summary.all_dead.push(*node);
                }
                ProbeOutcome::Inconclusive => {
                    summary.inconclusive_count += 1;
                }
            }

            if batcher.should_flush() {
                self.flush(batcher.drain(), &mut summary).await;
            }
        }

        let remainder = batcher.drain();
        if !remainder.is_empty() {
            self.flush(remainder, &mut summary).await;
        }

        summary.elapsed = started.elapsed();
        summary
    }

    async fn flush(&self, batch: DeadBatch, summary: &mut PassSummary) {
        summary.batch_sizes.push(batch.len());

        match self
            .registry
            .deregister(batch.as_slice(), &self.config.identity)
            .await
        {
            Ok(()) => info!(count = batch.len(), "Deregistered dead nodes"),
            Err(e) => {
                summary.failed_flushes += 1;
                warn!(count = batch.len(), error = %e, "Error deregistering dead nodes");
            }
        }
    }
}
