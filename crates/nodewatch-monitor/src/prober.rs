//! Liveness prober
//!
//! Probes one node at a time through the local mesh participant:
//! 1. open a transport to the node, bounded by the setup timeout
//! 2. run the client application against it and collect a connection summary
//! 3. wait the post-settle delay, classify, and release the transport
//!
//! The transport opened in step 1 is removed exactly once on every path that
//! got past step 1.

use std::sync::Arc;
use std::time::Duration;

use nodewatch_common::{
    DEFAULT_CLIENT_APP, DEFAULT_TRANSPORT_TYPE, MeshParticipant, NodeIdentity, NodewatchError,
    ParticipantError,
};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::outcome::{ProbeOutcome, SessionError, SessionResult, classify};

/// Timings and names used by each probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Transport type opened to the node (default: "dmsg")
    pub transport_type: String,
    /// Client application run against the node (default: "vpn-client")
    pub client_app: String,
    /// Setup budget handed to the participant (default: 10s)
    pub setup_timeout: Duration,
    /// Extra local wait past `setup_timeout` before giving up on setup (default: 2s)
    pub setup_grace: Duration,
    /// Time the app runs before its error state is read (default: 15s)
    pub settle_interval: Duration,
    /// Time between reading the summary and stopping the app (default: 2s)
    pub drain_interval: Duration,
    /// Delay after the session before classifying (default: 4s)
    pub post_settle_delay: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            transport_type: DEFAULT_TRANSPORT_TYPE.to_string(),
            client_app: DEFAULT_CLIENT_APP.to_string(),
            setup_timeout: Duration::from_secs(10),
            setup_grace: Duration::from_secs(2),
            settle_interval: Duration::from_secs(15),
            drain_interval: Duration::from_secs(2),
            post_settle_delay: Duration::from_secs(4),
        }
    }
}

impl ProbeConfig {
    /// All waits set to zero, for driving probes in tests
    pub fn immediate() -> Self {
        Self {
            setup_timeout: Duration::from_millis(50),
            setup_grace: Duration::from_millis(50),
            settle_interval: Duration::ZERO,
            drain_interval: Duration::ZERO,
            post_settle_delay: Duration::ZERO,
            ..Default::default()
        }
    }
}

/// Probes nodes through a shared mesh participant
pub struct LivenessProber<P: MeshParticipant> {
    participant: Arc<P>,
    config: ProbeConfig,
}

impl<P: MeshParticipant> LivenessProber<P> {
    pub fn new(participant: Arc<P>, config: ProbeConfig) -> Self {
        Self {
            participant,
            config,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe one node and classify it
    pub async fn probe(&self, node: &NodeIdentity) -> ProbeOutcome {
        let transport = &self.config.transport_type;

        // The participant enforces setup_timeout itself. The local bound only
        // catches a participant that stops answering, so a transport that comes
        // up right at the deadline is still returned and released below.
        let setup = timeout(
            self.config.setup_timeout + self.config.setup_grace,
            self.participant
                .add_transport(node, transport, self.config.setup_timeout),
        )
        .await
        .unwrap_or(Err(ParticipantError::Timeout));

        let handle = match setup {
            Ok(handle) => handle,
            Err(ParticipantError::Unavailable(reason)) => {
                warn!(
                    node = %node,
                    reason = %reason,
                    "Local participant unavailable, probe inconclusive"
                );
                return ProbeOutcome::Inconclusive;
            }
            Err(e) => {
                let err = NodewatchError::ProbeSetupFailure {
                    node: *node,
                    reason: e.to_string(),
                };
                warn!(node = %node, error = %err, "Failed to establish {} transport", transport);
                return ProbeOutcome::Dead;
            }
        };

        info!(node = %node, "Established {} transport", transport);

        let session = self.run_session(node).await;
        sleep(self.config.post_settle_delay).await;

        let outcome = classify(&session);
        if let Err(e) = &session {
            let err = NodewatchError::ProbeSessionError {
                node: *node,
                kind: e.to_string(),
            };
            info!(node = %node, error = %err, outcome = ?outcome, "Session error on {} transport", transport);
        }

        if let Err(e) = self.participant.remove_transport(&handle).await {
            warn!(
                node = %node,
                transport_id = %handle.id,
                error = %e,
                "Error removing {} transport",
                transport
            );
        }

        debug!(node = %node, outcome = ?outcome, "Probe finished");
        outcome
    }

    /// Run the client app against `node`.
    ///
    /// Once the app has started it is stopped again on every path.
    async fn run_session(&self, node: &NodeIdentity) -> SessionResult {
        let app = self.config.client_app.as_str();

        self.participant.set_app_target(app, node).await?;
        self.participant.start_app(app).await?;

        let observed = self.observe_app(app).await;
        if observed.is_ok() {
            sleep(self.config.drain_interval).await;
        }

        match (observed, self.participant.stop_app(app).await) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(e)) => Err(SessionError::Participant(e)),
            (Err(session_err), Err(stop_err)) => {
                warn!(node = %node, error = %stop_err, "Failed to stop {} after session error", app);
                Err(session_err)
            }
            (Err(session_err), Ok(())) => Err(session_err),
        }
    }

    async fn observe_app(&self, app: &str) -> SessionResult {
        sleep(self.config.settle_interval).await;

        match self.participant.get_app_error(app).await {
            Ok(Some(fault)) => return Err(fault.into()),
            Ok(None) => {}
            Err(e) => debug!(app = %app, error = %e, "Could not read app error state"),
        }

        Ok(self.participant.get_app_connection_summary(app).await?)
    }
}
