//! Probe outcomes and the liveness classification policy
//!
//! Reachability, not perfect service, defines aliveness: a node that answers
//! with a setup-node or policy refusal is still alive. Everything else that
//! goes wrong in a session collapses to dead, except failures of the local
//! participant itself, which say nothing about the remote node.

use std::time::Duration;

use nodewatch_common::{AppFault, ConnectionSummary, ParticipantError};

/// Final verdict of probing one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The node serviced the probe. Latency is informational only.
    Alive { latency: Option<Duration> },
    /// The node failed to service the probe and should be deregistered
    Dead,
    /// The local participant could not run the probe; the node is left alone
    Inconclusive,
}

impl ProbeOutcome {
    pub fn is_dead(&self) -> bool {
        matches!(self, ProbeOutcome::Dead)
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, ProbeOutcome::Alive { .. })
    }
}

/// How a client session ended when it did not produce a summary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("setup node unreachable")]
    SetupNodeUnreachable,

    #[error("not permitted")]
    NotPermitted,

    #[error("server offline")]
    ServerOffline,

    #[error("app error: {0}")]
    App(String),

    #[error(transparent)]
    Participant(#[from] ParticipantError),
}

impl From<AppFault> for SessionError {
    fn from(fault: AppFault) -> Self {
        match fault {
            AppFault::SetupNodeUnreachable => SessionError::SetupNodeUnreachable,
            AppFault::NotPermitted => SessionError::NotPermitted,
            AppFault::ServerOffline => SessionError::ServerOffline,
            AppFault::Unrecognized(message) => SessionError::App(message),
        }
    }
}

pub type SessionResult = Result<Vec<ConnectionSummary>, SessionError>;

/// Reduce a finished session to an outcome
pub fn classify(session: &SessionResult) -> ProbeOutcome {
    match session {
        Ok(summary) => ProbeOutcome::Alive {
            latency: summary.first().and_then(ConnectionSummary::latency),
        },
        Err(SessionError::SetupNodeUnreachable | SessionError::NotPermitted) => {
            ProbeOutcome::Alive { latency: None }
        }
        Err(SessionError::Participant(ParticipantError::Unavailable(_))) => {
            ProbeOutcome::Inconclusive
        }
        Err(_) => ProbeOutcome::Dead,
    }
}
