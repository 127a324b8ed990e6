//! Capability interface of the local mesh participant
//!
//! The monitor never speaks the mesh transport protocol itself. It drives a
//! local participant that can open transports to peers and run a client
//! application against them. Implementations translate whatever the
//! participant reports into the closed set of types below, so callers match
//! on variants instead of message text.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::NodeIdentity;

/// Errors returned by participant operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantError {
    /// The local participant itself could not be reached
    #[error("participant unavailable: {0}")]
    Unavailable(String),

    /// The participant answered but refused or failed the operation
    #[error("participant rejected operation: {0}")]
    Rejected(String),

    #[error("participant operation timed out")]
    Timeout,
}

/// Error state reported by a running client application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppFault {
    /// No route setup node could be reached; the remote node itself answered
    SetupNodeUnreachable,
    /// The remote node refused the session by policy
    NotPermitted,
    /// The remote server did not respond
    ServerOffline,
    /// Any other error text
    Unrecognized(String),
}

const SETUP_NODE_UNREACHABLE_MSG: &str = "setup node unreachable";
const NOT_PERMITTED_MSG: &str = "not permitted";
const SERVER_OFFLINE_MSG: &str = "server offline";

impl AppFault {
    /// Map application error text to a fault. Empty text means no error.
    pub fn from_message(message: &str) -> Option<Self> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let lower = message.to_lowercase();
        let fault = if lower.contains(SETUP_NODE_UNREACHABLE_MSG) {
            AppFault::SetupNodeUnreachable
        } else if lower.contains(NOT_PERMITTED_MSG) {
            AppFault::NotPermitted
        } else if lower.contains(SERVER_OFFLINE_MSG) {
            AppFault::ServerOffline
        } else {
            AppFault::Unrecognized(message.to_string())
        };
        Some(fault)
    }

    pub fn as_str(&self) -> &str {
        match self {
            AppFault::SetupNodeUnreachable => SETUP_NODE_UNREACHABLE_MSG,
            AppFault::NotPermitted => NOT_PERMITTED_MSG,
            AppFault::ServerOffline => SERVER_OFFLINE_MSG,
            AppFault::Unrecognized(message) => message,
        }
    }
}

impl std::fmt::Display for AppFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle of a transport opened by the participant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransportHandle {
    pub id: Uuid,
    pub remote: NodeIdentity,
}

/// Per-connection statistics of a client application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSummary {
    #[serde(default)]
    pub is_alive: bool,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(default)]
    pub upload_speed: u32,
    #[serde(default)]
    pub download_speed: u32,
    #[serde(default)]
    pub bandwidth_sent: u64,
    #[serde(default)]
    pub bandwidth_received: u64,
    #[serde(default)]
    pub error: String,
}

impl ConnectionSummary {
    pub fn latency(&self) -> Option<Duration> {
        self.latency_ms.map(Duration::from_millis)
    }
}

/// Operations the prober needs from the local mesh participant
#[async_trait::async_trait]
pub trait MeshParticipant: Send + Sync {
    /// Open a transport of `transport_type` to `peer`, giving up after `timeout`
    async fn add_transport(
        &self,
        peer: &NodeIdentity,
        transport_type: &str,
        timeout: Duration,
    ) -> Result<TransportHandle, ParticipantError>;

    async fn remove_transport(&self, handle: &TransportHandle) -> Result<(), ParticipantError>;

    /// Point the client application at `peer`
    async fn set_app_target(&self, app: &str, peer: &NodeIdentity) -> Result<(), ParticipantError>;

    async fn start_app(&self, app: &str) -> Result<(), ParticipantError>;

    async fn stop_app(&self, app: &str) -> Result<(), ParticipantError>;

    /// Current error state of the application, `None` when it is healthy
    async fn get_app_error(&self, app: &str) -> Result<Option<AppFault>, ParticipantError>;

    async fn get_app_connection_summary(
        &self,
        app: &str,
    ) -> Result<Vec<ConnectionSummary>, ParticipantError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_fault_from_message() {
        assert_eq!(AppFault::from_message(""), None);
        assert_eq!(AppFault::from_message("   "), None);
        assert_eq!(
            AppFault::from_message("Setup node unreachable"),
            Some(AppFault::SetupNodeUnreachable)
        );
        assert_eq!(
            AppFault::from_message("dial failed: not permitted"),
            Some(AppFault::NotPermitted)
        );
        assert_eq!(
            AppFault::from_message("server offline"),
            Some(AppFault::ServerOffline)
        );
        assert_eq!(
            AppFault::from_message("tun device busy"),
            Some(AppFault::Unrecognized("tun device busy".to_string()))
        );
    }

    #[test]
    fn test_connection_summary_latency() {
        let summary: ConnectionSummary =
            serde_json::from_str(r#"{"is_alive": true, "latency_ms": 120}"#).unwrap();
        assert_eq!(summary.latency(), Some(Duration::from_millis(120)));

        let summary: ConnectionSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.latency(), None);
    }
}
