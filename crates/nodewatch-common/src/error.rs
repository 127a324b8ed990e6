//! Error types for Nodewatch
//!
//! `NodewatchError` is the taxonomy shared by every crate in the workspace.
//! Only `DirectoryUnavailable` and `ParticipantStartupFailure` change control
//! flow (skip a pass, abort the process); everything else is logged per node
//! and the pass carries on.

use crate::identity::{IdentityError, NodeIdentity};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum NodewatchError {
    #[error("directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("failed to establish transport to {node}: {reason}")]
    ProbeSetupFailure { node: NodeIdentity, reason: String },

    #[error("client session to {node} failed: {kind}")]
    ProbeSessionError { node: NodeIdentity, kind: String },

    #[error("deregistration failed{}: {reason}", .status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    DeregisterFailure { status: Option<u16>, reason: String },

    #[error("mesh participant startup failed: {0}")]
    ParticipantStartupFailure(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid identity: {0}")]
    Identity(#[from] IdentityError),
}

impl NodewatchError {
    /// HTTP status attached to a failed deregistration, if the registry answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            NodewatchError::DeregisterFailure { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error must stop the process
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NodewatchError::ParticipantStartupFailure(_) | NodewatchError::ConfigError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NodewatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NodewatchError::DirectoryUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "directory unavailable: connection refused");

        let err = NodewatchError::DeregisterFailure {
            status: Some(500),
            reason: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "deregistration failed with status 500: internal error"
        );

        let err = NodewatchError::DeregisterFailure {
            status: None,
            reason: "timed out".to_string(),
        };
        assert_eq!(err.to_string(), "deregistration failed: timed out");
    }

    #[test]
    fn test_status_accessor() {
        let err = NodewatchError::DeregisterFailure {
            status: Some(403),
            reason: String::new(),
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(
            NodewatchError::DirectoryUnavailable(String::new()).status(),
            None
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(NodewatchError::ParticipantStartupFailure("down".into()).is_fatal());
        assert!(!NodewatchError::DirectoryUnavailable("down".into()).is_fatal());
    }

    #[test]
    fn test_from_identity_error() {
        let err: NodewatchError = IdentityError::InvalidHex("x".into()).into();
        assert!(matches!(err, NodewatchError::Identity(_)));
    }
}
