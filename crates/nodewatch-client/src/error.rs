//! Client error types

use nodewatch_common::{NodewatchError, ParticipantError};

/// Errors that can occur during an HTTP exchange
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timeout")]
    Timeout,

    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Connect(e.to_string())
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_builder() {
            ClientError::InvalidUrl(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::RequestFailed {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            ClientError::Http(e.to_string())
        }
    }
}

impl From<ClientError> for ParticipantError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Connect(reason) => ParticipantError::Unavailable(reason),
            ClientError::Timeout => ParticipantError::Timeout,
            other => ParticipantError::Rejected(other.to_string()),
        }
    }
}

impl From<ClientError> for NodewatchError {
    fn from(e: ClientError) -> Self {
        NodewatchError::DirectoryUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = ClientError::RequestFailed {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with status 500: boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_into_participant_error() {
        let err: ParticipantError = ClientError::Connect("refused".into()).into();
        assert_eq!(err, ParticipantError::Unavailable("refused".into()));

        let err: ParticipantError = ClientError::Timeout.into();
        assert_eq!(err, ParticipantError::Timeout);

        let err: ParticipantError = ClientError::RequestFailed {
            status: 404,
            body: "no such app".into(),
        }
        .into();
        assert!(matches!(err, ParticipantError::Rejected(_)));
    }
}
