//! Nodewatch Common - Shared types, traits, and errors
//!
//! This crate provides the foundational types used across all Nodewatch components:
//! - Node and monitor key material
//! - The error taxonomy
//! - The mesh participant capability trait
//! - Service constants

pub mod error;
pub mod identity;
pub mod macros;
pub mod participant;

// Re-exports for convenience
pub use error::NodewatchError;
pub use identity::{IdentityError, MonitorIdentity, NodeIdentity, SecretKey, Signature};
pub use participant::{
    AppFault, ConnectionSummary, MeshParticipant, ParticipantError, TransportHandle,
};

/// Service type monitored by default
pub const DEFAULT_SERVICE_TYPE: &str = "vpn";

/// Client application used to exercise a node
pub const DEFAULT_CLIENT_APP: &str = "vpn-client";

/// Transport type opened to each probed node
pub const DEFAULT_TRANSPORT_TYPE: &str = "dmsg";

/// Number of dead nodes sent to the registry in one deregistration request
pub const DEFAULT_FLUSH_THRESHOLD: usize = 10;
