//! Nodewatch Client - HTTP clients for the registry and the local mesh participant
//!
//! This crate provides:
//! - HTTP client with timeouts and status handling
//! - Registry client: shuffled directory listing and signed bulk deregistration
//! - `MeshParticipant` implementation over the participant's control API
//! - Wire models for both APIs

pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod model;
pub mod participant;
pub mod registry;

pub use config::{HttpClientConfig, ParticipantClientConfig, RegistryClientConfig};
pub use error::ClientError;
pub use http::HttpClient;
pub use model::{DirectoryEntry, ServiceAddress};
pub use participant::HttpParticipant;
pub use registry::RegistryClient;
