//! Wire models for the registry and the participant control API

use nodewatch_common::{IdentityError, NodeIdentity};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Network address of an advertised service: the node key plus a port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAddress {
    pub pub_key: NodeIdentity,
    pub port: u16,
}

impl std::str::FromStr for ServiceAddress {
    type Err = IdentityError;

    /// Parse the compact `<hex>:<port>` form. A missing or malformed port means 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((key, port)) => {
                let pub_key: NodeIdentity = key.parse()?;
                let port: u16 = port.parse().unwrap_or_else(|e| {
                    debug!(address = %s, error = %e, "Malformed port in service address, using 0");
                    0
                });
                Ok(Self { pub_key, port })
            }
            None => Ok(Self {
                pub_key: s.parse()?,
                port: 0,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Object {
                pub_key: NodeIdentity,
                #[serde(default)]
                port: u16,
            },
            Compact(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Object { pub_key, port } => Ok(Self { pub_key, port }),
            Repr::Compact(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// One entry of the registry listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub address: ServiceAddress,
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DirectoryEntry {
    pub fn node(&self) -> NodeIdentity {
        self.address.pub_key
    }
}

/// Response of the participant's `about` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AboutResponse {
    pub public_key: NodeIdentity,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTransportRequest<'a> {
    pub remote_pk: &'a NodeIdentity,
    pub transport_type: &'a str,
    /// Setup timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportSummary {
    pub id: Uuid,
}

/// Partial update of an application on the participant
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pk: Option<&'a NodeIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
}

pub const APP_STATUS_STOPPED: u8 = 0;
pub const APP_STATUS_RUNNING: u8 = 1;

/// Application state as reported by the participant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: u8,
    #[serde(default)]
    pub detailed_status: String,
    #[serde(default)]
    pub error: String,
}
