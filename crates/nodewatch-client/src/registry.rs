//! Registry client: directory listing and authenticated bulk deregistration

use nodewatch_common::{MonitorIdentity, NodeIdentity, NodewatchError};
use rand::seq::SliceRandom;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::RegistryClientConfig;
use crate::constants::{registry_api_path, registry_header};
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::model::DirectoryEntry;

/// Client for the service registry
#[derive(Clone, Debug)]
pub struct RegistryClient {
    http: HttpClient,
    service_type: String,
}

impl RegistryClient {
    pub fn new(config: RegistryClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(config.http)?,
            service_type: config.service_type,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// List the entries advertised for the monitored service type, in registry order
    pub async fn fetch_entries(&self) -> Result<Vec<DirectoryEntry>, NodewatchError> {
        #[derive(Serialize)]
        struct Query<'a> {
            #[serde(rename = "type")]
            service_type: &'a str,
        }

        let entries: Vec<DirectoryEntry> = self
            .http
            .get_json_with_query(
                registry_api_path::SERVICES,
                &Query {
                    service_type: &self.service_type,
                },
            )
            .await?;
        Ok(entries)
    }

    /// List the advertised nodes in a uniformly shuffled order.
    ///
    /// An empty listing is not an error.
    pub async fn fetch_nodes(&self) -> Result<Vec<NodeIdentity>, NodewatchError> {
        let entries = self.fetch_entries().await?;
        if entries.is_empty() {
            warn!(
                service_type = %self.service_type,
                "No nodes found in the registry"
            );
        }

        let nodes = shuffle_nodes(entries);
        info!(count = nodes.len(), "Node keys updated");
        Ok(nodes)
    }

    /// Ask the registry to remove `ids`.
    ///
    /// Only HTTP 200 counts as success.
    pub async fn deregister(
        &self,
        ids: &[NodeIdentity],
        identity: &MonitorIdentity,
    ) -> Result<(), NodewatchError> {
        let path = format!("{}/{}", registry_api_path::DEREGISTER, self.service_type);
        let builder = self
            .http
            .request(Method::DELETE, &path)
            .header(registry_header::IDENTITY_PUBKEY, identity.public_key.to_hex())
            .header(registry_header::IDENTITY_SIGN, identity.signature.to_hex())
            .json(ids);

        let response = self
            .http
            .send(builder)
            .await
            .map_err(|e| NodewatchError::DeregisterFailure {
                status: e.status(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(NodewatchError::DeregisterFailure {
                status: Some(status.as_u16()),
                reason: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        Ok(())
    }
}

/// Extract node keys and randomize their order
pub fn shuffle_nodes(entries: Vec<DirectoryEntry>) -> Vec<NodeIdentity> {
    let mut nodes: Vec<NodeIdentity> = entries.iter().map(DirectoryEntry::node).collect();
    nodes.shuffle(&mut rand::rng());
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceAddress;
    use proptest::prelude::*;

    fn entry(seed: u8) -> DirectoryEntry {
        let mut raw = [seed; 33];
        raw[0] = 0x02;
        DirectoryEntry {
            address: ServiceAddress {
                pub_key: NodeIdentity::from_bytes(raw),
                port: 44,
            },
            service_type: "vpn".to_string(),
            version: None,
        }
    }

    #[test]
    fn test_shuffle_empty() {
        assert!(shuffle_nodes(Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn proptest_shuffle_is_permutation(seeds in proptest::collection::vec(any::<u8>(), 0..64)) {
            let entries: Vec<DirectoryEntry> = seeds.iter().copied().map(entry).collect();
            let mut expected: Vec<NodeIdentity> = entries.iter().map(DirectoryEntry::node).collect();

            let mut shuffled = shuffle_nodes(entries);
            prop_assert_eq!(shuffled.len(), expected.len());

            expected.sort();
            shuffled.sort();
            prop_assert_eq!(shuffled, expected);
        }
    }
}
