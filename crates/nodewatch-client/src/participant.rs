//! HTTP adapter for the local mesh participant
//!
//! Drives a participant through its control API. Application error text is
//! translated into [`AppFault`] here and nowhere else.

use std::time::Duration;

use nodewatch_common::{
    AppFault, ConnectionSummary, MeshParticipant, NodeIdentity, NodewatchError, ParticipantError,
    TransportHandle,
};
use reqwest::Method;
use tracing::{debug, info};

use crate::config::ParticipantClientConfig;
use crate::constants::participant_api_path;
use crate::http::HttpClient;
use crate::model::{
    APP_STATUS_RUNNING, APP_STATUS_STOPPED, AboutResponse, AddTransportRequest, AppState,
    AppUpdate, TransportSummary,
};

/// Mesh participant reached over its local HTTP control API
#[derive(Debug)]
pub struct HttpParticipant {
    http: HttpClient,
    local_pk: NodeIdentity,
}

impl HttpParticipant {
    /// Connect to the participant and learn its own public key.
    ///
    /// Failure here is fatal for the monitor: nothing can be probed without it.
    pub async fn connect(config: ParticipantClientConfig) -> Result<Self, NodewatchError> {
        let http = HttpClient::new(config.http)
            .map_err(|e| NodewatchError::ParticipantStartupFailure(e.to_string()))?;

        let about: AboutResponse = http
            .get_json(participant_api_path::ABOUT)
            .await
            .map_err(|e| NodewatchError::ParticipantStartupFailure(e.to_string()))?;

        info!(
            public_key = %about.public_key,
            url = %http.base_url(),
            "Connected to local mesh participant"
        );

        Ok(Self {
            http,
            local_pk: about.public_key,
        })
    }

    pub fn local_pk(&self) -> &NodeIdentity {
        &self.local_pk
    }

    fn transports_path(&self) -> String {
        format!("{}/{}/transports", participant_api_path::VISORS, self.local_pk)
    }

    fn app_path(&self, app: &str) -> String {
        format!("{}/{}/apps/{}", participant_api_path::VISORS, self.local_pk, app)
    }

    async fn update_app(&self, app: &str, update: &AppUpdate<'_>) -> Result<(), ParticipantError> {
        self.http
            .send_json_no_content(Method::PUT, &self.app_path(app), update)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MeshParticipant for HttpParticipant {
    async fn add_transport(
        &self,
        peer: &NodeIdentity,
        transport_type: &str,
        timeout: Duration,
    ) -> Result<TransportHandle, ParticipantError> {
        let request = AddTransportRequest {
            remote_pk: peer,
            transport_type,
            timeout_ms: timeout.as_millis() as u64,
        };

        let summary: TransportSummary = self
            .http
            .send_json(Method::POST, &self.transports_path(), &request)
            .await?;

        Ok(TransportHandle {
            id: summary.id,
            remote: *peer,
        })
    }

    async fn remove_transport(&self, handle: &TransportHandle) -> Result<(), ParticipantError> {
        let path = format!("{}/{}", self.transports_path(), handle.id);
        self.http.delete(&path).await?;
        Ok(())
    }

    async fn set_app_target(&self, app: &str, peer: &NodeIdentity) -> Result<(), ParticipantError> {
        self.update_app(
            app,
            &AppUpdate {
                pk: Some(peer),
                ..Default::default()
            },
        )
        .await
    }

    async fn start_app(&self, app: &str) -> Result<(), ParticipantError> {
        self.update_app(
            app,
            &AppUpdate {
                status: Some(APP_STATUS_RUNNING),
                ..Default::default()
            },
        )
        .await
    }

    async fn stop_app(&self, app: &str) -> Result<(), ParticipantError> {
        self.update_app(
            app,
            &AppUpdate {
                status: Some(APP_STATUS_STOPPED),
                ..Default::default()
            },
        )
        .await
    }

    async fn get_app_error(&self, app: &str) -> Result<Option<AppFault>, ParticipantError> {
        let state: AppState = self.http.get_json(&self.app_path(app)).await?;
        debug!(
            app = %app,
            status = state.status,
            detailed_status = %state.detailed_status,
            "Fetched app state"
        );
        Ok(AppFault::from_message(&state.error))
    }

    async fn get_app_connection_summary(
        &self,
        app: &str,
    ) -> Result<Vec<ConnectionSummary>, ParticipantError> {
        let path = format!("{}/connections", self.app_path(app));
        let summary: Vec<ConnectionSummary> = self.http.get_json(&path).await?;
        Ok(summary)
    }
}
