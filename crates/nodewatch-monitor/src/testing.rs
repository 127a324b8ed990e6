// Scripted in-memory mesh participant for prober and loop tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use nodewatch_common::{
    AppFault, ConnectionSummary, MeshParticipant, NodeIdentity, ParticipantError, TransportHandle,
};
use parking_lot::Mutex;
use uuid::Uuid;

/// How the participant behaves when probing a given node
#[derive(Debug, Clone)]
pub enum Script {
    /// Session succeeds with these summaries
    Healthy(Vec<ConnectionSummary>),
    /// Transport setup is refused
    SetupRefused,
    /// Transport setup never completes
    SetupHangs,
    /// The participant opens the transport after this delay, whether or not
    /// the caller is still waiting
    SetupCompletesAfter(Duration),
    /// The local participant cannot be reached
    ParticipantDown,
    /// The app reports this fault after settling
    Fault(AppFault),
    /// Starting the app fails
    StartFails,
    /// Fetching the connection summary fails
    SummaryFails,
    /// Stopping the app fails after a good summary
    StopFails,
}

#[derive(Debug, Default)]
pub struct Calls {
    pub transports_added: usize,
    pub transports_removed: usize,
    pub apps_started: usize,
    pub apps_stopped: usize,
    /// Nodes in the order a transport was requested for them
    pub probed: Vec<NodeIdentity>,
}

pub struct ScriptedParticipant {
    scripts: HashMap<NodeIdentity, Script>,
    default: Script,
    target: Mutex<Option<NodeIdentity>>,
    open: Arc<Mutex<HashMap<Uuid, NodeIdentity>>>,
    pub calls: Mutex<Calls>,
}

impl ScriptedParticipant {
    pub fn new(default: Script) -> Self {
        Self {
            scripts: HashMap::new(),
            default,
            target: Mutex::new(None),
            open: Arc::new(Mutex::new(HashMap::new())),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn with_script(mut self, node: NodeIdentity, script: Script) -> Self {
        self.scripts.insert(node, script);
        self
    }

    pub fn open_transports(&self) -> usize {
        self.open.lock().len()
    }

    fn script_for(&self, node: &NodeIdentity) -> Script {
        self.scripts.get(node).cloned().unwrap_or_else(|| self.default.clone())
    }

    fn current_script(&self) -> Script {
        match *self.target.lock() {
            Some(node) => self.script_for(&node),
            None => self.default.clone(),
        }
    }
}

#[async_trait::async_trait]
impl MeshParticipant for ScriptedParticipant {
    async fn add_transport(
        &self,
        peer: &NodeIdentity,
        _transport_type: &str,
        _timeout: Duration,
    ) -> Result<TransportHandle, ParticipantError> {
        self.calls.lock().probed.push(*peer);
        match self.script_for(peer) {
            Script::SetupRefused => Err(ParticipantError::Rejected("dial refused".into())),
            Script::ParticipantDown => Err(ParticipantError::Unavailable("connection refused".into())),
            Script::SetupHangs => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Script::SetupCompletesAfter(delay) => {
                let open = self.open.clone();
                let remote = *peer;
                let id = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let id = Uuid::new_v4();
                    open.lock().insert(id, remote);
                    id
                })
                .await
                .map_err(|e| ParticipantError::Rejected(e.to_string()))?;
                self.calls.lock().transports_added += 1;
                Ok(TransportHandle { id, remote })
            }
            _ => {
                let id = Uuid::new_v4();
                self.open.lock().insert(id, *peer);
                self.calls.lock().transports_added += 1;
                Ok(TransportHandle { id, remote: *peer })
            }
        }
    }

    async fn remove_transport(&self, handle: &TransportHandle) -> Result<(), ParticipantError> {
        self.calls.lock().transports_removed += 1;
        match self.open.lock().remove(&handle.id) {
            Some(_) => Ok(()),
            None => Err(ParticipantError::Rejected("unknown transport".into())),
        }
    }

    async fn set_app_target(&self, _app: &str, peer: &NodeIdentity) -> Result<(), ParticipantError> {
        *self.target.lock() = Some(*peer);
        Ok(())
    }

    async fn start_app(&self, _app: &str) -> Result<(), ParticipantError> {
        if matches!(self.current_script(), Script::StartFails) {
            return Err(ParticipantError::Rejected("app failed to start".into()));
        }
        self.calls.lock().apps_started += 1;
        Ok(())
    }

    async fn stop_app(&self, _app: &str) -> Result<(), ParticipantError> {
        self.calls.lock().apps_stopped += 1;
        if matches!(self.current_script(), Script::StopFails) {
            return Err(ParticipantError::Rejected("app failed to stop".into()));
        }
        Ok(())
    }

    async fn get_app_error(&self, _app: &str) -> Result<Option<AppFault>, ParticipantError> {
        match self.current_script() {
            Script::Fault(fault) => Ok(Some(fault)),
            _ => Ok(None),
        }
    }

    async fn get_app_connection_summary(
        &self,
        _app: &str,
    ) -> Result<Vec<ConnectionSummary>, ParticipantError> {
        match self.current_script() {
            Script::Healthy(summary) => Ok(summary),
            Script::SummaryFails => Err(ParticipantError::Rejected("no such app".into())),
            _ => Ok(Vec::new()),
        }
    }
}

pub fn node(seed: u8) -> NodeIdentity {
    let mut raw = [seed; 33];
    raw[0] = 0x02;
    NodeIdentity::from_bytes(raw)
}
