//! Realtime event channel to the FLUX backend.
//!
//! Events travel as JSON text frames shaped `{"event": <name>, "data": ...}`.
//! The backend pushes state snapshots and execution results; snapshots are
//! applied wholesale (last-write-wins), never merged.

use std::sync::Arc;

use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, RwLock};
use tokio_tungstenite::{
    connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use crate::errors::{FluxError, FluxResult};
use crate::types::{
    ErrorPayload, ExecutionResult, FluxContext, LanternResponse, MessageResponse, PtpfResponse,
    SessionHistory, StatusPayload, SystemState,
};

/// Client-generated identifier with a short prefix (`conn_`, `mem_`, ...)
pub fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &suffix[..9])
}

/// Events sent to the backend over the realtime channel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    GetSystemState,
    ExecuteFlux {
        code: String,
    },
    CreateConnection {
        connection_id: String,
    },
    DisconnectAllConnections,
    AllocateMemory {
        memory_id: String,
        data_type: String,
        content: String,
    },
    GarbageCollect,
    InitiateSiigTransfer {
        transfer_id: String,
        source: String,
        destination: String,
    },
    GenerateFingerprint {
        fingerprint_id: String,
        data: String,
    },
    GeneratePtpfFlux {
        input: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        flux_context: Option<FluxContext>,
    },
    RehydratePtpf {
        response_data: Value,
    },
    LanternQuery {
        prompt: String,
    },
}

impl ClientEvent {
    /// Serializes the event to a wire frame
    pub fn to_frame(&self) -> FluxResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Events received from the backend over the realtime channel
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Status(StatusPayload),
    ExecutionResult(ExecutionResult),
    ExecutionError(ErrorPayload),
    LanternResponse(LanternResponse),
    LanternError(ErrorPayload),
    /// State snapshot; `system_state` is the reply form of the same payload
    #[serde(alias = "system_state")]
    StateUpdate(SystemState),
    PtpfResult(PtpfResponse),
    PtpfError(ErrorPayload),
    PtpfRehydrated(PtpfResponse),
    PtpfSessionHistory(SessionHistory),
    PtpfSessionCleared(MessageResponse),
}

impl ServerEvent {
    /// Parses a wire frame. Unknown events are ignored (returned as `None`).
    pub fn parse_frame(frame: &str) -> Option<ServerEvent> {
        match serde_json::from_str(frame) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Ignoring unrecognized realtime frame: {}", e);
                None
            }
        }
    }
}

/// Tracks the latest system state snapshot.
///
/// Snapshots replace the previous state wholesale; a slow snapshot arriving
/// late still wins, which is benign for the single-session model.
#[derive(Debug, Default)]
pub struct StateTracker {
    latest: Option<SystemState>,
}

impl StateTracker {
    pub fn apply(&mut self, state: SystemState) {
        self.latest = Some(state);
    }

    pub fn latest(&self) -> Option<&SystemState> {
        self.latest.as_ref()
    }
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// Handle to receive parsed events from the backend
pub type Incoming = broadcast::Receiver<ServerEvent>;

/// WebSocket client for the realtime channel
pub struct RealtimeClient {
    writer: Arc<RwLock<WsSink>>,
}

impl RealtimeClient {
    /// Connects to the backend and spawns the reader task.
    ///
    /// Returns the client handle and a receiver of parsed server events.
    pub async fn connect(url: &Url) -> FluxResult<(Arc<Self>, Incoming)> {
        let (stream, _resp) = connect_async(url.as_str()).await?;
        let (sink, mut stream) = stream.split();

        let (tx, rx) = broadcast::channel::<ServerEvent>(128);
        let writer = Arc::new(RwLock::new(sink));
        let writer_clone = writer.clone();

        // Reader task
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => {
                        if let Some(event) = ServerEvent::parse_frame(&text) {
                            let _ = tx.send(event);
                        }
                    }
                    Ok(WsMessage::Ping(payload)) => {
                        // Respond to ping immediately
                        if let Err(e) = writer_clone
                            .write()
                            .await
                            .send(WsMessage::Pong(payload))
                            .await
                        {
                            error!("Failed to send PONG: {}", e);
                            break;
                        }
                    }
                    Ok(WsMessage::Close(_)) => {
                        debug!("Realtime channel closed by backend");
                        break;
                    }
                    Err(e) => {
                        error!("Realtime channel read error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        });

        Ok((Arc::new(Self { writer }), rx))
    }

    /// Sends a client event as a text frame
    pub async fn send(&self, event: &ClientEvent) -> FluxResult<()> {
        let frame = event.to_frame()?;
        self.writer
            .write()
            .await
            .send(WsMessage::Text(frame))
            .await
            .map_err(FluxError::from)
    }

    /// Closes the channel
    pub async fn close(&self) -> FluxResult<()> {
        self.writer
            .write()
            .await
            .send(WsMessage::Close(None))
            .await
            .map_err(FluxError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_use_wire_names() {
        let frame = ClientEvent::ExecuteFlux {
            code: "connect(\"a\", \"b\")".to_string(),
        }
        .to_frame()
        .unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["event"], "execute_flux");
        assert_eq!(value["data"]["code"], "connect(\"a\", \"b\")");

        let frame = ClientEvent::GarbageCollect.to_frame().unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["event"], "garbage_collect");
    }

    #[test]
    fn siig_transfer_event_carries_endpoints() {
        let frame = ClientEvent::InitiateSiigTransfer {
            transfer_id: "transfer_123".to_string(),
            source: "memory".to_string(),
            destination: "fingerprint".to_string(),
        }
        .to_frame()
        .unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["event"], "initiate_siig_transfer");
        assert_eq!(value["data"]["source"], "memory");
        assert_eq!(value["data"]["destination"], "fingerprint");
    }

    #[test]
    fn state_update_and_system_state_parse_to_the_same_event() {
        let snapshot = r#"{"connections": [{"id": "c1"}], "memory_blocks": [],
            "fingerprints": [], "lantern_hive_enabled": true,
            "ptpf_generator_enabled": true}"#;

        for name in ["state_update", "system_state"] {
            let frame = format!(r#"{{"event": "{}", "data": {}}}"#, name, snapshot);
            match ServerEvent::parse_frame(&frame) {
                Some(ServerEvent::StateUpdate(state)) => {
                    assert_eq!(state.connection_count(), 1);
                }
                other => panic!("frame {} parsed as {:?}", name, other),
            }
        }
    }

    #[test]
    fn unknown_events_are_ignored() {
        assert!(ServerEvent::parse_frame(r#"{"event": "quantum_flux", "data": {}}"#).is_none());
        assert!(ServerEvent::parse_frame("not json at all").is_none());
    }

    #[test]
    fn error_events_carry_the_message() {
        let frame = r#"{"event": "execution_error", "data": {"error": "No FLUX code provided"}}"#;
        match ServerEvent::parse_frame(frame) {
            Some(ServerEvent::ExecutionError(payload)) => {
                assert_eq!(payload.error, "No FLUX code provided");
            }
            other => panic!("parsed as {:?}", other),
        }
    }

    #[test]
    fn state_tracker_replaces_wholesale() {
        let mut tracker = StateTracker::default();

        let first = SystemState {
            connections: vec![
                serde_json::json!({"id": "c1"}),
                serde_json::json!({"id": "c2"}),
            ],
            lantern_hive_enabled: true,
            ..Default::default()
        };
        tracker.apply(first);
        assert_eq!(tracker.latest().unwrap().connection_count(), 2);

        // A later snapshot with fewer entries still replaces everything
        let second = SystemState::default();
        tracker.apply(second);
        let latest = tracker.latest().unwrap();
        assert_eq!(latest.connection_count(), 0);
        assert!(!latest.lantern_hive_enabled);
    }

    #[test]
    fn generated_ids_keep_their_prefix() {
        let id = generate_id("conn_");
        assert!(id.starts_with("conn_"));
        assert_eq!(id.len(), "conn_".len() + 9);
        assert_ne!(generate_id("conn_"), generate_id("conn_"));
    }
}
