use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Context forwarded alongside prompt-generation and analysis requests
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FluxContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptpf_context: Option<Value>,
}

/// Request to generate a PTPF prompt structure
#[derive(Debug, Serialize, Clone)]
pub struct PtpfGenerateRequest {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_context: Option<FluxContext>,
}

/// Mode reported by the PTPF generator
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PtpfMode {
    Generate,
    Trainer,
    DriftLock,
    Rehydrated,
    RehydrationLimit,
    Error,
}

/// Structured prompt returned by the PTPF generator
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PtpfPrompt {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
    #[serde(default)]
    pub success_criteria: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub m_sigill: Option<String>,
    #[serde(default)]
    pub sigill: Option<String>,
}

/// Response from `/api/ptpf/generate` (and the `ptpf_result` realtime event)
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PtpfResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub mode: Option<PtpfMode>,
    #[serde(default)]
    pub prime_context: Option<String>,
    #[serde(default)]
    pub task_definition: Option<String>,
    #[serde(default)]
    pub vibe_profile: Option<String>,
    #[serde(default)]
    pub response: Option<PtpfPrompt>,
    /// Trainer mode: what the generator needs the user to pin down
    #[serde(default)]
    pub missing_specifics: Option<Vec<String>>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
    /// DriftLock mode: why the input was rejected
    #[serde(default)]
    pub issues: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request to `/api/lantern/process` for cognitive analysis
#[derive(Debug, Serialize, Clone)]
pub struct LanternProcessRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_context: Option<FluxContext>,
}

/// Response from the LanternHive cognitive analysis service
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LanternResponse {
    #[serde(default)]
    pub final_response: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from the complete Lantern Framework pipeline
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FrameworkResponse {
    #[serde(default)]
    pub original_input: Option<String>,
    #[serde(default)]
    pub final_output: Option<String>,
    #[serde(default)]
    pub agi15_translation: Option<String>,
    #[serde(default)]
    pub domain_context: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Strategy metadata exposed by `/api/strategies`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StrategyInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StrategiesResponse {
    #[serde(default)]
    pub strategies: HashMap<String, StrategyInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct StrategyExecuteRequest {
    pub strategy_id: String,
    pub problem: String,
    pub context: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StrategyExecuteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StrategyUploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response for the AGI15 translator
#[derive(Debug, Serialize, Clone)]
pub struct Agi15Request {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Agi15Response {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub domain_context: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response for cluster processing
#[derive(Debug, Serialize, Clone)]
pub struct ClusterRequest {
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ClusterResponse {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub threads_created: Option<u32>,
    #[serde(default)]
    pub cluster_output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response for Warden synthesis
#[derive(Debug, Serialize, Clone)]
pub struct WardenRequest {
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WardenResponse {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub lantern_responses: Option<Vec<String>>,
    #[serde(default)]
    pub reality_frame: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response for Brack code execution
#[derive(Debug, Serialize, Clone)]
pub struct BrackRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BrackResponse {
    #[serde(default)]
    pub input_code: Option<String>,
    #[serde(default)]
    pub execution_result: Option<String>,
    #[serde(default)]
    pub variable_bindings: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request to create a named backend connection
#[derive(Debug, Serialize, Clone)]
pub struct CreateConnectionRequest {
    pub name: String,
}

/// A backend connection record
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Backend health report from `/api/health`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lantern_hive_enabled: bool,
    #[serde(default)]
    pub lantern_framework_enabled: bool,
    #[serde(default)]
    pub ptpf_generator_enabled: bool,
    #[serde(default)]
    pub strategy_engine_enabled: bool,
    #[serde(default)]
    pub active_connections: u64,
    #[serde(default)]
    pub floating_memory_blocks: u64,
    #[serde(default)]
    pub fingerprints: u64,
}

/// System state snapshot carried by `state_update`/`system_state` events.
///
/// Snapshots are applied wholesale (last-write-wins); the entries are opaque
/// backend records and are only counted client-side.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SystemState {
    #[serde(default)]
    pub connections: Vec<Value>,
    #[serde(default)]
    pub memory_blocks: Vec<Value>,
    #[serde(default)]
    pub fingerprints: Vec<Value>,
    #[serde(default)]
    pub lantern_hive_enabled: bool,
    #[serde(default)]
    pub ptpf_generator_enabled: bool,
}

impl SystemState {
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn memory_block_count(&self) -> usize {
        self.memory_blocks.len()
    }

    pub fn fingerprint_count(&self) -> usize {
        self.fingerprints.len()
    }
}

/// Status payload emitted by the backend when the realtime channel opens
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StatusPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub lantern_hive_enabled: bool,
    #[serde(default)]
    pub lantern_framework_enabled: bool,
}

/// Result of executing FLUX code on the backend
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ExecutionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub execution_log: Option<Vec<String>>,
    #[serde(default)]
    pub created_connections: Option<Vec<String>>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error-shaped event payload (`execution_error`, `lantern_error`, `ptpf_error`)
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: String,
}

/// PTPF generator status from `/api/ptpf/status`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PtpfStatus {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub session_count: u64,
}

/// PTPF session history payload
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SessionHistory {
    #[serde(default)]
    pub history: Vec<Value>,
}

/// Simple `{message}` acknowledgement payload
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ptpf_mode_parses_wire_names() {
        let response: PtpfResponse =
            serde_json::from_str(r#"{"success": true, "mode": "drift_lock", "issues": ["vague"]}"#)
                .unwrap();
        assert_eq!(response.mode, Some(PtpfMode::DriftLock));
        assert_eq!(response.issues.unwrap(), vec!["vague".to_string()]);
    }

    #[test]
    fn system_state_counts_entries() {
        let state: SystemState = serde_json::from_str(
            r#"{
                "connections": [{"id": "c1"}, {"id": "c2"}],
                "memory_blocks": [{"id": "m1"}],
                "fingerprints": [],
                "lantern_hive_enabled": true,
                "ptpf_generator_enabled": false
            }"#,
        )
        .unwrap();
        assert_eq!(state.connection_count(), 2);
        assert_eq!(state.memory_block_count(), 1);
        assert_eq!(state.fingerprint_count(), 0);
        assert!(state.lantern_hive_enabled);
    }

    #[test]
    fn flux_context_skips_unset_fields() {
        let context = FluxContext {
            task: Some("Generate FLUX code based on user request".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&context).unwrap();
        assert!(!json.contains("strategy"));
        assert!(!json.contains("ptpf_context"));
    }
}
