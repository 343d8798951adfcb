use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::FluxConfig;
use crate::errors::{FluxError, FluxResult};
use crate::types::*;

/// Client for the FLUX/LanternHive backend REST API.
///
/// Every call is independently fallible and none blocks another; a failed
/// call is surfaced to the caller and is never retried here.
#[derive(Debug, Clone)]
pub struct FluxClient {
    client: Client,
    base_url: String,
}

impl FluxClient {
    /// Create a new backend API client
    pub fn new(config: &FluxConfig) -> FluxResult<Self> {
        let base_url = config.backend_url.clone().ok_or_else(|| {
            FluxError::ConfigError(
                "A backend URL is required to initialize the FLUX client".to_string(),
            )
        })?;

        let timeout = Duration::from_secs(config.request_timeout_secs.unwrap_or(30));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FluxError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> FluxResult<R> {
        debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| FluxError::RequestError(format!("Failed to send request: {}", e)))?;

        Self::decode(response).await
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> FluxResult<R> {
        debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| FluxError::RequestError(format!("Failed to send request: {}", e)))?;

        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> FluxResult<R> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                FluxError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            // Error bodies are usually `{"error": ...}`; fall back to raw text
            let message = serde_json::from_str::<ErrorPayload>(&body)
                .map(|payload| payload.error)
                .unwrap_or(body);

            return Err(FluxError::HttpError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| FluxError::ParsingError(format!("Failed to parse response: {}", e)))
    }

    /// Backend health report
    pub async fn health(&self) -> FluxResult<HealthResponse> {
        self.get_json("/api/health").await
    }

    /// Generate a PTPF prompt structure for the user's request
    pub async fn generate_ptpf(&self, request: &PtpfGenerateRequest) -> FluxResult<PtpfResponse> {
        self.post_json("/api/ptpf/generate", request).await
    }

    /// PTPF generator status
    pub async fn ptpf_status(&self) -> FluxResult<PtpfStatus> {
        self.get_json("/api/ptpf/status").await
    }

    /// PTPF session history for the current backend session
    pub async fn ptpf_session_history(&self) -> FluxResult<SessionHistory> {
        self.get_json("/api/ptpf/session").await
    }

    /// Clear the backend PTPF session
    pub async fn clear_ptpf_session(&self) -> FluxResult<MessageResponse> {
        debug!("DELETE /api/ptpf/session");
        let response = self
            .client
            .delete(self.url("/api/ptpf/session"))
            .send()
            .await
            .map_err(|e| FluxError::RequestError(format!("Failed to send request: {}", e)))?;

        Self::decode(response).await
    }

    /// Run LanternHive cognitive analysis over a prompt
    pub async fn process_lantern(
        &self,
        request: &LanternProcessRequest,
    ) -> FluxResult<LanternResponse> {
        self.post_json("/api/lantern/process", request).await
    }

    /// Run the complete Lantern Framework pipeline over free-form input
    pub async fn process_framework(&self, input: &str) -> FluxResult<FrameworkResponse> {
        self.post_json("/api/lantern/process", &serde_json::json!({ "input": input }))
            .await
    }

    /// List the strategies known to the backend strategy engine
    pub async fn list_strategies(&self) -> FluxResult<StrategiesResponse> {
        self.get_json("/api/strategies").await
    }

    /// Execute a named strategy against a problem statement
    pub async fn execute_strategy(
        &self,
        request: &StrategyExecuteRequest,
    ) -> FluxResult<StrategyExecuteResponse> {
        self.post_json("/api/strategies/execute", request).await
    }

    /// Upload a strategy definition (a `.json` file) to the backend
    pub async fn upload_strategy(&self, path: &Path) -> FluxResult<StrategyUploadResponse> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "strategy.json".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/json")
            .map_err(|e| FluxError::RequestError(format!("Invalid upload payload: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        debug!("POST /api/strategies/upload (multipart)");
        let response = self
            .client
            .post(self.url("/api/strategies/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| FluxError::RequestError(format!("Failed to send request: {}", e)))?;

        Self::decode(response).await
    }

    /// Translate text through the AGI15 semantic translator
    pub async fn translate_agi15(&self, text: &str) -> FluxResult<Agi15Response> {
        self.post_json(
            "/api/lantern/agi15/translate",
            &Agi15Request {
                text: text.to_string(),
            },
        )
        .await
    }

    /// Fan the input out to a lantern cluster and collect the merged output
    pub async fn process_cluster(&self, input: &str) -> FluxResult<ClusterResponse> {
        self.post_json(
            "/api/lantern/cluster/process",
            &ClusterRequest {
                input: input.to_string(),
            },
        )
        .await
    }

    /// Synthesize a Warden reality frame from the input
    pub async fn synthesize_warden(&self, input: &str) -> FluxResult<WardenResponse> {
        self.post_json(
            "/api/lantern/warden/synthesize",
            &WardenRequest {
                input: input.to_string(),
            },
        )
        .await
    }

    /// Execute Brack code on the backend interpreter
    pub async fn execute_brack(&self, code: &str) -> FluxResult<BrackResponse> {
        self.post_json(
            "/api/lantern/brack/execute",
            &BrackRequest {
                code: code.to_string(),
            },
        )
        .await
    }

    /// Create a named backend connection
    pub async fn create_connection(&self, name: &str) -> FluxResult<ConnectionInfo> {
        self.post_json(
            "/api/connections",
            &CreateConnectionRequest {
                name: name.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = FluxConfig {
            backend_url: Some("http://localhost:5000/".to_string()),
            ..Default::default()
        };
        let client = FluxClient::new(&config).unwrap();
        assert_eq!(client.url("/api/health"), "http://localhost:5000/api/health");
    }

    #[test]
    fn missing_backend_url_is_a_config_error() {
        let config = FluxConfig {
            backend_url: None,
            ..Default::default()
        };
        assert!(matches!(
            FluxClient::new(&config),
            Err(FluxError::ConfigError(_))
        ));
    }

    #[test]
    fn ptpf_request_serializes_strategy_context() {
        let request = PtpfGenerateRequest {
            input: "set up a login system".to_string(),
            flux_context: Some(FluxContext {
                task: Some("Generate structured prompt for FLUX code generation".to_string()),
                strategy: Some("decompose_problem".to_string()),
                ..Default::default()
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input"], "set up a login system");
        assert_eq!(json["flux_context"]["strategy"], "decompose_problem");
    }
}
