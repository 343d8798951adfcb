use thiserror::Error;

/// FLUX backend client errors
#[derive(Error, Debug)]
pub enum FluxError {
    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Workflow State Error: {0}")]
    StateError(String),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },

    #[error("Transport Error: {0}")]
    TransportError(String),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Result type for FLUX backend operations
pub type FluxResult<T> = Result<T, FluxError>;
