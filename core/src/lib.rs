// Core FLUX/LanternHive backend functionality

// Export client module - REST client for the backend API
pub mod client;
pub use client::*;

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

// Export realtime module - WebSocket event channel
pub mod realtime;
pub use realtime::{generate_id, ClientEvent, RealtimeClient, ServerEvent, StateTracker};

// Export templates module - FLUX code template selection
pub mod templates;
pub use templates::{select, StrategyTag};

// Export session module - Guided workflow session state
pub mod session;
pub use session::{StrategyChoice, WorkflowSession};
