use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal client for the FLUX/LanternHive backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Describe what you want to build; runs the guided workflow once
    #[arg(index = 1)] // Positional argument
    pub request: Option<String>,

    /// Enter interactive workflow mode
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// AI strategy for the workflow: decompose_problem, pattern_recognition,
    /// heuristic_search or meta_learning (omit for keyword dispatch)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Execute the generated FLUX code on the backend after the workflow
    #[arg(short, long, default_value_t = false)]
    pub execute: bool,

    /// Backend base URL (overrides the config file)
    #[arg(long, env = "FLUXHIVE_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Realtime channel URL (overrides the config file)
    #[arg(long, env = "FLUXHIVE_REALTIME_URL")]
    pub realtime_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate text through the AGI15 semantic translator
    Agi15 { text: String },

    /// Fan input out to a lantern cluster and show the merged output
    Cluster { input: String },

    /// Synthesize a Warden reality frame from the input
    Warden { input: String },

    /// Execute Brack code on the backend interpreter
    Brack { code: String },

    /// Run the full Lantern Framework pipeline over the input
    Framework { input: String },

    /// Query LanternHive directly over the realtime channel
    Lantern { prompt: String },

    /// Inspect or run backend strategies
    Strategies {
        #[command(subcommand)]
        action: StrategyAction,
    },

    /// PTPF generator operations
    Ptpf {
        #[command(subcommand)]
        action: PtpfAction,
    },

    /// Create a backend connection (named via REST, anonymous via realtime)
    Connect { name: Option<String> },

    /// Disconnect all backend connections
    DisconnectAll,

    /// Allocate a floating memory block
    Memory {
        #[arg(default_value = "string")]
        data_type: String,
        #[arg(default_value = "Sample floating memory allocation")]
        content: String,
    },

    /// Run backend garbage collection
    Gc,

    /// Initiate a SIIG transfer between two backend endpoints
    Transfer {
        #[arg(default_value = "memory")]
        source: String,
        #[arg(default_value = "fingerprint")]
        destination: String,
    },

    /// Generate a fingerprint for the given data
    Fingerprint {
        #[arg(default_value = "Sample data for fingerprinting")]
        data: String,
    },

    /// Fetch the current system state over the realtime channel
    State,

    /// Check backend health
    Health,
}

#[derive(Subcommand, Debug)]
pub enum PtpfAction {
    /// Generate a PTPF prompt structure over the realtime channel
    Generate { input: String },

    /// Rehydrate a previously generated PTPF response from a JSON file
    Rehydrate { file: PathBuf },

    /// Show the backend PTPF session history
    Session,

    /// Clear the backend PTPF session
    Clear,

    /// Show PTPF generator status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum StrategyAction {
    /// List the strategies known to the backend
    List,

    /// Execute a strategy against a problem statement
    Execute {
        strategy_id: String,
        problem: String,
    },

    /// Upload a strategy definition file (.json)
    Upload { file: PathBuf },
}
