//! FLUX code template selection.
//!
//! The backend owns real code generation; this module is the client-side
//! dispatcher that picks one of a fixed set of FLUX example programs from
//! either an explicit strategy tag or a keyword match on the request text.
//! The output is cosmetic display text and is never parsed or executed
//! locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four AI strategies offered during the guided workflow
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    DecomposeProblem,
    PatternRecognition,
    HeuristicSearch,
    MetaLearning,
}

impl StrategyTag {
    /// All strategies, in the order they are offered for selection
    pub const ALL: [StrategyTag; 4] = [
        StrategyTag::DecomposeProblem,
        StrategyTag::PatternRecognition,
        StrategyTag::HeuristicSearch,
        StrategyTag::MetaLearning,
    ];

    /// Parses the wire identifier; unknown tags fall through to keyword dispatch
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "decompose_problem" => Some(StrategyTag::DecomposeProblem),
            "pattern_recognition" => Some(StrategyTag::PatternRecognition),
            "heuristic_search" => Some(StrategyTag::HeuristicSearch),
            "meta_learning" => Some(StrategyTag::MetaLearning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::DecomposeProblem => "decompose_problem",
            StrategyTag::PatternRecognition => "pattern_recognition",
            StrategyTag::HeuristicSearch => "heuristic_search",
            StrategyTag::MetaLearning => "meta_learning",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyTag::DecomposeProblem => "Problem Decomposition",
            StrategyTag::PatternRecognition => "Pattern Recognition",
            StrategyTag::HeuristicSearch => "Heuristic Search",
            StrategyTag::MetaLearning => "Meta-Learning",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyTag::DecomposeProblem => {
                "Breaking down complex problems into manageable, interconnected components for systematic solution development."
            }
            StrategyTag::PatternRecognition => {
                "Identifying common patterns and applying proven architectural solutions to similar problems."
            }
            StrategyTag::HeuristicSearch => {
                "Using intelligent search algorithms to explore solution spaces and find optimal approaches."
            }
            StrategyTag::MetaLearning => {
                "Learning from similar problems and adapting successful solutions to new contexts."
            }
        }
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Generator = fn(&str) -> String;

/// Keyword groups checked in order against the lowercased request text.
/// The first group with any matching keyword wins, so earlier entries take
/// priority when a request mentions several domains. The ordering is a
/// historical artifact of the backend UI and is preserved for compatibility.
const KEYWORD_GENERATORS: &[(&[&str], Generator)] = &[
    (&["database", "db"], database_template),
    (&["authentication", "login", "auth"], auth_template),
    (&["api", "service"], api_template),
    (&["file", "transfer"], file_transfer_template),
    (&["web", "website", "frontend"], web_template),
    (&["microservice", "microservices"], microservices_template),
    (&["security", "secure"], security_template),
    (&["data", "processing"], data_processing_template),
];

/// Selects the FLUX example program for a request.
///
/// A present strategy tag dispatches to its fixed template (the request text
/// is only embedded verbatim in the header comment). Without a tag, the
/// keyword table above decides; with no keyword match the generic fallback is
/// produced with the request excerpt truncated to 50 characters.
///
/// Pure and total: identical arguments always yield byte-identical output.
/// Rejecting empty input is the caller's responsibility.
pub fn select(input_text: &str, strategy: Option<StrategyTag>) -> String {
    if let Some(tag) = strategy {
        return match tag {
            StrategyTag::DecomposeProblem => decomposed_template(input_text),
            StrategyTag::PatternRecognition => pattern_template(input_text),
            StrategyTag::HeuristicSearch => heuristic_template(input_text),
            StrategyTag::MetaLearning => meta_learning_template(input_text),
        };
    }

    let lowered = input_text.to_lowercase();
    for (keywords, generator) in KEYWORD_GENERATORS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return generator(input_text);
        }
    }

    generic_template(input_text)
}

fn decomposed_template(request: &str) -> String {
    format!(
        r#"// Problem Decomposition Strategy - Breaking down: {request}
// Component 1: Core System
connect("core_system", "https://api.example.com/core")
connect("data_layer", "postgresql://localhost:5432/main_db")

// Component 2: Authentication Layer
connect("auth_service", "https://auth.example.com")
connect("session_store", "redis://localhost:6379")

// Component 3: Business Logic Layer
connect("business_logic", "https://logic.example.com")
connect("cache_layer", "redis://localhost:6380")

allocate_memory("system_buffer", 8192)
allocate_memory("auth_cache", 4096)
allocate_memory("business_cache", 4096)

create_fingerprint("system_identity", "core_system_hash")
create_fingerprint("auth_token", "authentication_hash")
create_fingerprint("business_process", "logic_hash")

initiate_siig_transfer("client", "auth_service", "login_request")
initiate_siig_transfer("auth_service", "core_system", "authenticated_request")
initiate_siig_transfer("core_system", "business_logic", "processed_request")"#
    )
}

fn pattern_template(request: &str) -> String {
    format!(
        r#"// Pattern Recognition Strategy - Applying proven patterns to: {request}
// MVC Pattern Implementation
connect("model_layer", "postgresql://localhost:5432/models")
connect("view_layer", "https://views.example.com")
connect("controller_layer", "https://controllers.example.com")

// Repository Pattern
connect("user_repository", "postgresql://localhost:5432/users")
connect("product_repository", "postgresql://localhost:5432/products")
connect("order_repository", "postgresql://localhost:5432/orders")

// Service Layer Pattern
connect("user_service", "https://services.example.com/users")
connect("product_service", "https://services.example.com/products")
connect("order_service", "https://services.example.com/orders")

allocate_memory("pattern_cache", 12288)
allocate_memory("repository_cache", 6144)

create_fingerprint("mvc_pattern", "model_view_controller_hash")
create_fingerprint("repository_pattern", "data_access_hash")
create_fingerprint("service_pattern", "business_logic_hash")

initiate_siig_transfer("view_layer", "controller_layer", "user_request")
initiate_siig_transfer("controller_layer", "service_layer", "business_request")
initiate_siig_transfer("service_layer", "repository_layer", "data_request")"#
    )
}

fn heuristic_template(request: &str) -> String {
    format!(
        r#"// Heuristic Search Strategy - Optimizing solution for: {request}
// Search Space Definition
connect("search_engine", "https://search.example.com")
connect("optimization_service", "https://optimize.example.com")
connect("evaluation_metrics", "https://metrics.example.com")

// Heuristic Functions
connect("cost_heuristic", "https://heuristics.example.com/cost")
connect("performance_heuristic", "https://heuristics.example.com/performance")
connect("scalability_heuristic", "https://heuristics.example.com/scalability")

// Solution Space
connect("solution_space", "postgresql://localhost:5432/solutions")
connect("best_solution", "postgresql://localhost:5432/optimal")

allocate_memory("search_buffer", 16384)
allocate_memory("heuristic_cache", 8192)
allocate_memory("solution_cache", 4096)

create_fingerprint("search_state", "current_search_hash")
create_fingerprint("heuristic_value", "heuristic_evaluation_hash")
create_fingerprint("optimal_solution", "best_solution_hash")

initiate_siig_transfer("search_engine", "heuristic_functions", "evaluation_request")
initiate_siig_transfer("heuristic_functions", "optimization_service", "optimization_request")
initiate_siig_transfer("optimization_service", "solution_space", "solution_storage")"#
    )
}

fn meta_learning_template(request: &str) -> String {
    format!(
        r#"// Meta-Learning Strategy - Learning from similar problems: {request}
// Knowledge Base
connect("knowledge_base", "postgresql://localhost:5432/knowledge")
connect("experience_store", "postgresql://localhost:5432/experiences")
connect("pattern_library", "postgresql://localhost:5432/patterns")

// Learning Components
connect("similarity_engine", "https://similarity.example.com")
connect("adaptation_service", "https://adapt.example.com")
connect("learning_algorithm", "https://learn.example.com")

// Meta-Learning Process
connect("meta_controller", "https://meta.example.com")
connect("transfer_learning", "https://transfer.example.com")

allocate_memory("knowledge_cache", 20480)
allocate_memory("learning_buffer", 10240)
allocate_memory("adaptation_cache", 5120)

create_fingerprint("knowledge_graph", "learned_patterns_hash")
create_fingerprint("similarity_score", "problem_similarity_hash")
create_fingerprint("adapted_solution", "transferred_solution_hash")

initiate_siig_transfer("similarity_engine", "knowledge_base", "pattern_lookup")
initiate_siig_transfer("knowledge_base", "adaptation_service", "solution_adaptation")
initiate_siig_transfer("adaptation_service", "learning_algorithm", "meta_learning")"#
    )
}

fn database_template(_request: &str) -> String {
    r#"// Database connection and management
connect("main_database", "postgresql://localhost:5432/app_db")
connect("cache_db", "redis://localhost:6379")

allocate_memory("query_cache", 4096)
allocate_memory("session_data", 2048)

create_fingerprint("db_connection", "database_identity")
create_fingerprint("user_session", "session_data_hash")

initiate_siig_transfer("client", "main_database", "user_query")"#
        .to_string()
}

fn auth_template(_request: &str) -> String {
    r#"// User authentication system
connect("auth_database", "postgresql://localhost:5432/auth_db")
connect("session_store", "redis://localhost:6379")

allocate_memory("user_credentials", 1024)
allocate_memory("session_tokens", 2048)

create_fingerprint("user_123", "password_hash")
create_fingerprint("session_token", "token_data")

initiate_siig_transfer("login_form", "auth_database", "credentials")
initiate_siig_transfer("auth_database", "session_store", "session_data")"#
        .to_string()
}

fn api_template(_request: &str) -> String {
    r#"// API service connections
connect("user_api", "https://api.example.com/users")
connect("payment_api", "https://api.example.com/payments")
connect("notification_api", "https://api.example.com/notifications")

allocate_memory("api_cache", 8192)
allocate_memory("request_buffer", 4096)

create_fingerprint("api_key", "service_identity")
create_fingerprint("request_id", "request_data_hash")

initiate_siig_transfer("client", "user_api", "user_request")
initiate_siig_transfer("user_api", "payment_api", "payment_data")"#
        .to_string()
}

fn file_transfer_template(_request: &str) -> String {
    r#"// Secure file transfer system
connect("source_storage", "/path/to/source/files")
connect("destination_storage", "/path/to/destination")
connect("transfer_queue", "rabbitmq://localhost:5672")

allocate_memory("file_buffer", 10485760)
allocate_memory("transfer_metadata", 1024)

create_fingerprint("file_001", "file_content_hash")
create_fingerprint("transfer_session", "session_data")

initiate_siig_transfer("source_storage", "file_buffer", "file_data")
initiate_siig_transfer("file_buffer", "destination_storage", "processed_file")"#
        .to_string()
}

fn web_template(_request: &str) -> String {
    r#"// Web application system
connect("web_server", "http://localhost:3000")
connect("api_gateway", "https://api.example.com")
connect("static_assets", "https://cdn.example.com")

allocate_memory("session_cache", 2048)
allocate_memory("request_buffer", 4096)

create_fingerprint("user_session", "session_token_hash")
create_fingerprint("api_request", "request_signature")

initiate_siig_transfer("browser", "web_server", "http_request")
initiate_siig_transfer("web_server", "api_gateway", "api_call")"#
        .to_string()
}

fn microservices_template(_request: &str) -> String {
    r#"// Microservices architecture
connect("user_service", "http://user-service:8080")
connect("order_service", "http://order-service:8081")
connect("payment_service", "http://payment-service:8082")
connect("notification_service", "http://notification-service:8083")

allocate_memory("service_registry", 4096)
allocate_memory("message_queue", 8192)

create_fingerprint("service_discovery", "service_identity")
create_fingerprint("inter_service_call", "call_signature")

initiate_siig_transfer("user_service", "order_service", "order_request")
initiate_siig_transfer("order_service", "payment_service", "payment_data")"#
        .to_string()
}

fn security_template(_request: &str) -> String {
    r#"// Security and encryption system
connect("vault_service", "https://vault.example.com")
connect("certificate_store", "https://certs.example.com")
connect("audit_log", "https://audit.example.com")

allocate_memory("encryption_keys", 1024)
allocate_memory("security_tokens", 2048)

create_fingerprint("encryption_key", "key_fingerprint")
create_fingerprint("security_token", "token_hash")

initiate_siig_transfer("client", "vault_service", "key_request")
initiate_siig_transfer("vault_service", "audit_log", "access_log")"#
        .to_string()
}

fn data_processing_template(_request: &str) -> String {
    r#"// Data processing pipeline
connect("data_source", "postgresql://source:5432/data")
connect("processing_engine", "spark://cluster:7077")
connect("data_warehouse", "postgresql://warehouse:5432/analytics")

allocate_memory("data_buffer", 10485760)
allocate_memory("processing_cache", 5242880)

create_fingerprint("data_batch", "batch_hash")
create_fingerprint("processing_job", "job_signature")

initiate_siig_transfer("data_source", "processing_engine", "raw_data")
initiate_siig_transfer("processing_engine", "data_warehouse", "processed_data")"#
        .to_string()
}

fn generic_template(request: &str) -> String {
    // Display excerpt is capped at 50 characters, ellipsis always appended
    let excerpt: String = request.chars().take(50).collect();
    format!(
        r#"// Generated FLUX code for: {excerpt}...
connect("primary_service", "https://api.example.com/service")
connect("data_store", "postgresql://localhost:5432/data")

allocate_memory("processing_buffer", 4096)
allocate_memory("result_cache", 2048)

create_fingerprint("operation_id", "operation_data_hash")
create_fingerprint("data_integrity", "data_hash")

initiate_siig_transfer("input_source", "primary_service", "input_data")
initiate_siig_transfer("primary_service", "data_store", "processed_data")"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_tag_round_trips_wire_names() {
        for tag in StrategyTag::ALL {
            assert_eq!(StrategyTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(StrategyTag::parse("quantum_annealing"), None);
    }

    #[test]
    fn strategy_dispatch_wins_over_keywords() {
        // The request is full of keywords, but an explicit tag ignores them
        let request = "build a database with authentication and an api";
        let code = select(request, Some(StrategyTag::HeuristicSearch));
        assert!(code.starts_with("// Heuristic Search Strategy - Optimizing solution for:"));
        assert!(code.contains(request));

        let code = select(request, Some(StrategyTag::DecomposeProblem));
        assert!(code.starts_with("// Problem Decomposition Strategy - Breaking down:"));
    }

    #[test]
    fn each_strategy_selects_its_own_template() {
        let headers = [
            (StrategyTag::DecomposeProblem, "// Problem Decomposition Strategy"),
            (StrategyTag::PatternRecognition, "// Pattern Recognition Strategy"),
            (StrategyTag::HeuristicSearch, "// Heuristic Search Strategy"),
            (StrategyTag::MetaLearning, "// Meta-Learning Strategy"),
        ];
        for (tag, header) in headers {
            assert!(select("anything", Some(tag)).starts_with(header));
        }
    }

    #[test]
    fn first_matching_keyword_group_wins() {
        // "database" outranks "api" even though both are present
        let code = select("expose the database through an api", None);
        assert!(code.starts_with("// Database connection and management"));

        // "api" outranks "file"
        let code = select("an api that serves file downloads", None);
        assert!(code.starts_with("// API service connections"));

        // "auth" outranks "web"
        let code = select("web login page", None);
        assert!(code.starts_with("// User authentication system"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let code = select("Set up a DATABASE for me", None);
        assert!(code.starts_with("// Database connection and management"));
    }

    #[test]
    fn auth_example_from_ui() {
        let code = select("Please set up a login system", None);
        assert!(code.starts_with("// User authentication system"));
        assert!(code.contains(
            r#"connect("auth_database", "postgresql://localhost:5432/auth_db")"#
        ));
    }

    #[test]
    fn remaining_keyword_groups_dispatch() {
        let cases = [
            ("transfer these records", "// Secure file transfer system"),
            ("a frontend for the shop", "// Web application system"),
            ("make it secure", "// Security and encryption system"),
            ("processing pipeline", "// Data processing pipeline"),
        ];
        for (request, header) in cases {
            assert!(
                select(request, None).starts_with(header),
                "request {:?} picked the wrong template",
                request
            );
        }
    }

    #[test]
    fn microservices_group_is_shadowed_by_service_substring() {
        // "microservices" contains "service", so the earlier api/service
        // group always wins; preserved as-is for compatibility.
        let code = select("split into microservices", None);
        assert!(code.starts_with("// API service connections"));
    }

    #[test]
    fn generic_fallback_truncates_excerpt_to_fifty_chars() {
        let request = "x".repeat(80);
        let code = select(&request, None);
        let first_line = code.lines().next().unwrap();
        assert_eq!(
            first_line,
            format!("// Generated FLUX code for: {}...", "x".repeat(50))
        );
    }

    #[test]
    fn generic_fallback_keeps_short_input_intact() {
        let code = select("orchestrate the moon", None);
        assert!(code.starts_with("// Generated FLUX code for: orchestrate the moon..."));
    }

    #[test]
    fn select_is_deterministic() {
        let request = "please set up a login system";
        assert_eq!(select(request, None), select(request, None));
        assert_eq!(
            select(request, Some(StrategyTag::MetaLearning)),
            select(request, Some(StrategyTag::MetaLearning))
        );
    }
}
