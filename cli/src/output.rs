use colored::*;
use fluxhive_core::types::{
    Agi15Response, BrackResponse, ClusterResponse, ExecutionResult, FrameworkResponse,
    HealthResponse, PtpfMode, PtpfPrompt, PtpfResponse, PtpfStatus, SessionHistory, SystemState,
    WardenResponse,
};

/// Print a PTPF generation result, whatever mode the generator answered in
pub fn print_ptpf_response(response: &PtpfResponse) {
    match response.mode {
        Some(PtpfMode::Trainer) => print_trainer_questions(response),
        Some(PtpfMode::DriftLock) => print_drift_lock(response),
        Some(PtpfMode::Error) => {
            print_error(response.error.as_deref().unwrap_or("PTPF generation failed"));
        }
        _ => {
            if let Some(prompt) = &response.response {
                print_generated_prompt(prompt);
            } else {
                print_ptpf_sections(response);
            }
        }
    }
}

fn print_ptpf_sections(response: &PtpfResponse) {
    println!("{}", "PTPF Prompt Structure".cyan().bold());
    print_section(
        "Prime Context",
        response.prime_context.as_deref().unwrap_or("Generated prime context..."),
    );
    print_section(
        "Task Definition",
        response
            .task_definition
            .as_deref()
            .unwrap_or("Generated task definition..."),
    );
    print_section(
        "Vibe Profile",
        response.vibe_profile.as_deref().unwrap_or("Generated vibe profile..."),
    );
}

fn print_generated_prompt(prompt: &PtpfPrompt) {
    println!("{}", "PTPF+FLUX Generated Prompt".cyan().bold());
    let sections = [
        ("Role", &prompt.role),
        ("Context", &prompt.context),
        ("Task", &prompt.task),
        ("Constraints", &prompt.constraints),
        ("Success Criteria", &prompt.success_criteria),
        ("Format", &prompt.format),
        ("Notes", &prompt.notes),
        ("Vibe", &prompt.vibe),
        ("M-Sigill", &prompt.m_sigill),
        ("Prime Sigill", &prompt.sigill),
    ];
    for (title, value) in sections {
        if let Some(text) = value {
            print_section(title, text);
        }
    }
}

fn print_trainer_questions(response: &PtpfResponse) {
    println!("{}", "PTPF Trainer Questions".yellow().bold());
    println!("Your input needs more specificity. Please answer these questions:");
    print_list("Missing Specifics", response.missing_specifics.as_deref());
    print_list("Questions", response.questions.as_deref());
    print_list("Examples", response.examples.as_deref());
}

fn print_drift_lock(response: &PtpfResponse) {
    println!("{}", "PTPF DriftLock Activated".yellow().bold());
    println!("Your input has triggered DriftLock due to the following issues:");
    print_list("Issues", response.issues.as_deref());
    println!("Please refine your input and try again.");
}

fn print_list(title: &str, items: Option<&[String]>) {
    let Some(items) = items else { return };
    if items.is_empty() {
        return;
    }
    println!("\n{}:", title.cyan());
    for item in items {
        println!("  {} {}", "•".yellow(), item);
    }
}

fn print_section(title: &str, text: &str) {
    println!("\n{}:", title.cyan());
    println!("  {}", text);
}

/// Print the LanternHive cognitive analysis
pub fn print_analysis(analysis: &str) {
    println!("{}", "LanternHive Analysis".cyan().bold());
    println!("{}", analysis);
}

/// Print generated FLUX code with a separator frame
pub fn print_flux_code(code: &str) {
    println!("{}", "Generated FLUX Code".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", code);
    println!("{}", "─".repeat(40).dimmed());
}

/// Print the result of executing FLUX code on the backend
pub fn print_execution_result(result: &ExecutionResult) {
    if result.success {
        println!("{}", "✓ Execution completed successfully".green());

        if let Some(log) = &result.execution_log {
            for line in log {
                println!("> {}", line);
            }
        }

        if let Some(connections) = &result.created_connections {
            println!(
                "{}",
                format!("Created {} connections", connections.len()).green()
            );
        }
    } else {
        let reason = result.error.as_deref().unwrap_or("unknown error");
        println!("{}", format!("✗ Execution failed: {}", reason).red());
    }

    if let Some(errors) = &result.errors {
        for error in errors {
            println!("{}", format!("Error: {}", error).red());
        }
    }
}

/// Print a system state snapshot
pub fn print_system_state(state: &SystemState) {
    println!("{}", "System State".cyan().bold());
    println!("  Connections:   {}", state.connection_count());
    println!("  Memory blocks: {}", state.memory_block_count());
    println!("  Fingerprints:  {}", state.fingerprint_count());
    println!(
        "  LanternHive:   {}",
        if state.lantern_hive_enabled {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );
    println!(
        "  PTPF:          {}",
        if state.ptpf_generator_enabled {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );
}

/// Print the backend health report
pub fn print_health(health: &HealthResponse) {
    println!("{}", "Backend Health".cyan().bold());
    println!("  Status:            {}", health.status.as_deref().unwrap_or("unknown"));
    println!("  LanternHive:       {}", enabled_str(health.lantern_hive_enabled));
    println!("  Lantern Framework: {}", enabled_str(health.lantern_framework_enabled));
    println!("  PTPF Generator:    {}", enabled_str(health.ptpf_generator_enabled));
    println!("  Strategy Engine:   {}", enabled_str(health.strategy_engine_enabled));
    println!("  Connections:       {}", health.active_connections);
    println!("  Memory blocks:     {}", health.floating_memory_blocks);
    println!("  Fingerprints:      {}", health.fingerprints);
}

fn enabled_str(enabled: bool) -> ColoredString {
    if enabled {
        "enabled".green()
    } else {
        "disabled".red()
    }
}

/// Print an AGI15 translation result
pub fn print_agi15(result: &Agi15Response) {
    print_section("Original", result.original.as_deref().unwrap_or(""));
    print_section("AGI15 Translation", result.translation.as_deref().unwrap_or(""));
    if let Some(domains) = &result.domain_context {
        println!("\n{}:", "Domain Context".cyan());
        for (domain, words) in domains {
            println!("  {}: {}", domain.bold(), words.join(", "));
        }
    }
}

/// Print a cluster processing result
pub fn print_cluster(result: &ClusterResponse) {
    print_section("Input", result.input.as_deref().unwrap_or(""));
    if let Some(threads) = result.threads_created {
        print_section("Threads Created", &threads.to_string());
    }
    print_section("Cluster Output", result.cluster_output.as_deref().unwrap_or(""));
}

/// Print a Warden synthesis result
pub fn print_warden(result: &WardenResponse) {
    print_section("Input", result.input.as_deref().unwrap_or(""));
    if let Some(responses) = &result.lantern_responses {
        println!("\n{}:", "Lantern Responses".cyan());
        for response in responses {
            println!("  {} {}", "•".yellow(), response);
        }
    }
    print_section("Reality Frame", result.reality_frame.as_deref().unwrap_or(""));
}

/// Print a Brack execution result
pub fn print_brack(result: &BrackResponse) {
    print_section("Input Code", result.input_code.as_deref().unwrap_or(""));
    print_section(
        "Execution Result",
        result.execution_result.as_deref().unwrap_or(""),
    );
    if let Some(bindings) = &result.variable_bindings {
        print_section(
            "Variable Bindings",
            &serde_json::to_string_pretty(bindings).unwrap_or_default(),
        );
    }
}

/// Print a Lantern Framework pipeline result
pub fn print_framework(result: &FrameworkResponse) {
    print_section("Input", result.original_input.as_deref().unwrap_or(""));
    if let Some(translation) = &result.agi15_translation {
        print_section("AGI15 Translation", translation);
    }
    print_section("Output", result.final_output.as_deref().unwrap_or(""));
}

/// Print the backend PTPF session history
pub fn print_session_history(history: &SessionHistory) {
    println!("{}", "PTPF Session History".cyan().bold());
    if history.history.is_empty() {
        println!("  (empty)");
        return;
    }
    for (i, entry) in history.history.iter().enumerate() {
        println!(
            "  {}. {}",
            i + 1,
            serde_json::to_string(entry).unwrap_or_default()
        );
    }
}

/// Print the PTPF generator status
pub fn print_ptpf_status(status: &PtpfStatus) {
    println!("{}", "PTPF Generator".cyan().bold());
    println!(
        "  Status:   {}",
        if status.enabled {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );
    println!("  Sessions: {}", status.session_count);
}

/// Print an error notice
pub fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {}", message).red());
}

/// Show usage instructions when no request or action is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "fluxhive \"describe what you want to build\"".green().bold());
    println!("    Run the guided workflow once for a request");
    println!();
    println!("  {}", "fluxhive -i".green().bold());
    println!("    Start an interactive workflow session");
    println!();
    println!("  {}", "fluxhive agi15 <text> | cluster <input> | warden <input> | brack <code>".green().bold());
    println!("    Call an individual Lantern Framework endpoint");
    println!();
    println!("  {}", "fluxhive connect | disconnect-all | memory | gc | transfer | fingerprint".green().bold());
    println!("    Send a control event over the realtime channel");
    println!();
    println!("  {}", "fluxhive ptpf generate <input> | rehydrate <file> | session | clear | status".green().bold());
    println!("    Drive the PTPF generator directly");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --strategy <TAG>         decompose_problem, pattern_recognition,");
    println!("                           heuristic_search or meta_learning");
    println!("  --execute                Run the generated FLUX code on the backend");
    println!("  --backend-url <URL>      Override the backend base URL");
    println!("  --help                   Show this help message");
    println!();
}
