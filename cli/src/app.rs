use anyhow::{anyhow, Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use url::Url;

use fluxhive_core::client::FluxClient;
use fluxhive_core::config::FluxConfig;
use fluxhive_core::realtime::{
    generate_id, ClientEvent, Incoming, RealtimeClient, ServerEvent, StateTracker,
};
use fluxhive_core::session::{StrategyChoice, WorkflowSession};
use fluxhive_core::templates::{self, StrategyTag};
use fluxhive_core::types::{
    FluxContext, LanternProcessRequest, PtpfGenerateRequest, PtpfResponse, StrategyExecuteRequest,
};
use log::{debug, error, info, warn};

use crate::cli::{Command, PtpfAction, StrategyAction};
use crate::output;

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Resolves the strategy flag to a choice, rejecting unknown tags
pub fn parse_strategy_flag(flag: Option<&str>) -> Result<StrategyChoice> {
    match flag {
        None => Ok(StrategyChoice::Auto),
        Some(raw) => StrategyTag::parse(raw)
            .map(StrategyChoice::Strategy)
            .ok_or_else(|| {
                anyhow!(
                    "unknown strategy '{}' (expected one of: {})",
                    raw,
                    StrategyTag::ALL
                        .iter()
                        .map(|tag| tag.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }),
    }
}

/// Runs the guided workflow once: request -> strategy -> PTPF -> analysis ->
/// FLUX code. Returns the completed session.
pub async fn run_workflow(
    client: &FluxClient,
    request: &str,
    choice: StrategyChoice,
) -> Result<WorkflowSession> {
    let mut session = WorkflowSession::new(request)?;
    session.select_strategy(choice)?;

    if let Some(tag) = choice.tag() {
        println!(
            "Strategy selected: {} - {}",
            tag.display_name().bold(),
            tag.description()
        );
    } else {
        println!("No strategy selected; FLUX code will be chosen by keyword match.");
    }
    println!();

    // Step: PTPF prompt generation. A backend failure here is not fatal; the
    // workflow continues with locally composed fallback sections.
    let strategy_name = choice.tag().map(|tag| tag.as_str().to_string());
    let ptpf_request = PtpfGenerateRequest {
        input: session.request().to_string(),
        flux_context: Some(FluxContext {
            task: Some("Generate structured prompt for FLUX code generation".to_string()),
            strategy: strategy_name.clone(),
            ..Default::default()
        }),
    };

    let progress = spinner("Generating PTPF prompt structure...");
    let ptpf_result = client.generate_ptpf(&ptpf_request).await;
    progress.finish_and_clear();

    let ptpf = match ptpf_result {
        Ok(response) if response.success => {
            info!("PTPF prompt structure generated");
            response
        }
        Ok(response) => {
            warn!("PTPF generation reported failure: {:?}", response.error);
            println!(
                "{}",
                "PTPF generation failed; using fallback sections.".yellow()
            );
            fallback_ptpf(&session, choice)
        }
        Err(e) => {
            warn!("PTPF generation failed: {}", e);
            println!(
                "{}",
                format!("PTPF generation failed ({}); using fallback sections.", e).yellow()
            );
            fallback_ptpf(&session, choice)
        }
    };
    output::print_ptpf_response(&ptpf);
    println!();
    session.attach_ptpf(ptpf)?;

    // Step: LanternHive cognitive analysis. A failure here leaves the session
    // at its last completed state; the user re-runs the workflow to retry.
    let lantern_request = LanternProcessRequest {
        prompt: session.request().to_string(),
        flux_context: Some(FluxContext {
            task: Some("Generate FLUX code based on user request".to_string()),
            strategy: strategy_name,
            ptpf_context: session
                .ptpf_result()
                .and_then(|r| serde_json::to_value(r).ok()),
            ..Default::default()
        }),
    };

    let progress = spinner("Running LanternHive cognitive analysis...");
    let lantern_result = client.process_lantern(&lantern_request).await;
    progress.finish_and_clear();

    let analysis = match lantern_result {
        Ok(response) => {
            if let Some(final_response) = response.final_response.clone() {
                output::print_analysis(&final_response);
                println!();
                response
            } else {
                let reason = response
                    .error
                    .unwrap_or_else(|| "LanternHive analysis failed".to_string());
                return Err(anyhow!(reason).context("LanternHive analysis failed"));
            }
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context("LanternHive analysis failed"));
        }
    };
    session.attach_analysis(analysis)?;

    // Step: select the FLUX code template locally and display it
    let flux_code = templates::select(session.request(), choice.tag());
    output::print_flux_code(&flux_code);
    session.attach_flux_code(flux_code)?;

    Ok(session)
}

/// Locally composed PTPF sections shown when the backend call fails
fn fallback_ptpf(session: &WorkflowSession, choice: StrategyChoice) -> PtpfResponse {
    let strategy = choice
        .tag()
        .map(|tag| tag.as_str())
        .unwrap_or("keyword_dispatch");
    let request = session.request();

    PtpfResponse {
        success: false,
        prime_context: Some(format!(
            "Prime Context: {} approach for \"{}\" - focusing on systematic problem-solving and optimal solution generation.",
            strategy, request
        )),
        task_definition: Some(format!(
            "Task Definition: Generate FLUX code that implements {} using {} methodology with proper connections, memory allocation, and data flow.",
            request, strategy
        )),
        vibe_profile: Some(
            "Vibe Profile: Professional, systematic, and solution-oriented approach with emphasis on scalability, security, and maintainability."
                .to_string(),
        ),
        ..Default::default()
    }
}

/// A lagged receiver skipped events and can keep going; only a closed
/// channel ends the wait.
fn recoverable_lag(e: RecvError) -> Result<u64> {
    match e {
        RecvError::Lagged(skipped) => Ok(skipped),
        RecvError::Closed => Err(anyhow!("Realtime channel closed")),
    }
}

async fn connect_realtime(config: &FluxConfig) -> Result<(Arc<RealtimeClient>, Incoming)> {
    let url_str = config
        .realtime_url
        .clone()
        .ok_or_else(|| anyhow!("No realtime URL configured"))?;
    let url = Url::parse(&url_str).context("Invalid realtime URL")?;

    info!("Connecting to realtime channel at {}", url);
    RealtimeClient::connect(&url)
        .await
        .context("Failed to connect to the realtime channel")
}

/// Sends an event and waits for the first server event `pick` accepts
async fn realtime_request<T>(
    config: &FluxConfig,
    event: ClientEvent,
    message: &str,
    mut pick: impl FnMut(ServerEvent) -> Option<T>,
) -> Result<T> {
    let (client, mut incoming) = connect_realtime(config).await?;
    client.send(&event).await?;

    let progress = spinner(message);
    let outcome = loop {
        match incoming.recv().await {
            Ok(event) => {
                if let Some(value) = pick(event) {
                    break Ok(value);
                }
            }
            Err(e) => match recoverable_lag(e) {
                Ok(skipped) => {
                    warn!("Realtime receiver lagged; {} events dropped", skipped);
                }
                Err(err) => break Err(err),
            },
        }
    };
    progress.finish_and_clear();
    client.close().await.ok();
    outcome
}

/// Sends a control event and reports the next state snapshot. The backend
/// acknowledges control events with a snapshot; don't hang if none arrives.
async fn send_control_event(config: &FluxConfig, event: ClientEvent, notice: &str) -> Result<()> {
    let (client, mut incoming) = connect_realtime(config).await?;
    client.send(&event).await?;
    println!("{}", notice.green());

    let snapshot = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match incoming.recv().await {
                Ok(ServerEvent::StateUpdate(state)) => break Some(state),
                Ok(other) => {
                    debug!("Ignoring realtime event while waiting for state: {:?}", other);
                }
                Err(e) => match recoverable_lag(e) {
                    Ok(skipped) => {
                        warn!("Realtime receiver lagged; {} events dropped", skipped);
                    }
                    Err(_) => break None,
                },
            }
        }
    })
    .await;

    if let Ok(Some(state)) = snapshot {
        println!();
        output::print_system_state(&state);
    }

    client.close().await.ok();
    Ok(())
}

fn create_connection_event() -> (String, ClientEvent) {
    let connection_id = generate_id("conn_");
    (
        connection_id.clone(),
        ClientEvent::CreateConnection { connection_id },
    )
}

fn allocate_memory_event(data_type: &str, content: &str) -> (String, ClientEvent) {
    let memory_id = generate_id("mem_");
    (
        memory_id.clone(),
        ClientEvent::AllocateMemory {
            memory_id,
            data_type: data_type.to_string(),
            content: content.to_string(),
        },
    )
}

fn siig_transfer_event(source: &str, destination: &str) -> (String, ClientEvent) {
    let transfer_id = generate_id("transfer_");
    (
        transfer_id.clone(),
        ClientEvent::InitiateSiigTransfer {
            transfer_id,
            source: source.to_string(),
            destination: destination.to_string(),
        },
    )
}

fn fingerprint_event(data: &str) -> (String, ClientEvent) {
    let fingerprint_id = generate_id("fp_");
    (
        fingerprint_id.clone(),
        ClientEvent::GenerateFingerprint {
            fingerprint_id,
            data: data.to_string(),
        },
    )
}

/// Sends the generated FLUX code over the realtime channel and waits for the
/// execution outcome. State snapshots arriving meanwhile are applied
/// last-write-wins.
pub async fn execute_flux(config: &FluxConfig, code: &str) -> Result<()> {
    let (client, mut incoming) = connect_realtime(config).await?;

    client
        .send(&ClientEvent::ExecuteFlux {
            code: code.to_string(),
        })
        .await
        .context("Failed to send execute_flux event")?;

    let progress = spinner("Executing FLUX code on the backend...");
    let mut tracker = StateTracker::default();

    loop {
        match incoming.recv().await {
            Ok(ServerEvent::ExecutionResult(result)) => {
                progress.finish_and_clear();
                output::print_execution_result(&result);
                break;
            }
            Ok(ServerEvent::ExecutionError(payload)) => {
                progress.finish_and_clear();
                println!("{}", format!("✗ Execution error: {}", payload.error).red());
                break;
            }
            Ok(ServerEvent::StateUpdate(state)) => {
                tracker.apply(state);
            }
            Ok(other) => {
                debug!("Ignoring realtime event during execution: {:?}", other);
            }
            Err(e) => match recoverable_lag(e) {
                Ok(skipped) => {
                    warn!("Realtime receiver lagged; {} events dropped", skipped);
                }
                Err(err) => {
                    progress.finish_and_clear();
                    return Err(err);
                }
            },
        }
    }

    if let Some(state) = tracker.latest() {
        println!();
        output::print_system_state(state);
    }

    client.close().await.ok();
    Ok(())
}

/// Requests a system state snapshot over the realtime channel and prints it
pub async fn show_system_state(config: &FluxConfig) -> Result<()> {
    let state = realtime_request(
        config,
        ClientEvent::GetSystemState,
        "Fetching system state...",
        |event| match event {
            ServerEvent::StateUpdate(state) => Some(state),
            other => {
                debug!("Ignoring realtime event while waiting for state: {:?}", other);
                None
            }
        },
    )
    .await?;

    output::print_system_state(&state);
    Ok(())
}

/// Runs a single request through the guided workflow
pub async fn run_single_request(
    client: &FluxClient,
    config: &FluxConfig,
    request: String,
    strategy_flag: Option<&str>,
    execute: bool,
) -> Result<()> {
    let choice = parse_strategy_flag(strategy_flag)?;

    let session = match run_workflow(client, &request, choice).await {
        Ok(session) => session,
        Err(e) => {
            error!("Workflow failed: {}", e);
            output::print_error(&format!("{:#}", e));
            return Err(e);
        }
    };

    if execute {
        let code = session
            .flux_code()
            .ok_or_else(|| anyhow!("No FLUX code to execute"))?;
        execute_flux(config, code).await?;
    }

    Ok(())
}

/// Runs an interactive workflow session
pub async fn run_interactive(client: &FluxClient, config: &FluxConfig) -> Result<()> {
    println!("Starting interactive FLUX workflow session.");
    println!("Type 'exit' or 'quit' to end the session.");
    println!();

    loop {
        print!("{}: ", "Request".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Exiting workflow session.");
            break;
        }

        // Validation happens before any network call
        if input.is_empty() {
            println!("{}", "Error: Please describe what you want to do".red());
            continue;
        }

        let choice = match select_strategy_interactively()? {
            Some(choice) => choice,
            None => continue,
        };

        match run_workflow(client, input, choice).await {
            Ok(session) => {
                if prompt_yes_no("Execute the generated FLUX code on the backend? [y/N] ")? {
                    if let Some(code) = session.flux_code() {
                        if let Err(e) = execute_flux(config, code).await {
                            error!("Execution failed: {}", e);
                            output::print_error(&format!("{:#}", e));
                        }
                    }
                }
            }
            Err(e) => {
                // The session stays at its last completed step; a new request
                // starts a fresh one.
                error!("Workflow failed: {}", e);
                output::print_error(&format!("{:#}", e));
            }
        }

        println!(); // Add spacing between interactions
    }

    Ok(())
}

/// Shows the strategy menu and reads a selection
fn select_strategy_interactively() -> Result<Option<StrategyChoice>> {
    println!("\nSelect an AI strategy:");
    for (i, tag) in StrategyTag::ALL.iter().enumerate() {
        println!(
            "  {}. {} - {}",
            i + 1,
            tag.display_name().blue(),
            tag.description()
        );
    }
    println!(
        "  {}. {}",
        StrategyTag::ALL.len() + 1,
        "Automatic (keyword match)".green()
    );
    println!();

    loop {
        print!("Select a strategy (1-{}): ", StrategyTag::ALL.len() + 1);
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        match input.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= StrategyTag::ALL.len() => {
                return Ok(Some(StrategyChoice::Strategy(StrategyTag::ALL[n - 1])));
            }
            Ok(n) if n == StrategyTag::ALL.len() + 1 => {
                return Ok(Some(StrategyChoice::Auto));
            }
            _ => {
                println!(
                    "Invalid selection. Please enter a number between 1 and {}.",
                    StrategyTag::ALL.len() + 1
                );
            }
        }
    }
}

fn prompt_yes_no(message: &str) -> Result<bool> {
    print!("{}", message);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Dispatches a subcommand to the matching backend call
pub async fn run_command(
    client: &FluxClient,
    config: &FluxConfig,
    command: Command,
) -> Result<()> {
    match command {
        Command::Agi15 { text } => {
            let progress = spinner("Translating through AGI15...");
            let result = client
                .translate_agi15(&text)
                .await
                .context("AGI15 translation failed");
            progress.finish_and_clear();
            output::print_agi15(&result?);
        }
        Command::Cluster { input } => {
            let progress = spinner("Processing through lantern cluster...");
            let result = client
                .process_cluster(&input)
                .await
                .context("Cluster processing failed");
            progress.finish_and_clear();
            output::print_cluster(&result?);
        }
        Command::Warden { input } => {
            let progress = spinner("Synthesizing Warden reality frame...");
            let result = client
                .synthesize_warden(&input)
                .await
                .context("Warden synthesis failed");
            progress.finish_and_clear();
            output::print_warden(&result?);
        }
        Command::Brack { code } => {
            let progress = spinner("Executing Brack code...");
            let result = client
                .execute_brack(&code)
                .await
                .context("Brack execution failed");
            progress.finish_and_clear();
            output::print_brack(&result?);
        }
        Command::Framework { input } => {
            let progress = spinner("Running the Lantern Framework pipeline...");
            let result = client
                .process_framework(&input)
                .await
                .context("Framework processing failed");
            progress.finish_and_clear();
            output::print_framework(&result?);
        }
        Command::Lantern { prompt } => {
            let outcome = realtime_request(
                config,
                ClientEvent::LanternQuery { prompt },
                "Querying LanternHive...",
                |event| match event {
                    ServerEvent::LanternResponse(response) => Some(Ok(response)),
                    ServerEvent::LanternError(payload) => Some(Err(payload.error)),
                    _ => None,
                },
            )
            .await?;
            match outcome {
                Ok(response) => {
                    let text = response
                        .final_response
                        .as_deref()
                        .or(response.message.as_deref())
                        .unwrap_or("(empty response)");
                    output::print_analysis(text);
                }
                Err(error) => output::print_error(&error),
            }
        }
        Command::Strategies { action } => run_strategy_action(client, action).await?,
        Command::Ptpf { action } => run_ptpf_action(client, config, action).await?,
        Command::Connect { name: Some(name) } => {
            let connection = client
                .create_connection(&name)
                .await
                .context("Failed to create connection")?;
            println!(
                "{}",
                format!(
                    "✓ Connection '{}' created (id: {})",
                    connection.name.as_deref().unwrap_or("unnamed"),
                    connection.id.as_deref().unwrap_or("unknown")
                )
                .green()
            );
        }
        Command::Connect { name: None } => {
            let (connection_id, event) = create_connection_event();
            send_control_event(
                config,
                event,
                &format!("Creating connection: {}", connection_id),
            )
            .await?;
        }
        Command::DisconnectAll => {
            send_control_event(
                config,
                ClientEvent::DisconnectAllConnections,
                "Disconnecting all connections",
            )
            .await?;
        }
        Command::Memory { data_type, content } => {
            let (memory_id, event) = allocate_memory_event(&data_type, &content);
            send_control_event(
                config,
                event,
                &format!("Allocating floating memory: {}", memory_id),
            )
            .await?;
        }
        Command::Gc => {
            send_control_event(
                config,
                ClientEvent::GarbageCollect,
                "Running garbage collection",
            )
            .await?;
        }
        Command::Transfer {
            source,
            destination,
        } => {
            let (transfer_id, event) = siig_transfer_event(&source, &destination);
            send_control_event(
                config,
                event,
                &format!("Initiating SIIG transfer: {}", transfer_id),
            )
            .await?;
        }
        Command::Fingerprint { data } => {
            let (fingerprint_id, event) = fingerprint_event(&data);
            send_control_event(
                config,
                event,
                &format!("Generating fingerprint: {}", fingerprint_id),
            )
            .await?;
        }
        Command::State => show_system_state(config).await?,
        Command::Health => {
            let health = client.health().await.context("Health check failed")?;
            output::print_health(&health);
        }
    }
    Ok(())
}

async fn run_strategy_action(client: &FluxClient, action: StrategyAction) -> Result<()> {
    match action {
        StrategyAction::List => {
            let strategies = client
                .list_strategies()
                .await
                .context("Failed to list strategies")?;
            println!("{}", "Available Strategies".cyan().bold());
            if strategies.strategies.is_empty() {
                println!("  (none uploaded)");
            }
            let mut ids: Vec<_> = strategies.strategies.keys().collect();
            ids.sort();
            for id in ids {
                let info = &strategies.strategies[id];
                println!(
                    "  {} - {}",
                    info.name.as_deref().unwrap_or(id.as_str()).bold(),
                    info.description.as_deref().unwrap_or("")
                );
            }
        }
        StrategyAction::Execute {
            strategy_id,
            problem,
        } => {
            let progress = spinner("Executing strategy...");
            let result = client
                .execute_strategy(&StrategyExecuteRequest {
                    strategy_id,
                    problem,
                    context: serde_json::json!({}),
                })
                .await
                .context("Strategy execution failed");
            progress.finish_and_clear();
            let result = result?;
            if result.success {
                println!("{}", "Strategy Result".cyan().bold());
                if let Some(solution) = &result.solution {
                    println!("{}", solution);
                }
                if let Some(message) = &result.message {
                    println!("{}", message);
                }
            } else {
                output::print_error(result.error.as_deref().unwrap_or("strategy failed"));
            }
        }
        StrategyAction::Upload { file } => {
            let result = client
                .upload_strategy(&file)
                .await
                .context("Strategy upload failed")?;
            if result.success {
                println!(
                    "{}",
                    format!(
                        "✓ Uploaded strategy '{}'",
                        result.strategy_id.as_deref().unwrap_or("unknown")
                    )
                    .green()
                );
            } else {
                output::print_error(result.error.as_deref().unwrap_or("upload rejected"));
            }
        }
    }
    Ok(())
}

async fn run_ptpf_action(
    client: &FluxClient,
    config: &FluxConfig,
    action: PtpfAction,
) -> Result<()> {
    match action {
        PtpfAction::Generate { input } => {
            let outcome = realtime_request(
                config,
                ClientEvent::GeneratePtpfFlux {
                    input,
                    flux_context: None,
                },
                "Generating PTPF prompt structure...",
                |event| match event {
                    ServerEvent::PtpfResult(response) => Some(Ok(response)),
                    ServerEvent::PtpfError(payload) => Some(Err(payload.error)),
                    _ => None,
                },
            )
            .await?;
            match outcome {
                Ok(response) => output::print_ptpf_response(&response),
                Err(error) => output::print_error(&error),
            }
        }
        PtpfAction::Rehydrate { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let response_data: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;

            let outcome = realtime_request(
                config,
                ClientEvent::RehydratePtpf { response_data },
                "Rehydrating PTPF response...",
                |event| match event {
                    ServerEvent::PtpfRehydrated(response) => Some(Ok(response)),
                    ServerEvent::PtpfError(payload) => Some(Err(payload.error)),
                    _ => None,
                },
            )
            .await?;
            match outcome {
                Ok(response) => output::print_ptpf_response(&response),
                Err(error) => output::print_error(&error),
            }
        }
        PtpfAction::Session => {
            let history = client
                .ptpf_session_history()
                .await
                .context("Failed to fetch PTPF session history")?;
            output::print_session_history(&history);
        }
        PtpfAction::Clear => {
            let response = client
                .clear_ptpf_session()
                .await
                .context("Failed to clear PTPF session")?;
            println!(
                "{}",
                format!(
                    "✓ {}",
                    response.message.as_deref().unwrap_or("PTPF session cleared")
                )
                .green()
            );
        }
        PtpfAction::Status => {
            let status = client
                .ptpf_status()
                .await
                .context("Failed to fetch PTPF status")?;
            output::print_ptpf_status(&status);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_strategy_flag_means_keyword_dispatch() {
        let choice = parse_strategy_flag(None).unwrap();
        assert_eq!(choice, StrategyChoice::Auto);
    }

    #[test]
    fn strategy_flag_parses_known_tags() {
        let choice = parse_strategy_flag(Some("decompose_problem")).unwrap();
        assert_eq!(
            choice,
            StrategyChoice::Strategy(StrategyTag::DecomposeProblem)
        );
    }

    #[test]
    fn unknown_strategy_flag_is_rejected() {
        let err = parse_strategy_flag(Some("quantum_leap")).unwrap_err();
        assert!(err.to_string().contains("quantum_leap"));
    }

    #[test]
    fn fallback_sections_mention_the_request_and_strategy() {
        let session = WorkflowSession::new("Build a REST API").unwrap();
        let ptpf = fallback_ptpf(
            &session,
            StrategyChoice::Strategy(StrategyTag::HeuristicSearch),
        );

        assert!(!ptpf.success);
        assert!(ptpf.prime_context.as_deref().unwrap().contains("heuristic_search"));
        assert!(ptpf
            .task_definition
            .as_deref()
            .unwrap()
            .contains("Build a REST API"));
    }

    #[test]
    fn control_events_carry_generated_ids() {
        let (connection_id, event) = create_connection_event();
        assert!(connection_id.starts_with("conn_"));
        let frame: Value = serde_json::from_str(&event.to_frame().unwrap()).unwrap();
        assert_eq!(frame["event"], "create_connection");
        assert_eq!(frame["data"]["connection_id"], connection_id.as_str());

        let (memory_id, event) = allocate_memory_event("string", "payload");
        assert!(memory_id.starts_with("mem_"));
        let frame: Value = serde_json::from_str(&event.to_frame().unwrap()).unwrap();
        assert_eq!(frame["event"], "allocate_memory");
        assert_eq!(frame["data"]["memory_id"], memory_id.as_str());
        assert_eq!(frame["data"]["data_type"], "string");
        assert_eq!(frame["data"]["content"], "payload");

        let (transfer_id, event) = siig_transfer_event("memory", "fingerprint");
        assert!(transfer_id.starts_with("transfer_"));
        let frame: Value = serde_json::from_str(&event.to_frame().unwrap()).unwrap();
        assert_eq!(frame["event"], "initiate_siig_transfer");
        assert_eq!(frame["data"]["source"], "memory");
        assert_eq!(frame["data"]["destination"], "fingerprint");

        let (fingerprint_id, event) = fingerprint_event("sample");
        assert!(fingerprint_id.starts_with("fp_"));
        let frame: Value = serde_json::from_str(&event.to_frame().unwrap()).unwrap();
        assert_eq!(frame["event"], "generate_fingerprint");
        assert_eq!(frame["data"]["fingerprint_id"], fingerprint_id.as_str());
    }

    #[test]
    fn lagged_receiver_keeps_going_closed_channel_does_not() {
        assert_eq!(recoverable_lag(RecvError::Lagged(7)).unwrap(), 7);

        let err = recoverable_lag(RecvError::Closed).unwrap_err();
        assert!(err.to_string().contains("closed"));
    }
}
