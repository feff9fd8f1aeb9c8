//! CLI entrypoint for agent-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use council_application::{CallOptions, Orchestrator, ProgressNotifier};
use council_domain::AgentResponse;
use council_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, LocalContextLoader, ProcessAgentRunner,
    ProcessRunner,
};
use council_presentation::{
    Cli, Command, OutputConfig, OutputFormat, ProgressReporter, SimpleProgress, formatter_for,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let global = &cli.global;

    // RUST_LOG wins over -v; logs go to stderr so stdout stays parseable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match global.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if global.show_config {
        ConfigLoader::print_config_sources(global.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    info!("Starting agent-council");

    // === Configuration ===
    let file_config = if global.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(global.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    let settings = file_config
        .to_settings()
        .context("invalid configuration")?;

    let output = output_config(&file_config).with_cli(global);
    output.apply_color();

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let project_root = settings.resolve_project_path(global.project.as_deref(), &cwd);

    // === Dependency Injection ===
    let process = ProcessRunner::new().with_working_dir(&project_root);
    let runner = Arc::new(ProcessAgentRunner::from_config(&file_config, process));
    let context = Arc::new(LocalContextLoader::new());

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let mut orchestrator = Orchestrator::new(runner, context, settings)
        .with_working_dir(cwd)
        .with_cancellation(cancel);
    if let Some(progress) = progress_notifier(&output) {
        orchestrator = orchestrator.with_progress(progress);
    }

    let mut options = CallOptions::default().with_project_path(project_root);
    if global.no_context {
        options = options.with_include_context(false);
    }
    if let Some(secs) = global.timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }

    // === Run ===
    let formatter = formatter_for(output.format);
    let body = command.prompt().to_string();
    let (rendered, answered) = match command {
        Command::Ask { agent, .. } => {
            let response = orchestrator.ask_single(&agent, &body, &options).await?;
            (formatter.format_response(&response), response.success)
        }
        Command::AskAll { .. } => {
            let responses = orchestrator.ask_many(&body, &options).await?;
            (formatter.format_responses(&responses), any_success(&responses))
        }
        Command::Consensus { .. } => {
            let result = orchestrator.request_consensus(&body, &options).await?;
            (formatter.format_consensus(&result), result.synthesis.success)
        }
        Command::Debate { rounds, .. } => {
            let transcript = orchestrator
                .request_debate(&body, rounds, &options)
                .await?;
            let answered = transcript
                .final_round()
                .is_some_and(|round| any_success(&round.responses));
            (formatter.format_debate(&transcript), answered)
        }
        Command::Council {
            orchestrator_answer,
            ..
        } => {
            let record = orchestrator
                .request_council(&body, &orchestrator_answer, &options)
                .await?;
            let answered = record.is_reviewed();
            (formatter.format_council(&record), answered)
        }
    };

    println!("{}", rendered);

    Ok(if answered {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn output_config(file_config: &FileConfig) -> OutputConfig {
    let format = match file_config.output.format.unwrap_or_default() {
        FileOutputFormat::Text => OutputFormat::Text,
        FileOutputFormat::Json => OutputFormat::Json,
    };
    OutputConfig {
        format,
        color: file_config.output.color,
        show_progress: file_config.output.show_progress,
    }
}

/// Bars on a terminal, plain lines otherwise.
fn progress_notifier(output: &OutputConfig) -> Option<Arc<dyn ProgressNotifier>> {
    if !output.show_progress {
        return None;
    }
    if std::io::stderr().is_terminal() {
        Some(Arc::new(ProgressReporter::new()))
    } else {
        Some(Arc::new(SimpleProgress))
    }
}

fn any_success(responses: &[AgentResponse]) -> bool {
    responses.iter().any(|r| r.success)
}

/// First Ctrl-C cancels every call in flight; their processes are killed.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupted, stopping agents");
                cancel.cancel();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });
}
