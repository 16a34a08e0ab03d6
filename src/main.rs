use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use proposal_agent::api::OpenAiChatClient;
use proposal_agent::cli::Args;
use proposal_agent::config::{Config, FileConfig, DEFAULT_BASE_DIR};
use proposal_agent::convert::PandocConverter;
use proposal_agent::generators::Toolbox;
use proposal_agent::google::GoogleDrivePublisher;
use proposal_agent::models::ProposalState;
use proposal_agent::orchestrator::Orchestrator;
use proposal_agent::render::MermaidCli;
use proposal_agent::session::{
    last_reply, resume_session, start_session, CheckpointStore, FilesystemCheckpointStore,
};
use proposal_agent::ui::display_reply;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Handle --list option
    if args.list_sessions {
        list_sessions(&args);
        return Ok(());
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let client = match OpenAiChatClient::new(
        &config.api_key,
        &config.api_endpoint,
        config.request_timeout,
        config.verbose,
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let toolbox = Toolbox::new(
        Arc::new(client),
        Arc::new(PandocConverter::new(config.converter.clone(), config.verbose)),
        Arc::new(GoogleDrivePublisher::new(&config.google, config.verbose)),
        Arc::new(MermaidCli::new(config.renderer.clone(), config.verbose)),
    )
    .with_models(config.models.clone())
    .with_verbose(config.verbose);

    let orchestrator = Orchestrator::from_config(toolbox, &config);
    let checkpoints = FilesystemCheckpointStore::new(&config.base_dir);

    let mut state = match &args.resume {
        Some(thread_id) => match resume_session(&checkpoints, &config.base_dir, thread_id) {
            Ok((store, state)) => {
                println!(
                    "{}",
                    format!("Resumed session {} in {}", thread_id, store.job_folder().display())
                        .green()
                );
                if let Some(reply) = last_reply(&state.messages) {
                    display_reply(reply);
                }
                state
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                process::exit(1);
            }
        },
        None => {
            let Some(state) = start_new_session(&config, &orchestrator, &checkpoints).await else {
                return Ok(());
            };
            state
        }
    };

    run_repl(&orchestrator, &checkpoints, &mut state).await;
    Ok(())
}

async fn start_new_session(
    config: &Config,
    orchestrator: &Orchestrator,
    checkpoints: &FilesystemCheckpointStore,
) -> Option<ProposalState> {
    let job_description = match fs::read_to_string(&config.job_file) {
        Ok(text) if !text.trim().is_empty() => text,
        _ => {
            println!(
                "{}",
                format!(
                    "`{}` not found or empty. Please create it with the job description.",
                    config.job_file.display()
                )
                .yellow()
            );
            return None;
        }
    };

    let (store, mut state) = match start_session(&config.base_dir, &job_description) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    println!(
        "{}",
        format!("Session {} started in {}", store.timestamp(), store.job_folder().display()).green()
    );
    println!(
        "{}",
        format!("Job description saved to {}", store.job_description_path().display()).dimmed()
    );

    run_turn(orchestrator, checkpoints, &mut state, &job_description).await;
    Some(state)
}

async fn run_repl(
    orchestrator: &Orchestrator,
    checkpoints: &FilesystemCheckpointStore,
    state: &mut ProposalState,
) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("{} Failed to initialize readline: {}", "Error:".red(), e);
            return;
        }
    };

    println!(
        "{}",
        "Type feedback to revise the proposal, or 'exit' to quit.".dimmed()
    );

    loop {
        match rl.readline("You: ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if matches!(input.to_lowercase().as_str(), "exit" | "quit" | "q") {
                    break;
                }
                let _ = rl.add_history_entry(input);
                run_turn(orchestrator, checkpoints, state, input).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                break;
            }
        }
    }

    println!("{}", format!("Session {} saved.", state.thread_id).green());
}

/// One conversational turn. Failures are printed and the session carries on.
async fn run_turn(
    orchestrator: &Orchestrator,
    checkpoints: &FilesystemCheckpointStore,
    state: &mut ProposalState,
    input: &str,
) {
    match orchestrator.run_turn(state, input).await {
        Ok(reply) => display_reply(&reply),
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    }

    if let Err(e) = checkpoints.save(state) {
        eprintln!("{}", format!("Warning: Failed to save checkpoint: {}", e).yellow());
    }
}

fn list_sessions(args: &Args) {
    let base_dir = args.output_dir.clone().unwrap_or_else(|| {
        FileConfig::load()
            .ok()
            .and_then(|config| config.storage.base_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR))
    });

    let checkpoints = FilesystemCheckpointStore::new(&base_dir);
    let sessions = checkpoints.list();
    if sessions.is_empty() {
        println!("No sessions found in {}", base_dir.display());
        return;
    }

    for thread_id in sessions {
        match checkpoints.load(&thread_id) {
            Some(state) => println!(
                "{}  {}",
                thread_id.bold(),
                format!(
                    "last updated {}",
                    state.last_updated.format("%Y-%m-%d %H:%M:%S")
                )
                .dimmed()
            ),
            None => println!("{}", thread_id.bold()),
        }
    }
}
