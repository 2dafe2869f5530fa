//! NoPortal command-line harness
//!
//! Runs host events, written as JSON, through the same listener the plugin
//! registers, so configurations and permission setups can be checked without
//! a running server.

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use noportal::evaluate_event;
use noportal_config::ensure_config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noportal")]
#[command(about = "Check NoPortal configuration and portal permission decisions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default message configuration if it does not exist
    InitConfig {
        /// Path of the configuration file
        path: PathBuf,
    },
    /// Evaluate a host event read from a JSON file
    Evaluate {
        /// Path of the configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// JSON file describing a place or collide event
        #[arg(short, long)]
        event: PathBuf,

        /// Permission granted to every player (repeatable)
        #[arg(short, long = "grant")]
        grants: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig { path } => {
            let written = ensure_config(&path)
                .with_context(|| format!("Failed to initialize {}", path.display()))?;
            if written {
                println!("Wrote default configuration to {}", path.display());
            } else {
                println!("Configuration already exists at {}", path.display());
            }
        }
        Commands::Evaluate {
            config,
            event,
            grants,
        } => {
            run_evaluate(config, event, grants)?;
        }
    }

    Ok(())
}

fn run_evaluate(config: PathBuf, event: PathBuf, grants: Vec<String>) -> anyhow::Result<()> {
    let content = fs::read_to_string(&event)
        .with_context(|| format!("Failed to read event file {}", event.display()))?;

    let report = evaluate_event(&config, &content, &grants)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
