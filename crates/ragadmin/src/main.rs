// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ragadmin - administrative provisioning service for externally hosted
//! RAG assistants.
//!
//! This is the binary entry point for the admin service.

use clap::{Parser, Subcommand};

mod app;
mod handlers;
mod reconcile;
mod serve;

/// Ragadmin - provisioning and reconciliation for RAG assistants.
#[derive(Parser, Debug)]
#[command(name = "ragadmin", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the admin HTTP gateway.
    Serve,
    /// Run a single reconciliation pass and print the summary.
    Reconcile,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ragadmin_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("ragadmin: config error: {error}");
            }
            std::process::exit(1);
        }
    };

    init_tracing(&config.service.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run(&config).await,
        Some(Commands::Reconcile) => reconcile::run(&config).await,
        Some(Commands::Config) => {
            match toml::to_string_pretty(&config) {
                Ok(rendered) => {
                    println!("{rendered}");
                    Ok(())
                }
                Err(e) => Err(ragadmin_core::RagAdminError::Internal(format!(
                    "failed to render config: {e}"
                ))),
            }
        }
        None => {
            println!("ragadmin: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("ragadmin: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ragadmin={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config = ragadmin_config::load_and_validate()
            .expect("default config should be valid");
        assert_eq!(config.gateway.port, 8090);
    }
}
