//! ReasonAct CLI — the main entry point.
//!
//! Commands:
//! - `run`      — Answer an instruction with the ReAct agent
//! - `config`   — Show, initialize, or locate the configuration
//! - `pricing`  — List model prices used for cost accounting

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "reasonact",
    about = "ReasonAct — a ReAct reasoning agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent on a single instruction
    Run {
        /// The instruction to answer
        #[arg(short, long)]
        message: String,

        /// Print model output as it streams in
        #[arg(short, long)]
        stream: bool,

        /// Override the configured iteration budget
        #[arg(
            long,
            env = "REASONACT_MAX_ITERATIONS",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        max_iterations: Option<u32>,

        /// Print the run result as JSON
        #[arg(long, conflicts_with = "stream")]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List model pricing (per 1M tokens)
    Pricing,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration as TOML
    Default,
    /// Print the effective configuration (secrets omitted)
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            message,
            stream,
            max_iterations,
            json,
        } => {
            commands::run::run(commands::run::RunOptions {
                message,
                stream,
                max_iterations,
                json,
            })
            .await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Default => commands::config_cmd::default(),
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path(),
        },
        Commands::Pricing => commands::pricing::run()?,
    }

    Ok(())
}
