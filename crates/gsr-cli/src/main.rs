use anyhow::Result;
use clap::{Parser, Subcommand};
use gsr_config::UnusedKeyPolicy;

mod commands;
mod script;
mod tokio_scheduler;

#[derive(Parser)]
#[command(name = "gsr")]
#[command(about = "Game-state reconciliation engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> user -> session ...)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Fail instead of warning when a key is not read by anything.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Feed a JSONL event script through the engine on a manual clock and
    /// print every notification as a JSON line.
    Replay {
        /// Script: one `{"at_ms": .., "event": {..}}` object per line
        #[arg(long)]
        script: String,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Play a script back in real time with live clock ticks.
    Watch {
        #[arg(long)]
        script: String,

        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Playback speed multiplier (overrides playback.speed)
        #[arg(long)]
        speed: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience).
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::ConfigHash { paths, strict } => {
            let policy = if strict {
                UnusedKeyPolicy::Fail
            } else {
                UnusedKeyPolicy::Warn
            };
            commands::config_hash(&paths, policy)?;
        }
        Commands::Replay {
            script,
            config_paths,
        } => {
            commands::replay::run(&script, &config_paths)?;
        }
        Commands::Watch {
            script,
            config_paths,
            speed,
        } => {
            commands::watch::run(&script, &config_paths, speed).await?;
        }
    }
    Ok(())
}

// stdout carries JSON lines; logs go to stderr.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
