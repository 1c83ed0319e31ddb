//! GridBus CLI - Main entry point

mod demo;
mod stress;

use clap::{Parser, Subcommand, ValueEnum};
use gridbus_foundation::{BusConfig, ConfigScope};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// GridBus - in-process notification bus playground
#[derive(Parser, Debug)]
#[command(name = "gridbus")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (also turns on per-delivery tracing)
    #[arg(short, long)]
    debug: bool,

    /// Load configuration from this file instead of the global/project files
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wire a small sortable grid and click through its headers
    Demo,
    /// Hammer one facade from many threads and check delivery counts
    Stress {
        /// Worker threads (default: config stress.threads)
        #[arg(short, long)]
        threads: Option<usize>,
        /// Iterations per thread (default: config stress.iterations)
        #[arg(short, long)]
        iterations: Option<usize>,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Also write it to the global or project config file
        #[arg(long, value_enum)]
        save: Option<SaveTarget>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SaveTarget {
    Global,
    Project,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => BusConfig::load_from(path)?,
        None => match BusConfig::load() {
            Ok(config) => config,
            // 잘못된 설정 파일은 경고 후 기본값, 그 외는 실패
            Err(e) if e.is_user_facing() => {
                eprintln!("Warning: Failed to load config: {}", e);
                BusConfig::default()
            }
            Err(e) => return Err(e.into()),
        },
    };
    // 저장 시에는 명령줄 플래그가 섞이지 않은 값을 씀
    let loaded = config.clone();
    if args.debug {
        config.debug_mode = true;
    }
    debug!(?config, "Configuration loaded");

    match args.command {
        Command::Demo => demo::run(config),
        Command::Stress {
            threads,
            iterations,
        } => {
            let threads = threads.unwrap_or(config.stress.threads);
            let iterations = iterations.unwrap_or(config.stress.iterations);
            stress::run(config, threads, iterations)
        }
        Command::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if let Some(target) = save {
                let scope = match target {
                    SaveTarget::Global => ConfigScope::Global,
                    SaveTarget::Project => ConfigScope::current_project()?,
                };
                let path = loaded.save(&scope)?;
                println!("Saved to {}", path.display());
            }
            Ok(())
        }
    }
}
