mod commands;
mod config;

use clap::Parser;
use colored::Colorize;
use commands::{watch, WatchArgs};

/// Labelwatch - print inventory labels as soon as they are exported
#[derive(Parser, Debug)]
#[command(name = "labelwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    watch: WatchArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => watch(cli.watch, &cwd).await,
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
