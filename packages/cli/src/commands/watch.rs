use crate::config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use labelwatch_core::{
    CommandTools, LabelPipeline, PipelineOptions, ToolConfig, WatchLoop, DEFAULT_FONT,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Directory to watch
    pub directory: PathBuf,

    /// Watch subdirectories recursively
    #[arg(long)]
    pub recursive: bool,

    /// Font to use for asset ID [default: Noto-Sans-Bold]
    #[arg(long)]
    pub font: Option<String>,

    /// Remove original image after processing
    #[arg(long)]
    pub remove: bool,

    /// Enable cable mode. Label will be printed twice to wrap around cable
    #[arg(long)]
    pub cable: bool,

    /// Cuts immediately after printing. Will waste a bit of label tape
    #[arg(long)]
    pub cut: bool,

    /// Tool config file (defaults to ./labelwatch.config.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl WatchArgs {
    /// Command-line font wins over the config file, which wins over the default.
    pub fn pipeline_options(&self, tools: &ToolConfig) -> PipelineOptions {
        let font = self
            .font
            .clone()
            .or_else(|| tools.transform.font.clone())
            .unwrap_or_else(|| DEFAULT_FONT.to_string());

        PipelineOptions {
            font,
            remove_originals: self.remove,
            cable: self.cable,
            cable_pad: tools.printer.cable_pad,
            cut: self.cut,
        }
    }
}

pub async fn watch(args: WatchArgs, cwd: &Path) -> Result<()> {
    let tool_config = config::load(args.config.as_deref(), cwd)?;

    if !args.directory.is_dir() {
        return Err(anyhow!(
            "Directory does not exist: {}",
            args.directory.display()
        ));
    }

    let options = args.pipeline_options(&tool_config);
    println!(
        "{} {}",
        "👀 Watching".bright_blue().bold(),
        args.directory.display()
    );
    println!(
        "   font: {}  remove: {}  cable: {}  cut: {}",
        options.font.cyan(),
        options.remove_originals,
        options.cable,
        options.cut
    );

    let pipeline = LabelPipeline::new(CommandTools::new(tool_config), options);
    let handle = WatchLoop::start(&args.directory, args.recursive, pipeline)
        .with_context(|| format!("Failed to watch {}", args.directory.display()))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for interrupt signal")?;

    println!("\rExiting");
    handle.stop();
    info!("Watcher stopped");

    Ok(())
}
