// ABOUTME: Entry point for the stagecoach CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, ProjectArgs};
use stagecoach::config::{PipelineConfig, ProjectLayout};
use stagecoach::error::Result;
use stagecoach::output::{Output, OutputMode};
use stagecoach::pipeline::run_project;
use stagecoach::stage::{CancellationToken, cancel_on_interrupts};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    output.start_timer();

    if let Err(e) = run(cli.command, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: &Output) -> Result<()> {
    match command {
        Commands::Pipeline(args) => pipeline(args, output).await,
        Commands::Validate(args) => validate(args, output),
    }
}

fn load(args: &ProjectArgs) -> Result<(PipelineConfig, ProjectLayout)> {
    let layout = ProjectLayout::discover(&args.workspace, &args.project)?;
    let config = PipelineConfig::load(layout.config_path())?;
    Ok((config, layout))
}

async fn pipeline(args: ProjectArgs, output: &Output) -> Result<()> {
    let (config, layout) = load(&args)?;

    output.info(&format!("Using container runtime: {}", config.container.engine));
    output.info(&format!("Project: {}", layout.name()));
    output.info(&format!("Project directory: {}", layout.base_path().display()));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if cancel_on_interrupts(&on_signal, tokio::signal::ctrl_c).await {
            tracing::error!("Second interrupt received, exiting without cleanup");
            std::process::exit(130);
        }
    });

    let report = run_project(&config, &layout, output, cancel).await?;

    for warning in &report.warnings {
        tracing::debug!("Warning ({:?}): {}", warning.kind, warning.message);
    }
    output.success(&format!(
        "Pipeline completed successfully! ({} build(s), {} deploy(s))",
        report.builds, report.deploys
    ));
    Ok(())
}

fn validate(args: ProjectArgs, output: &Output) -> Result<()> {
    let (config, layout) = load(&args)?;

    output.info(&format!("Engine: {}", config.container.engine));
    for (i, stage) in config.builds.iter().enumerate() {
        let image = stage.image.as_ref().map(|i| i.to_string()).unwrap_or_default();
        output.info(&format!("  build {}: {} ({})", i + 1, stage.name, image));
    }
    for (i, stage) in config.deploys.iter().enumerate() {
        output.info(&format!("  deploy {}: {}", i + 1, stage.name));
    }
    output.success(&format!("Configuration for '{}' is valid", layout.name()));
    Ok(())
}
