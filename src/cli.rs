// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stagecoach")]
#[command(about = "Run containerized build stages followed by deploy stages")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result and warnings
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print progress as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Project name (a directory inside the workspace)
    #[arg(short = 'P', long)]
    pub project: String,

    /// Workspace directory containing the projects
    #[arg(short, long, env = "STAGECOACH_WORKSPACE", default_value = "workspace")]
    pub workspace: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run build and deploy pipeline
    Pipeline(ProjectArgs),

    /// Check a project's configuration without running anything
    Validate(ProjectArgs),
}
