//! Garrison CLI - command-line editor for NPC spawn scripts

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{folder, init, point, script, workspace};

#[derive(Parser)]
#[command(name = "garrison")]
#[command(about = "Editor and inspector for NPC spawn command scripts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new mission project
    Init {
        /// Project name/directory
        name: String,
    },

    /// Script-level operations
    #[command(subcommand)]
    Script(script::ScriptCommands),

    /// Spawn point operations
    #[command(subcommand)]
    Point(point::PointCommands),

    /// Folder operations
    #[command(subcommand)]
    Folder(folder::FolderCommands),

    /// Workspace operations
    #[command(subcommand)]
    Workspace(workspace::WorkspaceCommands),

    /// List NPC types with counts and display colors
    Types {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { name } => init::run(&name),
        Commands::Script(cmd) => script::run(cmd),
        Commands::Point(cmd) => point::run(cmd),
        Commands::Folder(cmd) => folder::run(cmd),
        Commands::Workspace(cmd) => workspace::run(cmd),
        Commands::Types { script } => script::types(script.as_deref()),
    }
}
