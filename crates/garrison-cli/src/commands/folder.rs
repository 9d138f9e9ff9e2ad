//! Folder commands

use super::open_document;
use anyhow::Result;
use clap::Subcommand;
use garrison_session::{FolderNode, FolderTree};

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Print the folder tree with point counts
    List {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Rename a folder, rewriting every point under it
    Rename {
        /// Current folder path
        old: String,

        /// New folder path
        new: String,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },
}

pub fn run(cmd: FolderCommands) -> Result<()> {
    match cmd {
        FolderCommands::List { script } => list(script.as_deref()),
        FolderCommands::Rename { old, new, script } => rename(&old, &new, script.as_deref()),
    }
}

fn list(script: Option<&str>) -> Result<()> {
    let (path, doc) = open_document(script)?;
    let tree = FolderTree::build(&doc);

    println!("{} ({} points)", path, tree.root.total_points());
    if !tree.root.points.is_empty() {
        println!("  (root): {} point(s)", tree.root.points.len());
    }
    for child in &tree.root.children {
        print_node(child, 1);
    }
    Ok(())
}

fn print_node(node: &FolderNode, depth: usize) {
    println!(
        "{}{}: {} point(s)",
        "  ".repeat(depth),
        node.name,
        node.total_points()
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn rename(old: &str, new: &str, script: Option<&str>) -> Result<()> {
    let (path, mut doc) = open_document(script)?;
    let touched = doc.rename_folder(old, new)?;
    doc.save()?;

    println!(
        "Renamed {} -> {} ({} point(s) updated) in {}",
        old, new, touched, path
    );
    Ok(())
}
