//! Script-level commands

use super::{open_document, resolve_script};
use anyhow::{Context, Result};
use clap::Subcommand;
use garrison_script::is_near_miss;
use garrison_session::type_colors;
use std::fs;

#[derive(Subcommand)]
pub enum ScriptCommands {
    /// Show script statistics
    Info {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Parse the script and rewrite it in canonical layout
    Fmt {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Report lines that fell back to passthrough, flagging near misses
    Check {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },
}

pub fn run(cmd: ScriptCommands) -> Result<()> {
    match cmd {
        ScriptCommands::Info { script } => info(script.as_deref()),
        ScriptCommands::Fmt { script } => fmt(script.as_deref()),
        ScriptCommands::Check { script } => check(script.as_deref()),
    }
}

fn info(script: Option<&str>) -> Result<()> {
    let (path, doc) = open_document(script)?;

    let spawns = doc.records().iter().filter(|r| !r.is_raw()).count();
    let raw = doc.len() - spawns;
    let types = doc.unique_types();
    let folders = doc.folder_paths();

    println!("Script: {}", path);
    println!("Points: {}", spawns);
    println!("Passthrough lines: {}", raw);
    println!("Folders: {}", folders.len());
    println!("Types: {}", types.len());
    if !types.is_empty() {
        println!("");
        println!("Type list:");
        for name in &types {
            let count = doc
                .records()
                .iter()
                .filter_map(|r| r.as_spawn())
                .filter(|p| &p.npc_type == name)
                .count();
            println!("  {} ({})", name, count);
        }
    }

    Ok(())
}

fn fmt(script: Option<&str>) -> Result<()> {
    let (path, doc) = open_document(script)?;
    doc.save()
        .with_context(|| format!("Failed to rewrite {}", path))?;
    println!("Rewrote {} ({} records)", path, doc.len());
    Ok(())
}

fn check(script: Option<&str>) -> Result<()> {
    let path = resolve_script(script)?;
    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;

    let mut near_misses = 0;
    let mut passthrough = 0;
    for (number, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if is_near_miss(line) {
            near_misses += 1;
            println!("warning: line {}: near miss: {}", number + 1, trimmed);
        } else if !trimmed.is_empty()
            && !trimmed.starts_with("//")
            && !trimmed.starts_with('#')
            && garrison_script::parse_script(line)
                .first()
                .map(|r| r.is_raw())
                .unwrap_or(false)
        {
            passthrough += 1;
        }
    }

    println!(
        "{}: {} near miss(es), {} other passthrough line(s)",
        path, near_misses, passthrough
    );
    if near_misses > 0 {
        anyhow::bail!("{} line(s) look like malformed spawn commands", near_misses);
    }
    Ok(())
}

pub fn types(script: Option<&str>) -> Result<()> {
    let (_, doc) = open_document(script)?;
    let types = doc.unique_types();
    if types.is_empty() {
        println!("No spawn points");
        return Ok(());
    }

    let colors = type_colors(&types);
    for name in &types {
        let count = doc
            .records()
            .iter()
            .filter_map(|r| r.as_spawn())
            .filter(|p| &p.npc_type == name)
            .count();
        let hex = colors
            .get(name)
            .map(|c| c.to_hex())
            .unwrap_or_default();
        println!("{:<20} {:>5}  {}", name, count, hex);
    }
    Ok(())
}
