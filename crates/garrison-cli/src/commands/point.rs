//! Spawn point commands

use super::{open_document, parse_vec3};
use anyhow::{Context, Result};
use clap::Subcommand;
use garrison_core::Vec3;
use garrison_script::{CommandKind, Orientation, Record, SpawnPoint};
use serde::Serialize;
use std::io::Read;

#[derive(Subcommand)]
pub enum PointCommands {
    /// List points
    List {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,

        /// Only points in this folder path
        #[arg(long)]
        path: Option<String>,

        /// Only points of this type
        #[arg(long = "type")]
        npc_type: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show one point
    Show {
        /// Record index
        index: usize,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Add a spawn point
    Add {
        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,

        /// Point kind (npc or prop)
        #[arg(long, default_value = "npc", value_parser = parse_kind)]
        kind: String,

        /// NPC/prop type name
        #[arg(long = "type")]
        npc_type: String,

        /// Position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        pos: [f32; 3],

        /// Heading in degrees
        #[arg(long)]
        heading: Option<f32>,

        /// Euler rotation in degrees (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        rot: Option<[f32; 3]>,

        /// Folder path for the new point
        #[arg(long, default_value = "")]
        path: String,

        /// Repeat count
        #[arg(long, default_value = "1")]
        count: u32,
    },

    /// Append spawn lines from a snippet file (use - for stdin)
    Paste {
        /// Snippet file path, or - for stdin
        file: String,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Edit fields of a point
    Set {
        /// Record index
        index: usize,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,

        /// New type name
        #[arg(long = "type")]
        npc_type: Option<String>,

        /// New position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        pos: Option<[f32; 3]>,

        /// New heading in degrees
        #[arg(long)]
        heading: Option<f32>,

        /// New Euler rotation in degrees (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        rot: Option<[f32; 3]>,

        /// New repeat count
        #[arg(long)]
        count: Option<u32>,
    },

    /// Delete points
    Delete {
        /// Record indices
        indices: Vec<usize>,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Move a point up or down within its folder
    Shift {
        /// Record index
        index: usize,

        /// Direction (up or down)
        #[arg(long, value_parser = parse_direction)]
        dir: String,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Move a point to another folder
    Move {
        /// Record index
        index: usize,

        /// Target folder path ("" for the root)
        #[arg(long)]
        path: String,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Find the point nearest to a position
    Near {
        /// Position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        pos: [f32; 3],

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<String, String> {
    match s {
        "npc" | "prop" => Ok(s.to_string()),
        _ => Err(format!("unknown kind '{}'; valid values: npc, prop", s)),
    }
}

fn parse_direction(s: &str) -> Result<String, String> {
    match s {
        "up" | "down" => Ok(s.to_string()),
        _ => Err(format!("unknown direction '{}'; valid values: up, down", s)),
    }
}

pub fn run(cmd: PointCommands) -> Result<()> {
    match cmd {
        PointCommands::List {
            script,
            path,
            npc_type,
            format,
        } => list(script.as_deref(), path.as_deref(), npc_type.as_deref(), &format),

        PointCommands::Show {
            index,
            script,
            format,
        } => show(index, script.as_deref(), &format),

        PointCommands::Add {
            script,
            kind,
            npc_type,
            pos,
            heading,
            rot,
            path,
            count,
        } => add(AddArgs {
            script,
            kind,
            npc_type,
            pos,
            heading,
            rot,
            path,
            count,
        }),

        PointCommands::Paste { file, script } => paste(&file, script.as_deref()),

        PointCommands::Set {
            index,
            script,
            npc_type,
            pos,
            heading,
            rot,
            count,
        } => set(index, script.as_deref(), npc_type, pos, heading, rot, count),

        PointCommands::Delete { indices, script } => delete(&indices, script.as_deref()),

        PointCommands::Shift { index, dir, script } => shift(index, &dir, script.as_deref()),

        PointCommands::Move { index, path, script } => move_to(index, &path, script.as_deref()),

        PointCommands::Near { pos, script } => near(pos, script.as_deref()),
    }
}

/// Serializable view of a record for `--format json`
#[derive(Serialize)]
struct PointView<'a> {
    index: usize,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    npc_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<[f32; 3]>,
    path: &'a str,
    order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_text: Option<&'a str>,
}

fn point_view(index: usize, record: &Record) -> PointView<'_> {
    match record.as_spawn() {
        Some(point) => {
            let (heading, rotation) = match point.orientation {
                Orientation::Heading(h) => (Some(h), None),
                Orientation::Euler(r) => (None, Some(r.to_array())),
            };
            PointView {
                index,
                command: point.kind.keyword(),
                npc_type: Some(point.npc_type.as_str()),
                count: Some(point.count),
                position: Some(point.position.to_array()),
                heading,
                rotation,
                path: &record.path,
                order: record.order,
                raw_text: None,
            }
        }
        None => PointView {
            index,
            command: "raw",
            npc_type: None,
            count: None,
            position: None,
            heading: None,
            rotation: None,
            path: &record.path,
            order: record.order,
            raw_text: record.raw_text(),
        },
    }
}

fn print_text(index: usize, record: &Record) {
    match record.as_spawn() {
        Some(point) => {
            let p = point.position;
            let orient = match point.orientation {
                Orientation::Heading(h) => format!("heading {}", h),
                Orientation::Euler(r) => format!("rot ({}, {}, {})", r.x, r.y, r.z),
            };
            let folder = if record.path.is_empty() {
                "(root)"
            } else {
                record.path.as_str()
            };
            println!(
                "[{}] {} ({}, {}, {}) {}  {}:{}",
                index, point.npc_type, p.x, p.y, p.z, orient, folder, record.order
            );
        }
        None => {
            println!("[{}] raw {:?}", index, record.raw_text().unwrap_or(""));
        }
    }
}

fn list(
    script: Option<&str>,
    path: Option<&str>,
    npc_type: Option<&str>,
    format: &str,
) -> Result<()> {
    let (_, doc) = open_document(script)?;
    let path = path.map(|p| garrison_script::split_path(p).join("/"));

    let selected: Vec<(usize, &Record)> = doc
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| match &path {
            Some(p) => &record.path == p,
            None => true,
        })
        .filter(|(_, record)| match npc_type {
            Some(t) => record.as_spawn().map(|s| s.npc_type == t).unwrap_or(false),
            None => true,
        })
        .collect();

    if format == "json" {
        let views: Vec<PointView> = selected
            .iter()
            .map(|(index, record)| point_view(*index, record))
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        if selected.is_empty() {
            println!("No matching points");
        }
        for (index, record) in selected {
            print_text(index, record);
        }
    }
    Ok(())
}

fn show(index: usize, script: Option<&str>, format: &str) -> Result<()> {
    let (_, doc) = open_document(script)?;
    let record = doc
        .get(index)
        .with_context(|| format!("No record at index {}", index))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&point_view(index, record))?);
    } else {
        print_text(index, record);
    }
    Ok(())
}

pub struct AddArgs {
    pub script: Option<String>,
    pub kind: String,
    pub npc_type: String,
    pub pos: [f32; 3],
    pub heading: Option<f32>,
    pub rot: Option<[f32; 3]>,
    pub path: String,
    pub count: u32,
}

fn add(args: AddArgs) -> Result<()> {
    if args.heading.is_some() && args.rot.is_some() {
        anyhow::bail!("--heading and --rot are mutually exclusive");
    }

    let kind = match args.kind.as_str() {
        "prop" => CommandKind::Spawn,
        _ => CommandKind::BotSpawn,
    };
    let orientation = match (args.heading, args.rot) {
        (_, Some(r)) => Orientation::Euler(Vec3::from_array(r)),
        (Some(h), None) => Orientation::Heading(h),
        (None, None) => Orientation::Heading(0.0),
    };

    let (script_path, mut doc) = open_document(args.script.as_deref())?;
    let point = SpawnPoint::new(
        kind,
        args.npc_type.as_str(),
        Vec3::from_array(args.pos),
        orientation,
    )
    .with_count(args.count);
    let index = doc.add_point(point, &args.path);
    doc.save()?;

    let folder = if args.path.is_empty() {
        "(root)"
    } else {
        args.path.as_str()
    };
    println!(
        "Added point {} ({}) to {} in {}",
        index, args.npc_type, folder, script_path
    );
    Ok(())
}

fn paste(file: &str, script: Option<&str>) -> Result<()> {
    let text = if file == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?
    };

    let (script_path, mut doc) = open_document(script)?;
    let added = doc.append_from_text(&text);
    if added == 0 {
        anyhow::bail!("No valid spawn lines in the snippet");
    }
    doc.save()?;

    println!("Added {} point(s) to {}", added, script_path);
    Ok(())
}

fn set(
    index: usize,
    script: Option<&str>,
    npc_type: Option<String>,
    pos: Option<[f32; 3]>,
    heading: Option<f32>,
    rot: Option<[f32; 3]>,
    count: Option<u32>,
) -> Result<()> {
    if heading.is_some() && rot.is_some() {
        anyhow::bail!("--heading and --rot are mutually exclusive");
    }

    let (script_path, mut doc) = open_document(script)?;
    {
        let point = doc.spawn_at_mut(index)?;
        if let Some(npc_type) = npc_type {
            point.npc_type = npc_type;
        }
        if let Some(pos) = pos {
            point.position = Vec3::from_array(pos);
        }
        if let Some(h) = heading {
            point.orientation = Orientation::Heading(h);
        }
        if let Some(r) = rot {
            point.orientation = Orientation::Euler(Vec3::from_array(r));
        }
        if let Some(count) = count {
            point.count = count;
        }
    }
    doc.save()?;

    println!("Updated point {} in {}", index, script_path);
    Ok(())
}

fn delete(indices: &[usize], script: Option<&str>) -> Result<()> {
    if indices.is_empty() {
        anyhow::bail!("No indices given");
    }
    let (script_path, mut doc) = open_document(script)?;
    let removed = doc.delete(indices)?;
    doc.save()?;

    println!("Deleted {} point(s) from {}", removed, script_path);
    Ok(())
}

fn shift(index: usize, dir: &str, script: Option<&str>) -> Result<()> {
    let delta = if dir == "up" { -1 } else { 1 };
    let (script_path, mut doc) = open_document(script)?;
    if doc.shift_in_folder(index, delta)? {
        doc.save()?;
        println!("Moved point {} {} in {}", index, dir, script_path);
    } else {
        println!("Point {} is already at the {} of its folder", index, if dir == "up" { "top" } else { "bottom" });
    }
    Ok(())
}

fn move_to(index: usize, path: &str, script: Option<&str>) -> Result<()> {
    let (script_path, mut doc) = open_document(script)?;
    doc.move_to_folder(index, path)?;
    doc.save()?;

    let folder = if path.is_empty() { "(root)" } else { path };
    println!("Moved point {} to {} in {}", index, folder, script_path);
    Ok(())
}

fn near(pos: [f32; 3], script: Option<&str>) -> Result<()> {
    let (_, doc) = open_document(script)?;
    match doc.nearest_point(Vec3::from_array(pos)) {
        Some((index, dist)) => {
            println!("Nearest point (distance {:.2}):", dist);
            if let Some(record) = doc.get(index) {
                print_text(index, record);
            }
        }
        None => println!("No spawn points"),
    }
    Ok(())
}
