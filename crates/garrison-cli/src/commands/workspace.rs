//! Workspace commands
//!
//! A workspace file tracks session state (script path, camera, selection,
//! orientation marker) separately from the spawn data.

use super::{parse_vec3, resolve_script};
use anyhow::{Context, Result};
use clap::Subcommand;
use garrison_core::Vec3;
use garrison_session::{Camera, Document, EditorConfig, Selection, Workspace};

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Create a workspace file pointing at a script
    New {
        /// Path to the workspace file
        #[arg(long)]
        workspace: Option<String>,

        /// Path to the spawn script
        #[arg(long)]
        script: Option<String>,
    },

    /// Show workspace contents
    Info {
        /// Path to the workspace file
        #[arg(long)]
        workspace: Option<String>,
    },

    /// Update the stored camera
    Camera {
        /// Path to the workspace file
        #[arg(long)]
        workspace: Option<String>,

        /// Camera position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        position: Option<[f32; 3]>,

        /// Focal point (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        focal: Option<[f32; 3]>,

        /// Up vector (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        up: Option<[f32; 3]>,

        /// Place the camera behind this point, facing along its heading
        #[arg(long)]
        behind_point: Option<usize>,

        /// Retarget the focal point onto this point
        #[arg(long)]
        focus_point: Option<usize>,
    },

    /// Update the stored selection
    Select {
        /// Path to the workspace file
        #[arg(long)]
        workspace: Option<String>,

        /// Comma-separated point indices
        #[arg(long)]
        set: Option<String>,

        /// Clear the selection
        #[arg(long)]
        clear: bool,
    },

    /// Update the orientation marker
    Marker {
        /// Path to the workspace file
        #[arg(long)]
        workspace: Option<String>,

        /// Show the marker
        #[arg(long)]
        show: bool,

        /// Hide the marker
        #[arg(long)]
        hide: bool,

        /// Marker offset (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3)]
        offset: Option<[f32; 3]>,
    },
}

pub fn run(cmd: WorkspaceCommands) -> Result<()> {
    match cmd {
        WorkspaceCommands::New { workspace, script } => {
            new(workspace.as_deref(), script.as_deref())
        }
        WorkspaceCommands::Info { workspace } => info(workspace.as_deref()),
        WorkspaceCommands::Camera {
            workspace,
            position,
            focal,
            up,
            behind_point,
            focus_point,
        } => camera(
            workspace.as_deref(),
            position,
            focal,
            up,
            behind_point,
            focus_point,
        ),
        WorkspaceCommands::Select {
            workspace,
            set,
            clear,
        } => select(workspace.as_deref(), set.as_deref(), clear),
        WorkspaceCommands::Marker {
            workspace,
            show,
            hide,
            offset,
        } => marker(workspace.as_deref(), show, hide, offset),
    }
}

fn resolve_workspace(explicit: Option<&str>) -> Result<String> {
    let config = EditorConfig::load().context("Failed to load editor config")?;
    Ok(config.workspace_path(explicit))
}

fn load_workspace(explicit: Option<&str>) -> Result<(String, Workspace)> {
    let path = resolve_workspace(explicit)?;
    let workspace =
        Workspace::load(&path).with_context(|| format!("Failed to load workspace {}", path))?;
    Ok((path, workspace))
}

fn new(workspace: Option<&str>, script: Option<&str>) -> Result<()> {
    let workspace_path = resolve_workspace(workspace)?;
    let script_path = resolve_script(script)?;

    // Workspaces store the absolute script path so they stay valid when
    // opened from another directory
    let absolute = match std::fs::canonicalize(&script_path) {
        Ok(p) => p,
        Err(_) => std::env::current_dir()?.join(&script_path),
    };

    let ws = Workspace::new(absolute);
    ws.save(&workspace_path)
        .with_context(|| format!("Failed to write workspace {}", workspace_path))?;

    println!("Created workspace: {}", workspace_path);
    Ok(())
}

fn info(workspace: Option<&str>) -> Result<()> {
    let (path, ws) = load_workspace(workspace)?;

    println!("Workspace: {}", path);
    println!("Script: {}", ws.map_file.display());
    println!(
        "Camera: position {:?} focal {:?} up {:?}",
        ws.camera.position.to_array(),
        ws.camera.focal.to_array(),
        ws.camera.up.to_array()
    );
    if ws.selection.is_empty() {
        println!("Selection: (none)");
    } else {
        println!("Selection: {}", ws.selection().to_csv());
    }
    println!(
        "Marker: {} offset {:?}",
        if ws.orientation_marker.visible {
            "visible"
        } else {
            "hidden"
        },
        ws.orientation_marker.offset.to_array()
    );
    Ok(())
}

fn camera(
    workspace: Option<&str>,
    position: Option<[f32; 3]>,
    focal: Option<[f32; 3]>,
    up: Option<[f32; 3]>,
    behind_point: Option<usize>,
    focus_point: Option<usize>,
) -> Result<()> {
    let (path, mut ws) = load_workspace(workspace)?;

    if behind_point.is_some() || focus_point.is_some() {
        let doc = Document::open(&ws.map_file)
            .with_context(|| format!("Failed to load script {}", ws.map_file.display()))?;
        if let Some(index) = behind_point {
            ws.camera = Camera::behind_point(doc.spawn_at(index)?);
        }
        if let Some(index) = focus_point {
            ws.camera.focus_on(doc.spawn_at(index)?);
        }
    }

    if let Some(p) = position {
        ws.camera.position = Vec3::from_array(p);
    }
    if let Some(f) = focal {
        ws.camera.focal = Vec3::from_array(f);
    }
    if let Some(u) = up {
        ws.camera.up = Vec3::from_array(u);
    }

    ws.save(&path)?;
    println!(
        "Camera set: position {:?} focal {:?} up {:?}",
        ws.camera.position.to_array(),
        ws.camera.focal.to_array(),
        ws.camera.up.to_array()
    );
    Ok(())
}

fn select(workspace: Option<&str>, set: Option<&str>, clear: bool) -> Result<()> {
    let (path, mut ws) = load_workspace(workspace)?;

    if clear {
        ws.set_selection(&Selection::new());
    } else if let Some(csv) = set {
        ws.set_selection(&Selection::from_csv(csv));
    } else {
        anyhow::bail!("Nothing to do: pass --set or --clear");
    }

    ws.save(&path)?;
    if ws.selection.is_empty() {
        println!("Selection cleared");
    } else {
        println!("Selected {} point(s): {}", ws.selection.len(), ws.selection().to_csv());
    }
    Ok(())
}

fn marker(
    workspace: Option<&str>,
    show: bool,
    hide: bool,
    offset: Option<[f32; 3]>,
) -> Result<()> {
    if show && hide {
        anyhow::bail!("--show and --hide are mutually exclusive");
    }

    let (path, mut ws) = load_workspace(workspace)?;
    if show {
        ws.orientation_marker.visible = true;
    }
    if hide {
        ws.orientation_marker.visible = false;
    }
    if let Some(o) = offset {
        ws.orientation_marker.offset = Vec3::from_array(o);
    }

    ws.save(&path)?;
    println!(
        "Marker: {} offset {:?}",
        if ws.orientation_marker.visible {
            "visible"
        } else {
            "hidden"
        },
        ws.orientation_marker.offset.to_array()
    );
    Ok(())
}
