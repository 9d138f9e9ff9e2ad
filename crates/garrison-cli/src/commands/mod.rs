//! CLI command implementations

pub mod folder;
pub mod init;
pub mod point;
pub mod script;
pub mod workspace;

use anyhow::{Context, Result};
use garrison_session::{Document, EditorConfig};

/// Resolve the script path: explicit flag, then layered config, then the
/// stock filename
pub fn resolve_script(explicit: Option<&str>) -> Result<String> {
    let config = EditorConfig::load().context("Failed to load editor config")?;
    Ok(config.script_path(explicit))
}

/// Resolve the script path and load its document
pub fn open_document(explicit: Option<&str>) -> Result<(String, Document)> {
    let path = resolve_script(explicit)?;
    let doc = Document::open(&path).with_context(|| format!("Failed to load script {}", path))?;
    Ok((path, doc))
}

pub fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "expected 3 comma-separated values, got {}",
            parts.len()
        ));
    }
    let x: f32 = parts[0]
        .trim()
        .parse()
        .map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1]
        .trim()
        .parse()
        .map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2]
        .trim()
        .parse()
        .map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}
