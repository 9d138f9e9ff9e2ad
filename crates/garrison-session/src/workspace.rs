//! Workspace persistence
//!
//! A workspace is a JSON snapshot of session state, distinct from the
//! spawn data itself: which script is open, where the camera is, which
//! points are selected and how the orientation marker sits. The key layout
//! is fixed; existing workspace files must keep loading.

use crate::camera::Camera;
use crate::marker::OrientationMarker;
use crate::selection::Selection;
use garrison_core::{GarrisonError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Absolute path of the spawn script this workspace tracks
    pub map_file: PathBuf,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub selection: Vec<usize>,
    #[serde(default)]
    pub orientation_marker: OrientationMarker,
}

impl Workspace {
    pub fn new<P: Into<PathBuf>>(map_file: P) -> Self {
        Self {
            map_file: map_file.into(),
            camera: Camera::default(),
            selection: Vec::new(),
            orientation_marker: OrientationMarker::default(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            GarrisonError::WorkspaceError(format!(
                "Failed to parse workspace {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| GarrisonError::WorkspaceError(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn selection(&self) -> Selection {
        Selection::from_indices(self.selection.iter().copied())
    }

    pub fn set_selection(&mut self, selection: &Selection) {
        self.selection = selection.iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garrison_core::Vec3;

    #[test]
    fn test_json_layout_matches_legacy_files() {
        let legacy = r#"{
  "map_file": "/missions/bot_spawn_commands.txt",
  "camera": {
    "position": [12.0, -40.0, 25.0],
    "focal": [0.0, 0.0, 0.0],
    "up": [0.0, 0.0, 1.0]
  },
  "selection": [0, 2, 5],
  "orientation_marker": {
    "visible": false,
    "offset": [1.0, 0.0, 0.0]
  }
}"#;
        let workspace: Workspace = serde_json::from_str(legacy).unwrap();
        assert_eq!(
            workspace.map_file,
            PathBuf::from("/missions/bot_spawn_commands.txt")
        );
        assert_eq!(workspace.camera.position, Vec3::new(12.0, -40.0, 25.0));
        assert_eq!(workspace.selection, vec![0, 2, 5]);
        assert!(!workspace.orientation_marker.visible);
        assert_eq!(workspace.orientation_marker.offset, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let workspace: Workspace =
            serde_json::from_str(r#"{"map_file": "spawns.txt"}"#).unwrap();
        assert_eq!(workspace.camera, Camera::default());
        assert!(workspace.selection.is_empty());
        assert!(workspace.orientation_marker.visible);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("garrison_ws_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("workspace.json");

        let mut workspace = Workspace::new("/missions/alpha.txt");
        workspace.camera.position = Vec3::new(1.0, 2.0, 3.0);
        workspace.set_selection(&Selection::from_indices([4, 1]));
        workspace.save(&path).unwrap();

        let loaded = Workspace::load(&path).unwrap();
        assert_eq!(loaded, workspace);
        assert_eq!(loaded.selection, vec![1, 4]);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }
}
