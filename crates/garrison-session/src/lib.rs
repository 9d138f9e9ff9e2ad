//! Garrison Session - in-memory editing session state
//!
//! This crate owns everything a running editor session keeps between
//! commands: the open document (record list plus mutation operations), the
//! folder tree view, the point selection, camera placement, orientation
//! marker math, workspace persistence and the layered editor config.
//!
//! Everything here is synchronous and single-threaded; a session has
//! exactly one writer.

mod camera;
mod config;
mod document;
mod marker;
mod palette;
mod selection;
mod tree;
mod view;
mod workspace;

pub use camera::Camera;
pub use config::EditorConfig;
pub use document::Document;
pub use marker::{MarkerPlacement, OrientationMarker};
pub use palette::type_colors;
pub use selection::Selection;
pub use tree::{FolderNode, FolderTree};
pub use view::{heading_vector, orientation_vector, world_to_view};
pub use workspace::Workspace;

/// Serde adapter storing a `Vec3` as a bare `[x, y, z]` array, the layout
/// the workspace JSON has always used
pub(crate) mod vec3_array {
    use garrison_core::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        value.to_array().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let arr = <[f32; 3]>::deserialize(deserializer)?;
        Ok(Vec3::from_array(arr))
    }
}
