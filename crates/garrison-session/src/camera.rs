//! Camera state for the 3D view

use crate::view::world_to_view;
use garrison_core::Vec3;
use garrison_script::SpawnPoint;
use serde::{Deserialize, Serialize};

/// Camera position, focal point and up vector. Serialized as bare
/// `[x, y, z]` arrays to match the workspace JSON layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    #[serde(with = "crate::vec3_array")]
    pub position: Vec3,
    #[serde(with = "crate::vec3_array")]
    pub focal: Vec3,
    #[serde(with = "crate::vec3_array")]
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -60.0, 30.0),
            focal: Vec3::ZERO,
            up: Vec3::UP,
        }
    }
}

impl Camera {
    /// Place the camera a short way behind a spawn point, looking at it
    /// along its heading
    pub fn behind_point(point: &SpawnPoint) -> Self {
        let focal = world_to_view(point.position);
        let rad = point.orientation.yaw().to_radians();
        let offset = Vec3::new(-10.0 * rad.sin(), 10.0 * rad.cos(), 3.0);
        Self {
            position: focal + offset,
            focal,
            up: Vec3::UP,
        }
    }

    /// Retarget only the focal point, keeping position and up unchanged
    pub fn focus_on(&mut self, point: &SpawnPoint) {
        self.focal = world_to_view(point.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garrison_script::{CommandKind, Orientation};

    fn point(heading: f32) -> SpawnPoint {
        SpawnPoint::new(
            CommandKind::BotSpawn,
            "Guard",
            Vec3::new(10.0, 5.0, 20.0),
            Orientation::Heading(heading),
        )
    }

    #[test]
    fn test_behind_point_faces_the_point() {
        let camera = Camera::behind_point(&point(0.0));
        assert_eq!(camera.focal, Vec3::new(-10.0, 20.0, 5.0));
        // Heading 0 looks toward -y, so the camera backs off toward +y
        assert_eq!(camera.position, Vec3::new(-10.0, 30.0, 8.0));
        assert_eq!(camera.up, Vec3::UP);
    }

    #[test]
    fn test_focus_on_keeps_position() {
        let mut camera = Camera::default();
        let before = camera.position;
        camera.focus_on(&point(90.0));
        assert_eq!(camera.position, before);
        assert_eq!(camera.focal, Vec3::new(-10.0, 20.0, 5.0));
    }

    #[test]
    fn test_serializes_as_arrays() {
        let json = serde_json::to_value(Camera::default()).unwrap();
        assert_eq!(json["up"], serde_json::json!([0.0, 0.0, 1.0]));
    }
}
