//! Scene orientation marker
//!
//! The marker is a pair of arrows (UP and NORTH) anchored near the minimum
//! corner of the visible point cloud so the viewer can keep their bearings.
//! Visibility and offset persist in the workspace.

use garrison_core::Vec3;
use serde::{Deserialize, Serialize};

/// Persistent marker state
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationMarker {
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, with = "crate::vec3_array")]
    pub offset: Vec3,
}

fn default_visible() -> bool {
    true
}

impl Default for OrientationMarker {
    fn default() -> Self {
        Self {
            visible: true,
            offset: Vec3::ZERO,
        }
    }
}

/// Computed marker geometry in view space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPlacement {
    pub base: Vec3,
    pub up_length: f32,
    pub north_length: f32,
}

impl OrientationMarker {
    /// Place the marker against the view-space points currently shown.
    /// Arrow lengths scale with the cloud extents, with fixed fallbacks
    /// for flat layouts. Hidden markers and empty clouds place nothing.
    pub fn placement(&self, points: &[Vec3]) -> Option<MarkerPlacement> {
        if !self.visible || points.is_empty() {
            return None;
        }

        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }

        let z_extent = max.z - min.z;
        let y_extent = max.y - min.y;
        Some(MarkerPlacement {
            base: min + self.offset,
            up_length: if z_extent > 0.0 { z_extent * 0.2 } else { 10.0 },
            north_length: if y_extent > 0.0 { y_extent * 0.12 } else { 6.0 },
        })
    }
}
