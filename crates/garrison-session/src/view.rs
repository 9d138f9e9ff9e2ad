//! World/view coordinate mapping
//!
//! Script coordinates follow the game convention (y is up); the 3D view is
//! z-up with the x axis mirrored. Headings are degrees clockwise from
//! north.

use garrison_core::Vec3;
use garrison_script::Orientation;

/// Map a script-space position into view space
pub fn world_to_view(p: Vec3) -> Vec3 {
    Vec3::new(-p.x, p.z, p.y)
}

/// Unit direction in view space for a heading in degrees
pub fn heading_vector(degrees: f32) -> Vec3 {
    let rad = degrees.to_radians();
    Vec3::new(rad.sin(), -rad.cos(), 0.0)
}

/// Facing direction of either orientation form; Euler rotations face
/// along their yaw component
pub fn orientation_vector(orientation: &Orientation) -> Vec3 {
    heading_vector(orientation.yaw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_world_to_view_swizzle() {
        let v = world_to_view(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vec3::new(-1.0, 3.0, 2.0));
    }

    #[test]
    fn test_heading_vector_cardinals() {
        assert!(close(heading_vector(0.0), Vec3::new(0.0, -1.0, 0.0)));
        assert!(close(heading_vector(90.0), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(heading_vector(180.0), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(heading_vector(270.0), Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_orientation_vector_uses_yaw() {
        let euler = Orientation::Euler(Vec3::new(10.0, 90.0, 5.0));
        assert!(close(orientation_vector(&euler), heading_vector(90.0)));
    }
}
