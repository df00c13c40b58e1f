use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::effect::ColorShiftMaterial;
use crate::geometry::PlaneGeometry;

/// Placement of a node in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// The point-cloud placement: laid flat (grid normal to +Y), a quarter
    /// unit below the orbit target.
    pub fn floor() -> Self {
        Self {
            position: Vec3::new(0.0, -0.25, 0.0),
            rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            scale: Vec3::ONE,
        }
    }

    /// Local to world matrix.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Grid geometry drawn as points with the color-shift material.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub geometry: PlaneGeometry,
    pub material: ColorShiftMaterial,
    pub transform: Transform,
}

impl PointCloud {
    pub fn new(geometry: PlaneGeometry, material: ColorShiftMaterial, transform: Transform) -> Self {
        Self {
            geometry,
            material,
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_transform_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn floor_lays_the_plane_flat() {
        let m = Transform::floor().matrix();

        // The local +Z normal points up in world space.
        let normal = m.transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < EPS);

        // Local +Y (top row of the grid) runs away from a camera on +Z.
        let top = m.transform_vector3(Vec3::Y);
        assert!((top - Vec3::NEG_Z).length() < EPS);

        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, -0.25, 0.0)).length() < EPS);
    }
}
