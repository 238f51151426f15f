//! Host-to-runtime coordinate conversion
//!
//! Z-up hosts are mapped into the runtime's Y-up space with
//! `(x, y, z) -> (x, z, -y)`. The permutation plus negation keeps the
//! determinant positive, so rotated geometry does not mirror. Quaternions get
//! the same treatment on their vector part and keep `w`.
//!
//! Scale is mapped with `(x, y, z) -> (x, z, y)` and no negation. This differs
//! from the point mapping but matches what existing `.toy` consumers expect.

use glam::{EulerRot, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Up axis of the host document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    /// Right-handed Z-up (Blender-style); converted on export
    #[default]
    Z,
    /// Already Y-up (glTF); passed through untouched
    Y,
}

/// Maps positions, rotations and scales from host space to runtime space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateMapper {
    source: UpAxis,
}

impl CoordinateMapper {
    pub fn new(source: UpAxis) -> Self {
        Self { source }
    }

    pub fn source(&self) -> UpAxis {
        self.source
    }

    pub fn map_point(&self, p: Vec3) -> Vec3 {
        match self.source {
            UpAxis::Z => Vec3::new(p.x, p.z, -p.y),
            UpAxis::Y => p,
        }
    }

    /// Maps a quaternion stored as `(x, y, z, w)`
    pub fn map_vector4(&self, q: Vec4) -> Vec4 {
        match self.source {
            UpAxis::Z => Vec4::new(q.x, q.z, -q.y, q.w),
            UpAxis::Y => q,
        }
    }

    pub fn map_rotation(&self, q: Quat) -> Quat {
        Quat::from_vec4(self.map_vector4(Vec4::from(q)))
    }

    pub fn map_scale(&self, s: Vec3) -> Vec3 {
        match self.source {
            UpAxis::Z => Vec3::new(s.x, s.z, s.y),
            UpAxis::Y => s,
        }
    }
}

/// Converts XYZ Euler angles (radians, X applied first) to a quaternion
pub fn euler_xyz_to_quat(angles: Vec3) -> Quat {
    // Extrinsic X, Y, Z equals intrinsic Z, Y, X
    Quat::from_euler(EulerRot::ZYX, angles.z, angles.y, angles.x)
}
