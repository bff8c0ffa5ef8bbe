//! Minimal vector math for entity transforms

use serde::{Deserialize, Serialize};

/// 3D vector used for positions, Euler rotations, and scales
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Uniform vector (same value on all axes)
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Copy with a replaced x component
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// Copy with a replaced y component
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Copy with a replaced z component
    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Component-wise approximate equality
    pub fn approx_eq(&self, other: &Vec3, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_replace() {
        let v = Vec3::new(10.0, 0.0, 0.0).with_y(3.0);
        assert_eq!(v, Vec3::new(10.0, 3.0, 0.0));
    }

    #[test]
    fn test_splat() {
        assert_eq!(Vec3::splat(1.7), Vec3::new(1.7, 1.7, 1.7));
    }
}
