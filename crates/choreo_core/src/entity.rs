//! Scene entity handle

use crate::math::Vec3;
use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an entity in the registry
    pub struct EntityId;
}

/// Transform and visibility handle for a loaded scene entity
///
/// This is the full surface the choreography core may touch: position,
/// Euler rotation (radians, vertical axis = y), scale, and visibility.
/// Geometry and materials stay with the render host.
#[derive(Clone, Debug)]
pub struct SceneEntity {
    /// Position in world space
    pub position: Vec3,
    /// Euler rotation in radians
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Visibility flag; hidden entities are neither drawn nor spun
    pub visible: bool,
}

impl Default for SceneEntity {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            visible: true,
        }
    }
}

impl SceneEntity {
    /// Create a new entity at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Set Euler rotation (radians)
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Set scale
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    /// Set uniform scale
    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    /// Set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Advance rotation about the vertical axis
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation.y += angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let e = SceneEntity::new();
        assert_eq!(e.position, Vec3::ZERO);
        assert_eq!(e.scale, Vec3::ONE);
        assert!(e.visible);
    }

    #[test]
    fn test_rotate_y_accumulates() {
        let mut e = SceneEntity::new();
        e.rotate_y(0.05);
        e.rotate_y(0.05);
        assert!((e.rotation.y - 0.1).abs() < 1e-6);
        assert_eq!(e.rotation.x, 0.0);
    }
}
