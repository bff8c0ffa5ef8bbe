//! Declarative choreography steps
//!
//! The three source scene variants differ only in which steps their
//! triggers perform, so choreographies are data, not handler code. Step
//! lists deserialize straight out of scene config files.

use choreo_core::Vec3;
use serde::{Deserialize, Serialize};

/// Which part of an entity's transform a step touches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformField {
    Position,
    Rotation,
    Scale,
}

/// One timed mutation in a choreography
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ChoreographyStep {
    /// Write a whole transform field on an entity
    SetTransform {
        entity: String,
        field: TransformField,
        value: Vec3,
    },
    /// Show or hide an entity
    SetVisible { entity: String, visible: bool },
    /// Flip the idle rotation direction
    ToggleRotationSign,
    /// Suspend this run (and only this run) for a duration
    Delay { ms: f32 },
    /// Write an entity's origin snapshot back to a transform field
    RestoreOrigin {
        entity: String,
        field: TransformField,
    },
}

/// An ordered, named list of timed mutation steps
///
/// Built either from config or in code via the builder methods:
///
/// ```
/// use choreo_sequencer::{Choreography, TransformField};
/// use choreo_core::Vec3;
///
/// let jet = Choreography::new()
///     .set_position("thingy", Vec3::new(10.0, 3.0, 0.0))
///     .delay(2000.0)
///     .restore_origin("thingy", TransformField::Position);
/// assert_eq!(jet.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Choreography {
    #[serde(default)]
    pub steps: Vec<ChoreographyStep>,
}

impl Choreography {
    /// Create an empty choreography
    ///
    /// Registering an empty choreography is valid; firing it produces a
    /// run that completes immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary step
    pub fn then(mut self, step: ChoreographyStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a whole-field transform write
    pub fn set_transform(self, entity: impl Into<String>, field: TransformField, value: Vec3) -> Self {
        self.then(ChoreographyStep::SetTransform {
            entity: entity.into(),
            field,
            value,
        })
    }

    /// Append a position write
    pub fn set_position(self, entity: impl Into<String>, value: Vec3) -> Self {
        self.set_transform(entity, TransformField::Position, value)
    }

    /// Append a scale write
    pub fn set_scale(self, entity: impl Into<String>, value: Vec3) -> Self {
        self.set_transform(entity, TransformField::Scale, value)
    }

    /// Append a visibility flip
    pub fn set_visible(self, entity: impl Into<String>, visible: bool) -> Self {
        self.then(ChoreographyStep::SetVisible {
            entity: entity.into(),
            visible,
        })
    }

    /// Append a rotation-direction toggle
    pub fn toggle_rotation_sign(self) -> Self {
        self.then(ChoreographyStep::ToggleRotationSign)
    }

    /// Append a delay in milliseconds
    pub fn delay(self, ms: f32) -> Self {
        self.then(ChoreographyStep::Delay { ms })
    }

    /// Append an origin restore
    pub fn restore_origin(self, entity: impl Into<String>, field: TransformField) -> Self {
        self.then(ChoreographyStep::RestoreOrigin {
            entity: entity.into(),
            field,
        })
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the choreography has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let c = Choreography::new()
            .set_position("thingy", Vec3::new(10.0, 3.0, 0.0))
            .delay(2000.0)
            .restore_origin("thingy", TransformField::Position);

        assert_eq!(c.len(), 3);
        assert!(matches!(c.steps[1], ChoreographyStep::Delay { ms } if ms == 2000.0));
        assert!(matches!(
            c.steps[2],
            ChoreographyStep::RestoreOrigin {
                field: TransformField::Position,
                ..
            }
        ));
    }

    #[test]
    fn test_steps_deserialize_from_toml() {
        let doc = r#"
            [[steps]]
            op = "set_transform"
            entity = "thingy"
            field = "position"
            value = { x = 10.0, y = 3.0, z = 0.0 }

            [[steps]]
            op = "delay"
            ms = 2000.0

            [[steps]]
            op = "toggle_rotation_sign"

            [[steps]]
            op = "restore_origin"
            entity = "thingy"
            field = "position"
        "#;

        let c: Choreography = toml::from_str(doc).unwrap();
        assert_eq!(
            c.steps[0],
            ChoreographyStep::SetTransform {
                entity: "thingy".to_string(),
                field: TransformField::Position,
                value: Vec3::new(10.0, 3.0, 0.0),
            }
        );
        assert_eq!(c.steps[2], ChoreographyStep::ToggleRotationSign);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_empty_choreography_deserializes() {
        let c: Choreography = toml::from_str("").unwrap();
        assert!(c.is_empty());
    }
}
