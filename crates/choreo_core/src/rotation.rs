//! Continuous idle rotation state

use crate::registry::EntityRegistry;
use rustc_hash::FxHashSet;

/// Direction of the idle spin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationSign {
    #[default]
    Positive,
    Negative,
}

impl RotationSign {
    /// Signed multiplier for the rotation rate
    pub fn factor(self) -> f32 {
        match self {
            RotationSign::Positive => 1.0,
            RotationSign::Negative => -1.0,
        }
    }

    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            RotationSign::Positive => RotationSign::Negative,
            RotationSign::Negative => RotationSign::Positive,
        }
    }
}

/// Per-frame rotation applied to the designated spinning entities
///
/// The rate magnitude is fixed at construction; only the sign changes at
/// runtime, and only through [`RotationState::toggle_sign`] (a choreography
/// step). Entities in the spin set advance about the vertical axis every
/// tick while present and visible. Hidden entities accumulate nothing, so
/// an overlay that is shown again resumes from the angle it was hidden at.
pub struct RotationState {
    rate: f32,
    sign: RotationSign,
    spinning: FxHashSet<String>,
}

impl RotationState {
    /// Idle rotation rate of the source viewer, radians per tick
    pub const DEFAULT_RATE: f32 = 0.05;

    /// Create with the default rate and positive direction
    pub fn new() -> Self {
        Self::with_rate(Self::DEFAULT_RATE)
    }

    /// Create with an explicit rate magnitude
    pub fn with_rate(rate: f32) -> Self {
        Self {
            rate,
            sign: RotationSign::Positive,
            spinning: FxHashSet::default(),
        }
    }

    /// Rate magnitude (immutable at runtime)
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Current spin direction
    pub fn sign(&self) -> RotationSign {
        self.sign
    }

    /// Flip the spin direction
    pub fn toggle_sign(&mut self) {
        self.sign = self.sign.flipped();
        tracing::debug!(sign = ?self.sign, "rotation direction toggled");
    }

    /// Add an entity to the spin set
    pub fn mark_spinning(&mut self, name: impl Into<String>) {
        self.spinning.insert(name.into());
    }

    /// Remove an entity from the spin set
    pub fn unmark_spinning(&mut self, name: &str) {
        self.spinning.remove(name);
    }

    /// Whether an entity is in the spin set
    pub fn is_spinning(&self, name: &str) -> bool {
        self.spinning.contains(name)
    }

    /// Advance every present, visible spinning entity by `rate * sign`
    ///
    /// Absent entities (failed loads) are skipped silently, matching the
    /// source's `if (model)` guards.
    pub fn tick(&self, registry: &mut EntityRegistry) {
        let angle = self.rate * self.sign.factor();
        for name in &self.spinning {
            if let Ok(entity) = registry.get_mut(name) {
                if entity.visible {
                    entity.rotate_y(angle);
                }
            }
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}
