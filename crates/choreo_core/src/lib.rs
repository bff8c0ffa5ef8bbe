//! Choreo Core
//!
//! Shared scene state for the Choreo viewer:
//!
//! - **SceneEntity**: transform + visibility handle for a loaded model
//! - **EntityRegistry**: named entity lookup and origin snapshots
//! - **RotationState**: the continuous idle spin applied every frame
//!
//! The core never creates, destroys, or draws entities. Loading and
//! rendering are collaborators of `choreo_app`; timed mutation of this
//! state is owned by `choreo_sequencer`.

pub mod entity;
pub mod error;
pub mod math;
pub mod registry;
pub mod rotation;

pub use entity::{EntityId, SceneEntity};
pub use error::{Error, Result};
pub use math::Vec3;
pub use registry::EntityRegistry;
pub use rotation::{RotationSign, RotationState};
