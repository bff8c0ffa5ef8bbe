//! Choreo Sequencer
//!
//! Executes named choreographies — ordered lists of timed mutation steps —
//! against the shared scene state in `choreo_core`.
//!
//! # Model
//!
//! - A [`Choreography`] is pure data: transform writes, visibility flips,
//!   rotation-sign toggles, origin restores, and delays.
//! - The [`Sequencer`] runs choreographies cooperatively. Non-delay steps
//!   apply synchronously; a delay suspends only its own run. Time advances
//!   through explicit `tick(dt_ms)` calls from the frame loop, so there are
//!   no OS timers and tests drive a simulated clock.
//! - Re-firing a trigger cancels the live run for that trigger before
//!   starting a new one: at most one live run per trigger id, and no step
//!   of a cancelled run ever applies afterwards.
//! - The [`TriggerDispatcher`] maps external input ids to registered
//!   choreographies and is the only path from input to scene mutation.

pub mod dispatcher;
pub mod run;
pub mod sequencer;
pub mod step;

pub use dispatcher::TriggerDispatcher;
pub use run::{RunId, RunStatus, SequenceRun};
pub use sequencer::Sequencer;
pub use step::{Choreography, ChoreographyStep, TransformField};
