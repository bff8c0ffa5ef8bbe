//! Trigger to choreography dispatch

use crate::sequencer::Sequencer;
use crate::step::Choreography;
use choreo_core::{EntityRegistry, Error, RotationState};
use rustc_hash::FxHashMap;
use tracing::warn;

/// Maps external input trigger ids to registered choreographies
///
/// `fire` is the only path from input into the scene: it looks up the
/// choreography and hands it to the sequencer. Unregistered ids are logged
/// and ignored — a stray button press never crashes the visualization.
pub struct TriggerDispatcher {
    table: FxHashMap<String, Choreography>,
}

impl Default for TriggerDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    /// Register (or replace) the choreography for a trigger id
    pub fn register(&mut self, id: impl Into<String>, choreography: Choreography) {
        self.table.insert(id.into(), choreography);
    }

    /// Whether a trigger id is registered
    pub fn is_registered(&self, id: &str) -> bool {
        self.table.contains_key(id)
    }

    /// Registered trigger ids
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(|s| s.as_str())
    }

    /// Fire a trigger, starting its choreography on the sequencer
    ///
    /// An unregistered id logs `UnregisteredTrigger` and mutates nothing.
    pub fn fire(
        &self,
        id: &str,
        sequencer: &mut Sequencer,
        registry: &mut EntityRegistry,
        rotation: &mut RotationState,
    ) {
        match self.table.get(id) {
            Some(choreography) => {
                sequencer.start(id, choreography, registry, rotation);
            }
            None => {
                let err = Error::UnregisteredTrigger(id.to_string());
                warn!(%err, "ignoring trigger");
            }
        }
    }
}
