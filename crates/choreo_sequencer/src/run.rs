//! Live execution state of a choreography

use crate::step::ChoreographyStep;
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a live sequence run
    pub struct RunId;
}

/// Lifecycle of a sequence run
///
/// ```text
/// Running --(delay elapses, not cancelled)--> Running (next step)
/// Running --(last step done)--------------> Completed
/// Running --(same trigger fired again)----> Cancelled
/// ```
///
/// Completed and Cancelled are terminal; a run is never resumed from
/// either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Cancelled,
    Completed,
}

impl RunStatus {
    /// Whether the run can still execute steps
    pub fn is_live(self) -> bool {
        matches!(self, RunStatus::Running)
    }

    /// Whether the run is finished, by either exit
    pub fn is_terminal(self) -> bool {
        !self.is_live()
    }
}

/// One live execution of a choreography
///
/// Owns a copy of the step list so the run stays valid even if the
/// registered choreography is replaced mid-flight.
#[derive(Clone, Debug)]
pub struct SequenceRun {
    /// Trigger id this run belongs to
    pub trigger: String,
    /// Steps being executed
    pub steps: Vec<ChoreographyStep>,
    /// Index of the next step to execute
    pub cursor: usize,
    /// Current lifecycle state
    pub status: RunStatus,
    /// Milliseconds left on the current delay, if suspended
    pub remaining_ms: f32,
}

impl SequenceRun {
    /// Create a fresh run at cursor 0
    pub fn new(trigger: impl Into<String>, steps: Vec<ChoreographyStep>) -> Self {
        Self {
            trigger: trigger.into(),
            steps,
            cursor: 0,
            status: RunStatus::Running,
            remaining_ms: 0.0,
        }
    }

    /// Whether the run is currently waiting out a delay
    pub fn is_suspended(&self) -> bool {
        self.status.is_live() && self.remaining_ms > 0.0
    }

    /// Whether the cursor has consumed every step
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}
