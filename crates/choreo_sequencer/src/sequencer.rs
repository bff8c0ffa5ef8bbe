//! Cooperative choreography executor
//!
//! The sequencer advances on explicit `tick(dt_ms)` calls from the frame
//! loop. Delays are remaining-time counters on each run, not OS timers, so
//! cancellation is transactional: once a run leaves `Running` it is never
//! advanced again, no matter when its delay would have elapsed.

use crate::run::{RunId, RunStatus, SequenceRun};
use crate::step::{Choreography, ChoreographyStep, TransformField};
use choreo_core::{EntityRegistry, RotationState};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tracing::{debug, trace, warn};

/// Executes choreographies against the shared scene state
///
/// Guarantees at most one live run per trigger id: starting a choreography
/// for a trigger that already has a `Running` run cancels that run first
/// and suppresses its pending delayed steps permanently.
pub struct Sequencer {
    runs: SlotMap<RunId, SequenceRun>,
    /// Trigger id -> its single Running run
    live: FxHashMap<String, RunId>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self {
            runs: SlotMap::with_key(),
            live: FxHashMap::default(),
        }
    }

    /// Start a choreography for a trigger, cancelling any run in flight
    ///
    /// Steps up to the first delay execute synchronously before this
    /// returns. An empty choreography completes immediately.
    pub fn start(
        &mut self,
        trigger: &str,
        choreography: &Choreography,
        registry: &mut EntityRegistry,
        rotation: &mut RotationState,
    ) -> RunId {
        if let Some(prev) = self.live.remove(trigger) {
            if let Some(run) = self.runs.get_mut(prev) {
                run.status = RunStatus::Cancelled;
                debug!(trigger, "cancelled in-flight run");
            }
        }

        let id = self
            .runs
            .insert(SequenceRun::new(trigger, choreography.steps.clone()));
        self.live.insert(trigger.to_string(), id);
        debug!(trigger, steps = choreography.len(), "run started");

        self.advance(id, 0.0, registry, rotation);
        id
    }

    /// Advance simulated time for every running run
    ///
    /// Leftover time carries across consecutive delays within one run, so
    /// a large `dt_ms` can complete several delayed stretches at once.
    /// Terminal runs from previous ticks are swept here.
    pub fn tick(&mut self, dt_ms: f32, registry: &mut EntityRegistry, rotation: &mut RotationState) {
        self.sweep();

        let ids: Vec<RunId> = self.runs.keys().collect();
        for id in ids {
            self.advance(id, dt_ms, registry, rotation);
        }
    }

    /// Status of a run, if it has not been swept yet
    pub fn status(&self, id: RunId) -> Option<RunStatus> {
        self.runs.get(id).map(|run| run.status)
    }

    /// The Running run for a trigger, if any
    pub fn live_run(&self, trigger: &str) -> Option<RunId> {
        self.live.get(trigger).copied()
    }

    /// Number of runs in `Running` status for a trigger
    pub fn running_count(&self, trigger: &str) -> usize {
        self.runs
            .values()
            .filter(|run| run.trigger == trigger && run.status.is_live())
            .count()
    }

    /// Whether any run is still live
    pub fn is_idle(&self) -> bool {
        self.live.is_empty()
    }

    /// Drop runs that reached a terminal state
    fn sweep(&mut self) {
        self.runs.retain(|_, run| run.status.is_live());
    }

    /// Execute a run's steps with `budget_ms` of elapsed time
    fn advance(
        &mut self,
        id: RunId,
        budget_ms: f32,
        registry: &mut EntityRegistry,
        rotation: &mut RotationState,
    ) {
        let Some(run) = self.runs.get_mut(id) else {
            return;
        };
        if !run.status.is_live() {
            return;
        }

        let mut budget = budget_ms;
        if run.remaining_ms > 0.0 {
            if run.remaining_ms > budget {
                run.remaining_ms -= budget;
                return;
            }
            budget -= run.remaining_ms;
            run.remaining_ms = 0.0;
        }

        while run.status.is_live() {
            if run.is_exhausted() {
                run.status = RunStatus::Completed;
                self.live.remove(&run.trigger);
                debug!(trigger = %run.trigger, "run completed");
                break;
            }

            let step = run.steps[run.cursor].clone();
            run.cursor += 1;

            if let ChoreographyStep::Delay { ms } = step {
                if ms > budget {
                    run.remaining_ms = ms - budget;
                    break;
                }
                budget -= ms;
                continue;
            }

            trace!(trigger = %run.trigger, cursor = run.cursor, ?step, "applying step");
            apply_step(&step, registry, rotation);
        }
    }
}

/// Apply one non-delay step to the scene state
///
/// Every failure here is recovered: steps whose target entity is absent
/// (load failed) or whose origin was never captured are skipped with a
/// warning, mirroring the source's defensive guards.
fn apply_step(step: &ChoreographyStep, registry: &mut EntityRegistry, rotation: &mut RotationState) {
    match step {
        ChoreographyStep::SetTransform {
            entity,
            field,
            value,
        } => match registry.get_mut(entity) {
            Ok(target) => match field {
                TransformField::Position => target.position = *value,
                TransformField::Rotation => target.rotation = *value,
                TransformField::Scale => target.scale = *value,
            },
            Err(err) => warn!(%err, "skipping transform step"),
        },
        ChoreographyStep::SetVisible { entity, visible } => match registry.get_mut(entity) {
            Ok(target) => target.visible = *visible,
            Err(err) => warn!(%err, "skipping visibility step"),
        },
        ChoreographyStep::ToggleRotationSign => rotation.toggle_sign(),
        ChoreographyStep::RestoreOrigin { entity, field } => {
            // Only resting positions are snapshotted; a restore of any
            // other field has nothing to read and is skipped.
            if *field != TransformField::Position {
                warn!(entity = %entity, ?field, "no origin snapshot exists for this field, skipping");
                return;
            }
            match registry.origin(entity) {
                Ok(origin) => {
                    if let Ok(target) = registry.get_mut(entity) {
                        target.position = origin;
                    }
                }
                Err(err) => warn!(%err, "skipping origin restore"),
            }
        }
        ChoreographyStep::Delay { .. } => {
            // Delays are consumed by the advance loop.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::{SceneEntity, Vec3};

    struct Stage {
        registry: EntityRegistry,
        rotation: RotationState,
        sequencer: Sequencer,
    }

    /// Scene with thingy resting at (10, 0, 0), origin captured
    fn stage() -> Stage {
        let mut registry = EntityRegistry::new();
        registry.insert("thingy", SceneEntity::new().with_position(10.0, 0.0, 0.0));
        registry.insert("spiral", SceneEntity::new().with_visible(false));
        registry.snapshot_origin("thingy").unwrap();
        Stage {
            registry,
            rotation: RotationState::new(),
            sequencer: Sequencer::new(),
        }
    }

    fn cleaning_jet() -> Choreography {
        Choreography::new()
            .set_position("thingy", Vec3::new(10.0, 3.0, 0.0))
            .delay(2000.0)
            .restore_origin("thingy", TransformField::Position)
    }

    #[test]
    fn test_jet_raises_then_restores() {
        let mut s = stage();
        s.sequencer
            .start("cleaningjet", &cleaning_jet(), &mut s.registry, &mut s.rotation);

        // Immediate effect, then suspended on the delay
        assert_eq!(
            s.registry.get("thingy").unwrap().position,
            Vec3::new(10.0, 3.0, 0.0)
        );

        s.sequencer.tick(1999.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 3.0);

        s.sequencer.tick(1.0, &mut s.registry, &mut s.rotation);
        assert_eq!(
            s.registry.get("thingy").unwrap().position,
            Vec3::new(10.0, 0.0, 0.0)
        );
        assert!(s.sequencer.is_idle());
    }

    #[test]
    fn test_refire_cancels_pending_steps() {
        let mut s = stage();
        let first = s.sequencer.start(
            "cleaningjet",
            &cleaning_jet(),
            &mut s.registry,
            &mut s.rotation,
        );

        // 500 ms in, fire again
        s.sequencer.tick(500.0, &mut s.registry, &mut s.rotation);
        let second = s.sequencer.start(
            "cleaningjet",
            &cleaning_jet(),
            &mut s.registry,
            &mut s.rotation,
        );

        assert_eq!(s.sequencer.status(first), Some(RunStatus::Cancelled));
        assert_eq!(s.sequencer.status(second), Some(RunStatus::Running));
        assert_eq!(s.sequencer.running_count("cleaningjet"), 1);
        assert_eq!(s.sequencer.live_run("cleaningjet"), Some(second));

        // The first run's restore would have fired at t=2000 ms. Advance
        // past it; only the second run's own clock may restore.
        s.sequencer.tick(1600.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 3.0);

        s.sequencer.tick(400.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 0.0);
    }

    #[test]
    fn test_empty_choreography_completes_immediately() {
        let mut s = stage();
        let id = s.sequencer.start(
            "vizualize",
            &Choreography::new(),
            &mut s.registry,
            &mut s.rotation,
        );
        assert_eq!(s.sequencer.status(id), Some(RunStatus::Completed));
        assert!(s.sequencer.is_idle());

        // Swept on the next tick
        s.sequencer.tick(16.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.sequencer.status(id), None);
    }

    #[test]
    fn test_leftover_time_carries_across_delays() {
        let mut s = stage();
        let c = Choreography::new()
            .delay(100.0)
            .set_visible("spiral", true)
            .delay(100.0)
            .set_visible("spiral", false);
        s.sequencer
            .start("blink", &c, &mut s.registry, &mut s.rotation);

        // One large tick covers both delays
        s.sequencer.tick(250.0, &mut s.registry, &mut s.rotation);
        assert!(!s.registry.get("spiral").unwrap().visible);
        assert!(s.sequencer.is_idle());
    }

    #[test]
    fn test_independent_triggers_interleave() {
        let mut s = stage();
        let show = Choreography::new().delay(100.0).set_visible("spiral", true);
        let raise = Choreography::new()
            .delay(300.0)
            .set_position("thingy", Vec3::new(10.0, 3.0, 0.0));

        s.sequencer
            .start("a", &show, &mut s.registry, &mut s.rotation);
        s.sequencer
            .start("b", &raise, &mut s.registry, &mut s.rotation);

        s.sequencer.tick(100.0, &mut s.registry, &mut s.rotation);
        assert!(s.registry.get("spiral").unwrap().visible);
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 0.0);

        s.sequencer.tick(200.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 3.0);
    }

    #[test]
    fn test_absent_entity_steps_are_skipped() {
        let mut s = stage();
        let c = Choreography::new()
            .set_position("never_loaded", Vec3::new(1.0, 1.0, 1.0))
            .set_visible("never_loaded", true)
            .set_position("thingy", Vec3::new(0.0, 5.0, 0.0));

        s.sequencer
            .start("partial", &c, &mut s.registry, &mut s.rotation);

        // Missing targets skipped, later steps still ran
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 5.0);
    }

    #[test]
    fn test_restore_without_snapshot_is_noop() {
        let mut s = stage();
        let c = Choreography::new().restore_origin("spiral", TransformField::Position);
        let id = s
            .sequencer
            .start("restore", &c, &mut s.registry, &mut s.rotation);

        assert_eq!(s.sequencer.status(id), Some(RunStatus::Completed));
        assert_eq!(s.registry.get("spiral").unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn test_restore_non_position_field_is_noop() {
        let mut s = stage();
        s.registry.get_mut("thingy").unwrap().scale = Vec3::splat(2.0);
        let c = Choreography::new().restore_origin("thingy", TransformField::Scale);
        s.sequencer
            .start("restore", &c, &mut s.registry, &mut s.rotation);

        assert_eq!(s.registry.get("thingy").unwrap().scale, Vec3::splat(2.0));
    }

    #[test]
    fn test_toggle_steps_from_two_runs_in_timed_order() {
        let mut s = stage();
        let early = Choreography::new().delay(100.0).toggle_rotation_sign();
        let late = Choreography::new().delay(300.0).toggle_rotation_sign();

        s.sequencer
            .start("early", &early, &mut s.registry, &mut s.rotation);
        s.sequencer
            .start("late", &late, &mut s.registry, &mut s.rotation);

        use choreo_core::RotationSign;
        s.sequencer.tick(100.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.rotation.sign(), RotationSign::Negative);

        s.sequencer.tick(200.0, &mut s.registry, &mut s.rotation);
        assert_eq!(s.rotation.sign(), RotationSign::Positive);
    }

    #[test]
    fn test_cancelled_run_never_resumes_even_across_many_ticks() {
        let mut s = stage();
        let first = s.sequencer.start(
            "cleaningjet",
            &cleaning_jet(),
            &mut s.registry,
            &mut s.rotation,
        );
        s.sequencer.start(
            "cleaningjet",
            &cleaning_jet(),
            &mut s.registry,
            &mut s.rotation,
        );
        assert_eq!(s.sequencer.status(first), Some(RunStatus::Cancelled));

        for _ in 0..10 {
            s.sequencer.tick(1000.0, &mut s.registry, &mut s.rotation);
        }
        // First run was swept without ever executing its restore again;
        // the scene settled through the second run alone.
        assert_eq!(s.sequencer.status(first), None);
        assert_eq!(s.registry.get("thingy").unwrap().position.y, 0.0);
    }
}
