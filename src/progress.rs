//! Simulated progress for the pending state
//!
//! The service answers one request with one response and offers no
//! incremental feedback, so the working view fakes it: a percent value
//! climbs on a fixed tick and a stage pointer walks the six agent stages
//! in order. The percent is clamped strictly below 100 until the real
//! result lands; only [`ProgressSimulator::finish`] may claim completion.
//!
//! The simulator owns no timer. The caller ticks it on a cadence of
//! [`TICK_INTERVAL`] and stops it at the state transition out of pending,
//! which also guarantees no stray tick can run past that boundary.

use std::time::Duration;

use crate::stage::{AgentStage, STAGE_COUNT};

/// Cadence the caller should tick at.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Percent gained per tick.
pub const STEP: u8 = 2;

/// Simulated percent never exceeds this until the real result arrives.
pub const CEILING: u8 = 95;

/// Ticks spent on each stage before the pointer advances. Six stages at
/// this width are all visited before the percent reaches [`CEILING`].
const TICKS_PER_STAGE: u32 = 8;

/// Display state of one stage indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Pending,
    Active,
    Complete,
}

/// Time-based progress illusion, driven externally via [`tick`].
///
/// [`tick`]: ProgressSimulator::tick
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    running: bool,
    finished: bool,
    ticks: u32,
    percent: u8,
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh simulation from zero.
    pub fn start(&mut self) {
        self.running = true;
        self.finished = false;
        self.ticks = 0;
        self.percent = 0;
    }

    /// Halt without claiming completion. Used when the analysis fails or
    /// is cancelled; the displayed value simply stops where it was.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Halt and snap to done: percent becomes exactly 100 and every stage
    /// reads complete, whatever the simulation had reached.
    pub fn finish(&mut self) {
        self.running = false;
        self.finished = true;
        self.percent = 100;
    }

    /// Advance one tick. Does nothing unless running.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.ticks += 1;
        self.percent = (self.percent + STEP).min(CEILING);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Index of the stage the pointer is on. Never regresses and never
    /// passes the last stage, however long the real call takes.
    pub fn stage_index(&self) -> usize {
        ((self.ticks / TICKS_PER_STAGE) as usize).min(STAGE_COUNT - 1)
    }

    pub fn current_stage(&self) -> AgentStage {
        AgentStage::ALL[self.stage_index()]
    }

    /// Indicator state for the stage at `index`.
    pub fn stage_state(&self, index: usize) -> StageState {
        if self.finished {
            return StageState::Complete;
        }
        let current = self.stage_index();
        if index < current {
            StageState::Complete
        } else if index == current && self.running {
            StageState::Active
        } else {
            StageState::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ticked(n: u32) -> ProgressSimulator {
        let mut sim = ProgressSimulator::new();
        sim.start();
        for _ in 0..n {
            sim.tick();
        }
        sim
    }

    // ═══════════════════════════════════════════════════════════
    // Percent climb and ceiling
    // ═══════════════════════════════════════════════════════════

    #[test]
    fn test_starts_at_zero() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        assert_eq!(sim.percent(), 0);
        assert_eq!(sim.stage_index(), 0);
        assert!(sim.is_running());
    }

    #[test]
    fn test_tick_adds_fixed_step() {
        assert_eq!(ticked(1).percent(), STEP);
        assert_eq!(ticked(3).percent(), 3 * STEP);
    }

    #[test]
    fn test_percent_pins_at_ceiling() {
        let sim = ticked(200);
        assert_eq!(sim.percent(), CEILING);
    }

    #[test]
    fn test_never_claims_completion_without_finish() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        for _ in 0..500 {
            sim.tick();
            assert!(sim.percent() < 100);
        }
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let mut sim = ProgressSimulator::new();
        sim.tick();
        assert_eq!(sim.percent(), 0);
    }

    #[test]
    fn test_tick_ignored_after_stop() {
        let mut sim = ticked(5);
        sim.stop();
        let frozen = sim.percent();
        sim.tick();
        assert_eq!(sim.percent(), frozen);
        assert!(!sim.is_running());
    }

    // ═══════════════════════════════════════════════════════════
    // Stage pointer
    // ═══════════════════════════════════════════════════════════

    #[test]
    fn test_pointer_monotonic_and_bounded() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        let mut last = sim.stage_index();
        for _ in 0..300 {
            sim.tick();
            let index = sim.stage_index();
            assert!(index >= last);
            assert!(index < STAGE_COUNT);
            last = index;
        }
        assert_eq!(last, STAGE_COUNT - 1);
    }

    #[test]
    fn test_all_stages_visited_before_ceiling() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        let mut seen = [false; STAGE_COUNT];
        while sim.percent() < CEILING {
            seen[sim.stage_index()] = true;
            sim.tick();
        }
        assert!(seen.iter().all(|s| *s), "stages visited: {seen:?}");
    }

    #[test]
    fn test_stage_states_relative_to_pointer() {
        let sim = ticked(TICKS_PER_STAGE + 1);
        assert_eq!(sim.stage_index(), 1);
        assert_eq!(sim.stage_state(0), StageState::Complete);
        assert_eq!(sim.stage_state(1), StageState::Active);
        assert_eq!(sim.stage_state(2), StageState::Pending);
    }

    // ═══════════════════════════════════════════════════════════
    // Finish and restart
    // ═══════════════════════════════════════════════════════════

    #[test]
    fn test_finish_snaps_to_complete() {
        let mut sim = ticked(4);
        sim.finish();
        assert_eq!(sim.percent(), 100);
        assert!(!sim.is_running());
        for index in 0..STAGE_COUNT {
            assert_eq!(sim.stage_state(index), StageState::Complete);
        }
    }

    #[test]
    fn test_start_resets_after_finish() {
        let mut sim = ticked(10);
        sim.finish();
        sim.start();
        assert_eq!(sim.percent(), 0);
        assert_eq!(sim.stage_index(), 0);
        assert_eq!(sim.stage_state(0), StageState::Active);
    }
}
