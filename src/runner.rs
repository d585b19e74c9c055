//! Driver-facing facade over the simulation
//!
//! A [`Runner`] bundles the run state with its tuning and the visual theme
//! chosen by the player. The driver owns one, feeds it jumps and frame ticks,
//! and reads back snapshots. It never schedules anything itself.

use serde::{Deserialize, Serialize};

use crate::renderer::Scene;
use crate::sim::{self, GameEvent, RunPhase, SimulationState, Snapshot};
use crate::tuning::Tuning;

/// Skin and background identifiers, carried through the core untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub skin: String,
    pub background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            skin: "default".to_string(),
            background: "default".to_string(),
        }
    }
}

pub struct Runner {
    state: SimulationState,
    tuning: Tuning,
    theme: Theme,
    game_over: Option<u64>,
}

impl Runner {
    pub fn new(seed: u64, tuning: Tuning, theme: Theme) -> Self {
        Self {
            state: SimulationState::new(seed),
            tuning: tuning.sanitized(),
            theme,
            game_over: None,
        }
    }

    /// Begin a run (or restart the current one)
    pub fn start(&mut self) {
        self.game_over = None;
        sim::reset(&mut self.state, &self.tuning);
    }

    pub fn reset(&mut self) {
        self.start();
    }

    /// Jump, or retry if the run is over
    pub fn request_jump(&mut self) {
        if self.state.phase == RunPhase::Terminated {
            self.game_over = None;
        }
        sim::request_jump(&mut self.state, &self.tuning);
    }

    /// Advance one frame; the driver should stop scheduling once `is_running` is false
    pub fn tick(&mut self) -> Snapshot {
        let snapshot = sim::tick(&mut self.state, &self.tuning);
        for event in self.state.drain_events() {
            if let GameEvent::GameOver { final_score } = event {
                self.game_over = Some(final_score);
            }
        }
        snapshot
    }

    /// Final score of the last finished run, reported once
    pub fn take_game_over(&mut self) -> Option<u64> {
        self.game_over.take()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Seed used by the next start
    pub fn reseed(&mut self, seed: u64) {
        self.state.seed = seed;
    }

    /// Swap tuning between runs; applies from the next start
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.sanitized();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn scene(&self) -> Scene {
        Scene::project(&self.state, &self.tuning, &self.theme)
    }

    /// Demo mode hook: jump when the autopilot says so
    pub fn autopilot(&mut self) {
        if sim::autopilot::should_jump(&self.state, &self.tuning) {
            sim::request_jump(&mut self.state, &self.tuning);
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_reported_once() {
        let mut runner = Runner::new(5, Tuning::classic(), Theme::default());
        runner.start();
        let mut ticks = 0;
        while runner.tick().is_running {
            ticks += 1;
            assert!(ticks < 5000, "run never ended");
        }
        let score = runner.take_game_over();
        assert!(score.is_some());
        assert_eq!(score, Some(runner.snapshot().display_score));
        assert_eq!(runner.take_game_over(), None);
        runner.tick();
        assert_eq!(runner.take_game_over(), None);
    }

    #[test]
    fn test_jump_after_death_retries() {
        let mut runner = Runner::new(5, Tuning::classic(), Theme::default());
        runner.start();
        while runner.tick().is_running {}
        runner.request_jump();
        let snap = runner.snapshot();
        assert!(snap.is_running);
        assert_eq!(snap.display_score, 0);
    }

    #[test]
    fn test_restart_drops_unclaimed_game_over() {
        let mut runner = Runner::new(5, Tuning::classic(), Theme::default());
        runner.start();
        while runner.tick().is_running {}
        runner.start();
        runner.tick();
        assert!(runner.snapshot().is_running);
        assert_eq!(runner.take_game_over(), None);

        while runner.tick().is_running {}
        runner.request_jump();
        runner.tick();
        assert!(runner.snapshot().is_running);
        assert_eq!(runner.take_game_over(), None);
    }

    #[test]
    fn test_theme_passes_through() {
        let theme = Theme {
            skin: "skin_gold".to_string(),
            background: "bg_night".to_string(),
        };
        let mut runner = Runner::new(1, Tuning::classic(), theme.clone());
        runner.start();
        runner.tick();
        assert_eq!(runner.theme(), &theme);
        assert_eq!(runner.scene().theme, theme);
    }

    #[test]
    fn test_reseed_changes_next_run() {
        let mut runner = Runner::new(1, Tuning::classic(), Theme::default());
        runner.start();
        let first_gap = runner.state().next_spawn_gap;
        runner.reseed(2);
        runner.start();
        assert_eq!(runner.state().seed, 2);
        assert_ne!(runner.state().next_spawn_gap, first_gap);
    }
}
