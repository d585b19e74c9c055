//! Per-frame simulation advance
//!
//! The driver calls [`tick`] once per display frame while the run is going.
//! One call advances the world by exactly one step, frame-driven rather than
//! wall-clock driven.

use super::collision::find_collision;
use super::state::{Actor, GameEvent, RunPhase, SimulationState, Snapshot};
use super::{progression, spawn};
use crate::consts::OFFSCREEN_MARGIN;
use crate::tuning::Tuning;

/// Reinitialize the run from the state's seed and enter `Running`.
///
/// Calling it mid-run is an implicit restart.
pub fn reset(state: &mut SimulationState, tuning: &Tuning) {
    state.reseed_rng();
    state.restart_ids();
    state.drain_events();
    state.actor = Actor::at_rest(&state.field);
    state.obstacles.clear();
    state.scroll_speed = tuning.initial_speed;
    state.score = 0.0;
    state.last_speed_step = 0.0;
    state.ticks = 0;
    state.next_spawn_gap = spawn::initial_gap(state, tuning);
    state.phase = RunPhase::Running;

    log::info!("Run started with seed {}", state.seed);
    state.push_event(GameEvent::Started { seed: state.seed });
}

/// Jump if standing; retry if the run is over.
///
/// Ignored while idle or already airborne. Only touches actor fields.
pub fn request_jump(state: &mut SimulationState, tuning: &Tuning) {
    match state.phase {
        RunPhase::Running if !state.actor.airborne => {
            state.actor.vel_y = -tuning.jump_impulse;
            state.actor.airborne = true;
        }
        RunPhase::Terminated => reset(state, tuning),
        _ => {}
    }
}

/// Advance the run by one frame and return the driver's snapshot.
///
/// A no-op unless the run is `Running`.
pub fn tick(state: &mut SimulationState, tuning: &Tuning) -> Snapshot {
    if state.phase != RunPhase::Running {
        return state.snapshot();
    }
    state.ticks += 1;

    // Physics
    let field = state.field;
    state.actor.integrate(tuning.gravity, &field);

    // Spawning
    spawn::evaluate(state, tuning);

    // Scroll
    let speed = state.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    state.obstacles.retain(|o| o.right() > -OFFSCREEN_MARGIN);

    // Score and difficulty
    progression::advance(state, tuning);

    // Collision
    if find_collision(
        &state.actor,
        &state.obstacles,
        tuning.insets.actor,
        tuning.insets.obstacle,
    )
    .is_some()
    {
        state.phase = RunPhase::Terminated;
        let final_score = state.display_score();
        log::info!("Game over after {} ticks, score {}", state.ticks, final_score);
        state.push_event(GameEvent::GameOver { final_score });
    }

    state.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind, SpriteRegion};
    use glam::Vec2;

    fn started(seed: u64, tuning: &Tuning) -> SimulationState {
        let mut state = SimulationState::new(seed);
        reset(&mut state, tuning);
        state
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let tuning = Tuning::classic();
        let mut state = SimulationState::new(1);
        let before = state.clone();
        let snap = tick(&mut state, &tuning);
        assert!(!snap.is_running);
        assert_eq!(state, before);
    }

    #[test]
    fn test_jump_while_idle_ignored() {
        let tuning = Tuning::classic();
        let mut state = SimulationState::new(1);
        request_jump(&mut state, &tuning);
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.actor.vel_y, 0.0);
    }

    #[test]
    fn test_reset_initializes_run() {
        let tuning = Tuning::classic();
        let state = started(42, &tuning);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.scroll_speed, tuning.initial_speed);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.next_spawn_gap >= tuning.initial_gap.min);
        assert!(state.next_spawn_gap <= tuning.initial_gap.max);
    }

    #[test]
    fn test_jump_sets_impulse() {
        let tuning = Tuning::classic();
        let mut state = started(1, &tuning);
        request_jump(&mut state, &tuning);
        assert_eq!(state.actor.vel_y, -12.0);
        assert!(state.actor.airborne);

        let rest = state.field.actor_rest_y();
        tick(&mut state, &tuning);
        assert!(state.actor.y < rest);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tuning = Tuning::classic();
        let mut state = started(1, &tuning);
        // Keep the field empty
        state.next_spawn_gap = f32::INFINITY;
        request_jump(&mut state, &tuning);
        for _ in 0..60 {
            tick(&mut state, &tuning);
        }
        assert!(!state.actor.airborne);
        assert_eq!(state.actor.y, state.field.actor_rest_y());
        assert_eq!(state.actor.vel_y, 0.0);
    }

    #[test]
    fn test_offscreen_obstacles_removed() {
        let tuning = Tuning::classic();
        let mut state = started(1, &tuning);
        state.next_spawn_gap = f32::INFINITY;
        state.obstacles.push(Obstacle {
            id: 99,
            kind: ObstacleKind::Elevated,
            // Far above the actor so it never collides
            pos: Vec2::new(-OFFSCREEN_MARGIN - 28.0, 0.0),
            size: Vec2::new(30.0, 10.0),
            sprite: SpriteRegion::new(0.0, 0.0, 30.0, 10.0),
        });
        tick(&mut state, &tuning);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_collision_terminates_once() {
        let tuning = Tuning::classic();
        let mut state = started(1, &tuning);
        state.next_spawn_gap = f32::INFINITY;
        let ground_y = state.field.ground_y();
        state.obstacles.push(Obstacle {
            id: 1,
            kind: ObstacleKind::Ground,
            pos: Vec2::new(70.0, ground_y - 40.0),
            size: Vec2::new(30.0, 40.0),
            sprite: SpriteRegion::new(0.0, 0.0, 30.0, 40.0),
        });
        let snap = tick(&mut state, &tuning);
        assert!(!snap.is_alive);
        assert!(!snap.is_running);

        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        tick(&mut state, &tuning);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let tuning = Tuning::classic();
        let mut state = started(1, &tuning);
        state.phase = RunPhase::Terminated;
        state.score = 321.0;
        request_jump(&mut state, &tuning);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0.0);
        // The retry tap does not also jump
        assert!(!state.actor.airborne);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::classic();
        let mut state1 = started(99999, &tuning);
        let mut state2 = started(99999, &tuning);

        for i in 0..500 {
            if i % 37 == 0 {
                request_jump(&mut state1, &tuning);
                request_jump(&mut state2, &tuning);
            }
            tick(&mut state1, &tuning);
            tick(&mut state2, &tuning);
        }

        assert_eq!(state1, state2);
    }
}
