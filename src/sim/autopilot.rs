//! Idle/demo mode: the game plays itself
//!
//! Jump timing is derived by replaying the jump arc with the same integrator
//! the tick uses, so the predictions match the simulation exactly as long as
//! scroll speed holds steady during the jump. Obstacles packed into a cluster
//! are planned as one span.

use super::collision::{Hitbox, actor_hitbox, obstacle_hitbox};
use super::jump::{self, vertical_overlap};
use super::state::{Actor, Obstacle, RunPhase, SimulationState};
use crate::tuning::Tuning;

/// Tick window (first, last) after a jump during which the actor is vertically
/// clear of `obstacle`. `None` if the jump never clears it.
pub fn clear_window(
    state: &SimulationState,
    tuning: &Tuning,
    obstacle: &Obstacle,
) -> Option<(u32, u32)> {
    let target = obstacle_hitbox(obstacle, tuning.insets.obstacle);
    jump::clear_window(tuning, &state.field, &target)
}

/// Smallest hitbox-to-hitbox gap at which a jump still clears `obstacle`
/// at the current scroll speed.
pub fn min_jump_clearance(
    state: &SimulationState,
    tuning: &Tuning,
    obstacle: &Obstacle,
) -> Option<f32> {
    let (first, _) = clear_window(state, tuning, obstacle)?;
    Some(state.scroll_speed * (first - 1) as f32)
}

/// Horizontal gap between the actor's hitbox and the obstacle's
pub fn gap_ahead(state: &SimulationState, tuning: &Tuning, obstacle: &Obstacle) -> f32 {
    obstacle_hitbox(obstacle, tuning.insets.obstacle).min.x
        - actor_hitbox(&state.actor, tuning.insets.actor).max.x
}

/// Hitbox covering the nearest obstacle that would hit the actor standing,
/// merged with any that follow too closely to land between
pub fn threat_span(state: &SimulationState, tuning: &Tuning) -> Option<Hitbox> {
    let standing = actor_hitbox(&Actor::at_rest(&state.field), tuning.insets.actor);
    let landing_room = standing.max.x - standing.min.x;
    let mut threats = state
        .obstacles
        .iter()
        .map(|o| obstacle_hitbox(o, tuning.insets.obstacle))
        .filter(|hb| hb.max.x > standing.min.x && vertical_overlap(&standing, hb));

    let mut span = threats.next()?;
    for hb in threats {
        if hb.min.x - span.max.x >= landing_room {
            break;
        }
        span = Hitbox {
            min: span.min.min(hb.min),
            max: span.max.max(hb.max),
        };
    }
    Some(span)
}

/// Whether the demo player should jump before the next tick.
///
/// Times the jump so the ticks spent over the threat sit in the middle of the
/// clear window, leaving slack for a speed-up mid-air.
pub fn should_jump(state: &SimulationState, tuning: &Tuning) -> bool {
    if state.phase != RunPhase::Running || state.actor.airborne {
        return false;
    }
    let Some(span) = threat_span(state, tuning) else {
        return false;
    };
    let Some((first, last)) = jump::clear_window(tuning, &state.field, &span) else {
        return false;
    };

    let speed = state.scroll_speed.max(f32::EPSILON);
    let actor_box = actor_hitbox(&state.actor, tuning.insets.actor);
    let overlap_ticks = jump::crossing_ticks(
        actor_box.max.x - actor_box.min.x,
        span.max.x - span.min.x,
        speed,
    );
    let slack = (last + 1 - first).saturating_sub(overlap_ticks);
    let target = first + slack / 2;

    // Gap shrinks by one scroll step per tick; jumping now puts the first
    // overlapping tick at `target`
    span.min.x - actor_box.max.x < speed * target as f32
}
