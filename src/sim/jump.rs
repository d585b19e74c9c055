//! Jump arc prediction
//!
//! Replays a jump from standing with the same integrator the tick uses, so
//! spawning and the autopilot agree with the simulation on what is clearable.

use super::collision::{Hitbox, actor_hitbox};
use super::state::{Actor, PlayField};
use crate::tuning::Tuning;

/// Upper bound on simulated airtime
const MAX_AIR_TICKS: u32 = 600;

#[inline]
pub fn vertical_overlap(a: &Hitbox, b: &Hitbox) -> bool {
    a.min.y < b.max.y && a.max.y > b.min.y
}

/// Tick window (first, last) after a jump during which the actor is vertically
/// clear of `target`. `None` if the jump never clears it.
pub fn clear_window(tuning: &Tuning, field: &PlayField, target: &Hitbox) -> Option<(u32, u32)> {
    let mut actor = Actor::at_rest(field);
    actor.vel_y = -tuning.jump_impulse;
    actor.airborne = true;

    let mut first = None;
    for n in 1..=MAX_AIR_TICKS {
        actor.integrate(tuning.gravity, field);
        let clear = !vertical_overlap(&actor_hitbox(&actor, tuning.insets.actor), target);
        match (first, clear) {
            (None, true) => first = Some(n),
            (Some(start), false) => return Some((start, n - 1)),
            _ => {}
        }
        if !actor.airborne {
            break;
        }
    }
    first.map(|start| (start, start))
}

/// Ticks the actor spends horizontally over a hitbox span `span` wide
#[inline]
pub fn crossing_ticks(actor_width: f32, span: f32, speed: f32) -> u32 {
    ((actor_width + span) / speed.max(f32::EPSILON)).ceil() as u32
}

/// Width of the actor's hitbox
pub fn actor_hitbox_width(tuning: &Tuning, field: &PlayField) -> f32 {
    let standing = actor_hitbox(&Actor::at_rest(field), tuning.insets.actor);
    standing.max.x - standing.min.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ground_box(field: &PlayField, tuning: &Tuning, width: f32, height: f32) -> Hitbox {
        Hitbox::inset(
            Vec2::new(0.0, field.ground_y() - height),
            Vec2::new(width, height),
            tuning.insets.obstacle,
        )
    }

    #[test]
    fn test_taller_targets_shrink_window() {
        let field = PlayField::default();
        for tuning in [Tuning::classic(), Tuning::floaty(), Tuning::arcade()] {
            let (low_first, low_last) =
                clear_window(&tuning, &field, &ground_box(&field, &tuning, 30.0, 30.0)).unwrap();
            let (high_first, high_last) =
                clear_window(&tuning, &field, &ground_box(&field, &tuning, 30.0, 50.0)).unwrap();
            assert!(high_first > low_first);
            assert!(high_last < low_last);
        }
    }

    #[test]
    fn test_floaty_window() {
        let field = PlayField::default();
        let tuning = Tuning::floaty();
        let target = ground_box(&field, &tuning, 30.0, 50.0);
        assert_eq!(clear_window(&tuning, &field, &target), Some((6, 41)));
    }

    #[test]
    fn test_crossing_ticks_rounds_up() {
        assert_eq!(crossing_ticks(30.0, 26.0, 5.0), 12);
        assert_eq!(crossing_ticks(30.0, 30.0, 5.0), 12);
        assert_eq!(crossing_ticks(30.0, 31.0, 5.0), 13);
    }
}
