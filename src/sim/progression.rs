//! Score accrual and difficulty curve

use super::state::{GameEvent, SimulationState};
use crate::tuning::{SpeedCurve, Tuning};

/// Add distance-proportional score, then grow scroll speed toward the cap.
///
/// Speed never decreases within a run and never exceeds `tuning.max_speed`.
pub fn advance(state: &mut SimulationState, tuning: &Tuning) {
    state.score += tuning.score_per_px * state.scroll_speed;

    let before = state.scroll_speed;
    match tuning.speed_curve {
        SpeedCurve::Stepped {
            every_points,
            increment,
        } => {
            let floored = state.score.floor();
            if floored > state.last_speed_step + every_points {
                state.scroll_speed += increment;
                state.last_speed_step = floored;
            }
        }
        SpeedCurve::Continuous { divisor } => {
            let target = tuning.initial_speed + state.score / divisor;
            state.scroll_speed = state.scroll_speed.max(target);
        }
    }
    state.scroll_speed = state.scroll_speed.min(tuning.max_speed).max(before.min(tuning.max_speed));

    if crossed_milestone(before, state.scroll_speed, tuning) {
        log::debug!("Speed up: {:.2} at score {:.0}", state.scroll_speed, state.score);
        state.push_event(GameEvent::SpeedUp {
            speed: state.scroll_speed,
        });
    }
}

/// Every stepped increment counts; a continuous curve reports whole numbers and the cap
fn crossed_milestone(before: f32, after: f32, tuning: &Tuning) -> bool {
    if after <= before {
        return false;
    }
    match tuning.speed_curve {
        SpeedCurve::Stepped { .. } => true,
        SpeedCurve::Continuous { .. } => {
            after.floor() > before.floor() || after >= tuning.max_speed
        }
    }
}
