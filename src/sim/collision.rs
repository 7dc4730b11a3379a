//! Car/obstacle collision detection and response
//!
//! Obstacles are axis-aligned boxes of their half-size around `(x, z)`; the
//! car is treated as a point. After a hit the car is invulnerable for a
//! wall-clock window, so frame rate does not change how long it lasts.

use rand::Rng;

use super::state::GameState;
use crate::consts::{COLLISION_NUDGE, COLLISION_PUSHBACK, INVULNERABILITY_SECS};

/// Index of the first obstacle (spawn order) overlapping the car
pub fn first_hit(state: &GameState) -> Option<usize> {
    state
        .obstacles
        .iter()
        .position(|obstacle| obstacle.overlaps(state.car.x, state.car.z))
}

/// Check for collisions at wall-clock time `now` (seconds)
///
/// While invulnerable, only the window expiry is checked. Otherwise at most
/// one collision is resolved: one attempt is lost, the car stops, is nudged
/// sideways, and the obstacle is pushed back. Returns the hit obstacle's ID.
pub fn check_collisions(state: &mut GameState, now: f64) -> Option<u32> {
    if state.car.invulnerable {
        if now - state.car.last_collision_time > INVULNERABILITY_SECS {
            state.car.invulnerable = false;
            log::debug!("Invulnerability expired at {now:.2}s");
        }
        return None;
    }

    let index = first_hit(state)?;

    let nudge = if state.rng.random_bool(0.5) {
        COLLISION_NUDGE
    } else {
        -COLLISION_NUDGE
    };

    state.attempts = state.attempts.saturating_sub(1);
    state.car.last_collision_time = now;
    state.car.invulnerable = true;
    state.car.speed_z = 0.0;
    state.car.x += nudge;

    let obstacle = &mut state.obstacles[index];
    obstacle.z += COLLISION_PUSHBACK;
    let (id, kind) = (obstacle.id, obstacle.kind);

    log::debug!(
        "Hit {} obstacle {} at t={:.2}s, {} attempts left",
        kind.as_str(),
        id,
        now,
        state.attempts
    );

    Some(id)
}
