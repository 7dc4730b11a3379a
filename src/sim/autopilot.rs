//! Idle/demo driver
//!
//! Produces the input a player would: hold forward, dodge the closest threat
//! ahead, otherwise drift back toward the centreline. Used by the headless
//! host and handy for soak tests.

use super::state::GameState;
use super::tick::TickInput;

/// How far ahead the autopilot looks for obstacles
const LOOKAHEAD: f32 = 12.0;
/// Extra lateral clearance it tries to keep
const CLEARANCE: f32 = 0.6;
/// Dead zone around the centreline
const CENTRE_TOLERANCE: f32 = 0.3;

/// Choose the input for the next tick
pub fn steer(state: &GameState) -> TickInput {
    if state.is_game_over() {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    let car = &state.car;

    // Nearest obstacle ahead (toward -z) that would clip the car
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.z < car.z + o.half_size && car.z - o.z < LOOKAHEAD)
        .filter(|o| (o.x - car.x).abs() < o.half_size + CLEARANCE)
        .max_by(|a, b| a.z.total_cmp(&b.z));

    let (left, right) = match threat {
        Some(obstacle) if obstacle.x >= car.x => (true, false),
        Some(_) => (false, true),
        None => {
            let centre = state.curve.centerline_x(car.z);
            let offset = car.x - centre;
            (offset > CENTRE_TOLERANCE, offset < -CENTRE_TOLERANCE)
        }
    };

    TickInput {
        forward: true,
        left,
        right,
        restart: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Obstacle, ObstacleKind};
    use crate::sim::tick::tick;

    #[test]
    fn test_restarts_after_game_over() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::GameOver;
        assert!(steer(&state).restart);
    }

    #[test]
    fn test_dodges_obstacle_ahead() {
        let mut state = GameState::new(3);
        state.car.x = 0.2;
        state.obstacles.push(Obstacle::new(1, ObstacleKind::Large, 0.5, -5.0, 0.0));
        let input = steer(&state);
        assert!(input.forward);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_ignores_obstacles_behind() {
        let mut state = GameState::new(3);
        state.car.z = -50.0;
        let clear = steer(&state);
        state.obstacles.push(Obstacle::new(1, ObstacleKind::Large, 0.0, -45.0, 0.0));
        assert_eq!(steer(&state), clear);
    }

    #[test]
    fn test_follows_the_curve() {
        let mut state = GameState::new(3);
        // Centreline at z=-125 is at x=+2
        state.car.z = -125.0;
        let input = steer(&state);
        assert!(input.right);
        state.car.x = 2.1;
        let input = steer(&state);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_long_run_stays_on_track() {
        let mut state = GameState::new(77);
        for i in 0..6000 {
            let input = steer(&state);
            tick(&mut state, &input, i as f64 / 60.0);
            assert!(state.car.x.abs() <= 5.7, "car left the track at tick {i}");
        }
    }
}
