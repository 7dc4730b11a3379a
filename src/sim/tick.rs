//! Per-frame simulation tick
//!
//! One tick per rendered frame: read the held directions, move the car,
//! grow the track, maybe spawn an obstacle, then resolve collisions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::check_collisions;
use super::state::{GamePhase, GameState, Obstacle, ObstacleKind};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Accelerate along the track
    pub forward: bool,
    /// Steer toward -x
    pub left: bool,
    /// Steer toward +x
    pub right: bool,
    /// Start a new run (honoured only after game over)
    pub restart: bool,
}

/// What happened during a tick, for the HUD and the host loop
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Longitudinal speed for the current distance band (negative = forward)
    pub current_speed: f32,
    /// Distance from the start line before this tick's movement
    pub distance_travelled: f32,
    /// Obstacle hit this tick
    pub hit: Option<u32>,
    /// The run ended this tick
    pub game_over: bool,
    /// A new run started this tick
    pub restarted: bool,
}

/// Speed for a distance band: +20% every 40 m
#[inline]
pub fn current_speed(distance_travelled: f32) -> f32 {
    let multiplier = 1.0 + (distance_travelled / SPEED_STEP_DISTANCE).floor() * SPEED_STEP_BONUS;
    BASE_SPEED * multiplier
}

/// Chance of spawning an obstacle this tick
///
/// Base chance plus bonuses for speed (saturating at 0.5/tick) and distance
/// (saturating at 500 m).
pub fn spawn_probability(speed_z: f32, z: f32) -> f32 {
    let speed_factor = (speed_z.abs() / SPAWN_SPEED_REFERENCE).min(1.0);
    let distance_factor = (z.abs() / SPAWN_DISTANCE_REFERENCE).min(1.0);
    SPAWN_BASE_PROBABILITY + speed_factor * SPAWN_SPEED_BONUS + distance_factor * SPAWN_DISTANCE_BONUS
}

/// Advance the car one step and return `(current_speed, distance_travelled)`
pub fn update(state: &mut GameState, input: &TickInput) -> (f32, f32) {
    let distance_travelled = state.car.distance_travelled();
    let speed = current_speed(distance_travelled);

    if input.forward && distance_travelled < state.max_distance {
        state.car.speed_z = speed;
        state.track_length += TRACK_GROWTH_PER_TICK;
        try_spawn_obstacle(state);
    } else {
        state.car.speed_z = 0.0;
    }

    state.car.speed_x = if input.left && state.car.x > -LATERAL_LIMIT {
        -STEER_SPEED
    } else if input.right && state.car.x < LATERAL_LIMIT {
        STEER_SPEED
    } else {
        0.0
    };

    state.car.x += state.car.speed_x;
    state.car.z += state.car.speed_z;

    (speed, distance_travelled)
}

/// Roll for an obstacle at the far end of the generated track
///
/// Spawns are kept at least `SPAWN_MIN_SPACING` apart along z. Returns the
/// new obstacle's ID.
pub fn try_spawn_obstacle(state: &mut GameState) -> Option<u32> {
    let probability = spawn_probability(state.car.speed_z, state.car.z);
    if state.rng.random::<f32>() >= probability {
        return None;
    }

    let z = state.car.z - state.track_length;
    if let Some(last_z) = state.last_spawn_z {
        if (z - last_z).abs() < SPAWN_MIN_SPACING {
            return None;
        }
    }

    let x = state.curve.centerline_x(z)
        + state
            .rng
            .random_range(-SPAWN_LATERAL_SCATTER..=SPAWN_LATERAL_SCATTER);
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let drift = match kind {
        ObstacleKind::Mobile if state.rng.random_bool(0.5) => MOBILE_DRIFT,
        ObstacleKind::Mobile => -MOBILE_DRIFT,
        _ => 0.0,
    };

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::new(id, kind, x, z, drift));
    state.last_spawn_z = Some(z);

    log::debug!("Spawned {} obstacle {} at ({:.2}, {:.2})", kind.as_str(), id, x, z);
    Some(id)
}

/// Slide mobile obstacles sideways, bouncing off the lateral limits
pub fn drift_obstacles(state: &mut GameState) {
    for obstacle in state.obstacles.iter_mut().filter(|o| o.drift != 0.0) {
        obstacle.x += obstacle.drift;
        if obstacle.x.abs() >= LATERAL_LIMIT {
            obstacle.x = obstacle.x.clamp(-LATERAL_LIMIT, LATERAL_LIMIT);
            obstacle.drift = -obstacle.drift;
        }
    }
}

/// Drop obstacles the car can no longer reach
///
/// The car never moves toward +z, so anything well behind it is dead weight.
pub fn cull_obstacles(state: &mut GameState) -> usize {
    let car_z = state.car.z;
    let before = state.obstacles.len();
    state
        .obstacles
        .retain(|obstacle| obstacle.z - car_z <= OBSTACLE_CULL_BEHIND);
    before - state.obstacles.len()
}

/// Advance the game by one frame at wall-clock time `now` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> TickOutcome {
    if state.phase == GamePhase::Running && state.attempts == 0 {
        state.phase = GamePhase::GameOver;
    }

    if state.phase == GamePhase::GameOver {
        let restarted = input.restart;
        if restarted {
            state.restart();
        }
        return TickOutcome {
            distance_travelled: state.car.distance_travelled(),
            restarted,
            ..Default::default()
        };
    }

    state.time_ticks += 1;

    let (current_speed, distance_travelled) = update(state, input);
    drift_obstacles(state);
    let hit = check_collisions(state, now);
    cull_obstacles(state);

    let game_over = state.attempts == 0;
    if game_over {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at {:.1} m after {} ticks",
            distance_travelled,
            state.time_ticks
        );
    }

    TickOutcome {
        current_speed,
        distance_travelled,
        hit,
        game_over,
        restarted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FORWARD: TickInput = TickInput {
        forward: true,
        left: false,
        right: false,
        restart: false,
    };

    #[test]
    fn test_first_forward_tick() {
        let mut state = GameState::new(1);
        let (speed, distance) = update(&mut state, &FORWARD);

        assert!((speed + 0.2).abs() < 1e-6);
        assert_eq!(distance, 0.0);
        assert_eq!(state.track_length, 52.0);
        assert!((state.car.z + 0.2).abs() < 1e-6);
        assert_eq!(state.car.speed_z, speed);
    }

    #[test]
    fn test_speed_steps_every_40m() {
        assert!((current_speed(39.9) + 0.2).abs() < 1e-6);
        assert!((current_speed(40.0) + 0.24).abs() < 1e-6);
        assert!((current_speed(85.0) + 0.28).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_probability_bounds() {
        assert_eq!(spawn_probability(0.0, 0.0), 0.15);
        assert!((spawn_probability(-0.25, -250.0) - 0.25).abs() < 1e-6);
        // Both bonuses saturate
        assert!((spawn_probability(-2.0, -5000.0) - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_no_forward_no_growth() {
        let mut state = GameState::new(1);
        update(&mut state, &TickInput::default());
        assert_eq!(state.track_length, 50.0);
        assert_eq!(state.car.z, 0.0);
        assert_eq!(state.car.speed_z, 0.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_max_distance_stops_the_car() {
        let mut state = GameState::new(1);
        state.car.z = -1000.0;
        let (_, distance) = update(&mut state, &FORWARD);
        assert_eq!(distance, 1000.0);
        assert_eq!(state.car.speed_z, 0.0);
        assert_eq!(state.car.z, -1000.0);
        assert_eq!(state.track_length, 50.0);
    }

    #[test]
    fn test_steering_respects_bounds() {
        let mut state = GameState::new(1);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        update(&mut state, &left);
        assert!((state.car.x + 0.1).abs() < 1e-6);

        state.car.x = -5.0;
        update(&mut state, &left);
        assert_eq!(state.car.speed_x, 0.0);
        assert_eq!(state.car.x, -5.0);

        // Left wins when both are held
        state.car.x = 0.0;
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        update(&mut state, &both);
        assert!((state.car.speed_x + 0.1).abs() < 1e-6);

        state.car.x = 5.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        update(&mut state, &right);
        assert_eq!(state.car.speed_x, 0.0);
    }

    #[test]
    fn test_spawned_obstacles_sit_on_the_road() {
        let mut state = GameState::new(99);
        for _ in 0..2000 {
            update(&mut state, &FORWARD);
        }
        assert!(!state.obstacles.is_empty());
        for obstacle in &state.obstacles {
            let centre = state.curve.centerline_x(obstacle.z);
            assert!((obstacle.x - centre).abs() <= SPAWN_LATERAL_SCATTER + 1e-4);
            assert_eq!(obstacle.half_size, obstacle.kind.half_size());
            match obstacle.kind {
                ObstacleKind::Mobile => assert_eq!(obstacle.drift.abs(), MOBILE_DRIFT),
                _ => assert_eq!(obstacle.drift, 0.0),
            }
        }
    }

    #[test]
    fn test_mobile_obstacles_drift_and_bounce() {
        let mut state = GameState::new(1);
        state.obstacles.push(Obstacle::new(1, ObstacleKind::Mobile, 0.0, -30.0, MOBILE_DRIFT));
        state.obstacles.push(Obstacle::new(2, ObstacleKind::Mobile, -4.99, -40.0, -MOBILE_DRIFT));
        state.obstacles.push(Obstacle::new(3, ObstacleKind::Large, 1.0, -50.0, 0.0));

        drift_obstacles(&mut state);

        assert!((state.obstacles[0].x - MOBILE_DRIFT).abs() < 1e-6);
        assert_eq!(state.obstacles[1].x, -LATERAL_LIMIT);
        assert_eq!(state.obstacles[1].drift, MOBILE_DRIFT);
        assert_eq!(state.obstacles[2].x, 1.0);
    }

    #[test]
    fn test_cull_only_far_behind() {
        let mut state = GameState::new(1);
        state.car.z = -100.0;
        state.obstacles.push(Obstacle::new(1, ObstacleKind::Small, 0.0, -85.0, 0.0));
        state.obstacles.push(Obstacle::new(2, ObstacleKind::Small, 0.0, -95.0, 0.0));
        state.obstacles.push(Obstacle::new(3, ObstacleKind::Small, 0.0, -140.0, 0.0));

        assert_eq!(cull_obstacles(&mut state), 1);
        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut state = GameState::new(5);
        state.attempts = 1;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(id, ObstacleKind::Large, 0.0, 0.0, 0.0));

        let outcome = tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(outcome.hit, Some(id));
        assert!(outcome.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.attempts, 0);

        // Input is ignored until restart
        let before_z = state.car.z;
        let outcome = tick(&mut state, &FORWARD, 2.0);
        assert!(!outcome.restarted);
        assert_eq!(state.car.z, before_z);
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &restart, 3.0);
        assert!(outcome.restarted);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.attempts, 3);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = GameState::new(5);
        tick(&mut state, &FORWARD, 0.0);
        let z = state.car.z;
        let outcome = tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            0.1,
        );
        assert!(!outcome.restarted);
        assert_eq!(state.car.z, z);
    }

    #[test]
    fn test_zero_attempts_enters_game_over_before_input() {
        let mut state = GameState::new(5);
        state.attempts = 0;
        let outcome = tick(&mut state, &FORWARD, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.car.z, 0.0);
        assert_eq!(outcome.current_speed, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(2024);
        let mut state2 = GameState::new(2024);
        let inputs = [
            FORWARD,
            TickInput {
                forward: true,
                left: true,
                ..Default::default()
            },
            FORWARD,
            TickInput::default(),
        ];

        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            let now = i as f64 * 0.016;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }

        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.car, state2.car);
        assert_eq!(state1.attempts, state2.attempts);
    }

    proptest! {
        #[test]
        fn spawns_are_spaced_apart(seed in any::<u64>(), ticks in 1usize..3000) {
            let mut state = GameState::new(seed);
            for _ in 0..ticks {
                update(&mut state, &FORWARD);
            }
            let mut zs: Vec<f32> = state.obstacles.iter().map(|o| o.z).collect();
            zs.sort_by(|a, b| a.total_cmp(b));
            for pair in zs.windows(2) {
                prop_assert!((pair[1] - pair[0]).abs() >= SPAWN_MIN_SPACING);
            }
        }
    }
}
