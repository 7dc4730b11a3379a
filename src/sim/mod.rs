//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - Wall-clock time is passed in, never read
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod curve;
pub mod state;
pub mod tick;

pub use collision::{check_collisions, first_hit};
pub use curve::TrackCurve;
pub use state::{Car, GamePhase, GameState, Obstacle, ObstacleKind};
pub use tick::{
    TickInput, TickOutcome, cull_obstacles, current_speed, drift_obstacles, spawn_probability,
    tick, try_spawn_obstacle, update,
};
