//! Curve Runner - An endless driving game on a weaving track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track curve, game state, collisions)
//! - `renderer`: Geometry and per-frame data handed to the render backend
//! - `assets`: Car mesh and road texture loading with fallbacks
//! - `session`: Context object tying state, settings and assets together
//! - `hud`: On-screen text

pub mod assets;
pub mod hud;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, Assets};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Length of one half-sine sweep of the track (metres)
    pub const SEGMENT_LENGTH: f32 = 250.0;
    /// Peak lateral offset of the track centreline
    pub const CURVE_AMPLITUDE: f32 = 2.0;

    /// Run defaults
    pub const START_ATTEMPTS: u8 = 3;
    pub const START_TRACK_LENGTH: f32 = 50.0;
    pub const MAX_DISTANCE: f32 = 1000.0;
    /// Track generated ahead per forward tick
    pub const TRACK_GROWTH_PER_TICK: f32 = 2.0;

    /// Longitudinal speed per tick (negative: the car drives toward -z)
    pub const BASE_SPEED: f32 = -0.2;
    /// Speed multiplier grows by SPEED_STEP_BONUS every SPEED_STEP_DISTANCE
    pub const SPEED_STEP_DISTANCE: f32 = 40.0;
    pub const SPEED_STEP_BONUS: f32 = 0.2;
    /// Lateral speed per tick while steering
    pub const STEER_SPEED: f32 = 0.1;
    /// Steering is accepted while the car is inside [-LATERAL_LIMIT, LATERAL_LIMIT]
    pub const LATERAL_LIMIT: f32 = 5.0;

    /// Obstacle spawning
    pub const SPAWN_BASE_PROBABILITY: f32 = 0.15;
    pub const SPAWN_SPEED_BONUS: f32 = 0.1;
    pub const SPAWN_SPEED_REFERENCE: f32 = 0.5;
    pub const SPAWN_DISTANCE_BONUS: f32 = 0.1;
    pub const SPAWN_DISTANCE_REFERENCE: f32 = 500.0;
    /// Minimum longitudinal gap between consecutive spawns
    pub const SPAWN_MIN_SPACING: f32 = 3.0;
    /// Lateral scatter around the centreline
    pub const SPAWN_LATERAL_SCATTER: f32 = 2.0;
    /// Per-tick lateral drift of mobile obstacles
    pub const MOBILE_DRIFT: f32 = 0.02;
    /// Obstacles further than this behind the car are evicted
    pub const OBSTACLE_CULL_BEHIND: f32 = 10.0;

    /// Collision response
    pub const INVULNERABILITY_SECS: f64 = 3.0;
    pub const COLLISION_NUDGE: f32 = 0.5;
    pub const COLLISION_PUSHBACK: f32 = 2.0;

    /// Road and barrier geometry
    pub const ROAD_Y: f32 = -0.5;
    pub const BARRIER_INNER_X: f32 = 5.3;
    pub const BARRIER_OUTER_X: f32 = 5.5;
    pub const BARRIER_HEIGHT: f32 = 1.0;
    pub const BARRIER_SECTION_LENGTH: f32 = 10.0;
}
