//! Game state and core simulation types
//!
//! Everything a run mutates lives here; nothing is process-global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::curve::TrackCurve;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Car is driving
    Running,
    /// Attempts exhausted, waiting for restart
    GameOver,
}

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Small,
    Large,
    /// Drifts sideways every tick
    Mobile,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Small, ObstacleKind::Large, ObstacleKind::Mobile];

    /// Collision half-extent (also the render scale)
    pub fn half_size(&self) -> f32 {
        match self {
            ObstacleKind::Small => 0.5,
            ObstacleKind::Large => 1.0,
            ObstacleKind::Mobile => 0.7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Small => "small",
            ObstacleKind::Large => "large",
            ObstacleKind::Mobile => "mobile",
        }
    }
}

/// An obstacle on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Lateral position
    pub x: f32,
    /// Longitudinal position
    pub z: f32,
    /// Axis-aligned collision half-extent
    pub half_size: f32,
    pub kind: ObstacleKind,
    /// Lateral movement per tick (zero unless mobile)
    pub drift: f32,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, x: f32, z: f32, drift: f32) -> Self {
        Self {
            id,
            x,
            z,
            half_size: kind.half_size(),
            kind,
            drift: if kind == ObstacleKind::Mobile { drift } else { 0.0 },
        }
    }

    /// Axis-aligned overlap test against a point (the car)
    #[inline]
    pub fn overlaps(&self, x: f32, z: f32) -> bool {
        (x - self.x).abs() < self.half_size && (z - self.z).abs() < self.half_size
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Car {
    pub x: f32,
    pub z: f32,
    pub speed_x: f32,
    pub speed_z: f32,
    /// Collisions are ignored while set
    pub invulnerable: bool,
    /// Wall-clock seconds of the last collision
    pub last_collision_time: f64,
}

impl Car {
    /// Distance driven from the start line
    #[inline]
    pub fn distance_travelled(&self) -> f32 {
        self.z.abs()
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn, obstacle kind and collision nudge rolls
    pub rng: Pcg32,
    /// Track centreline
    pub curve: TrackCurve,
    pub car: Car,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Remaining attempts
    pub attempts: u8,
    /// Extent of track generated so far
    pub track_length: f32,
    /// Forward driving stops at this distance
    pub max_distance: f32,
    pub phase: GamePhase,
    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
    /// z of the most recent spawn, for spacing
    pub last_spawn_z: Option<f32>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            curve: TrackCurve::default(),
            car: Car::default(),
            obstacles: Vec::new(),
            attempts: START_ATTEMPTS,
            track_length: START_TRACK_LENGTH,
            max_distance: MAX_DISTANCE,
            phase: GamePhase::Running,
            time_ticks: 0,
            last_spawn_z: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset every entity to its construction-time value
    ///
    /// The RNG keeps advancing so consecutive runs differ.
    pub fn restart(&mut self) {
        self.car = Car::default();
        self.obstacles.clear();
        self.attempts = START_ATTEMPTS;
        self.track_length = START_TRACK_LENGTH;
        self.max_distance = MAX_DISTANCE;
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.last_spawn_z = None;
        log::info!("Run restarted");
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
