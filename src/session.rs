//! Game session: the context object the host loop drives
//!
//! Owns the run state, settings, loaded assets and the wall clock, and turns
//! one input sample into one frame.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::assets::Assets;
use crate::renderer::{FrameData, Projection, RoadParams};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, TickOutcome, tick};

/// End-of-session statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub runs_finished: u32,
    pub best_distance: f32,
    pub total_ticks: u64,
    pub collisions: u32,
}

pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    pub assets: Assets,
    road_params: RoadParams,
    projection: Projection,
    started: Instant,
    last_outcome: TickOutcome,
    runs_finished: u32,
    best_distance: f32,
    total_ticks: u64,
    collisions: u32,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

impl Session {
    pub fn new(settings: Settings, assets: Assets) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Starting session with seed {seed}");
        Self {
            state: GameState::new(seed),
            road_params: settings.road_params(),
            projection: settings.projection(),
            settings,
            assets,
            started: Instant::now(),
            last_outcome: TickOutcome::default(),
            runs_finished: 0,
            best_distance: 0.0,
            total_ticks: 0,
            collisions: 0,
        }
    }

    /// Seconds since the session started
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Advance one frame using the wall clock
    pub fn frame(&mut self, input: &TickInput) -> FrameData {
        let now = self.elapsed_secs();
        self.frame_at(input, now)
    }

    /// Advance one frame at an explicit time (seconds since session start)
    pub fn frame_at(&mut self, input: &TickInput, now: f64) -> FrameData {
        let outcome = tick(&mut self.state, input, now);
        self.total_ticks += 1;

        if outcome.hit.is_some() {
            self.collisions += 1;
        }
        if outcome.game_over {
            self.runs_finished += 1;
            self.best_distance = self.best_distance.max(self.state.car.distance_travelled());
        }

        self.last_outcome = outcome;
        FrameData::build(
            &self.state,
            &outcome,
            &self.road_params,
            &self.projection,
            self.assets.has_road_texture(),
        )
    }

    pub fn last_outcome(&self) -> &TickOutcome {
        &self.last_outcome
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.state.seed,
            runs_finished: self.runs_finished,
            best_distance: self.best_distance.max(self.state.car.distance_travelled()),
            total_ticks: self.total_ticks,
            collisions: self.collisions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudText;
    use crate::sim::{Obstacle, ObstacleKind};

    fn session() -> Session {
        let settings = Settings {
            seed: Some(31),
            ..Default::default()
        };
        Session::new(settings, Assets::default())
    }

    #[test]
    fn test_seed_from_settings() {
        let session = session();
        assert_eq!(session.state.seed, 31);
        assert_eq!(session.summary().runs_finished, 0);
    }

    #[test]
    fn test_frame_advances_state() {
        let mut session = session();
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        let frame = session.frame_at(&input, 0.0);
        assert!(session.state.car.z < 0.0);
        assert!(!frame.road_textured);
        assert!(matches!(frame.hud, HudText::Running { .. }));
        assert_eq!(session.summary().total_ticks, 1);
    }

    #[test]
    fn test_game_over_counts_a_run() {
        let mut session = session();
        session.state.attempts = 1;
        session
            .state
            .obstacles
            .push(Obstacle::new(99, ObstacleKind::Large, 0.0, 0.0, 0.0));

        let frame = session.frame_at(&TickInput::default(), 1.0);
        assert!(matches!(frame.hud, HudText::GameOver { .. }));
        assert_eq!(session.runs_finished(), 1);
        assert_eq!(session.summary().collisions, 1);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        session.frame_at(&restart, 2.0);
        assert!(session.last_outcome().restarted);
        assert_eq!(session.state.attempts, 3);
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_string(&session().summary()).unwrap();
        assert!(json.contains("\"seed\":31"));
    }
}
