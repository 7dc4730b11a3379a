//! On-screen text
//!
//! Formatting only; the host decides where and how the lines are drawn.

use crate::sim::{GameState, TickOutcome};

pub const GAME_OVER_TITLE: &str = "GAME OVER";
pub const GAME_OVER_PROMPT: &str = "Press 'R' to restart";

/// Text lines for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudText {
    Running {
        distance: String,
        speed: String,
        attempts: String,
    },
    GameOver {
        title: String,
        prompt: String,
    },
}

impl HudText {
    /// Build the HUD from the latest tick
    pub fn from_tick(state: &GameState, outcome: &TickOutcome) -> Self {
        if state.is_game_over() {
            return Self::GameOver {
                title: GAME_OVER_TITLE.to_string(),
                prompt: GAME_OVER_PROMPT.to_string(),
            };
        }
        Self::Running {
            distance: format_distance(outcome.distance_travelled, state.max_distance),
            speed: format_speed(outcome.current_speed),
            attempts: format!("Attempts: {}", state.attempts),
        }
    }

    /// Lines top to bottom
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Running {
                distance,
                speed,
                attempts,
            } => vec![distance.as_str(), speed.as_str(), attempts.as_str()],
            Self::GameOver { title, prompt } => vec![title.as_str(), prompt.as_str()],
        }
    }
}

/// "Distance: 123.4 m", capped at the run's maximum
pub fn format_distance(distance: f32, max_distance: f32) -> String {
    format!("Distance: {:.1} m", distance.min(max_distance))
}

/// "Speed: 0.24 m/s", direction dropped
pub fn format_speed(speed: f32) -> String {
    format!("Speed: {:.2} m/s", speed.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_formatting() {
        assert_eq!(format_distance(12.345, 1000.0), "Distance: 12.3 m");
        assert_eq!(format_distance(1003.0, 1000.0), "Distance: 1000.0 m");
        assert_eq!(format_speed(-0.24), "Speed: 0.24 m/s");
    }

    #[test]
    fn test_running_lines() {
        let state = GameState::new(1);
        let outcome = TickOutcome {
            current_speed: -0.2,
            distance_travelled: 4.0,
            ..Default::default()
        };
        let hud = HudText::from_tick(&state, &outcome);
        assert_eq!(
            hud.lines(),
            vec!["Distance: 4.0 m", "Speed: 0.20 m/s", "Attempts: 3"]
        );
    }

    #[test]
    fn test_game_over_lines() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        let hud = HudText::from_tick(&state, &TickOutcome::default());
        assert_eq!(hud.lines(), vec![GAME_OVER_TITLE, GAME_OVER_PROMPT]);
    }
}
