//! Game settings and preferences
//!
//! Stored as JSON next to the binary. Missing fields take their defaults,
//! so a settings file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::renderer::camera::Projection;
use crate::renderer::shapes::RoadParams;

/// Settings file failures
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Presentation and host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    /// Vertical field of view (degrees)
    pub fov_deg: f32,

    // === Track rendering ===
    /// Full road width
    pub track_width: f32,
    /// Distance between road samples
    pub track_resolution: f32,
    /// Arc length per texture repeat
    pub tex_scale: f32,
    /// Road drawn past the generated track
    pub track_margin: f32,

    // === Assets ===
    pub car_model_path: PathBuf,
    pub road_texture_path: PathBuf,

    // === Host loop ===
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Pause between frames
    pub frame_delay_ms: u64,
    /// Frames the headless demo runs before quitting
    pub demo_max_ticks: u64,
    /// Runs the headless demo plays before quitting
    pub demo_runs: u32,
    /// Log the HUD every this many frames (0 = never)
    pub hud_log_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 900,
            window_height: 700,
            fov_deg: 45.0,

            track_width: 10.0,
            track_resolution: 1.0,
            tex_scale: 10.0,
            track_margin: 10.0,

            car_model_path: PathBuf::from("Car.obj"),
            road_texture_path: PathBuf::from("track_texture.png"),

            seed: None,
            frame_delay_ms: 10,
            demo_max_ticks: 20_000,
            demo_runs: 3,
            hud_log_interval: 120,
        }
    }
}

impl Settings {
    /// Road geometry parameters
    pub fn road_params(&self) -> RoadParams {
        RoadParams {
            width: self.track_width,
            resolution: self.track_resolution,
            tex_scale: self.tex_scale,
            margin: self.track_margin,
        }
    }

    /// Camera projection for the configured window
    pub fn projection(&self) -> Projection {
        Projection::new(self.window_width, self.window_height, self.fov_deg)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
