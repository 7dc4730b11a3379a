//! Track centreline geometry
//!
//! The track weaves left and right as a chain of half-sine segments:
//! - segment index `floor(d / segment_length)` picks the sweep direction
//! - odd segments mirror even ones, so the full period is two segments
//!
//! `d` is distance along the track. The track is laid out toward world `-z`,
//! so the centre of the road at distance `d` sits at world `(offset(d), -d)`.
//! Planar vectors returned here are world XZ packed into a `Vec2` (`y` = z).

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CURVE_AMPLITUDE, SEGMENT_LENGTH};

/// Stateless description of the weaving centreline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackCurve {
    /// Length of one half-sine sweep
    pub segment_length: f32,
    /// Peak lateral offset
    pub amplitude: f32,
}

impl Default for TrackCurve {
    fn default() -> Self {
        Self {
            segment_length: SEGMENT_LENGTH,
            amplitude: CURVE_AMPLITUDE,
        }
    }
}

impl TrackCurve {
    pub fn new(segment_length: f32, amplitude: f32) -> Self {
        Self {
            segment_length,
            amplitude,
        }
    }

    /// Lateral offset of the centreline at track distance `d`
    ///
    /// Defined for every real `d`; negative distances use floor division so
    /// the weave continues seamlessly behind the start line.
    pub fn lateral_offset(&self, d: f32) -> f32 {
        let segment = (d / self.segment_length).floor();
        let local = d - segment * self.segment_length;
        let sign = if segment.rem_euclid(2.0) == 0.0 { 1.0 } else { -1.0 };
        sign * self.amplitude * (PI * local / self.segment_length).sin()
    }

    /// Centreline x of the drawn road at a world z coordinate
    #[inline]
    pub fn centerline_x(&self, world_z: f32) -> f32 {
        self.lateral_offset(-world_z)
    }

    /// Direction of travel at distance `d` (world XZ, not normalized)
    ///
    /// Symmetric finite difference over `step` on either side.
    pub fn tangent_at(&self, d: f32, step: f32) -> Vec2 {
        let dx = (self.lateral_offset(d + step) - self.lateral_offset(d - step)) / 2.0;
        Vec2::new(dx, -step)
    }

    /// Unit normal pointing at the right-hand road edge
    ///
    /// Returns `Vec2::ZERO` when the tangent degenerates (zero `step`).
    pub fn normal_at(&self, d: f32, step: f32) -> Vec2 {
        let tangent = self.tangent_at(d, step);
        // Rotate (tx, tz) by 90 degrees toward +x
        Vec2::new(-tangent.y, tangent.x).normalize_or_zero()
    }

    /// Sample centreline points from 0 to `length` (inclusive) every `resolution`
    pub fn sample_centerline(&self, length: f32, resolution: f32) -> Vec<Vec2> {
        if resolution <= 0.0 || length < 0.0 {
            return Vec::new();
        }
        let count = (length / resolution).floor() as usize + 1;
        (0..count)
            .map(|i| {
                let d = i as f32 * resolution;
                Vec2::new(self.lateral_offset(d), -d)
            })
            .collect()
    }
}
