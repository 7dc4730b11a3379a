//! Per-frame render data
//!
//! Everything the backend needs for one frame, derived from the game state.
//! Building it never touches the GPU, so it runs headless and in tests.

use glam::{Mat4, Quat, Vec3};

use super::camera::{ChaseCamera, Lighting, Projection};
use super::shapes::{RoadMesh, RoadParams, barrier_strips, obstacle_transforms, road_strip};
use super::vertex::{InstanceTransform, Vertex, colors};
use crate::assets::{Assets, CarDrawable};
use crate::hud::HudText;
use crate::sim::{GameState, TickOutcome};

/// Car model scale
const CAR_SCALE: f32 = 0.5;

/// Render backend seam
pub trait FrameSink {
    fn present(&mut self, frame: &FrameData, assets: &Assets);
}

/// One frame's worth of geometry, transforms and text
#[derive(Debug, Clone)]
pub struct FrameData {
    pub clear_color: [f32; 4],
    pub view: Mat4,
    pub projection: Mat4,
    pub lighting: Lighting,
    pub road: RoadMesh,
    /// Draw the road with the loaded texture
    pub road_textured: bool,
    pub barriers: Vec<Vertex>,
    pub obstacles: Vec<InstanceTransform>,
    /// Model matrix for the car (model faces +z, so it is turned around)
    pub car_model: Mat4,
    /// Color override for the car
    pub car_tint: Option<[f32; 4]>,
    pub hud: HudText,
}

impl FrameData {
    pub fn build(
        state: &GameState,
        outcome: &TickOutcome,
        road_params: &RoadParams,
        projection: &Projection,
        road_textured: bool,
    ) -> Self {
        let car = &state.car;
        let camera = ChaseCamera::follow(car);

        let car_model = Mat4::from_scale_rotation_translation(
            Vec3::splat(CAR_SCALE),
            Quat::from_rotation_y(std::f32::consts::PI),
            Vec3::new(car.x, 0.0, car.z),
        );

        Self {
            clear_color: colors::BACKGROUND,
            view: camera.view(),
            projection: projection.matrix(),
            lighting: Lighting::default(),
            road: road_strip(&state.curve, state.track_length, road_params),
            road_textured,
            barriers: barrier_strips(state.track_length),
            obstacles: obstacle_transforms(&state.obstacles),
            car_model,
            car_tint: car.invulnerable.then_some(colors::CAR_INVULNERABLE),
            hud: HudText::from_tick(state, outcome),
        }
    }

    /// Road colour: white under a texture, flat grey without one
    pub fn road_color(&self) -> [f32; 4] {
        if self.road_textured {
            colors::ROAD
        } else {
            colors::ROAD_UNTEXTURED
        }
    }

    /// Car colour for the drawable actually available
    pub fn car_color(&self, drawable: CarDrawable<'_>) -> [f32; 4] {
        match (self.car_tint, drawable) {
            (Some(tint), _) => tint,
            (None, CarDrawable::Mesh(_)) => [1.0, 1.0, 1.0, 1.0],
            (None, CarDrawable::Cube) => colors::CAR,
        }
    }
}
