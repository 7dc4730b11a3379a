//! Geometry generation for the track, barriers and obstacles
//!
//! Road texture coordinates follow arc length along the centreline rather
//! than raw z, so the texture keeps a constant density through the curves.

use glam::{Vec2, Vec3};

use super::vertex::{InstanceTransform, Vertex, colors};
use crate::consts::{
    BARRIER_HEIGHT, BARRIER_INNER_X, BARRIER_OUTER_X, BARRIER_SECTION_LENGTH, ROAD_Y,
};
use crate::sim::{Obstacle, TrackCurve};

const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Road sampling and texturing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadParams {
    /// Full width of the road surface
    pub width: f32,
    /// Distance between centreline samples
    pub resolution: f32,
    /// Arc length covered by one texture repeat
    pub tex_scale: f32,
    /// Road generated beyond the current track length
    pub margin: f32,
}

impl Default for RoadParams {
    fn default() -> Self {
        Self {
            width: 10.0,
            resolution: 1.0,
            tex_scale: 10.0,
            margin: 10.0,
        }
    }
}

/// Road surface as left/right vertex pairs
#[derive(Debug, Clone, Default)]
pub struct RoadMesh {
    /// `[left0, right0, left1, right1, ...]`, usable directly as a triangle strip
    pub vertices: Vec<Vertex>,
    /// Same surface as a triangle list
    pub indices: Vec<u32>,
    /// Total centreline arc length
    pub arc_length: f32,
}

impl RoadMesh {
    /// Number of centreline samples
    pub fn sample_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

/// Build the road surface from the start line to `track_length + margin`
pub fn road_strip(curve: &TrackCurve, track_length: f32, params: &RoadParams) -> RoadMesh {
    let centers = curve.sample_centerline(track_length + params.margin, params.resolution);
    if centers.is_empty() {
        return RoadMesh::default();
    }

    let half_width = params.width / 2.0;
    let mut vertices = Vec::with_capacity(centers.len() * 2);
    let mut arc_length = 0.0;
    let mut normal = Vec2::X;

    for (i, center) in centers.iter().enumerate() {
        if i > 0 {
            arc_length += center.distance(centers[i - 1]);
        }

        let d = i as f32 * params.resolution;
        let sampled = curve.normal_at(d, params.resolution);
        if sampled != Vec2::ZERO {
            normal = sampled;
        }

        let left = *center - normal * half_width;
        let right = *center + normal * half_width;
        let v = arc_length / params.tex_scale;

        vertices.push(Vertex::new([left.x, ROAD_Y, left.y], UP, [0.0, v]));
        vertices.push(Vertex::new([right.x, ROAD_Y, right.y], UP, [1.0, v]));
    }

    let quads = centers.len() as u32 - 1;
    let mut indices = Vec::with_capacity(quads as usize * 6);
    for i in 0..quads {
        let left = i * 2;
        let right = left + 1;
        let next_left = left + 2;
        let next_right = left + 3;
        indices.extend_from_slice(&[left, right, next_left, right, next_right, next_left]);
    }

    RoadMesh {
        vertices,
        indices,
        arc_length,
    }
}

/// Push a quad as two triangles
fn push_quad(out: &mut Vec<Vertex>, corners: [Vec3; 4], normal: Vec3) {
    let n = normal.to_array();
    let uv = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    for &i in &[0usize, 1, 2, 0, 2, 3] {
        out.push(Vertex::new(corners[i].to_array(), n, uv[i]));
    }
}

/// Guard rails on both sides, straight along z
///
/// Rails sit at fixed x and do not follow the road's curve.
pub fn barrier_strips(track_length: f32) -> Vec<Vertex> {
    let sections = (track_length / BARRIER_SECTION_LENGTH).ceil().max(0.0) as usize;
    let mut out = Vec::with_capacity(sections * 2 * 3 * 6);
    let bottom = ROAD_Y;
    let top = ROAD_Y + BARRIER_HEIGHT;

    for section in 0..sections {
        let near = -(section as f32) * BARRIER_SECTION_LENGTH;
        let far = near - BARRIER_SECTION_LENGTH;

        for side in [-1.0f32, 1.0] {
            let inner = side * BARRIER_INNER_X;
            let outer = side * BARRIER_OUTER_X;

            // Face toward the road
            push_quad(
                &mut out,
                [
                    Vec3::new(inner, bottom, near),
                    Vec3::new(inner, bottom, far),
                    Vec3::new(inner, top, far),
                    Vec3::new(inner, top, near),
                ],
                Vec3::new(-side, 0.0, 0.0),
            );
            // Face away from the road
            push_quad(
                &mut out,
                [
                    Vec3::new(outer, bottom, far),
                    Vec3::new(outer, bottom, near),
                    Vec3::new(outer, top, near),
                    Vec3::new(outer, top, far),
                ],
                Vec3::new(side, 0.0, 0.0),
            );
            // Cap
            push_quad(
                &mut out,
                [
                    Vec3::new(inner, top, near),
                    Vec3::new(inner, top, far),
                    Vec3::new(outer, top, far),
                    Vec3::new(outer, top, near),
                ],
                Vec3::Y,
            );
        }
    }

    out
}

/// One cube instance per obstacle, scaled by its half-size
pub fn obstacle_transforms(obstacles: &[Obstacle]) -> Vec<InstanceTransform> {
    obstacles
        .iter()
        .map(|o| InstanceTransform {
            translation: [o.x, 0.0, o.z],
            scale: o.half_size,
            color: colors::OBSTACLE,
        })
        .collect()
}

/// Corners of the unit cube centred on the origin
pub const UNIT_CUBE_CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Wireframe edges as corner index pairs
pub const UNIT_CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Unit cube wireframe as a line list (obstacles and the car fallback)
pub fn unit_cube_lines() -> Vec<Vertex> {
    UNIT_CUBE_EDGES
        .iter()
        .flat_map(|&(a, b)| [UNIT_CUBE_CORNERS[a], UNIT_CUBE_CORNERS[b]])
        .map(|p| Vertex::new(p, UP, [0.0, 0.0]))
        .collect()
}
