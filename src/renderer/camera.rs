//! Chase camera, projection and light rig

use glam::{Mat4, Vec3};

use crate::sim::Car;

/// Camera height above the road
pub const EYE_HEIGHT: f32 = 1.5;
/// Camera distance behind the car
pub const EYE_BEHIND: f32 = 5.0;

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view (degrees)
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            aspect: 900.0 / 700.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn new(width: u32, height: u32, fov_deg: f32) -> Self {
        Self {
            fov_deg,
            aspect: width as f32 / height.max(1) as f32,
            ..Default::default()
        }
    }

    /// OpenGL-style clip space matrix (z in [-1, 1])
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Eye and target for a chase view of the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    pub eye: Vec3,
    pub target: Vec3,
}

impl ChaseCamera {
    /// Above and behind the car, looking at it
    pub fn follow(car: &Car) -> Self {
        Self {
            eye: Vec3::new(car.x, EYE_HEIGHT, car.z + EYE_BEHIND),
            target: Vec3::new(car.x, 0.0, car.z),
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Single positional light with ambient term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: [f32; 4],
    pub position: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: [0.3, 0.3, 0.3, 1.0],
            position: [0.0, 10.0, 5.0, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [0.5, 0.5, 0.5, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chase_camera_sits_behind_and_above() {
        let car = Car {
            x: 1.5,
            z: -42.0,
            ..Default::default()
        };
        let camera = ChaseCamera::follow(&car);
        assert_eq!(camera.eye, Vec3::new(1.5, 1.5, -37.0));
        assert_eq!(camera.target, Vec3::new(1.5, 0.0, -42.0));
    }

    #[test]
    fn test_view_puts_car_in_front() {
        let car = Car {
            z: -10.0,
            ..Default::default()
        };
        let view = ChaseCamera::follow(&car).view();
        let in_view = view.transform_point3(Vec3::new(0.0, 0.0, -10.0));
        // Right-handed view space looks down -z
        assert!(in_view.z < 0.0);
        assert!(in_view.x.abs() < 1e-5);
    }

    #[test]
    fn test_projection_aspect() {
        let projection = Projection::new(900, 700, 45.0);
        assert!((projection.aspect - 900.0 / 700.0).abs() < 1e-6);
        let m = projection.matrix();
        let f = 1.0 / (22.5f32.to_radians()).tan();
        assert!((m.y_axis.y - f).abs() < 1e-4);
        assert!((m.x_axis.x - f / projection.aspect).abs() < 1e-4);
    }
}
