//! Car model and road texture loading
//!
//! Loaders return `Result`; `Assets::load` decides the fallback. A missing
//! car model is drawn as a cube, a missing texture leaves the road untextured.

use std::fs;
use std::path::{Path, PathBuf};

use crate::renderer::shapes::UNIT_CUBE_CORNERS;
use crate::settings::Settings;

/// Asset loading failures
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{}:{line}: {message}", path.display())]
    Obj {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("{} contains no faces", path.display())]
    EmptyMesh { path: PathBuf },
}

/// Triangle mesh for the car, drawn as-is
#[derive(Debug, Clone, PartialEq)]
pub struct CarMesh {
    pub positions: Vec<[f32; 3]>,
    /// Triangle list into `positions`
    pub indices: Vec<u32>,
}

impl CarMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Decoded road texture, RGB8, rows bottom-up
#[derive(Debug, Clone, PartialEq)]
pub struct RoadTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Resolve a 1-based (or negative, relative) OBJ index
fn resolve_index(token: &str, count: usize) -> Result<u32, String> {
    let raw = token
        .split('/')
        .next()
        .unwrap_or_default()
        .parse::<i64>()
        .map_err(|e| format!("bad face index {token:?}: {e}"))?;
    let index = match raw {
        0 => return Err("face index 0 is invalid".to_string()),
        i if i > 0 => i - 1,
        i => count as i64 + i,
    };
    if index < 0 || index as usize >= count {
        return Err(format!("face index {raw} out of range ({count} vertices)"));
    }
    Ok(index as u32)
}

/// Parse the geometry of a Wavefront OBJ file
///
/// Only `v` and `f` records are read; polygons are split into triangle fans.
pub fn parse_obj(source: &str, path: &Path) -> Result<CarMesh, AssetError> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    let error = |line: usize, message: String| AssetError::Obj {
        path: path.to_path_buf(),
        line,
        message,
    };

    for (number, line) in source.lines().enumerate() {
        let number = number + 1;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords = parts
                    .take(3)
                    .map(str::parse::<f32>)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| error(number, format!("bad vertex: {e}")))?;
                let [x, y, z] = coords.as_slice() else {
                    return Err(error(number, "vertex needs 3 coordinates".to_string()));
                };
                positions.push([*x, *y, *z]);
            }
            Some("f") => {
                let face = parts
                    .map(|token| resolve_index(token, positions.len()))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|message| error(number, message))?;
                if face.len() < 3 {
                    return Err(error(number, "face needs at least 3 vertices".to_string()));
                }
                for i in 1..face.len() - 1 {
                    indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if indices.is_empty() {
        return Err(AssetError::EmptyMesh {
            path: path.to_path_buf(),
        });
    }

    Ok(CarMesh { positions, indices })
}

/// Load the car model from an OBJ file
pub fn load_car_mesh(path: &Path) -> Result<CarMesh, AssetError> {
    let source = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&source, path)
}

/// Load and decode the road texture, flipped so row 0 is the bottom
pub fn load_road_texture(path: &Path) -> Result<RoadTexture, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = image.flipv().to_rgb8();
    Ok(RoadTexture {
        width: rgb.width(),
        height: rgb.height(),
        pixels: rgb.into_raw(),
    })
}

/// What to draw for the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarDrawable<'a> {
    Mesh(&'a CarMesh),
    /// Fallback when no model is loaded
    Cube,
}

impl CarDrawable<'_> {
    /// Axis-aligned bounds in model space
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let points: &[[f32; 3]] = match self {
            CarDrawable::Mesh(mesh) => mesh.positions.as_slice(),
            CarDrawable::Cube => &UNIT_CUBE_CORNERS[..],
        };
        points.iter().fold(
            ([f32::MAX; 3], [f32::MIN; 3]),
            |(mut min, mut max), p| {
                for axis in 0..3 {
                    min[axis] = min[axis].min(p[axis]);
                    max[axis] = max[axis].max(p[axis]);
                }
                (min, max)
            },
        )
    }
}

/// Loaded resources; either may be absent
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub car: Option<CarMesh>,
    pub road_texture: Option<RoadTexture>,
}

impl Assets {
    /// Load everything named in the settings, falling back on failure
    pub fn load(settings: &Settings) -> Self {
        let car = match load_car_mesh(&settings.car_model_path) {
            Ok(mesh) => {
                log::info!(
                    "Loaded car model {} ({} vertices, {} triangles)",
                    settings.car_model_path.display(),
                    mesh.positions.len(),
                    mesh.triangle_count()
                );
                Some(mesh)
            }
            Err(e) => {
                log::warn!("Car model unavailable, drawing a cube: {e}");
                None
            }
        };

        let road_texture = match load_road_texture(&settings.road_texture_path) {
            Ok(texture) => {
                log::info!(
                    "Loaded road texture {} ({}x{})",
                    settings.road_texture_path.display(),
                    texture.width,
                    texture.height
                );
                Some(texture)
            }
            Err(e) => {
                log::warn!("Road texture unavailable, drawing untextured: {e}");
                None
            }
        };

        Self { car, road_texture }
    }

    pub fn car(&self) -> CarDrawable<'_> {
        match &self.car {
            Some(mesh) => CarDrawable::Mesh(mesh),
            None => CarDrawable::Cube,
        }
    }

    pub fn has_road_texture(&self) -> bool {
        self.road_texture.is_some()
    }
}
