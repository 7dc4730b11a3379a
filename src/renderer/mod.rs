//! Rendering data module
//!
//! Builds geometry and per-frame data for a wgpu-style backend. Nothing here
//! owns a device; a `FrameSink` implementation does the drawing.

pub mod camera;
pub mod frame;
pub mod shapes;
pub mod vertex;

pub use camera::{ChaseCamera, Lighting, Projection};
pub use frame::{FrameData, FrameSink};
pub use shapes::{RoadMesh, RoadParams};
pub use vertex::{InstanceTransform, Vertex};
