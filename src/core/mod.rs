pub mod camera;
pub mod constants;
pub mod geometry;
pub mod interaction;
pub mod keys;
pub mod orbit;
pub mod scene;
pub mod stats;

pub use camera::*;
pub use constants::*;
pub use geometry::*;
pub use interaction::*;
pub use keys::*;
pub use orbit::*;
pub use scene::*;
pub use stats::*;

// Shaders bundled as string constants
pub static MESH_WGSL: &str = include_str!("../../shaders/mesh.wgsl");
