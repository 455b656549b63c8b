//! Browser torus-knot sketchpad: shift-click the ground plane to spawn knots,
//! drag to scale them, `F`/`W` toggle flicker and wireframe.
//!
//! `core` is platform independent and tested on the host; everything else is
//! the WebGPU/DOM frontend and only builds for `wasm32`.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod input;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use app::start;
