use glam::Vec3;

// Shared interaction/visual tuning constants used by the web frontend.

// Tints (sRGB hex)
pub const HOT_PINK: u32 = 0xff69b4; // primary tint for freshly spawned knots
pub const LAWN_GREEN: u32 = 0x7cfc00; // secondary tint after a sign flip

// Drag-to-scale
pub const SCALE_SPEED: f32 = 0.01; // scale units per pixel of vertical drag
pub const MIN_SCALE_ABS: f32 = 0.05; // keeps the mesh from collapsing
pub const MAX_SCALE_ABS: f32 = 6.0;

// Initial orientation of every spawned knot (radians)
pub const SPAWN_ROTATION_X: f32 = std::f32::consts::PI * 0.15;
pub const SPAWN_ROTATION_Y: f32 = std::f32::consts::PI * 0.10;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 100.0);

// Picking plane (XY plane through the origin, facing +Z)
pub const PICK_PLANE_SIZE: f32 = 10_000.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.35;
pub const KEY_LIGHT_INTENSITY: f32 = 1.25;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 100.0, 10.0);

// Torus knot build parameters
pub const KNOT_RADIUS: f32 = 12.0;
pub const KNOT_TUBE: f32 = 3.0;
pub const KNOT_TUBULAR_SEGMENTS: u32 = 160;
pub const KNOT_RADIAL_SEGMENTS: u32 = 24;
pub const KNOT_P: u32 = 2;
pub const KNOT_Q: u32 = 3;

// Orbit controls
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // radius factor per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 5_000.0;
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

/// Convert a packed `0xRRGGBB` color into linear RGB components.
#[inline]
pub fn hex_to_linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
