//! Orbit-style camera controller.
//!
//! Input handlers accumulate rotate/pan/dolly deltas; `update` folds them into
//! the camera once per frame. With damping enabled the deltas decay over
//! several frames instead of being consumed at once.

use crate::core::camera::Camera;
use crate::core::constants::*;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const POLAR_EPS: f32 = 1e-6;
// Damped deltas below this are dropped
const SETTLE_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrbitGesture {
    #[default]
    None,
    Rotate,
    Pan,
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub gesture: OrbitGesture,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_damping: false,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            gesture: OrbitGesture::None,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn begin(&mut self, gesture: OrbitGesture) {
        if self.enabled {
            self.gesture = gesture;
        }
    }

    pub fn end(&mut self) {
        self.gesture = OrbitGesture::None;
    }

    /// Route a pointer movement according to the active gesture.
    pub fn drag(&mut self, camera: &Camera, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        match self.gesture {
            OrbitGesture::Rotate => self.rotate(dx, dy, viewport_height),
            OrbitGesture::Pan => self.pan(camera, dx, dy, viewport_height),
            OrbitGesture::None => {}
        }
    }

    /// Pixel drag to azimuth/polar deltas: a full viewport height is one turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Screen-space pan scaled so the target tracks the cursor.
    pub fn pan(&mut self, camera: &Camera, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let offset = camera.eye - camera.target;
        let target_distance = offset.length() * (camera.fovy_radians * 0.5).tan();
        let view = camera.view_matrix().inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();
        let step = 2.0 * target_distance / h * self.pan_speed;
        self.pan_offset += -right * dx * step + up * dy * step;
    }

    /// Wheel notch: negative `delta_y` moves closer.
    pub fn dolly(&mut self, delta_y: f32) {
        if !self.enabled {
            return;
        }
        if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        } else if delta_y > 0.0 {
            self.scale /= ORBIT_ZOOM_STEP;
        }
    }

    fn has_pending(&self) -> bool {
        self.delta_theta != 0.0
            || self.delta_phi != 0.0
            || self.pan_offset != Vec3::ZERO
            || self.scale != 1.0
    }

    /// Apply accumulated deltas to `camera`. Returns true if anything moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.has_pending() {
            return false;
        }
        let offset = camera.eye - camera.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let damp = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.delta_theta * damp;
        phi = (phi + self.delta_phi * damp).clamp(POLAR_EPS, PI - POLAR_EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        camera.target += self.pan_offset * damp;

        let sin_phi = phi.sin();
        camera.eye = camera.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta = settle(self.delta_theta * keep);
            self.delta_phi = settle(self.delta_phi * keep);
            self.pan_offset *= keep;
            if self.pan_offset.length_squared() < SETTLE_EPS * SETTLE_EPS {
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
        true
    }
}

#[inline]
fn settle(v: f32) -> f32 {
    if v.abs() < SETTLE_EPS {
        0.0
    } else {
        v
    }
}
