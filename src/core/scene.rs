//! Editor session: spawned knots, the active drag, and display modes.
//!
//! Everything the event handlers and the frame loop touch lives on one
//! [`Session`]. The web frontend keeps it behind `Rc<RefCell<_>>`; tests drive
//! it directly.

use crate::core::camera::{client_to_ndc, Camera, PickingPlane};
use crate::core::constants::*;
use crate::core::geometry::{torus_knot, Geometry, TorusKnotParams};
use crate::core::interaction::{scale_step, InteractionConfig, PointerButton, ScaleStep};
use crate::core::orbit::{OrbitControls, OrbitGesture};
use crate::core::stats::SceneStats;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub opacity: f32,
    pub transparent: bool,
    pub wireframe: bool,
}

impl Material {
    pub fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = hex_to_linear_rgb(self.color);
        [r, g, b, self.opacity]
    }
}

#[derive(Clone, Debug)]
pub struct SpawnedObject {
    pub position: Vec3,
    /// Euler angles (XYZ order).
    pub rotation: Vec3,
    /// Signed uniform scale applied to all three axes.
    pub scale: f32,
    pub is_green: bool,
    pub last_sign: f32,
    pub material: Material,
    pub geometry: Rc<Geometry>,
    /// Transform or material changed since the renderer last uploaded it.
    pub needs_update: bool,
}

impl SpawnedObject {
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

pub struct Session {
    pub config: InteractionConfig,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub plane: PickingPlane,
    pub objects: Vec<SpawnedObject>,
    pub flicker: bool,
    pub wireframe: bool,
    geometry: Rc<Geometry>,
    last_stats: Option<SceneStats>,
    target: Option<usize>,
    scaling: bool,
    viewport: (u32, u32),
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            Rc::new(torus_knot(&TorusKnotParams::default())),
            InteractionConfig::default(),
        )
    }
}

impl Session {
    pub fn new(geometry: Rc<Geometry>, config: InteractionConfig) -> Self {
        Self {
            config,
            camera: Camera::default(),
            orbit: OrbitControls::default(),
            plane: PickingPlane::default(),
            objects: Vec::new(),
            flicker: false,
            wireframe: false,
            geometry,
            last_stats: None,
            target: None,
            scaling: false,
            viewport: (1, 1),
        }
    }

    /// Geometry every new knot shares.
    pub fn geometry(&self) -> &Rc<Geometry> {
        &self.geometry
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        self.camera.set_viewport(width, height);
    }

    pub fn is_scaling(&self) -> bool {
        self.scaling
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// World point under a client coordinate on the picking plane.
    pub fn pick(&self, x: f32, y: f32) -> Option<Vec3> {
        let (w, h) = self.viewport;
        let ndc = client_to_ndc(x, y, w as f32, h as f32);
        self.plane.intersect(&self.camera.ray_through_ndc(ndc))
    }

    /// Pointer press. With `shift` held this tries to spawn a knot under the
    /// cursor and returns its index; otherwise it starts an orbit gesture.
    pub fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        button: PointerButton,
    ) -> Option<usize> {
        if shift {
            self.orbit.end();
            self.orbit.enabled = false;
            let hit = self.pick(x, y)?;
            return Some(self.spawn_at(hit));
        }
        match button {
            PointerButton::Primary => self.orbit.begin(OrbitGesture::Rotate),
            PointerButton::Secondary => self.orbit.begin(OrbitGesture::Pan),
            PointerButton::Other => {}
        }
        None
    }

    /// Append a fresh knot at `position` and make it the scaling target.
    pub fn spawn_at(&mut self, position: Vec3) -> usize {
        self.objects.push(SpawnedObject {
            position,
            rotation: Vec3::new(SPAWN_ROTATION_X, SPAWN_ROTATION_Y, 0.0),
            scale: 1.0,
            is_green: false,
            last_sign: 1.0,
            material: Material {
                color: self.config.primary,
                opacity: 1.0,
                transparent: true,
                wireframe: self.wireframe,
            },
            geometry: self.geometry.clone(),
            needs_update: true,
        });
        let index = self.objects.len() - 1;
        self.target = Some(index);
        self.scaling = true;
        log::info!(
            "[spawn] knot {} at ({:.1},{:.1},{:.1})",
            index,
            position.x,
            position.y,
            position.z
        );
        index
    }

    /// Pointer move with per-axis movement deltas in CSS pixels.
    pub fn pointer_move(&mut self, dx: f32, dy: f32) {
        if self.scaling {
            self.scale_target(dy);
            return;
        }
        let height = self.viewport.1 as f32;
        self.orbit.drag(&self.camera, dx, dy, height);
    }

    /// Apply one drag step to the active target, if any.
    pub fn scale_target(&mut self, dy: f32) -> Option<ScaleStep> {
        if !self.scaling {
            return None;
        }
        let index = self.target?;
        debug_assert_eq!(index + 1, self.objects.len());
        let cfg = self.config;
        let obj = self.objects.get_mut(index)?;
        let step = scale_step(obj.scale, obj.last_sign, dy, &cfg);
        if step.flipped {
            obj.is_green = !obj.is_green;
            obj.material.color = if obj.is_green {
                cfg.secondary
            } else {
                cfg.primary
            };
            obj.last_sign = step.sign;
            log::debug!("[scale] knot {} flipped, green={}", index, obj.is_green);
        }
        obj.scale = step.scale;
        obj.needs_update = true;
        Some(step)
    }

    /// Pointer release: end whatever gesture was running.
    pub fn pointer_up(&mut self) {
        self.orbit.enabled = true;
        self.orbit.end();
        self.target = None;
        self.scaling = false;
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.orbit.dolly(delta_y);
    }

    /// Flip flicker mode; returns the new state. Turning it off restores full
    /// opacity on every knot.
    pub fn toggle_flicker(&mut self) -> bool {
        self.flicker = !self.flicker;
        if !self.flicker {
            for obj in &mut self.objects {
                obj.material.opacity = 1.0;
                obj.material.transparent = true;
                obj.needs_update = true;
            }
        }
        log::info!("[keys] flicker={}", self.flicker);
        self.flicker
    }

    /// Flip wireframe mode on every knot and log the scene statistics.
    pub fn toggle_wireframe(&mut self) -> SceneStats {
        self.wireframe = !self.wireframe;
        for obj in &mut self.objects {
            obj.material.wireframe = self.wireframe;
            obj.needs_update = true;
        }
        log::info!("[keys] wireframe={}", self.wireframe);
        let stats = self.stats();
        log::info!("{}", stats);
        self.last_stats = Some(stats);
        stats
    }

    /// Statistics from the most recent wireframe toggle.
    pub fn last_stats(&self) -> Option<SceneStats> {
        self.last_stats
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats::accumulate(self.objects.iter().map(|o| o.geometry.as_ref()))
    }

    /// Per-frame update: flicker opacities, then orbit controls. Returns true
    /// when the camera moved.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.flicker && !self.objects.is_empty() {
            for obj in &mut self.objects {
                obj.material.opacity = rng.gen::<f32>();
                obj.material.transparent = true;
                obj.needs_update = true;
            }
        }
        self.orbit.update(&mut self.camera)
    }
}
