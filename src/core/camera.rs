//! Camera and picking math shared with the web frontend.
//!
//! These types avoid platform APIs so the picking path can be exercised on the
//! host. The frontend feeds them canvas sizes and client coordinates.

use crate::core::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed perspective camera looking at `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Clip-space projection (depth in 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through an NDC point.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (far - self.eye).normalize_or_zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Map client pixel coordinates to normalized device coordinates.
///
/// X grows right and Y grows up in the result; a zero-sized viewport maps
/// everything to the center.
#[inline]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Invisible, single-sided square used only as a ray target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickingPlane {
    pub center: Vec3,
    pub normal: Vec3,
    pub half_extent: f32,
}

impl Default for PickingPlane {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            normal: Vec3::Z,
            half_extent: PICK_PLANE_SIZE * 0.5,
        }
    }
}

impl PickingPlane {
    /// Intersection point of `ray` with the front face, if any.
    ///
    /// Rays that are parallel, start past the plane, approach from the back or
    /// land outside the square miss.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.dir.dot(self.normal);
        if denom > -1e-6 {
            return None;
        }
        let t = (self.center - ray.origin).dot(self.normal) / denom;
        if t < 0.0 {
            return None;
        }
        let hit = ray.at(t);
        let local = hit - self.center;
        // In-plane axes for the square bounds
        let u_axis = self.normal.any_orthonormal_vector();
        let v_axis = self.normal.cross(u_axis);
        if local.dot(u_axis).abs() > self.half_extent || local.dot(v_axis).abs() > self.half_extent
        {
            return None;
        }
        Some(hit)
    }
}
