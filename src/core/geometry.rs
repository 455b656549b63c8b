//! Triangle mesh data for spawned objects.
//!
//! Geometry is built once on the CPU and shared between every knot through an
//! `Rc`. The web renderer uploads the same buffers once; the statistics pass
//! reads counts straight from here.

use crate::core::constants::*;
use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertex buffer plus an optional triangle index buffer.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Option<Vec<u32>>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> Option<usize> {
        self.indices.as_ref().map(Vec::len)
    }

    /// Line-list indices covering every distinct triangle edge once.
    ///
    /// Used for wireframe drawing; non-indexed geometry is treated as
    /// consecutive vertex triples.
    pub fn edge_line_indices(&self) -> Vec<u32> {
        let tris: Vec<u32> = match &self.indices {
            Some(idx) => idx.clone(),
            None => (0..self.vertices.len() as u32).collect(),
        };
        let mut seen = FnvHashSet::default();
        let mut lines = Vec::with_capacity(tris.len());
        for tri in tris.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.push(key.0);
                    lines.push(key.1);
                }
            }
        }
        lines
    }
}

/// Count distinct undirected edges referenced by a triangle index buffer.
pub fn count_unique_edges(indices: &[u32]) -> usize {
    let mut seen = FnvHashSet::default();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            seen.insert(if a < b { (a, b) } else { (b, a) });
        }
    }
    seen.len()
}

/// Build parameters for a (p, q) torus knot tube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusKnotParams {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            radius: KNOT_RADIUS,
            tube: KNOT_TUBE,
            tubular_segments: KNOT_TUBULAR_SEGMENTS,
            radial_segments: KNOT_RADIAL_SEGMENTS,
            p: KNOT_P,
            q: KNOT_Q,
        }
    }
}

#[inline]
fn knot_curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

/// Generate an indexed torus-knot tube.
///
/// The grid has `(tubular + 1) * (radial + 1)` vertices: the first ring and
/// column are duplicated at the seams so each ring closes on itself.
pub fn torus_knot(params: &TorusKnotParams) -> Geometry {
    let tubular = params.tubular_segments.max(3);
    let radial = params.radial_segments.max(3);
    let p = params.p as f32;
    let q = params.q as f32;

    let mut vertices = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = knot_curve_point(u, p, q, params.radius);
        let p2 = knot_curve_point(u + 0.01, p, q, params.radius);

        // Frenet-like frame along the curve
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n);
        let n = b.cross(t).normalize();
        let b = b.normalize();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -params.tube * v.cos();
            let cy = params.tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            let normal = (pos - p1).normalize_or_zero();
            vertices.push(MeshVertex {
                position: pos.to_array(),
                normal: normal.to_array(),
            });
        }
    }

    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    let stride = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry {
        vertices,
        indices: Some(indices),
    }
}
