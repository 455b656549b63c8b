//! Rough vertex/face/edge totals for the spawned scene.
//!
//! Edges use the closed-manifold relation E = 3F/2, which only holds when every
//! edge is shared by exactly two triangles. Meshes with seams or boundaries are
//! undercounted; see `geometry::count_unique_edges` for the exact figure.

use crate::core::geometry::Geometry;
use std::fmt;

/// Anything that can report the size of its vertex and index buffers.
pub trait MeshCounts {
    fn vertex_count(&self) -> usize;
    fn index_count(&self) -> Option<usize>;
}

impl MeshCounts for Geometry {
    fn vertex_count(&self) -> usize {
        Geometry::vertex_count(self)
    }
    fn index_count(&self) -> Option<usize> {
        Geometry::index_count(self)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub vertices: usize,
    pub faces: usize,
    pub edges: usize,
}

impl SceneStats {
    /// Per-mesh estimate. Meshes without vertices contribute nothing.
    pub fn of_mesh<M: MeshCounts + ?Sized>(mesh: &M) -> Self {
        let vertices = mesh.vertex_count();
        if vertices == 0 {
            return Self::default();
        }
        let faces = match mesh.index_count() {
            Some(n) => n / 3,
            None => vertices / 3,
        };
        Self {
            vertices,
            faces,
            edges: estimate_edges(faces),
        }
    }

    pub fn accumulate<'a, M, I>(meshes: I) -> Self
    where
        M: MeshCounts + ?Sized + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        meshes
            .into_iter()
            .map(Self::of_mesh)
            .fold(Self::default(), |acc, s| Self {
                vertices: acc.vertices + s.vertices,
                faces: acc.faces + s.faces,
                edges: acc.edges + s.edges,
            })
    }
}

/// round(3F / 2), halves rounding up.
#[inline]
pub fn estimate_edges(faces: usize) -> usize {
    (3 * faces + 1) / 2
}

impl fmt::Display for SceneStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene ~ V:{}  F:{}  E≈{}",
            self.vertices, self.faces, self.edges
        )
    }
}
