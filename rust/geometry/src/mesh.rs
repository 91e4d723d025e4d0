// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::bounds::Aabb;
use nalgebra::{Matrix4, Point3, Vector3};

/// Triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Merge another mesh into this one
    #[inline]
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `i` in f64
    #[inline]
    pub fn vertex(&self, i: usize) -> Point3<f64> {
        Point3::new(
            self.positions[i * 3] as f64,
            self.positions[i * 3 + 1] as f64,
            self.positions[i * 3 + 2] as f64,
        )
    }

    /// Normal of vertex `i` in f64
    #[inline]
    pub fn vertex_normal(&self, i: usize) -> Vector3<f64> {
        Vector3::new(
            self.normals[i * 3] as f64,
            self.normals[i * 3 + 1] as f64,
            self.normals[i * 3 + 2] as f64,
        )
    }

    /// Iterate triangles as vertex-index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Calculate bounds, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| self.vertex(i)))
    }

    /// Bounds of the mesh after applying `transform`
    pub fn bounds_with(&self, transform: &Matrix4<f64>) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| transform.transform_point(&self.vertex(i))))
    }

    /// Transform mesh in place by an affine matrix
    pub fn transform(&mut self, transform: &Matrix4<f64>) {
        self.positions.chunks_exact_mut(3).for_each(|chunk| {
            let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            let t = transform.transform_point(&point);
            chunk[0] = t.x as f32;
            chunk[1] = t.y as f32;
            chunk[2] = t.z as f32;
        });

        // Normals: rotation part only
        let rotation = transform.fixed_view::<3, 3>(0, 0);
        self.normals.chunks_exact_mut(3).for_each(|chunk| {
            let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            let t = (rotation * normal).try_normalize(1e-12).unwrap_or(normal);
            chunk[0] = t.x as f32;
            chunk[1] = t.y as f32;
            chunk[2] = t.z as f32;
        });
    }

    /// Transformed copy
    pub fn transformed(&self, transform: &Matrix4<f64>) -> Mesh {
        let mut out = self.clone();
        out.transform(transform);
        out
    }

    /// Enclosed volume via the divergence theorem.
    ///
    /// Triangle orientation is taken from the stored vertex normals, so
    /// polygons re-triangulated with either winding still count with the
    /// correct sign. Only meaningful for closed meshes.
    pub fn volume(&self) -> f64 {
        let mut total = 0.0;
        for [i0, i1, i2] in self.triangles() {
            let (p0, p1, p2) = (self.vertex(i0), self.vertex(i1), self.vertex(i2));
            let cross = (p1 - p0).cross(&(p2 - p0));
            let facing = self.vertex_normal(i0) + self.vertex_normal(i1) + self.vertex_normal(i2);
            let signed = p0.coords.dot(&p1.coords.cross(&p2.coords)) / 6.0;
            total += if cross.dot(&facing) < 0.0 { -signed } else { signed };
        }
        total
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
