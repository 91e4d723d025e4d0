// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSG (Constructive Solid Geometry) Operations
//!
//! Mesh-level difference and union backed by csgrs, with bounding-box fast
//! paths for operands that cannot interact.

use crate::bounds::Aabb;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::triangulation::{polygon_normal, project_to_2d, triangulate_polygon};
use nalgebra::{Point3, Vector3};

/// Create a box mesh from AABB min/max bounds
/// Returns a mesh with 12 triangles (2 per face, 6 faces)
pub fn box_mesh(min: Point3<f64>, max: Point3<f64>) -> Mesh {
    let mut mesh = Mesh::with_capacity(24, 36);

    let v = [
        Point3::new(min.x, min.y, min.z), // 0: front-bottom-left
        Point3::new(max.x, min.y, min.z), // 1: front-bottom-right
        Point3::new(max.x, max.y, min.z), // 2: front-top-right
        Point3::new(min.x, max.y, min.z), // 3: front-top-left
        Point3::new(min.x, min.y, max.z), // 4: back-bottom-left
        Point3::new(max.x, min.y, max.z), // 5: back-bottom-right
        Point3::new(max.x, max.y, max.z), // 6: back-top-right
        Point3::new(min.x, max.y, max.z), // 7: back-top-left
    ];

    // Quads wound counter-clockwise seen from outside
    let faces: [([usize; 4], Vector3<f64>); 6] = [
        ([0, 3, 2, 1], -Vector3::z()),
        ([4, 5, 6, 7], Vector3::z()),
        ([0, 4, 7, 3], -Vector3::x()),
        ([1, 2, 6, 5], Vector3::x()),
        ([0, 1, 5, 4], -Vector3::y()),
        ([3, 7, 6, 2], Vector3::y()),
    ];

    for (quad, normal) in faces {
        let base = mesh.vertex_count() as u32;
        for i in quad {
            mesh.add_vertex(v[i], normal);
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    mesh
}

/// Boolean engine over triangle meshes
#[derive(Debug, Clone, Copy)]
pub struct BooleanEngine {
    /// Epsilon for bounding-box interaction tests
    pub epsilon: f64,
}

impl BooleanEngine {
    pub fn new() -> Self {
        Self { epsilon: 1e-7 }
    }

    /// `host - cutter`
    pub fn subtract_mesh(&self, host: &Mesh, cutter: &Mesh) -> Result<Mesh> {
        // Fast path: nothing to cut from, or nothing to cut with
        let (Some(host_bounds), Some(cutter_bounds)) = (host.bounds(), cutter.bounds()) else {
            return Ok(host.clone());
        };

        // Fast path: cutter cannot reach the host's interior
        if !host_bounds.interiors_overlap(&cutter_bounds, self.epsilon) {
            tracing::trace!("subtract skipped: cutter outside host bounds");
            return Ok(host.clone());
        }

        // Host swallowed whole: csgrs would hand it back untouched
        if cutter_bounds.contains(&host_bounds, self.epsilon)
            && self.encloses_region(cutter, &host_bounds)
        {
            return Err(Error::EmptyMesh(format!(
                "cutter {:?} swallows host {:?}",
                cutter_bounds, host_bounds
            )));
        }

        use csgrs::traits::CSG;
        let host_csg = Self::mesh_to_csgrs(host)?;
        let cutter_csg = Self::mesh_to_csgrs(cutter)?;
        let result = Self::csgrs_to_mesh(&host_csg.difference(&cutter_csg))?;
        if result.is_empty() {
            return Err(Error::EmptyMesh(format!(
                "cutter {:?} swallows host {:?}",
                cutter_bounds, host_bounds
            )));
        }
        Ok(result)
    }

    /// `host ∪ addition`
    pub fn union_mesh(&self, host: &Mesh, addition: &Mesh) -> Result<Mesh> {
        let Some(addition_bounds) = addition.bounds() else {
            return Ok(host.clone());
        };
        let Some(host_bounds) = host.bounds() else {
            return Ok(addition.clone());
        };

        // Fast path: interiors disjoint, so concatenation is the exact union
        if !host_bounds.interiors_overlap(&addition_bounds, self.epsilon) {
            tracing::trace!("union merged without CSG: disjoint bounds");
            let mut merged = host.clone();
            merged.merge(addition);
            return Ok(merged);
        }

        // Fast paths: host surface stays clear of the addition, which is then
        // either entirely inside the host or entirely outside it
        if !self.surface_enters(host, &addition_bounds) {
            if Self::encloses(host, &addition_bounds.center()) {
                tracing::trace!("union skipped: addition inside host");
                return Ok(host.clone());
            }
            tracing::trace!("union merged without CSG: disjoint interiors");
            let mut merged = host.clone();
            merged.merge(addition);
            return Ok(merged);
        }
        if self.encloses_region(addition, &host_bounds) {
            tracing::trace!("union replaced: host inside addition");
            return Ok(addition.clone());
        }

        use csgrs::traits::CSG;
        let host_csg = Self::mesh_to_csgrs(host)?;
        let addition_csg = Self::mesh_to_csgrs(addition)?;
        Self::csgrs_to_mesh(&host_csg.union(&addition_csg))
    }

    /// True when some triangle of `mesh` reaches into the interior of `region`.
    fn surface_enters(&self, mesh: &Mesh, region: &Aabb) -> bool {
        mesh.triangles().any(|[i0, i1, i2]| {
            let tri = Aabb::from_points([mesh.vertex(i0), mesh.vertex(i1), mesh.vertex(i2)]);
            tri.is_some_and(|t| t.reaches_into(region, self.epsilon))
        })
    }

    /// True when `region` lies inside the closed mesh.
    fn encloses_region(&self, mesh: &Mesh, region: &Aabb) -> bool {
        !self.surface_enters(mesh, region) && Self::encloses(mesh, &region.center())
    }

    /// Ray-parity point containment
    fn encloses(mesh: &Mesh, point: &Point3<f64>) -> bool {
        // Skewed direction so the ray does not graze box edges
        let dir = Vector3::new(1.0, 0.001_414_2, 0.001_732_1).normalize();
        let mut crossings = 0usize;
        for [i0, i1, i2] in mesh.triangles() {
            let (a, b, c) = (mesh.vertex(i0), mesh.vertex(i1), mesh.vertex(i2));
            let e1 = b - a;
            let e2 = c - a;
            let p = dir.cross(&e2);
            let det = e1.dot(&p);
            if det.abs() < 1e-12 {
                continue;
            }
            let inv = 1.0 / det;
            let s = point - a;
            let u = s.dot(&p) * inv;
            if !(0.0..=1.0).contains(&u) {
                continue;
            }
            let q = s.cross(&e1);
            let v = dir.dot(&q) * inv;
            if v < 0.0 || u + v > 1.0 {
                continue;
            }
            if e2.dot(&q) * inv > 0.0 {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Convert our Mesh format to csgrs Mesh format
    fn mesh_to_csgrs(mesh: &Mesh) -> Result<csgrs::mesh::Mesh<()>> {
        use csgrs::mesh::{polygon::Polygon, vertex::Vertex, Mesh as CSGMesh};

        let mut polygons = Vec::with_capacity(mesh.triangle_count());

        for [i0, i1, i2] in mesh.triangles() {
            let (v0, v1, v2) = (mesh.vertex(i0), mesh.vertex(i1), mesh.vertex(i2));

            // Skip degenerate (zero-area/collinear) triangles to avoid NaN propagation
            let face_normal = match (v1 - v0).cross(&(v2 - v0)).try_normalize(1e-10) {
                Some(n) => n,
                None => continue,
            };

            let vertices = vec![
                Vertex::new(v0, face_normal),
                Vertex::new(v1, face_normal),
                Vertex::new(v2, face_normal),
            ];
            polygons.push(Polygon::new(vertices, None));
        }

        Ok(CSGMesh::from_polygons(&polygons, None))
    }

    /// Convert csgrs Mesh format back to our Mesh format
    fn csgrs_to_mesh(csg_mesh: &csgrs::mesh::Mesh<()>) -> Result<Mesh> {
        let mut mesh = Mesh::new();

        for polygon in &csg_mesh.polygons {
            let vertices = &polygon.vertices;
            if vertices.len() < 3 {
                continue;
            }

            let points_3d: Vec<Point3<f64>> = vertices
                .iter()
                .map(|v| Point3::new(v.pos[0], v.pos[1], v.pos[2]))
                .collect();

            // Prefer the polygon's own normal; fall back to the point loop
            let raw_normal = Vector3::new(
                vertices[0].normal[0],
                vertices[0].normal[1],
                vertices[0].normal[2],
            );
            let normal = match raw_normal.try_normalize(1e-10) {
                Some(n) if n.iter().all(|c| c.is_finite()) => n,
                _ => match polygon_normal(&points_3d) {
                    Some(n) => n,
                    None => continue,
                },
            };

            let indices = if points_3d.len() == 3 {
                vec![0, 1, 2]
            } else {
                let (points_2d, _, _) = project_to_2d(&points_3d, &normal);
                match triangulate_polygon(&points_2d) {
                    Ok(idx) => idx,
                    Err(_) => continue,
                }
            };

            let base_idx = mesh.vertex_count() as u32;
            for p in &points_3d {
                mesh.add_vertex(*p, normal);
            }
            for tri in indices.chunks_exact(3) {
                mesh.add_triangle(
                    base_idx + tri[0] as u32,
                    base_idx + tri[1] as u32,
                    base_idx + tri[2] as u32,
                );
            }
        }

        Ok(mesh)
    }
}

impl Default for BooleanEngine {
    fn default() -> Self {
        Self::new()
    }
}
