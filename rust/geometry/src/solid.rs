// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box-based solids and the consuming boolean operations on them

use crate::bounds::Aabb;
use crate::csg::{box_mesh, BooleanEngine};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::transform::Placement;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque appearance reference shared by many solids.
///
/// The core never looks inside; the display layer resolves the name to a
/// concrete material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialHandle(Arc<str>);

impl MaterialHandle {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// An owned solid: a mesh in its own local frame, the nominal box size it
/// was created from, a material and a placement in its parent frame.
///
/// Boolean operations take both operands by value; a solid handed to
/// [`Solid::subtract`] or [`Solid::add`] is consumed. Solids are not
/// `Clone`: a copy has to be rebuilt from scratch.
#[derive(Debug)]
pub struct Solid {
    mesh: Mesh,
    size: Vector3<f64>,
    material: MaterialHandle,
    placement: Placement,
}

impl Solid {
    /// Axis-aligned box centered on its local origin
    pub fn cuboid(width: f64, height: f64, depth: f64, material: MaterialHandle) -> Result<Self> {
        Self::cuboid_anchored(width, height, depth, Vector3::zeros(), material)
    }

    /// Box whose center sits at `center` in its local frame.
    ///
    /// Walls use this to rest on their floor line (`center.y == height / 2`)
    /// while keeping the local origin on the floor.
    pub fn cuboid_anchored(
        width: f64,
        height: f64,
        depth: f64,
        center: Vector3<f64>,
        material: MaterialHandle,
    ) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height) && valid(depth)) {
            return Err(Error::degenerate_extent("box", width, height, depth));
        }

        let size = Vector3::new(width, height, depth);
        let bounds = Aabb::from_center_size(Point3::from(center), size);
        Ok(Self {
            mesh: box_mesh(bounds.min, bounds.max),
            size,
            material,
            placement: Placement::identity(),
        })
    }

    /// Builder-style placement setter
    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn material(&self) -> &MaterialHandle {
        &self.material
    }

    /// Nominal box size (width, height, depth) the solid was created with
    pub fn size(&self) -> Vector3<f64> {
        self.size
    }

    /// Mesh in the solid's local frame
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Bounds in the local frame
    pub fn local_bounds(&self) -> Option<Aabb> {
        self.mesh.bounds()
    }

    /// Bounds in the parent frame
    pub fn bounds(&self) -> Option<Aabb> {
        self.mesh.bounds_with(&self.placement.to_matrix())
    }

    /// Bounds after applying `parent` on top of the solid's own placement
    pub fn bounds_in(&self, parent: &Matrix4<f64>) -> Option<Aabb> {
        self.mesh.bounds_with(&(parent * self.placement.to_matrix()))
    }

    pub fn volume(&self) -> f64 {
        self.mesh.volume()
    }

    /// `self - cutter`. Both operands are consumed; the result keeps
    /// `self`'s placement and material.
    pub fn subtract(self, cutter: Solid) -> Result<Solid> {
        self.combine(cutter, |engine, host, other| engine.subtract_mesh(host, other))
    }

    /// `self ∪ addition`. Both operands are consumed; the result keeps
    /// `self`'s placement and material.
    pub fn add(self, addition: Solid) -> Result<Solid> {
        self.combine(addition, |engine, host, other| engine.union_mesh(host, other))
    }

    fn combine<F>(self, other: Solid, op: F) -> Result<Solid>
    where
        F: FnOnce(&BooleanEngine, &Mesh, &Mesh) -> Result<Mesh>,
    {
        // Express the other operand in this solid's local frame
        let to_local = self.placement.inverse_matrix() * other.placement.to_matrix();
        let other_local = other.mesh.transformed(&to_local);

        let mesh = op(&BooleanEngine::new(), &self.mesh, &other_local)?;
        Ok(Solid {
            mesh,
            size: self.size,
            material: self.material,
            placement: self.placement,
        })
    }
}

/// Left-to-right subtraction of every cutter; later cutters see earlier cuts,
/// so overlapping cutters merge into one opening.
pub fn subtract_all<I>(base: Solid, cutters: I) -> Result<Solid>
where
    I: IntoIterator<Item = Solid>,
{
    cutters.into_iter().try_fold(base, Solid::subtract)
}

/// Left-to-right union of every addition onto `base`
pub fn add_all<I>(base: Solid, additions: I) -> Result<Solid>
where
    I: IntoIterator<Item = Solid>,
{
    additions.into_iter().try_fold(base, Solid::add)
}
