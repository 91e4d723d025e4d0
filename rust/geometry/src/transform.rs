// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement of solids and groups
//!
//! Every solid and group stores its offset from the parent as a `Placement`
//! (translation plus yaw about the +Y up axis). Parent-to-child transforms
//! are composed explicitly when a tree is flattened or measured.

use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Translation plus rotation about the vertical axis.
///
/// With yaw `θ`, local +X maps to `(cos θ, 0, -sin θ)` and local +Z maps to
/// `(sin θ, 0, cos θ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point3<f64>,
    /// Radians
    pub yaw: f64,
}

impl Placement {
    pub fn identity() -> Self {
        Self::new(Point3::origin(), 0.0)
    }

    pub fn new(position: Point3<f64>, yaw: f64) -> Self {
        Self { position, yaw }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z), 0.0)
    }

    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_yaw_degrees(self, degrees: f64) -> Self {
        self.with_yaw(degrees.to_radians())
    }

    /// Same placement moved by `offset` (in the parent frame)
    pub fn translated(mut self, offset: Vector3<f64>) -> Self {
        self.position += offset;
        self
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw)
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation())
    }

    /// Local-to-parent homogeneous matrix
    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.isometry().to_homogeneous()
    }

    /// Parent-to-local homogeneous matrix
    pub fn inverse_matrix(&self) -> Matrix4<f64> {
        self.isometry().inverse().to_homogeneous()
    }

    /// Placement of a child (given relative to `self`) expressed in `self`'s parent frame
    pub fn then(&self, child: &Placement) -> Placement {
        let position = self.isometry().transform_point(&child.position);
        Placement::new(position, self.yaw + child.yaw)
    }

    /// Rotate a local direction into the parent frame
    pub fn rotate_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * v
    }

    /// Local +Z expressed in the parent frame (a wall's outward normal)
    pub fn outward(&self) -> Vector3<f64> {
        self.rotate_vector(&Vector3::z())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}
