// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey Geometry
//!
//! Box solids, placements and CSG boolean operations used by the building
//! generator. Booleans run through csgrs; CSG output polygons are
//! re-triangulated with earcutr and transforms use nalgebra.

pub mod bounds;
pub mod csg;
pub mod error;
pub mod mesh;
pub mod solid;
pub mod transform;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use bounds::Aabb;
pub use csg::{box_mesh, BooleanEngine};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use solid::{add_all, subtract_all, MaterialHandle, Solid};
pub use transform::Placement;
pub use triangulation::triangulate_polygon;
