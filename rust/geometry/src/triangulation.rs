// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation for CSG output
//!
//! csgrs returns planar convex or concave polygons; they are flattened onto
//! their own plane and cut into triangles with earcutr.

use crate::{Error, Point2, Point3, Result, Vector3};

/// Check if a planar polygon is convex (all turns share one sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    let mut sign = 0.0f64;

    for i in 0..n {
        let (p0, p1, p2) = (&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);
        if cross.abs() <= 1e-10 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if sign != cross.signum() {
            return false;
        }
    }

    true
}

/// Triangulate a simple polygon (no holes).
/// Returns triangle indices into the input points; convex input keeps its winding.
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::TriangulationError(format!(
            "need at least 3 points, got {}",
            n
        )));
    }

    // Fan for triangles, quads and small convex polygons
    if n <= 4 || (n <= 16 && is_convex(points)) {
        return Ok((1..n - 1).flat_map(|i| [0, i, i + 1]).collect());
    }

    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    earcutr::earcut(&flat, &[], 2).map_err(|e| Error::TriangulationError(format!("{:?}", e)))
}

/// Project 3D points onto the plane with the given normal.
/// Returns 2D points and the (u, v) basis; `u × v == normal`.
pub fn project_to_2d(
    points_3d: &[Point3<f64>],
    normal: &Vector3<f64>,
) -> (Vec<Point2<f64>>, Vector3<f64>, Vector3<f64>) {
    let Some(origin) = points_3d.first().copied() else {
        return (Vec::new(), Vector3::zeros(), Vector3::zeros());
    };

    // Reference axis least parallel to the normal
    let reference = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let u_axis = normal.cross(&reference).normalize();
    let v_axis = normal.cross(&u_axis).normalize();

    let points_2d = points_3d
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u_axis), d.dot(&v_axis))
        })
        .collect();

    (points_2d, u_axis, v_axis)
}

/// Polygon normal by Newell's method, `None` when degenerate
pub fn polygon_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let mut normal = Vector3::<f64>::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal.try_normalize(1e-10)
}
