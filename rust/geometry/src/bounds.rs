// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in f64 precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners (order does not matter)
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box of the given size centered on `center`
    pub fn from_center_size(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing all points, `None` for an empty iterator
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.include(&p);
        }
        Some(aabb)
    }

    /// Grow the box to contain `p`
    #[inline]
    pub fn include(&mut self, p: &Point3<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Union of two boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Volume shared by both boxes (0 when they only touch or are apart)
    pub fn overlap_volume(&self, other: &Aabb) -> f64 {
        let dx = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let dy = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        let dz = self.max.z.min(other.max.z) - self.min.z.max(other.min.z);
        if dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
            0.0
        } else {
            dx * dy * dz
        }
    }

    /// True when the interiors intersect by more than `epsilon` on every axis
    pub fn interiors_overlap(&self, other: &Aabb, epsilon: f64) -> bool {
        self.max.x.min(other.max.x) - self.min.x.max(other.min.x) > epsilon
            && self.max.y.min(other.max.y) - self.min.y.max(other.min.y) > epsilon
            && self.max.z.min(other.max.z) - self.min.z.max(other.min.z) > epsilon
    }

    /// True when this box reaches into the open interior of `region`.
    /// Unlike [`Aabb::interiors_overlap`] this also holds for flat boxes.
    pub fn reaches_into(&self, region: &Aabb, epsilon: f64) -> bool {
        self.max.x > region.min.x + epsilon
            && self.min.x < region.max.x - epsilon
            && self.max.y > region.min.y + epsilon
            && self.min.y < region.max.y - epsilon
            && self.max.z > region.min.z + epsilon
            && self.min.z < region.max.z - epsilon
    }

    /// True when `other` lies inside this box, allowing `epsilon` slack
    pub fn contains(&self, other: &Aabb, epsilon: f64) -> bool {
        other.min.x >= self.min.x - epsilon
            && other.min.y >= self.min.y - epsilon
            && other.min.z >= self.min.z - epsilon
            && other.max.x <= self.max.x + epsilon
            && other.max.y <= self.max.y + epsilon
            && other.max.z <= self.max.z + epsilon
    }

    /// The eight corners, min corner first
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, b.z),
            Point3::new(a.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after an affine transform
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Aabb {
        let corners = self.corners();
        let mut out = Aabb {
            min: matrix.transform_point(&corners[0]),
            max: matrix.transform_point(&corners[0]),
        };
        for c in &corners[1..] {
            out.include(&matrix.transform_point(c));
        }
        out
    }

    /// Component-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Aabb, epsilon: f64) -> bool {
        (self.min - other.min).amax() <= epsilon && (self.max - other.max).amax() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_volume() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
        assert!((a.overlap_volume(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        assert_eq!(a.overlap_volume(&b), 0.0);
        assert!(!a.interiors_overlap(&b, 1e-9));
    }

    #[test]
    fn test_flat_box_reaches_into_region() {
        let region = Aabb::new(Point3::new(0.0, 0.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let face = Aabb::new(Point3::new(-1.0, -1.0, 0.5), Point3::new(2.0, 2.0, 0.5));
        assert!(face.reaches_into(&region, 1e-9));
        assert!(!face.interiors_overlap(&region, 1e-9));

        let boundary = Aabb::new(Point3::new(0.0, 1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(!boundary.reaches_into(&region, 1e-9));
    }

    #[test]
    fn test_transformed_quarter_turn() {
        let a = Aabb::from_center_size(Point3::origin(), Vector3::new(4.0, 1.0, 2.0));
        let rot = nalgebra::Rotation3::from_axis_angle(
            &Vector3::y_axis(),
            std::f64::consts::FRAC_PI_2,
        )
        .to_homogeneous();
        let t = a.transformed(&rot);
        assert!((t.size().x - 2.0).abs() < 1e-9);
        assert!((t.size().z - 4.0).abs() < 1e-9);
    }
}
