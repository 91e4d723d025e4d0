// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Error, Result};
use crate::spec::RailingSpec;
use storey_geometry::{add_all, Solid, Vector3};

/// Baluster count and actual spacing for a railing of `width`.
///
/// `count * spacing == width`: the bays tile the whole edge.
pub fn baluster_layout(width: f64, nominal_spacing: f64) -> (usize, f64) {
    let count = ((width / nominal_spacing).round() as usize).max(1);
    (count, width / count as f64)
}

/// X of each baluster, one centered in each bay
pub fn baluster_centers(width: f64, nominal_spacing: f64) -> Vec<f64> {
    let (count, spacing) = baluster_layout(width, nominal_spacing);
    (0..count)
        .map(|i| -width / 2.0 + (i as f64 + 0.5) * spacing)
        .collect()
}

/// Top rail plus balusters as one solid.
///
/// Local frame: origin at the bottom center, rail along X, balusters
/// standing on y = 0 up to the underside of the rail.
pub fn build_railing(width: f64, spec: &RailingSpec) -> Result<Solid> {
    if !(width.is_finite() && width > 0.0) {
        return Err(Error::degenerate(format!("railing width {}", width)));
    }
    if !(spec.spacing.is_finite() && spec.spacing > 0.0) {
        return Err(Error::degenerate(format!("railing spacing {}", spec.spacing)));
    }
    let post_height = spec.height - spec.rail_thickness;
    if !(post_height > 0.0) {
        return Err(Error::degenerate(format!(
            "railing height {} does not clear rail thickness {}",
            spec.height, spec.rail_thickness
        )));
    }

    let rail = Solid::cuboid_anchored(
        width,
        spec.rail_thickness,
        spec.rail_thickness,
        Vector3::new(0.0, spec.height - spec.rail_thickness / 2.0, 0.0),
        spec.material.clone(),
    )?;

    let balusters = baluster_centers(width, spec.spacing)
        .into_iter()
        .map(|x| {
            Solid::cuboid_anchored(
                spec.baluster_thickness,
                post_height,
                spec.baluster_thickness,
                Vector3::new(x, post_height / 2.0, 0.0),
                spec.material.clone(),
            )
        })
        .collect::<storey_geometry::Result<Vec<_>>>()?;

    Ok(add_all(rail, balusters)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use storey_geometry::MaterialHandle;

    fn spec() -> RailingSpec {
        RailingSpec {
            height: 1.0,
            spacing: 0.25,
            rail_thickness: 0.08,
            baluster_thickness: 0.04,
            material: MaterialHandle::new("railing"),
        }
    }

    #[test]
    fn test_layout_tiles_width_exactly() {
        let (count, spacing) = baluster_layout(3.0, 0.1);
        assert_eq!(count, 30);
        assert_abs_diff_eq!(count as f64 * spacing, 3.0, epsilon = 1e-12);

        let (count, spacing) = baluster_layout(3.0, 0.7);
        assert_eq!(count, 4);
        assert_abs_diff_eq!(spacing, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_narrow_edge_keeps_one_baluster() {
        assert_eq!(baluster_layout(0.05, 0.25).0, 1);
        assert_eq!(baluster_centers(0.05, 0.25), vec![0.0]);
    }

    #[test]
    fn test_centers_sit_in_bays() {
        let centers = baluster_centers(2.0, 0.5);
        assert_eq!(centers.len(), 4);
        assert_abs_diff_eq!(centers[0], -0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(centers[3], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_railing_solid() {
        let railing = build_railing(2.0, &spec()).unwrap();
        let b = railing.local_bounds().unwrap();
        assert_abs_diff_eq!(b.min.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.max.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.size().x, 2.0, epsilon = 1e-6);

        let rail = 2.0 * 0.08 * 0.08;
        let posts = 8.0 * 0.04 * 0.92 * 0.04;
        assert_abs_diff_eq!(railing.volume(), rail + posts, epsilon = 1e-5);
    }

    #[test]
    fn test_railing_too_short_fails() {
        let short = spec().with_height(0.05);
        assert!(matches!(
            build_railing(2.0, &short),
            Err(Error::DegenerateGeometry(_))
        ));
    }
}
