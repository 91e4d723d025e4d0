// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::overshoot_flush;
use crate::error::{Error, Result};
use crate::spec::FrameBorders;
use storey_geometry::{MaterialHandle, Solid, Vector3};

/// Rectangular frame: an outer box minus the opening left by the four borders.
///
/// The frame is centered on its local origin. `margin` (> 1) scales the
/// inner cutter's depth past the frame's depth.
pub fn build_frame(
    width: f64,
    height: f64,
    depth: f64,
    borders: &FrameBorders,
    margin: f64,
    material: MaterialHandle,
) -> Result<Solid> {
    let FrameBorders {
        top,
        right,
        bottom,
        left,
    } = *borders;
    if [top, right, bottom, left]
        .iter()
        .any(|b| !b.is_finite() || *b < 0.0)
    {
        return Err(Error::degenerate(format!(
            "frame borders must be non-negative, got {:?}",
            borders
        )));
    }

    let inner_width = width - borders.horizontal();
    let inner_height = height - borders.vertical();
    if inner_width <= 0.0 || inner_height <= 0.0 {
        return Err(Error::degenerate(format!(
            "frame borders consume the {:.3} x {:.3} opening",
            width, height
        )));
    }

    let outer = Solid::cuboid(width, height, depth, material.clone())?;

    let overshoot = depth * (margin - 1.0);
    let (x0, x1) = overshoot_flush(
        -width / 2.0 + left,
        width / 2.0 - right,
        -width / 2.0,
        width / 2.0,
        overshoot,
    );
    let (y0, y1) = overshoot_flush(
        -height / 2.0 + bottom,
        height / 2.0 - top,
        -height / 2.0,
        height / 2.0,
        overshoot,
    );
    let center = Vector3::new((x0 + x1) / 2.0, (y0 + y1) / 2.0, 0.0);
    let inner = Solid::cuboid_anchored(x1 - x0, y1 - y0, depth * margin, center, material)?;

    Ok(outer.subtract(inner)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mat() -> MaterialHandle {
        MaterialHandle::new("frame")
    }

    #[test]
    fn test_uniform_frame_volume() {
        let frame = build_frame(2.0, 3.0, 0.25, &FrameBorders::uniform(0.1), 1.2, mat()).unwrap();
        let expected = (2.0 * 3.0 - 1.8 * 2.8) * 0.25;
        assert_abs_diff_eq!(frame.volume(), expected, epsilon = 1e-4);
        let b = frame.local_bounds().unwrap();
        assert_abs_diff_eq!(b.size().x, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.size().y, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_door_frame_has_no_sill() {
        let borders = FrameBorders::door(0.1);
        let frame = build_frame(2.0, 3.0, 0.25, &borders, 1.2, mat()).unwrap();
        // Two jambs plus the head
        let expected = (2.0 * 3.0 - 1.8 * 2.9) * 0.25;
        assert_abs_diff_eq!(frame.volume(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_asymmetric_borders() {
        let borders = FrameBorders {
            top: 0.3,
            right: 0.1,
            bottom: 0.2,
            left: 0.4,
        };
        let frame = build_frame(2.0, 2.0, 0.1, &borders, 1.2, mat()).unwrap();
        let expected = (4.0 - 1.5 * 1.5) * 0.1;
        assert_abs_diff_eq!(frame.volume(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_borders_consuming_opening_fail() {
        let err = build_frame(1.0, 1.0, 0.1, &FrameBorders::uniform(0.5), 1.2, mat()).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));

        let negative = FrameBorders {
            left: -0.1,
            ..FrameBorders::uniform(0.1)
        };
        let err = build_frame(1.0, 1.0, 0.1, &negative, 1.2, mat()).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
    }
}
