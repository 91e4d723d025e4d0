// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{build_frame, EDGE_EPSILON};
use crate::error::{Error, Result};
use crate::spec::ShutterSpec;
use std::f64::consts::PI;
use storey_geometry::{add_all, Placement, Solid, Vector3};

/// Slats needed to tile `inner_height` at a pitch of `slat_height`
pub fn slat_count(inner_height: f64, slat_height: f64) -> usize {
    if inner_height <= 0.0 || slat_height <= 0.0 {
        return 0;
    }
    (inner_height / slat_height - EDGE_EPSILON).ceil().max(0.0) as usize
}

/// One shutter panel: a frame with slats unioned into its opening.
///
/// Centered on its local origin, `thickness` deep.
pub fn build_shutter_panel(
    width: f64,
    height: f64,
    spec: &ShutterSpec,
    margin: f64,
) -> Result<Solid> {
    if !(spec.slat_height > 0.0 && spec.slat_gap >= 0.0 && spec.slat_gap < spec.slat_height) {
        return Err(Error::degenerate(format!(
            "slat height {} with gap {}",
            spec.slat_height, spec.slat_gap
        )));
    }

    let frame = build_frame(
        width,
        height,
        spec.thickness,
        &spec.frame,
        margin,
        spec.material.clone(),
    )?;

    let inner_width = width - spec.frame.horizontal();
    let inner_height = height - spec.frame.vertical();
    let (offset_x, offset_y) = spec.frame.inner_offset();
    let inner_bottom = offset_y - inner_height / 2.0;
    let inner_top = offset_y + inner_height / 2.0;

    let slat_depth = spec.thickness / 2.0;
    let mut slats = Vec::new();
    for i in 0..slat_count(inner_height, spec.slat_height) {
        let bottom = inner_bottom + i as f64 * spec.slat_height;
        let top = (bottom + spec.slat_height - spec.slat_gap).min(inner_top);
        if top - bottom <= EDGE_EPSILON {
            continue;
        }
        slats.push(Solid::cuboid_anchored(
            inner_width,
            top - bottom,
            slat_depth,
            Vector3::new(offset_x, (bottom + top) / 2.0, 0.0),
            spec.material.clone(),
        )?);
    }

    Ok(add_all(frame, slats)?)
}

/// All panels for one opening, placed in the opening's frame
/// (origin at the opening center, +Z outward).
///
/// Panels split the opening left to right. Even panels hinge on their left
/// edge, odd panels are mirrored and hinge on their right edge; both swing
/// outward by `open_angle`.
pub fn build_shutters(
    opening_width: f64,
    opening_height: f64,
    spec: &ShutterSpec,
    margin: f64,
) -> Result<Vec<Solid>> {
    if spec.panels == 0 {
        return Err(Error::degenerate("shutter needs at least one panel"));
    }

    let panel_width = opening_width / spec.panels as f64;
    let swing = spec.open_angle.to_radians();

    (0..spec.panels)
        .map(|k| {
            let panel = build_shutter_panel(panel_width, opening_height, spec, margin)?;
            let left = -opening_width / 2.0 + k as f64 * panel_width;
            let hinge = if k % 2 == 0 {
                Placement::at(left, 0.0, 0.0).with_yaw(-swing)
            } else {
                Placement::at(left + panel_width, 0.0, 0.0).with_yaw(PI + swing)
            };
            // Panel center sits half a panel along local +X from the hinge
            let placement = hinge.then(&Placement::at(panel_width / 2.0, 0.0, 0.0));
            Ok(panel.placed(placement))
        })
        .collect()
}
