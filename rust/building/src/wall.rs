// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall builder: base box, hole cutting and attached decorations.
//!
//! Wall frame: x along the wall (center at 0), y up from the floor line,
//! +Z out of the building. The outer face is at `z = depth / 2`.

use crate::config::BuildConfig;
use crate::decorators::{
    build_frame, build_railing, build_shutters, build_stair, overshoot_flush, EDGE_EPSILON,
};
use crate::error::{Error, Result};
use crate::spec::{BalconySpec, Footprint, HoleSpec, WallSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use storey_geometry::{Aabb, Matrix4, Placement, Solid, Vector3};

/// What a decoration solid is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    Frame,
    Shutter,
    Balcony,
    Railing,
    Stair,
}

impl DecorationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecorationKind::Frame => "frame",
            DecorationKind::Shutter => "shutter",
            DecorationKind::Balcony => "balcony",
            DecorationKind::Railing => "railing",
            DecorationKind::Stair => "stair",
        }
    }
}

impl fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A solid attached to a wall; its placement is in the wall frame.
#[derive(Debug)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub solid: Solid,
}

/// A built wall: the cut wall solid plus the decorations it owns.
#[derive(Debug)]
pub struct WallAssembly {
    wall: Solid,
    decorations: Vec<Decoration>,
    holes: usize,
    placement: Placement,
}

impl WallAssembly {
    /// The wall solid after all holes were cut
    pub fn wall(&self) -> &Solid {
        &self.wall
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn count(&self, kind: DecorationKind) -> usize {
        self.decorations.iter().filter(|d| d.kind == kind).count()
    }

    /// Doors plus windows cut into the wall
    pub fn hole_count(&self) -> usize {
        self.holes
    }

    /// Wall plus decorations
    pub fn solid_count(&self) -> usize {
        1 + self.decorations.len()
    }

    /// Placement taken from the `WallSpec`; floors override it
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Bounds of the wall and every decoration in the frame given by `parent`
    pub fn bounds_in(&self, parent: &Matrix4<f64>) -> Option<Aabb> {
        std::iter::once(&self.wall)
            .chain(self.decorations.iter().map(|d| &d.solid))
            .filter_map(|solid| solid.bounds_in(parent))
            .reduce(|a, b| a.union(&b))
    }

    /// Bounds in the wall's own frame
    pub fn local_bounds(&self) -> Option<Aabb> {
        self.bounds_in(&Matrix4::identity())
    }

    fn attach(&mut self, kind: DecorationKind, solid: Solid) {
        self.decorations.push(Decoration { kind, solid });
    }
}

struct Opening<'a> {
    hole: &'a HoleSpec,
    footprint: Footprint,
}

/// Build one wall from its `WallSpec`.
///
/// Doors are cut before windows, each cutter from the running result, so
/// overlapping openings merge into one.
pub fn build_wall(spec: &WallSpec, config: &BuildConfig) -> Result<WallAssembly> {
    let (w, h, d) = (spec.width, spec.height, spec.depth);
    let mut wall = Solid::cuboid_anchored(
        w,
        h,
        d,
        Vector3::new(0.0, h / 2.0, 0.0),
        spec.material.clone(),
    )?;

    let openings = spec
        .doors
        .iter()
        .enumerate()
        .map(|(i, door)| (format!("door {}", i), &door.hole))
        .chain(
            spec.windows
                .iter()
                .enumerate()
                .map(|(i, window)| (format!("window {}", i), window)),
        )
        .map(|(label, hole)| opening(label, hole, w, h))
        .collect::<Result<Vec<_>>>()?;

    let margin = config.hole_depth_margin;
    let overshoot = d * (margin - 1.0);
    for o in &openings {
        let fp = &o.footprint;
        let (x0, x1) = overshoot_flush(fp.left, fp.right, -w / 2.0, w / 2.0, overshoot);
        let (y0, y1) = overshoot_flush(fp.bottom, fp.top, 0.0, h, overshoot);
        let cutter = Solid::cuboid_anchored(
            x1 - x0,
            y1 - y0,
            d * margin,
            Vector3::new((x0 + x1) / 2.0, (y0 + y1) / 2.0, 0.0),
            spec.material.clone(),
        )?;
        wall = wall.subtract(cutter)?;
    }

    let mut assembly = WallAssembly {
        wall,
        decorations: Vec::new(),
        holes: openings.len(),
        placement: spec.placement,
    };

    for o in &openings {
        let material = o
            .hole
            .frame_material
            .clone()
            .unwrap_or_else(|| spec.material.clone());
        let frame = build_frame(
            o.footprint.width(),
            o.footprint.height(),
            d,
            &o.hole.frame,
            margin,
            material,
        )?
        .placed(Placement::at(o.footprint.center_x(), o.footprint.center_y(), 0.0));
        assembly.attach(DecorationKind::Frame, frame);
    }

    // Door openings come first in `openings`
    for (door, o) in spec.doors.iter().zip(&openings) {
        if let Some(shutter) = &door.shutter {
            let borders = &o.hole.frame;
            let (dx, dy) = borders.inner_offset();
            let mount = Placement::at(
                o.footprint.center_x() + dx,
                o.footprint.center_y() + dy,
                d / 2.0 + shutter.thickness / 2.0,
            );
            let panels = build_shutters(
                o.footprint.width() - borders.horizontal(),
                o.footprint.height() - borders.vertical(),
                shutter,
                margin,
            )?;
            for panel in panels {
                let placement = mount.then(panel.placement());
                assembly.attach(DecorationKind::Shutter, panel.placed(placement));
            }
        }

        if let Some(balcony) = &door.balcony {
            let (x, top) = (o.footprint.center_x(), o.footprint.bottom);
            attach_balcony(&mut assembly, balcony, spec, x, top)?;
        }
    }

    if let Some(balcony) = &spec.balcony {
        attach_balcony(&mut assembly, balcony, spec, 0.0, 0.0)?;
    }

    if let Some(stair) = &spec.stair {
        // Bottom step farthest out, the flight climbs toward the wall
        let run_start =
            d / 2.0 + config.stair_clearance + (stair.steps as f64 - 0.5) * stair.step_depth;
        let placement = Placement::at(0.0, 0.0, run_start).translated(stair.offset);
        assembly.attach(DecorationKind::Stair, build_stair(stair)?.placed(placement));
    }

    tracing::debug!(
        width = w,
        height = h,
        holes = assembly.hole_count(),
        decorations = assembly.decorations.len(),
        "Built wall"
    );
    Ok(assembly)
}

fn opening<'a>(label: String, hole: &'a HoleSpec, width: f64, height: f64) -> Result<Opening<'a>> {
    let ratios = [hole.width_ratio, hole.height_ratio];
    if ratios.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
        return Err(Error::degenerate(format!(
            "{} has non-positive size ratio ({} x {})",
            label, hole.width_ratio, hole.height_ratio
        )));
    }
    if !(hole.offset_left.is_finite() && hole.offset_ground.is_finite()) {
        return Err(Error::degenerate(format!("{} has a non-finite offset", label)));
    }

    let footprint = hole.footprint(width, height);
    if !footprint.fits(width, height, EDGE_EPSILON) {
        return Err(Error::out_of_bounds(
            label,
            format!(
                "x [{:.3}, {:.3}] y [{:.3}, {:.3}] exceeds a {:.3} x {:.3} wall",
                footprint.left, footprint.right, footprint.bottom, footprint.top, width, height
            ),
        ));
    }

    Ok(Opening { hole, footprint })
}

/// Slab on the outer face with its top at `top`, plus its railing.
fn attach_balcony(
    assembly: &mut WallAssembly,
    balcony: &BalconySpec,
    wall: &WallSpec,
    center_x: f64,
    top: f64,
) -> Result<()> {
    let (width, x) = if balcony.full_length {
        (wall.width, 0.0)
    } else {
        (balcony.width, center_x)
    };

    let outer_face = wall.depth / 2.0;
    let slab = Solid::cuboid(width, balcony.height, balcony.depth, balcony.material.clone())?
        .placed(Placement::at(x, top - balcony.height / 2.0, outer_face + balcony.depth / 2.0));
    assembly.attach(DecorationKind::Balcony, slab);

    if let Some(railing) = &balcony.railing {
        let edge = outer_face + balcony.depth - railing.rail_thickness / 2.0;
        let solid = build_railing(width, railing)?.placed(Placement::at(x, top, edge));
        assembly.attach(DecorationKind::Railing, solid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{DoorSpec, RailingSpec, ShutterSpec, StairSpec};
    use approx::assert_abs_diff_eq;
    use storey_geometry::MaterialHandle;

    fn wall() -> WallSpec {
        WallSpec::new(10.0, 6.0, 0.25, MaterialHandle::new("wall"))
    }

    #[test]
    fn test_plain_wall_matches_spec_box() {
        let assembly = build_wall(&wall(), &BuildConfig::default()).unwrap();
        let b = assembly.wall().bounds().unwrap();
        assert_abs_diff_eq!(b.min.x, -5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.max.x, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.min.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.max.y, 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.size().z, 0.25, epsilon = 1e-6);
        assert_eq!(assembly.solid_count(), 1);
        assert_eq!(assembly.wall().mesh().triangle_count(), 12);
    }

    #[test]
    fn test_window_removes_its_volume_and_gets_a_frame() {
        let spec = wall().with_window(HoleSpec::new(0.2, 0.2, 0.4, 0.4));
        let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
        let removed = 10.0 * 6.0 * 0.25 - assembly.wall().volume();
        assert_abs_diff_eq!(removed, 2.0 * 1.2 * 0.25, epsilon = 1e-4);
        assert_eq!(assembly.hole_count(), 1);
        assert_eq!(assembly.count(DecorationKind::Frame), 1);

        let frame = assembly.decorations()[0].solid.bounds().unwrap();
        assert_abs_diff_eq!(frame.min.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(frame.min.y, 2.4, epsilon = 1e-6);
    }

    #[test]
    fn test_flush_door_cuts_to_the_floor() {
        let spec = wall().with_door(DoorSpec::new(0.2, 0.5, 0.0, 0.0));
        let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
        let removed = 10.0 * 6.0 * 0.25 - assembly.wall().volume();
        assert_abs_diff_eq!(removed, 2.0 * 3.0 * 0.25, epsilon = 1e-4);
        let b = assembly.wall().bounds().unwrap();
        assert_abs_diff_eq!(b.min.x, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_bounds_hole_rejected() {
        let spec = wall().with_window(HoleSpec::new(0.2, 0.2, 1.0, 0.5));
        let err = build_wall(&spec, &BuildConfig::default()).unwrap_err();
        match err {
            Error::SpecOutOfBounds { element, .. } => assert_eq!(element, "window 0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_ratio_is_degenerate() {
        let spec = wall().with_window(HoleSpec::new(0.0, 0.2, 0.5, 0.5));
        assert!(matches!(
            build_wall(&spec, &BuildConfig::default()),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_balcony_hangs_under_the_door() {
        let railing = RailingSpec::from_config(&BuildConfig::default().railing, "railing".into());
        let balcony = BalconySpec::new(3.0, 0.3, 2.0, "slab".into()).with_railing(railing);
        let door = DoorSpec::new(0.2, 0.5, 0.5, 0.1).with_balcony(balcony);
        let assembly = build_wall(&wall().with_door(door), &BuildConfig::default()).unwrap();
        assert_eq!(assembly.count(DecorationKind::Balcony), 1);
        assert_eq!(assembly.count(DecorationKind::Railing), 1);

        let slab = assembly
            .decorations()
            .iter()
            .find(|d| d.kind == DecorationKind::Balcony)
            .unwrap()
            .solid
            .bounds()
            .unwrap();
        // Door spans x [0, 2], bottom at 0.6
        assert_abs_diff_eq!(slab.center().x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(slab.max.y, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(slab.min.z, 0.125, epsilon = 1e-6);
        assert_abs_diff_eq!(slab.center().z, 0.125 + 1.0, epsilon = 1e-6);

        let rail = assembly
            .decorations()
            .iter()
            .find(|d| d.kind == DecorationKind::Railing)
            .unwrap()
            .solid
            .bounds()
            .unwrap();
        assert_abs_diff_eq!(rail.min.y, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(rail.max.z, 2.125, epsilon = 1e-6);
    }

    #[test]
    fn test_full_length_standalone_balcony() {
        let balcony = BalconySpec::new(3.0, 0.3, 2.0, "slab".into()).full_length();
        let assembly = build_wall(&wall().with_balcony(balcony), &BuildConfig::default()).unwrap();
        let b = assembly.decorations()[0].solid.bounds().unwrap();
        assert_abs_diff_eq!(b.size().x, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.max.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_shutters_mount_on_outer_face() {
        let shutter = ShutterSpec::new(2, 0.0, "shutter".into());
        let door = DoorSpec::new(0.2, 0.5, 0.4, 0.0).with_shutter(shutter);
        let assembly = build_wall(&wall().with_door(door), &BuildConfig::default()).unwrap();
        assert_eq!(assembly.count(DecorationKind::Shutter), 2);
        for d in assembly.decorations() {
            if d.kind == DecorationKind::Shutter {
                let b = d.solid.bounds().unwrap();
                assert_abs_diff_eq!(b.min.z, 0.125, epsilon = 1e-6);
                // Inside the frame: door x [-1, 1], border 0.08
                assert!(b.min.x >= -0.92 - 1e-6 && b.max.x <= 0.92 + 1e-6);
            }
        }
    }

    #[test]
    fn test_exterior_stair_climbs_toward_wall() {
        let stair = StairSpec::new(10, 1.0, 0.59, 0.5, "stair".into());
        let assembly = build_wall(&wall().with_stair(stair), &BuildConfig::default()).unwrap();
        let b = assembly.decorations()[0].solid.bounds().unwrap();
        assert_abs_diff_eq!(b.min.z, 0.125 + 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(b.max.z, 0.125 + 0.1 + 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.max.y, 5.9, epsilon = 1e-6);
    }
}
