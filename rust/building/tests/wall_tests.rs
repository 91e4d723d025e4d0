// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use storey_building::decorators::{baluster_layout, build_railing};
use storey_building::{
    build_wall, BalconySpec, BuildConfig, DecorationKind, DoorSpec, Error, HoleSpec, RailingSpec,
    ShutterSpec, StairSpec, WallSpec,
};
use storey_geometry::MaterialHandle;

fn material() -> MaterialHandle {
    MaterialHandle::new("wall")
}

fn wall() -> WallSpec {
    WallSpec::new(10.0, 6.0, 0.25, material())
}

fn railing() -> RailingSpec {
    RailingSpec::from_config(&BuildConfig::default().railing, MaterialHandle::new("railing"))
}

#[test]
fn test_plain_wall_is_exact_box() {
    let spec = WallSpec::new(4.0, 3.0, 0.3, material());
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
    let b = assembly.wall().bounds().unwrap();
    assert_abs_diff_eq!(b.size().x, 4.0, epsilon = 1e-6);
    assert_abs_diff_eq!(b.size().y, 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(b.size().z, 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(assembly.wall().volume(), 3.6, epsilon = 1e-5);
    assert!(assembly.decorations().is_empty());
}

#[test]
fn test_offset_left_zero_is_flush_with_left_edge() {
    let spec = wall().with_window(HoleSpec::new(0.1, 0.2, 0.0, 0.3));
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
    let frame = assembly.decorations()[0].solid.bounds().unwrap();
    assert_abs_diff_eq!(frame.min.x, -5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(frame.max.x, -4.0, epsilon = 1e-6);

    // Wall keeps its full extent; the hole only notches the left end
    let b = assembly.wall().bounds().unwrap();
    assert_abs_diff_eq!(b.min.x, -5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(
        assembly.wall().volume(),
        15.0 - 1.0 * 1.2 * 0.25,
        epsilon = 1e-4
    );
}

#[test]
fn test_offset_left_one_overflows_right_edge() {
    let hole = HoleSpec::new(0.1, 0.2, 1.0, 0.3);
    let fp = hole.footprint(10.0, 6.0);
    assert_abs_diff_eq!(fp.left, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fp.right, 6.0, epsilon = 1e-12);

    let err = build_wall(&wall().with_window(hole), &BuildConfig::default()).unwrap_err();
    match err {
        Error::SpecOutOfBounds { element, .. } => assert_eq!(element, "window 0"),
        other => panic!("expected SpecOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_overlapping_holes_merge() {
    // x [-2, 0] y [2.4, 3.6] and x [-1, 1] y [2.1, 3.9]
    let spec = wall()
        .with_window(HoleSpec::new(0.2, 0.2, 0.3, 0.4))
        .with_window(HoleSpec::new(0.2, 0.3, 0.4, 0.35));
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();

    let union_area = 2.0 * 1.2 + 2.0 * 1.8 - 1.0 * 1.2;
    let removed = 15.0 - assembly.wall().volume();
    assert_abs_diff_eq!(removed, union_area * 0.25, epsilon = 1e-3);
    assert_eq!(assembly.hole_count(), 2);
    assert_eq!(assembly.count(DecorationKind::Frame), 2);
}

#[test]
fn test_hole_past_the_top_is_rejected() {
    let spec = wall().with_door(DoorSpec::new(0.2, 0.8, 0.4, 0.3));
    assert!(matches!(
        build_wall(&spec, &BuildConfig::default()),
        Err(Error::SpecOutOfBounds { .. })
    ));
}

#[test]
fn test_zero_size_hole_is_degenerate() {
    let spec = wall().with_window(HoleSpec::new(0.0, 0.2, 0.4, 0.3));
    assert!(matches!(
        build_wall(&spec, &BuildConfig::default()),
        Err(Error::DegenerateGeometry(_))
    ));
}

#[test]
fn test_full_size_opening_leaves_no_wall() {
    let spec = WallSpec::new(4.0, 3.0, 0.25, material())
        .with_window(HoleSpec::new(1.0, 1.0, 0.0, 0.0));
    assert!(matches!(
        build_wall(&spec, &BuildConfig::default()),
        Err(Error::DegenerateGeometry(_))
    ));

    // Full width alone leaves the upper band standing
    let spec = WallSpec::new(4.0, 3.0, 0.25, material())
        .with_window(HoleSpec::new(1.0, 0.5, 0.0, 0.0));
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
    assert_abs_diff_eq!(assembly.wall().volume(), 1.5, epsilon = 1e-4);
    let b = assembly.wall().bounds().unwrap();
    assert_abs_diff_eq!(b.min.y, 1.5, epsilon = 1e-5);
}

#[test]
fn test_non_positive_wall_is_degenerate() {
    let spec = WallSpec::new(10.0, 0.0, 0.25, material());
    assert!(matches!(
        build_wall(&spec, &BuildConfig::default()),
        Err(Error::DegenerateGeometry(_))
    ));
}

#[test]
fn test_door_balcony_sits_at_threshold() {
    let balcony =
        BalconySpec::new(3.0, 0.3, 2.0, MaterialHandle::new("balcony")).with_railing(railing());
    let spec = wall().with_door(DoorSpec::new(0.2, 0.6, 0.4, 0.0).with_balcony(balcony));
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
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
    // Door spans x [-1, 1], its bottom is the floor line
    assert_abs_diff_eq!(slab.center().x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(slab.size().x, 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(slab.max.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(slab.min.z, 0.125, epsilon = 1e-6);
    assert_abs_diff_eq!(slab.max.z, 2.125, epsilon = 1e-6);

    let rail = assembly
        .decorations()
        .iter()
        .find(|d| d.kind == DecorationKind::Railing)
        .unwrap()
        .solid
        .bounds()
        .unwrap();
    assert_abs_diff_eq!(rail.min.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(rail.max.y, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(rail.max.z, 2.125, epsilon = 1e-6);
}

#[test]
fn test_full_length_balcony_spans_wall() {
    let balcony = BalconySpec::new(3.0, 0.3, 2.0, MaterialHandle::new("balcony")).full_length();
    let spec = wall().with_door(DoorSpec::new(0.2, 0.6, 0.1, 0.0).with_balcony(balcony));
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
    let slab = assembly
        .decorations()
        .iter()
        .find(|d| d.kind == DecorationKind::Balcony)
        .unwrap()
        .solid
        .bounds()
        .unwrap();
    assert_abs_diff_eq!(slab.min.x, -5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(slab.max.x, 5.0, epsilon = 1e-6);
}

#[test]
fn test_door_shutters_stand_outside_the_wall() {
    let shutter = ShutterSpec::new(2, 45.0, MaterialHandle::new("shutter"));
    let spec = wall().with_door(DoorSpec::new(0.2, 0.6, 0.4, 0.0).with_shutter(shutter));
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
    assert_eq!(assembly.count(DecorationKind::Shutter), 2);

    for d in assembly.decorations() {
        if d.kind == DecorationKind::Shutter {
            let b = d.solid.bounds().unwrap();
            assert!(b.min.z >= 0.125 - 1e-6, "shutter enters the wall: {:?}", b);
        }
    }
}

#[test]
fn test_exterior_stair_stands_off_the_wall() {
    let stair = StairSpec::new(5, 1.0, 0.2, 0.3, MaterialHandle::new("stair"));
    let spec = wall().with_stair(stair);
    let assembly = build_wall(&spec, &BuildConfig::default()).unwrap();
    assert_eq!(assembly.count(DecorationKind::Stair), 1);

    let b = assembly.decorations()[0].solid.bounds().unwrap();
    let clearance = BuildConfig::default().stair_clearance;
    assert_abs_diff_eq!(b.min.z, 0.125 + clearance, epsilon = 1e-6);
    assert_abs_diff_eq!(b.max.z, 0.125 + clearance + 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(b.max.y, 1.0, epsilon = 1e-6);
}

#[test]
fn test_railing_bays_cover_width() {
    let (count, spacing) = baluster_layout(3.0, 0.1);
    assert_eq!(count, 30);
    assert_abs_diff_eq!(count as f64 * spacing, 3.0, epsilon = 1e-12);

    let spec = railing();
    let solid = build_railing(3.0, &spec).unwrap();
    let b = solid.bounds().unwrap();
    assert_abs_diff_eq!(b.size().x, 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(b.max.y, spec.height, epsilon = 1e-6);
}
