// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use storey_building::{
    build_house, presets, BuildConfig, DecorationKind, Error, HoleSpec, HouseDirector, WallSide,
};

fn config() -> BuildConfig {
    BuildConfig::default()
}

#[test]
fn test_rebuild_is_deterministic() {
    let specs = presets::large_front();
    let first = build_house(2u32, &specs, &config()).unwrap();
    let second = build_house(2u32, &specs, &config()).unwrap();

    assert_eq!(first.solid_count(), second.solid_count());
    assert!(first
        .bounds()
        .unwrap()
        .approx_eq(&second.bounds().unwrap(), 1e-9));

    let names = |h: &storey_building::House| {
        h.display_groups()
            .iter()
            .map(|g| (g.name.clone(), g.len()))
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&first), names(&second));
}

#[test]
fn test_floors_stack_by_wall_height() {
    let house = build_house(3u32, &presets::large_front(), &config()).unwrap();
    assert_eq!(house.floor_count().get(), 3);
    assert_eq!(house.floors().len(), 3);
    for (i, floor) in house.floors().iter().enumerate() {
        assert_abs_diff_eq!(floor.placement().position.y, i as f64 * 6.0, epsilon = 1e-12);
    }
    // 3 floors of 6 plus a quarter story gap
    assert_abs_diff_eq!(house.roof().placement().position.y, 19.5, epsilon = 1e-12);
}

#[test]
fn test_house_bounds_reach_roof_box_top() {
    let house = build_house(1u32, &presets::large_front(), &config()).unwrap();
    let b = house.bounds().unwrap();
    assert_abs_diff_eq!(b.min.y, -0.1, epsilon = 1e-4);
    // Roof at 7.5, box room on a 0.1 slab, 3 high
    assert_abs_diff_eq!(b.max.y, 10.6, epsilon = 1e-4);
}

#[test]
fn test_invalid_floor_counts() {
    let specs = presets::nha_cap_4();
    for result in [
        build_house(0u32, &specs, &config()),
        build_house(-1i64, &specs, &config()),
        build_house(1.5f64, &specs, &config()),
    ] {
        assert!(matches!(result, Err(Error::InvalidFloorCount(_))));
    }
    assert!(build_house(1.0f64, &specs, &config()).is_ok());
}

#[test]
fn test_every_preset_builds() {
    for (name, specs) in [
        ("large-front", presets::large_front()),
        ("large-lateral", presets::large_lateral()),
        ("nha-cap-4", presets::nha_cap_4()),
    ] {
        let house = build_house(2u32, &specs, &config())
            .unwrap_or_else(|e| panic!("{} failed to build: {}", name, e));
        assert_eq!(house.floors().len(), 2, "{}", name);
        assert_eq!(house.roof().railings().len(), 4, "{}", name);
        assert_eq!(house.roof().roof_box().is_some(), specs.roof_box.is_some());
    }
}

#[test]
fn test_walls_by_name() {
    let house = build_house(2u32, &presets::large_lateral(), &config()).unwrap();
    let walls = house.walls_by_name(1).unwrap();
    assert_eq!(walls.len(), 4);
    let left = walls["left"];
    assert_eq!(left.hole_count(), 2);
    assert_eq!(left.count(DecorationKind::Balcony), 1);
    assert_eq!(left.count(DecorationKind::Stair), 1);
    assert_eq!(walls["right"].hole_count(), 0);

    assert!(house.walls_by_name(2).is_none());
    assert!(house.wall_assembly(0, "attic").is_none());
}

#[test]
fn test_director_keeps_house_when_rebuild_fails() {
    let mut director = HouseDirector::new(presets::large_front(), config()).unwrap();
    assert!(director.house().is_none());
    assert!(director.display_groups().is_empty());

    director.set_floor_count(2u32).unwrap();
    let solids = director.rebuild().unwrap().solid_count();

    // Floor count requests are validated up front
    assert!(director.set_floor_count(0u32).is_err());
    assert_eq!(director.floor_count().get(), 2);

    let mut broken = presets::large_front();
    broken.floor.front = broken
        .floor
        .front
        .clone()
        .with_window(HoleSpec::new(0.2, 0.2, 0.9, 0.5));
    director.set_specs(broken);
    assert!(matches!(
        director.rebuild(),
        Err(Error::SpecOutOfBounds { .. })
    ));

    let house = director.house().unwrap();
    assert_eq!(house.floor_count().get(), 2);
    assert_eq!(house.solid_count(), solids);
}

#[test]
fn test_director_inspect_and_reset() {
    let mut director = HouseDirector::new(presets::large_front(), config()).unwrap();
    assert!(director.inspect_wall(0, "front").is_none());

    director.rebuild().unwrap();
    let front = director.inspect_wall(0, "front").unwrap();
    assert_eq!(front.hole_count(), 2);
    assert!(director.inspect_wall(0, "attic").is_none());
    assert!(director.inspect_wall(1, "front").is_none());

    director.set_floor_count(3u32).unwrap();
    director.reset();
    assert!(director.house().is_none());
    assert_eq!(director.floor_count().get(), 1);
}

#[test]
fn test_display_groups_paths() {
    let house = build_house(2u32, &presets::large_front(), &config()).unwrap();
    let groups = house.display_groups();
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["floor-0", "floor-1", "roof"]);

    let upper = &groups[1];
    // Left wall: a shuttered door then a window
    for path in [
        "floor-1/left/wall",
        "floor-1/left/frame-0",
        "floor-1/left/frame-1",
        "floor-1/left/shutter-1",
        "floor-1/slab",
        "floor-1/stair",
    ] {
        assert!(upper.node(path).is_some(), "missing {}", path);
    }
    assert!(upper.node("floor-1/left/frame-2").is_none());
    assert_eq!(upper.material_counts()["shutter"], 2);

    let wall = upper.node("floor-1/front/wall").unwrap();
    let b = wall.world_bounds().unwrap();
    assert_abs_diff_eq!(b.min.y, 6.0, epsilon = 1e-4);
    assert_abs_diff_eq!(b.max.y, 12.0, epsilon = 1e-4);

    let mesh = wall.world_mesh();
    assert_eq!(mesh.triangle_count(), wall.solid.mesh().triangle_count());
    assert!(mesh.bounds().unwrap().approx_eq(&b, 1e-5));

    let roof = &groups[2];
    for side in WallSide::ALL {
        let path = format!("roof/railing-{}", side);
        assert!(roof.node(&path).is_some(), "missing {}", path);
    }
    assert!(roof.node("roof/slab").is_some());
    assert!(roof.node("roof/parapet/front/wall").is_some());
    assert!(roof.node("roof/box/left/frame-0").is_some());

    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, house.solid_count());
}
