// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ready-made house configurations.
//!
//! All houses use 6 m stories with 0.25 m walls. Wall variants are named by
//! width class and features: `d` doors, `w` windows.

use crate::config::BuildConfig;
use crate::spec::{
    BalconySpec, DoorSpec, FloorSpecs, HoleSpec, HouseSpecs, RailingSpec, ShutterSpec, StairSpec,
    WallSpec,
};
use storey_geometry::{MaterialHandle, Vector3};

pub const WALL_HEIGHT: f64 = 6.0;
pub const WALL_DEPTH: f64 = 0.25;

const LARGE: f64 = 10.0;
const SMALL: f64 = 5.0;
const EQUAL: f64 = 8.0;

/// Material handles shared by every preset
#[derive(Debug, Clone)]
pub struct Palette {
    pub wall: MaterialHandle,
    pub floor: MaterialHandle,
    pub frame: MaterialHandle,
    pub balcony: MaterialHandle,
    pub railing: MaterialHandle,
    pub shutter: MaterialHandle,
    pub stair: MaterialHandle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: MaterialHandle::new("wall"),
            floor: MaterialHandle::new("floor"),
            frame: MaterialHandle::new("frame"),
            balcony: MaterialHandle::new("balcony"),
            railing: MaterialHandle::new("railing"),
            shutter: MaterialHandle::new("shutter"),
            stair: MaterialHandle::new("stair"),
        }
    }
}

impl Palette {
    fn wall(&self, width: f64) -> WallSpec {
        WallSpec::new(width, WALL_HEIGHT, WALL_DEPTH, self.wall.clone())
    }

    fn window(&self, w: f64, h: f64, left: f64, ground: f64) -> HoleSpec {
        HoleSpec::new(w, h, left, ground).with_frame_material(self.frame.clone())
    }

    fn door(&self, w: f64, h: f64, left: f64, ground: f64) -> DoorSpec {
        let mut door = DoorSpec::new(w, h, left, ground);
        door.hole.frame_material = Some(self.frame.clone());
        door
    }

    fn balcony(&self, full_length: bool) -> BalconySpec {
        let railing =
            RailingSpec::from_config(&BuildConfig::default().railing, self.railing.clone());
        let balcony = BalconySpec::new(3.0, 0.3, 2.0, self.balcony.clone()).with_railing(railing);
        if full_length {
            balcony.full_length()
        } else {
            balcony
        }
    }

    fn exterior_stair(&self) -> StairSpec {
        let steps = 10;
        let rise = (WALL_HEIGHT - BuildConfig::default().floor_thickness) / steps as f64;
        StairSpec::new(steps, 1.0, rise, 0.5, self.stair.clone())
    }
}

fn large_side_w1(p: &Palette) -> WallSpec {
    p.wall(LARGE).with_window(p.window(0.2, 0.2, 0.25, 0.5))
}

fn large_side_w2(p: &Palette) -> WallSpec {
    p.wall(LARGE)
        .with_window(p.window(0.2, 0.2, 0.25, 0.5))
        .with_window(p.window(0.2, 0.2, 0.6, 0.5))
}

/// Two doors with balconies plus an exterior stair
pub fn large_side_d2(p: &Palette) -> WallSpec {
    p.wall(LARGE)
        .with_door(p.door(0.4, 0.6, 0.3, 0.0).with_balcony(p.balcony(true)))
        .with_door(p.door(0.2, 0.6, 0.8, 0.0).with_balcony(p.balcony(false)))
        .with_stair(p.exterior_stair())
}

fn small_side_d1(p: &Palette) -> WallSpec {
    p.wall(SMALL).with_door(p.door(0.3, 0.6, 0.35, 0.0))
}

fn small_side_d1_w1(p: &Palette) -> WallSpec {
    let shutter = ShutterSpec::new(2, 30.0, p.shutter.clone());
    p.wall(SMALL)
        .with_door(p.door(0.3, 0.6, 0.1, 0.0).with_shutter(shutter))
        .with_window(p.window(0.3, 0.3, 0.55, 0.5))
}

fn roof_box_wall(p: &Palette, width: f64, height: f64, door: bool) -> WallSpec {
    let wall = WallSpec::new(width, height, WALL_DEPTH, p.floor.clone());
    if door {
        wall.with_door(p.door(0.3, 0.6, 0.6, 0.0))
    } else {
        wall
    }
}

fn plain_ring(p: &Palette, front: f64, side: f64) -> FloorSpecs {
    FloorSpecs::new(p.wall(front), p.wall(side), p.wall(side), p.wall(front))
}

/// Wide facade: windows in front, door and window on the left, door on the
/// right, a small room with a door on the roof.
pub fn large_front() -> HouseSpecs {
    let p = Palette::default();
    HouseSpecs {
        floor: FloorSpecs::new(
            large_side_w2(&p),
            small_side_d1_w1(&p),
            small_side_d1(&p),
            large_side_w1(&p),
        ),
        roof: plain_ring(&p, LARGE, SMALL),
        roof_box: Some(FloorSpecs::new(
            roof_box_wall(&p, 4.0, 3.0, false),
            roof_box_wall(&p, 3.0, 3.0, true),
            roof_box_wall(&p, 3.0, 3.0, false),
            roof_box_wall(&p, 4.0, 3.0, false),
        )),
        slab_material: p.floor.clone(),
        interior_stair: true,
    }
}

/// Narrow facade with the long walls on the sides; the left wall carries a
/// balcony door and an exterior stair.
pub fn large_lateral() -> HouseSpecs {
    let p = Palette::default();
    let front = p
        .wall(SMALL)
        .with_door(p.door(0.25, 0.6, 0.5, 0.0))
        .with_window(p.window(0.1, 0.1, 0.5, 0.8))
        .with_window(p.window(0.2, 0.2, 0.78, 0.5));
    let left = p
        .wall(LARGE)
        .with_door(p.door(0.3, 0.6, 0.6, 0.0).with_balcony(p.balcony(false)))
        .with_window(p.window(0.2, 0.2, 0.25, 0.5))
        .with_stair(p.exterior_stair().with_offset(Vector3::new(-3.5, 0.0, 0.0)));
    let back = p.wall(SMALL).with_window(p.window(0.1, 0.1, 0.5, 0.8));
    let right = p.wall(LARGE);

    HouseSpecs {
        floor: FloorSpecs::new(front, left, right, back),
        roof: plain_ring(&p, SMALL, LARGE),
        roof_box: Some(FloorSpecs::new(
            roof_box_wall(&p, 4.0, 5.0, false),
            roof_box_wall(&p, 4.0, 5.0, true),
            roof_box_wall(&p, 4.0, 5.0, false),
            roof_box_wall(&p, 4.0, 5.0, false),
        )),
        slab_material: p.floor.clone(),
        interior_stair: true,
    }
}

/// Square single-story cottage without a roof room.
pub fn nha_cap_4() -> HouseSpecs {
    let p = Palette::default();
    let front = p
        .wall(EQUAL)
        .with_door(p.door(0.2, 0.6, 0.4, 0.0))
        .with_window(p.window(0.15, 0.25, 0.1, 0.4));
    let back = p.wall(EQUAL).with_door(p.door(0.2, 0.6, 0.4, 0.0));
    let right = p
        .wall(EQUAL)
        .with_window(p.window(0.2, 0.25, 0.15, 0.4))
        .with_window(p.window(0.2, 0.25, 0.65, 0.4));

    HouseSpecs {
        floor: FloorSpecs::new(front, p.wall(EQUAL), right, back),
        roof: plain_ring(&p, EQUAL, EQUAL),
        roof_box: None,
        slab_material: p.floor.clone(),
        interior_stair: false,
    }
}

/// Preset by name, for configuration files and the control surface
pub fn by_name(name: &str) -> Option<HouseSpecs> {
    match name {
        "large-front" | "large_front" => Some(large_front()),
        "large-lateral" | "large_lateral" => Some(large_lateral()),
        "nha-cap-4" | "nha_cap_4" => Some(nha_cap_4()),
        _ => None,
    }
}
