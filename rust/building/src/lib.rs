// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey Building
//!
//! Procedural multi-story houses from declarative specs. Walls are boxes with
//! holes cut by CSG difference; frames, shutters, balconies, railings and
//! stairs are attached as decorations. Walls are assembled into floors,
//! floors are stacked and capped with a parapet roof.
//!
//! ```no_run
//! use storey_building::{build_house, presets, BuildConfig};
//!
//! let house = build_house(2u32, &presets::large_front(), &BuildConfig::default())?;
//! for group in house.display_groups() {
//!     println!("{}: {} solids", group.name, group.len());
//! }
//! # Ok::<(), storey_building::Error>(())
//! ```

pub mod config;
pub mod decorators;
pub mod error;
pub mod floor;
pub mod house;
pub mod presets;
pub mod roof;
pub mod scene;
pub mod spec;
pub mod wall;

pub use config::{BuildConfig, InteriorStairConfig, RailingConfig};
pub use error::{Error, Result};
pub use floor::{build_floor, wall_placements, FloorGroup, PlacedWall};
pub use house::{build_house, FloorCount, House, HouseDirector};
pub use roof::{build_roof, RoofGroup};
pub use scene::{DisplayGroup, DisplayNode};
pub use spec::{
    BalconySpec, DoorSpec, FloorSpecs, Footprint, FrameBorders, HoleSpec, HouseSpecs, RailingSpec,
    ShutterSpec, StairSpec, WallSide, WallSpec,
};
pub use wall::{build_wall, Decoration, DecorationKind, WallAssembly};
