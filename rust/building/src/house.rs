// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! House assembly and the rebuild/inspect command surface.

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::floor::{build_floor, FloorGroup};
use crate::roof::{build_roof, RoofGroup};
use crate::scene::DisplayGroup;
use crate::spec::{HouseSpecs, WallSide};
use crate::wall::WallAssembly;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::Instant;
use storey_geometry::{Aabb, Matrix4, Placement};

/// Number of stories, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloorCount(u32);

impl FloorCount {
    pub fn new(count: u32) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidFloorCount("a house needs at least one floor".into()));
        }
        Ok(Self(count))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FloorCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for FloorCount {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for FloorCount {
    type Error = Error;

    fn try_from(count: u32) -> Result<Self> {
        Self::new(count)
    }
}

impl TryFrom<i64> for FloorCount {
    type Error = Error;

    fn try_from(count: i64) -> Result<Self> {
        let count = u32::try_from(count)
            .map_err(|_| Error::InvalidFloorCount(format!("{} is not a valid floor count", count)))?;
        Self::new(count)
    }
}

impl TryFrom<i32> for FloorCount {
    type Error = Error;

    fn try_from(count: i32) -> Result<Self> {
        Self::try_from(i64::from(count))
    }
}

impl TryFrom<usize> for FloorCount {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        let count = u32::try_from(count)
            .map_err(|_| Error::InvalidFloorCount(format!("{} floors is too many", count)))?;
        Self::new(count)
    }
}

impl TryFrom<f64> for FloorCount {
    type Error = Error;

    fn try_from(count: f64) -> Result<Self> {
        if !count.is_finite() || count.fract() != 0.0 {
            return Err(Error::InvalidFloorCount(format!("{} is not a whole number", count)));
        }
        if count < 1.0 || count > u32::MAX as f64 {
            return Err(Error::InvalidFloorCount(format!("{} is out of range", count)));
        }
        Self::new(count as u32)
    }
}

/// A built house: stacked floors plus one roof.
#[derive(Debug)]
pub struct House {
    floors: Vec<FloorGroup>,
    roof: RoofGroup,
    floor_count: FloorCount,
}

impl House {
    /// Build every floor and the roof from scratch.
    pub fn build(count: FloorCount, specs: &HouseSpecs, config: &BuildConfig) -> Result<Self> {
        config.validate()?;
        let started = Instant::now();
        let wall_height = specs.wall_height();
        tracing::info!(floors = count.get(), wall_height, "Building house");

        let floors = (0..count.get())
            .map(|i| {
                let y = config.baseline + i as f64 * wall_height;
                let floor =
                    build_floor(&specs.floor, specs.interior_stair, &specs.slab_material, config)?;
                Ok(floor.placed(Placement::at(0.0, y, 0.0)))
            })
            .collect::<Result<Vec<_>>>()?;

        let roof_y = config.baseline
            + count.get() as f64 * wall_height
            + wall_height * config.roof_offset_ratio;
        let roof = build_roof(
            &specs.roof,
            specs.roof_box.as_ref(),
            &specs.slab_material,
            config,
        )?
        .placed(Placement::at(0.0, roof_y, 0.0));

        let house = House {
            floors,
            roof,
            floor_count: count,
        };
        tracing::info!(
            floors = count.get(),
            solids = house.solid_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "House build complete"
        );
        Ok(house)
    }

    pub fn floor_count(&self) -> FloorCount {
        self.floor_count
    }

    pub fn floors(&self) -> &[FloorGroup] {
        &self.floors
    }

    pub fn floor(&self, index: usize) -> Option<&FloorGroup> {
        self.floors.get(index)
    }

    pub fn roof(&self) -> &RoofGroup {
        &self.roof
    }

    /// Wall assemblies of one floor keyed by wall name
    pub fn walls_by_name(&self, floor: usize) -> Option<FxHashMap<&'static str, &WallAssembly>> {
        let group = self.floors.get(floor)?;
        Some(
            group
                .walls()
                .iter()
                .map(|w| (w.side.as_str(), &w.assembly))
                .collect(),
        )
    }

    /// One wall by floor index and name (`"front"`, `"left"`, ...)
    pub fn wall_assembly(&self, floor: usize, name: &str) -> Option<&WallAssembly> {
        let side: WallSide = name.parse().ok()?;
        self.floors
            .get(floor)?
            .wall(side)
            .map(|placed| &placed.assembly)
    }

    pub fn solid_count(&self) -> usize {
        self.floors.iter().map(FloorGroup::solid_count).sum::<usize>() + self.roof.solid_count()
    }

    /// Bounds of the whole house in world space
    pub fn bounds(&self) -> Option<Aabb> {
        let world = Matrix4::identity();
        self.floors
            .iter()
            .filter_map(|f| f.bounds_in(&world))
            .chain(self.roof.bounds_in(&world))
            .reduce(|a, b| a.union(&b))
    }
}

/// Build a house with `floor_count` stories.
///
/// Accepts any integer or float count; anything that is not a whole number
/// of at least one fails with [`Error::InvalidFloorCount`].
pub fn build_house<N>(floor_count: N, specs: &HouseSpecs, config: &BuildConfig) -> Result<House>
where
    N: TryInto<FloorCount, Error = Error>,
{
    House::build(floor_count.try_into()?, specs, config)
}

/// Owns the specs and the current house, and serves the control surface's
/// commands. A failed rebuild leaves the previous house in place.
#[derive(Debug)]
pub struct HouseDirector {
    specs: HouseSpecs,
    config: BuildConfig,
    floor_count: FloorCount,
    house: Option<House>,
}

impl HouseDirector {
    pub fn new(specs: HouseSpecs, config: BuildConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            specs,
            config,
            floor_count: FloorCount::default(),
            house: None,
        })
    }

    pub fn specs(&self) -> &HouseSpecs {
        &self.specs
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn floor_count(&self) -> FloorCount {
        self.floor_count
    }

    /// Swap in new specs; the current house stays until the next rebuild
    pub fn set_specs(&mut self, specs: HouseSpecs) {
        self.specs = specs;
    }

    /// Record the floor count for the next rebuild
    pub fn set_floor_count<N>(&mut self, count: N) -> Result<()>
    where
        N: TryInto<FloorCount, Error = Error>,
    {
        self.floor_count = count.try_into()?;
        Ok(())
    }

    /// Build a fresh house and replace the current one on success.
    pub fn rebuild(&mut self) -> Result<&House> {
        match House::build(self.floor_count, &self.specs, &self.config) {
            Ok(house) => Ok(&*self.house.insert(house)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    floors = self.floor_count.get(),
                    "Rebuild failed, keeping previous house"
                );
                Err(err)
            }
        }
    }

    /// Drop the current house and go back to a single floor
    pub fn reset(&mut self) {
        if self.house.take().is_some() {
            tracing::debug!("Discarded house");
        }
        self.floor_count = FloorCount::default();
    }

    pub fn house(&self) -> Option<&House> {
        self.house.as_ref()
    }

    /// The wall an inspector asked for, if the house has it
    pub fn inspect_wall(&self, floor: usize, name: &str) -> Option<&WallAssembly> {
        self.house.as_ref()?.wall_assembly(floor, name)
    }

    /// Named groups for display; empty until the first successful rebuild
    pub fn display_groups(&self) -> Vec<DisplayGroup<'_>> {
        self.house
            .as_ref()
            .map(House::display_groups)
            .unwrap_or_default()
    }
}
