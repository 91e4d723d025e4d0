// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor assembly: four walls placed from each other's dimensions, a slab
//! under them and an optional interior stair.
//!
//! Floor frame: the front wall sits at the origin facing +Z, the enclosure
//! extends toward -Z, and y = 0 is the floor line (slab top, wall bottoms).

use crate::config::BuildConfig;
use crate::decorators::build_stair;
use crate::error::{Error, Result};
use crate::spec::{FloorSpecs, StairSpec, WallSide};
use crate::wall::{build_wall, WallAssembly};
use std::f64::consts::{FRAC_PI_2, PI};
use storey_geometry::{Aabb, MaterialHandle, Matrix4, Placement, Solid, Vector3};

/// A wall assembly with its placement in the floor frame
#[derive(Debug)]
pub struct PlacedWall {
    pub side: WallSide,
    pub assembly: WallAssembly,
    pub placement: Placement,
}

/// One story: four placed walls, the slab and an optional interior stair.
#[derive(Debug)]
pub struct FloorGroup {
    walls: Vec<PlacedWall>,
    slab: Solid,
    interior_stair: Option<Solid>,
    placement: Placement,
}

impl FloorGroup {
    /// Walls in front, left, right, back order
    pub fn walls(&self) -> &[PlacedWall] {
        &self.walls
    }

    pub fn wall(&self, side: WallSide) -> Option<&PlacedWall> {
        self.walls.iter().find(|w| w.side == side)
    }

    pub fn slab(&self) -> &Solid {
        &self.slab
    }

    pub fn interior_stair(&self) -> Option<&Solid> {
        self.interior_stair.as_ref()
    }

    /// Placement of the floor frame in its parent (house or roof) frame
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Every solid in the group: walls, decorations, slab and stair
    pub fn solid_count(&self) -> usize {
        self.walls.iter().map(|w| w.assembly.solid_count()).sum::<usize>()
            + 1
            + usize::from(self.interior_stair.is_some())
    }

    pub fn decoration_count(&self) -> usize {
        self.walls.iter().map(|w| w.assembly.decorations().len()).sum()
    }

    /// Bounds of the whole group in the frame given by `parent`
    pub fn bounds_in(&self, parent: &Matrix4<f64>) -> Option<Aabb> {
        let frame = parent * self.placement.to_matrix();
        let walls = self
            .walls
            .iter()
            .filter_map(|w| w.assembly.bounds_in(&(frame * w.placement.to_matrix())));
        let loose = std::iter::once(&self.slab)
            .chain(self.interior_stair.as_ref())
            .filter_map(|s| s.bounds_in(&frame));
        walls.chain(loose).reduce(|a, b| a.union(&b))
    }

    /// Bounds in the parent frame
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds_in(&Matrix4::identity())
    }
}

/// Wall placements in the floor frame, front/left/right/back.
///
/// Only widths and depths matter: the left wall closes the front wall's
/// left end, the right wall sits one front-width further, the back wall
/// closes the far ends of the side walls.
pub fn wall_placements(specs: &FloorSpecs) -> [Placement; 4] {
    let (front, left) = (&specs.front, &specs.left);

    let front_p = Placement::identity();
    let left_p = Placement::at(
        front_p.position.x - front.width / 2.0 + left.depth / 2.0,
        front_p.position.y,
        front_p.position.z + front.depth / 2.0 - left.width / 2.0,
    )
    .with_yaw(-FRAC_PI_2);
    let right_p = Placement::at(
        left_p.position.x + front.width,
        front_p.position.y,
        left_p.position.z,
    )
    .with_yaw(FRAC_PI_2);
    let back_p = Placement::at(
        front_p.position.x,
        front_p.position.y,
        front_p.position.z - left.width + front.depth,
    )
    .with_yaw(PI);

    [front_p, left_p, right_p, back_p]
}

/// Slab extents under the enclosure: (center, size), top face at y = 0
fn slab_box(specs: &FloorSpecs, thickness: f64) -> (Vector3<f64>, Vector3<f64>) {
    let (front, left) = (&specs.front, &specs.left);
    let size = Vector3::new(front.width + left.depth, thickness, left.width);
    let center = Vector3::new(
        left.depth / 2.0,
        -thickness / 2.0,
        front.depth / 2.0 - left.width / 2.0,
    );
    (center, size)
}

/// Build one floor from its four wall specs.
pub fn build_floor(
    specs: &FloorSpecs,
    interior_stair: bool,
    material: &MaterialHandle,
    config: &BuildConfig,
) -> Result<FloorGroup> {
    let depths = specs.iter().map(|(_, s)| s.depth);
    let (min_depth, max_depth) = depths.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
        (lo.min(d), hi.max(d))
    });
    if max_depth - min_depth > 1e-9 {
        tracing::warn!(
            min_depth,
            max_depth,
            "Wall depths differ, corners will show seams"
        );
    }

    let placements = wall_placements(specs);
    let walls = specs
        .iter()
        .zip(placements)
        .map(|((side, spec), placement)| {
            Ok(PlacedWall {
                side,
                assembly: build_wall(spec, config)?,
                placement,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (center, size) = slab_box(specs, config.floor_thickness);
    let slab = Solid::cuboid_anchored(size.x, size.y, size.z, center, material.clone())?;

    let stair = if interior_stair {
        Some(build_interior_stair(specs, material, config)?)
    } else {
        None
    };

    let group = FloorGroup {
        walls,
        slab,
        interior_stair: stair,
        placement: Placement::identity(),
    };
    tracing::debug!(
        solids = group.solid_count(),
        decorations = group.decoration_count(),
        interior_stair,
        "Built floor"
    );
    Ok(group)
}

/// Flight along the left wall's inner face, bottom step against the back
/// wall's inner face, climbing toward the front.
fn build_interior_stair(
    specs: &FloorSpecs,
    material: &MaterialHandle,
    config: &BuildConfig,
) -> Result<Solid> {
    let steps = config.interior_stair.steps;
    let [front_p, left_p, _, back_p] = wall_placements(specs);

    let front_inner = front_p.position.z - specs.front.depth / 2.0;
    let back_inner = back_p.position.z + specs.back.depth / 2.0;
    let left_inner = left_p.position.x + specs.left.depth / 2.0;

    let run = front_inner - back_inner;
    if run <= 0.0 {
        return Err(Error::degenerate(format!(
            "no room for an interior stair between front and back walls ({:.3})",
            run
        )));
    }
    let step_depth = config.interior_stair.step_depth.min(run / steps as f64);
    let step_height = (specs.front.height - config.floor_thickness) / steps as f64;
    let step_width = config.interior_stair.step_width;

    let spec = StairSpec::new(steps, step_width, step_height, step_depth, material.clone());
    // Turned half a turn so the flight recedes toward +Z (the front)
    let placement = Placement::at(left_inner + step_width / 2.0, 0.0, back_inner + step_depth / 2.0)
        .with_yaw(PI);
    Ok(build_stair(&spec)?.placed(placement))
}
