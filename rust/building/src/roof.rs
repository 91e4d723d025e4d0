// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof composition.
//!
//! A roof is a floor with short walls (the parapet ring), a flat slab,
//! railings on the parapet tops and optionally a second, smaller floor
//! (the roof box) standing on the slab.

use crate::config::BuildConfig;
use crate::decorators::build_railing;
use crate::error::Result;
use crate::floor::{build_floor, FloorGroup};
use crate::spec::{FloorSpecs, RailingSpec, WallSide};
use storey_geometry::{Aabb, MaterialHandle, Matrix4, Placement, Solid, Vector3};

#[derive(Debug)]
pub struct RoofGroup {
    parapet: FloorGroup,
    slab: Solid,
    railings: Vec<(WallSide, Solid)>,
    roof_box: Option<FloorGroup>,
    placement: Placement,
}

impl RoofGroup {
    pub fn parapet(&self) -> &FloorGroup {
        &self.parapet
    }

    /// Flat slab; its placement is in the roof frame
    pub fn slab(&self) -> &Solid {
        &self.slab
    }

    /// One railing per parapet wall
    pub fn railings(&self) -> &[(WallSide, Solid)] {
        &self.railings
    }

    pub fn roof_box(&self) -> Option<&FloorGroup> {
        self.roof_box.as_ref()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn solid_count(&self) -> usize {
        self.parapet.solid_count()
            + 1
            + self.railings.len()
            + self.roof_box.as_ref().map_or(0, FloorGroup::solid_count)
    }

    pub fn bounds_in(&self, parent: &Matrix4<f64>) -> Option<Aabb> {
        let frame = parent * self.placement.to_matrix();
        let groups = std::iter::once(&self.parapet)
            .chain(self.roof_box.as_ref())
            .filter_map(|g| g.bounds_in(&frame));
        let solids = std::iter::once(&self.slab)
            .chain(self.railings.iter().map(|(_, s)| s))
            .filter_map(|s| s.bounds_in(&frame));
        groups.chain(solids).reduce(|a, b| a.union(&b))
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds_in(&Matrix4::identity())
    }
}

/// Center of a floor's outer footprint in its own frame (x, z)
fn footprint_center(specs: &FloorSpecs) -> (f64, f64) {
    (
        specs.left.depth / 2.0,
        specs.front.depth / 2.0 - specs.left.width / 2.0,
    )
}

/// Build the roof over an enclosure described by `specs`.
pub fn build_roof(
    specs: &FloorSpecs,
    roof_box: Option<&FloorSpecs>,
    material: &MaterialHandle,
    config: &BuildConfig,
) -> Result<RoofGroup> {
    let parapet_height = config.parapet_height;
    let parapet_specs = specs.map(|wall| wall.parapet(parapet_height));
    let parapet = build_floor(&parapet_specs, false, material, config)?;

    let (cx, cz) = footprint_center(specs);
    let (size_x, size_z) = specs.footprint();
    let thickness = config.roof_slab_thickness;
    let slab = Solid::cuboid_anchored(
        size_x,
        thickness,
        size_z,
        Vector3::new(cx, thickness / 2.0, cz),
        material.clone(),
    )?;

    let railing_height = match roof_box {
        Some(box_specs) if box_specs.front.height > parapet_height => {
            box_specs.front.height - parapet_height
        }
        Some(box_specs) => {
            tracing::warn!(
                box_height = box_specs.front.height,
                parapet_height,
                "Roof box is not taller than the parapet, using default railing height"
            );
            config.railing.height
        }
        None => config.railing.height,
    };
    let railing = RailingSpec::from_config(&config.railing, material.clone())
        .with_height(railing_height);

    let railings = parapet
        .walls()
        .iter()
        .map(|w| {
            let top = w.placement.translated(Vector3::new(0.0, parapet_height, 0.0));
            let width = parapet_specs.get(w.side).width;
            Ok((w.side, build_railing(width, &railing)?.placed(top)))
        })
        .collect::<Result<Vec<_>>>()?;

    let roof_box = roof_box
        .map(|box_specs| {
            let (bx, bz) = footprint_center(box_specs);
            let placement = Placement::at(cx - bx, thickness, cz - bz);
            build_floor(box_specs, false, material, config).map(|g| g.placed(placement))
        })
        .transpose()?;

    let group = RoofGroup {
        parapet,
        slab,
        railings,
        roof_box,
        placement: Placement::identity(),
    };
    tracing::info!(
        solids = group.solid_count(),
        has_roof_box = group.roof_box.is_some(),
        railing_height,
        "Built roof"
    );
    Ok(group)
}
