// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flattening a built house into named display groups.
//!
//! Each group holds world-space nodes: a borrowed solid, its slash-separated
//! path in the house tree and the composed world matrix.

use crate::floor::{FloorGroup, PlacedWall};
use crate::house::House;
use crate::wall::DecorationKind;
use rustc_hash::FxHashMap;
use storey_geometry::{Aabb, MaterialHandle, Matrix4, Mesh, Solid};

/// One solid ready for display
#[derive(Debug, Clone)]
pub struct DisplayNode<'a> {
    /// e.g. `floor-1/left/frame-2`
    pub path: String,
    pub solid: &'a Solid,
    /// Local-to-world, the solid's own placement included
    pub transform: Matrix4<f64>,
}

impl DisplayNode<'_> {
    pub fn material(&self) -> &MaterialHandle {
        self.solid.material()
    }

    pub fn world_bounds(&self) -> Option<Aabb> {
        self.solid.mesh().bounds_with(&self.transform)
    }

    pub fn world_mesh(&self) -> Mesh {
        self.solid.mesh().transformed(&self.transform)
    }
}

/// A top-level group: `floor-0`, `floor-1`, ..., `roof`
#[derive(Debug, Clone)]
pub struct DisplayGroup<'a> {
    pub name: String,
    pub nodes: Vec<DisplayNode<'a>>,
}

impl<'a> DisplayGroup<'a> {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    fn push(&mut self, path: String, solid: &'a Solid, parent: &Matrix4<f64>) {
        self.nodes.push(DisplayNode {
            path,
            solid,
            transform: parent * solid.placement().to_matrix(),
        });
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, path: &str) -> Option<&DisplayNode<'a>> {
        self.nodes.iter().find(|n| n.path == path)
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes
            .iter()
            .filter_map(DisplayNode::world_bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Node count per material name
    pub fn material_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for node in &self.nodes {
            *counts.entry(node.material().name()).or_insert(0) += 1;
        }
        counts
    }
}

fn push_wall<'a>(
    group: &mut DisplayGroup<'a>,
    prefix: &str,
    wall: &'a PlacedWall,
    frame: &Matrix4<f64>,
) {
    let frame = frame * wall.placement.to_matrix();
    let base = format!("{}/{}", prefix, wall.side);
    group.push(format!("{}/wall", base), wall.assembly.wall(), &frame);

    let mut seen: FxHashMap<DecorationKind, usize> = FxHashMap::default();
    for decoration in wall.assembly.decorations() {
        let index = seen.entry(decoration.kind).or_insert(0);
        group.push(
            format!("{}/{}-{}", base, decoration.kind, index),
            &decoration.solid,
            &frame,
        );
        *index += 1;
    }
}

fn push_floor<'a>(
    group: &mut DisplayGroup<'a>,
    prefix: &str,
    floor: &'a FloorGroup,
    parent: &Matrix4<f64>,
) {
    let frame = parent * floor.placement().to_matrix();
    for wall in floor.walls() {
        push_wall(group, prefix, wall, &frame);
    }
    group.push(format!("{}/slab", prefix), floor.slab(), &frame);
    if let Some(stair) = floor.interior_stair() {
        group.push(format!("{}/stair", prefix), stair, &frame);
    }
}

impl House {
    /// Flatten the house into display groups, floors first then the roof
    pub fn display_groups(&self) -> Vec<DisplayGroup<'_>> {
        let world = Matrix4::identity();
        let mut groups: Vec<DisplayGroup<'_>> = self
            .floors()
            .iter()
            .enumerate()
            .map(|(i, floor)| {
                let name = format!("floor-{}", i);
                let mut group = DisplayGroup::new(name.as_str());
                push_floor(&mut group, &name, floor, &world);
                group
            })
            .collect();

        let roof = self.roof();
        let frame = world * roof.placement().to_matrix();
        let mut group = DisplayGroup::new("roof");
        push_floor(&mut group, "roof/parapet", roof.parapet(), &frame);
        group.push("roof/slab".into(), roof.slab(), &frame);
        for (side, railing) in roof.railings() {
            group.push(format!("roof/railing-{}", side), railing, &frame);
        }
        if let Some(roof_box) = roof.roof_box() {
            push_floor(&mut group, "roof/box", roof_box, &frame);
        }
        groups.push(group);

        groups
    }
}
