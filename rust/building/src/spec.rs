// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative building specs.
//!
//! Specs are immutable value objects. Hole dimensions and offsets are
//! ratios of the parent wall; everything else is in absolute model units.

use crate::config::RailingConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use storey_geometry::{MaterialHandle, Placement, Vector3};

/// Default frame border thickness around doors and windows
pub const DEFAULT_FRAME_BORDER: f64 = 0.08;

/// The four walls of one enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Front,
    Left,
    Right,
    Back,
}

impl WallSide {
    /// Build order of the sides
    pub const ALL: [WallSide; 4] = [
        WallSide::Front,
        WallSide::Left,
        WallSide::Right,
        WallSide::Back,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallSide::Front => "front",
            WallSide::Left => "left",
            WallSide::Right => "right",
            WallSide::Back => "back",
        }
    }
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(WallSide::Front),
            "left" => Ok(WallSide::Left),
            "right" => Ok(WallSide::Right),
            "back" => Ok(WallSide::Back),
            other => Err(Error::Config(format!("unknown wall '{}'", other))),
        }
    }
}

/// Border thickness on each side of a frame, absolute units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBorders {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl FrameBorders {
    pub fn uniform(border: f64) -> Self {
        Self {
            top: border,
            right: border,
            bottom: border,
            left: border,
        }
    }

    /// Door frames have no sill
    pub fn door(border: f64) -> Self {
        Self {
            bottom: 0.0,
            ..Self::uniform(border)
        }
    }

    /// left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Offset of the inner opening's center from the outer center
    pub fn inner_offset(&self) -> (f64, f64) {
        ((self.left - self.right) / 2.0, (self.bottom - self.top) / 2.0)
    }
}

impl Default for FrameBorders {
    fn default() -> Self {
        Self::uniform(DEFAULT_FRAME_BORDER)
    }
}

/// A rectangular opening, all four values are ratios of the parent wall.
///
/// `offset_left` locates the hole's left edge measured from the wall's left
/// edge; `offset_ground` locates its bottom edge measured from the floor line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub width_ratio: f64,
    pub height_ratio: f64,
    pub offset_left: f64,
    pub offset_ground: f64,
    #[serde(default)]
    pub frame: FrameBorders,
    /// Frame material, the wall's material when unset
    #[serde(default)]
    pub frame_material: Option<MaterialHandle>,
}

/// Absolute rectangle of a hole in its wall's local frame
/// (x from the wall center, y from the floor line).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Footprint {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }

    /// Whether the rectangle stays inside a wall of the given size
    pub fn fits(&self, wall_width: f64, wall_height: f64, epsilon: f64) -> bool {
        let half = wall_width / 2.0;
        self.left >= -half - epsilon
            && self.right <= half + epsilon
            && self.bottom >= -epsilon
            && self.top <= wall_height + epsilon
    }
}

impl HoleSpec {
    pub fn new(width_ratio: f64, height_ratio: f64, offset_left: f64, offset_ground: f64) -> Self {
        Self {
            width_ratio,
            height_ratio,
            offset_left,
            offset_ground,
            frame: FrameBorders::default(),
            frame_material: None,
        }
    }

    pub fn with_frame(mut self, frame: FrameBorders) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_frame_material(mut self, material: MaterialHandle) -> Self {
        self.frame_material = Some(material);
        self
    }

    /// Absolute rectangle of the hole in a `wall_width` x `wall_height` wall.
    ///
    /// No bounds check: with `offset_left == 1` the rectangle starts at the
    /// wall's right edge and overshoots it by the hole's own width.
    pub fn footprint(&self, wall_width: f64, wall_height: f64) -> Footprint {
        let width = self.width_ratio * wall_width;
        let height = self.height_ratio * wall_height;
        let left = -wall_width / 2.0 + self.offset_left * wall_width;
        let bottom = self.offset_ground * wall_height;
        Footprint {
            left,
            right: left + width,
            bottom,
            top: bottom + height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub hole: HoleSpec,
    #[serde(default)]
    pub balcony: Option<BalconySpec>,
    #[serde(default)]
    pub shutter: Option<ShutterSpec>,
}

impl DoorSpec {
    /// Door with a sill-less frame of the default border
    pub fn new(width_ratio: f64, height_ratio: f64, offset_left: f64, offset_ground: f64) -> Self {
        Self {
            hole: HoleSpec::new(width_ratio, height_ratio, offset_left, offset_ground)
                .with_frame(FrameBorders::door(DEFAULT_FRAME_BORDER)),
            balcony: None,
            shutter: None,
        }
    }

    pub fn with_balcony(mut self, balcony: BalconySpec) -> Self {
        self.balcony = Some(balcony);
        self
    }

    pub fn with_shutter(mut self, shutter: ShutterSpec) -> Self {
        self.shutter = Some(shutter);
        self
    }
}

/// Slab protruding from a wall's outer face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalconySpec {
    pub width: f64,
    /// Slab thickness
    pub height: f64,
    /// Protrusion from the wall's outer face
    pub depth: f64,
    /// Span the whole wall width instead of `width`
    pub full_length: bool,
    pub material: MaterialHandle,
    #[serde(default)]
    pub railing: Option<RailingSpec>,
}

impl BalconySpec {
    pub fn new(width: f64, height: f64, depth: f64, material: MaterialHandle) -> Self {
        Self {
            width,
            height,
            depth,
            full_length: false,
            material,
            railing: None,
        }
    }

    pub fn full_length(mut self) -> Self {
        self.full_length = true;
        self
    }

    pub fn with_railing(mut self, railing: RailingSpec) -> Self {
        self.railing = Some(railing);
        self
    }
}

/// Louvered shutter panels hung in a door opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShutterSpec {
    pub panels: u32,
    /// Degrees, 0 is closed
    pub open_angle: f64,
    /// Slat pitch
    pub slat_height: f64,
    pub slat_gap: f64,
    /// Panel thickness
    pub thickness: f64,
    pub frame: FrameBorders,
    pub material: MaterialHandle,
}

impl ShutterSpec {
    pub fn new(panels: u32, open_angle: f64, material: MaterialHandle) -> Self {
        Self {
            panels,
            open_angle,
            slat_height: 0.12,
            slat_gap: 0.03,
            thickness: 0.04,
            frame: FrameBorders::uniform(0.05),
            material,
        }
    }

    pub fn with_slats(mut self, slat_height: f64, slat_gap: f64) -> Self {
        self.slat_height = slat_height;
        self.slat_gap = slat_gap;
        self
    }
}

/// Top rail plus balusters. The railed width comes from the edge it stands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailingSpec {
    pub height: f64,
    /// Nominal baluster spacing
    pub spacing: f64,
    pub rail_thickness: f64,
    pub baluster_thickness: f64,
    pub material: MaterialHandle,
}

impl RailingSpec {
    pub fn from_config(config: &RailingConfig, material: MaterialHandle) -> Self {
        Self {
            height: config.height,
            spacing: config.spacing,
            rail_thickness: config.rail_thickness,
            baluster_thickness: config.baluster_thickness,
            material,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairSpec {
    pub steps: u32,
    pub step_width: f64,
    pub step_height: f64,
    pub step_depth: f64,
    pub material: MaterialHandle,
    /// Extra offset in the containing wall's frame
    #[serde(default = "zero_offset")]
    pub offset: Vector3<f64>,
}

fn zero_offset() -> Vector3<f64> {
    Vector3::zeros()
}

impl StairSpec {
    pub fn new(
        steps: u32,
        step_width: f64,
        step_height: f64,
        step_depth: f64,
        material: MaterialHandle,
    ) -> Self {
        Self {
            steps,
            step_width,
            step_height,
            step_depth,
            material,
            offset: Vector3::zeros(),
        }
    }

    pub fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.offset = offset;
        self
    }

    /// Total rise
    pub fn rise(&self) -> f64 {
        self.steps as f64 * self.step_height
    }

    /// Total horizontal run
    pub fn run(&self) -> f64 {
        self.steps as f64 * self.step_depth
    }
}

/// One wall: box dimensions plus its openings and attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub material: MaterialHandle,
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
    #[serde(default)]
    pub windows: Vec<HoleSpec>,
    #[serde(default)]
    pub stair: Option<StairSpec>,
    /// Balcony not tied to a door
    #[serde(default)]
    pub balcony: Option<BalconySpec>,
    /// Standalone placement; floor assembly computes its own
    #[serde(default)]
    pub placement: Placement,
}

impl WallSpec {
    pub fn new(width: f64, height: f64, depth: f64, material: MaterialHandle) -> Self {
        Self {
            width,
            height,
            depth,
            material,
            doors: Vec::new(),
            windows: Vec::new(),
            stair: None,
            balcony: None,
            placement: Placement::identity(),
        }
    }

    pub fn with_door(mut self, door: DoorSpec) -> Self {
        self.doors.push(door);
        self
    }

    pub fn with_window(mut self, window: HoleSpec) -> Self {
        self.windows.push(window);
        self
    }

    pub fn with_stair(mut self, stair: StairSpec) -> Self {
        self.stair = Some(stair);
        self
    }

    pub fn with_balcony(mut self, balcony: BalconySpec) -> Self {
        self.balcony = Some(balcony);
        self
    }

    pub fn hole_count(&self) -> usize {
        self.doors.len() + self.windows.len()
    }

    /// Same wall cut down to a parapet: new height, no doors, balconies or stairs.
    /// Windows are kept.
    pub fn parapet(&self, height: f64) -> WallSpec {
        WallSpec {
            height,
            doors: Vec::new(),
            stair: None,
            balcony: None,
            ..self.clone()
        }
    }
}

/// The four walls of one enclosure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSpecs {
    pub front: WallSpec,
    pub left: WallSpec,
    pub right: WallSpec,
    pub back: WallSpec,
}

impl FloorSpecs {
    pub fn new(front: WallSpec, left: WallSpec, right: WallSpec, back: WallSpec) -> Self {
        Self {
            front,
            left,
            right,
            back,
        }
    }

    pub fn get(&self, side: WallSide) -> &WallSpec {
        match side {
            WallSide::Front => &self.front,
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
            WallSide::Back => &self.back,
        }
    }

    /// Walls in build order
    pub fn iter(&self) -> impl Iterator<Item = (WallSide, &WallSpec)> {
        WallSide::ALL.into_iter().map(move |side| (side, self.get(side)))
    }

    /// Apply `f` to each wall
    pub fn map<F>(&self, mut f: F) -> FloorSpecs
    where
        F: FnMut(&WallSpec) -> WallSpec,
    {
        FloorSpecs {
            front: f(&self.front),
            left: f(&self.left),
            right: f(&self.right),
            back: f(&self.back),
        }
    }

    /// Outer footprint (x extent, z extent) of the assembled enclosure
    pub fn footprint(&self) -> (f64, f64) {
        (self.front.width + self.left.depth, self.left.width)
    }
}

/// Everything a house build needs besides the floor count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseSpecs {
    pub floor: FloorSpecs,
    /// Walls the roof parapet is cut from
    pub roof: FloorSpecs,
    #[serde(default)]
    pub roof_box: Option<FloorSpecs>,
    /// Floor and roof slab material
    pub slab_material: MaterialHandle,
    #[serde(default)]
    pub interior_stair: bool,
}

impl HouseSpecs {
    pub fn wall_height(&self) -> f64 {
        self.floor.front.height
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
