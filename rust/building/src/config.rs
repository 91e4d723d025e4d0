// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build configuration: the fixed dimensions every house build shares.
//!
//! All lengths are in model units (one unit per meter in the presets).
//! Missing JSON fields fall back to the defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Floor slab thickness.
    pub floor_thickness: f64,
    /// Wall height of the roof parapet ring.
    pub parapet_height: f64,
    /// Thickness of the flat roof slab.
    pub roof_slab_thickness: f64,
    /// Roof elevation above the top floor, as a fraction of the wall height.
    pub roof_offset_ratio: f64,
    /// Elevation of the ground floor's floor line.
    pub baseline: f64,
    /// Multiplier applied to the wall depth for hole cutters (must exceed 1).
    pub hole_depth_margin: f64,
    /// Gap between a wall's outer face and its exterior stair.
    pub stair_clearance: f64,
    pub interior_stair: InteriorStairConfig,
    /// Railing used on the roof when no roof box sets its height.
    pub railing: RailingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteriorStairConfig {
    pub steps: u32,
    pub step_width: f64,
    pub step_depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailingConfig {
    pub height: f64,
    /// Nominal distance between balusters.
    pub spacing: f64,
    pub rail_thickness: f64,
    pub baluster_thickness: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            floor_thickness: 0.1,
            parapet_height: 1.0,
            roof_slab_thickness: 0.1,
            roof_offset_ratio: 0.25,
            baseline: 0.0,
            hole_depth_margin: 1.2,
            stair_clearance: 0.1,
            interior_stair: InteriorStairConfig::default(),
            railing: RailingConfig::default(),
        }
    }
}

impl Default for InteriorStairConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            step_width: 1.0,
            step_depth: 0.5,
        }
    }
}

impl Default for RailingConfig {
    fn default() -> Self {
        Self {
            height: 1.0,
            spacing: 0.25,
            rail_thickness: 0.08,
            baluster_thickness: 0.04,
        }
    }
}

impl BuildConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that would produce degenerate solids.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("floor_thickness", self.floor_thickness),
            ("parapet_height", self.parapet_height),
            ("roof_slab_thickness", self.roof_slab_thickness),
            ("interior_stair.step_width", self.interior_stair.step_width),
            ("interior_stair.step_depth", self.interior_stair.step_depth),
            ("railing.height", self.railing.height),
            ("railing.spacing", self.railing.spacing),
            ("railing.rail_thickness", self.railing.rail_thickness),
            ("railing.baluster_thickness", self.railing.baluster_thickness),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("roof_offset_ratio", self.roof_offset_ratio),
            ("stair_clearance", self.stair_clearance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Config(format!("{} must not be negative, got {}", name, value)));
            }
        }

        if !self.baseline.is_finite() {
            return Err(Error::Config("baseline must be finite".into()));
        }
        if !(self.hole_depth_margin.is_finite() && self.hole_depth_margin > 1.0) {
            return Err(Error::Config(format!(
                "hole_depth_margin must exceed 1, got {}",
                self.hole_depth_margin
            )));
        }
        if self.interior_stair.steps == 0 {
            return Err(Error::Config("interior_stair.steps must be at least 1".into()));
        }
        Ok(())
    }
}
