// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Error, Result};
use crate::spec::StairSpec;
use storey_geometry::{add_all, Solid, Vector3};

/// Straight flight of step boxes unioned into one solid.
///
/// Stair space: the first step stands on y = 0 centered at the origin; each
/// further step rises by `step_height` and recedes by `step_depth` toward -Z.
/// The caller places and turns the result.
pub fn build_stair(spec: &StairSpec) -> Result<Solid> {
    if spec.steps == 0 {
        return Err(Error::degenerate("stair needs at least one step"));
    }

    let step = |i: u32| {
        let i = i as f64;
        Solid::cuboid_anchored(
            spec.step_width,
            spec.step_height,
            spec.step_depth,
            Vector3::new(
                0.0,
                spec.step_height / 2.0 + i * spec.step_height,
                -i * spec.step_depth,
            ),
            spec.material.clone(),
        )
    };

    let first = step(0)?;
    let rest = (1..spec.steps).map(step).collect::<storey_geometry::Result<Vec<_>>>()?;
    Ok(add_all(first, rest)?)
}
