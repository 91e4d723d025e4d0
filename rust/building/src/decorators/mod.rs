// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature decorators: small composite solids built from boxes with
//! nested boolean operations.

mod frame;
mod railing;
mod shutter;
mod stair;

pub use frame::build_frame;
pub use railing::{baluster_centers, baluster_layout, build_railing};
pub use shutter::{build_shutter_panel, build_shutters, slat_count};
pub use stair::build_stair;

/// Tolerance for flush-edge detection and bounds checks
pub(crate) const EDGE_EPSILON: f64 = 1e-9;

/// Extend an interval past any end that lies flush with the enclosing
/// interval, so a cutter never shares a face with the solid it cuts.
pub(crate) fn overshoot_flush(lo: f64, hi: f64, bound_lo: f64, bound_hi: f64, amount: f64) -> (f64, f64) {
    let lo = if (lo - bound_lo).abs() <= EDGE_EPSILON { lo - amount } else { lo };
    let hi = if (hi - bound_hi).abs() <= EDGE_EPSILON { hi + amount } else { hi };
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overshoot_only_flush_ends() {
        assert_eq!(overshoot_flush(0.0, 1.0, 0.0, 2.0, 0.5), (-0.5, 1.0));
        assert_eq!(overshoot_flush(1.0, 2.0, 0.0, 2.0, 0.5), (1.0, 2.5));
        assert_eq!(overshoot_flush(0.5, 1.5, 0.0, 2.0, 0.5), (0.5, 1.5));
    }
}
