// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or combining solids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Empty mesh: {0}")]
    EmptyMesh(String),
}

impl Error {
    /// Shorthand used by box constructors when an extent is not a positive finite number
    pub(crate) fn degenerate_extent(what: &str, width: f64, height: f64, depth: f64) -> Self {
        Error::DegenerateGeometry(format!(
            "{} has non-positive extent ({} x {} x {})",
            what, width, height, depth
        ))
    }
}
