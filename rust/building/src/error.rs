// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building assembly.

/// Result type alias for building operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a wall, floor, roof or house build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A width, height, depth or ratio is zero, negative or not finite.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A hole's footprint leaves its parent wall.
    #[error("{element} is out of bounds: {detail}")]
    SpecOutOfBounds { element: String, detail: String },

    /// Requested floor count is not an integer >= 1.
    #[error("invalid floor count: {0}")]
    InvalidFloorCount(String),

    /// Any other failure reported by the boolean engine.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Build configuration failed to load or validate.
    #[error("invalid build config: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn degenerate(detail: impl Into<String>) -> Self {
        Error::DegenerateGeometry(detail.into())
    }

    pub(crate) fn out_of_bounds(element: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::SpecOutOfBounds {
            element: element.into(),
            detail: detail.into(),
        }
    }
}

impl From<storey_geometry::Error> for Error {
    fn from(err: storey_geometry::Error) -> Self {
        match err {
            storey_geometry::Error::DegenerateGeometry(msg)
            | storey_geometry::Error::EmptyMesh(msg) => Error::DegenerateGeometry(msg),
            other => Error::Geometry(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
