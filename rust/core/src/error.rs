// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for facade panelization.

use thiserror::Error;

/// Result type alias for panelization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while panelizing a facade.
///
/// Only [`Error::InvalidConfig`] ever escapes [`crate::Panelizer::execute`];
/// the other kinds are recorded per iteration as [`crate::Diagnostic`]s.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The configuration violates a precondition.
    #[error("invalid facade configuration: {0}")]
    InvalidConfig(String),

    /// Zero-length segments, zero-height bands or empty subdivisions.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A bottom sub-span has no top sub-span at the same position.
    #[error("misaligned bands: bottom sub-span {index} has no top match ({top_count} at top)")]
    MisalignedBands { index: usize, top_count: usize },

    /// The geometry kernel failed to build a solid.
    #[error("geometry kernel failure: {0}")]
    Kernel(#[from] facade_lite_geometry::Error),
}
