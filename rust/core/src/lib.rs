// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Facade-Lite Core
//!
//! Facade panelization for building massings: every boundary segment of an
//! envelope's footprint is banded between consecutive floor levels, each band
//! is divided into panels of a target width, and the topmost band of every
//! segment receives a parapet.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use facade_lite_core::{sample_massing, FacadeConfig, Panelizer};
//!
//! let sample = sample_massing()?;
//! let panelizer = Panelizer::new(FacadeConfig::default());
//! let output = panelizer.execute(&sample.envelopes, &sample.levels)?;
//!
//! println!("{} panels, {} parapets", output.panel_count, output.parapets.len());
//! for diagnostic in &output.diagnostics {
//!     println!("skipped: {}", diagnostic.error);
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! Only an invalid [`FacadeConfig`] fails a run. Degenerate segments,
//! misaligned subdivisions and kernel failures skip the affected band, panel
//! or parapet and are reported as [`Diagnostic`]s.
//!
//! ## Geometry Kernel
//!
//! Solids are built through [`facade_lite_geometry::GeometryKernel`]; use
//! [`Panelizer::with_kernel`] to plug in another implementation.

pub mod config;
pub mod element;
pub mod error;
pub mod isolation;
pub mod levels;
pub mod model;
pub mod panel;
pub mod panelizer;
pub mod parapet;
pub mod sample;
pub mod tiler;

pub use config::{BevelProfile, FacadeConfig, PanelStyle};
pub use element::{ElementId, FacadeOutput, GlazingElement, Panel, ParapetWall};
pub use error::{Error, Result};
pub use isolation::{Diagnostic, FailureTarget, IterationScope};
pub use levels::{select_all, select_band_levels, sort_levels, BandLevels};
pub use model::{
    Band, BoundarySegment, Envelope, Level, Material, PanelPlacement, ParapetRequest, UP,
};
pub use panel::{panel_transform, BuiltPanel, PanelFactory, EDGE_SHRINK};
pub use panelizer::{execute, Panelizer};
pub use parapet::ParapetSynthesizer;
pub use sample::{ngon, sample_massing, SampleMassing};
pub use tiler::{BandTiling, SegmentTiler};
