// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment tiling: boundary segment x band -> panel placements.

use facade_lite_geometry::{GeometryKernel, LENGTH_EPSILON};

use crate::error::{Error, Result};
use crate::model::{Band, BoundarySegment, PanelPlacement, ParapetRequest, UP};

/// Placements produced for one (segment, band) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTiling {
    /// One entry per bottom sub-span, in order along the segment. A bottom
    /// sub-span without a top counterpart is an `Err`.
    pub placements: Vec<Result<PanelPlacement>>,
    /// Present when the band is the envelope's topmost
    pub parapet: Option<ParapetRequest>,
}

/// Lays out panels over one boundary segment, band by band.
pub struct SegmentTiler<'k, K: ?Sized> {
    kernel: &'k K,
    panel_width: f64,
}

impl<'k, K: GeometryKernel + ?Sized> SegmentTiler<'k, K> {
    pub fn new(kernel: &'k K, panel_width: f64) -> Self {
        Self {
            kernel,
            panel_width,
        }
    }

    /// Tile one band of one segment.
    ///
    /// The bottom and top edges of the band are divided independently from
    /// the segment's start point; bottom sub-span `j` and top sub-span `j`
    /// bound panel `j`.
    pub fn tile(&self, segment: &BoundarySegment, band: &Band<'_>) -> Result<BandTiling> {
        let direction = segment.direction().ok_or_else(|| {
            Error::DegenerateGeometry(format!(
                "boundary segment {} has zero length",
                segment.index
            ))
        })?;

        let height = band.height();
        if !(height > LENGTH_EPSILON) {
            return Err(Error::DegenerateGeometry(format!(
                "band {} between levels '{}' and '{}' has no height",
                band.index, band.lower.name, band.upper.name
            )));
        }

        let bottom = segment.at_elevation(band.lower.elevation);
        let top = segment.at_elevation(band.upper.elevation);

        let top_spans = self
            .kernel
            .divide(&top, self.panel_width)
            .map_err(subdivision_error)?;
        let bottom_spans = self
            .kernel
            .divide(&bottom, self.panel_width)
            .map_err(subdivision_error)?;

        if bottom_spans.is_empty() {
            return Err(Error::DegenerateGeometry(format!(
                "segment {} produced no sub-spans",
                segment.index
            )));
        }

        let normal = direction.cross(&UP);
        let placements = bottom_spans
            .iter()
            .enumerate()
            .map(|(index, span)| {
                if index >= top_spans.len() {
                    return Err(Error::MisalignedBands {
                        index,
                        top_count: top_spans.len(),
                    });
                }
                Ok(PanelPlacement {
                    band: band.index,
                    index,
                    width: span.length(),
                    height,
                    base_point: span.start,
                    direction,
                    normal,
                })
            })
            .collect();

        let parapet = band.is_top.then_some(ParapetRequest {
            segment: segment.index,
            line: top,
        });

        Ok(BandTiling {
            placements,
            parapet,
        })
    }
}

fn subdivision_error(error: facade_lite_geometry::Error) -> Error {
    match error {
        facade_lite_geometry::Error::Degenerate(message) => Error::DegenerateGeometry(message),
        other => Error::Kernel(other),
    }
}
