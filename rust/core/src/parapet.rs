// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parapet walls along the top edge of each envelope segment.

use facade_lite_geometry::transform::placement as placement_matrix;
use facade_lite_geometry::{GeometryKernel, Point2, Profile2D};

use crate::config::FacadeConfig;
use crate::element::{ElementId, ParapetWall};
use crate::error::{Error, Result};
use crate::model::{ParapetRequest, UP};

/// Turns parapet requests into wall solids.
pub struct ParapetSynthesizer<'a, K: ?Sized> {
    kernel: &'a K,
    config: &'a FacadeConfig,
}

impl<'a, K: GeometryKernel + ?Sized> ParapetSynthesizer<'a, K> {
    pub fn new(kernel: &'a K, config: &'a FacadeConfig) -> Self {
        Self { kernel, config }
    }

    /// Build a wall centred on the request line, rising from its elevation.
    pub fn build(&self, request: &ParapetRequest) -> Result<ParapetWall> {
        let line = request.line;
        let length = line.length();
        let direction = line.direction().ok_or_else(|| {
            Error::DegenerateGeometry(format!(
                "parapet line of segment {} has zero length",
                request.segment
            ))
        })?;

        let thickness = self.config.parapet_thickness;
        let height = self.config.parapet_height;
        let half = thickness / 2.0;

        let footprint = Profile2D::new(vec![
            Point2::new(0.0, -half),
            Point2::new(length, -half),
            Point2::new(length, half),
            Point2::new(0.0, half),
        ]);

        let transform = placement_matrix(line.start, direction, UP)?;
        let mesh = self.kernel.extrude(&footprint, height, &transform)?;

        Ok(ParapetWall {
            id: ElementId::default(),
            name: format!("Parapet_{}", request.segment),
            line,
            thickness,
            height,
            material: self.config.panel_material.clone(),
            transform,
            mesh,
        })
    }
}
