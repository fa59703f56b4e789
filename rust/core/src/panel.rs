// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel realization: placement -> panel solid (+ glazing).
//!
//! Panels are modelled in a local frame whose X runs along the segment, Y
//! points up and Z is the extrusion axis. The local origin is the lower left
//! corner of the panel, so every outline spans `[0, width] x [0, height]`.

use facade_lite_geometry::transform::placement as placement_matrix;
use facade_lite_geometry::{
    create_inset_rectangle, create_rectangle, shrink, GeometryKernel, Matrix4, Mesh, Point2,
    Point3, Profile2D, Vector3, LENGTH_EPSILON,
};

use crate::config::{BevelProfile, FacadeConfig, PanelStyle};
use crate::element::{ElementId, GlazingElement, Panel};
use crate::error::Result;
use crate::model::PanelPlacement;

/// Distance the outer outline is pulled in so neighbouring panels never share an edge
pub const EDGE_SHRINK: f64 = 0.01;

/// Smallest frame left around a glazing opening; keeps the opening strictly
/// inside the shrunk outline.
const MIN_FRAME: f64 = 2.0 * EDGE_SHRINK;

/// A realized panel and its glazing pane, not yet numbered.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPanel {
    pub panel: Panel,
    pub glazing: Option<GlazingElement>,
}

/// Local-to-world transform of a panel: X along the segment, Z along
/// `direction x UP`, leaving Y as world up.
pub fn panel_transform(placement: &PanelPlacement) -> Result<Matrix4<f64>> {
    Ok(placement_matrix(
        placement.base_point,
        placement.direction,
        placement.normal,
    )?)
}

/// Builds panel solids through a [`GeometryKernel`].
pub struct PanelFactory<'a, K: ?Sized> {
    kernel: &'a K,
    config: &'a FacadeConfig,
}

impl<'a, K: GeometryKernel + ?Sized> PanelFactory<'a, K> {
    pub fn new(kernel: &'a K, config: &'a FacadeConfig) -> Self {
        Self { kernel, config }
    }

    /// Realize one placement in the configured style.
    pub fn build(&self, placement: &PanelPlacement) -> Result<BuiltPanel> {
        let transform = panel_transform(placement)?;
        let name = format!("FP_{}_{}", placement.band, placement.index);

        let (mesh, thickness, glazing) = match &self.config.panel_style {
            PanelStyle::Glazed => self.glazed(placement, &transform)?,
            PanelStyle::Bevelled(bevel) => {
                let mesh = self.bevelled(bevel, placement, &transform)?;
                (mesh, bevel.sill_depth, None)
            }
        };

        let panel = Panel {
            id: ElementId::default(),
            name,
            placement: *placement,
            thickness,
            material: self.config.panel_material.clone(),
            transform,
            mesh,
            glazed: glazing.is_some(),
            standard_width: (placement.width - self.config.panel_width).abs() <= LENGTH_EPSILON,
        };

        Ok(BuiltPanel { panel, glazing })
    }

    /// Ring profile extruded by the panel thickness, plus a flat pane in the opening.
    ///
    /// When the insets leave no room for an opening the panel is built solid
    /// and no pane is emitted.
    fn glazed(
        &self,
        placement: &PanelPlacement,
        transform: &Matrix4<f64>,
    ) -> Result<(Mesh, f64, Option<GlazingElement>)> {
        let (width, height) = (placement.width, placement.height);
        let thickness = self.config.panel_thickness;
        let outer = shrink(&create_rectangle(width, height), EDGE_SHRINK);

        let Some(opening) = self.opening(width, height) else {
            tracing::debug!(
                band = placement.band,
                panel = placement.index,
                width,
                height,
                "Panel too small for its glazing insets, building it solid"
            );
            let mesh = self
                .kernel
                .extrude(&Profile2D::new(outer), thickness, transform)?;
            return Ok((mesh, thickness, None));
        };

        let profile = Profile2D::with_hole(outer, opening.clone());
        let mesh = self.kernel.extrude(&profile, thickness, transform)?;

        let pane = self.kernel.face(&Profile2D::new(opening.clone()), transform)?;
        let glazing = GlazingElement {
            id: ElementId::default(),
            panel: ElementId::default(),
            name: format!("FG_{}_{}", placement.band, placement.index),
            outline: opening,
            material: self.config.glazing_material.clone(),
            transform: *transform,
            mesh: pane,
        };

        Ok((mesh, thickness, Some(glazing)))
    }

    /// The inset glazing rectangle, `None` when it would collapse.
    fn opening(&self, width: f64, height: f64) -> Option<Vec<Point2<f64>>> {
        let x_inset = self.config.glass_left_right_inset.max(MIN_FRAME);
        let y_inset = self.config.glass_top_bottom_inset.max(MIN_FRAME);

        if width - 2.0 * x_inset <= LENGTH_EPSILON || height - 2.0 * y_inset <= LENGTH_EPSILON {
            return None;
        }
        Some(create_inset_rectangle(width, height, x_inset, y_inset))
    }

    /// Bevel section swept along the four panel edges.
    fn bevelled(
        &self,
        bevel: &BevelProfile,
        placement: &PanelPlacement,
        transform: &Matrix4<f64>,
    ) -> Result<Mesh> {
        let section = bevel_section(bevel);
        let (w, h, gap) = (placement.width, placement.height, bevel.gap);

        let ll = Point3::new(0.0, 0.0, 0.0);
        let lr = Point3::new(w, 0.0, 0.0);
        let ur = Point3::new(w, h, 0.0);
        let ul = Point3::new(0.0, h, 0.0);
        let shift = Vector3::new(gap, 0.0, 0.0);

        let edges = [
            [lr, ll],
            [lr + shift, ur + shift],
            [ul, ur],
            [ul - shift, ll - shift],
        ];

        let mut mesh = Mesh::new();
        for path in &edges {
            let member = self.kernel.sweep(&section, path, Vector3::z(), transform)?;
            mesh.merge(&member);
        }
        Ok(mesh)
    }
}

/// ```text
///  d ---- c
///  |       \
///  |        b
///  o ------ a
/// ```
fn bevel_section(bevel: &BevelProfile) -> Profile2D {
    let BevelProfile {
        sill_depth,
        frame_depth,
        slope_height,
        sill_height,
        ..
    } = *bevel;
    let top = slope_height + sill_height;

    Profile2D::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(frame_depth, 0.0),
        Point2::new(frame_depth, sill_height),
        Point2::new(sill_depth, top),
        Point2::new(0.0, top),
    ])
}
