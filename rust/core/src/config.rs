// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panelization settings.
//!
//! Every field has a default, so a partial JSON document such as
//! `{"panelWidth": 1.5}` is a complete configuration.

use facade_lite_geometry::LENGTH_EPSILON;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Material;

/// Settings for one panelization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacadeConfig {
    /// Target panel width; runs are divided into spans of exactly this width
    /// with a shorter remainder at the end.
    pub panel_width: f64,
    pub glass_left_right_inset: f64,
    pub glass_top_bottom_inset: f64,
    pub panel_thickness: f64,
    pub parapet_height: f64,
    pub parapet_thickness: f64,
    pub panel_material: Material,
    pub glazing_material: Material,
    pub panel_style: PanelStyle,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            panel_width: 4.0,
            glass_left_right_inset: 0.1,
            glass_top_bottom_inset: 0.1,
            panel_thickness: 0.1,
            parapet_height: 0.9,
            parapet_thickness: 0.1,
            panel_material: Material::envelope(),
            glazing_material: Material::glazing(),
            panel_style: PanelStyle::Glazed,
        }
    }
}

impl FacadeConfig {
    /// Parse a configuration from JSON, then validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_panel_width(mut self, panel_width: f64) -> Self {
        self.panel_width = panel_width;
        self
    }

    pub fn with_insets(mut self, left_right: f64, top_bottom: f64) -> Self {
        self.glass_left_right_inset = left_right;
        self.glass_top_bottom_inset = top_bottom;
        self
    }

    pub fn with_style(mut self, style: PanelStyle) -> Self {
        self.panel_style = style;
        self
    }

    /// Check the preconditions every run relies on.
    pub fn validate(&self) -> Result<()> {
        positive("panelWidth", self.panel_width)?;
        if self.panel_width <= LENGTH_EPSILON {
            return Err(Error::InvalidConfig(format!(
                "panelWidth must exceed {LENGTH_EPSILON}, got {}",
                self.panel_width
            )));
        }
        positive("panelThickness", self.panel_thickness)?;
        positive("parapetHeight", self.parapet_height)?;
        positive("parapetThickness", self.parapet_thickness)?;
        non_negative("glassLeftRightInset", self.glass_left_right_inset)?;
        non_negative("glassTopBottomInset", self.glass_top_bottom_inset)?;

        if let PanelStyle::Bevelled(bevel) = &self.panel_style {
            bevel.validate()?;
        }
        Ok(())
    }
}

/// Panel silhouette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelStyle {
    /// Flat panel with an inset glazing opening.
    #[default]
    Glazed,
    /// Frame of a bevelled sill section swept around the panel edges.
    Bevelled(BevelProfile),
}

/// Bevelled frame section.
///
/// ```text
///  d ---- c        sill_depth   = |dc|
///  |       \       slope_height = rise from b to c
///  |        b      sill_height  = |ab|
///  o ------ a      frame_depth  = |oa|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BevelProfile {
    pub sill_depth: f64,
    pub frame_depth: f64,
    pub slope_height: f64,
    pub sill_height: f64,
    /// Offset of the vertical members away from the panel's side edges
    pub gap: f64,
}

impl Default for BevelProfile {
    fn default() -> Self {
        Self {
            sill_depth: 0.1,
            frame_depth: 0.4,
            slope_height: 0.3,
            sill_height: 0.05,
            gap: 0.05,
        }
    }
}

impl BevelProfile {
    pub fn validate(&self) -> Result<()> {
        positive("sillDepth", self.sill_depth)?;
        positive("frameDepth", self.frame_depth)?;
        positive("slopeHeight", self.slope_height)?;
        positive("sillHeight", self.sill_height)?;
        positive("gap", self.gap)?;
        if self.frame_depth <= self.sill_depth {
            return Err(Error::InvalidConfig(format!(
                "frameDepth ({}) must exceed sillDepth ({})",
                self.frame_depth, self.sill_depth
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must not be negative, got {value}"
        )))
    }
}
