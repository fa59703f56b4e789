// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generated elements and the append-only output model.

use facade_lite_geometry::{Line3, Mesh};
use nalgebra::{Matrix4, Point2};

use crate::isolation::Diagnostic;
use crate::model::{Material, PanelPlacement};

/// Sequential element id, unique within one [`FacadeOutput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// A facade panel solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: ElementId,
    /// `FP_{band}_{index}`
    pub name: String,
    pub placement: PanelPlacement,
    pub thickness: f64,
    pub material: Material,
    /// Panel-local to world
    pub transform: Matrix4<f64>,
    /// World-space representation
    pub mesh: Mesh,
    /// Whether the panel has a glazing opening
    pub glazed: bool,
    /// Whether the width equals the target panel width (not a remainder)
    pub standard_width: bool,
}

/// Flat glass pane filling a panel's opening.
#[derive(Debug, Clone, PartialEq)]
pub struct GlazingElement {
    pub id: ElementId,
    /// Id of the panel the pane sits in
    pub panel: ElementId,
    pub name: String,
    /// Opening outline in panel-local coordinates
    pub outline: Vec<Point2<f64>>,
    pub material: Material,
    pub transform: Matrix4<f64>,
    pub mesh: Mesh,
}

/// Low wall along the top edge of a boundary segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParapetWall {
    pub id: ElementId,
    pub name: String,
    /// Base line at the topmost level's elevation
    pub line: Line3,
    pub thickness: f64,
    pub height: f64,
    pub material: Material,
    pub transform: Matrix4<f64>,
    pub mesh: Mesh,
}

/// Everything one run produced.
///
/// Elements are only ever appended; [`FacadeOutput::absorb`] renumbers the
/// incoming elements so ids follow insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacadeOutput {
    pub panels: Vec<Panel>,
    pub glazing: Vec<GlazingElement>,
    pub parapets: Vec<ParapetWall>,
    /// Number of panels successfully built
    pub panel_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    next_id: u32,
}

impl FacadeOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a panel and its optional glazing, returning the panel's id.
    pub fn add_panel(&mut self, mut panel: Panel, glazing: Option<GlazingElement>) -> ElementId {
        panel.id = self.next_id();
        let panel_id = panel.id;
        self.panels.push(panel);
        self.panel_count += 1;

        if let Some(mut pane) = glazing {
            pane.id = self.next_id();
            pane.panel = panel_id;
            self.glazing.push(pane);
        }
        panel_id
    }

    pub fn add_parapet(&mut self, mut parapet: ParapetWall) -> ElementId {
        parapet.id = self.next_id();
        let id = parapet.id;
        self.parapets.push(parapet);
        id
    }

    /// Move another output's elements and diagnostics into this one.
    pub fn absorb(&mut self, other: FacadeOutput) {
        let FacadeOutput {
            panels,
            glazing,
            parapets,
            diagnostics,
            ..
        } = other;

        let mut panes = glazing.into_iter().peekable();
        for panel in panels {
            let old_id = panel.id;
            let mut pane = None;
            if panes.peek().is_some_and(|g| g.panel == old_id) {
                pane = panes.next();
            }
            self.add_panel(panel, pane);
        }
        for parapet in parapets {
            self.add_parapet(parapet);
        }
        self.diagnostics.extend(diagnostics);
    }

    /// Total number of generated elements
    pub fn element_count(&self) -> usize {
        self.panels.len() + self.glazing.len() + self.parapets.len()
    }
}
