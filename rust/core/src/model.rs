// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input entities and the derived geometry the tiler works with.

use facade_lite_geometry::{Line3, LENGTH_EPSILON};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Global up axis; panel orientation is always derived from it.
pub const UP: Vector3<f64> = Vector3::new(0.0, 0.0, 1.0);

/// Opaque material token attached to generated elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Material {
    pub fn new(name: impl Into<String>, color: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Opaque white panel finish
    pub fn envelope() -> Self {
        Self::new("envelope", [1.0, 1.0, 1.0, 1.0])
    }

    /// Translucent white glass
    pub fn glazing() -> Self {
        Self::new("Glazing", [1.0, 1.0, 1.0, 0.7])
    }
}

/// A vertical massing volume: a planar footprint extruded over an elevation range.
///
/// Envelopes are read-only inputs; the footprint is a closed polygon given
/// in plan without repeating the first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub name: String,
    pub footprint: Vec<Point2<f64>>,
    pub elevation: f64,
    pub height: f64,
    pub extrusion_direction: Vector3<f64>,
}

impl Envelope {
    /// Envelope extruded straight up
    pub fn new(footprint: Vec<Point2<f64>>, elevation: f64, height: f64) -> Self {
        Self {
            name: "envelope".to_string(),
            footprint,
            elevation,
            height,
            extrusion_direction: UP,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Elevation of the envelope's top face
    #[inline]
    pub fn top(&self) -> f64 {
        self.elevation + self.height
    }

    /// Whether `elevation` lies within `[elevation, elevation + height]`
    #[inline]
    pub fn spans(&self, elevation: f64) -> bool {
        elevation >= self.elevation && elevation <= self.top()
    }

    /// Footprint edges in order, including the closing edge back to vertex 0
    pub fn segments(&self) -> impl Iterator<Item = BoundarySegment> + '_ {
        let n = self.footprint.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |index| BoundarySegment {
            index,
            start: self.footprint[index],
            end: self.footprint[(index + 1) % n],
        })
    }
}

/// A horizontal floor plane used to band the facade.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub elevation: f64,
}

impl Level {
    pub fn new(id: u32, name: impl Into<String>, elevation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            elevation,
        }
    }
}

/// One footprint edge in plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySegment {
    pub index: usize,
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl BoundarySegment {
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction in plan, `None` for a zero-length edge
    pub fn direction(&self) -> Option<Vector3<f64>> {
        let d = self.end - self.start;
        if d.norm() <= LENGTH_EPSILON {
            return None;
        }
        Vector3::new(d.x, d.y, 0.0).try_normalize(0.0)
    }

    /// The segment lifted to `elevation`
    #[inline]
    pub fn at_elevation(&self, elevation: f64) -> Line3 {
        Line3::new(
            Point3::new(self.start.x, self.start.y, elevation),
            Point3::new(self.end.x, self.end.y, elevation),
        )
    }
}

/// Two adjacent levels bounding one strip of panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band<'a> {
    /// Position in the envelope's band list
    pub index: usize,
    pub lower: &'a Level,
    pub upper: &'a Level,
    /// Whether `upper` is the envelope's topmost level
    pub is_top: bool,
}

impl Band<'_> {
    #[inline]
    pub fn height(&self) -> f64 {
        self.upper.elevation - self.lower.elevation
    }
}

/// Position, size and orientation of one panel before solid construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    /// Band index within the envelope
    pub band: usize,
    /// Position along the segment within the band
    pub index: usize,
    pub width: f64,
    pub height: f64,
    /// Start of the bottom sub-span
    pub base_point: Point3<f64>,
    /// Segment direction, the panel's local X
    pub direction: Vector3<f64>,
    /// `direction x UP`, the panel's local Z and extrusion axis; local Y
    /// comes out as world up
    pub normal: Vector3<f64>,
}

/// A request for a parapet along a segment's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParapetRequest {
    pub segment: usize,
    /// The segment at the topmost level's elevation
    pub line: Line3,
}
