// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Profile definitions and triangulation

use crate::error::{Error, Result};
use nalgebra::{Point2, Vector2};

/// 2D Profile with optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    /// Outer boundary (counter-clockwise)
    pub outer: Vec<Point2<f64>>,
    /// Holes (clockwise)
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Profile2D {
    /// Create a new profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Create a profile with a single hole, normalizing both windings
    pub fn with_hole(outer: Vec<Point2<f64>>, hole: Vec<Point2<f64>>) -> Self {
        let mut profile = Self::new(outer);
        profile.add_hole(hole);
        profile
    }

    /// Add a hole to the profile
    pub fn add_hole(&mut self, mut hole: Vec<Point2<f64>>) {
        if signed_area(&hole) > 0.0 {
            hole.reverse();
        }
        self.holes.push(hole);
    }

    /// Triangulate the profile using earcutr
    /// Returns triangle indices into the flattened vertex array
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        let holes: Vec<&Vec<Point2<f64>>> = self.holes.iter().filter(|h| h.len() >= 3).collect();

        let mut points = Vec::with_capacity(
            self.outer.len() + holes.iter().map(|h| h.len()).sum::<usize>(),
        );
        points.extend_from_slice(&self.outer);

        // Convex outlines without holes fan out from the first vertex
        if holes.is_empty() && is_convex(&self.outer) {
            let indices = (1..self.outer.len() - 1)
                .flat_map(|i| [0, i, i + 1])
                .collect();
            return Ok(Triangulation { points, indices });
        }

        let mut hole_indices = Vec::with_capacity(holes.len());
        for hole in holes {
            hole_indices.push(points.len());
            points.extend_from_slice(hole);
        }

        let vertices: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = earcutr::earcut(&vertices, &hole_indices, 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        if indices.is_empty() {
            return Err(Error::TriangulationError(
                "earcut produced no triangles".to_string(),
            ));
        }

        Ok(Triangulation { points, indices })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// All vertices (outer + holes)
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Create a rectangle anchored at the origin, spanning `[0, width] x [0, height]`
///
/// Vertices run counter-clockwise from the lower left corner.
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Vec<Point2<f64>> {
    create_inset_rectangle(width, height, 0.0, 0.0)
}

/// Create a rectangle inset from `[0, width] x [0, height]` by the given margins
#[inline]
pub fn create_inset_rectangle(
    width: f64,
    height: f64,
    x_inset: f64,
    y_inset: f64,
) -> Vec<Point2<f64>> {
    vec![
        Point2::new(x_inset, y_inset),
        Point2::new(width - x_inset, y_inset),
        Point2::new(width - x_inset, height - y_inset),
        Point2::new(x_inset, height - y_inset),
    ]
}

/// Move every vertex towards the vertex average by `distance`
///
/// Vertices closer to the average than `distance` collapse onto it.
pub fn shrink(points: &[Point2<f64>], distance: f64) -> Vec<Point2<f64>> {
    if points.is_empty() {
        return Vec::new();
    }

    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.coords);
    let center = Point2::from(sum / points.len() as f64);

    points
        .iter()
        .map(|p| {
            let to_center = center - p;
            let len = to_center.norm();
            if len <= distance {
                center
            } else {
                p + to_center * (distance / len)
            }
        })
        .collect()
}

/// Check if a polygon is convex (all turns share one sign)
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    let mut sign = 0.0_f64;

    for i in 0..n {
        let p0 = points[i];
        let p1 = points[(i + 1) % n];
        let p2 = points[(i + 2) % n];
        let cross = (p1 - p0).perp(&(p2 - p1));

        if cross.abs() > 1e-10 {
            if sign == 0.0 {
                sign = cross.signum();
            } else if sign != cross.signum() {
                return false;
            }
        }
    }

    sign != 0.0
}

/// Signed area of a closed polygon (positive when counter-clockwise)
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let p0 = points[i];
            let p1 = points[(i + 1) % n];
            p0.x * p1.y - p1.x * p0.y
        })
        .sum();
    twice / 2.0
}
