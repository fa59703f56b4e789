// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mitred offset of closed polygons

use crate::error::{Error, Result};
use crate::profile::signed_area;
use nalgebra::{Point2, Vector2};

/// Maximum miter length as a multiple of `|distance|` before the corner is
/// clamped back along the bisector.
const MITER_LIMIT: f64 = 4.0;

/// Offset a closed polygon by `distance`
///
/// Positive distances grow the polygon and negative distances shrink it,
/// whichever way the input winds. Each vertex moves along the bisector of its
/// two edge normals so that both adjacent edges end up exactly `distance`
/// away. The result keeps the input's vertex order and winding.
pub fn offset_polygon(polygon: &[Point2<f64>], distance: f64) -> Result<Vec<Point2<f64>>> {
    if polygon.len() < 3 {
        return Err(Error::InvalidProfile(
            "offset needs at least 3 vertices".to_string(),
        ));
    }

    let area = signed_area(polygon);
    if area.abs() < 1e-12 {
        return Err(Error::Degenerate("cannot offset a zero-area polygon".to_string()));
    }

    // Right-hand normals point outward for counter-clockwise loops
    let outward = if area > 0.0 { 1.0 } else { -1.0 };
    let n = polygon.len();

    let normals = (0..n)
        .map(|i| {
            let edge = polygon[(i + 1) % n] - polygon[i];
            Vector2::new(edge.y, -edge.x)
                .try_normalize(1e-12)
                .map(|normal| normal * outward)
                .ok_or_else(|| {
                    Error::Degenerate(format!("polygon edge {i} has zero length"))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let result: Vec<Point2<f64>> = (0..n)
        .map(|i| {
            let before = normals[(i + n - 1) % n];
            let after = normals[i];
            let miter = match (before + after).try_normalize(1e-9) {
                Some(bisector) => {
                    let scale = (1.0 / bisector.dot(&after)).min(MITER_LIMIT);
                    bisector * (distance * scale)
                }
                // Hairpin: the two edges fold back onto each other
                None => after * distance,
            };
            polygon[i] + miter
        })
        .collect();

    // An inset past the inradius turns edges around without flipping winding
    let flipped = (0..n).any(|i| {
        let before = polygon[(i + 1) % n] - polygon[i];
        let after = result[(i + 1) % n] - result[i];
        before.dot(&after) <= 0.0
    });
    let new_area = signed_area(&result);
    if flipped || new_area.abs() < 1e-12 || new_area.signum() != area.signum() {
        return Err(Error::Degenerate(format!(
            "offset by {distance} collapses the polygon"
        )));
    }

    Ok(result)
}
