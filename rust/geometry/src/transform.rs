// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement transforms
//!
//! A placement maps element-local coordinates to world coordinates from an
//! origin, a local X direction and a local Z direction, the same convention
//! an `IfcAxis2Placement3D` uses.

use crate::error::{Error, Result};
use nalgebra::{Matrix4, Point3, Vector3};

/// Build a local-to-world matrix from an origin and two axis hints
///
/// `x_axis` is projected onto the plane perpendicular to `z_axis`; the local Y
/// axis completes the right-handed frame (`Y = Z x X`).
pub fn placement(
    origin: Point3<f64>,
    x_axis: Vector3<f64>,
    z_axis: Vector3<f64>,
) -> Result<Matrix4<f64>> {
    let z = z_axis
        .try_normalize(1e-12)
        .ok_or_else(|| Error::Degenerate("placement Z axis has zero length".to_string()))?;
    let x = x_axis
        .try_normalize(1e-12)
        .ok_or_else(|| Error::Degenerate("placement X axis has zero length".to_string()))?;

    let x = (x - z * x.dot(&z))
        .try_normalize(1e-6)
        .ok_or_else(|| Error::Degenerate("placement X and Z axes are parallel".to_string()))?;
    let y = z.cross(&x).normalize();

    Ok(frame_matrix(origin, x, y, z))
}

/// Assemble a matrix whose columns are the world directions of the local axes
#[inline]
pub fn frame_matrix(
    origin: Point3<f64>,
    x: Vector3<f64>,
    y: Vector3<f64>,
    z: Vector3<f64>,
) -> Matrix4<f64> {
    Matrix4::new(
        x.x, y.x, z.x, origin.x, //
        x.y, y.y, z.y, origin.y, //
        x.z, y.z, z.z, origin.z, //
        0.0, 0.0, 0.0, 1.0,
    )
}
