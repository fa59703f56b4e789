// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile sweeps along polyline paths.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Sweep a closed profile along a polyline
///
/// At every path vertex the profile is placed in the plane perpendicular to
/// the path tangent: profile Y follows `up` (projected off the tangent) and
/// profile X completes the frame so that X, Y and the tangent are
/// right-handed. Consecutive rings are bridged with flat quads and both ends
/// are capped with the profile's triangulation.
pub fn sweep_profile(
    profile: &Profile2D,
    path: &[Point3<f64>],
    up: Vector3<f64>,
    transform: Option<&Matrix4<f64>>,
) -> Result<Mesh> {
    if path.len() < 2 {
        return Err(Error::InvalidPath(format!(
            "sweep path needs at least 2 points, got {}",
            path.len()
        )));
    }
    if path.windows(2).any(|w| (w[1] - w[0]).norm() < 1e-9) {
        return Err(Error::InvalidPath(
            "sweep path has a zero-length segment".to_string(),
        ));
    }

    let triangulation = profile.triangulate()?;

    let last = path.len() - 1;
    let frames = (0..path.len())
        .map(|i| {
            let tangent = if i == 0 {
                path[1] - path[0]
            } else if i == last {
                path[last] - path[last - 1]
            } else {
                (path[i] - path[i - 1]).normalize() + (path[i + 1] - path[i]).normalize()
            };
            section_frame(tangent, up)
        })
        .collect::<Result<Vec<_>>>()?;

    let place = |i: usize, p: &Point2<f64>| {
        let (x, y, _) = frames[i];
        path[i] + x * p.x + y * p.y
    };

    let mut mesh = Mesh::new();

    let loops = std::iter::once(&profile.outer).chain(profile.holes.iter());
    for boundary in loops {
        let n = boundary.len();
        for i in 0..last {
            for k in 0..n {
                let q0 = &boundary[k];
                let q1 = &boundary[(k + 1) % n];

                let a0 = place(i, q0);
                let a1 = place(i, q1);
                let b1 = place(i + 1, q1);
                let b0 = place(i + 1, q0);

                let normal = match (a1 - a0).cross(&(b0 - a0)).try_normalize(1e-12) {
                    Some(n) => n,
                    None => continue,
                };

                let idx = mesh.vertex_count() as u32;
                mesh.add_vertex(a0, normal);
                mesh.add_vertex(a1, normal);
                mesh.add_vertex(b1, normal);
                mesh.add_vertex(b0, normal);
                mesh.add_triangle(idx, idx + 1, idx + 2);
                mesh.add_triangle(idx, idx + 2, idx + 3);
            }
        }
    }

    // Start cap faces back along the path, end cap forward
    for (ring, forward) in [(0, false), (last, true)] {
        let normal = if forward { frames[ring].2 } else { -frames[ring].2 };
        let base = mesh.vertex_count() as u32;
        for p in &triangulation.points {
            mesh.add_vertex(place(ring, p), normal);
        }
        for tri in triangulation.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as u32, tri[1] as u32, tri[2] as u32);
            if forward {
                mesh.add_triangle(base + i0, base + i1, base + i2);
            } else {
                mesh.add_triangle(base + i0, base + i2, base + i1);
            }
        }
    }

    if let Some(mat) = transform {
        mesh.transform(mat);
    }

    Ok(mesh)
}

/// Section axes (x, y, tangent) for one ring
fn section_frame(
    tangent: Vector3<f64>,
    up: Vector3<f64>,
) -> Result<(Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
    let t = tangent
        .try_normalize(1e-12)
        .ok_or_else(|| Error::InvalidPath("sweep path folds back on itself".to_string()))?;

    // Fall back to a world axis when `up` runs along the path
    let reference = if up.cross(&t).norm() > 1e-6 {
        up
    } else if t.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };

    let y = (reference - t * reference.dot(&t)).normalize();
    let x = y.cross(&t);
    Ok((x, y, t))
}
