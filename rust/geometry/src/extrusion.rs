// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a 2D profile along its local Z axis
///
/// The profile lies in the local XY plane; the solid spans `z in [0, depth]`.
/// When a transform is given the finished mesh is mapped through it.
#[inline]
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<&Matrix4<f64>>,
) -> Result<Mesh> {
    if !(depth > 0.0) || !depth.is_finite() {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {depth}"
        )));
    }

    let triangulation = profile.triangulate()?;

    let boundary_vertices =
        profile.outer.len() + profile.holes.iter().map(|h| h.len()).sum::<usize>();
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + boundary_vertices * 4,
        triangulation.indices.len() * 2 + boundary_vertices * 6,
    );

    create_cap_mesh(&triangulation, 0.0, false, &mut mesh);
    create_cap_mesh(&triangulation, depth, true, &mut mesh);

    create_side_walls(&profile.outer, depth, &mut mesh);
    for hole in &profile.holes {
        create_side_walls(hole, depth, &mut mesh);
    }

    if let Some(mat) = transform {
        mesh.transform(mat);
    }

    Ok(mesh)
}

/// Triangulate a profile as a single flat face at local z = 0
///
/// The face points along local +Z.
pub fn face_profile(profile: &Profile2D, transform: Option<&Matrix4<f64>>) -> Result<Mesh> {
    let triangulation = profile.triangulate()?;
    let mut mesh = Mesh::with_capacity(triangulation.points.len(), triangulation.indices.len());
    create_cap_mesh(&triangulation, 0.0, true, &mut mesh);

    if let Some(mat) = transform {
        mesh.transform(mat);
    }
    Ok(mesh)
}

/// Create a cap mesh (top or bottom) from triangulation
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, top: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if top { Vector3::z() } else { -Vector3::z() };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        // Bottom cap faces down, so its winding is reversed
        if top {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

/// Create side walls for one profile loop
///
/// Outer loops run counter-clockwise and holes clockwise, so the right-hand
/// normal of every edge points away from the material in both cases.
#[inline]
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, mesh: &mut Mesh) {
    let n = boundary.len();

    for i in 0..n {
        let p0 = boundary[i];
        let p1 = boundary[(i + 1) % n];

        let edge = p1 - p0;
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue, // duplicate consecutive points
        };

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}
