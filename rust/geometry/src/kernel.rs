// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry kernel seam
//!
//! Panelization only needs a handful of solid-building capabilities. They are
//! collected in [`GeometryKernel`] so callers can swap in another modeller
//! (or a failing stub in tests) without touching the traversal.

use crate::error::Result;
use crate::extrusion::{extrude_profile, face_profile};
use crate::line::{Line3, LineSpans};
use crate::mesh::Mesh;
use crate::offset::offset_polygon;
use crate::profile::Profile2D;
use crate::sweep::sweep_profile;
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Solid-building capabilities consumed by the facade generator
pub trait GeometryKernel {
    /// Extrude `profile` by `thickness` along its local +Z, then place it
    fn extrude(
        &self,
        profile: &Profile2D,
        thickness: f64,
        transform: &Matrix4<f64>,
    ) -> Result<Mesh>;

    /// Triangulate `profile` as a flat face in its local XY plane, then place it
    fn face(&self, profile: &Profile2D, transform: &Matrix4<f64>) -> Result<Mesh>;

    /// Sweep `profile` along a local polyline `path`, then place it
    ///
    /// `up` orients the section's Y axis at every ring.
    fn sweep(
        &self,
        profile: &Profile2D,
        path: &[Point3<f64>],
        up: Vector3<f64>,
        transform: &Matrix4<f64>,
    ) -> Result<Mesh>;

    /// Offset a closed polygon; negative distances shrink it
    fn offset(&self, polygon: &[Point2<f64>], distance: f64) -> Result<Vec<Point2<f64>>>;

    /// Divide a line into spans of at most `max_length`
    fn divide(&self, line: &Line3, max_length: f64) -> Result<LineSpans>;
}

/// Default kernel producing triangle meshes
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshKernel;

impl MeshKernel {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryKernel for MeshKernel {
    fn extrude(
        &self,
        profile: &Profile2D,
        thickness: f64,
        transform: &Matrix4<f64>,
    ) -> Result<Mesh> {
        extrude_profile(profile, thickness, Some(transform))
    }

    fn face(&self, profile: &Profile2D, transform: &Matrix4<f64>) -> Result<Mesh> {
        face_profile(profile, Some(transform))
    }

    fn sweep(
        &self,
        profile: &Profile2D,
        path: &[Point3<f64>],
        up: Vector3<f64>,
        transform: &Matrix4<f64>,
    ) -> Result<Mesh> {
        sweep_profile(profile, path, up, Some(transform))
    }

    fn offset(&self, polygon: &[Point2<f64>], distance: f64) -> Result<Vec<Point2<f64>>> {
        offset_polygon(polygon, distance)
    }

    #[inline]
    fn divide(&self, line: &Line3, max_length: f64) -> Result<LineSpans> {
        line.divide_by_length(max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::create_rectangle;

    #[test]
    fn test_mesh_kernel_extrudes_in_place() {
        let kernel = MeshKernel::new();
        let transform = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 3.0));
        let mesh = kernel
            .extrude(&Profile2D::new(create_rectangle(2.0, 1.0)), 0.5, &transform)
            .unwrap();

        let (min, max) = mesh.bounds();
        assert_eq!(min.z, 3.0);
        assert_eq!(max.z, 3.5);
    }

    #[test]
    fn test_mesh_kernel_divides() {
        let line = Line3::new(Point3::origin(), Point3::new(9.0, 0.0, 0.0));
        assert_eq!(MeshKernel.divide(&line, 3.0).unwrap().len(), 3);
    }
}
