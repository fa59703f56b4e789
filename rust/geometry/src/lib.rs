// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade-Lite Geometry
//!
//! The geometry kernel behind facade panelization: 2D profiles with holes,
//! earcutr triangulation, extrusion and sweep into triangle meshes, polygon
//! offset, line division and placement transforms, all on nalgebra types.

pub mod error;
pub mod extrusion;
pub mod kernel;
pub mod line;
pub mod mesh;
pub mod offset;
pub mod profile;
pub mod sweep;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use extrusion::{extrude_profile, face_profile};
pub use kernel::{GeometryKernel, MeshKernel};
pub use line::{Line3, LineSpans, LENGTH_EPSILON, MAX_SPANS};
pub use mesh::Mesh;
pub use offset::offset_polygon;
pub use profile::{create_inset_rectangle, create_rectangle, shrink, signed_area, Profile2D};
pub use sweep::sweep_profile;
pub use transform::placement;
