// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end panelization runs over small massings.

use approx::assert_relative_eq;
use facade_lite_core::{
    execute, sample_massing, BevelProfile, Envelope, Error, FacadeConfig, FailureTarget, Level,
    PanelStyle, Panelizer,
};
use facade_lite_geometry::{
    GeometryKernel, Line3, LineSpans, Matrix4, Mesh, MeshKernel, Point2, Point3, Profile2D,
    Vector3,
};

fn rectangle(width: f64, depth: f64, elevation: f64, height: f64) -> Envelope {
    Envelope::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(width, 0.0),
            Point2::new(width, depth),
            Point2::new(0.0, depth),
        ],
        elevation,
        height,
    )
}

fn levels_at(elevations: &[f64]) -> Vec<Level> {
    elevations
        .iter()
        .enumerate()
        .map(|(i, &e)| Level::new(i as u32, format!("Level {e}"), e))
        .collect()
}

#[test]
fn equilateral_triangle_gets_one_panel_per_side_and_band() {
    let triangle = Envelope::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 75.0_f64.sqrt()),
        ],
        0.0,
        10.0,
    );
    let config = FacadeConfig::default().with_panel_width(10.0);
    let output = execute(&[triangle], &levels_at(&[0.0, 5.0, 10.0]), &config).unwrap();

    assert_eq!(output.panel_count, 6);
    assert_eq!(output.panels.len(), 6);
    assert_eq!(output.glazing.len(), 6);
    assert!(output.diagnostics.is_empty());
    for panel in &output.panels {
        assert_relative_eq!(panel.placement.width, 10.0, epsilon = 1e-9);
        assert_relative_eq!(panel.placement.height, 5.0);
    }

    assert_eq!(output.parapets.len(), 3);
    for parapet in &output.parapets {
        assert_eq!(parapet.line.start.z, 10.0);
        assert_eq!(parapet.thickness, 0.1);
        assert_eq!(parapet.height, 0.9);
    }
}

#[test]
fn regular_grid_panel_count() {
    // 4 segments x (9 / 3) bands x (12 / 4) panels
    let output = execute(
        &[rectangle(12.0, 12.0, 0.0, 9.0)],
        &levels_at(&[0.0, 3.0, 6.0, 9.0]),
        &FacadeConfig::default(),
    )
    .unwrap();

    assert_eq!(output.panel_count, 4 * 3 * 3);
    assert!(output.panels.iter().all(|p| p.standard_width));
    assert_eq!(output.parapets.len(), 4);
}

#[test]
fn panel_names_follow_band_and_position() {
    let output = execute(
        &[rectangle(8.0, 4.0, 0.0, 6.0)],
        &levels_at(&[0.0, 3.0, 6.0]),
        &FacadeConfig::default(),
    )
    .unwrap();

    let names: Vec<&str> = output.panels[..4].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["FP_0_0", "FP_0_1", "FP_1_0", "FP_1_1"]);
}

#[test]
fn sub_spans_reconstruct_segment_length() {
    let output = execute(
        &[rectangle(10.5, 4.0, 0.0, 3.0)],
        &levels_at(&[0.0, 3.0]),
        &FacadeConfig::default(),
    )
    .unwrap();

    // First segment runs along +X from the origin
    let run = &output.panels[..3];
    let widths: Vec<f64> = run.iter().map(|p| p.placement.width).collect();
    assert_relative_eq!(widths.iter().sum::<f64>(), 10.5, epsilon = 1e-9);
    assert!(widths.iter().all(|&w| w <= 4.0 + 1e-9));
    assert_relative_eq!(widths[2], 2.5, epsilon = 1e-9);

    let standard: Vec<bool> = run.iter().map(|p| p.standard_width).collect();
    assert_eq!(standard, [true, true, false]);

    for pair in run.windows(2) {
        let first = &pair[0].placement;
        let end = first.base_point + first.direction * first.width;
        assert_relative_eq!(end, pair[1].placement.base_point, epsilon = 1e-9);
    }
}

#[test]
fn setback_is_banded_from_the_last_level_below_it() {
    let sample = sample_massing().unwrap();
    let output = execute(&sample.envelopes, &sample.levels, &FacadeConfig::default()).unwrap();

    // Base: 3 sides of ~17.32 -> 5 spans, 3 bands. Setback: 3 sides of
    // ~13.86 -> 4 spans, bands 9-12, 12-15 and 15-18.
    assert_eq!(output.panel_count, 3 * 3 * 5 + 3 * 3 * 4);
    assert_eq!(output.parapets.len(), 6);
    assert!(output.diagnostics.is_empty());

    let transition: Vec<_> = output
        .panels
        .iter()
        .filter(|p| p.placement.base_point.z == 9.0)
        .collect();
    assert_eq!(transition.len(), 3 * 4);
    assert!(transition.iter().all(|p| p.placement.height == 3.0));
}

#[test]
fn repeated_runs_are_identical() {
    let sample = sample_massing().unwrap();
    let panelizer = Panelizer::new(FacadeConfig::default().with_panel_width(2.5));

    let first = panelizer.execute(&sample.envelopes, &sample.levels).unwrap();
    let second = panelizer.execute(&sample.envelopes, &sample.levels).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_length_segment_only_loses_its_own_panels() {
    let clean = rectangle(8.0, 8.0, 0.0, 6.0);
    let mut broken = clean.clone();
    broken.footprint.insert(2, Point2::new(8.0, 0.0));

    let levels = levels_at(&[0.0, 3.0, 6.0]);
    let config = FacadeConfig::default();
    let expected = execute(&[clean], &levels, &config).unwrap();
    let output = execute(&[broken], &levels, &config).unwrap();

    assert_eq!(output.panel_count, expected.panel_count);
    assert_eq!(output.parapets.len(), expected.parapets.len());

    // One failure per band of the degenerate segment
    assert_eq!(output.diagnostics.len(), 2);
    for diagnostic in &output.diagnostics {
        assert_eq!(diagnostic.segment, 1);
        assert_eq!(diagnostic.target, FailureTarget::Band);
        assert!(matches!(diagnostic.error, Error::DegenerateGeometry(_)));
    }
}

#[test]
fn invalid_config_fails_fast() {
    let envelopes = [rectangle(8.0, 8.0, 0.0, 3.0)];
    let levels = levels_at(&[0.0, 3.0]);

    for config in [
        FacadeConfig::default().with_panel_width(-1.0),
        FacadeConfig::default().with_panel_width(1e-12),
        FacadeConfig::default().with_insets(0.1, -0.5),
        FacadeConfig {
            panel_thickness: 0.0,
            ..FacadeConfig::default()
        },
    ] {
        let result = execute(&envelopes, &levels, &config);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}

#[test]
fn json_config_drives_the_run() {
    let config = FacadeConfig::from_json(r#"{"panelWidth": 2.0, "parapetHeight": 1.2}"#).unwrap();
    let output = execute(
        &[rectangle(8.0, 8.0, 0.0, 3.0)],
        &levels_at(&[0.0, 3.0]),
        &config,
    )
    .unwrap();

    assert_eq!(output.panel_count, 4 * 4);
    assert!(output.parapets.iter().all(|p| p.height == 1.2));
}

#[test]
fn sliver_panels_are_built_without_glazing() {
    let output = execute(
        &[rectangle(8.1, 8.1, 0.0, 3.0)],
        &levels_at(&[0.0, 3.0]),
        &FacadeConfig::default().with_insets(0.1, 0.1),
    )
    .unwrap();

    // 4, 4 and a 0.1 remainder on every side
    assert_eq!(output.panel_count, 12);
    assert_eq!(output.glazing.len(), 8);
    assert!(output.diagnostics.is_empty());

    let sliver = &output.panels[2];
    assert_relative_eq!(sliver.placement.width, 0.1, epsilon = 1e-9);
    assert!(!sliver.glazed);
}

#[test]
fn bevelled_panels_have_no_glazing() {
    let bevel = BevelProfile::default();
    let config = FacadeConfig::default().with_style(PanelStyle::Bevelled(bevel));
    let output = execute(
        &[rectangle(8.0, 8.0, 0.0, 3.0)],
        &levels_at(&[0.0, 3.0]),
        &config,
    )
    .unwrap();

    assert_eq!(output.panel_count, 8);
    assert!(output.glazing.is_empty());
    assert!(output
        .panels
        .iter()
        .all(|p| p.thickness == bevel.sill_depth && !p.mesh.is_empty()));
}

/// Refuses to build any solid
struct NoSolids;

impl GeometryKernel for NoSolids {
    fn extrude(
        &self,
        _: &Profile2D,
        _: f64,
        _: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        Err(facade_lite_geometry::Error::InvalidExtrusion(
            "solid modeller unavailable".to_string(),
        ))
    }

    fn face(
        &self,
        profile: &Profile2D,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.face(profile, transform)
    }

    fn sweep(
        &self,
        profile: &Profile2D,
        path: &[Point3<f64>],
        up: Vector3<f64>,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.sweep(profile, path, up, transform)
    }

    fn offset(
        &self,
        polygon: &[Point2<f64>],
        distance: f64,
    ) -> facade_lite_geometry::Result<Vec<Point2<f64>>> {
        MeshKernel.offset(polygon, distance)
    }

    fn divide(&self, line: &Line3, max_length: f64) -> facade_lite_geometry::Result<LineSpans> {
        MeshKernel.divide(line, max_length)
    }
}

/// Divides every line above ground into one span fewer than it should
struct ShortTopKernel;

impl GeometryKernel for ShortTopKernel {
    fn extrude(
        &self,
        profile: &Profile2D,
        thickness: f64,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.extrude(profile, thickness, transform)
    }

    fn face(
        &self,
        profile: &Profile2D,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.face(profile, transform)
    }

    fn sweep(
        &self,
        profile: &Profile2D,
        path: &[Point3<f64>],
        up: Vector3<f64>,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.sweep(profile, path, up, transform)
    }

    fn offset(
        &self,
        polygon: &[Point2<f64>],
        distance: f64,
    ) -> facade_lite_geometry::Result<Vec<Point2<f64>>> {
        MeshKernel.offset(polygon, distance)
    }

    fn divide(&self, line: &Line3, max_length: f64) -> facade_lite_geometry::Result<LineSpans> {
        let mut spans = MeshKernel.divide(line, max_length)?;
        if line.start.z > 0.0 {
            spans.pop();
        }
        Ok(spans)
    }
}

#[test]
fn kernel_failures_are_isolated() {
    let panelizer = Panelizer::with_kernel(FacadeConfig::default(), NoSolids);
    let output = panelizer
        .execute(&[rectangle(8.0, 8.0, 0.0, 3.0)], &levels_at(&[0.0, 3.0]))
        .unwrap();

    assert_eq!(output.panel_count, 0);
    assert_eq!(output.element_count(), 0);

    // First panel of each band fails, the rest of the band and its parapet are never tried
    assert_eq!(output.diagnostics.len(), 4);
    for (segment, diagnostic) in output.diagnostics.iter().enumerate() {
        assert_eq!(diagnostic.segment, segment);
        assert_eq!(diagnostic.target, FailureTarget::Panel(0));
        assert!(matches!(diagnostic.error, Error::Kernel(_)));
    }
}

/// Fails any extrusion placed at the world origin
struct OriginFails;

impl GeometryKernel for OriginFails {
    fn extrude(
        &self,
        profile: &Profile2D,
        thickness: f64,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        let at_origin = (0..3).all(|row| transform[(row, 3)].abs() < 1e-9);
        if at_origin {
            return Err(facade_lite_geometry::Error::InvalidExtrusion(
                "solid at origin rejected".to_string(),
            ));
        }
        MeshKernel.extrude(profile, thickness, transform)
    }

    fn face(
        &self,
        profile: &Profile2D,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.face(profile, transform)
    }

    fn sweep(
        &self,
        profile: &Profile2D,
        path: &[Point3<f64>],
        up: Vector3<f64>,
        transform: &Matrix4<f64>,
    ) -> facade_lite_geometry::Result<Mesh> {
        MeshKernel.sweep(profile, path, up, transform)
    }

    fn offset(
        &self,
        polygon: &[Point2<f64>],
        distance: f64,
    ) -> facade_lite_geometry::Result<Vec<Point2<f64>>> {
        MeshKernel.offset(polygon, distance)
    }

    fn divide(&self, line: &Line3, max_length: f64) -> facade_lite_geometry::Result<LineSpans> {
        MeshKernel.divide(line, max_length)
    }
}

#[test]
fn failed_panel_abandons_rest_of_band_and_its_parapet() {
    let panelizer = Panelizer::with_kernel(FacadeConfig::default(), OriginFails);
    let output = panelizer
        .execute(&[rectangle(8.0, 8.0, 0.0, 3.0)], &levels_at(&[0.0, 3.0]))
        .unwrap();

    // Segment 0 loses both of its panels, the others keep two each
    assert_eq!(output.panel_count, 6);
    assert!(!output
        .panels
        .iter()
        .any(|p| p.placement.direction.x > 0.5 && p.placement.base_point.y.abs() < 1e-9));

    assert_eq!(output.parapets.len(), 3);
    assert!(output.parapets.iter().all(|w| w.name != "Parapet_0"));

    assert_eq!(output.diagnostics.len(), 1);
    let diagnostic = &output.diagnostics[0];
    assert_eq!((diagnostic.segment, diagnostic.band), (0, 0));
    assert_eq!(diagnostic.target, FailureTarget::Panel(0));
    assert!(matches!(diagnostic.error, Error::Kernel(_)));
}

#[test]
fn misaligned_subdivision_keeps_aligned_prefix() {
    let panelizer = Panelizer::with_kernel(FacadeConfig::default(), ShortTopKernel);
    let output = panelizer
        .execute(&[rectangle(8.0, 8.0, 0.0, 3.0)], &levels_at(&[0.0, 3.0]))
        .unwrap();

    assert_eq!(output.panel_count, 4);
    assert_eq!(output.parapets.len(), 4);
    assert_eq!(output.diagnostics.len(), 4);
    for diagnostic in &output.diagnostics {
        assert_eq!(diagnostic.target, FailureTarget::Panel(1));
        assert_eq!(
            diagnostic.error,
            Error::MisalignedBands {
                index: 1,
                top_count: 1
            }
        );
    }
}
