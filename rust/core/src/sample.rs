// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Built-in demo massing, used when no envelope model is supplied.

use std::f64::consts::TAU;

use facade_lite_geometry::{offset_polygon, Point2};

use crate::error::Result;
use crate::model::{Envelope, Level};

/// Envelopes and levels ready to hand to [`crate::Panelizer::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMassing {
    pub envelopes: Vec<Envelope>,
    pub levels: Vec<Level>,
}

/// Regular polygon centred on the origin, first vertex on +X.
pub fn ngon(sides: usize, radius: f64) -> Vec<Point2<f64>> {
    (0..sides)
        .map(|i| {
            let angle = TAU * i as f64 / sides as f64;
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// A triangular tower with a setback upper section.
///
/// The base is an equilateral triangle of circumradius 10 from 0 to 10; the
/// upper section is the same triangle offset 1 inwards, from 10 to 30. Levels
/// are spaced 3 apart from 0 to 18.
pub fn sample_massing() -> Result<SampleMassing> {
    let base = ngon(3, 10.0);
    let setback = offset_polygon(&base, -1.0)?;

    let envelopes = vec![
        Envelope::new(base, 0.0, 10.0).with_name("envelope"),
        Envelope::new(setback, 10.0, 20.0).with_name("envelope setback"),
    ];

    let levels = (0..20)
        .step_by(3)
        .enumerate()
        .map(|(id, elevation)| {
            Level::new(id as u32, format!("Level {elevation}"), elevation as f64)
        })
        .collect();

    Ok(SampleMassing { envelopes, levels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use facade_lite_geometry::signed_area;

    #[test]
    fn ngon_vertices_lie_on_circle() {
        let triangle = ngon(3, 10.0);
        assert_eq!(triangle.len(), 3);
        assert_relative_eq!(triangle[0], Point2::new(10.0, 0.0));
        for p in &triangle {
            assert_relative_eq!(p.coords.norm(), 10.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn sample_has_setback_and_levels() {
        let sample = sample_massing().unwrap();
        assert_eq!(sample.envelopes.len(), 2);

        let names: Vec<_> = sample.levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["Level 0", "Level 3", "Level 6", "Level 9", "Level 12", "Level 15", "Level 18"]
        );

        let base = signed_area(&sample.envelopes[0].footprint).abs();
        let setback = signed_area(&sample.envelopes[1].footprint).abs();
        assert!(setback < base);
        // inradius 5 -> 4
        assert_relative_eq!(setback / base, 0.64, epsilon = 1e-9);
    }
}
