// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight line segments and their subdivision

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// Lengths at or below this are treated as zero
pub const LENGTH_EPSILON: f64 = 1e-5;

/// Upper bound on the spans a single division may produce
pub const MAX_SPANS: usize = 100_000;

/// Sub-spans of one divided line, most facade runs fit inline
pub type LineSpans = SmallVec<[Line3; 8]>;

/// A straight segment between two 3D points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line3 {
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end, `None` for a zero-length line
    #[inline]
    pub fn direction(&self) -> Option<Vector3<f64>> {
        (self.end - self.start).try_normalize(LENGTH_EPSILON * 1e-3)
    }

    /// Split the line into consecutive spans of `max_length`
    ///
    /// Spans start at the line's start point and advance by exactly
    /// `max_length`. Only the final span may be shorter, and a leftover at or
    /// below [`LENGTH_EPSILON`] is absorbed into the previous span so no
    /// zero-length span is produced. Span lengths always sum to the line length.
    pub fn divide_by_length(&self, max_length: f64) -> Result<LineSpans> {
        if !(max_length > 0.0 && max_length.is_finite()) {
            return Err(Error::Degenerate(format!(
                "division length must be positive, got {max_length}"
            )));
        }

        let length = self.length();
        let direction = self.direction().filter(|_| length > LENGTH_EPSILON).ok_or_else(|| {
            Error::Degenerate(format!(
                "cannot divide zero-length line at ({:.3}, {:.3}, {:.3})",
                self.start.x, self.start.y, self.start.z
            ))
        })?;

        let steps = (length / max_length).floor();
        if steps >= MAX_SPANS as f64 {
            return Err(Error::Degenerate(format!(
                "dividing a {length:.3} line by {max_length} exceeds {MAX_SPANS} spans"
            )));
        }

        let mut full = steps as usize;
        let mut remainder = length - full as f64 * max_length;
        if remainder <= LENGTH_EPSILON && full > 0 {
            remainder = 0.0;
        } else if max_length - remainder <= LENGTH_EPSILON {
            // Floating point left a hair short of one more full step
            full += 1;
            remainder = 0.0;
        }

        let mut spans = LineSpans::new();
        let mut cursor = self.start;
        for i in 0..full {
            let is_last = i + 1 == full && remainder == 0.0;
            let next = if is_last {
                self.end
            } else {
                self.start + direction * (max_length * (i + 1) as f64)
            };
            spans.push(Line3::new(cursor, next));
            cursor = next;
        }
        if remainder > 0.0 {
            spans.push(Line3::new(cursor, self.end));
        }

        Ok(spans)
    }
}
