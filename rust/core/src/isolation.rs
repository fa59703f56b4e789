// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-iteration failure isolation.
//!
//! A failure inside one (segment, band) cell is recorded as a [`Diagnostic`]
//! and the traversal moves on to the next cell. A failed panel abandons the
//! rest of its band, parapet included, unless it only lacked a top sub-span.
//! Partial facades are an expected outcome, not an error.

use crate::error::{Error, Result};

/// What a failed iteration was building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureTarget {
    /// The whole band: line construction or subdivision failed
    Band,
    /// The panel at this position; later panels of the band were not attempted
    /// unless the failure was [`Error::MisalignedBands`]
    Panel(usize),
    /// The band's parapet
    Parapet,
}

/// A recorded per-iteration failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Index into the caller's envelope list
    pub envelope: usize,
    pub segment: usize,
    pub band: usize,
    pub target: FailureTarget,
    pub error: Error,
}

/// Location of the iteration currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationScope {
    pub envelope: usize,
    pub segment: usize,
    pub band: usize,
}

impl IterationScope {
    pub fn new(envelope: usize, segment: usize, band: usize) -> Self {
        Self {
            envelope,
            segment,
            band,
        }
    }

    /// Record `error` against `target` in this scope.
    pub fn record(self, target: FailureTarget, error: Error, diagnostics: &mut Vec<Diagnostic>) {
        tracing::warn!(
            envelope = self.envelope,
            segment = self.segment,
            band = self.band,
            target = ?target,
            error = %error,
            "Skipping failed facade iteration"
        );
        diagnostics.push(Diagnostic {
            envelope: self.envelope,
            segment: self.segment,
            band: self.band,
            target,
            error,
        });
    }

    /// Run one iteration, turning a failure into a diagnostic.
    pub fn isolate<T>(
        self,
        target: FailureTarget,
        diagnostics: &mut Vec<Diagnostic>,
        iteration: impl FnOnce() -> Result<T>,
    ) -> Option<T> {
        match iteration() {
            Ok(value) => Some(value),
            Err(error) => {
                self.record(target, error, diagnostics);
                None
            }
        }
    }
}
