// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panelization entry point.

use std::time::Instant;

use facade_lite_geometry::{GeometryKernel, MeshKernel};
use rayon::prelude::*;

use crate::config::FacadeConfig;
use crate::element::FacadeOutput;
use crate::error::{Error, Result};
use crate::isolation::{FailureTarget, IterationScope};
use crate::levels::{select_all, sort_levels, BandLevels};
use crate::model::{Envelope, Level};
use crate::panel::PanelFactory;
use crate::parapet::ParapetSynthesizer;
use crate::tiler::SegmentTiler;

/// Turns envelopes and levels into facade panels, glazing and parapets.
///
/// ```rust,ignore
/// let panelizer = Panelizer::new(FacadeConfig::default().with_panel_width(3.0));
/// let output = panelizer.execute(&envelopes, &levels)?;
/// println!("{} panels", output.panel_count);
/// ```
pub struct Panelizer<K = MeshKernel> {
    config: FacadeConfig,
    kernel: K,
}

impl Panelizer<MeshKernel> {
    /// Panelizer backed by the default mesh kernel
    pub fn new(config: FacadeConfig) -> Self {
        Self::with_kernel(config, MeshKernel)
    }
}

impl<K: GeometryKernel + Sync> Panelizer<K> {
    pub fn with_kernel(config: FacadeConfig, kernel: K) -> Self {
        Self { config, kernel }
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    /// Panelize every envelope.
    ///
    /// Fails only when the configuration is invalid; every geometric failure
    /// is isolated and reported in [`FacadeOutput::diagnostics`].
    pub fn execute(&self, envelopes: &[Envelope], levels: &[Level]) -> Result<FacadeOutput> {
        let start = Instant::now();
        self.config.validate()?;

        tracing::info!(
            envelopes = envelopes.len(),
            levels = levels.len(),
            panel_width = self.config.panel_width,
            "Starting facade panelization"
        );

        let sorted = sort_levels(levels);
        let usable: Vec<(usize, &Envelope)> = envelopes
            .iter()
            .enumerate()
            .filter(|(index, envelope)| {
                let keep = envelope.elevation >= 0.0;
                if !keep {
                    tracing::debug!(
                        envelope = index,
                        name = %envelope.name,
                        elevation = envelope.elevation,
                        "Skipping envelope below ground"
                    );
                }
                keep
            })
            .collect();

        let band_levels = select_all(usable.iter().map(|(_, envelope)| *envelope), &sorted);

        // Envelopes are independent once their band levels are fixed
        let parts: Vec<FacadeOutput> = usable
            .par_iter()
            .zip(band_levels.par_iter())
            .map(|(&(index, envelope), levels)| self.panelize_envelope(index, envelope, levels))
            .collect();

        let mut output = FacadeOutput::new();
        for part in parts {
            output.absorb(part);
        }

        tracing::info!(
            panels = output.panel_count,
            glazing = output.glazing.len(),
            parapets = output.parapets.len(),
            failures = output.diagnostics.len(),
            total_time_ms = start.elapsed().as_millis(),
            "Facade panelization complete"
        );

        Ok(output)
    }

    fn panelize_envelope(
        &self,
        index: usize,
        envelope: &Envelope,
        levels: &BandLevels<'_>,
    ) -> FacadeOutput {
        let mut output = FacadeOutput::new();

        tracing::debug!(
            envelope = index,
            name = %envelope.name,
            segments = envelope.footprint.len(),
            bands = levels.band_count(),
            "Panelizing envelope"
        );
        if levels.band_count() == 0 {
            return output;
        }

        let tiler = SegmentTiler::new(&self.kernel, self.config.panel_width);
        let panels = PanelFactory::new(&self.kernel, &self.config);
        let parapets = ParapetSynthesizer::new(&self.kernel, &self.config);

        for segment in envelope.segments() {
            for band in levels.bands() {
                let scope = IterationScope::new(index, segment.index, band.index);

                let Some(tiling) = scope.isolate(FailureTarget::Band, &mut output.diagnostics, || {
                    tiler.tile(&segment, &band)
                }) else {
                    continue;
                };

                // A misaligned top division only loses that panel. Any other
                // failure abandons the rest of the band and its parapet.
                let mut abandoned = false;
                for (position, placement) in tiling.placements.into_iter().enumerate() {
                    let target = FailureTarget::Panel(position);
                    match placement.and_then(|p| panels.build(&p)) {
                        Ok(built) => {
                            output.add_panel(built.panel, built.glazing);
                        }
                        Err(error @ Error::MisalignedBands { .. }) => {
                            scope.record(target, error, &mut output.diagnostics);
                        }
                        Err(error) => {
                            scope.record(target, error, &mut output.diagnostics);
                            abandoned = true;
                            break;
                        }
                    }
                }
                if abandoned {
                    continue;
                }

                if let Some(request) = tiling.parapet {
                    let wall = scope.isolate(FailureTarget::Parapet, &mut output.diagnostics, || {
                        parapets.build(&request)
                    });
                    if let Some(wall) = wall {
                        output.add_parapet(wall);
                    }
                }
            }
        }

        output
    }
}

/// Panelize with the default mesh kernel.
pub fn execute(
    envelopes: &[Envelope],
    levels: &[Level],
    config: &FacadeConfig,
) -> Result<FacadeOutput> {
    Panelizer::new(config.clone()).execute(envelopes, levels)
}
