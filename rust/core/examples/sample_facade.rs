// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panelize the built-in sample massing and print a summary.
//!
//! An optional JSON configuration can be passed as the first argument:
//!
//! ```text
//! RUST_LOG=debug cargo run -p facade-lite-core --example sample_facade -- '{"panelWidth": 3.0}'
//! ```

use facade_lite_core::{sample_massing, FacadeConfig, Panelizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,facade_lite_core=debug".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(json) => FacadeConfig::from_json(&json)?,
        None => FacadeConfig::default(),
    };

    let sample = sample_massing()?;
    let panelizer = Panelizer::new(config);
    let output = panelizer.execute(&sample.envelopes, &sample.levels)?;

    println!("Width:     {}", panelizer.config().panel_width);
    println!("Panels:    {}", output.panel_count);
    println!("Glazing:   {}", output.glazing.len());
    println!("Parapets:  {}", output.parapets.len());
    println!(
        "Standard:  {}",
        output.panels.iter().filter(|p| p.standard_width).count()
    );

    let triangles: usize = output
        .panels
        .iter()
        .map(|p| p.mesh.triangle_count())
        .chain(output.glazing.iter().map(|g| g.mesh.triangle_count()))
        .chain(output.parapets.iter().map(|w| w.mesh.triangle_count()))
        .sum();
    println!("Triangles: {triangles}");

    for diagnostic in &output.diagnostics {
        println!(
            "Skipped envelope {} segment {} band {} ({:?}): {}",
            diagnostic.envelope,
            diagnostic.segment,
            diagnostic.band,
            diagnostic.target,
            diagnostic.error
        );
    }

    Ok(())
}
