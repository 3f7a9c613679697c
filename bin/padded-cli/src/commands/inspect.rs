// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `padded inspect` command: show the padded layout of a shape.

use padded_tensor::{Layout, Shape, LANE_WIDTH, STORAGE_ALIGN};

pub fn execute(shape: String) -> anyhow::Result<()> {
    let dims = super::parse_dims(&shape)?;
    let layout = Layout::new(Shape::new(dims), "inspect")?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              padded · Layout Inspector              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    for line in describe(&layout) {
        println!("  {line}");
    }
    println!();

    Ok(())
}

/// Renders the layout summary, one line per entry.
fn describe(layout: &Layout) -> Vec<String> {
    let bytes = layout
        .storage_len()
        .saturating_mul(std::mem::size_of::<f32>());
    let overhead = if layout.storage_len() == 0 {
        0.0
    } else {
        layout.padding_len() as f64 * 100.0 / layout.storage_len() as f64
    };

    vec![
        format!("Shape:          {}", layout.shape()),
        format!("Padded shape:   {}", layout.padded_shape()),
        format!("Padded strides: {:?}", layout.padded_strides()),
        format!("Rows:           {}", layout.rows()),
        format!(
            "Row length:     {} logical, {} padded",
            layout.row_len(),
            layout.padded_row_len()
        ),
        format!("Elements:       {}", layout.num_elements()),
        format!("Storage:        {} slots, {bytes} B", layout.storage_len()),
        format!(
            "Padding:        {} slots ({overhead:.1}%)",
            layout.padding_len()
        ),
        format!("Lane width:     {LANE_WIDTH}, alignment {STORAGE_ALIGN} B"),
    ]
}
