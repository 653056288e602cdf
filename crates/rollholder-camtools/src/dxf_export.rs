//! DXF output of a rendered sheet.
//!
//! Every contour becomes a closed LWPOLYLINE on a layer named after its panel.
//! LWPOLYLINE needs at least R2000; older headers make the writer skip them.

use crate::renderer::RenderedSheet;
use anyhow::{Context, Result};
use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::enums::AcadVersion;
use dxf::{Drawing, LwPolylineVertex};
use std::io::Write;

fn layer_name(index: usize, kind: &str) -> String {
    format!("{}_{}", index + 1, kind.to_uppercase().replace(' ', "_"))
}

pub fn to_drawing(sheet: &RenderedSheet, tolerance: f32) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2000;

    for panel in &sheet.panels {
        let layer = layer_name(panel.index, &panel.kind.to_string());
        for mut contour in panel.polylines(tolerance) {
            // closed flag replaces the repeated start point
            if contour.len() > 1 && contour.first() == contour.last() {
                contour.pop();
            }
            if contour.len() < 2 {
                continue;
            }
            let mut poly = LwPolyline::default();
            poly.vertices = contour
                .iter()
                .map(|p| LwPolylineVertex {
                    x: p.x as f64,
                    y: p.y as f64,
                    ..Default::default()
                })
                .collect();
            poly.set_is_closed(true);

            let mut entity = Entity::new(EntityType::LwPolyline(poly));
            entity.common.layer = layer.clone();
            drawing.add_entity(entity);
        }
    }

    drawing
}

pub fn write_dxf(sheet: &RenderedSheet, tolerance: f32, writer: &mut impl Write) -> Result<()> {
    let drawing = to_drawing(sheet, tolerance);
    drawing
        .save(writer)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to write DXF document")?;
    Ok(())
}
