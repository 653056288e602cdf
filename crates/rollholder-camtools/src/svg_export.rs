//! SVG output of a rendered sheet, one `<g>` per panel.
//!
//! Sheet coordinates have Y pointing up; the document flips them so the
//! drawing is not mirrored in a viewer.

use crate::renderer::{RenderedSheet, DEFAULT_TOLERANCE};
use anyhow::{Context, Result};
use lyon::math::Transform;
use lyon::path::Path;
use std::io::Write;

const PADDING: f32 = 10.0;
const STYLE: &str = "fill:none;stroke:black;stroke-width:0.1";

fn path_data(path: &Path) -> String {
    let mut svg = String::new();
    for event in path.iter() {
        match event {
            lyon::path::Event::Begin { at } => {
                svg.push_str(&format!("M {:.3} {:.3} ", at.x, at.y))
            }
            lyon::path::Event::Line { to, .. } => {
                svg.push_str(&format!("L {:.3} {:.3} ", to.x, to.y))
            }
            lyon::path::Event::Quadratic { ctrl, to, .. } => svg.push_str(&format!(
                "Q {:.3} {:.3} {:.3} {:.3} ",
                ctrl.x, ctrl.y, to.x, to.y
            )),
            lyon::path::Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => svg.push_str(&format!(
                "C {:.3} {:.3} {:.3} {:.3} {:.3} {:.3} ",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            )),
            lyon::path::Event::End { close, .. } => {
                if close {
                    svg.push_str("Z ");
                }
            }
        }
    }
    svg.trim_end().to_string()
}

pub fn to_svg(sheet: &RenderedSheet) -> String {
    let (min_x, min_y, max_x, max_y) = sheet
        .bounds(DEFAULT_TOLERANCE)
        .unwrap_or((0.0, 0.0, 0.0, 0.0));
    let width = max_x - min_x + 2.0 * PADDING;
    let height = max_y - min_y + 2.0 * PADDING;
    let flip = Transform::scale(1.0, -1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg width="{:.2}mm" height="{:.2}mm" viewBox="{:.2} {:.2} {:.2} {:.2}" xmlns="http://www.w3.org/2000/svg">
"#,
        width,
        height,
        min_x - PADDING,
        -max_y - PADDING,
        width,
        height
    ));

    for panel in &sheet.panels {
        svg.push_str(&format!(
            "<g id=\"panel-{}\">\n<title>{}</title>\n",
            panel.index + 1,
            panel.kind
        ));
        let flipped = panel.path.clone().transformed(&flip);
        svg.push_str(&format!(
            r#"<path d="{}" style="{}" />"#,
            path_data(&flipped),
            STYLE
        ));
        svg.push_str("\n</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(sheet: &RenderedSheet, writer: &mut impl Write) -> Result<()> {
    writer
        .write_all(to_svg(sheet).as_bytes())
        .context("Failed to write SVG document")?;
    Ok(())
}
