//! G-code output for laser cutting a rendered sheet.

use crate::renderer::RenderedSheet;
use crate::roll_holder::ResolvedMeasurements;
use lyon::math::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    pub passes: u32,
    pub z_step_down: f32,
    /// Spindle value sent with M3
    pub power: u32,
    /// mm/min
    pub feed_rate: f32,
    /// Desired minimum X of the cut
    pub offset_x: f32,
    /// Desired minimum Y of the cut
    pub offset_y: f32,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            passes: 3,
            z_step_down: 0.5,
            power: 1000,
            feed_rate: 500.0,
            offset_x: 10.0,
            offset_y: 10.0,
        }
    }
}

impl LaserSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.passes == 0 {
            return Err("At least one laser pass is required".to_string());
        }
        if !self.feed_rate.is_finite() || self.feed_rate <= 0.0 {
            return Err("Feed rate must be positive".to_string());
        }
        if self.z_step_down < 0.0 {
            return Err("Z step down must not be negative".to_string());
        }
        Ok(())
    }
}

pub struct GcodeWriter<'a> {
    laser: &'a LaserSettings,
    tolerance: f32,
}

impl<'a> GcodeWriter<'a> {
    pub fn new(laser: &'a LaserSettings, tolerance: f32) -> Self {
        Self { laser, tolerance }
    }

    pub fn write(&self, sheet: &RenderedSheet, measurements: &ResolvedMeasurements) -> String {
        let mut gcode = String::new();

        gcode.push_str("; Roll Holder G-code\n");
        gcode.push_str("; Based on https://github.com/florianfesti/boxes\n");
        gcode.push_str(";\n");
        gcode.push_str("; --- Holder Dimensions ---\n");
        gcode.push_str(&format!("; Width: {} mm\n", measurements.width));
        gcode.push_str(&format!("; Roll diameter: {} mm\n", measurements.diameter));
        gcode.push_str(&format!(
            "; Height: {} mm{}\n",
            measurements.height,
            if measurements.height_clamped {
                " (raised to minimum)"
            } else {
                ""
            }
        ));
        gcode.push_str(&format!("; Axle diameter: {} mm\n", measurements.axle_diameter));
        gcode.push_str(&format!(
            "; Screw holes: {} mm\n",
            measurements.screw_hole_diameter
        ));
        gcode.push_str(&format!(
            "; Back plate: {} x {:.2} mm\n",
            measurements.back_plate.plate_count(),
            measurements.back_plate.plate_width()
        ));
        gcode.push_str(&format!(
            "; Material thickness: {} mm\n",
            measurements.thickness
        ));
        gcode.push_str(";\n");

        gcode.push_str("; --- Laser Settings ---\n");
        gcode.push_str(&format!("; Laser passes: {}\n", self.laser.passes));
        gcode.push_str(&format!("; Laser power: S{}\n", self.laser.power));
        gcode.push_str(&format!("; Feed rate: {:.0} mm/min\n", self.laser.feed_rate));
        gcode.push_str(&format!("; Offset X: {} mm\n", self.laser.offset_x));
        gcode.push_str(&format!("; Offset Y: {} mm\n", self.laser.offset_y));
        gcode.push_str(";\n");

        gcode.push_str("; Initialization\n");
        gcode.push_str("G21 ; Set units to millimeters\n");
        gcode.push_str("G90 ; Absolute positioning\n");
        gcode.push_str("G17 ; XY plane selection\n");
        gcode.push('\n');

        gcode.push_str("; Home and set work coordinate system\n");
        gcode.push_str("$H ; Home all axes\n");
        gcode.push_str("G10 L2 P1 X0 Y0 Z0 ; Clear G54 offset\n");
        gcode.push_str("G54 ; Select work coordinate system 1\n");
        gcode.push_str(&format!(
            "G0 Z{:.2} F{:.0} ; Move to safe height\n\n",
            5.0, self.laser.feed_rate
        ));

        // Emitted coordinates honour the offsets as the minimum XY of the cut.
        let (shift_x, shift_y) = match sheet.bounds(self.tolerance) {
            Some((min_x, min_y, _, _)) => {
                (self.laser.offset_x - min_x, self.laser.offset_y - min_y)
            }
            None => (0.0, 0.0),
        };

        for panel in &sheet.panels {
            gcode.push_str(&format!("; Panel {}: {}\n", panel.index + 1, panel.kind));
            // Inner cuts before outlines
            for contour in &nested_first(panel.polylines(self.tolerance)) {
                self.push_contour(&mut gcode, contour, shift_x, shift_y);
            }
            gcode.push('\n');
        }

        gcode.push_str("M5 ; Ensure laser off\n");
        gcode.push_str("G0 Z10.0 ; Move to safe height\n");
        gcode.push_str("G0 X0 Y0 ; Return to origin\n");
        gcode.push_str("M2 ; Program end\n");

        gcode
    }

    fn push_contour(&self, gcode: &mut String, path: &[Point], shift_x: f32, shift_y: f32) {
        let Some(first_point) = path.first() else {
            return;
        };
        gcode.push_str(&format!(
            "G0 X{:.2} Y{:.2} ; Rapid to start\n",
            first_point.x + shift_x,
            first_point.y + shift_y
        ));

        for pass_num in 1..=self.laser.passes {
            let z_depth = -(pass_num as f32 - 1.0) * self.laser.z_step_down;
            gcode.push_str(&format!(
                "; Pass {}/{} at Z{:.2}\n",
                pass_num, self.laser.passes, z_depth
            ));

            if pass_num > 1 {
                gcode.push_str(&format!("G0 Z{:.2} ; Move to pass depth\n", z_depth));
            }

            gcode.push_str(&format!("M3 S{} ; Laser on\n", self.laser.power));

            for (idx, point) in path.iter().skip(1).enumerate() {
                if idx == 0 {
                    gcode.push_str(&format!(
                        "G1 X{:.2} Y{:.2} F{:.0}\n",
                        point.x + shift_x,
                        point.y + shift_y,
                        self.laser.feed_rate
                    ));
                } else {
                    gcode.push_str(&format!(
                        "G1 X{:.2} Y{:.2}\n",
                        point.x + shift_x,
                        point.y + shift_y
                    ));
                }
            }

            gcode.push_str("M5 ; Laser off\n");

            if pass_num < self.laser.passes {
                gcode.push_str(&format!(
                    "G0 X{:.2} Y{:.2} ; Return to start\n",
                    first_point.x + shift_x,
                    first_point.y + shift_y
                ));
            }
        }
    }
}

/// Reorder contours so those enclosed by another contour come first.
fn nested_first(contours: Vec<Vec<Point>>) -> Vec<Vec<Point>> {
    let boxes: Vec<_> = contours.iter().map(|c| contour_box(c)).collect();
    let (inner, outer): (Vec<_>, Vec<_>) =
        contours.into_iter().enumerate().partition(|(i, _)| {
            boxes
                .iter()
                .enumerate()
                .any(|(j, outer)| j != *i && contains(outer, &boxes[*i]))
        });
    inner.into_iter().chain(outer).map(|(_, c)| c).collect()
}

fn contour_box(contour: &[Point]) -> (f32, f32, f32, f32) {
    contour.iter().fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    )
}

fn contains(outer: &(f32, f32, f32, f32), inner: &(f32, f32, f32, f32)) -> bool {
    outer.0 <= inner.0 && outer.1 <= inner.1 && outer.2 >= inner.2 && outer.3 >= inner.3
}
