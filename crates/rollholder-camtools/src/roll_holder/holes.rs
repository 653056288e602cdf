//! Joint hole runs and mounting holes.
//!
//! Coordinates are in the anchor frame of the owning panel, which is the
//! start pose of its outline as produced by [`super::outline`].

use super::dimensions::{BackPlateLayout, ResolvedMeasurements};
use super::types::HoleSpec;

/// Holes of one back plate. Origin is the start of the bottom straight edge,
/// `3t` in from the left border of the plate.
pub fn back_plate_holes(m: &ResolvedMeasurements) -> Vec<HoleSpec> {
    let t = m.thickness;
    let a = m.axle_diameter;
    let h = m.height;
    let w = m.width;
    let plate = m.back_plate.plate_width();
    let support_y = h - 3.0 * t - a / 2.0;

    let mut holes = vec![
        // side panel
        HoleSpec::joint_run(h / 4.0 + t / 2.0 - 3.0 * t, 0.0, h, 90.0),
        // triangular support
        HoleSpec::joint_run(h / 4.0 - 3.0 * t, support_y, h / 4.0, 180.0),
    ];

    if let BackPlateLayout::OnePiece { .. } = m.back_plate {
        holes.push(HoleSpec::joint_run(
            h / 4.0 + t / 2.0 + t - 3.0 * t + w,
            0.0,
            h,
            90.0,
        ));
        holes.push(HoleSpec::joint_run(
            h / 4.0 + 2.0 * t - 3.0 * t + w,
            support_y,
            h / 4.0,
            0.0,
        ));
    }

    let inset = m.screw_inset();
    let r = m.plate_radius();
    for x in [inset - r, plate - inset - r] {
        for y in [inset, h - inset] {
            holes.push(HoleSpec::round(x, y, m.screw_hole_diameter));
        }
    }

    holes
}

/// Slot row in the side panel receiving the long leg of a triangular support.
/// Origin is the start of the finger-jointed bottom edge.
pub fn side_panel_holes(m: &ResolvedMeasurements) -> Vec<HoleSpec> {
    let x = m.height - m.seat_radius();
    vec![HoleSpec::joint_run(x, 0.0, m.diameter / 2.0, 90.0)]
}
