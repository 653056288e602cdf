//! Boundary paths of the four panel shapes.
//!
//! Every outline is a closed walk of straight edges and corner turns starting
//! from a pose inside the panel's reserved box. The formulas only depend on
//! the resolved measurements, so the same inputs always produce the same
//! segments.

use super::dimensions::ResolvedMeasurements;
use super::types::{PanelPath, PanelSize, PathSegment, Pose};

/// Side panel carrying the axle seat.
pub fn side_panel(m: &ResolvedMeasurements) -> (PanelPath, PanelSize) {
    let t = m.thickness;
    let h = m.height;
    let d = m.diameter;
    let r = m.seat_radius();
    let alpha = m.seat_angle();

    let size = PanelSize::new(h, (d + m.axle_diameter) / 2.0 + 4.0 * t);
    let segments = vec![
        PathSegment::joint(h),
        PathSegment::corner(90.0, 0.0),
        PathSegment::line(d / 2.0),
        PathSegment::corner(90.0, r),
        PathSegment::corner(alpha, r),
        PathSegment::line(m.seat_chord()),
        PathSegment::corner(90.0 - alpha, r),
        PathSegment::corner(90.0, 0.0),
    ];

    (PanelPath::new(Pose::new(0.0, t, 0.0), segments), size)
}

/// Corner radius used for the acute corners of the triangular supports.
pub fn support_radius(m: &ResolvedMeasurements) -> f32 {
    (3.0 * m.thickness)
        .min(m.height / 4.0)
        .min(m.diameter / 2.0)
}

/// Right-triangle brace between side panel and back plate.
///
/// Both legs keep their full length so the finger joints line up with the
/// joint hole runs; the acute corners are rounded outside the legs and the
/// hypotenuse is the chord between the two arc centres.
pub fn triangular_support(m: &ResolvedMeasurements) -> (PanelPath, PanelSize) {
    let t = m.thickness;
    let x = m.height / 4.0;
    let y = m.diameter / 2.0;
    let r = support_radius(m);

    let beta = (y - r).atan2(x - r).to_degrees();
    let chord = ((x - r).powi(2) + (y - r).powi(2)).sqrt();

    let size = PanelSize::new(x + r + t, y + r + t);
    let segments = vec![
        PathSegment::joint(x),
        PathSegment::corner(90.0, 0.0),
        PathSegment::joint(y),
        PathSegment::corner(90.0 + beta, r),
        PathSegment::line(chord),
        PathSegment::corner(180.0 - beta, r),
    ];

    (PanelPath::new(Pose::new(r, t, 0.0), segments), size)
}

/// Rounded rectangular mounting plate.
pub fn back_plate(m: &ResolvedMeasurements) -> (PanelPath, PanelSize) {
    let width = m.back_plate.plate_width();
    let height = m.height;
    let r = m.plate_radius();

    let mut segments = Vec::with_capacity(8);
    for side in [width, height, width, height] {
        segments.push(PathSegment::line(side - 2.0 * r));
        segments.push(PathSegment::corner(90.0, r));
    }

    (
        PanelPath::new(Pose::new(r, 0.0, 0.0), segments),
        PanelSize::new(width, height),
    )
}

/// Number of C-shaped motifs in the retention ring panel.
pub const RING_MOTIFS: usize = 2;

/// Pair of C-shaped rings that clip around the axle ends.
///
/// The second motif is the first one rotated by 180 degrees. For axles wide
/// enough that each end cap fits inside the other ring's opening the two
/// motifs interlock in one region; otherwise they sit side by side, `t` apart.
pub fn retention_rings(m: &ResolvedMeasurements) -> (Vec<PanelPath>, PanelSize) {
    let t = m.thickness;
    let a = m.axle_diameter;
    let r = a / 2.0;

    let motif = vec![
        PathSegment::line(r - 1.5 * t),
        PathSegment::corner(180.0, r + 3.0 * t),
        PathSegment::line(0.0),
        PathSegment::corner(180.0, 1.5 * t),
        PathSegment::line(0.0),
        PathSegment::corner(-180.0, r),
        PathSegment::line(r - 1.5 * t),
        PathSegment::corner(180.0, 1.5 * t),
    ];

    // A single motif spans (a + 6t) x (a + 3t).
    let first = Pose::new(0.0, a + 1.5 * t, -90.0);
    let (second, size) = if m.rings_interlock() {
        (
            Pose::new(a + 12.0 * t, 2.5 * t, 90.0),
            PanelSize::new(a + 12.0 * t, a + 4.0 * t),
        )
    } else {
        (
            Pose::new(2.0 * a + 13.0 * t, 1.5 * t, 90.0),
            PanelSize::new(2.0 * a + 13.0 * t, a + 3.0 * t),
        )
    };
    let outlines = [first, second]
        .into_iter()
        .take(RING_MOTIFS)
        .map(|start| PanelPath::new(start, motif.clone()))
        .collect();

    (outlines, size)
}
