//! Property-based invariants of the roll holder generator.
//!
//! 1. Resolved height always clears the axle
//! 2. Every outline closes
//! 3. Four mounting holes per back plate, at least `t` inside the plate
//! 4. Exactly two retention ring motifs
//! 5. Same parameters give the same sheet
//! 6. Reserved boxes never overlap
//! 7. Rendered contours stay inside their reserved boxes
//! 8. The two retention ring motifs never cross

use proptest::prelude::*;
use rollholder_camtools::roll_holder::{
    outline::RING_MOTIFS, HeightPolicy, HoleKind, PanelKind, ResolvedMeasurements,
    RollHolderMaker, RollHolderParameters, CLOSURE_EPSILON,
};
use rollholder_camtools::{
    render, CamToolError, FingerJointSettings, RenderedPanel, DEFAULT_TOLERANCE,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn params_strategy() -> impl Strategy<Value = RollHolderParameters> {
    (
        30.0f32..500.0,
        20.0f32..300.0,
        1.0f32..250.0,
        3.0f32..15.0,
        1.0f32..8.0,
        1.0f32..6.0,
        any::<bool>(),
    )
        .prop_map(
            |(width, diameter, height, axle_factor, screw_hole_diameter, thickness, one_piece)| {
                RollHolderParameters {
                    width,
                    diameter,
                    height,
                    axle_diameter: axle_factor * thickness,
                    screw_hole_diameter,
                    thickness,
                    one_piece,
                    height_policy: HeightPolicy::Clamp,
                }
            },
        )
        .prop_filter("mounting holes must fit the back plate", |params| {
            ResolvedMeasurements::resolve(params).is_ok()
        })
}

fn rendered_rings(params: RollHolderParameters) -> RenderedPanel {
    let maker = RollHolderMaker::new(params).unwrap();
    let sheet = maker.generate().unwrap();
    render(
        &sheet.commands(),
        &FingerJointSettings::default(),
        maker.measurements().thickness,
    )
    .unwrap()
    .panels
    .into_iter()
    .find(|panel| panel.kind == PanelKind::RetentionRings)
    .unwrap()
}

fn cross(o: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Number of proper intersections between the edges of two polylines.
fn crossings(first: &[(f32, f32)], second: &[(f32, f32)]) -> usize {
    let mut count = 0;
    for p in first.windows(2) {
        for q in second.windows(2) {
            let d1 = cross(q[0], q[1], p[0]);
            let d2 = cross(q[0], q[1], p[1]);
            let d3 = cross(p[0], p[1], q[0]);
            let d4 = cross(p[0], p[1], q[1]);
            if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
                count += 1;
            }
        }
    }
    count
}

fn ring_crossings(params: RollHolderParameters) -> usize {
    let contours: Vec<Vec<(f32, f32)>> = rendered_rings(params)
        .polylines(DEFAULT_TOLERANCE)
        .into_iter()
        .map(|line| line.into_iter().map(|p| (p.x, p.y)).collect())
        .collect();
    assert_eq!(contours.len(), RING_MOTIFS);
    crossings(&contours[0], &contours[1])
}

#[test]
fn test_ring_motifs_do_not_cross() {
    for (thickness, axle_diameter) in [(3.0, 25.0), (4.0, 25.0), (3.0, 15.0), (6.0, 25.0), (3.0, 9.0)] {
        let params = RollHolderParameters {
            thickness,
            axle_diameter,
            screw_hole_diameter: 4.0,
            ..Default::default()
        };
        assert_eq!(ring_crossings(params), 0, "t = {}, a = {}", thickness, axle_diameter);
    }
}

proptest! {
    #[test]
    fn height_clears_axle(params in params_strategy()) {
        let maker = RollHolderMaker::new(params.clone()).unwrap();
        let m = maker.measurements();
        prop_assert!(m.height >= params.axle_diameter + 10.0 * params.thickness);
        prop_assert!(m.height >= params.height);
    }

    #[test]
    fn every_outline_closes(params in params_strategy()) {
        let sheet = RollHolderMaker::new(params).unwrap().generate().unwrap();
        for placed in &sheet.panels {
            for outline in &placed.panel.outlines {
                prop_assert!(
                    (outline.turn_sum().abs() - 360.0).abs() < CLOSURE_EPSILON,
                    "{} turns sum to {}",
                    placed.panel.kind,
                    outline.turn_sum()
                );
                prop_assert!(outline.is_closed(), "{} ends at {:?}", placed.panel.kind, outline.end_pose());
            }
        }
    }

    #[test]
    fn mounting_holes_inside_back_plate(params in params_strategy()) {
        let t = params.thickness;
        let sheet = RollHolderMaker::new(params).unwrap().generate().unwrap();
        for plate in sheet.panels_of(PanelKind::BackPlate) {
            let (min_x, min_y, max_x, max_y) = plate.bounds();
            let rounds: Vec<_> = plate
                .panel
                .holes
                .iter()
                .filter_map(|hole| match hole.kind {
                    HoleKind::Round { diameter } => Some((plate.hole_position(hole), diameter)),
                    HoleKind::JointRun { .. } => None,
                })
                .collect();
            prop_assert_eq!(rounds.len(), 4);
            for ((x, y), diameter) in rounds {
                let r = diameter / 2.0;
                prop_assert!(x - r >= min_x + t - 1e-3 && x + r <= max_x - t + 1e-3);
                prop_assert!(y - r >= min_y + t - 1e-3 && y + r <= max_y - t + 1e-3);
            }
        }
    }

    #[test]
    fn two_ring_motifs(params in params_strategy()) {
        let maker = RollHolderMaker::new(params).unwrap();
        prop_assert_eq!(maker.retention_rings().outlines.len(), RING_MOTIFS);
        prop_assert_eq!(RING_MOTIFS, 2);
    }

    #[test]
    fn generation_is_deterministic(params in params_strategy()) {
        let first = RollHolderMaker::new(params.clone()).unwrap().generate().unwrap();
        let second = RollHolderMaker::new(params).unwrap().generate().unwrap();
        prop_assert_eq!(first.commands(), second.commands());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reserved_boxes_do_not_overlap(params in params_strategy()) {
        let sheet = RollHolderMaker::new(params).unwrap().generate().unwrap();
        for pair in sheet.panels.windows(2) {
            let (_, _, prev_max_x, _) = pair[0].bounds();
            let (next_min_x, _, _, _) = pair[1].bounds();
            prop_assert!(prev_max_x <= next_min_x);
        }
    }

    #[test]
    fn strict_policy_rejects_low_plates(params in params_strategy()) {
        let min_height = params.axle_diameter + 10.0 * params.thickness;
        let strict = RollHolderParameters {
            height: min_height * 0.9,
            height_policy: HeightPolicy::Strict,
            ..params
        };
        match RollHolderMaker::new(strict) {
            Err(CamToolError::Parameter(err)) => prop_assert_eq!(err.parameter(), "height"),
            _ => prop_assert!(false, "low plate accepted under strict policy"),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn ring_motifs_never_cross(params in params_strategy()) {
        prop_assert_eq!(ring_crossings(params), 0);
    }

    #[test]
    fn rendered_contours_stay_in_boxes(params in params_strategy()) {
        let maker = RollHolderMaker::new(params).unwrap();
        let sheet = maker.generate().unwrap();
        let rendered = render(
            &sheet.commands(),
            &FingerJointSettings::default(),
            maker.measurements().thickness,
        )
        .unwrap();
        prop_assert_eq!(rendered.panels.len(), sheet.panels.len());

        for (placed, panel) in sheet.panels.iter().zip(&rendered.panels) {
            let (min_x, min_y, max_x, max_y) = placed.bounds();
            for line in panel.polylines(DEFAULT_TOLERANCE) {
                for p in line {
                    prop_assert!(p.x >= min_x - 0.05 && p.x <= max_x + 0.05);
                    prop_assert!(p.y >= min_y - 0.05 && p.y <= max_y + 0.05);
                }
            }
        }
    }
}
