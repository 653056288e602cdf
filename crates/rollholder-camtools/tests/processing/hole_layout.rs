//! Joint hole runs and mounting holes in sheet coordinates

use rollholder_camtools::roll_holder::{
    HoleKind, PanelKind, PlacedPanel, RollHolderMaker, RollHolderParameters,
};

fn holes_relative_to_box(placed: &PlacedPanel) -> Vec<(f32, f32, HoleKind)> {
    placed
        .panel
        .holes
        .iter()
        .map(|hole| {
            let (x, y) = placed.hole_position(hole);
            (x - placed.transform.x, y - placed.transform.y, hole.kind)
        })
        .collect()
}

#[test]
fn test_two_piece_plates_mirror_each_other() {
    let sheet = RollHolderMaker::new(RollHolderParameters {
        one_piece: false,
        ..Default::default()
    })
    .unwrap()
    .generate()
    .unwrap();

    let plates: Vec<_> = sheet.panels_of(PanelKind::BackPlate).collect();
    let left = holes_relative_to_box(plates[0]);
    let right = holes_relative_to_box(plates[1]);
    let width = plates[0].panel.size.width;

    assert_eq!(left.len(), right.len());
    for ((lx, ly, lk), (rx, ry, rk)) in left.iter().zip(&right) {
        assert!((lx - (width - rx)).abs() < 1e-4, "{} vs {}", lx, rx);
        assert!((ly - ry).abs() < 1e-4);
        assert_eq!(lk, rk);
    }
}

#[test]
fn test_mounting_holes_near_plate_corners() {
    let sheet = RollHolderMaker::new(RollHolderParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    let plate = sheet.panels_of(PanelKind::BackPlate).next().unwrap();

    let mut rounds: Vec<(f32, f32)> = holes_relative_to_box(plate)
        .into_iter()
        .filter(|(_, _, kind)| matches!(kind, HoleKind::Round { .. }))
        .map(|(x, y, _)| (x, y))
        .collect();
    rounds.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(rounds, vec![(9.0, 9.0), (9.0, 71.0), (312.0, 9.0), (312.0, 71.0)]);
}

#[test]
fn test_side_joint_runs_span_plate_height() {
    let sheet = RollHolderMaker::new(RollHolderParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    let plate = sheet.panels_of(PanelKind::BackPlate).next().unwrap();

    let runs: Vec<_> = plate
        .panel
        .holes
        .iter()
        .filter(|h| h.orientation == 90.0)
        .collect();
    assert_eq!(runs.len(), 2);
    for run in runs {
        assert_eq!(run.kind, HoleKind::JointRun { length: 80.0 });
        let (_, y) = plate.hole_position(run);
        assert_eq!(y, 0.0);
    }
}

#[test]
fn test_support_slot_sits_below_axle_seat() {
    let sheet = RollHolderMaker::new(RollHolderParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    for side in sheet.panels_of(PanelKind::Side) {
        let holes = holes_relative_to_box(side);
        assert_eq!(holes.len(), 1);
        let (x, y, kind) = holes[0];
        assert_eq!(x, 80.0 - 21.5);
        assert_eq!(y, 3.0);
        assert_eq!(kind, HoleKind::JointRun { length: 60.0 });
    }
}
