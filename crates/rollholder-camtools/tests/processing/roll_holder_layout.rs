//! Layout of the default holder and its two piece variant

use rollholder_camtools::roll_holder::{
    BackPlateLayout, HeightPolicy, PanelKind, PanelSize, RollHolderMaker, RollHolderParameters,
};
use rollholder_camtools::{CamToolError, ParameterError};

fn params(one_piece: bool) -> RollHolderParameters {
    RollHolderParameters {
        width: 275.0,
        diameter: 120.0,
        height: 80.0,
        axle_diameter: 25.0,
        screw_hole_diameter: 4.0,
        thickness: 3.0,
        one_piece,
        height_policy: HeightPolicy::Clamp,
    }
}

#[test]
fn test_one_piece_holder() {
    let maker = RollHolderMaker::new(params(true)).expect("Failed to create RollHolderMaker");
    let m = maker.measurements();
    assert_eq!(m.height, 80.0);
    assert!(!m.height_clamped);
    assert_eq!(m.back_plate, BackPlateLayout::OnePiece { width: 321.0 });

    let sheet = maker.generate().expect("Failed to generate holder");
    assert_eq!(sheet.count(PanelKind::Side), 2);
    assert_eq!(sheet.count(PanelKind::TriangularSupport), 2);
    assert_eq!(sheet.count(PanelKind::BackPlate), 1);
    assert_eq!(sheet.count(PanelKind::RetentionRings), 1);

    let plate = sheet
        .panels_of(PanelKind::BackPlate)
        .next()
        .expect("back plate emitted");
    assert_eq!(plate.panel.size, PanelSize::new(321.0, 80.0));
}

#[test]
fn test_two_piece_holder() {
    let maker = RollHolderMaker::new(params(false)).expect("Failed to create RollHolderMaker");
    let sheet = maker.generate().expect("Failed to generate holder");

    let plates: Vec<_> = sheet.panels_of(PanelKind::BackPlate).collect();
    assert_eq!(plates.len(), 2);
    for plate in &plates {
        assert_eq!(plate.panel.size, PanelSize::new(43.0, 80.0));
    }
    assert!(!plates[0].transform.mirrored);
    assert!(plates[1].transform.mirrored);
    assert_eq!(plates[0].panel, plates[1].panel);
}

#[test]
fn test_panels_placed_left_to_right() {
    let sheet = RollHolderMaker::new(params(true))
        .unwrap()
        .generate()
        .unwrap();

    // side 80 wide, supports 32 wide, plate 321 wide, 5mm gaps
    let xs: Vec<f32> = sheet.panels.iter().map(|p| p.transform.x).collect();
    assert_eq!(xs, vec![0.0, 85.0, 170.0, 207.0, 244.0, 570.0]);
    assert!(sheet.panels.iter().all(|p| p.transform.y == 0.0));

    let rings = sheet.panels.last().unwrap();
    assert_eq!(rings.panel.size, PanelSize::new(25.0 + 36.0, 25.0 + 12.0));
    assert_eq!(sheet.cursor.x, 570.0 + 61.0 + 5.0);
}

#[test]
fn test_low_height_is_raised() {
    let maker = RollHolderMaker::new(RollHolderParameters {
        height: 40.0,
        ..params(true)
    })
    .unwrap();
    assert_eq!(maker.measurements().height, 55.0);
    assert!(maker.measurements().height_clamped);
    assert_eq!(maker.params().height, 40.0);
}

#[test]
fn test_strict_policy_rejects_low_height() {
    let result = RollHolderMaker::new(RollHolderParameters {
        height: 40.0,
        height_policy: HeightPolicy::Strict,
        ..params(true)
    });
    match result {
        Err(CamToolError::Parameter(err)) => assert_eq!(err.parameter(), "height"),
        other => panic!("expected a height error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_non_positive_lengths_are_named() {
    let cases = [
        ("width", RollHolderParameters { width: 0.0, ..params(true) }),
        ("diameter", RollHolderParameters { diameter: -5.0, ..params(true) }),
        ("thickness", RollHolderParameters { thickness: 0.0, ..params(true) }),
        (
            "screw_hole_diameter",
            RollHolderParameters {
                screw_hole_diameter: f32::NAN,
                ..params(true)
            },
        ),
    ];
    for (name, p) in cases {
        match RollHolderMaker::new(p) {
            Err(CamToolError::Parameter(ParameterError::NonPositive { name: got, .. })) => {
                assert_eq!(got, name)
            }
            other => panic!("{}: unexpected {:?}", name, other.map(|_| ())),
        }
    }
}

#[test]
fn test_parameters_from_json_use_defaults() {
    let params: RollHolderParameters =
        serde_json::from_str(r#"{"width": 300, "axle": 30, "one_piece": false}"#).unwrap();
    assert_eq!(params.width, 300.0);
    assert_eq!(params.axle_diameter, 30.0);
    assert_eq!(params.diameter, 120.0);
    assert!(!params.one_piece);
    assert_eq!(params.height_policy, HeightPolicy::Clamp);
}
