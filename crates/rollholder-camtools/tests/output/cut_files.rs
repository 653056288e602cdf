//! G-code, SVG and DXF output of a complete holder

use rollholder_camtools::dxf_export::write_dxf;
use rollholder_camtools::svg_export::to_svg;
use rollholder_camtools::{
    render, FingerJointSettings, GcodeWriter, LaserSettings, RenderedSheet, RollHolderMaker,
    RollHolderParameters, DEFAULT_TOLERANCE,
};

fn rendered(params: RollHolderParameters) -> (RollHolderMaker, RenderedSheet) {
    let maker = RollHolderMaker::new(params).expect("Failed to create RollHolderMaker");
    let sheet = maker.generate().expect("Failed to generate holder");
    let rendered = render(
        &sheet.commands(),
        &FingerJointSettings::default(),
        maker.measurements().thickness,
    )
    .expect("Failed to render sheet");
    (maker, rendered)
}

#[test]
fn test_gcode_stays_inside_sheet_extent() {
    let (maker, sheet) = rendered(RollHolderParameters::default());
    let laser = LaserSettings {
        passes: 1,
        offset_x: 0.0,
        offset_y: 0.0,
        ..Default::default()
    };
    let gcode = GcodeWriter::new(&laser, DEFAULT_TOLERANCE).write(&sheet, maker.measurements());

    let extent = maker.generate().unwrap().extent();
    let (min_x, min_y, _, _) = sheet.bounds(DEFAULT_TOLERANCE).unwrap();
    for line in gcode.lines().filter(|l| l.starts_with("G1 ")) {
        for word in line.split_whitespace() {
            if let Some(x) = word.strip_prefix('X') {
                let x: f32 = x.parse().unwrap();
                assert!(x >= -0.01 && x <= extent.width - min_x + 0.06, "{}", line);
            }
            if let Some(y) = word.strip_prefix('Y') {
                let y: f32 = y.parse().unwrap();
                assert!(y >= -0.01 && y <= extent.height - min_y + 0.06, "{}", line);
            }
        }
    }
}

#[test]
fn test_gcode_header_reports_raised_height() {
    let (maker, sheet) = rendered(RollHolderParameters {
        height: 30.0,
        ..Default::default()
    });
    let gcode =
        GcodeWriter::new(&LaserSettings::default(), DEFAULT_TOLERANCE).write(&sheet, maker.measurements());
    assert!(gcode.contains("; Height: 55 mm (raised to minimum)"));
    assert!(gcode.contains("; Back plate: 1 x"));
}

#[test]
fn test_two_piece_gcode_lists_seven_panels() {
    let (maker, sheet) = rendered(RollHolderParameters {
        one_piece: false,
        ..Default::default()
    });
    let gcode =
        GcodeWriter::new(&LaserSettings::default(), DEFAULT_TOLERANCE).write(&sheet, maker.measurements());
    assert!(gcode.contains("; Panel 5: Back plate"));
    assert!(gcode.contains("; Panel 6: Back plate"));
    assert!(gcode.contains("; Panel 7: Retention rings"));
    assert!(gcode.contains("; Back plate: 2 x 43.00 mm"));
}

#[test]
fn test_svg_and_dxf_cover_all_panels() {
    let (_, sheet) = rendered(RollHolderParameters::default());

    let svg = to_svg(&sheet);
    assert_eq!(svg.matches("<path ").count(), sheet.panels.len());

    let mut dxf = Vec::new();
    write_dxf(&sheet, DEFAULT_TOLERANCE, &mut dxf).expect("Failed to write DXF");
    let text = String::from_utf8_lossy(&dxf);
    for layer in ["1_SIDE_PANEL", "3_TRIANGULAR_SUPPORT", "5_BACK_PLATE", "6_RETENTION_RINGS"] {
        assert!(text.contains(layer), "missing layer {}", layer);
    }
}
