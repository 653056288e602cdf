//! Roll Holder Maker
//!
//! Wall mounted holder for kitchen rolls and similar, carried by a dowel or
//! pipe used as axle. Derived from the RollHolder generator of
//! https://github.com/florianfesti/boxes
//!
//! A run resolves the parameters once, then emits side panels, triangular
//! supports, the back plate(s) and the retention rings onto one sheet.

pub mod dimensions;
pub mod holes;
pub mod outline;
pub mod sheet;
pub mod types;

pub use dimensions::{BackPlateLayout, ResolvedMeasurements};
pub use sheet::{Cursor, DrawCommand, Sheet, SheetComposer};
pub use types::*;

use crate::error::{CamToolError, CamToolResult};

/// Gap left between neighbouring panels on the sheet (mm).
pub const DEFAULT_SPACING: f32 = 5.0;

pub struct RollHolderMaker {
    params: RollHolderParameters,
    measurements: ResolvedMeasurements,
    spacing: f32,
}

impl RollHolderMaker {
    pub fn new(params: RollHolderParameters) -> CamToolResult<Self> {
        let measurements = ResolvedMeasurements::resolve(&params)?;
        if measurements.height_clamped {
            tracing::warn!(
                requested = params.height,
                clamped = measurements.height,
                "Mounting plate height raised to clear the axle"
            );
        }
        Ok(Self {
            params,
            measurements,
            spacing: DEFAULT_SPACING,
        })
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    pub fn params(&self) -> &RollHolderParameters {
        &self.params
    }

    pub fn measurements(&self) -> &ResolvedMeasurements {
        &self.measurements
    }

    pub fn side_panel(&self) -> Panel {
        let (outline, size) = outline::side_panel(&self.measurements);
        Panel {
            kind: PanelKind::Side,
            outlines: vec![outline],
            holes: holes::side_panel_holes(&self.measurements),
            size,
        }
    }

    pub fn triangular_support(&self) -> Panel {
        let (outline, size) = outline::triangular_support(&self.measurements);
        Panel {
            kind: PanelKind::TriangularSupport,
            outlines: vec![outline],
            holes: Vec::new(),
            size,
        }
    }

    pub fn back_plate(&self) -> Panel {
        let (outline, size) = outline::back_plate(&self.measurements);
        Panel {
            kind: PanelKind::BackPlate,
            outlines: vec![outline],
            holes: holes::back_plate_holes(&self.measurements),
            size,
        }
    }

    pub fn retention_rings(&self) -> Panel {
        let (outlines, size) = outline::retention_rings(&self.measurements);
        Panel {
            kind: PanelKind::RetentionRings,
            outlines,
            holes: Vec::new(),
            size,
        }
    }

    /// Lay out every panel of one holder.
    pub fn generate(&self) -> CamToolResult<Sheet> {
        let mut composer = SheetComposer::new(self.spacing);

        for _ in 0..2 {
            self.emit(&mut composer, self.side_panel(), Placement::RIGHT)?;
        }
        for _ in 0..2 {
            self.emit(&mut composer, self.triangular_support(), Placement::RIGHT)?;
        }
        match self.measurements.back_plate {
            BackPlateLayout::OnePiece { .. } => {
                self.emit(&mut composer, self.back_plate(), Placement::RIGHT)?;
            }
            BackPlateLayout::TwoPiece { .. } => {
                self.emit(&mut composer, self.back_plate(), Placement::RIGHT)?;
                self.emit(&mut composer, self.back_plate(), Placement::RIGHT_MIRRORED)?;
            }
        }
        self.emit(&mut composer, self.retention_rings(), Placement::RIGHT)?;

        let sheet = composer.finish()?;
        let extent = sheet.extent();
        tracing::info!(
            panels = sheet.panels.len(),
            height = self.measurements.height,
            one_piece = self.params.one_piece,
            sheet_width = extent.width,
            sheet_height = extent.height,
            "Generated roll holder layout"
        );
        Ok(sheet)
    }

    fn emit(
        &self,
        composer: &mut SheetComposer,
        panel: Panel,
        placement: Placement,
    ) -> CamToolResult<()> {
        if let Some(open) = panel.outlines.iter().find(|o| !o.is_closed()) {
            return Err(CamToolError::GeometryError(format!(
                "{} outline does not close: turns sum to {:.4} degrees, ends at {:?}",
                panel.kind,
                open.turn_sum(),
                open.end_pose()
            )));
        }
        composer.place(panel, placement)
    }
}
