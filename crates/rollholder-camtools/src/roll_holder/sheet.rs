//! Sequential placement of panels onto one output sheet.

use super::types::{
    Direction, EdgeStyle, HoleKind, Panel, PanelKind, PanelSize, PanelTransform, PathSegment,
    PlacedPanel, Placement, Pose,
};
use crate::error::{CamToolError, CamToolResult};
use serde::{Deserialize, Serialize};

/// Insertion point for the next panel. Placement returns a new cursor
/// instead of mutating this one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub spacing: f32,
}

impl Cursor {
    pub fn new(spacing: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            spacing,
        }
    }

    /// Reserve `size` at the cursor and return where the panel goes together
    /// with the advanced cursor.
    pub fn reserve(self, size: PanelSize, placement: Placement) -> (PanelTransform, Cursor) {
        let transform = PanelTransform {
            x: self.x,
            y: self.y,
            width: size.width,
            mirrored: placement.mirrored,
        };
        let next = match placement.direction {
            Direction::Right => Cursor {
                x: self.x + size.width + self.spacing,
                ..self
            },
            Direction::Up => Cursor {
                y: self.y + size.height + self.spacing,
                ..self
            },
        };
        (transform, next)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ComposerState {
    Idle,
    Drawing {
        transform: PanelTransform,
        size: PanelSize,
        next: Cursor,
    },
}

/// Panels in emission order with their sheet placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub panels: Vec<PlacedPanel>,
    pub cursor: Cursor,
}

impl Sheet {
    pub fn count(&self, kind: PanelKind) -> usize {
        self.panels.iter().filter(|p| p.panel.kind == kind).count()
    }

    pub fn panels_of(&self, kind: PanelKind) -> impl Iterator<Item = &PlacedPanel> {
        self.panels.iter().filter(move |p| p.panel.kind == kind)
    }

    /// Overall extent of all reserved boxes.
    pub fn extent(&self) -> PanelSize {
        let (w, h) = self.panels.iter().fold((0.0f32, 0.0f32), |(w, h), p| {
            let (_, _, max_x, max_y) = p.bounds();
            (w.max(max_x), h.max(max_y))
        });
        PanelSize::new(w, h)
    }

    /// Flatten the sheet into the primitive command stream consumed by a
    /// drawing backend.
    pub fn commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        for (index, placed) in self.panels.iter().enumerate() {
            commands.push(DrawCommand::BeginPanel {
                index,
                kind: placed.panel.kind,
                transform: placed.transform,
            });
            for outline in &placed.panel.outlines {
                commands.push(DrawCommand::MoveTo {
                    x: outline.start.x,
                    y: outline.start.y,
                    rotation: outline.start.heading,
                });
                for segment in &outline.segments {
                    commands.push(match *segment {
                        PathSegment::Edge { length, style } => DrawCommand::Line { length, style },
                        PathSegment::Corner { angle, radius } => {
                            DrawCommand::Corner { angle, radius }
                        }
                    });
                }
                commands.push(DrawCommand::ClosePath);
            }

            let anchor = placed.panel.anchor();
            for hole in &placed.panel.holes {
                let (x, y) = anchor.to_parent(hole.x, hole.y);
                commands.push(match hole.kind {
                    HoleKind::Round { diameter } => DrawCommand::Hole { x, y, diameter },
                    HoleKind::JointRun { length } => DrawCommand::JointHoleRun {
                        x,
                        y,
                        orientation: anchor.heading + hole.orientation,
                        length,
                    },
                });
            }
            commands.push(DrawCommand::EndPanel);
        }
        commands
    }
}

/// Primitive drawing command. Coordinates are panel-local; the backend
/// applies the transform announced by `BeginPanel`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    BeginPanel {
        index: usize,
        kind: PanelKind,
        transform: PanelTransform,
    },
    MoveTo {
        x: f32,
        y: f32,
        rotation: f32,
    },
    Line {
        length: f32,
        style: EdgeStyle,
    },
    Corner {
        angle: f32,
        radius: f32,
    },
    ClosePath,
    Hole {
        x: f32,
        y: f32,
        diameter: f32,
    },
    JointHoleRun {
        x: f32,
        y: f32,
        orientation: f32,
        length: f32,
    },
    EndPanel,
}

/// Places panels left to right. Each panel is bracketed by
/// [`begin_panel`](Self::begin_panel) and [`end_panel`](Self::end_panel).
pub struct SheetComposer {
    cursor: Cursor,
    state: ComposerState,
    panels: Vec<PlacedPanel>,
}

impl SheetComposer {
    pub fn new(spacing: f32) -> Self {
        Self {
            cursor: Cursor::new(spacing),
            state: ComposerState::Idle,
            panels: Vec::new(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ComposerState::Drawing { .. })
    }

    /// Reserve a region and return the origin the panel is drawn from.
    pub fn begin_panel(&mut self, size: PanelSize, placement: Placement) -> CamToolResult<Pose> {
        if self.is_drawing() {
            return Err(CamToolError::Layout(
                "begin_panel called while a panel is open".to_string(),
            ));
        }
        let (transform, next) = self.cursor.reserve(size, placement);
        self.state = ComposerState::Drawing {
            transform,
            size,
            next,
        };
        Ok(Pose::new(transform.x, transform.y, 0.0))
    }

    /// Close the open region with the drawn panel and advance the cursor.
    pub fn end_panel(&mut self, panel: Panel) -> CamToolResult<()> {
        let ComposerState::Drawing {
            transform,
            size,
            next,
        } = self.state
        else {
            return Err(CamToolError::Layout(
                "end_panel called without an open panel".to_string(),
            ));
        };
        if panel.size != size {
            return Err(CamToolError::Layout(format!(
                "{} does not fit its reserved region ({} x {})",
                panel.kind, size.width, size.height
            )));
        }

        tracing::debug!(
            kind = %panel.kind,
            x = transform.x,
            y = transform.y,
            mirrored = transform.mirrored,
            "Placed panel"
        );

        self.panels.push(PlacedPanel { panel, transform });
        self.cursor = next;
        self.state = ComposerState::Idle;
        Ok(())
    }

    /// Reserve, place and close in one step.
    pub fn place(&mut self, panel: Panel, placement: Placement) -> CamToolResult<()> {
        self.begin_panel(panel.size, placement)?;
        self.end_panel(panel)
    }

    pub fn finish(self) -> CamToolResult<Sheet> {
        if self.is_drawing() {
            return Err(CamToolError::Layout(
                "sheet finished with a panel still open".to_string(),
            ));
        }
        Ok(Sheet {
            panels: self.panels,
            cursor: self.cursor,
        })
    }
}
