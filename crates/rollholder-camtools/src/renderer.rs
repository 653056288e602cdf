//! Turtle renderer for the roll holder draw command stream.
//!
//! Walks the [`DrawCommand`]s of a sheet and builds one `lyon` path per panel
//! in sheet coordinates. Finger joint edges and joint hole runs are expanded
//! with [`FingerJointSettings`]; arcs become cubic béziers.

use crate::error::{CamToolError, CamToolResult};
use crate::finger_joint::FingerJointSettings;
use crate::roll_holder::{DrawCommand, EdgeStyle, PanelKind, PanelTransform, PathSegment, Pose};
use lyon::algorithms::path::iterator::PathIterator;
use lyon::geom::Arc;
use lyon::math::{point, vector, Angle, Point};
use lyon::path::path::Builder;
use lyon::path::{Path, Winding};

/// Default flattening tolerance (mm).
pub const DEFAULT_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct RenderedPanel {
    pub index: usize,
    pub kind: PanelKind,
    /// Outlines and holes, already placed on the sheet
    pub path: Path,
}

impl RenderedPanel {
    /// Flatten every contour into a polyline. Closed contours repeat their first point.
    pub fn polylines(&self, tolerance: f32) -> Vec<Vec<Point>> {
        let mut lines: Vec<Vec<Point>> = Vec::new();
        for event in self.path.iter().flattened(tolerance) {
            match event {
                lyon::path::Event::Begin { at } => lines.push(vec![at]),
                lyon::path::Event::Line { to, .. } => {
                    if let Some(line) = lines.last_mut() {
                        line.push(to);
                    }
                }
                lyon::path::Event::End { first, close, .. } => {
                    if close {
                        if let Some(line) = lines.last_mut() {
                            line.push(first);
                        }
                    }
                }
                _ => {}
            }
        }
        lines
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderedSheet {
    pub panels: Vec<RenderedPanel>,
}

impl RenderedSheet {
    /// Bounding box of all flattened contours: (min_x, min_y, max_x, max_y).
    pub fn bounds(&self, tolerance: f32) -> Option<(f32, f32, f32, f32)> {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for panel in &self.panels {
            for line in panel.polylines(tolerance) {
                for p in line {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
            }
        }
        if min_x.is_finite() && min_y.is_finite() {
            Some((min_x, min_y, max_x, max_y))
        } else {
            None
        }
    }
}

struct OpenPanel {
    index: usize,
    kind: PanelKind,
    transform: PanelTransform,
    builder: Builder,
    contour_open: bool,
}

pub struct Turtle<'a> {
    joints: &'a FingerJointSettings,
    thickness: f32,
    pose: Pose,
    panel: Option<OpenPanel>,
    rendered: RenderedSheet,
}

impl<'a> Turtle<'a> {
    pub fn new(joints: &'a FingerJointSettings, thickness: f32) -> Self {
        Self {
            joints,
            thickness,
            pose: Pose::new(0.0, 0.0, 0.0),
            panel: None,
            rendered: RenderedSheet::default(),
        }
    }

    /// Render a complete command stream.
    pub fn render(mut self, commands: &[DrawCommand]) -> CamToolResult<RenderedSheet> {
        for command in commands {
            self.execute(command)?;
        }
        if self.panel.is_some() {
            return Err(CamToolError::GenerationFailed(
                "command stream ended inside a panel".to_string(),
            ));
        }
        Ok(self.rendered)
    }

    pub fn execute(&mut self, command: &DrawCommand) -> CamToolResult<()> {
        match *command {
            DrawCommand::BeginPanel {
                index,
                kind,
                transform,
            } => {
                if self.panel.is_some() {
                    return Err(CamToolError::GenerationFailed(format!(
                        "panel {} started before the previous one ended",
                        index
                    )));
                }
                self.panel = Some(OpenPanel {
                    index,
                    kind,
                    transform,
                    builder: Path::builder(),
                    contour_open: false,
                });
                self.pose = Pose::new(0.0, 0.0, 0.0);
            }
            DrawCommand::MoveTo { x, y, rotation } => {
                let panel = Self::open_panel(&mut self.panel)?;
                if panel.contour_open {
                    panel.builder.end(false);
                }
                panel.builder.begin(point(x, y));
                panel.contour_open = true;
                self.pose = Pose::new(x, y, rotation);
            }
            DrawCommand::Line { length, style } => {
                let panel = Self::open_contour(&mut self.panel)?;
                if style == EdgeStyle::FingerJoint {
                    for (px, py) in self.joints.edge_points(length, self.thickness).into_iter().skip(1) {
                        let (x, y) = self.pose.to_parent(px, py);
                        panel.builder.line_to(point(x, y));
                    }
                } else if length.abs() > f32::EPSILON {
                    let end = self.pose.advance(&PathSegment::line(length));
                    panel.builder.line_to(point(end.x, end.y));
                }
                self.pose = self.pose.advance(&PathSegment::Edge { length, style });
            }
            DrawCommand::Corner { angle, radius } => {
                let panel = Self::open_contour(&mut self.panel)?;
                if radius > 0.0 && angle != 0.0 {
                    let (cx, cy) = self.pose.corner_center(angle, radius);
                    let start_angle = (self.pose.y - cy).atan2(self.pose.x - cx);
                    let arc = Arc {
                        center: point(cx, cy),
                        radii: vector(radius, radius),
                        start_angle: Angle::radians(start_angle),
                        sweep_angle: Angle::degrees(angle),
                        x_rotation: Angle::radians(0.0),
                    };
                    let builder = &mut panel.builder;
                    arc.for_each_cubic_bezier(&mut |ctrl| {
                        builder.cubic_bezier_to(ctrl.ctrl1, ctrl.ctrl2, ctrl.to);
                    });
                }
                self.pose = self.pose.advance(&PathSegment::corner(angle, radius));
            }
            DrawCommand::ClosePath => {
                let panel = Self::open_contour(&mut self.panel)?;
                panel.builder.close();
                panel.contour_open = false;
            }
            DrawCommand::Hole { x, y, diameter } => {
                let panel = Self::open_panel(&mut self.panel)?;
                Self::end_contour(panel);
                panel.builder.add_ellipse(
                    point(x, y),
                    vector(diameter / 2.0, diameter / 2.0),
                    Angle::radians(0.0),
                    Winding::Positive,
                );
            }
            DrawCommand::JointHoleRun {
                x,
                y,
                orientation,
                length,
            } => {
                let panel = Self::open_panel(&mut self.panel)?;
                Self::end_contour(panel);
                let frame = Pose::new(x, y, orientation);
                for rect in self.joints.hole_rects(length, self.thickness) {
                    let mut corners = rect.iter().map(|&(px, py)| {
                        let (wx, wy) = frame.to_parent(px, py);
                        point(wx, wy)
                    });
                    if let Some(first) = corners.next() {
                        panel.builder.begin(first);
                        for corner in corners {
                            panel.builder.line_to(corner);
                        }
                        panel.builder.close();
                    }
                }
            }
            DrawCommand::EndPanel => {
                let Some(mut panel) = self.panel.take() else {
                    return Err(CamToolError::GenerationFailed(
                        "end of panel without a matching begin".to_string(),
                    ));
                };
                Self::end_contour(&mut panel);
                let path = panel.builder.build().transformed(&panel.transform.to_lyon());
                self.rendered.panels.push(RenderedPanel {
                    index: panel.index,
                    kind: panel.kind,
                    path,
                });
            }
        }
        Ok(())
    }

    fn open_panel(panel: &mut Option<OpenPanel>) -> CamToolResult<&mut OpenPanel> {
        panel.as_mut().ok_or_else(|| {
            CamToolError::GenerationFailed("drawing command outside of a panel".to_string())
        })
    }

    fn open_contour(panel: &mut Option<OpenPanel>) -> CamToolResult<&mut OpenPanel> {
        let panel = Self::open_panel(panel)?;
        if !panel.contour_open {
            return Err(CamToolError::GenerationFailed(
                "edge drawn before positioning the pen".to_string(),
            ));
        }
        Ok(panel)
    }

    fn end_contour(panel: &mut OpenPanel) {
        if panel.contour_open {
            panel.builder.end(false);
            panel.contour_open = false;
        }
    }
}

/// Render a command stream with the given joint settings.
pub fn render(
    commands: &[DrawCommand],
    joints: &FingerJointSettings,
    thickness: f32,
) -> CamToolResult<RenderedSheet> {
    Turtle::new(joints, thickness).render(commands)
}
