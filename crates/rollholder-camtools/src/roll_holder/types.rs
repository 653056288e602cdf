//! Type definitions for the Roll Holder generator

use serde::{Deserialize, Serialize};

/// Tolerance (degrees) for the corner-angle closure check.
pub const CLOSURE_EPSILON: f32 = 1e-3;

/// Tolerance (mm) when comparing the end point of an outline with its start.
pub const POSITION_EPSILON: f32 = 1e-2;

/// What to do when the mounting plate is too low to clear the axle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightPolicy {
    /// Raise the height to the clearance minimum and log a warning
    #[default]
    Clamp,
    /// Reject the parameters
    Strict,
}

impl std::fmt::Display for HeightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for HeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Unknown height policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollHolderParameters {
    /// Length of the axle (mm)
    pub width: f32,
    /// Maximum diameter of the roll (mm)
    pub diameter: f32,
    /// Height of the mounting plate (mm)
    pub height: f32,
    /// Diameter of the axle including play (mm)
    #[serde(alias = "axle")]
    pub axle_diameter: f32,
    /// Diameter of the mounting holes (mm)
    #[serde(alias = "screw_holes")]
    pub screw_hole_diameter: f32,
    /// Material thickness (mm)
    pub thickness: f32,
    /// Continuous back plate instead of two separate holders
    pub one_piece: bool,
    pub height_policy: HeightPolicy,
}

impl Default for RollHolderParameters {
    fn default() -> Self {
        Self {
            width: 275.0,
            diameter: 120.0,
            height: 80.0,
            axle_diameter: 25.0,
            screw_hole_diameter: 4.0,
            thickness: 3.0,
            one_piece: true,
            height_policy: HeightPolicy::Clamp,
        }
    }
}

/// Position and heading (degrees, counter-clockwise from +X) of the drawing head.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    /// Pose reached after drawing `segment` from this pose.
    pub fn advance(&self, segment: &PathSegment) -> Pose {
        match *segment {
            PathSegment::Edge { length, .. } => {
                let rad = self.heading.to_radians();
                Pose::new(
                    self.x + length * rad.cos(),
                    self.y + length * rad.sin(),
                    self.heading,
                )
            }
            PathSegment::Corner { angle, radius } => {
                let heading = self.heading + angle;
                if radius <= 0.0 || angle == 0.0 {
                    return Pose::new(self.x, self.y, heading);
                }
                let (cx, cy) = self.corner_center(angle, radius);
                let side = angle.signum() * radius;
                let end = heading.to_radians();
                Pose::new(cx + side * end.sin(), cy - side * end.cos(), heading)
            }
        }
    }

    /// Center of the arc drawn by a corner of `angle` degrees with `radius`.
    pub fn corner_center(&self, angle: f32, radius: f32) -> (f32, f32) {
        let rad = self.heading.to_radians();
        let side = angle.signum() * radius;
        (self.x - side * rad.sin(), self.y + side * rad.cos())
    }

    /// Map a point given in this pose's frame into the parent frame.
    pub fn to_parent(&self, x: f32, y: f32) -> (f32, f32) {
        let rad = self.heading.to_radians();
        let (sin, cos) = rad.sin_cos();
        (self.x + x * cos - y * sin, self.y + x * sin + y * cos)
    }
}

/// How a straight boundary segment is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeStyle {
    /// Straight cut
    Plain,
    /// Finger joint mating with a joint hole run on another panel
    FingerJoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    Edge { length: f32, style: EdgeStyle },
    /// Turn by `angle` degrees (positive = left) along an arc of `radius`
    Corner { angle: f32, radius: f32 },
}

impl PathSegment {
    pub fn line(length: f32) -> Self {
        Self::Edge {
            length,
            style: EdgeStyle::Plain,
        }
    }

    pub fn joint(length: f32) -> Self {
        Self::Edge {
            length,
            style: EdgeStyle::FingerJoint,
        }
    }

    pub fn corner(angle: f32, radius: f32) -> Self {
        Self::Corner { angle, radius }
    }
}

/// One closed boundary: a start pose and the segments walked from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPath {
    pub start: Pose,
    pub segments: Vec<PathSegment>,
}

impl PanelPath {
    pub fn new(start: Pose, segments: Vec<PathSegment>) -> Self {
        Self { start, segments }
    }

    /// Signed sum of all corner angles in degrees.
    pub fn turn_sum(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| match s {
                PathSegment::Corner { angle, .. } => *angle,
                PathSegment::Edge { .. } => 0.0,
            })
            .sum()
    }

    /// Pose reached after walking every segment.
    pub fn end_pose(&self) -> Pose {
        self.segments
            .iter()
            .fold(self.start, |pose, segment| pose.advance(segment))
    }

    /// True when the corner angles sum to ±360° and the walk returns to the start point.
    pub fn is_closed(&self) -> bool {
        let turns = self.turn_sum().abs();
        let end = self.end_pose();
        (turns - 360.0).abs() < CLOSURE_EPSILON
            && (end.x - self.start.x).abs() < POSITION_EPSILON
            && (end.y - self.start.y).abs() < POSITION_EPSILON
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HoleKind {
    Round { diameter: f32 },
    /// Row of finger slots along the local X axis of the hole frame
    JointRun { length: f32 },
}

/// A hole, in the anchor frame of its panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub x: f32,
    pub y: f32,
    pub orientation: f32,
    pub kind: HoleKind,
}

impl HoleSpec {
    pub fn round(x: f32, y: f32, diameter: f32) -> Self {
        Self {
            x,
            y,
            orientation: 0.0,
            kind: HoleKind::Round { diameter },
        }
    }

    pub fn joint_run(x: f32, y: f32, length: f32, orientation: f32) -> Self {
        Self {
            x,
            y,
            orientation,
            kind: HoleKind::JointRun { length },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Side,
    TriangularSupport,
    BackPlate,
    RetentionRings,
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Side => write!(f, "Side panel"),
            Self::TriangularSupport => write!(f, "Triangular support"),
            Self::BackPlate => write!(f, "Back plate"),
            Self::RetentionRings => write!(f, "Retention rings"),
        }
    }
}

/// Reserved rectangle of a panel on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f32,
    pub height: f32,
}

impl PanelSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub outlines: Vec<PanelPath>,
    /// Holes relative to the start pose of the first outline
    pub holes: Vec<HoleSpec>,
    pub size: PanelSize,
}

impl Panel {
    /// Frame the hole coordinates are expressed in.
    pub fn anchor(&self) -> Pose {
        self.outlines
            .first()
            .map(|o| o.start)
            .unwrap_or(Pose::new(0.0, 0.0, 0.0))
    }
}

/// Way the cursor advances past a reserved region.
///
/// The holder itself is laid out as one strip with `Right`; `Up` starts a
/// new row for callers composing their own sheets through [`super::Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Up,
}

/// Allocation request passed to `Cursor::reserve` together with the panel
/// size: advance direction, and whether the panel is drawn mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub direction: Direction,
    pub mirrored: bool,
}

impl Placement {
    pub const RIGHT: Placement = Placement {
        direction: Direction::Right,
        mirrored: false,
    };
    pub const RIGHT_MIRRORED: Placement = Placement {
        direction: Direction::Right,
        mirrored: true,
    };
    pub const UP: Placement = Placement {
        direction: Direction::Up,
        mirrored: false,
    };
}

/// Translation of a panel onto the sheet, optionally mirrored about the
/// vertical centre line of its reserved box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelTransform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub mirrored: bool,
}

impl PanelTransform {
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        if self.mirrored {
            (self.x + self.width - x, self.y + y)
        } else {
            (self.x + x, self.y + y)
        }
    }

    pub fn to_lyon(&self) -> lyon::math::Transform {
        if self.mirrored {
            lyon::math::Transform::new(-1.0, 0.0, 0.0, 1.0, self.x + self.width, self.y)
        } else {
            lyon::math::Transform::new(1.0, 0.0, 0.0, 1.0, self.x, self.y)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPanel {
    pub panel: Panel,
    pub transform: PanelTransform,
}

impl PlacedPanel {
    /// Reserved rectangle in sheet coordinates: (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.transform.x,
            self.transform.y,
            self.transform.x + self.panel.size.width,
            self.transform.y + self.panel.size.height,
        )
    }

    /// Hole center in sheet coordinates.
    pub fn hole_position(&self, hole: &HoleSpec) -> (f32, f32) {
        let (x, y) = self.panel.anchor().to_parent(hole.x, hole.y);
        self.transform.apply(x, y)
    }
}
