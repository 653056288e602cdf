//! Parameter validation and derived measurements.

use super::types::{HeightPolicy, RollHolderParameters};
use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Back plate topology chosen by the `one_piece` flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BackPlateLayout {
    /// One continuous plate spanning both side panels
    OnePiece { width: f32 },
    /// Two independent plates; the second one is emitted mirrored
    TwoPiece { width: f32 },
}

impl BackPlateLayout {
    pub fn plate_width(&self) -> f32 {
        match *self {
            Self::OnePiece { width } | Self::TwoPiece { width } => width,
        }
    }

    pub fn plate_count(&self) -> usize {
        match self {
            Self::OnePiece { .. } => 1,
            Self::TwoPiece { .. } => 2,
        }
    }
}

/// Working measurements derived once per generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMeasurements {
    pub width: f32,
    pub diameter: f32,
    /// Mounting plate height after the clearance clamp
    pub height: f32,
    pub axle_diameter: f32,
    pub screw_hole_diameter: f32,
    pub thickness: f32,
    /// True when the requested height was raised to the clearance minimum
    pub height_clamped: bool,
    pub back_plate: BackPlateLayout,
}

impl ResolvedMeasurements {
    pub fn resolve(params: &RollHolderParameters) -> ParameterResult<Self> {
        let lengths = [
            ("width", params.width),
            ("diameter", params.diameter),
            ("height", params.height),
            ("axle_diameter", params.axle_diameter),
            ("screw_hole_diameter", params.screw_hole_diameter),
            ("thickness", params.thickness),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError::NonPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }

        let t = params.thickness;
        let a = params.axle_diameter;

        if a / 2.0 - 1.5 * t < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "axle_diameter".to_string(),
                reason: format!(
                    "must be at least 3 x thickness ({}) for the retention rings",
                    3.0 * t
                ),
            });
        }

        let min_height = Self::min_height(a, t);
        let mut height = params.height;
        let mut height_clamped = false;
        if height < min_height {
            match params.height_policy {
                HeightPolicy::Clamp => {
                    height = min_height;
                    height_clamped = true;
                }
                HeightPolicy::Strict => {
                    return Err(ParameterError::InvalidValue {
                        name: "height".to_string(),
                        reason: format!(
                            "must be at least axle_diameter + 10 x thickness ({})",
                            min_height
                        ),
                    });
                }
            }
        }

        if height - a - 6.0 * t <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "axle_diameter".to_string(),
                reason: format!("leaves no room for the axle seat below height {}", height),
            });
        }

        let back_plate = if params.one_piece {
            BackPlateLayout::OnePiece {
                width: params.width + height / 2.0 + 2.0 * t,
            }
        } else {
            BackPlateLayout::TwoPiece {
                width: height / 2.0 + t,
            }
        };

        let resolved = Self {
            width: params.width,
            diameter: params.diameter,
            height,
            axle_diameter: a,
            screw_hole_diameter: params.screw_hole_diameter,
            thickness: t,
            height_clamped,
            back_plate,
        };

        let plate = resolved.back_plate.plate_width();
        if resolved.screw_inset() + params.screw_hole_diameter / 2.0 > plate.min(height) / 2.0 {
            return Err(ParameterError::InvalidValue {
                name: "screw_hole_diameter".to_string(),
                reason: format!(
                    "mounting holes do not fit a {:.1} x {:.1} back plate",
                    plate, height
                ),
            });
        }

        Ok(resolved)
    }

    /// Whether the two retention ring motifs can share one region. Each end
    /// cap must fall inside the other ring's opening: it touches the opening
    /// at `a = 22t / 3`, and `a >= 8t` leaves `0.44t` of clearance.
    pub fn rings_interlock(&self) -> bool {
        self.axle_diameter >= 8.0 * self.thickness
    }

    /// Lowest mounting plate that still clears the axle.
    pub fn min_height(axle_diameter: f32, thickness: f32) -> f32 {
        axle_diameter + 10.0 * thickness
    }

    /// Radius of the axle seat arcs on the side panel.
    pub fn seat_radius(&self) -> f32 {
        self.axle_diameter / 2.0 + 3.0 * self.thickness
    }

    /// Angle (degrees) of the chord joining the two seat arcs.
    pub fn seat_angle(&self) -> f32 {
        let run = self.height - self.axle_diameter - 6.0 * self.thickness;
        (self.diameter / 2.0).atan2(run).to_degrees()
    }

    /// Length of the chord joining the two seat arcs.
    pub fn seat_chord(&self) -> f32 {
        let r = self.seat_radius();
        let rise = self.diameter / 2.0;
        ((self.height - 2.0 * r).powi(2) + rise * rise).sqrt()
    }

    /// Distance of the mounting hole centres from the back plate borders:
    /// `3t`, pushed inwards so at least `t` of material surrounds a hole.
    pub fn screw_inset(&self) -> f32 {
        let t = self.thickness;
        (3.0 * t).max(self.screw_hole_diameter / 2.0 + t)
    }

    /// Corner radius of the back plate.
    pub fn plate_radius(&self) -> f32 {
        3.0 * self.thickness
    }
}
