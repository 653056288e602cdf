//! Finger joint edge style
//!
//! Based on the finger joint algorithm from https://github.com/florianfesti/boxes
//! Uses finger/space multiples of thickness for automatic finger calculation.
//! Edge coordinates are given in the frame of the edge: X runs along the
//! edge, Y points into the panel, so fingers protrude towards negative Y.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerJointSettings {
    /// Width of fingers in multiples of thickness
    pub finger: f32,
    /// Space between fingers in multiples of thickness
    pub space: f32,
    /// Space at start and end in multiples of normal spaces
    pub surrounding_spaces: f32,
    /// Extra space to allow fingers to move in/out (multiples of thickness)
    pub play: f32,
    /// Extra material for burn marks (multiples of thickness)
    pub extra_length: f32,
}

impl Default for FingerJointSettings {
    fn default() -> Self {
        Self {
            finger: 2.0,
            space: 2.0,
            surrounding_spaces: 2.0,
            play: 0.0,
            extra_length: 0.0,
        }
    }
}

impl FingerJointSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.finger < 0.0 || self.space < 0.0 {
            return Err("Finger and space widths must not be negative".to_string());
        }
        if (self.space + self.finger).abs() < 0.1 {
            return Err("Finger + space must not be close to zero".to_string());
        }
        if self.surrounding_spaces < 0.0 || self.play < 0.0 || self.extra_length < 0.0 {
            return Err("Surrounding spaces, play and extra length must not be negative".to_string());
        }
        Ok(())
    }

    /// Calculate number of fingers and leftover space for a given length
    pub fn calc_fingers(&self, length: f32, thickness: f32) -> (usize, f32) {
        let space = self.space * thickness;
        let finger = self.finger * thickness;

        // Calculate number of fingers that fit
        let mut fingers = ((length - (self.surrounding_spaces - 1.0) * space)
            / (space + finger))
            .floor()
            .max(0.0) as usize;

        // Shrink surrounding space up to half thickness each side if needed
        if fingers == 0 && length > finger + thickness {
            fingers = 1;
        }

        if finger == 0.0 {
            fingers = 0;
        }

        let leftover = if fingers > 0 {
            length - (fingers as f32) * (space + finger) + space
        } else {
            length
        };

        (fingers, leftover)
    }

    /// Offsets along the edge at which each finger starts.
    fn finger_starts(&self, length: f32, thickness: f32) -> Vec<f32> {
        let (fingers, leftover) = self.calc_fingers(length, thickness);
        let pitch = (self.space + self.finger) * thickness;
        (0..fingers)
            .map(|i| leftover / 2.0 + i as f32 * pitch)
            .collect()
    }

    /// Outline of a finger joint edge of `length`, from `(0, 0)` to `(length, 0)`.
    pub fn edge_points(&self, length: f32, thickness: f32) -> Vec<(f32, f32)> {
        let finger = self.finger * thickness;
        let tip_y = -thickness - self.extra_length * thickness;

        let mut path = vec![(0.0, 0.0)];
        for x in self.finger_starts(length, thickness) {
            path.push((x, 0.0));
            path.push((x, tip_y));
            path.push((x + finger, tip_y));
            path.push((x + finger, 0.0));
        }
        path.push((length, 0.0));
        path
    }

    /// Rectangular slots receiving the fingers of an edge of `length`,
    /// centred on the X axis of the hole frame.
    pub fn hole_rects(&self, length: f32, thickness: f32) -> Vec<[(f32, f32); 4]> {
        let play = self.play * thickness;
        let finger = self.finger * thickness + play;
        let half = (thickness + play) / 2.0;

        self.finger_starts(length, thickness)
            .into_iter()
            .map(|x| {
                let x = x - play / 2.0;
                [
                    (x, -half),
                    (x + finger, -half),
                    (x + finger, half),
                    (x, half),
                ]
            })
            .collect()
    }
}
