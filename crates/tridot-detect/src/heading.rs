//! Steering correction toward a target point.
//!
//! The pivot sits halfway between the pink and red markers, biased toward
//! the front of the object rather than at the marker-set centroid. The
//! current heading is the direction pivot -> red.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tridot_core::signed_angle_deg;

use crate::types::MarkerSet;

/// Turn direction. Positive rotations (image y pointing down) turn right.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

/// `Simple` below 90° of rotation, `Combined` at or above.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SteeringMode {
    Simple,
    Combined,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadingResult {
    pub pivot: Point2<f32>,
    /// Signed rotation in degrees, in (-180, 180].
    pub rotation_degrees: f32,
    pub direction: TurnDirection,
    /// Steering magnitude in [0, 100].
    pub magnitude_percent: u8,
    pub mode: SteeringMode,
}

impl HeadingResult {
    /// Short human-readable steering line, e.g. `right 25% (simple)`.
    pub fn steering_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HeadingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        };
        let mode = match self.mode {
            SteeringMode::Simple => "simple",
            SteeringMode::Combined => "combined",
        };
        write!(f, "{dir} {}% ({mode})", self.magnitude_percent)
    }
}

/// Midpoint of pink and red.
#[inline]
pub fn pivot_point(red: Point2<f32>, pink: Point2<f32>) -> Point2<f32> {
    pink + (red - pink) / 2.0
}

/// Classify a normalized rotation into direction, magnitude and mode.
pub fn classify_rotation(rotation_degrees: f32) -> (TurnDirection, u8, SteeringMode) {
    let abs = rotation_degrees.abs();
    let (mode, span) = if abs < 90.0 {
        (SteeringMode::Simple, abs)
    } else {
        (SteeringMode::Combined, abs - 90.0)
    };
    let magnitude = (span / 180.0 * 100.0).round().clamp(0.0, 100.0) as u8;
    let direction = if rotation_degrees > 0.0 {
        TurnDirection::Right
    } else {
        TurnDirection::Left
    };
    (direction, magnitude, mode)
}

/// Heading from explicit red and pink positions.
pub fn heading_from_points(
    red: Point2<f32>,
    pink: Point2<f32>,
    target: Point2<f32>,
) -> HeadingResult {
    let pivot = pivot_point(red, pink);
    let to_red = red - pivot;
    let to_target = target - pivot;
    let current = to_red.y.atan2(to_red.x);
    let wanted = to_target.y.atan2(to_target.x);
    let rotation_degrees = signed_angle_deg(current, wanted);
    let (direction, magnitude_percent, mode) = classify_rotation(rotation_degrees);
    HeadingResult {
        pivot,
        rotation_degrees,
        direction,
        magnitude_percent,
        mode,
    }
}

/// Rotation needed to point the front (red) marker at `target`.
///
/// Meant to be called after the set validated; returns `None` only if the
/// red or pink marker is missing.
pub fn compute_heading(markers: &MarkerSet, target: Point2<f32>) -> Option<HeadingResult> {
    Some(heading_from_points(markers.red?, markers.pink?, target))
}
