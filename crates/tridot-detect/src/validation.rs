//! Geometric validity checks for a detected marker set.
//!
//! Checks run in a fixed order and the first failure wins:
//! presence, collinearity, ordering, equal intervals.

use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

use crate::params::ToleranceConfig;
use crate::types::MarkerSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Why a marker set was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    InsufficientMarkers,
    NotCollinear,
    WrongOrder,
    UnequalIntervals,
}

impl InvalidReason {
    pub fn message(self) -> &'static str {
        match self {
            InvalidReason::InsufficientMarkers => "not all three markers are visible",
            InvalidReason::NotCollinear => "markers are not on one line",
            InvalidReason::WrongOrder => "pink marker is not between red and green",
            InvalidReason::UnequalIntervals => "pink marker is not centered between red and green",
        }
    }
}

/// Validation verdict.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum ValidationResult {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => Some(*reason),
        }
    }

    /// User-facing status line.
    pub fn status_message(&self) -> &'static str {
        match self {
            ValidationResult::Valid => "markers aligned",
            ValidationResult::Invalid(reason) => reason.message(),
        }
    }
}

/// Raw quantities the checks compare against their thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryMeasurements {
    /// dist(red, pink)
    pub d_rp: f32,
    /// dist(pink, green)
    pub d_pg: f32,
    /// dist(red, green)
    pub d_rg: f32,
    /// Perpendicular distance of pink from line(red, green).
    pub line_distance: f32,
    /// `|d_rp + d_pg - d_rg|`
    pub ordering_residual: f32,
}

/// Perpendicular distance of `p` from the infinite line through `a` and `b`.
///
/// Coincident `a` and `b` give 0.
pub fn point_line_distance(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let ab = b - a;
    let len = ab.norm();
    if len == 0.0 {
        return 0.0;
    }
    let ap = p - a;
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

pub fn measure_geometry(
    red: Point2<f32>,
    pink: Point2<f32>,
    green: Point2<f32>,
) -> GeometryMeasurements {
    let d_rp = distance(&red, &pink);
    let d_pg = distance(&pink, &green);
    let d_rg = distance(&red, &green);
    GeometryMeasurements {
        d_rp,
        d_pg,
        d_rg,
        line_distance: point_line_distance(pink, red, green),
        ordering_residual: (d_rp + d_pg - d_rg).abs(),
    }
}

/// `value` lies strictly inside `reference * (1 ± tol)`.
#[inline]
fn within_band(value: f32, reference: f32, tol: f32) -> bool {
    value > reference * (1.0 - tol) && value < reference * (1.0 + tol)
}

/// Check the marker set for presence, collinearity, ordering and spacing.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(markers, config)))]
pub fn validate_markers(markers: &MarkerSet, config: &ToleranceConfig) -> ValidationResult {
    let Some((red, pink, green)) = markers.triple() else {
        return ValidationResult::Invalid(InvalidReason::InsufficientMarkers);
    };
    validate_geometry(&measure_geometry(red, pink, green), config)
}

/// Threshold the precomputed measurements.
pub fn validate_geometry(m: &GeometryMeasurements, config: &ToleranceConfig) -> ValidationResult {
    if m.line_distance >= config.collinearity_threshold {
        return ValidationResult::Invalid(InvalidReason::NotCollinear);
    }
    if m.ordering_residual >= config.ordering_threshold {
        return ValidationResult::Invalid(InvalidReason::WrongOrder);
    }
    let tol = config.interval_tolerance;
    if !within_band(m.d_pg, m.d_rp, tol) || !within_band(m.d_rg, 2.0 * m.d_rp, tol) {
        return ValidationResult::Invalid(InvalidReason::UnequalIntervals);
    }
    ValidationResult::Valid
}
