use serde::{Deserialize, Serialize};

use crate::cluster::ClusterParams;
use crate::color::ColorThresholds;

/// Runtime-adjustable tolerances. Read-only for the duration of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Merge radius (px) of the color clusterer.
    pub cluster_radius: f32,
    /// Max perpendicular distance (px) of pink from the red-green line.
    pub collinearity_threshold: f32,
    /// Max slack (px) of `|dRP + dPG - dRG|`, i.e. how far pink may sit
    /// outside the red-green segment.
    ///
    /// Kept separate from `collinearity_threshold` even though both default
    /// to the same value: they bound different geometric quantities.
    pub ordering_threshold: f32,
    /// Relative slack when requiring pink at the red-green midpoint.
    pub interval_tolerance: f32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            cluster_radius: 100.0,
            collinearity_threshold: 50.0,
            ordering_threshold: 50.0,
            interval_tolerance: 0.8,
        }
    }
}

/// A tolerance that is negative or not finite.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[error("{field} must be finite and non-negative, got {value}")]
pub struct ToleranceError {
    pub field: &'static str,
    pub value: f32,
}

impl ToleranceConfig {
    /// Reject values the clusterer and validator cannot interpret.
    pub fn validate(&self) -> Result<(), ToleranceError> {
        let fields = [
            ("cluster_radius", self.cluster_radius),
            ("collinearity_threshold", self.collinearity_threshold),
            ("ordering_threshold", self.ordering_threshold),
            ("interval_tolerance", self.interval_tolerance),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ToleranceError { field, value });
            }
        }
        Ok(())
    }
}

/// Parameters of the three-color marker detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorParams {
    #[serde(default)]
    pub cluster: ClusterParams,
    #[serde(default)]
    pub colors: ColorThresholds,
}

impl DetectorParams {
    /// Detector parameters whose merge radius follows `tolerances`.
    pub fn with_tolerances(tolerances: &ToleranceConfig) -> Self {
        let mut params = Self::default();
        params.cluster.merge_radius = tolerances.cluster_radius;
        params
    }
}
