//! JSON configuration and report helpers.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::color::ColorThresholds;
use crate::detector::MarkerDetector;
use crate::heading::HeadingResult;
use crate::params::{DetectorParams, ToleranceConfig, ToleranceError};
use crate::types::{ColorClusters, MarkerSet};
use crate::validation::{GeometryMeasurements, ValidationResult};

#[derive(thiserror::Error, Debug)]
pub enum TridotIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Tolerance(#[from] ToleranceError),
    #[error("invalid config: stride must be at least 1")]
    ZeroStride,
}

fn default_stride() -> usize {
    2
}

/// Persistable detector + validator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TridotConfig {
    #[serde(default)]
    pub tolerances: ToleranceConfig,
    #[serde(default)]
    pub colors: ColorThresholds,
    /// Scan stride of the clusterer.
    #[serde(default = "default_stride")]
    pub stride: usize,
}

impl Default for TridotConfig {
    fn default() -> Self {
        Self {
            tolerances: ToleranceConfig::default(),
            colors: ColorThresholds::default(),
            stride: default_stride(),
        }
    }
}

impl TridotConfig {
    /// Load a JSON config from disk and validate it.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TridotIoError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TridotIoError> {
        if self.stride == 0 {
            return Err(TridotIoError::ZeroStride);
        }
        self.tolerances.validate()?;
        Ok(())
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TridotIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn detector_params(&self) -> DetectorParams {
        let mut params = DetectorParams::with_tolerances(&self.tolerances);
        params.cluster.stride = self.stride;
        params.colors = self.colors;
        params
    }

    pub fn build_detector(&self) -> MarkerDetector {
        MarkerDetector::new(self.detector_params())
    }
}

/// Everything computed for one frame, in serializable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    #[serde(default)]
    pub image_path: Option<String>,
    pub width: usize,
    pub height: usize,
    pub markers: MarkerSet,
    #[serde(default)]
    pub clusters: Vec<ColorClusters>,
    #[serde(default)]
    pub geometry: Option<GeometryMeasurements>,
    pub validation: ValidationResult,
    #[serde(default)]
    pub target: Option<Point2<f32>>,
    #[serde(default)]
    pub heading: Option<HeadingResult>,
    pub status: String,
}

impl FrameReport {
    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TridotIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TridotIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Status line for a frame: the steering label when a heading exists,
/// otherwise the validation status.
pub fn frame_status(
    validation: &ValidationResult,
    target: Option<Point2<f32>>,
    heading: Option<&HeadingResult>,
) -> String {
    match (validation, heading) {
        (_, Some(h)) => format!("turn {h}"),
        (ValidationResult::Valid, None) if target.is_none() => {
            "markers aligned, waiting for a target".to_string()
        }
        (v, None) => v.status_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::InvalidReason;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tridot.json");
        let cfg = TridotConfig {
            tolerances: ToleranceConfig {
                interval_tolerance: 0.25,
                ..ToleranceConfig::default()
            },
            stride: 1,
            ..TridotConfig::default()
        };
        cfg.write_json(&path).expect("write");
        let back = TridotConfig::load_json(&path).expect("load");
        assert_eq!(back, cfg);
    }

    #[test]
    fn out_of_range_config_fails_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tridot.json");

        fs::write(&path, r#"{"tolerances":{"cluster_radius":-100.0}}"#).expect("write");
        let err = TridotConfig::load_json(&path).expect_err("negative radius");
        assert!(matches!(
            err,
            TridotIoError::Tolerance(ToleranceError {
                field: "cluster_radius",
                ..
            })
        ));

        fs::write(&path, r#"{"stride":0}"#).expect("write");
        let err = TridotConfig::load_json(&path).expect_err("zero stride");
        assert!(matches!(err, TridotIoError::ZeroStride));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: TridotConfig =
            serde_json::from_str(r#"{"tolerances":{"collinearity_threshold":12.5}}"#)
                .expect("parse");
        assert_eq!(cfg.tolerances.collinearity_threshold, 12.5);
        assert_eq!(cfg.tolerances.interval_tolerance, 0.8);
        assert_eq!(cfg.stride, 2);
        assert_eq!(cfg.colors, ColorThresholds::default());
    }

    #[test]
    fn detector_params_follow_config() {
        let cfg = TridotConfig {
            tolerances: ToleranceConfig {
                cluster_radius: 42.0,
                ..ToleranceConfig::default()
            },
            stride: 3,
            ..TridotConfig::default()
        };
        let params = cfg.detector_params();
        assert_eq!(params.cluster.merge_radius, 42.0);
        assert_eq!(params.cluster.stride, 3);
    }

    #[test]
    fn status_prefers_heading_then_validation() {
        let invalid = ValidationResult::Invalid(InvalidReason::NotCollinear);
        assert_eq!(
            frame_status(&invalid, None, None),
            InvalidReason::NotCollinear.message()
        );
        assert_eq!(
            frame_status(&ValidationResult::Valid, None, None),
            "markers aligned, waiting for a target"
        );
    }
}
