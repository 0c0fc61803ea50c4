//! Three-dot marker detection and steering.
//!
//! Pipeline, one frame at a time:
//! - cluster pixels of each marker color (red front, pink center, green rear)
//!   and keep the centroid of the dominant blob per color,
//! - validate that the three centroids are collinear, ordered and evenly
//!   spaced,
//! - compute the rotation that points the front marker at a target.
//!
//! Nothing here keeps state across frames.

pub mod cluster;
pub mod color;
mod detector;
pub mod heading;
mod io;
mod params;
mod types;
pub mod validation;

pub use cluster::{cluster_centroid, cluster_pixels, ClusterParams, ColorCluster};
pub use color::{is_green, is_pink, is_red, ColorThresholds, MarkerColor};
pub use detector::MarkerDetector;
pub use heading::{compute_heading, HeadingResult, SteeringMode, TurnDirection};
pub use io::{frame_status, FrameReport, TridotConfig, TridotIoError};
pub use params::{DetectorParams, ToleranceConfig, ToleranceError};
pub use types::{ColorClusters, MarkerDetection, MarkerSet};
pub use validation::{
    measure_geometry, validate_markers, GeometryMeasurements, InvalidReason, ValidationResult,
};
