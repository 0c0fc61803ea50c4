//! Online greedy clustering of predicate-matching pixels.
//!
//! Pixels are visited on a fixed stride in row-major order. Each matching
//! pixel joins the first existing cluster (in creation order) whose running
//! centroid lies within the merge radius, or starts a new one. Clusters are
//! never merged after creation, so the cost is
//! O(matched pixels x live clusters); fine for a handful of marker blobs,
//! slower on scenes full of small same-colored regions.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tridot_core::RgbImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Clustering scan parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    /// Max distance (px) from a cluster centroid for a pixel to join it.
    /// Negative or NaN disables merging.
    pub merge_radius: f32,
    /// Row/column step of the scan. 0 is treated as 1.
    pub stride: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            merge_radius: 100.0,
            stride: 2,
        }
    }
}

/// Summary of one cluster after a pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorCluster {
    pub centroid: Point2<f32>,
    /// Number of sampled pixels absorbed (always >= 1).
    pub count: usize,
}

#[derive(Clone, Copy, Debug)]
struct Cluster {
    sum_x: f64,
    sum_y: f64,
    count: usize,
}

impl Cluster {
    fn seed(x: f64, y: f64) -> Self {
        Self {
            sum_x: x,
            sum_y: y,
            count: 1,
        }
    }

    #[inline]
    fn centroid(&self) -> (f64, f64) {
        let n = self.count as f64;
        (self.sum_x / n, self.sum_y / n)
    }

    #[inline]
    fn add(&mut self, x: f64, y: f64) {
        self.sum_x += x;
        self.sum_y += y;
        self.count += 1;
    }

    fn summary(&self) -> ColorCluster {
        let (cx, cy) = self.centroid();
        ColorCluster {
            centroid: Point2::new(cx as f32, cy as f32),
            count: self.count,
        }
    }
}

fn accumulate<F>(img: &RgbImageView<'_>, predicate: F, params: &ClusterParams) -> Vec<Cluster>
where
    F: Fn([u8; 3]) -> bool,
{
    let stride = params.stride.max(1);
    // negative or NaN radius: nothing merges
    let r2 = (params.merge_radius.max(0.0) as f64).powi(2);
    let mut clusters: Vec<Cluster> = Vec::new();

    for y in (0..img.height).step_by(stride) {
        for x in (0..img.width).step_by(stride) {
            if !predicate(img.rgb(x, y)) {
                continue;
            }
            let (px, py) = (x as f64, y as f64);
            let home = clusters.iter_mut().find(|c| {
                let (cx, cy) = c.centroid();
                let (dx, dy) = (px - cx, py - cy);
                dx * dx + dy * dy < r2
            });
            match home {
                Some(c) => c.add(px, py),
                None => clusters.push(Cluster::seed(px, py)),
            }
        }
    }

    clusters
}

/// All clusters of matching pixels, in creation order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, predicate), fields(width = img.width, height = img.height))
)]
pub fn cluster_pixels<F>(
    img: &RgbImageView<'_>,
    predicate: F,
    params: &ClusterParams,
) -> Vec<ColorCluster>
where
    F: Fn([u8; 3]) -> bool,
{
    accumulate(img, predicate, params)
        .iter()
        .map(Cluster::summary)
        .collect()
}

/// Centroid of the largest cluster of matching pixels.
///
/// Ties go to the cluster created first in scan order. Returns `None` when
/// no pixel matched.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, predicate), fields(width = img.width, height = img.height))
)]
pub fn cluster_centroid<F>(
    img: &RgbImageView<'_>,
    predicate: F,
    params: &ClusterParams,
) -> Option<Point2<f32>>
where
    F: Fn([u8; 3]) -> bool,
{
    let clusters = accumulate(img, predicate, params);
    largest_by(&clusters, |c| c.count).map(|c| c.summary().centroid)
}

/// Largest item by `count`; strict comparison keeps the earliest on ties.
fn largest_by<T>(items: &[T], count: impl Fn(&T) -> usize) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        if best.map(|b| count(item) > count(b)).unwrap_or(true) {
            best = Some(item);
        }
    }
    best
}

/// Largest cluster from a [`cluster_pixels`] listing, earliest on ties.
pub fn dominant_cluster(clusters: &[ColorCluster]) -> Option<&ColorCluster> {
    largest_by(clusters, |c| c.count)
}
