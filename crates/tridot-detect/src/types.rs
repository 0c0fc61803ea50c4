use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::cluster::ColorCluster;
use crate::color::MarkerColor;

/// One optional centroid per marker color for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub red: Option<Point2<f32>>,
    pub pink: Option<Point2<f32>>,
    pub green: Option<Point2<f32>>,
}

impl MarkerSet {
    pub fn get(&self, color: MarkerColor) -> Option<Point2<f32>> {
        match color {
            MarkerColor::Red => self.red,
            MarkerColor::Pink => self.pink,
            MarkerColor::Green => self.green,
        }
    }

    pub(crate) fn set(&mut self, color: MarkerColor, point: Option<Point2<f32>>) {
        match color {
            MarkerColor::Red => self.red = point,
            MarkerColor::Pink => self.pink = point,
            MarkerColor::Green => self.green = point,
        }
    }

    /// `(red, pink, green)` when all three were found.
    pub fn triple(&self) -> Option<(Point2<f32>, Point2<f32>, Point2<f32>)> {
        Some((self.red?, self.pink?, self.green?))
    }

    /// Colors with no centroid this frame.
    pub fn missing(&self) -> Vec<MarkerColor> {
        MarkerColor::ALL
            .into_iter()
            .filter(|&c| self.get(c).is_none())
            .collect()
    }
}

/// Clusters found for one color, kept for reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorClusters {
    pub color: MarkerColor,
    pub clusters: Vec<ColorCluster>,
}

/// Marker set plus the per-color clusters it was picked from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerDetection {
    pub markers: MarkerSet,
    pub clusters: Vec<ColorClusters>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_requires_all_markers() {
        let mut set = MarkerSet {
            red: Some(Point2::new(0.0, 0.0)),
            pink: None,
            green: Some(Point2::new(10.0, 0.0)),
        };
        assert!(set.triple().is_none());
        assert_eq!(set.missing(), vec![MarkerColor::Pink]);

        set.set(MarkerColor::Pink, Some(Point2::new(5.0, 0.0)));
        assert!(set.triple().is_some());
        assert!(set.missing().is_empty());
    }
}
