use log::debug;
use tridot_core::RgbImageView;

use crate::cluster::{cluster_centroid, cluster_pixels, dominant_cluster};
use crate::color::MarkerColor;
use crate::params::DetectorParams;
use crate::types::{ColorClusters, MarkerDetection, MarkerSet};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Three-color marker detector: one clustering pass per marker color.
///
/// Stateless between frames; `detect` is a pure function of the buffer.
#[derive(Clone, Debug, Default)]
pub struct MarkerDetector {
    params: DetectorParams,
}

impl MarkerDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Locate the dominant blob of each marker color.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn detect(&self, img: &RgbImageView<'_>) -> MarkerSet {
        let mut markers = MarkerSet::default();
        for color in MarkerColor::ALL {
            let centroid = cluster_centroid(
                img,
                |rgb| color.matches(rgb, &self.params.colors),
                &self.params.cluster,
            );
            debug!("{} marker: {:?}", color.name(), centroid);
            markers.set(color, centroid);
        }
        markers
    }

    /// Like [`MarkerDetector::detect`], also returning every cluster found.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn detect_with_clusters(&self, img: &RgbImageView<'_>) -> MarkerDetection {
        let mut markers = MarkerSet::default();
        let mut clusters = Vec::with_capacity(MarkerColor::ALL.len());
        for color in MarkerColor::ALL {
            let found = cluster_pixels(
                img,
                |rgb| color.matches(rgb, &self.params.colors),
                &self.params.cluster,
            );
            debug!("{} marker: {} cluster(s)", color.name(), found.len());
            markers.set(color, dominant_cluster(&found).map(|c| c.centroid));
            clusters.push(ColorClusters {
                color,
                clusters: found,
            });
        }
        MarkerDetection { markers, clusters }
    }
}
