//! `image` crate adapters: decoded frames, file-backed frame source.

use log::debug;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tridot_core::{PixelLayout, RgbImage};

use crate::pipeline::{FrameSource, SourceUnavailable};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the `image`-backed helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error(transparent)]
    Frame(#[from] tridot_core::ImageError),
}

/// Owned frame from any decoded image. RGBA sources keep their alpha
/// channel; everything else is converted to RGB.
pub fn frame_from_dynamic(img: ::image::DynamicImage) -> Result<RgbImage, DetectError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let frame = match img {
        ::image::DynamicImage::ImageRgba8(rgba) => {
            RgbImage::from_raw(width, height, PixelLayout::Rgba, rgba.into_raw())?
        }
        other => RgbImage::from_raw(width, height, PixelLayout::Rgb, other.to_rgb8().into_raw())?,
    };
    Ok(frame)
}

/// Decode an image file into a frame.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
pub fn load_frame(path: impl AsRef<Path>) -> Result<RgbImage, DetectError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| DetectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    frame_from_dynamic(img)
}

/// Plays back image files, one per tick, in the given order.
///
/// A file that cannot be decoded makes that tick unavailable; playback
/// continues with the next file.
#[derive(Clone, Debug, Default)]
pub struct ImageFileSource {
    pending: VecDeque<PathBuf>,
    current: Option<PathBuf>,
}

impl ImageFileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            pending: paths.into_iter().map(Into::into).collect(),
            current: None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Path of the frame most recently pulled.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self) -> Result<RgbImage, SourceUnavailable> {
        let Some(path) = self.pending.pop_front() else {
            self.current = None;
            return Err(SourceUnavailable::new("no more image files"));
        };
        debug!("reading frame {}", path.display());
        let frame = load_frame(&path).map_err(|e| SourceUnavailable::new(e.to_string()));
        self.current = Some(path);
        frame
    }

    fn frame_label(&self) -> Option<String> {
        self.current.as_ref().map(|p| p.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_frames_keep_layout() {
        let img = ::image::DynamicImage::ImageRgba8(::image::RgbaImage::from_pixel(
            4,
            3,
            ::image::Rgba([1, 2, 3, 255]),
        ));
        let frame = frame_from_dynamic(img).expect("frame");
        assert_eq!(frame.layout, PixelLayout::Rgba);
        assert_eq!(frame.view().rgb(3, 2), [1, 2, 3]);
    }

    #[test]
    fn gray_frames_become_rgb() {
        let img = ::image::DynamicImage::ImageLuma8(::image::GrayImage::from_pixel(
            2,
            2,
            ::image::Luma([77]),
        ));
        let frame = frame_from_dynamic(img).expect("frame");
        assert_eq!(frame.layout, PixelLayout::Rgb);
        assert_eq!(frame.view().rgb(1, 1), [77, 77, 77]);
    }

    #[test]
    fn unreadable_file_is_unavailable_and_playback_continues() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.png");
        ::image::RgbImage::from_pixel(6, 5, ::image::Rgb([9, 9, 9]))
            .save(&good)
            .expect("save");
        let missing = dir.path().join("missing.png");

        let mut source = ImageFileSource::new([missing.clone(), good.clone()]);
        assert_eq!(source.remaining(), 2);
        assert!(source.next_frame().is_err());
        assert_eq!(source.current(), Some(missing.as_path()));
        let frame = source.next_frame().expect("frame");
        assert_eq!((frame.width, frame.height), (6, 5));
        assert_eq!(source.frame_label(), Some(good.display().to_string()));
        assert!(source.is_exhausted());
        assert!(source.next_frame().is_err());
    }
}
