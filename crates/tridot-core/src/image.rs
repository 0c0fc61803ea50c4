use serde::{Deserialize, Serialize};

/// Errors raised when wrapping a raw sample buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid sample buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),
}

/// Interleaved sample layout of a frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    #[default]
    Rgb,
    Rgba,
}

impl PixelLayout {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    pub fn from_channels(channels: usize) -> Result<Self, ImageError> {
        match channels {
            3 => Ok(PixelLayout::Rgb),
            4 => Ok(PixelLayout::Rgba),
            n => Err(ImageError::UnsupportedChannels(n)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub data: &'a [u8], // row-major, len = w*h*channels
}

impl<'a> RgbImageView<'a> {
    /// Wrap a row-major sample buffer, checking its length against the
    /// declared dimensions.
    pub fn new(
        width: usize,
        height: usize,
        layout: PixelLayout,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        let expected = expected_len(width, height, layout)?;
        if data.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// RGB triple at `(x, y)`; alpha is ignored.
    ///
    /// Coordinates must be inside the image.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let ch = self.layout.channels();
        let base = (y * self.width + x) * ch;
        [self.data[base], self.data[base + 1], self.data[base + 2]]
    }
}

#[derive(Clone, Debug)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn from_raw(
        width: usize,
        height: usize,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        RgbImageView::new(width, height, layout, &data)?;
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Solid-color RGB frame.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            layout: PixelLayout::Rgb,
            data,
        }
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            layout: self.layout,
            data: &self.data,
        }
    }

    /// Overwrite the RGB part of one pixel. Out-of-bounds writes are dropped.
    pub fn put_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let base = (y * self.width + x) * self.layout.channels();
        self.data[base..base + 3].copy_from_slice(&rgb);
    }
}

fn expected_len(width: usize, height: usize, layout: PixelLayout) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(layout.channels()))
        .ok_or(ImageError::InvalidDimensions { width, height })
}
