//! Image decoding for color classification
//!
//! Uploaded photos come in any size and format. Before classification they
//! are decoded and resampled to a small fixed thumbnail so the amount of
//! work per request does not depend on the upload.

use crate::color::{ColorClassifier, PixelSample, DEFAULT_SAMPLE_STRIDE};
use crate::error::{Error, Result};
use crate::vocabulary::ColorLabel;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Thumbnail decoding settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    #[serde(default = "default_side")]
    pub width: u32,
    #[serde(default = "default_side")]
    pub height: u32,
    #[serde(default = "default_stride")]
    pub sample_stride: usize,
}

fn default_side() -> u32 {
    100
}

fn default_stride() -> usize {
    DEFAULT_SAMPLE_STRIDE
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: default_side(),
            height: default_side(),
            sample_stride: default_stride(),
        }
    }
}

/// Decodes raw image bytes into a fixed-size pixel buffer
#[derive(Debug, Clone, Default)]
pub struct ThumbnailDecoder {
    config: ThumbnailConfig,
}

impl ThumbnailDecoder {
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Decode and resample to `width x height`, cropping to fill
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<PixelSample>> {
        let img = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode(e.to_string()))?;
        if img.width() == 0 || img.height() == 0 {
            return Err(Error::ImageDecode("image has no pixels".to_string()));
        }

        let resized = img.resize_to_fill(
            self.config.width.max(1),
            self.config.height.max(1),
            FilterType::Lanczos3,
        );
        let rgb = resized.to_rgb8();

        Ok(rgb.pixels().map(|p| PixelSample::from(p.0)).collect())
    }

    /// Dominant colors of an encoded image.
    ///
    /// Decode failures are absorbed: they are logged and reported as the
    /// single fallback label `neutral`.
    pub fn dominant_colors(&self, bytes: &[u8]) -> Vec<ColorLabel> {
        match self.decode(bytes) {
            Ok(pixels) => {
                let colors = ColorClassifier::new(self.config.sample_stride).classify(&pixels);
                tracing::debug!(?colors, pixels = pixels.len(), "extracted dominant colors");
                colors
            }
            Err(e) => {
                tracing::warn!(error = %e, "color extraction failed, falling back to neutral");
                vec![ColorLabel::Neutral]
            }
        }
    }
}
