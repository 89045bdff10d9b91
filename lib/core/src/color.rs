//! Dominant color extraction
//!
//! Reduces a pixel buffer to at most three [`ColorLabel`]s by bucketing
//! each sampled pixel into a coarse color group and ranking the groups by
//! how often they occur.

use crate::vocabulary::ColorLabel;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Number of labels returned by [`ColorClassifier::classify`]
pub const MAX_DOMINANT_COLORS: usize = 3;

/// Default stride: one pixel out of every four is classified
pub const DEFAULT_SAMPLE_STRIDE: usize = 4;

const GRAYSCALE_SPREAD: u8 = 30;
const DARK_CEILING: u8 = 80;
const LIGHT_FLOOR: u8 = 200;
const SECONDARY_CHANNEL: u8 = 100;

/// A single 8-bit RGB sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelSample {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Bucket this pixel into a coarse color group
    pub fn color_group(&self) -> ColorLabel {
        let (r, g, b) = (self.r, self.g, self.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        if max - min < GRAYSCALE_SPREAD {
            return if max < DARK_CEILING {
                ColorLabel::Black
            } else if max > LIGHT_FLOOR {
                ColorLabel::White
            } else {
                ColorLabel::Gray
            };
        }

        if r > g && r > b {
            if g > SECONDARY_CHANNEL { ColorLabel::Orange } else { ColorLabel::Red }
        } else if g > r && g > b {
            if b > SECONDARY_CHANNEL { ColorLabel::Teal } else { ColorLabel::Green }
        } else if b > r && b > g {
            if r > SECONDARY_CHANNEL { ColorLabel::Purple } else { ColorLabel::Blue }
        } else {
            // two channels tie for the maximum
            ColorLabel::Neutral
        }
    }
}

impl From<[u8; 3]> for PixelSample {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// Frequency-ranked color classifier
#[derive(Debug, Clone, Copy)]
pub struct ColorClassifier {
    sample_stride: usize,
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_STRIDE)
    }
}

impl ColorClassifier {
    /// A stride of zero is treated as one (every pixel)
    pub fn new(sample_stride: usize) -> Self {
        Self {
            sample_stride: sample_stride.max(1),
        }
    }

    pub fn sample_stride(&self) -> usize {
        self.sample_stride
    }

    /// Return up to three labels, most frequent first.
    ///
    /// Ties keep the order in which the labels were first seen. An empty
    /// buffer carries no color signal and yields `[neutral]`.
    pub fn classify(&self, pixels: &[PixelSample]) -> Vec<ColorLabel> {
        let mut counts: Vec<(ColorLabel, usize)> = Vec::new();
        let mut slots: AHashMap<ColorLabel, usize> = AHashMap::new();

        for pixel in pixels.iter().step_by(self.sample_stride) {
            let label = pixel.color_group();
            match slots.get(&label) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(label, counts.len());
                    counts.push((label, 1));
                }
            }
        }

        if counts.is_empty() {
            return vec![ColorLabel::Neutral];
        }

        // stable: equal counts keep first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(MAX_DOMINANT_COLORS)
            .map(|(label, _)| label)
            .collect()
    }

    /// Classify an interleaved byte buffer with `channels` bytes per pixel.
    ///
    /// Only the first three channels of each pixel are read, so RGBA input
    /// works unchanged. Trailing bytes that do not form a whole pixel are
    /// ignored.
    pub fn classify_interleaved(&self, data: &[u8], channels: usize) -> Vec<ColorLabel> {
        if channels < 3 {
            return vec![ColorLabel::Neutral];
        }
        let pixels: Vec<PixelSample> = data
            .chunks_exact(channels)
            .map(|px| PixelSample::new(px[0], px[1], px[2]))
            .collect();
        self.classify(&pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(pixel: PixelSample, n: usize) -> Vec<PixelSample> {
        vec![pixel; n]
    }

    #[test]
    fn test_grayscale_branch() {
        assert_eq!(PixelSample::new(10, 20, 30).color_group(), ColorLabel::Black);
        assert_eq!(PixelSample::new(250, 240, 230).color_group(), ColorLabel::White);
        assert_eq!(PixelSample::new(120, 130, 140).color_group(), ColorLabel::Gray);
        // max exactly at the thresholds stays gray
        assert_eq!(PixelSample::new(80, 80, 80).color_group(), ColorLabel::Gray);
        assert_eq!(PixelSample::new(200, 200, 200).color_group(), ColorLabel::Gray);
    }

    #[test]
    fn test_hue_families() {
        assert_eq!(PixelSample::new(200, 50, 40).color_group(), ColorLabel::Red);
        assert_eq!(PixelSample::new(230, 140, 20).color_group(), ColorLabel::Orange);
        assert_eq!(PixelSample::new(30, 180, 60).color_group(), ColorLabel::Green);
        assert_eq!(PixelSample::new(20, 180, 150).color_group(), ColorLabel::Teal);
        assert_eq!(PixelSample::new(20, 40, 200).color_group(), ColorLabel::Blue);
        assert_eq!(PixelSample::new(150, 40, 200).color_group(), ColorLabel::Purple);
    }

    #[test]
    fn test_tied_channels_are_neutral() {
        assert_eq!(PixelSample::new(200, 200, 50).color_group(), ColorLabel::Neutral);
        assert_eq!(PixelSample::new(50, 200, 200).color_group(), ColorLabel::Neutral);
    }

    #[test]
    fn test_classify_ranks_by_frequency() {
        let mut pixels = solid(PixelSample::new(20, 40, 200), 10);
        pixels.extend(solid(PixelSample::new(200, 50, 40), 30));
        pixels.extend(solid(PixelSample::new(250, 250, 250), 20));
        pixels.extend(solid(PixelSample::new(0, 0, 0), 5));

        let classifier = ColorClassifier::new(1);
        assert_eq!(
            classifier.classify(&pixels),
            vec![ColorLabel::Red, ColorLabel::White, ColorLabel::Blue]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut pixels = solid(PixelSample::new(20, 180, 60), 4);
        pixels.extend(solid(PixelSample::new(200, 50, 40), 4));

        let classifier = ColorClassifier::new(1);
        assert_eq!(
            classifier.classify(&pixels),
            vec![ColorLabel::Green, ColorLabel::Red]
        );
    }

    #[test]
    fn test_stride_skips_pixels() {
        // only indices 0, 4, 8 are read
        let mut pixels = Vec::new();
        for i in 0..12 {
            if i % 4 == 0 {
                pixels.push(PixelSample::new(20, 40, 200));
            } else {
                pixels.push(PixelSample::new(200, 50, 40));
            }
        }
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify(&pixels), vec![ColorLabel::Blue]);
    }

    #[test]
    fn test_empty_buffer_is_neutral() {
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify(&[]), vec![ColorLabel::Neutral]);
        assert_eq!(classifier.classify_interleaved(&[1, 2], 3), vec![ColorLabel::Neutral]);
        assert_eq!(classifier.classify_interleaved(&[1, 2, 3, 4], 2), vec![ColorLabel::Neutral]);
    }

    #[test]
    fn test_interleaved_rgba() {
        let data = [200u8, 50, 40, 255, 200, 50, 40, 0];
        let classifier = ColorClassifier::new(1);
        assert_eq!(classifier.classify_interleaved(&data, 4), vec![ColorLabel::Red]);
    }

    #[test]
    fn test_never_more_than_three() {
        let pixels: Vec<PixelSample> = (0..=255u8)
            .flat_map(|v| [PixelSample::new(v, 255 - v, v / 2), PixelSample::new(v, v, 255 - v)])
            .collect();
        let labels = ColorClassifier::new(1).classify(&pixels);
        assert!(!labels.is_empty() && labels.len() <= MAX_DOMINANT_COLORS);
    }
}
