use crate::common::PixelGrid;
use crate::pipeline::domain::ImageStatistics;
use image::{GrayImage, Luma};
use imageproc::edges::canny;
use tracing::debug;

pub const DEFAULT_EDGE_LOW_THRESHOLD: f32 = 50.0;
pub const DEFAULT_EDGE_HIGH_THRESHOLD: f32 = 150.0;

/// Extracts brightness, contrast, edge density and channel means from a
/// decoded image. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct ImageStatisticsAnalyzer {
    edge_low_threshold: f32,
    edge_high_threshold: f32,
}

impl ImageStatisticsAnalyzer {
    pub fn new() -> Self {
        Self {
            edge_low_threshold: DEFAULT_EDGE_LOW_THRESHOLD,
            edge_high_threshold: DEFAULT_EDGE_HIGH_THRESHOLD,
        }
    }

    pub fn with_edge_thresholds(mut self, low: f32, high: f32) -> Self {
        self.edge_low_threshold = low;
        self.edge_high_threshold = high;
        self
    }

    /// `PixelGrid` guarantees non-zero dimensions, so every statistic is
    /// well defined.
    pub fn analyze(&self, grid: &PixelGrid) -> ImageStatistics {
        let rgb = grid.rgb();
        let (width, height) = rgb.dimensions();
        let mut gray = GrayImage::new(width, height);

        let (mut sum_r, mut sum_g, mut sum_b) = (0f64, 0f64, 0f64);

        // One-pass mean/variance (Welford), population form
        let mut n = 0f64;
        let mut mean = 0f64;
        let mut m2 = 0f64;

        for (x, y, px) in rgb.enumerate_pixels() {
            let [r, g, b] = px.0;
            sum_r += f64::from(r);
            sum_g += f64::from(g);
            sum_b += f64::from(b);

            let luma = rgb_to_luma(r, g, b);
            n += 1.0;
            let delta = luma - mean;
            mean += delta / n;
            m2 += delta * (luma - mean);

            gray.put_pixel(x, y, Luma([luma.round().clamp(0.0, 255.0) as u8]));
        }

        let edges = canny(&gray, self.edge_low_threshold, self.edge_high_threshold);
        let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();

        let stats = ImageStatistics {
            brightness: mean,
            contrast: (m2 / n).sqrt(),
            edge_density: edge_pixels as f64 / n,
            avg_red: sum_r / n,
            avg_green: sum_g / n,
            avg_blue: sum_b / n,
        };

        debug!(
            "Image statistics {}x{}: brightness={:.1} contrast={:.1} edges={:.3} rgb=({:.0},{:.0},{:.0})",
            width,
            height,
            stats.brightness,
            stats.contrast,
            stats.edge_density,
            stats.avg_red,
            stats.avg_green,
            stats.avg_blue
        );

        stats
    }
}

impl Default for ImageStatisticsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_luma(r: u8, g: u8, b: u8) -> f64 {
    // Rec. 709 luminance
    0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn uniform(value: [u8; 3]) -> PixelGrid {
        PixelGrid::new(ImageBuffer::from_pixel(32, 32, Rgb(value))).unwrap()
    }

    #[test]
    fn test_uniform_image_has_no_contrast_or_edges() {
        let stats = ImageStatisticsAnalyzer::new().analyze(&uniform([200, 200, 200]));
        assert!((stats.brightness - 200.0).abs() < 1e-9);
        assert!(stats.contrast.abs() < 1e-9);
        assert_eq!(stats.edge_density, 0.0);
        assert_eq!(stats.avg_red, 200.0);
        assert_eq!(stats.avg_green, 200.0);
        assert_eq!(stats.avg_blue, 200.0);
    }

    #[test]
    fn test_channel_averages() {
        let stats = ImageStatisticsAnalyzer::new().analyze(&uniform([10, 120, 230]));
        assert_eq!(stats.avg_red, 10.0);
        assert_eq!(stats.avg_green, 120.0);
        assert_eq!(stats.avg_blue, 230.0);
        let expected = 0.2126 * 10.0 + 0.7152 * 120.0 + 0.0722 * 230.0;
        assert!((stats.brightness - expected).abs() < 1e-9);
    }

    #[test]
    fn test_half_black_half_white_contrast() {
        let image = RgbImage::from_fn(32, 32, |x, _| {
            if x < 16 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let stats = ImageStatisticsAnalyzer::new().analyze(&PixelGrid::new(image).unwrap());
        assert!((stats.brightness - 127.5).abs() < 1e-6);
        // population standard deviation of a 50/50 split is half the range
        assert!((stats.contrast - 127.5).abs() < 1e-6);
        assert!(stats.edge_density > 0.0);
        assert!(stats.edge_density < 0.5);
    }

    #[test]
    fn test_checkerboard_has_more_edges_than_split() {
        let analyzer = ImageStatisticsAnalyzer::new();
        let split = RgbImage::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let checker = RgbImage::from_fn(64, 64, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let split_stats = analyzer.analyze(&PixelGrid::new(split).unwrap());
        let checker_stats = analyzer.analyze(&PixelGrid::new(checker).unwrap());
        assert!(checker_stats.edge_density > split_stats.edge_density);
        assert!(checker_stats.edge_density <= 1.0);
    }
}
