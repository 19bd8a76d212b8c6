//! Built-in colormaps.
//!
//! `rainbow` reproduces the OpenCV rainbow palette from a five-point table.
//! `magma` resamples the perceptually uniform magma palette shipped by
//! `colorgrad`.

use super::builder::{build_from_control_points, build_high_resolution};
use super::colormap::{Colormap, ControlPoint};
use crate::error::Result;

/// Number of entries in the standard low-resolution magma palette
pub const MAGMA_BASE_SIZE: usize = 256;

/// Control points of the OpenCV rainbow palette
pub const OPENCV_RAINBOW: [ControlPoint; 5] = [
    ControlPoint::new(0.0, [1.0, 0.0, 0.0]),
    ControlPoint::new(0.4, [1.0, 1.0, 0.0]),
    ControlPoint::new(0.6, [0.0, 1.0, 0.0]),
    ControlPoint::new(0.8, [0.0, 0.0, 1.0]),
    ControlPoint::new(1.0, [0.6, 0.0, 1.0]),
];

/// Red to violet rainbow with `resolution` samples
pub fn opencv_rainbow(resolution: usize) -> Result<Colormap> {
    build_from_control_points("rainbow", &OPENCV_RAINBOW, resolution)
}

/// The 256-entry magma palette as provided by `colorgrad`
pub fn magma_base() -> Result<Colormap> {
    let gradient = colorgrad::magma();
    let last = (MAGMA_BASE_SIZE - 1) as f64;
    let samples = (0..MAGMA_BASE_SIZE)
        .map(|i| {
            let color = gradient.at(i as f64 / last);
            [color.r as f32, color.g as f32, color.b as f32]
        })
        .collect();

    Colormap::from_samples("magma", samples, 1.0)
}

/// Magma resampled to `resolution` samples over [0, 1]
pub fn magma(resolution: usize) -> Result<Colormap> {
    build_high_resolution(&magma_base()?, resolution, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_color_near(actual: [f32; 3], expected: [f32; 3], eps: f32) {
        for c in 0..3 {
            assert!(
                (actual[c] - expected[c]).abs() <= eps,
                "actual = {:?}, expected = {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_rainbow_reference_colors() {
        let rainbow = opencv_rainbow(1000).unwrap();
        assert_eq!(rainbow.len(), 1000);
        assert_color_near(rainbow.sample(0.0), [1.0, 0.0, 0.0], 1e-6);
        assert_color_near(rainbow.sample(0.4), [1.0, 1.0, 0.0], 5e-3);
        assert_color_near(rainbow.sample(0.6), [0.0, 1.0, 0.0], 5e-3);
        assert_color_near(rainbow.sample(0.8), [0.0, 0.0, 1.0], 5e-3);
        assert_color_near(rainbow.sample(1.0), [0.6, 0.0, 1.0], 1e-6);
    }

    #[test]
    fn test_magma_base_is_dark_to_light() {
        let base = magma_base().unwrap();
        assert_eq!(base.len(), MAGMA_BASE_SIZE);

        let first = base.samples()[0];
        let last = base.samples()[MAGMA_BASE_SIZE - 1];
        let brightness = |c: [f32; 3]| c[0] + c[1] + c[2];
        assert!(brightness(first) < 0.1);
        assert!(brightness(last) > 2.0);
    }

    #[test]
    fn test_magma_keeps_base_endpoints() {
        let base = magma_base().unwrap();
        let high = magma(1000).unwrap();
        assert_eq!(high.len(), 1000);
        assert_color_near(high.sample(0.0), base.samples()[0], 1e-6);
        assert_color_near(high.sample(1.0), base.samples()[MAGMA_BASE_SIZE - 1], 1e-6);
    }
}
