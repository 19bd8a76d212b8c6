//! Colormap lookup tables.
//!
//! A [`Colormap`] is an immutable table of RGB samples evenly spaced over a
//! query domain `[0, domain]`. Lookups round to the nearest sample.

use crate::error::{DepthvizError, Result};

/// Color for missing (NaN) values
pub const BAD_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// A (position, color) anchor used to interpolate a colormap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Position in [0, 1]
    pub position: f32,
    /// RGB color with components in [0, 1]
    pub color: [f32; 3],
}

impl ControlPoint {
    /// Create a control point
    pub const fn new(position: f32, color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// A fixed-size table mapping normalized positions to RGB colors
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    samples: Vec<[f32; 3]>,
    domain: f32,
}

impl Colormap {
    /// Create a colormap from an already sampled palette.
    ///
    /// The samples are taken to be evenly spaced over `[0, domain]`.
    pub fn from_samples(name: &str, samples: Vec<[f32; 3]>, domain: f32) -> Result<Self> {
        if samples.len() < 2 {
            return Err(DepthvizError::InvalidResolution {
                message: format!(
                    "Colormap {} needs at least 2 samples, got {}",
                    name,
                    samples.len()
                ),
            });
        }
        if !(domain.is_finite() && domain > 0.0) {
            return Err(DepthvizError::InvalidResolution {
                message: format!("Colormap {} has invalid domain {}", name, domain),
            });
        }

        Ok(Self {
            name: name.to_string(),
            samples,
            domain,
        })
    }

    /// Get the name of this colormap
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of samples in the table
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a colormap holds at least two samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Upper bound of the query domain used by [`Colormap::at`]
    pub fn domain(&self) -> f32 {
        self.domain
    }

    /// The sampled colors, ordered by position
    pub fn samples(&self) -> &[[f32; 3]] {
        &self.samples
    }

    /// Index of the sample nearest to a normalized position.
    ///
    /// Positions outside [0, 1] saturate at the first or last sample. Callers
    /// rely on this clamp to pin out-of-range values to the extremes of the
    /// table. NaN selects the first sample here; colorization paints NaN
    /// pixels with [`BAD_COLOR`] before reaching this lookup.
    pub fn nearest_index(&self, t: f32) -> usize {
        let last = (self.samples.len() - 1) as f32;
        if t.is_nan() {
            return 0;
        }
        (t * last).round().clamp(0.0, last) as usize
    }

    /// Look up a color by normalized position in [0, 1]
    pub fn sample(&self, t: f32) -> [f32; 3] {
        self.samples[self.nearest_index(t)]
    }

    /// Look up a color by position in `[0, domain]`
    pub fn at(&self, position: f32) -> [f32; 3] {
        self.sample(position / self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_ramp() -> Colormap {
        let samples = vec![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5], [1.0, 1.0, 1.0]];
        Colormap::from_samples("gray", samples, 1.0).unwrap()
    }

    #[test]
    fn test_nearest_index_rounds() {
        let cmap = gray_ramp();
        assert_eq!(cmap.nearest_index(0.0), 0);
        assert_eq!(cmap.nearest_index(0.2), 0);
        assert_eq!(cmap.nearest_index(0.3), 1);
        assert_eq!(cmap.nearest_index(0.8), 2);
        assert_eq!(cmap.nearest_index(1.0), 2);
    }

    #[test]
    fn test_out_of_range_saturates() {
        let cmap = gray_ramp();
        assert_eq!(cmap.sample(-3.0), [0.0, 0.0, 0.0]);
        assert_eq!(cmap.sample(7.5), [1.0, 1.0, 1.0]);
        assert_eq!(cmap.sample(f32::INFINITY), [1.0, 1.0, 1.0]);
        assert_eq!(cmap.sample(f32::NAN), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_at_scales_by_domain() {
        let samples = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let cmap = Colormap::from_samples("scaled", samples, 4.0).unwrap();
        assert_eq!(cmap.at(0.0), [0.0, 0.0, 0.0]);
        assert_eq!(cmap.at(4.0), [1.0, 1.0, 1.0]);
        assert_eq!(cmap.at(1.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_samples_rejects_degenerate_tables() {
        assert!(Colormap::from_samples("one", vec![[0.0, 0.0, 0.0]], 1.0).is_err());
        let two = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        assert!(Colormap::from_samples("zero", two.clone(), 0.0).is_err());
        assert!(Colormap::from_samples("nan", two, f32::NAN).is_err());
    }
}
