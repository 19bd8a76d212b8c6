//! Colormap construction by piecewise-linear interpolation.
//!
//! Two construction modes are supported: resampling an existing palette to a
//! higher resolution, and interpolating a hand-written control-point table.

use super::colormap::{Colormap, ControlPoint};
use crate::error::{DepthvizError, Result};

/// Default number of samples for built colormaps
pub const DEFAULT_RESOLUTION: usize = 1000;

/// Piecewise-linear interpolation of `fp` (sampled at increasing `xp`) at `x`.
///
/// Queries outside `[xp[0], xp[last]]` clamp to the endpoint values. A NaN
/// query or an empty table yields NaN.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    if x.is_nan() || xp.is_empty() {
        return f64::NAN;
    }
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // First control point strictly to the right of x
    let upper = xp.partition_point(|&p| p <= x);
    let lower = upper - 1;
    let span = xp[upper] - xp[lower];
    let t = (x - xp[lower]) / span;
    fp[lower] * (1.0 - t) + fp[upper] * t
}

/// `n` evenly spaced values over `[start, stop]`, both ends included
fn linspace(start: f64, stop: f64, n: usize) -> impl Iterator<Item = f64> {
    let steps = (n - 1) as f64;
    (0..n).map(move |i| {
        if i == n - 1 {
            stop
        } else {
            start + (stop - start) * i as f64 / steps
        }
    })
}

fn check_resolution(resolution: usize) -> Result<()> {
    if resolution < 2 {
        return Err(DepthvizError::InvalidResolution {
            message: format!("Resolution must be at least 2, got {}", resolution),
        });
    }
    Ok(())
}

/// Interpolate every channel of a control-point table at the given positions
fn sample_channels(xp: &[f64], colors: &[[f32; 3]], positions: impl Iterator<Item = f64>) -> Vec<[f32; 3]> {
    let channels: Vec<Vec<f64>> = (0..3)
        .map(|c| colors.iter().map(|color| color[c] as f64).collect())
        .collect();

    positions
        .map(|x| {
            [
                interp(x, xp, &channels[0]) as f32,
                interp(x, xp, &channels[1]) as f32,
                interp(x, xp, &channels[2]) as f32,
            ]
        })
        .collect()
}

/// Resample an existing colormap to `resolution` samples over `[0, max_value]`.
///
/// The base samples act as control points at `i / (N - 1)`. Query positions
/// beyond 1 take the last base color. The returned colormap keeps
/// `max_value` as its query domain.
pub fn build_high_resolution(base: &Colormap, resolution: usize, max_value: f32) -> Result<Colormap> {
    check_resolution(resolution)?;
    if !(max_value.is_finite() && max_value > 0.0) {
        return Err(DepthvizError::InvalidResolution {
            message: format!("max_value must be positive and finite, got {}", max_value),
        });
    }

    let xp: Vec<f64> = linspace(0.0, 1.0, base.len()).collect();
    let samples = sample_channels(
        &xp,
        base.samples(),
        linspace(0.0, max_value as f64, resolution),
    );

    Colormap::from_samples(base.name(), samples, max_value)
}

/// Check that control points are usable for interpolation over [0, 1]
pub fn validate_control_points(points: &[ControlPoint]) -> Result<()> {
    let invalid = |message: String| -> Result<()> {
        Err(DepthvizError::InvalidControlPoints { message })
    };

    if points.len() < 2 {
        return invalid(format!("At least 2 control points required, got {}", points.len()));
    }

    let first = points[0].position;
    let last = points[points.len() - 1].position;
    if first != 0.0 || last != 1.0 {
        return invalid(format!(
            "Control points must span [0, 1], got [{}, {}]",
            first, last
        ));
    }

    for pair in points.windows(2) {
        if !(pair[1].position > pair[0].position) {
            return invalid(format!(
                "Positions must be strictly increasing: {} followed by {}",
                pair[0].position, pair[1].position
            ));
        }
    }

    for point in points {
        if point.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return invalid(format!(
                "Color {:?} at position {} is outside [0, 1]",
                point.color, point.position
            ));
        }
    }

    Ok(())
}

/// Build a colormap by interpolating a control-point table at `resolution`
/// evenly spaced positions over [0, 1]
pub fn build_from_control_points(
    name: &str,
    points: &[ControlPoint],
    resolution: usize,
) -> Result<Colormap> {
    validate_control_points(points)?;
    check_resolution(resolution)?;

    let xp: Vec<f64> = points.iter().map(|p| p.position as f64).collect();
    let colors: Vec<[f32; 3]> = points.iter().map(|p| p.color).collect();
    let samples = sample_channels(&xp, &colors, linspace(0.0, 1.0, resolution));

    Colormap::from_samples(name, samples, 1.0)
}
