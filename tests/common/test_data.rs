//! Test data generation utilities.
//!
//! Synthetic network outputs with known patterns, plus helpers to write them
//! as JSON array files.

use depthviz::array_file::save_array;
use depthviz::summary::{OutputSample, ScaleOutputs};
use ndarray::{Array2, Array3};
use std::path::Path;

/// A depth map that increases linearly from left to right, from `near` to `far`
pub fn linear_depth(height: usize, width: usize, near: f32, far: f32) -> Array2<f32> {
    Array2::from_shape_fn((height, width), |(_, x)| {
        near + (far - near) * x as f32 / (width - 1) as f32
    })
}

/// A smooth signed 3xHxW signal in [-1, 1]
pub fn signed_signal(height: usize, width: usize) -> Array3<f32> {
    Array3::from_shape_fn((3, height, width), |(c, y, x)| {
        ((c + y * width + x) as f32 * 0.7).sin()
    })
}

/// Network outputs for one sample with `scales` reconstruction scales
pub fn output_sample(height: usize, width: usize, scales: usize) -> OutputSample {
    let depth = linear_depth(height, width, 1.0, 80.0);
    let disp = depth.mapv(|d| 1.0 / d);
    let scale = ScaleOutputs {
        warped: signed_signal(height, width),
        diff: signed_signal(height, width).mapv(f32::abs),
        dssim: Array3::from_elem((3, height, width), 0.2),
        valid: Array2::from_shape_fn((height, width), |(y, _)| if y == 0 { 0.0 } else { 1.0 }),
    };

    OutputSample {
        depth,
        disp,
        scales: vec![scale; scales],
    }
}

/// Write a depth map as a JSON array file
pub fn write_depth_file(path: &Path, height: usize, width: usize) -> depthviz::Result<()> {
    save_array(path, &linear_depth(height, width, 0.0, 10.0))
}
