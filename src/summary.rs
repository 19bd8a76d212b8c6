//! Image logging for training runs.
//!
//! Network outputs are colorized and handed to an [`ImageWriter`] under a
//! tag and a step index. [`PngDirectoryWriter`] is a file-backed writer that
//! stores every image as a PNG, one folder per tag.

use ndarray::{Array2, Array3};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::colorize::{colorize_passthrough, ColorImage, MaxValue, TensorColorizer};
use crate::error::{DepthvizError, Result};

/// Colormap used for disparity maps
pub const DISPARITY_COLORMAP: &str = "magma";

/// Colormap used for depth maps
pub const DEPTH_COLORMAP: &str = "rainbow";

/// Sink for tagged images
pub trait ImageWriter {
    /// Record `image` under `tag` at training step `step`
    fn add_image(&mut self, tag: &str, image: &ColorImage, step: u64) -> Result<()>;
}

/// Writes images to `root/<tag>/<step>.png`
#[derive(Debug, Clone)]
pub struct PngDirectoryWriter {
    root: PathBuf,
}

impl PngDirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File an image for `tag` and `step` is written to
    pub fn image_path(&self, tag: &str, step: u64) -> PathBuf {
        self.root
            .join(sanitize_tag(tag))
            .join(format!("{:08}.png", step))
    }
}

impl ImageWriter for PngDirectoryWriter {
    fn add_image(&mut self, tag: &str, image: &ColorImage, step: u64) -> Result<()> {
        let path = self.image_path(tag, step);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        image.to_rgb8().save(&path)?;

        debug!(tag = tag, step = step, path = %path.display(), "Image written");
        Ok(())
    }
}

/// Make a tag usable as a single directory name
pub fn sanitize_tag(tag: &str) -> String {
    tag.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Outputs of one scale of the photometric reconstruction
#[derive(Debug, Clone)]
pub struct ScaleOutputs {
    /// 3xHxW warped reference image in [-1, 1]
    pub warped: Array3<f32>,
    /// 3xHxW photometric difference
    pub diff: Array3<f32>,
    /// 3xHxW structural dissimilarity in [0, 1]
    pub dssim: Array3<f32>,
    /// HxW validity mask
    pub valid: Array2<f32>,
}

/// Network outputs for one sample of a batch
#[derive(Debug, Clone)]
pub struct OutputSample {
    /// HxW depth map
    pub depth: Array2<f32>,
    /// HxW disparity map
    pub disp: Array2<f32>,
    pub scales: Vec<ScaleOutputs>,
}

fn masked(warped: &Array3<f32>, valid: &Array2<f32>) -> Result<Array3<f32>> {
    let mask = valid
        .broadcast(warped.dim())
        .ok_or_else(|| DepthvizError::shape_mismatch("HxW matching the warped image", valid.shape()))?;
    Ok(warped * &mask)
}

/// Log depth, disparity and per-scale reconstruction images.
///
/// Returns the number of images written.
pub fn log_output_images<W: ImageWriter + ?Sized>(
    writer: &mut W,
    colorizer: &TensorColorizer<'_>,
    prefix: &str,
    index: usize,
    suffix: &str,
    n_iter: u64,
    outputs: &OutputSample,
) -> Result<usize> {
    let disp = colorizer.colorize(outputs.disp.view(), MaxValue::Auto, DISPARITY_COLORMAP)?;
    let depth = colorizer.colorize(outputs.depth.view(), MaxValue::Auto, DEPTH_COLORMAP)?;
    writer.add_image(
        &format!("{} Dispnet Output Normalized {}/{}", prefix, suffix, index),
        &disp,
        n_iter,
    )?;
    writer.add_image(
        &format!("{} Depth Output {}/{}", prefix, suffix, index),
        &depth,
        n_iter,
    )?;
    let mut written = 2;

    for (j, scale) in outputs.scales.iter().enumerate() {
        let whole_suffix = format!("{} {}/{}", suffix, j, index);

        let warped = colorize_passthrough(masked(&scale.warped, &scale.valid)?.view())?;
        let diff = colorize_passthrough(scale.diff.mapv(|v| 0.5 * v).view())?;
        let dssim = colorize_passthrough(scale.dssim.mapv(|v| 2.0 * v - 1.0).view())?;

        writer.add_image(&format!("{} Warped Outputs {}", prefix, whole_suffix), &warped, n_iter)?;
        writer.add_image(&format!("{} Diff Outputs {}", prefix, whole_suffix), &diff, n_iter)?;
        writer.add_image(&format!("{} DSSIM Outputs {}", prefix, whole_suffix), &dssim, n_iter)?;
        written += 3;
    }

    debug!(
        prefix = prefix,
        index = index,
        step = n_iter,
        images = written,
        "Logged output images"
    );
    Ok(written)
}
