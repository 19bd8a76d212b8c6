//! Tensor to color image conversion.
//!
//! Single-channel maps (depth, disparity) are normalized and looked up in a
//! named colormap. Three-channel signed signals (warped images, photometric
//! differences) are shifted from [-1, 1] into [0, 1] without any lookup.
//! Both paths produce a channel-major 3xHxW float image.

use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix2, Ix3};
use tracing::debug;

use crate::colormaps::{ColormapRegistry, BAD_COLOR};
use crate::error::{DepthvizError, Result};

/// Accepted input layouts, for error messages
const SUPPORTED_SHAPES: &str = "HxW, 1xHxW or 3xHxW";

/// Default normalization maximum for 8-bit style inputs
pub const DEFAULT_MAX_VALUE: f32 = 255.0;

/// Reference maximum used to normalize a single-channel map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxValue {
    /// Divide by a fixed value
    Fixed(f32),
    /// Divide by the largest element of the array
    Auto,
}

impl Default for MaxValue {
    fn default() -> Self {
        MaxValue::Fixed(DEFAULT_MAX_VALUE)
    }
}

impl std::str::FromStr for MaxValue {
    type Err = DepthvizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(MaxValue::Auto);
        }
        s.parse::<f32>()
            .map(MaxValue::Fixed)
            .map_err(|_| DepthvizError::Config {
                message: format!("Invalid max value: {}. Expected a number or 'auto'", s),
            })
    }
}

/// Input array, classified by layout once at the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum TensorInput {
    /// HxW scalar field, colorized through a colormap
    SingleChannel(Array2<f32>),
    /// 3xHxW signal in roughly [-1, 1], shifted into [0, 1]
    ThreeChannel(Array3<f32>),
}

impl TensorInput {
    /// Classify an array of any dimensionality.
    ///
    /// HxW and 1xHxW become `SingleChannel`, 3xHxW becomes `ThreeChannel`.
    /// Anything else is a `ShapeMismatch`.
    pub fn from_dyn(array: ArrayD<f32>) -> Result<Self> {
        let shape = array.shape().to_vec();
        let mismatch = |_| DepthvizError::shape_mismatch(SUPPORTED_SHAPES, &shape);

        match shape.as_slice() {
            [_, _] => Ok(TensorInput::SingleChannel(
                array.into_dimensionality::<Ix2>().map_err(mismatch)?,
            )),
            [1, _, _] => {
                let stacked = array.into_dimensionality::<Ix3>().map_err(mismatch)?;
                Ok(TensorInput::SingleChannel(stacked.index_axis_move(Axis(0), 0)))
            }
            [3, _, _] => Ok(TensorInput::ThreeChannel(
                array.into_dimensionality::<Ix3>().map_err(mismatch)?,
            )),
            _ => Err(DepthvizError::shape_mismatch(SUPPORTED_SHAPES, &shape)),
        }
    }
}

/// A channel-major 3xHxW float image
#[derive(Debug, Clone, PartialEq)]
pub struct ColorImage {
    data: Array3<f32>,
}

impl ColorImage {
    /// Wrap a 3xHxW array
    pub fn from_array(data: Array3<f32>) -> Result<Self> {
        if data.shape()[0] != 3 {
            return Err(DepthvizError::shape_mismatch("3xHxW", data.shape()));
        }
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn width(&self) -> usize {
        self.data.shape()[2]
    }

    /// `[3, height, width]`
    pub fn shape(&self) -> [usize; 3] {
        [3, self.height(), self.width()]
    }

    pub fn as_array(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn into_array(self) -> Array3<f32> {
        self.data
    }

    /// RGB triple at row `y`, column `x`
    pub fn pixel(&self, y: usize, x: usize) -> [f32; 3] {
        [
            self.data[[0, y, x]],
            self.data[[1, y, x]],
            self.data[[2, y, x]],
        ]
    }

    /// Convert to an 8-bit RGB image, clipping each channel to [0, 1]
    pub fn to_rgb8(&self) -> RgbImage {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            let [r, g, b] = self.pixel(y as usize, x as usize);
            Rgb([to_u8(r), to_u8(g), to_u8(b)])
        })
    }
}

/// Resolve a `MaxValue` against the data it normalizes
pub fn resolve_max_value(values: ArrayView2<f32>, max_value: MaxValue) -> Result<f32> {
    let max = match max_value {
        MaxValue::Fixed(value) => value,
        MaxValue::Auto => values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f32::max)
            .ok_or_else(|| DepthvizError::DegenerateNormalization {
                message: "Cannot take the maximum of an empty or all-NaN array".to_string(),
            })?,
    };

    if max == 0.0 || !max.is_finite() {
        return Err(DepthvizError::DegenerateNormalization {
            message: format!("Normalization maximum must be finite and non-zero, got {}", max),
        });
    }

    Ok(max)
}

/// Divide every element by the resolved maximum
pub fn normalize(values: ArrayView2<f32>, max_value: MaxValue) -> Result<Array2<f32>> {
    let max = resolve_max_value(values, max_value)?;
    Ok(values.mapv(|v| v / max))
}

/// Map a 3xHxW signal from [-1, 1] to [0, 1] via `0.5 + 0.5 * x`.
///
/// The result is not clamped; values outside [-1, 1] stay outside [0, 1].
pub fn colorize_passthrough(values: ArrayView3<f32>) -> Result<ColorImage> {
    if values.shape()[0] != 3 {
        return Err(DepthvizError::shape_mismatch("3xHxW", values.shape()));
    }
    ColorImage::from_array(values.mapv(|v| 0.5 + 0.5 * v))
}

/// Converts arrays to color images using a shared colormap registry
#[derive(Debug, Clone, Copy)]
pub struct TensorColorizer<'a> {
    registry: &'a ColormapRegistry,
}

impl<'a> TensorColorizer<'a> {
    pub fn new(registry: &'a ColormapRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a ColormapRegistry {
        self.registry
    }

    /// Normalize a HxW map and color it with the named colormap.
    ///
    /// NaN elements are painted black rather than looked up.
    pub fn colorize(
        &self,
        values: ArrayView2<f32>,
        max_value: MaxValue,
        colormap_name: &str,
    ) -> Result<ColorImage> {
        let colormap = self.registry.lookup(colormap_name)?;
        let norm = normalize(values, max_value)?;
        let (height, width) = norm.dim();

        debug!(
            colormap = colormap_name,
            height = height,
            width = width,
            max_value = ?max_value,
            "Colorizing single-channel map"
        );

        let mut data = Array3::<f32>::zeros((3, height, width));
        for ((y, x), &t) in norm.indexed_iter() {
            let color = if t.is_nan() { BAD_COLOR } else { colormap.sample(t) };
            for (c, &value) in color.iter().enumerate() {
                data[[c, y, x]] = value;
            }
        }

        ColorImage::from_array(data)
    }

    /// Dispatch on the input layout.
    ///
    /// `max_value` and `colormap_name` only apply to single-channel input.
    pub fn tensor_to_image(
        &self,
        input: &TensorInput,
        max_value: MaxValue,
        colormap_name: &str,
    ) -> Result<ColorImage> {
        match input {
            TensorInput::SingleChannel(values) => {
                self.colorize(values.view(), max_value, colormap_name)
            }
            TensorInput::ThreeChannel(values) => colorize_passthrough(values.view()),
        }
    }
}
