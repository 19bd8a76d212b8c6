//! # depthviz
//!
//! Visualization and bookkeeping utilities for depth and pose training runs.
//!
//! The core of the crate turns scalar maps (depth, disparity) and signed
//! three-channel signals (warped images, photometric differences) into
//! channel-major RGB float images ready for a metrics sink.
//!
//! ## Key Features
//!
//! - **Colormaps**: high-resolution tables built from control points or by
//!   resampling an existing palette, kept in an explicit registry
//! - **Colorization**: nearest-index lookup with auto or fixed normalization,
//!   and an affine passthrough for already RGB-like signals
//! - **Run bookkeeping**: experiment folder naming, checkpoint persistence and
//!   image logging to a pluggable writer
//!
//! ## Example
//!
//! ```no_run
//! use depthviz::{ColormapRegistry, MaxValue, TensorColorizer};
//! use ndarray::Array2;
//!
//! let registry = ColormapRegistry::with_builtins(1000)?;
//! let colorizer = TensorColorizer::new(&registry);
//! let depth = Array2::<f32>::from_elem((4, 4), 2.0);
//! let image = colorizer.colorize(depth.view(), MaxValue::Auto, "rainbow")?;
//! assert_eq!(image.shape(), [3, 4, 4]);
//! # Ok::<(), depthviz::DepthvizError>(())
//! ```

pub mod array_file;
pub mod checkpoint;
pub mod colorize;
pub mod colormaps;
pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod summary;

pub use colorize::{colorize_passthrough, ColorImage, MaxValue, TensorColorizer, TensorInput};
pub use colormaps::{Colormap, ColormapRegistry, ControlPoint};
pub use config::Config;
pub use error::{DepthvizError, Result};
pub use logging::{init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation};
pub use summary::{ImageWriter, PngDirectoryWriter};
