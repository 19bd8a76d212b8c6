//! Colormap construction and lookup.
//!
//! This module builds fixed-resolution RGB lookup tables and keeps them in a
//! registry keyed by name.

pub mod builder;
pub mod colormap;
pub mod presets;
pub mod registry;

pub use builder::{build_from_control_points, build_high_resolution, DEFAULT_RESOLUTION};
pub use colormap::{Colormap, ControlPoint, BAD_COLOR};
pub use presets::{magma, magma_base, opencv_rainbow, OPENCV_RAINBOW};
pub use registry::ColormapRegistry;
