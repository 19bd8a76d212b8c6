//! Shared helpers for the depthviz integration tests.

pub mod assertions;
pub mod image_utils;
pub mod test_data;
