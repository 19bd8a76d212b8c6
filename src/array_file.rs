//! JSON array files.
//!
//! Arrays are stored as `{"shape": [...], "data": [...]}` with `data` in
//! row-major order. The CLI reads maps to colorize from this format and can
//! dump color images back into it.

use ndarray::{Array, ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{DepthvizError, Result};

/// On-disk layout of an array file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayFile {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl ArrayFile {
    /// Convert into an owned array, checking the element count
    pub fn into_array(self) -> Result<ArrayD<f32>> {
        let expected: usize = self.shape.iter().product();
        if expected != self.data.len() {
            return Err(DepthvizError::ShapeMismatch {
                expected: format!("{} elements for shape {:?}", expected, self.shape),
                actual: vec![self.data.len()],
            });
        }
        let shape = self.shape.clone();
        Array::from_shape_vec(IxDyn(&self.shape), self.data)
            .map_err(|_| DepthvizError::shape_mismatch("a row-major array", &shape))
    }

    /// Flatten any array into the file layout
    pub fn from_array<D: ndarray::Dimension>(array: &Array<f32, D>) -> Self {
        Self {
            shape: array.shape().to_vec(),
            data: array.iter().copied().collect(),
        }
    }
}

/// Load an array from a JSON array file
pub fn load_array(path: &Path) -> Result<ArrayD<f32>> {
    let reader = BufReader::new(File::open(path)?);
    let file: ArrayFile = serde_json::from_reader(reader)?;
    file.into_array()
}

/// Save an array as a JSON array file
pub fn save_array<D: ndarray::Dimension>(path: &Path, array: &Array<f32, D>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &ArrayFile::from_array(array))?;
    writer.flush()?;
    Ok(())
}
