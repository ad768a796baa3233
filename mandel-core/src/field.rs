//! Escape-time field handed to the renderer.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Matrix of escape iteration counts.
///
/// Same `(height, width)` layout as the [`SampleGrid`](crate::sampler::SampleGrid)
/// it was computed from. A value `v < max_iter` means the sample escaped
/// after `v` squaring steps; `max_iter` means it stayed bounded for the
/// whole run and is drawn as interior.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeField {
    values: Array2<u32>,
    max_iter: u32,
}

/// Aggregate numbers a renderer needs for its colour scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub width: usize,
    pub height: usize,
    pub max_iter: u32,
    pub min_value: u32,
    pub max_value: u32,
    pub interior: usize,
}

impl EscapeField {
    pub(crate) fn new(values: Array2<u32>, max_iter: u32) -> Self {
        debug_assert!(values.iter().all(|&v| v <= max_iter));
        Self { values, max_iter }
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn values(&self) -> &Array2<u32> {
        &self.values
    }

    /// Value at column `i`, row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        self.values.get([j, i]).copied()
    }

    pub fn is_interior(&self, i: usize, j: usize) -> Option<bool> {
        self.get(i, j).map(|v| v == self.max_iter)
    }

    pub fn interior_count(&self) -> usize {
        self.values.iter().filter(|&&v| v == self.max_iter).count()
    }

    pub fn summary(&self) -> FieldSummary {
        let min_value = self.values.iter().copied().min().unwrap_or(0);
        let max_value = self.values.iter().copied().max().unwrap_or(0);
        FieldSummary {
            width: self.width(),
            height: self.height(),
            max_iter: self.max_iter,
            min_value,
            max_value,
            interior: self.interior_count(),
        }
    }

    /// Row-major copy of the values, rows ordered by increasing imaginary
    /// part.
    pub fn to_row_major(&self) -> Vec<u32> {
        self.values.iter().copied().collect()
    }
}
