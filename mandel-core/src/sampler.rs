//! Grid sampler
//!
//! Turns a [`Region`] and a [`Resolution`] into the matrix of complex
//! sample points fed to the escape-time engine. Cells are laid out with
//! rows along the imaginary axis and columns along the real axis, so cell
//! `(i, j)` (column `i`, row `j`) lives at `points[[j, i]]` and holds
//! `xs[i] + ys[j]·i`.

use ndarray::Array2;

use crate::error::Result;
use crate::geometry::Complex;
use crate::region::{Region, Resolution};

/// `count` evenly spaced values over `[min, max]`, both endpoints included.
///
/// The spacing is `(max - min) / (count - 1)`. The final value is pinned
/// to `max` so the endpoints are reproduced exactly rather than through an
/// accumulated multiplication. `count == 1` yields `[min]`, `count == 0`
/// yields an empty vector.
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|k| min + k as f64 * step).collect();
            values[count - 1] = max;
            values
        }
    }
}

/// Immutable matrix of sample points for one computation.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    region: Region,
    resolution: Resolution,
    xs: Vec<f64>,
    ys: Vec<f64>,
    points: Array2<Complex>,
}

/// Build the sample grid for `region` at `resolution`.
///
/// Both values are re-checked here since their fields are public: an
/// inverted or non-finite region fails with `InvalidRegion`, a zero
/// dimension with `InvalidResolution`.
pub fn sample(region: Region, resolution: Resolution) -> Result<SampleGrid> {
    region.validate()?;
    resolution.validate()?;
    let xs = linspace(region.x_min, region.x_max, resolution.width);
    let ys = linspace(region.y_min, region.y_max, resolution.height);
    let points = Array2::from_shape_fn((resolution.height, resolution.width), |(j, i)| {
        Complex::new(xs[i], ys[j])
    });
    Ok(SampleGrid {
        region,
        resolution,
        xs,
        ys,
        points,
    })
}

impl SampleGrid {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> usize {
        self.resolution.width
    }

    pub fn height(&self) -> usize {
        self.resolution.height
    }

    /// Real-axis coordinates, one per column.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Imaginary-axis coordinates, one per row.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Points as a `(height, width)` array.
    pub fn points(&self) -> &Array2<Complex> {
        &self.points
    }

    /// Sample at column `i`, row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<Complex> {
        self.points.get([j, i]).copied()
    }

    /// Column and row of the sample closest to `target`.
    pub fn nearest(&self, target: Complex) -> (usize, usize) {
        (nearest_index(&self.xs, target.real), nearest_index(&self.ys, target.imag))
    }
}

fn nearest_index(axis: &[f64], value: f64) -> usize {
    axis.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (**a - value).abs();
            let db = (**b - value).abs();
            da.total_cmp(&db)
        })
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let v = linspace(-2.0, 1.0, 4);
        assert_eq!(v, vec![-2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn linspace_single_value_is_min() {
        assert_eq!(linspace(0.3, 7.0, 1), vec![0.3]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn linspace_pins_awkward_endpoint() {
        let v = linspace(0.1, 0.7, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[6], 0.7);
    }

    #[test]
    fn grid_layout_is_row_major_in_imag() {
        let region = Region::new(-1.0, 1.0, 0.0, 2.0).unwrap();
        let grid = sample(region, Resolution::new(3, 2).unwrap()).unwrap();
        assert_eq!(grid.points().dim(), (2, 3));
        assert_eq!(grid.get(0, 0), Some(Complex::new(-1.0, 0.0)));
        assert_eq!(grid.get(2, 1), Some(Complex::new(1.0, 2.0)));
        assert_eq!(grid.get(1, 1), Some(Complex::new(0.0, 2.0)));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn nearest_picks_closest_cell() {
        let region = Region::new(-2.0, 1.0, -1.0, 1.0).unwrap();
        let grid = sample(region, Resolution::new(4, 4).unwrap()).unwrap();
        assert_eq!(grid.nearest(Complex::new(-2.0, 0.0)).0, 0);
        assert_eq!(grid.nearest(Complex::new(0.1, 0.0)).0, 2);
    }
}
