//! Escape-time engine
//!
//! Every sample starts at `z = c` and is iterated under `z ← z² + c`.
//! Each sweep `n` first tests the current `z` of every still-active cell
//! against the escape radius, freezes the ones that are out with count
//! `n`, and only then advances the remaining cells. A recorded count is
//! therefore the number of completed squaring steps at the moment the
//! orbit was seen outside the radius, and escaped cells are never touched
//! again.
//!
//! Cells are independent, so each sweep runs in parallel across the grid
//! with the join at the end of the sweep as the only synchronisation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ndarray::{Array2, Zip};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::field::EscapeField;
use crate::geometry::{mandelbrot_step, Complex};
use crate::sampler::SampleGrid;

/// Iteration cap the explorer opens with.
pub const DEFAULT_MAX_ITER: u32 = 50;
/// 2^128. Large enough that no bounded orbit is ever classified as
/// escaped, at the price of a few extra iterations near the boundary.
pub const DEFAULT_ESCAPE_RADIUS: f64 = (1u128 << 127) as f64 * 2.0;

/// Validated iteration cap and escape radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapeParams {
    max_iter: u32,
    escape_radius: f64,
}

impl EscapeParams {
    pub fn new(max_iter: u32, escape_radius: f64) -> Result<Self> {
        if max_iter < 1 {
            return Err(CoreError::InvalidIterationCap(max_iter));
        }
        if !(escape_radius.is_finite() && escape_radius > 0.0) {
            return Err(CoreError::InvalidEscapeRadius(escape_radius));
        }
        Ok(Self {
            max_iter,
            escape_radius,
        })
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
        }
    }
}

/// Per-cell iteration state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellState {
    /// Still iterating; holds the current `z`.
    Active(Complex),
    /// Left the escape radius after this many steps.
    Escaped(u32),
}

impl CellState {
    /// Run sweep `n` for this cell. Returns whether the cell is still
    /// active afterwards.
    #[inline]
    pub fn advance(&mut self, n: u32, c: Complex, escape_radius: f64) -> bool {
        match *self {
            CellState::Active(z) if z.mag() > escape_radius => {
                *self = CellState::Escaped(n);
                false
            }
            CellState::Active(z) => {
                *self = CellState::Active(mandelbrot_step(z, c));
                true
            }
            CellState::Escaped(_) => false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, CellState::Active(_))
    }

    /// Final count for this cell under `max_iter`.
    #[inline]
    pub fn iterations(&self, max_iter: u32) -> u32 {
        match *self {
            CellState::Escaped(n) => n,
            CellState::Active(_) => max_iter,
        }
    }
}

/// Handle used to abandon a computation once a newer one has been
/// requested.
///
/// All tokens cloned from the same source share one generation counter;
/// a token is cancelled as soon as the counter moves past the generation
/// it was issued for.
#[derive(Clone, Debug)]
pub struct CancelToken {
    latest: Arc<AtomicU64>,
    generation: u64,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            generation: 0,
        }
    }

    pub(crate) fn new(latest: Arc<AtomicU64>, generation: u64) -> Self {
        Self { latest, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The newer generation if this one has been superseded.
    pub fn superseded_by(&self) -> Option<u64> {
        let latest = self.latest.load(Ordering::Acquire);
        (latest != self.generation).then_some(latest)
    }
}

struct IterationState {
    cells: Array2<CellState>,
}

impl IterationState {
    fn seed(points: &Array2<Complex>) -> Self {
        Self {
            cells: points.mapv(CellState::Active),
        }
    }

    /// One masked sweep over all cells. Returns whether any cell is still
    /// active.
    fn sweep(&mut self, n: u32, points: &Array2<Complex>, escape_radius: f64) -> bool {
        Zip::from(&mut self.cells)
            .and(points)
            .par_for_each(|cell, &c| {
                cell.advance(n, c, escape_radius);
            });
        self.cells.iter().any(CellState::is_active)
    }

    fn into_values(self, max_iter: u32) -> Array2<u32> {
        self.cells.mapv(|cell| cell.iterations(max_iter))
    }
}

/// Compute the escape field of `grid`.
///
/// Fails before doing any work when `max_iter < 1` or `escape_radius` is
/// not a finite positive number.
pub fn compute(grid: &SampleGrid, max_iter: u32, escape_radius: f64) -> Result<EscapeField> {
    let params = EscapeParams::new(max_iter, escape_radius)?;
    compute_with(grid, params, &CancelToken::never())
}

/// Like [`compute`], but checks `cancel` between sweeps and returns
/// [`CoreError::Superseded`] instead of a field once it fires.
pub fn compute_with(grid: &SampleGrid, params: EscapeParams, cancel: &CancelToken) -> Result<EscapeField> {
    let points = grid.points();
    let mut state = IterationState::seed(points);
    let mut sweeps = 0u32;

    for n in 0..params.max_iter {
        if let Some(latest) = cancel.superseded_by() {
            debug!(generation = cancel.generation(), latest, sweeps, "escape computation abandoned");
            return Err(CoreError::Superseded { latest });
        }
        sweeps += 1;
        if !state.sweep(n, points, params.escape_radius) {
            break;
        }
    }

    let field = EscapeField::new(state.into_values(params.max_iter), params.max_iter);
    debug!(
        width = field.width(),
        height = field.height(),
        max_iter = params.max_iter,
        sweeps,
        interior = field.interior_count(),
        "escape field computed"
    );
    Ok(field)
}

/// Escape count of a single point, following the same step order as the
/// full-grid sweep.
pub fn escape_time(c: Complex, params: EscapeParams) -> u32 {
    let mut cell = CellState::Active(c);
    for n in 0..params.max_iter {
        if !cell.advance(n, c, params.escape_radius) {
            break;
        }
    }
    cell.iterations(params.max_iter)
}
