//! View state machine
//!
//! The explorer has a single piece of mutable state: the region being
//! looked at and the iteration cap. UI actions arrive as [`Transition`]
//! values and [`apply_transition`] maps the current [`ViewState`] to the
//! next one. It is a pure function: the caller decides when to replace
//! its state and when to recompute.
//!
//! Zoom semantics: `ZoomIn` divides both extents by the factor around the
//! current centre, `ZoomOut` multiplies them. (The plotting script this
//! explorer grew out of enlarged the view for both buttons.)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::escape::DEFAULT_MAX_ITER;
use crate::region::Region;

pub const DEFAULT_ITER_MIN: u32 = 1;
pub const DEFAULT_ITER_MAX: u32 = 100;

/// Inclusive range the iteration slider can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRange {
    pub min: u32,
    pub max: u32,
}

impl IterationRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min < 1 {
            return Err(CoreError::InvalidIterationCap(self.min));
        }
        if self.max < self.min {
            return Err(CoreError::Config(format!(
                "iteration range {}..={} is empty",
                self.min, self.max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn clamp(&self, n: u32) -> u32 {
        n.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Default for IterationRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_ITER_MIN,
            max: DEFAULT_ITER_MAX,
        }
    }
}

/// One user action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    ZoomIn { factor: f64 },
    ZoomOut { factor: f64 },
    Reset,
    SetMaxIter { max_iter: u32 },
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::ZoomIn { .. } => "zoom_in",
            Transition::ZoomOut { .. } => "zoom_out",
            Transition::Reset => "reset",
            Transition::SetMaxIter { .. } => "set_max_iter",
        }
    }
}

/// What the explorer is currently showing.
///
/// `home` and `iter_range` are fixed for the session; they travel with the
/// state so that every transition can be applied without outside context.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub region: Region,
    pub max_iter: u32,
    pub home: Region,
    pub iter_range: IterationRange,
}

impl ViewState {
    /// Initial state: looking at `home` with `max_iter` iterations.
    pub fn new(home: Region, max_iter: u32, iter_range: IterationRange) -> Result<Self> {
        let state = Self {
            region: home,
            max_iter,
            home,
            iter_range,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check a state that may have been built field by field or
    /// deserialized: both regions valid, a non-empty slider range and a
    /// cap inside it.
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        self.home.validate()?;
        self.iter_range.validate()?;
        if !self.iter_range.contains(self.max_iter) {
            return Err(CoreError::InvalidIterationCap(self.max_iter));
        }
        Ok(())
    }

    pub fn is_home(&self) -> bool {
        self.region == self.home
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            region: Region::default(),
            max_iter: DEFAULT_MAX_ITER,
            home: Region::default(),
            iter_range: IterationRange::default(),
        }
    }
}

/// Compute the state that follows `state` under `transition`.
///
/// On error `state` is untouched and the caller keeps showing what it
/// already has. A `state` that fails [`ViewState::validate`] is rejected
/// before the transition is looked at.
pub fn apply_transition(state: &ViewState, transition: Transition) -> Result<ViewState> {
    state.validate()?;
    let next = match transition {
        Transition::ZoomIn { factor } => ViewState {
            region: zoom(&state.region, 1.0 / validate_factor(factor)?)?,
            ..*state
        },
        Transition::ZoomOut { factor } => ViewState {
            region: zoom(&state.region, validate_factor(factor)?)?,
            ..*state
        },
        Transition::Reset => ViewState {
            region: state.home,
            ..*state
        },
        Transition::SetMaxIter { max_iter } => {
            if max_iter < 1 {
                return Err(CoreError::InvalidIterationCap(max_iter));
            }
            ViewState {
                max_iter: state.iter_range.clamp(max_iter),
                ..*state
            }
        }
    };
    debug!(
        transition = transition.name(),
        x_min = next.region.x_min,
        x_max = next.region.x_max,
        y_min = next.region.y_min,
        y_max = next.region.y_max,
        max_iter = next.max_iter,
        "view transition applied"
    );
    Ok(next)
}

fn validate_factor(factor: f64) -> Result<f64> {
    if factor.is_finite() && factor > 1.0 {
        Ok(factor)
    } else {
        Err(CoreError::InvalidZoomFactor(factor))
    }
}

/// Scale both extents of `region` by `scale` about its centre.
fn zoom(region: &Region, scale: f64) -> Result<Region> {
    Region::centered(
        region.center(),
        region.width() * scale,
        region.height() * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ViewState {
        ViewState::default()
    }

    #[test]
    fn zoom_in_halves_extents_about_centre() {
        let next = apply_transition(&state(), Transition::ZoomIn { factor: 2.0 }).unwrap();
        assert_eq!(next.region.width(), 1.5);
        assert_eq!(next.region.height(), 1.0);
        assert_eq!(next.region.center(), state().region.center());
        assert_eq!(next.max_iter, state().max_iter);
    }

    #[test]
    fn zoom_out_doubles_extents() {
        let next = apply_transition(&state(), Transition::ZoomOut { factor: 2.0 }).unwrap();
        assert_eq!(next.region, Region::new(-3.5, 2.5, -2.0, 2.0).unwrap());
    }

    #[test]
    fn bad_factor_is_rejected() {
        for factor in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            let err = apply_transition(&state(), Transition::ZoomIn { factor }).unwrap_err();
            assert!(matches!(err, CoreError::InvalidZoomFactor(_)));
        }
    }

    #[test]
    fn set_max_iter_clamps_to_slider() {
        let next = apply_transition(&state(), Transition::SetMaxIter { max_iter: 500 }).unwrap();
        assert_eq!(next.max_iter, 100);
        assert_eq!(next.region, state().region);
        assert!(matches!(
            apply_transition(&state(), Transition::SetMaxIter { max_iter: 0 }),
            Err(CoreError::InvalidIterationCap(0))
        ));
    }

    #[test]
    fn new_rejects_cap_outside_range() {
        let range = IterationRange::new(1, 100).unwrap();
        assert!(ViewState::new(Region::default(), 101, range).is_err());
        assert!(IterationRange::new(0, 10).is_err());
        assert!(IterationRange::new(20, 10).is_err());
    }

    #[test]
    fn inverted_slider_range_is_an_error() {
        let broken = ViewState {
            iter_range: IterationRange { min: 50, max: 10 },
            ..state()
        };
        assert!(matches!(
            apply_transition(&broken, Transition::SetMaxIter { max_iter: 30 }),
            Err(CoreError::Config(_))
        ));
        assert!(apply_transition(&broken, Transition::Reset).is_err());
    }

    #[test]
    fn transition_json_shape() {
        let t: Transition = serde_json::from_str(r#"{"type":"zoom_in","factor":2.0}"#).unwrap();
        assert_eq!(t, Transition::ZoomIn { factor: 2.0 });
        let json = serde_json::to_string(&Transition::SetMaxIter { max_iter: 10 }).unwrap();
        assert_eq!(json, r#"{"type":"set_max_iter","max_iter":10}"#);
    }
}
