//! Interactive session driver
//!
//! Owns the [`ViewState`] for one explorer window, turns each incoming
//! [`Transition`] into a new state, recomputes the escape field for it and
//! hands the result to a [`FieldSink`] (the renderer).
//!
//! Transitions are serialised: the state and the computation for it are
//! guarded by one lock, so two recomputations for the same view never
//! interleave. Every submission also bumps a generation counter before it
//! waits for the lock, which makes any computation still running for an
//! older state give up early. The state change carried by an abandoned
//! computation stays committed; only its field is dropped, and the last
//! transition to commit always renders.
//!
//! Readers never take the serialising lock. The committed state and the
//! last rendered field are published to a separate snapshot, so
//! [`ViewSession::state`] and [`ViewSession::current_field`] stay callable
//! from inside a [`FieldSink`] callback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::ExplorerConfig;
use crate::error::{CoreError, Result};
use crate::escape::{compute_with, CancelToken, EscapeParams};
use crate::field::EscapeField;
use crate::region::Resolution;
use crate::sampler::sample;
use crate::view::{apply_transition, Transition, ViewState};

/// Receiver of finished fields, implemented by the rendering layer.
///
/// Callbacks run on the submitting thread while it still owns the
/// session's transition lock, so renders arrive in commit order. A
/// callback may read the session, but submitting from inside one blocks
/// forever on that lock; queue the transition and submit it afterwards.
pub trait FieldSink {
    /// A new field is ready for `view`.
    fn render(&mut self, field: &EscapeField, view: &ViewState);

    /// `transition` was refused; whatever was rendered last stays on
    /// screen.
    fn reject(&mut self, transition: &Transition, error: &CoreError);
}

/// Sink that drops everything, for callers that only want return values.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FieldSink for NullSink {
    fn render(&mut self, _field: &EscapeField, _view: &ViewState) {}
    fn reject(&mut self, _transition: &Transition, _error: &CoreError) {}
}

struct SessionInner {
    state: ViewState,
    /// State changed since the last field was produced.
    stale: bool,
}

/// Committed state and last rendered field, as seen by readers.
struct Shown {
    state: ViewState,
    field: Option<Arc<EscapeField>>,
}

pub struct ViewSession {
    resolution: Resolution,
    escape_radius: f64,
    zoom_factor: f64,
    latest: Arc<AtomicU64>,
    inner: Mutex<SessionInner>,
    shown: RwLock<Shown>,
}

impl ViewSession {
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        config.validate()?;
        let state = config.initial_state()?;
        info!(
            width = config.resolution.width,
            height = config.resolution.height,
            max_iter = config.max_iter,
            "view session created"
        );
        Ok(Self {
            resolution: config.resolution,
            escape_radius: config.escape_radius,
            zoom_factor: config.zoom_factor,
            latest: Arc::new(AtomicU64::new(0)),
            inner: Mutex::new(SessionInner { state, stale: true }),
            shown: RwLock::new(Shown { state, field: None }),
        })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn state(&self) -> ViewState {
        self.shown.read().state
    }

    /// Field most recently handed to a sink, if any.
    pub fn current_field(&self) -> Option<Arc<EscapeField>> {
        self.shown.read().field.clone()
    }

    /// Compute and render the field for the current state.
    pub fn render_current(&self, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        self.latest.fetch_add(1, Ordering::AcqRel);
        let mut inner = self.inner.lock();
        self.recompute(&mut inner, sink)
    }

    /// Apply `transition` and render the resulting view.
    ///
    /// Contract violations leave the state untouched and are reported to
    /// `sink.reject` as well as returned. [`CoreError::Superseded`] means a
    /// newer submission took over; it is not reported to the sink.
    pub fn submit(&self, transition: Transition, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        self.latest.fetch_add(1, Ordering::AcqRel);
        let mut inner = self.inner.lock();

        let applied = apply_transition(&inner.state, transition);
        match applied {
            Ok(next) => {
                inner.state = next;
                inner.stale = true;
                self.shown.write().state = next;
                self.recompute(&mut inner, sink)
            }
            Err(e) => {
                warn!(transition = transition.name(), error = %e, "transition rejected");
                sink.reject(&transition, &e);
                // This submission may have cancelled the computation for
                // the last accepted state, including the very first one;
                // finish it here.
                if inner.stale {
                    if let Err(refresh) = self.recompute(&mut inner, sink) {
                        debug!(error = %refresh, "refresh after rejection did not complete");
                    }
                }
                Err(e)
            }
        }
    }

    pub fn zoom_in(&self, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        self.submit(Transition::ZoomIn { factor: self.zoom_factor }, sink)
    }

    pub fn zoom_out(&self, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        self.submit(Transition::ZoomOut { factor: self.zoom_factor }, sink)
    }

    pub fn reset(&self, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        self.submit(Transition::Reset, sink)
    }

    pub fn set_max_iter(&self, max_iter: u32, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        self.submit(Transition::SetMaxIter { max_iter }, sink)
    }

    fn recompute(&self, inner: &mut SessionInner, sink: &mut dyn FieldSink) -> Result<Arc<EscapeField>> {
        let state = inner.state;
        // Only submissions that arrive after this point cancel us.
        let token = CancelToken::new(self.latest.clone(), self.latest.load(Ordering::Acquire));
        let params = EscapeParams::new(state.max_iter, self.escape_radius)?;
        let grid = sample(state.region, self.resolution)?;

        match compute_with(&grid, params, &token) {
            Ok(field) => {
                let field = Arc::new(field);
                inner.stale = false;
                self.shown.write().field = Some(field.clone());
                sink.render(&field, &state);
                Ok(field)
            }
            Err(e) => {
                debug!(generation = token.generation(), error = %e, "recompute dropped");
                Err(e)
            }
        }
    }
}
