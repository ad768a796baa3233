//! Core of the Mandelbrot explorer
//!
//! This crate holds everything in the explorer that is not drawing:
//!
//! 1. **Sampling** – turning a rectangular region of the complex plane
//!    and a pixel resolution into a grid of sample points
//!    ([`sampler`]).
//! 2. **Escape time** – iterating `z ← z² + c` over that grid with
//!    per-cell masking and recording when each orbit leaves the escape
//!    radius ([`escape`], [`field`]).
//! 3. **View state** – the region/iteration-cap state machine driven by
//!    zoom, reset and slider events ([`view`]), and the session that
//!    serialises those events, recomputes, and hands finished fields to
//!    the renderer ([`session`]).
//!
//! Colour maps, widgets and image output belong to the caller, which
//! implements [`session::FieldSink`].

pub mod config;
pub mod error;
pub mod escape;
pub mod events;
pub mod field;
pub mod geometry;
pub mod region;
pub mod sampler;
pub mod session;
pub mod view;

pub use config::ExplorerConfig;
pub use error::{CoreError, Result};
pub use escape::{compute, compute_with, CancelToken, EscapeParams};
pub use field::{EscapeField, FieldSummary};
pub use geometry::Complex;
pub use region::{Region, Resolution};
pub use sampler::{sample, SampleGrid};
pub use session::{FieldSink, ViewSession};
pub use view::{apply_transition, Transition, ViewState};
