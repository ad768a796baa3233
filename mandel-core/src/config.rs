//! Explorer configuration.
//!
//! Everything the rendering side hands the core at start-up. Every field
//! has a default, so a JSON document only needs the keys it changes:
//!
//! ```json
//! { "resolution": { "width": 640, "height": 480 }, "max_iter": 80 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::escape::{EscapeParams, DEFAULT_ESCAPE_RADIUS, DEFAULT_MAX_ITER};
use crate::region::{Region, Resolution};
use crate::view::{IterationRange, ViewState};

/// Factor applied by the zoom buttons.
pub const DEFAULT_ZOOM_FACTOR: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Region shown at start-up and restored by reset.
    pub region: Region,
    pub resolution: Resolution,
    /// Initial iteration cap.
    pub max_iter: u32,
    /// Range exposed by the iteration slider.
    pub iter_range: IterationRange,
    pub escape_radius: f64,
    pub zoom_factor: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            resolution: Resolution::default(),
            max_iter: DEFAULT_MAX_ITER,
            iter_range: IterationRange::default(),
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.display(), "explorer config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        self.resolution.validate()?;
        self.iter_range.validate()?;
        if !self.iter_range.contains(self.max_iter) {
            return Err(CoreError::Config(format!(
                "max_iter {} outside slider range {}..={}",
                self.max_iter, self.iter_range.min, self.iter_range.max
            )));
        }
        EscapeParams::new(self.max_iter, self.escape_radius)?;
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 1.0) {
            return Err(CoreError::InvalidZoomFactor(self.zoom_factor));
        }
        Ok(())
    }

    pub fn initial_state(&self) -> Result<ViewState> {
        ViewState::new(self.region, self.max_iter, self.iter_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExplorerConfig::default();
        config.validate().unwrap();
        let state = config.initial_state().unwrap();
        assert_eq!(state.max_iter, 50);
        assert_eq!(state.region, Region::new(-2.0, 1.0, -1.0, 1.0).unwrap());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ExplorerConfig::from_json_str(
            r#"{"resolution":{"width":64,"height":48},"max_iter":80}"#,
        )
        .unwrap();
        assert_eq!(config.resolution, Resolution::new(64, 48).unwrap());
        assert_eq!(config.max_iter, 80);
        assert_eq!(config.escape_radius, DEFAULT_ESCAPE_RADIUS);
        assert_eq!(config.zoom_factor, 2.0);
    }

    #[test]
    fn inconsistent_json_is_rejected() {
        assert!(matches!(
            ExplorerConfig::from_json_str(r#"{"max_iter":150}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            ExplorerConfig::from_json_str(r#"{"region":{"x_min":1,"x_max":-1,"y_min":-1,"y_max":1}}"#),
            Err(CoreError::InvalidRegion { .. })
        ));
        assert!(matches!(
            ExplorerConfig::from_json_str(r#"{"escape_radius":-4}"#),
            Err(CoreError::InvalidEscapeRadius(_))
        ));
        assert!(matches!(
            ExplorerConfig::from_json_str("not json"),
            Err(CoreError::Json(_))
        ));
    }
}
