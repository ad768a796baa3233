use thiserror::Error;

/// Errors returned by the explorer core.
///
/// Everything except [`CoreError::Superseded`] is a caller-contract
/// violation detected before any work starts; none of them are retried.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Region bounds are not finite or have non-positive extents.
    #[error("invalid region: x=[{x_min}, {x_max}], y=[{y_min}, {y_max}]")]
    InvalidRegion {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    /// Resolution has a zero dimension.
    #[error("invalid resolution: {width}x{height}")]
    InvalidResolution { width: usize, height: usize },

    /// Iteration cap below 1.
    #[error("invalid iteration cap: {0} (must be at least 1)")]
    InvalidIterationCap(u32),

    /// Escape radius is not a finite positive number.
    #[error("invalid escape radius: {0}")]
    InvalidEscapeRadius(f64),

    /// Zoom factor is not a finite number greater than 1.
    #[error("invalid zoom factor: {0} (must be greater than 1)")]
    InvalidZoomFactor(f64),

    /// The computation was abandoned because a newer transition arrived.
    #[error("computation superseded by generation {latest}")]
    Superseded { latest: u64 },

    /// Configuration could not be read or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed JSON for a transition or configuration document.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// True for errors that mean the caller misused the interface, as
    /// opposed to a computation being cancelled.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, CoreError::Superseded { .. })
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
