//! Viewed window of the complex plane and the sampling resolution.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::geometry::Complex;

/// Default bounds shown when the explorer starts.
pub const DEFAULT_X_MIN: f64 = -2.0;
pub const DEFAULT_X_MAX: f64 = 1.0;
pub const DEFAULT_Y_MIN: f64 = -1.0;
pub const DEFAULT_Y_MAX: f64 = 1.0;

/// Default sample count along each axis.
pub const DEFAULT_WIDTH: usize = 1000;
pub const DEFAULT_HEIGHT: usize = 1000;

/// Rectangular window `[x_min, x_max] × [y_min, y_max]`.
///
/// Always holds finite bounds with strictly positive extents. Construct
/// through [`Region::new`]; deserialised values should be passed through
/// [`Region::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Region {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let region = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        region.validate()?;
        Ok(region)
    }

    /// Region centred on `center` with the given full extents.
    pub fn centered(center: Complex, width: f64, height: f64) -> Result<Self> {
        Self::new(
            center.real - width / 2.0,
            center.real + width / 2.0,
            center.imag - height / 2.0,
            center.imag + height / 2.0,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite();
        let ordered = self.x_min < self.x_max && self.y_min < self.y_max;
        // Finite bounds can still span more than f64::MAX.
        let spans = self.width().is_finite() && self.height().is_finite();
        if !(finite && ordered && spans) {
            return Err(CoreError::InvalidRegion {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn center(&self) -> Complex {
        Complex::new(
            (self.x_max + self.x_min) / 2.0,
            (self.y_max + self.y_min) / 2.0,
        )
    }

    pub fn contains(&self, c: Complex) -> bool {
        c.real >= self.x_min && c.real <= self.x_max && c.imag >= self.y_min && c.imag <= self.y_max
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
            y_min: DEFAULT_Y_MIN,
            y_max: DEFAULT_Y_MAX,
        }
    }
}

/// Number of samples along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let resolution = Self { width, height };
        resolution.validate()?;
        Ok(resolution)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
