//! Complex-plane primitives
//!
//! A minimal double-precision complex type covering exactly what the
//! escape-time recurrence needs: squaring, addition and the Euclidean
//! modulus.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A point `real + imag·i` on the complex plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { real: 0.0, imag: 0.0 };

    #[inline]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Euclidean modulus `|z|`.
    ///
    /// Uses `hypot` so that very large escape radii (2^128 and above) are
    /// compared without the intermediate square overflowing.
    #[inline]
    pub fn mag(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    /// `z² = (a² - b², 2ab)` for `z = a + bi`.
    #[inline]
    pub fn square(&self) -> Self {
        Self {
            real: self.real * self.real - self.imag * self.imag,
            imag: 2.0 * self.real * self.imag,
        }
    }
}

impl Mul for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            real: self.real * rhs.real - self.imag * rhs.imag,
            imag: self.real * rhs.imag + self.imag * rhs.real,
        }
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            real: self.real + rhs.real,
            imag: self.imag + rhs.imag,
        }
    }
}

/// One step of the Mandelbrot map, `z² + c`.
#[inline]
pub fn mandelbrot_step(z: Complex, c: Complex) -> Complex {
    z.square() + c
}
