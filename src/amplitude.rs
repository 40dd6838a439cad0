//! Scalar types that can live in an amplitude vector.
//!
//! Real amplitudes are the common case. Complex amplitudes are accepted too;
//! only their squared magnitude enters the probability, and coupling adds
//! them linearly without any interference beyond that.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul};

use num_complex::Complex;
use num_traits::{One, Zero};

/// A coefficient whose squared magnitude is an outcome probability.
pub trait Amplitude:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// |a|²
    fn magnitude_sqr(&self) -> f64;
}

impl Amplitude for f64 {
    #[inline]
    fn magnitude_sqr(&self) -> f64 {
        self * self
    }
}

impl Amplitude for Complex<f64> {
    #[inline]
    fn magnitude_sqr(&self) -> f64 {
        self.norm_sqr()
    }
}

/// Sum of squared magnitudes over a vector.
pub fn total_probability<T: Amplitude>(amplitudes: &[T]) -> f64 {
    amplitudes.iter().map(Amplitude::magnitude_sqr).sum()
}

/// L2 norm of a vector.
pub fn l2_norm<T: Amplitude>(amplitudes: &[T]) -> f64 {
    total_probability(amplitudes).sqrt()
}

/// Rescale to unit L2 norm in place. A zero vector is left as is.
pub fn normalize<T: Amplitude>(amplitudes: &mut [T]) {
    let norm = l2_norm(amplitudes);
    if norm != 0.0 {
        for a in amplitudes.iter_mut() {
            *a = *a / norm;
        }
    }
}
