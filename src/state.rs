//! Validated amplitude vector for a single qudit.
//!
//! A state is either superposed (several outcomes carry mass) or collapsed
//! (one-hot after a measurement). Evolution moves it back to superposed.

use rand::Rng;
use smallvec::SmallVec;

use crate::amplitude::{total_probability, Amplitude};
use crate::error::{QuditError, Result};

/// Allowed deviation of the total probability from 1.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-10;

/// Inline capacity for amplitude storage; larger dimensions spill to the heap.
const INLINE_OUTCOMES: usize = 4;

pub type Amplitudes<T> = SmallVec<[T; INLINE_OUTCOMES]>;

/// Phase of a qudit in the evolve/measure cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePhase {
    /// Probability mass spread over more than one outcome.
    Superposed,
    /// All mass on a single outcome.
    Collapsed { outcome: usize },
}

/// Probability-amplitude vector over a fixed number of outcomes.
///
/// Invariant: the squared magnitudes sum to 1 within
/// [`NORMALIZATION_TOLERANCE`].
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeState<T: Amplitude = f64> {
    amplitudes: Amplitudes<T>,
}

/// Check that a candidate vector is non-empty and unit-norm.
pub fn validate_amplitudes<T: Amplitude>(amplitudes: &[T]) -> Result<()> {
    if amplitudes.is_empty() {
        return Err(QuditError::ZeroDimension);
    }
    let total = total_probability(amplitudes);
    if total.is_nan() || (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
        return Err(QuditError::InvalidState { total });
    }
    Ok(())
}

impl<T: Amplitude> AmplitudeState<T> {
    /// Build a state from any amplitude sequence, rejecting non-unit vectors.
    pub fn new<I: IntoIterator<Item = T>>(amplitudes: I) -> Result<Self> {
        let amplitudes: Amplitudes<T> = amplitudes.into_iter().collect();
        validate_amplitudes(&amplitudes)?;
        Ok(Self { amplitudes })
    }

    /// Basis state with all mass on `outcome`.
    pub fn one_hot(dimension: usize, outcome: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(QuditError::ZeroDimension);
        }
        if outcome >= dimension {
            return Err(QuditError::OutcomeOutOfRange {
                index: outcome,
                dimension,
            });
        }
        Ok(Self {
            amplitudes: one_hot_vector(dimension, outcome),
        })
    }

    /// Equal superposition over all outcomes.
    pub fn uniform(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(QuditError::ZeroDimension);
        }
        let amp = T::one() / (dimension as f64).sqrt();
        Self::new(std::iter::repeat(amp).take(dimension))
    }

    /// Replace the stored vector. On failure the previous vector is kept.
    pub fn reset<I: IntoIterator<Item = T>>(&mut self, amplitudes: I) -> Result<()> {
        let candidate: Amplitudes<T> = amplitudes.into_iter().collect();
        validate_amplitudes(&candidate)?;
        self.amplitudes = candidate;
        Ok(())
    }

    pub fn amplitudes(&self) -> &[T] {
        &self.amplitudes
    }

    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Outcome probabilities |a_i|² in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Amplitude::magnitude_sqr).collect()
    }

    pub fn total_probability(&self) -> f64 {
        total_probability(&self.amplitudes)
    }

    pub fn phase(&self) -> StatePhase {
        let mut occupied = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.magnitude_sqr() > 0.0);
        match (occupied.next(), occupied.next()) {
            (Some((outcome, _)), None) => StatePhase::Collapsed { outcome },
            _ => StatePhase::Superposed,
        }
    }

    /// Sample an outcome and collapse onto it.
    ///
    /// Outcomes are scanned in index order, accumulating probability mass;
    /// the first index whose cumulative mass exceeds the uniform draw wins.
    /// If rounding leaves the cumulative mass short of the draw, the last
    /// index is returned.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let draw: f64 = rng.gen();
        let outcome = self.select_outcome(draw);
        self.amplitudes = one_hot_vector(self.dimension(), outcome);
        outcome
    }

    fn select_outcome(&self, draw: f64) -> usize {
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.magnitude_sqr();
            if draw < cumulative {
                return i;
            }
        }
        self.dimension() - 1
    }
}

fn one_hot_vector<T: Amplitude>(dimension: usize, outcome: usize) -> Amplitudes<T> {
    (0..dimension)
        .map(|j| if j == outcome { T::one() } else { T::zero() })
        .collect()
}
