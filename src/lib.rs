//! # qudit-automaton
//!
//! Discrete-time simulation of a network of coupled qudits. Each qudit holds
//! a real (or complex) amplitude vector over `dimension` outcomes; neighbours
//! influence each other through a symmetric coupling matrix.
//!
//! ## Step
//!
//! 1. Every qudit gathers coupling-weighted contributions from its neighbours
//! 2. Per-outcome transformation rules are applied
//! 3. The vector is renormalized
//! 4. All new vectors are committed at once, from the pre-step snapshot
//!
//! Measurement collapses each qudit to a one-hot vector at a sampled outcome.
//!
//! ## Usage
//!
//! ```no_run
//! use qudit_automaton::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut automaton = QuditAutomaton::<f64>::new(5, 3).unwrap();
//! automaton.entangle(0, 1, 0.5).unwrap();
//!
//! let rules = RuleSet::new()
//!     .with_rule(0, Scale((std::f64::consts::PI / 4.0).cos()))
//!     .with_rule(2, Scale(0.9));
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let report = automaton.simulate(10, &rules, &mut rng).unwrap();
//! println!("{:?}", report.last());
//! ```

pub mod amplitude;
pub mod automaton;
pub mod config;
pub mod coupling;
pub mod error;
pub mod report;
pub mod rules;
pub mod state;
pub mod topology;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::amplitude::*;
    pub use crate::automaton::*;
    pub use crate::config::*;
    pub use crate::coupling::*;
    pub use crate::error::QuditError;
    pub use crate::report::*;
    pub use crate::rules::*;
    pub use crate::state::*;
    pub use crate::topology::*;
}
