//! Network of coupled qudits and its evolution engine.
//!
//! One evolution step runs in two phases:
//!
//! 1. **Compute**: for every qudit, start from its own amplitudes, add the
//!    coupling-weighted amplitudes of every qudit it is coupled to, apply the
//!    rules per outcome and renormalize. Every qudit reads the same pre-step
//!    snapshot, so processing order does not matter (and with the `parallel`
//!    feature the qudits are computed on the rayon pool).
//! 2. **Commit**: every candidate is validated first; only if all of them are
//!    unit-norm are they written back. A rejected step leaves the whole
//!    automaton untouched.
//!
//! Measurement collapses each qudit independently, in index order.

use log::{debug, info, warn};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::amplitude::{normalize, Amplitude};
use crate::config::{AutomatonConfig, SelfCoupling, SimulationConfig};
use crate::coupling::CouplingMatrix;
use crate::error::{QuditError, Result};
use crate::report::SimulationReport;
use crate::rules::RuleSet;
use crate::state::{validate_amplitudes, AmplitudeState, Amplitudes};

/// A fixed set of qudits sharing one dimension, plus their couplings.
#[derive(Debug, Clone, PartialEq)]
pub struct QuditAutomaton<T: Amplitude = f64> {
    dimension: usize,
    self_coupling: SelfCoupling,
    states: Vec<AmplitudeState<T>>,
    coupling: CouplingMatrix,
}

impl<T: Amplitude> QuditAutomaton<T> {
    /// `num_entities` qudits of `dimension` outcomes, all in outcome 0,
    /// with identity coupling and the default self-coupling policy.
    pub fn new(num_entities: usize, dimension: usize) -> Result<Self> {
        Self::with_config(&AutomatonConfig {
            num_entities,
            dimension,
            self_coupling: SelfCoupling::default(),
        })
    }

    pub fn with_config(config: &AutomatonConfig) -> Result<Self> {
        let ground = AmplitudeState::one_hot(config.dimension, 0)?;
        Ok(Self {
            dimension: config.dimension,
            self_coupling: config.self_coupling,
            states: vec![ground; config.num_entities],
            coupling: CouplingMatrix::identity(config.num_entities),
        })
    }

    /// Automaton with the couplings of the configured topology already applied.
    pub fn from_simulation_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut automaton = Self::with_config(&config.automaton)?;
        automaton.coupling = CouplingMatrix::from_topology(
            &config.topology,
            config.automaton.num_entities,
            config.strength,
        );
        Ok(automaton)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn self_coupling(&self) -> SelfCoupling {
        self.self_coupling
    }

    pub fn set_self_coupling(&mut self, policy: SelfCoupling) {
        self.self_coupling = policy;
    }

    pub fn states(&self) -> &[AmplitudeState<T>] {
        &self.states
    }

    pub fn state(&self, entity: usize) -> Result<&AmplitudeState<T>> {
        self.check_entity(entity)?;
        Ok(&self.states[entity])
    }

    pub fn coupling(&self) -> &CouplingMatrix {
        &self.coupling
    }

    /// Couple `i` and `j` symmetrically. `i == j` sets the self-coupling.
    /// Any finite or non-finite strength is stored as given.
    pub fn entangle(&mut self, i: usize, j: usize, strength: f64) -> Result<()> {
        self.check_entity(i)?;
        self.check_entity(j)?;
        self.coupling.entangle(i, j, strength);
        debug!("entangled {} <-> {} with strength {}", i, j, strength);
        Ok(())
    }

    /// Overwrite one qudit's amplitudes. The vector must match the automaton
    /// dimension and be unit-norm.
    pub fn reset_state<I>(&mut self, entity: usize, amplitudes: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_entity(entity)?;
        let candidate: Amplitudes<T> = amplitudes.into_iter().collect();
        if candidate.len() != self.dimension {
            return Err(QuditError::DimensionMismatch {
                expected: self.dimension,
                found: candidate.len(),
            });
        }
        self.states[entity].reset(candidate)
    }

    /// Coupled amplitude vector of `entity` before rules and normalization.
    pub fn coupled_amplitudes(&self, entity: usize) -> Result<Vec<T>> {
        self.check_entity(entity)?;
        Ok(self.couple(entity).into_vec())
    }

    /// Advance every qudit by one synchronous step.
    ///
    /// Fails with [`QuditError::InvalidState`] if any qudit's new vector is
    /// not unit-norm (for example when the rules zero it out); nothing is
    /// committed in that case.
    pub fn evolve(&mut self, rules: &RuleSet<T>) -> Result<()> {
        if let Some(highest) = rules.highest_outcome() {
            if highest >= self.dimension {
                debug!(
                    "rules above outcome {} are ignored (dimension {})",
                    self.dimension - 1,
                    self.dimension
                );
            }
        }

        let candidates = self.compute_step(rules);

        for (entity, candidate) in candidates.iter().enumerate() {
            if let Err(err) = validate_amplitudes(candidate) {
                warn!("evolution rejected at qudit {}: {}", entity, err);
                return Err(err);
            }
        }

        for (state, candidate) in self.states.iter_mut().zip(candidates) {
            state.reset(candidate)?;
        }
        debug!("evolved {} qudits", self.states.len());
        Ok(())
    }

    /// Measure every qudit in index order, collapsing each.
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<usize> {
        self.states.iter_mut().map(|s| s.measure(rng)).collect()
    }

    /// Measure a single qudit.
    pub fn measure<R: Rng + ?Sized>(&mut self, entity: usize, rng: &mut R) -> Result<usize> {
        self.check_entity(entity)?;
        Ok(self.states[entity].measure(rng))
    }

    /// Run `steps` rounds of evolve followed by measure-all.
    ///
    /// Stops at the first rejected step and returns its error.
    pub fn simulate<R: Rng + ?Sized>(
        &mut self,
        steps: usize,
        rules: &RuleSet<T>,
        rng: &mut R,
    ) -> Result<SimulationReport> {
        let mut report = SimulationReport::new();
        for step in 0..steps {
            self.evolve(rules)?;
            let measurements = self.measure_all(rng);
            info!("step {}: measurements {:?}", step, measurements);
            report.record(step, measurements);
        }
        Ok(report)
    }

    fn check_entity(&self, index: usize) -> Result<()> {
        if index < self.states.len() {
            Ok(())
        } else {
            Err(QuditError::EntityOutOfRange {
                index,
                len: self.states.len(),
            })
        }
    }

    fn couple(&self, entity: usize) -> Amplitudes<T> {
        let mut coupled: Amplitudes<T> = self.states[entity].amplitudes().iter().copied().collect();
        for (neighbor, strength) in self.coupling.neighbors(entity) {
            if neighbor == entity && self.self_coupling == SelfCoupling::Exclude {
                continue;
            }
            let source = self.states[neighbor].amplitudes();
            for (acc, &amp) in coupled.iter_mut().zip(source) {
                *acc = *acc + amp * strength;
            }
        }
        coupled
    }

    fn next_amplitudes(&self, entity: usize, rules: &RuleSet<T>) -> Amplitudes<T> {
        let mut next = self.couple(entity);
        rules.apply_all(&mut next);
        normalize(&mut next);
        next
    }

    #[cfg(feature = "parallel")]
    fn compute_step(&self, rules: &RuleSet<T>) -> Vec<Amplitudes<T>> {
        (0..self.states.len())
            .into_par_iter()
            .map(|entity| self.next_amplitudes(entity, rules))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_step(&self, rules: &RuleSet<T>) -> Vec<Amplitudes<T>> {
        (0..self.states.len())
            .map(|entity| self.next_amplitudes(entity, rules))
            .collect()
    }
}
