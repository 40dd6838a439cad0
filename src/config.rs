//! Automaton and simulation configuration.
//!
//! Defaults reproduce the classic demonstration run: five qutrits with
//! faithful self-coupling. [`SimulationConfig::from_env`] lets the binary
//! override them through `QUDIT_*` environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{QuditError, Result};
use crate::topology::CouplingTopology;

/// How the self-coupling diagonal enters the coupled amplitude vector.
///
/// Every qudit already starts from its own amplitudes. With `Include`, the
/// diagonal strength (1 by default) adds them a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfCoupling {
    #[default]
    Include,
    Exclude,
}

impl FromStr for SelfCoupling {
    type Err = QuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" | "on" | "true" => Ok(SelfCoupling::Include),
            "exclude" | "off" | "false" => Ok(SelfCoupling::Exclude),
            other => Err(QuditError::InvalidConfig(format!(
                "unknown self-coupling policy '{}'",
                other
            ))),
        }
    }
}

/// Shape of an automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomatonConfig {
    /// Number of qudits.
    pub num_entities: usize,
    /// Outcomes per qudit.
    pub dimension: usize,
    pub self_coupling: SelfCoupling,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            num_entities: 5,
            dimension: 3,
            self_coupling: SelfCoupling::Include,
        }
    }
}

/// A full simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub automaton: AutomatonConfig,
    /// Number of evolve + measure steps.
    pub steps: usize,
    /// Seed for the measurement RNG.
    pub seed: u64,
    /// Preset couplings applied before explicit entanglements.
    pub topology: CouplingTopology,
    /// Strength used for every topology edge.
    pub strength: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            automaton: AutomatonConfig::default(),
            steps: 10,
            seed: 42,
            topology: CouplingTopology::Isolated,
            strength: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by `QUDIT_ENTITIES`, `QUDIT_DIMENSION`,
    /// `QUDIT_STEPS`, `QUDIT_SEED`, `QUDIT_SELF_COUPLING`,
    /// `QUDIT_TOPOLOGY` and `QUDIT_STRENGTH`. Unset variables keep the default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parsed::<usize, _>(&lookup, "QUDIT_ENTITIES")? {
            config.automaton.num_entities = v;
        }
        if let Some(v) = parsed::<usize, _>(&lookup, "QUDIT_DIMENSION")? {
            config.automaton.dimension = v;
        }
        if let Some(v) = parsed::<SelfCoupling, _>(&lookup, "QUDIT_SELF_COUPLING")? {
            config.automaton.self_coupling = v;
        }
        if let Some(v) = parsed::<usize, _>(&lookup, "QUDIT_STEPS")? {
            config.steps = v;
        }
        if let Some(v) = parsed::<u64, _>(&lookup, "QUDIT_SEED")? {
            config.seed = v;
        }
        if let Some(v) = parsed::<CouplingTopology, _>(&lookup, "QUDIT_TOPOLOGY")? {
            config.topology = v;
        }
        if let Some(v) = parsed::<f64, _>(&lookup, "QUDIT_STRENGTH")? {
            config.strength = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.automaton.dimension == 0 {
            return Err(QuditError::ZeroDimension);
        }
        if !self.strength.is_finite() {
            return Err(QuditError::InvalidConfig(format!(
                "coupling strength must be finite, got {}",
                self.strength
            )));
        }
        Ok(())
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            QuditError::InvalidConfig(format!("{}={:?}: {}", key, raw, e))
        }),
    }
}
