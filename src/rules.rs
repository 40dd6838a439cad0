//! Per-outcome transformation rules applied during evolution.
//!
//! A [`RuleSet`] maps an outcome index to a unary transform. Outcomes with
//! no rule pass through unchanged, and rules keyed beyond the qudit
//! dimension are never consulted. Transforms are trusted: a panic inside
//! one propagates out of `evolve` untouched.

use std::collections::BTreeMap;
use std::fmt;

use crate::amplitude::Amplitude;

/// A pure value transform for one outcome position.
pub trait Transform<T>: Send + Sync {
    fn apply(&self, value: T) -> T;
}

impl<T, F> Transform<T> for F
where
    F: Fn(T) -> T + Send + Sync,
{
    fn apply(&self, value: T) -> T {
        self(value)
    }
}

/// Multiply by a constant. Covers phase-projection and damping rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(pub f64);

impl<T: Amplitude> Transform<T> for Scale {
    fn apply(&self, value: T) -> T {
        value * self.0
    }
}

/// Mapping from outcome index to transform.
pub struct RuleSet<T = f64> {
    rules: BTreeMap<usize, Box<dyn Transform<T>>>,
}

impl<T> RuleSet<T> {
    /// Empty rule set: every outcome is identity.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_rule<R>(mut self, outcome: usize, rule: R) -> Self
    where
        R: Transform<T> + 'static,
    {
        self.insert(outcome, rule);
        self
    }

    /// Set the rule for `outcome`, replacing any previous one.
    pub fn insert<R>(&mut self, outcome: usize, rule: R)
    where
        R: Transform<T> + 'static,
    {
        self.rules.insert(outcome, Box::new(rule));
    }

    pub fn remove(&mut self, outcome: usize) -> bool {
        self.rules.remove(&outcome).is_some()
    }

    pub fn contains(&self, outcome: usize) -> bool {
        self.rules.contains_key(&outcome)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Transform `value` at `outcome`, or return it unchanged if no rule exists.
    pub fn apply(&self, outcome: usize, value: T) -> T {
        match self.rules.get(&outcome) {
            Some(rule) => rule.apply(value),
            None => value,
        }
    }

    /// Apply every rule in place across a vector.
    pub fn apply_all(&self, values: &mut [T])
    where
        T: Copy,
    {
        for (outcome, value) in values.iter_mut().enumerate() {
            *value = self.apply(outcome, *value);
        }
    }

    /// Largest outcome index with a rule, if any.
    pub fn highest_outcome(&self) -> Option<usize> {
        self.rules.keys().next_back().copied()
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("outcomes", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
