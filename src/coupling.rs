//! Symmetric coupling strengths between qudits.
//!
//! Starts as the identity (self-coupling 1, no neighbours). Strengths are
//! plain weights with no range restriction: negative or >1 values are
//! accepted as given.

use crate::topology::{build_coupling_map, CouplingTopology};

/// Square, symmetric matrix of coupling strengths, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix {
    size: usize,
    strengths: Vec<f64>,
}

impl CouplingMatrix {
    /// n×n identity coupling.
    pub fn identity(size: usize) -> Self {
        let mut strengths = vec![0.0; size * size];
        for i in 0..size {
            strengths[i * size + i] = 1.0;
        }
        Self { size, strengths }
    }

    /// Identity coupling plus `strength` on every edge of a preset topology.
    pub fn from_topology(topology: &CouplingTopology, size: usize, strength: f64) -> Self {
        let mut matrix = Self::identity(size);
        for (i, j) in build_coupling_map(topology, size) {
            matrix.entangle(i, j, strength);
        }
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Set the strength between `i` and `j` in both directions.
    ///
    /// `i == j` overwrites the self-coupling.
    ///
    /// # Panics
    ///
    /// If either index is not below [`size`](Self::size).
    pub fn entangle(&mut self, i: usize, j: usize, strength: f64) {
        let (ij, ji) = (self.offset(i, j), self.offset(j, i));
        self.strengths[ij] = strength;
        self.strengths[ji] = strength;
    }

    /// # Panics
    ///
    /// If either index is not below [`size`](Self::size).
    pub fn strength_between(&self, i: usize, j: usize) -> f64 {
        self.strengths[self.offset(i, j)]
    }

    /// Nonzero couplings of `idx`, including itself, in index order.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.offset(idx, 0);
        self.strengths[start..start + self.size]
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, strength)| strength != 0.0)
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| self.strength_between(i, j) == self.strength_between(j, i))
        })
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.size && j < self.size,
            "coupling index ({}, {}) out of range for size {}",
            i,
            j,
            self.size
        );
        i * self.size + j
    }
}
