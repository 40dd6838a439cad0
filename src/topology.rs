//! Preset coupling layouts for a row of qudits.
//!
//! Each topology yields an undirected edge list; [`CouplingMatrix::from_topology`]
//! turns it into strengths.
//!
//! [`CouplingMatrix::from_topology`]: crate::coupling::CouplingMatrix::from_topology

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::QuditError;

#[derive(Debug, Clone, PartialEq)]
pub enum CouplingTopology {
    /// No edges; qudits evolve independently.
    Isolated,
    /// Nearest neighbours: (0,1), (1,2), ...
    Chain,
    /// Chain closed into a ring.
    Ring,
    /// Disjoint pairs: (0,1), (2,3), ...
    Pairs,
    /// Every distinct pair.
    AllToAll,
    /// Each pair coupled independently with probability `density`.
    Random { seed: u64, density: f64 },
}

/// An undirected edge (i, j) with i < j.
pub type CouplingEdge = (usize, usize);

/// Whether `i` and `j` share an edge. Never true for `i == j`.
pub fn is_coupled(topology: &CouplingTopology, n: usize, i: usize, j: usize) -> bool {
    if i == j || i >= n || j >= n {
        return false;
    }
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    match *topology {
        CouplingTopology::Isolated => false,
        CouplingTopology::Chain => hi - lo == 1,
        CouplingTopology::Ring => hi - lo == 1 || (n > 2 && lo == 0 && hi == n - 1),
        CouplingTopology::Pairs => lo % 2 == 0 && hi == lo + 1,
        CouplingTopology::AllToAll => true,
        CouplingTopology::Random { seed, density } => {
            // Seeded per unordered pair so the answer is symmetric and stable.
            let pair_seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add((lo as u64).wrapping_mul(1442695040888963407))
                .wrapping_add((hi as u64).wrapping_mul(2862933555777941757));
            let mut rng = StdRng::seed_from_u64(pair_seed);
            rng.gen::<f64>() < density
        }
    }
}

/// All edges of `topology` over `n` qudits, sorted, with i < j.
pub fn build_coupling_map(topology: &CouplingTopology, n: usize) -> Vec<CouplingEdge> {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if is_coupled(topology, n, i, j) {
                edges.push((i, j));
            }
        }
    }
    edges
}

impl fmt::Display for CouplingTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouplingTopology::Isolated => write!(f, "isolated"),
            CouplingTopology::Chain => write!(f, "chain"),
            CouplingTopology::Ring => write!(f, "ring"),
            CouplingTopology::Pairs => write!(f, "pairs"),
            CouplingTopology::AllToAll => write!(f, "all-to-all"),
            CouplingTopology::Random { seed, density } => {
                write!(f, "random(seed={}, density={})", seed, density)
            }
        }
    }
}

impl FromStr for CouplingTopology {
    type Err = QuditError;

    /// Parses the fixed layouts by name; `random` needs explicit parameters
    /// and is not accepted here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolated" | "none" => Ok(CouplingTopology::Isolated),
            "chain" | "linear" => Ok(CouplingTopology::Chain),
            "ring" => Ok(CouplingTopology::Ring),
            "pairs" => Ok(CouplingTopology::Pairs),
            "all-to-all" | "all" => Ok(CouplingTopology::AllToAll),
            other => Err(QuditError::InvalidConfig(format!(
                "unknown coupling topology '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_has_n_minus_1_edges() {
        let edges = build_coupling_map(&CouplingTopology::Chain, 6);
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
    }

    #[test]
    fn ring_closes_the_chain() {
        let edges = build_coupling_map(&CouplingTopology::Ring, 4);
        assert_eq!(edges.len(), 4);
        assert!(edges.contains(&(0, 3)));
    }

    #[test]
    fn two_qudit_ring_has_single_edge() {
        assert_eq!(build_coupling_map(&CouplingTopology::Ring, 2), vec![(0, 1)]);
    }

    #[test]
    fn pairs_are_disjoint() {
        let edges = build_coupling_map(&CouplingTopology::Pairs, 5);
        assert_eq!(edges, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn all_to_all_is_complete() {
        assert_eq!(build_coupling_map(&CouplingTopology::AllToAll, 5).len(), 10);
    }

    #[test]
    fn isolated_has_no_edges() {
        assert!(build_coupling_map(&CouplingTopology::Isolated, 5).is_empty());
    }

    #[test]
    fn random_is_deterministic_and_symmetric() {
        let topo = CouplingTopology::Random {
            seed: 42,
            density: 0.5,
        };
        for i in 0..8 {
            for j in 0..8 {
                assert_eq!(is_coupled(&topo, 8, i, j), is_coupled(&topo, 8, j, i));
            }
        }
        assert_eq!(build_coupling_map(&topo, 8), build_coupling_map(&topo, 8));
    }

    #[test]
    fn random_density_extremes() {
        let none = CouplingTopology::Random { seed: 1, density: 0.0 };
        let all = CouplingTopology::Random { seed: 1, density: 1.0 };
        assert!(build_coupling_map(&none, 6).is_empty());
        assert_eq!(build_coupling_map(&all, 6).len(), 15);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Chain".parse::<CouplingTopology>().unwrap(), CouplingTopology::Chain);
        assert_eq!(" all ".parse::<CouplingTopology>().unwrap(), CouplingTopology::AllToAll);
        assert!("mobius".parse::<CouplingTopology>().is_err());
    }
}
