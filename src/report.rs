//! Records produced by a simulation run.

/// Measurements taken at the end of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: usize,
    /// One outcome per qudit, in qudit order.
    pub measurements: Vec<usize>,
}

/// Every step of a run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub steps: Vec<StepRecord>,
}

impl SimulationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: usize, measurements: Vec<usize>) {
        self.steps.push(StepRecord { step, measurements });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.steps.last()
    }

    /// Outcome history of one qudit across all steps.
    pub fn history(&self, entity: usize) -> Vec<usize> {
        self.steps
            .iter()
            .filter_map(|s| s.measurements.get(entity).copied())
            .collect()
    }

    /// Histogram of outcomes per qudit.
    pub fn tally(&self, dimension: usize) -> OutcomeTally {
        let entities = self.steps.first().map_or(0, |s| s.measurements.len());
        let mut tally = OutcomeTally::new(entities, dimension);
        for step in &self.steps {
            tally.record(&step.measurements);
        }
        tally
    }
}

/// Per-qudit outcome counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeTally {
    dimension: usize,
    counts: Vec<Vec<usize>>,
    samples: usize,
}

impl OutcomeTally {
    pub fn new(entities: usize, dimension: usize) -> Self {
        Self {
            dimension,
            counts: vec![vec![0; dimension]; entities],
            samples: 0,
        }
    }

    /// Count one round of measurements. Entries beyond the tracked qudits or
    /// outcomes are ignored.
    pub fn record(&mut self, measurements: &[usize]) {
        for (row, &outcome) in self.counts.iter_mut().zip(measurements) {
            if let Some(count) = row.get_mut(outcome) {
                *count += 1;
            }
        }
        self.samples += 1;
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn count(&self, entity: usize, outcome: usize) -> usize {
        self.counts
            .get(entity)
            .and_then(|row| row.get(outcome))
            .copied()
            .unwrap_or(0)
    }

    /// Empirical probability of `outcome` for `entity`; 0 with no samples.
    pub fn frequency(&self, entity: usize, outcome: usize) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.count(entity, outcome) as f64 / self.samples as f64
    }
}
