use crate::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    fn demo_rules() -> RuleSet<f64> {
        RuleSet::new()
            .with_rule(0, move |a: f64| a * (PI / 4.0).cos())
            .with_rule(1, move |a: f64| a * (PI / 4.0).sin())
            .with_rule(2, |a: f64| a * (1.0 - 0.1))
    }

    #[test]
    fn test_commit_uses_pre_step_snapshot() {
        let mut automaton = QuditAutomaton::<f64>::new(3, 2).unwrap();
        automaton.reset_state(1, [0.0, 1.0]).unwrap();
        automaton.reset_state(2, [0.6, 0.8]).unwrap();
        automaton.entangle(0, 1, 0.5).unwrap();
        automaton.entangle(1, 2, 0.5).unwrap();

        automaton.evolve(&RuleSet::new()).unwrap();

        // qudit 0: [1,0] + [1,0] + 0.5*[0,1]
        let n0 = 4.25f64.sqrt();
        let s0 = automaton.state(0).unwrap().amplitudes();
        assert!(close(s0[0], 2.0 / n0) && close(s0[1], 0.5 / n0), "{:?}", s0);

        // qudit 1: [0,1] + 0.5*[1,0] + [0,1] + 0.5*[0.6,0.8]
        let n1 = 6.4f64.sqrt();
        let s1 = automaton.state(1).unwrap().amplitudes();
        assert!(close(s1[0], 0.8 / n1) && close(s1[1], 2.4 / n1), "{:?}", s1);

        // qudit 2: [0.6,0.8] + 0.5*[0,1] + [0.6,0.8]
        let n2 = 5.85f64.sqrt();
        let s2 = automaton.state(2).unwrap().amplitudes();
        assert!(close(s2[0], 1.2 / n2) && close(s2[1], 2.1 / n2), "{:?}", s2);
    }

    #[test]
    fn test_step_independent_of_entity_order() {
        // Mirror the chain: qudit k of one automaton is qudit 3-k of the other.
        let states = [[1.0, 0.0], [0.0, 1.0], [0.6, 0.8], [0.8, -0.6]];
        let mut forward = QuditAutomaton::<f64>::new(4, 2).unwrap();
        let mut reversed = QuditAutomaton::<f64>::new(4, 2).unwrap();
        for (k, s) in states.iter().enumerate() {
            forward.reset_state(k, *s).unwrap();
            reversed.reset_state(3 - k, *s).unwrap();
        }
        for (i, j, w) in [(0, 1, 0.3), (1, 2, -0.7), (2, 3, 1.5)] {
            forward.entangle(i, j, w).unwrap();
            reversed.entangle(3 - i, 3 - j, w).unwrap();
        }

        let rules = RuleSet::new().with_rule(1, Scale(0.5));
        forward.evolve(&rules).unwrap();
        reversed.evolve(&rules).unwrap();

        for k in 0..4 {
            let a = forward.state(k).unwrap().amplitudes();
            let b = reversed.state(3 - k).unwrap().amplitudes();
            assert!(close(a[0], b[0]) && close(a[1], b[1]), "qudit {}: {:?} vs {:?}", k, a, b);
        }
    }

    #[test]
    fn test_symmetry_after_entangle_sequence() {
        let mut automaton = QuditAutomaton::<f64>::new(6, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        use rand::Rng;
        for _ in 0..50 {
            let i = rng.gen_range(0..6);
            let j = rng.gen_range(0..6);
            automaton.entangle(i, j, rng.gen_range(-2.0..2.0)).unwrap();
        }
        let coupling = automaton.coupling();
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(coupling.strength_between(i, j), coupling.strength_between(j, i));
            }
        }
    }

    #[test]
    fn test_measurement_statistics() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 10_000;
        let mut zeros = 0;
        for _ in 0..trials {
            let mut state = AmplitudeState::new([0.6, 0.8]).unwrap();
            if state.measure(&mut rng) == 0 {
                zeros += 1;
            }
        }
        let ratio = zeros as f64 / trials as f64;
        assert!((ratio - 0.36).abs() < 0.03, "outcome 0 ratio {}", ratio);
    }

    #[test]
    fn test_evolved_states_stay_normalized() {
        let mut automaton = QuditAutomaton::<f64>::new(5, 3).unwrap();
        let h = (1.0f64 / 3.0).sqrt();
        for k in 0..5 {
            automaton.reset_state(k, [h, -h, h]).unwrap();
        }
        automaton.entangle(0, 1, 0.5).unwrap();
        automaton.entangle(1, 2, 0.3).unwrap();
        automaton.entangle(3, 4, 0.7).unwrap();

        let rules = demo_rules();
        for _ in 0..20 {
            automaton.evolve(&rules).unwrap();
            for state in automaton.states() {
                assert!(close(state.total_probability(), 1.0));
            }
        }
    }

    #[test]
    fn test_demo_run_stays_in_ground_state() {
        // All qudits start at outcome 0; coupling and rules never move mass
        // to other outcomes, so every measurement returns 0.
        let mut automaton = QuditAutomaton::<f64>::new(5, 3).unwrap();
        automaton.entangle(0, 1, 0.5).unwrap();
        automaton.entangle(1, 2, 0.3).unwrap();
        automaton.entangle(3, 4, 0.7).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let report = automaton.simulate(10, &demo_rules(), &mut rng).unwrap();
        assert_eq!(report.len(), 10);
        for record in &report.steps {
            assert_eq!(record.measurements, vec![0; 5]);
        }
        let tally = report.tally(3);
        assert!(close(tally.frequency(4, 0), 1.0));
    }

    #[test]
    fn test_superposed_run_visits_multiple_outcomes() {
        let mut automaton = QuditAutomaton::<f64>::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        // Re-prepare an equal superposition before every step.
        let h = 0.5f64.sqrt();
        let mut tally = OutcomeTally::new(3, 2);
        for _ in 0..500 {
            for k in 0..3 {
                automaton.reset_state(k, [h, h]).unwrap();
            }
            automaton.evolve(&RuleSet::new()).unwrap();
            tally.record(&automaton.measure_all(&mut rng));
        }
        for k in 0..3 {
            let f = tally.frequency(k, 0);
            assert!(f > 0.4 && f < 0.6, "qudit {} frequency {}", k, f);
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let run = |seed: u64| {
            let config = SimulationConfig {
                topology: CouplingTopology::Ring,
                strength: 0.5,
                ..SimulationConfig::default()
            };
            let mut automaton = QuditAutomaton::<f64>::from_simulation_config(&config).unwrap();
            let h = (1.0f64 / 3.0).sqrt();
            for k in 0..automaton.len() {
                automaton.reset_state(k, [h, h, h]).unwrap();
            }
            let rules = RuleSet::new().with_rule(2, Scale(0.9));
            let mut rng = StdRng::seed_from_u64(seed);
            let mut report = SimulationReport::new();
            for step in 0..5 {
                automaton.evolve(&rules).unwrap();
                report.record(step, automaton.measure_all(&mut rng));
                for k in 0..automaton.len() {
                    automaton.reset_state(k, [h, h, h]).unwrap();
                }
            }
            report
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_complex_automaton_evolves() {
        use num_complex::Complex;
        let mut automaton = QuditAutomaton::<Complex<f64>>::new(2, 2).unwrap();
        let h = 0.5f64.sqrt();
        automaton
            .reset_state(1, [Complex::new(0.0, h), Complex::new(h, 0.0)])
            .unwrap();
        automaton.entangle(0, 1, 1.0).unwrap();
        let rules = RuleSet::new().with_rule(1, |a: Complex<f64>| a * Complex::new(0.0, 1.0));
        automaton.evolve(&rules).unwrap();
        for state in automaton.states() {
            assert!(close(state.total_probability(), 1.0));
        }
        assert_eq!(automaton.state(0).unwrap().phase(), StatePhase::Superposed);
    }
}
