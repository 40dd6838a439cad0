//! Qudit automaton demonstration run.
//!
//! Five qutrits, three entangled pairs, a 45° phase projection on outcomes
//! 0 and 1 and 10% damping on outcome 2. Shape, seed, step count and preset
//! topology can be overridden through `QUDIT_*` variables; `RUST_LOG`
//! controls log output.

use std::f64::consts::PI;
use std::process;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use qudit_automaton::prelude::*;

const DEMO_ENTANGLEMENTS: [(usize, usize, f64); 3] = [(0, 1, 0.5), (1, 2, 0.3), (3, 4, 0.7)];

fn demo_rules() -> RuleSet<f64> {
    let phase = PI / 4.0;
    RuleSet::new()
        .with_rule(0, Scale(phase.cos()))
        .with_rule(1, Scale(phase.sin()))
        .with_rule(2, Scale(1.0 - 0.1))
}

fn run() -> Result<(), QuditError> {
    let config = SimulationConfig::from_env()?;
    info!("configuration: {:?}", config);

    let mut automaton = QuditAutomaton::<f64>::from_simulation_config(&config)?;
    for &(i, j, strength) in &DEMO_ENTANGLEMENTS {
        if i < automaton.len() && j < automaton.len() {
            automaton.entangle(i, j, strength)?;
        }
    }

    println!("━━━ Qudit Automaton ━━━");
    println!();
    println!("  Qudits:         {}", automaton.len());
    println!("  Dimension:      {}", automaton.dimension());
    println!("  Self-coupling:  {:?}", automaton.self_coupling());
    println!("  Topology:       {} (strength {})", config.topology, config.strength);
    println!("  Seed:           {}", config.seed);
    println!();

    let rules = demo_rules();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let report = automaton.simulate(config.steps, &rules, &mut rng)?;

    for record in &report.steps {
        println!("Step {}:", record.step);
        println!("Measurements: {:?}", record.measurements);
    }

    println!();
    println!("━━━ Outcome frequencies ━━━");
    let tally = report.tally(automaton.dimension());
    for entity in 0..automaton.len() {
        let freqs: Vec<String> = (0..automaton.dimension())
            .map(|outcome| format!("{:.2}", tally.frequency(entity, outcome)))
            .collect();
        println!("  qudit {}: [{}]", entity, freqs.join(", "));
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("simulation failed: {}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
