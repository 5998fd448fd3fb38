//! Builds a Bell pair, prints the circuit, the state and a sampled histogram.

use qsim::{CircuitBuilder, Gate, SimError, Simulator};

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let circuit = CircuitBuilder::new()
        .gate(Gate::H { target: 1 })
        .gate(Gate::Cnot { control: 1, target: 0 })
        .build();
    println!("{}", circuit);

    let simulator = Simulator::new();
    let result = simulator.run(&circuit, 2)?;
    println!("{}", result);

    for (label, p) in simulator.probability_map(&result) {
        println!("  P(|{}>) = {:.4}", label, p);
    }

    let shots = 1000;
    println!("Sampled {} shots:", shots);
    for (label, count) in result.sample_counts(shots, 2024) {
        println!("  {}: {}", label, count);
    }
    Ok(())
}
