//! Prints the CCNOT truth table, driving the simulator through the JSON wire format.

use qsim::{SimError, Simulator};

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt::init();

    let simulator = Simulator::new();
    println!("in  -> out");
    for input in 0..8usize {
        // Qubit 0 is the leftmost digit of the label.
        let prep: Vec<String> = (0..3usize)
            .filter(|&q| input & (1 << (2 - q)) != 0)
            .map(|q| format!(r#"{{"type": "X", "targets": [{}]}}"#, q))
            .collect();
        let json = format!(
            r#"{{"gates": [[{}], [{{"type": "CCNOT", "targets": [0, 1, 2]}}]]}}"#,
            prep.join(", ")
        );

        let result = simulator.run_json(&json, 3)?;
        let outcome = simulator
            .probability_map(&result)
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(label, _)| label)
            .unwrap_or_default();
        println!("{} -> {}", result.state().basis_label(input), outcome);
    }
    Ok(())
}
