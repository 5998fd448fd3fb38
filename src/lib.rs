// src/lib.rs

//! `qsim` - a small state-vector simulator for gate-model quantum circuits
//!
//! A circuit is a list of time steps, each a list of gates (H, X, Y, Z, RX, RY,
//! RZ, CNOT, CCNOT). Running it on `N` qubits evolves the `2^N` amplitude
//! vector from `|0...0>` and returns the final state together with any
//! warnings about gates that could not be applied.
//!
//! Qubit 0 is the most-significant bit of a basis index: on two qubits,
//! index 2 (`"10"`) is the state with qubit 0 set.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{Amplitude, Result, SimError, StateVector};
pub use operations::{Gate, GateKind};
pub use circuits::{Circuit, CircuitBuilder, CircuitStats, Complexity};
pub use circuits::optimize::Optimization;
pub use circuits::wire::{ParsedCircuit, parse_circuit};
pub use simulation::{
    SimulationResult, Simulator, SimulatorConfig, Warning, WarningKind, run_circuit,
};
pub use validation::{check_normalization, validate_state};

// Example 1: Single-qubit superposition
/// ```
/// use qsim::{CircuitBuilder, Gate, run_circuit, SimError};
///
/// let circuit = CircuitBuilder::new()
///     .gate(Gate::H { target: 0 })
///     .build();
///
/// let result = run_circuit(&circuit, 1)?;
/// println!("Circuit:\n{}", circuit);
/// println!("Result:\n{}", result);
///
/// let probabilities = result.probability_map(1e-3);
/// assert_eq!(probabilities.len(), 2);
/// assert!((probabilities["0"] - 0.5).abs() < 1e-9);
/// assert!((probabilities["1"] - 0.5).abs() < 1e-9);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Bell pair from the JSON wire format
/// ```
/// use qsim::{Simulator, SimError};
///
/// let json = r#"{ "gates": [[{ "type": "H", "targets": [1] }],
///                           [{ "type": "CNOT", "targets": [1, 0] }]] }"#;
/// let result = Simulator::new().run_json(json, 2)?;
///
/// // (|00> + |11>) / sqrt(2)
/// let amplitudes = result.state().vector();
/// assert!((amplitudes[0].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
/// assert!((amplitudes[3].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
/// assert!(amplitudes[1].norm() < 1e-9 && amplitudes[2].norm() < 1e-9);
/// assert!(!result.is_partial());
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 3: Bad gates are skipped, not fatal
/// ```
/// use qsim::{CircuitBuilder, Gate, run_circuit, WarningKind, SimError};
///
/// let circuit = CircuitBuilder::new()
///     .step([Gate::X { target: 0 }, Gate::X { target: 7 }])
///     .build();
/// let result = run_circuit(&circuit, 2)?;
///
/// assert!(result.is_partial());
/// assert_eq!(
///     result.warnings()[0].kind,
///     WarningKind::QubitOutOfRange { qubit: 7, num_qubits: 2 }
/// );
/// assert_eq!(result.state().basis_label(2), "10");
/// assert!((result.state().probability(2) - 1.0).abs() < 1e-12);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 4: Built-in templates and pair cancellation
/// ```
/// use qsim::circuits::templates;
/// use qsim::{run_circuit, Gate, SimError};
///
/// let bell = templates::by_id("bell-state").expect("built-in template");
/// let probabilities = run_circuit(&bell.circuit(), bell.num_qubits)?.probability_map(1e-3);
/// assert_eq!(probabilities.keys().collect::<Vec<_>>(), ["00", "11"]);
///
/// let mut circuit = bell.circuit();
/// circuit.add_gate(Gate::Cnot { control: 0, target: 1 });
/// let optimization = circuit.optimized();
/// assert_eq!(optimization.savings(), 2);
/// assert_eq!(optimization.circuit, templates::superposition());
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = ();
