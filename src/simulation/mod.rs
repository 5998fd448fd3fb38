// src/simulation/mod.rs

//! Runs a [`Circuit`] over an `N`-qubit register.
//!
//! The `Simulator` walks the circuit step by step, checks each gate against the
//! register, and hands the valid ones to the internal `SimulationEngine`.
//! Problems with a single gate are recorded as [`Warning`]s and the run goes on;
//! problems with the run as a whole are returned as [`SimError`].

mod results;
pub mod config;
pub mod controlled;
pub(crate) mod engine;
pub mod kron;

pub use config::SimulatorConfig;
pub use results::{SimulationResult, Warning, WarningKind};

use crate::circuits::Circuit;
use crate::circuits::wire::{self, parse_circuit};
use crate::core::{Result, SimError};
use crate::validation;
use engine::SimulationEngine;
use std::collections::{BTreeMap, HashSet};

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs `circuit` on `num_qubits` qubits starting from `|0...0>`.
    ///
    /// Steps run in order and the gates of a step run in listed order. A gate
    /// naming a qubit outside the register, or the same qubit twice, is
    /// skipped with a warning and marks the result partial.
    ///
    /// # Errors
    /// * `SimError::InvalidQubitCount` for `num_qubits == 0`.
    /// * `SimError::QubitLimitExceeded` above `config.max_qubits`.
    /// * `SimError::Incoherence` if norm validation is on and a gate breaks it.
    /// * `SimError::ArithmeticInput` if a non-finite angle reaches a kernel.
    #[tracing::instrument(level = "debug", skip(self, circuit), fields(steps = circuit.num_steps()))]
    pub fn run(&self, circuit: &Circuit, num_qubits: usize) -> Result<SimulationResult> {
        self.run_with_warnings(circuit, num_qubits, Vec::new(), &[])
    }

    /// Parses a wire document and runs it. Parse warnings come first in the
    /// result, followed by the ones raised while running. Every warning
    /// carries the step and position of its entry in the document, even when
    /// earlier entries of the same step were dropped.
    pub fn run_json(&self, json: &str, num_qubits: usize) -> Result<SimulationResult> {
        self.check_register(num_qubits)?;
        let parsed = parse_circuit(json, self.config.default_rotation_angle)?;
        self.run_with_warnings(&parsed.circuit, num_qubits, parsed.warnings, &parsed.positions)
    }

    /// Probability map filtered with the configured threshold.
    pub fn probability_map(&self, result: &SimulationResult) -> BTreeMap<String, f64> {
        result.probability_map(self.config.probability_threshold)
    }

    fn check_register(&self, num_qubits: usize) -> Result<()> {
        if num_qubits == 0 {
            return Err(SimError::InvalidQubitCount { num_qubits });
        }
        if num_qubits > self.config.max_qubits {
            return Err(SimError::QubitLimitExceeded { num_qubits, max: self.config.max_qubits });
        }
        Ok(())
    }

    fn run_with_warnings(
        &self,
        circuit: &Circuit,
        num_qubits: usize,
        mut warnings: Vec<Warning>,
        positions: &[Vec<usize>],
    ) -> Result<SimulationResult> {
        self.check_register(num_qubits)?;
        let mut engine = SimulationEngine::init(num_qubits)?;
        let mut gates_applied = 0;

        for (step, gates) in circuit.steps().iter().enumerate() {
            tracing::debug!(step, gates = gates.len(), "applying step");
            let mut used = HashSet::new();

            for (index, gate) in gates.iter().enumerate() {
                let position = wire::source_position(positions, step, index);
                if let Err(kind) = validation::check_gate(gate, num_qubits) {
                    tracing::warn!(step, position, %gate, "skipping gate: {}", kind);
                    warnings.push(Warning::new(step, position, kind));
                    continue;
                }
                if let Some(qubit) = validation::first_shared_qubit(&mut used, gate) {
                    let kind = WarningKind::SharedQubitInStep { qubit };
                    tracing::warn!(step, position, %gate, "{}", kind);
                    warnings.push(Warning::new(step, position, kind));
                }

                engine.apply_gate(gate)?;
                gates_applied += 1;

                if self.config.validate_norm {
                    validation::check_normalization(engine.state(), Some(self.config.norm_tolerance))
                        .inspect_err(|e| tracing::error!(step, position, %gate, "{}", e))?;
                }
            }
        }

        let result = SimulationResult::from_run(engine.into_state(), warnings, gates_applied);
        if result.is_partial() {
            tracing::warn!(skipped = result.gates_skipped(), "circuit ran partially");
        }
        Ok(result)
    }
}

/// Runs `circuit` with the default configuration.
pub fn run_circuit(circuit: &Circuit, num_qubits: usize) -> Result<SimulationResult> {
    Simulator::new().run(circuit, num_qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::operations::Gate;
    use num_complex::Complex;
    use num_traits::Zero;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    /// Asserts that two complex state vectors are approximately equal component-wise.
    fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, DistSq: {:.3e}, Context: {}",
                i, actual[i], expected[i], dist_sq, context
            );
        }
    }

    #[test]
    fn test_empty_circuit_returns_zero_state() -> Result<()> {
        let result = run_circuit(&Circuit::new(), 2)?;
        assert!(result.is_empty_run());
        assert!(!result.is_partial());
        assert_eq!(result.state().probability(0), 1.0);
        Ok(())
    }

    #[test]
    fn test_bell_circuit() -> Result<()> {
        let circuit = CircuitBuilder::new()
            .gate(Gate::H { target: 1 })
            .gate(Gate::Cnot { control: 1, target: 0 })
            .build();
        let result = run_circuit(&circuit, 2)?;
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let z = Complex::zero();
        assert_complex_vec_approx_equal(result.state().vector(), &[h, z, z, h], "Bell state");
        assert_eq!(result.gates_applied(), 2);
        Ok(())
    }

    #[test]
    fn test_out_of_range_gate_is_skipped() -> Result<()> {
        let circuit = CircuitBuilder::new()
            .step([Gate::X { target: 0 }, Gate::X { target: 4 }])
            .build();
        let result = run_circuit(&circuit, 2)?;
        assert!(result.is_partial());
        assert_eq!(result.gates_applied(), 1);
        assert_eq!(result.gates_skipped(), 1);
        assert_eq!(
            result.warnings(),
            &[Warning::new(0, 1, WarningKind::QubitOutOfRange { qubit: 4, num_qubits: 2 })]
        );
        assert_eq!(result.state().probability(0b10), 1.0);
        Ok(())
    }

    #[test]
    fn test_shared_qubit_in_step_applies_sequentially() -> Result<()> {
        let circuit = CircuitBuilder::new()
            .step([Gate::X { target: 0 }, Gate::X { target: 0 }])
            .build();
        let result = run_circuit(&circuit, 1)?;
        assert!(!result.is_partial());
        assert_eq!(result.gates_applied(), 2);
        assert_eq!(result.warnings()[0].kind, WarningKind::SharedQubitInStep { qubit: 0 });
        assert_eq!(result.state().probability(0), 1.0);
        Ok(())
    }

    #[test]
    fn test_register_errors_are_fatal() {
        let circuit = CircuitBuilder::new().gate(Gate::H { target: 0 }).build();
        assert_eq!(run_circuit(&circuit, 0), Err(SimError::InvalidQubitCount { num_qubits: 0 }));
        assert_eq!(
            run_circuit(&circuit, 11),
            Err(SimError::QubitLimitExceeded { num_qubits: 11, max: 10 })
        );
        let small = Simulator::with_config(SimulatorConfig::default().with_max_qubits(2)).unwrap();
        assert!(matches!(small.run(&circuit, 3), Err(SimError::QubitLimitExceeded { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Simulator::with_config(SimulatorConfig::default().with_max_qubits(0)).is_err());
    }

    #[test]
    fn test_run_json_merges_parse_warnings() -> Result<()> {
        let json = r#"{"gates": [[{"type": "H", "targets": [0]}, {"type": "FOO", "targets": [1]}],
                                 [{"type": "RX", "targets": [5]}]]}"#;
        let result = Simulator::new().run_json(json, 1)?;
        assert_eq!(result.gates_applied(), 1);
        let kinds: Vec<_> = result.warnings().iter().map(|w| w.kind.clone()).collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(kinds[0], WarningKind::UnknownGateType { .. }));
        assert!(matches!(kinds[1], WarningKind::MissingAngle { .. }));
        assert!(matches!(kinds[2], WarningKind::QubitOutOfRange { qubit: 5, num_qubits: 1 }));
        assert_eq!(result.gates_skipped(), 2);
        Ok(())
    }

    #[test]
    fn test_run_json_reports_document_positions_after_drops() -> Result<()> {
        let json = r#"{"gates": [[{"type": "NOPE", "targets": [0]}, {"type": "X", "targets": [5]}]]}"#;
        let result = Simulator::new().run_json(json, 1)?;
        assert_eq!(
            result.warnings(),
            &[
                Warning::new(0, 0, WarningKind::UnknownGateType { name: "NOPE".to_string() }),
                Warning::new(0, 1, WarningKind::QubitOutOfRange { qubit: 5, num_qubits: 1 }),
            ]
        );
        assert_eq!(result.gates_skipped(), 2);
        Ok(())
    }

    #[test]
    fn test_run_json_checks_register_first() {
        assert_eq!(
            Simulator::new().run_json("not json", 0),
            Err(SimError::InvalidQubitCount { num_qubits: 0 })
        );
        assert!(matches!(Simulator::new().run_json("not json", 1), Err(SimError::MalformedCircuit { .. })));
    }

    #[test]
    fn test_norm_validation_passes_for_unitary_circuit() -> Result<()> {
        let sim = Simulator::with_config(SimulatorConfig::default().with_norm_validation(1e-9))?;
        let circuit = CircuitBuilder::new()
            .step([Gate::H { target: 0 }, Gate::Ry { target: 1, theta: 0.3 }])
            .gate(Gate::Ccnot { control1: 0, control2: 1, target: 2 })
            .gate(Gate::Rz { target: 2, theta: 1.7 })
            .build();
        let result = sim.run(&circuit, 3)?;
        assert!((result.state().norm_sqr() - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_probability_map_uses_config_threshold() -> Result<()> {
        let circuit = CircuitBuilder::new().gate(Gate::H { target: 0 }).build();
        let sim = Simulator::new();
        let result = sim.run(&circuit, 1)?;
        let map = sim.probability_map(&result);
        assert_eq!(map.len(), 2);
        assert!((map["0"] - 0.5).abs() < 1e-12);
        assert!((map["1"] - 0.5).abs() < 1e-12);
        Ok(())
    }
}
