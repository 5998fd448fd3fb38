// src/simulation/engine.rs
use crate::core::{Result, SimError, StateVector};
use crate::operations::Gate;
use crate::operations::matrices::{self, CNOT};
use crate::simulation::{controlled, kron};

/// Owns the state vector of one run and evolves it gate by gate.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// `2^N` amplitudes, qubit 0 as the most-significant index bit.
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Starts from `|0...0>`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        let state = StateVector::zero_state(num_qubits)?;
        Ok(Self { state, num_qubits })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        self.state.replace(state.vector().to_vec())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies one already-validated gate.
    ///
    /// Single-qubit gates and CNOT go through the dense Kronecker operator.
    /// CCNOT permutes amplitudes in place.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        let n = self.num_qubits;
        match *gate {
            Gate::Cnot { control, target } => {
                let next = kron::apply_two_qubit_gate(self.state.vector(), &CNOT, control, target, n)?;
                self.state.replace(next)
            }
            Gate::Ccnot { control1, control2, target } => {
                controlled::apply_ccnot(self.state.vector_mut(), control1, control2, target, n)
            }
            Gate::H { target }
            | Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::Rx { target, .. }
            | Gate::Ry { target, .. }
            | Gate::Rz { target, .. } => {
                let Some(matrix) = matrices::matrix_for(gate) else {
                    return Err(SimError::InvalidOperation {
                        message: format!("no 2x2 matrix for {}", gate),
                    });
                };
                let next = kron::apply_single_qubit_gate(self.state.vector(), &matrix, target, n)?;
                self.state.replace(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use num_traits::Zero;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    #[test]
    fn test_engine_starts_in_zero_state() -> Result<()> {
        let engine = SimulationEngine::init(2)?;
        assert_eq!(engine.state().probability(0), 1.0);
        assert!(SimulationEngine::init(0).is_err());
        Ok(())
    }

    #[test]
    fn test_engine_dispatch() -> Result<()> {
        let mut engine = SimulationEngine::init(3)?;
        engine.apply_gate(&Gate::X { target: 0 })?;
        engine.apply_gate(&Gate::X { target: 1 })?;
        engine.apply_gate(&Gate::Ccnot { control1: 0, control2: 1, target: 2 })?;
        assert!((engine.state().probability(0b111) - 1.0).abs() < 1e-12);

        engine.apply_gate(&Gate::Cnot { control: 2, target: 0 })?;
        assert!((engine.state().probability(0b011) - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_rx_pi_on_loaded_state() -> Result<()> {
        let mut engine = SimulationEngine::init(1)?;
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        engine.set_state(StateVector::from_amplitudes(vec![h, h])?)?;
        engine.apply_gate(&Gate::Rx { target: 0, theta: PI })?;
        // RX(π) = -iX, so (|0> + |1>)/√2 maps to -i(|0> + |1>)/√2
        let expected = Complex::new(0.0, -FRAC_1_SQRT_2);
        for amplitude in engine.into_state().vector() {
            assert!((amplitude - expected).norm() < 1e-12);
            assert!(!amplitude.is_zero());
        }
        Ok(())
    }
}
