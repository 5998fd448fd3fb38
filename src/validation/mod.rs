// src/validation/mod.rs

//! Checks on gates before they are applied and on states after.

use crate::core::{NORM_TOLERANCE, Result, SimError, StateVector};
use crate::operations::Gate;
use crate::simulation::WarningKind;
use std::collections::HashSet;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SimError::Incoherence {
            message: format!(
                "state normalization failed: sum(|c_i|^2) = {:.12} (tolerance {:.1e})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Full state check: finite amplitudes, then normalization.
pub fn validate_state(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    if let Some(index) = state.vector().iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        return Err(SimError::Incoherence {
            message: format!("amplitude {} is not finite", index),
        });
    }
    check_normalization(state, tolerance)
}

/// Decides whether `gate` can act on an `num_qubits` register.
///
/// Returns the reason it cannot: the first qubit index outside the register,
/// or a qubit named twice within the gate.
pub fn check_gate(gate: &Gate, num_qubits: usize) -> std::result::Result<(), WarningKind> {
    let qubits = gate.qubits();
    if let Some(&qubit) = qubits.iter().find(|&&q| q >= num_qubits) {
        return Err(WarningKind::QubitOutOfRange { qubit, num_qubits });
    }
    for (i, qubit) in qubits.iter().enumerate() {
        if qubits[..i].contains(qubit) {
            return Err(WarningKind::RepeatedQubit { qubit: *qubit });
        }
    }
    Ok(())
}

/// Marks the qubits of `gate` as used within the current step and returns the
/// first one some earlier gate of the step already touched.
pub fn first_shared_qubit(used: &mut HashSet<usize>, gate: &Gate) -> Option<usize> {
    let mut shared = None;
    for qubit in gate.qubits() {
        if !used.insert(qubit) && shared.is_none() {
            shared = Some(qubit);
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_normalization() -> Result<()> {
        let state = StateVector::zero_state(2)?;
        assert!(check_normalization(&state, None).is_ok());

        let half = StateVector::from_amplitudes(vec![Complex::new(0.5, 0.0), Complex::new(0.5, 0.0)])?;
        assert!(matches!(check_normalization(&half, None), Err(SimError::Incoherence { .. })));
        assert!(check_normalization(&half, Some(0.6)).is_ok());
        Ok(())
    }

    #[test]
    fn test_validate_state_rejects_non_finite() -> Result<()> {
        let state = StateVector::from_amplitudes(vec![Complex::new(f64::INFINITY, 0.0), Complex::new(0.0, 0.0)])?;
        assert!(matches!(validate_state(&state, None), Err(SimError::Incoherence { .. })));
        assert!(validate_state(&StateVector::zero_state(1)?, None).is_ok());
        Ok(())
    }

    #[test]
    fn test_check_gate() {
        assert_eq!(check_gate(&Gate::H { target: 1 }, 2), Ok(()));
        assert_eq!(
            check_gate(&Gate::H { target: 2 }, 2),
            Err(WarningKind::QubitOutOfRange { qubit: 2, num_qubits: 2 })
        );
        assert_eq!(
            check_gate(&Gate::Cnot { control: 0, target: 0 }, 2),
            Err(WarningKind::RepeatedQubit { qubit: 0 })
        );
        assert_eq!(
            check_gate(&Gate::Ccnot { control1: 0, control2: 2, target: 0 }, 3),
            Err(WarningKind::RepeatedQubit { qubit: 0 })
        );
        assert_eq!(
            check_gate(&Gate::Ccnot { control1: 0, control2: 5, target: 0 }, 3),
            Err(WarningKind::QubitOutOfRange { qubit: 5, num_qubits: 3 })
        );
    }

    #[test]
    fn test_first_shared_qubit() {
        let mut used = HashSet::new();
        assert_eq!(first_shared_qubit(&mut used, &Gate::H { target: 0 }), None);
        assert_eq!(first_shared_qubit(&mut used, &Gate::X { target: 1 }), None);
        assert_eq!(first_shared_qubit(&mut used, &Gate::Cnot { control: 2, target: 1 }), Some(1));
        assert!(used.contains(&2));
    }
}
