// src/simulation/controlled.rs

//! Multi-controlled NOT by direct amplitude permutation.
//!
//! A controlled flip never mixes amplitudes, it only swaps pairs of them, so it
//! runs in `O(2^N)` on the state in place without building an operator.

use crate::core::complex::Amplitude;
use crate::core::state::{dimension, qubit_mask};
use crate::core::{Result, SimError};

/// Flips `target` on every basis state where all `controls` are 1.
///
/// For each index `i` with every control bit set, the amplitude at `i` is
/// exchanged with the one at `i ^ target_bit`. Each pair is visited once.
pub fn apply_controlled_flip(
    state: &mut [Amplitude],
    controls: &[usize],
    target: usize,
    num_qubits: usize,
) -> Result<()> {
    if num_qubits == 0 {
        return Err(SimError::InvalidQubitCount { num_qubits });
    }
    let dim = dimension(num_qubits)?;
    if state.len() != dim {
        return Err(SimError::DimensionMismatch { expected: dim, actual: state.len() });
    }
    for &qubit in controls.iter().chain(std::iter::once(&target)) {
        if qubit >= num_qubits {
            return Err(SimError::QubitOutOfRange { qubit, num_qubits });
        }
    }
    if let Some(&qubit) = controls.iter().find(|&&c| c == target) {
        return Err(SimError::InvalidOperation {
            message: format!("qubit {} is both control and target", qubit),
        });
    }

    let control_mask = controls.iter().fold(0usize, |mask, &c| mask | qubit_mask(c, num_qubits));
    let target_mask = qubit_mask(target, num_qubits);

    for i in 0..dim {
        if i & control_mask != control_mask {
            continue;
        }
        let j = i ^ target_mask;
        if i < j {
            state.swap(i, j);
        }
    }
    Ok(())
}

pub fn apply_cnot(state: &mut [Amplitude], control: usize, target: usize, num_qubits: usize) -> Result<()> {
    apply_controlled_flip(state, &[control], target, num_qubits)
}

/// Toffoli: flips `target` when both controls are 1.
pub fn apply_ccnot(
    state: &mut [Amplitude],
    control1: usize,
    control2: usize,
    target: usize,
    num_qubits: usize,
) -> Result<()> {
    if control1 == control2 {
        return Err(SimError::InvalidOperation {
            message: format!("CCNOT controls must differ, got {} twice", control1),
        });
    }
    apply_controlled_flip(state, &[control1, control2], target, num_qubits)
}
