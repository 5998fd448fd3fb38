// src/core/state.rs

use super::complex::{self, Amplitude};
use super::error::{Result, SimError};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// The amplitude vector of an `N`-qubit register.
///
/// Index `i` is the computational basis state whose `N`-bit binary expansion is
/// `i`, with qubit 0 as the most-significant bit: qubit `q` is read from bit
/// position `N - 1 - q`. The length is always exactly `2^N`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Amplitude>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the all-zero basis state `|0...0>`.
    pub fn zero_state(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(SimError::InvalidQubitCount { num_qubits });
        }
        let dim = dimension(num_qubits)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();
        Ok(Self { amplitudes, num_qubits })
    }

    /// Creates a computational basis state `|index>`.
    pub fn basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        let mut state = Self::zero_state(num_qubits)?;
        if index >= state.dim() {
            return Err(SimError::DimensionMismatch {
                expected: state.dim(),
                actual: index.saturating_add(1),
            });
        }
        state.amplitudes[0] = Complex::zero();
        state.amplitudes[index] = Complex::one();
        Ok(state)
    }

    /// Wraps an existing amplitude vector. Its length must be a power of two
    /// greater than one.
    pub fn from_amplitudes(amplitudes: Vec<Amplitude>) -> Result<Self> {
        let dim = amplitudes.len();
        if dim < 2 || !dim.is_power_of_two() {
            return Err(SimError::DimensionMismatch {
                expected: dim.next_power_of_two().max(2),
                actual: dim,
            });
        }
        let num_qubits = dim.trailing_zeros() as usize;
        Ok(Self { amplitudes, num_qubits })
    }

    /// Builds a state from wire `[re, im]` pairs.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self> {
        let amplitudes = pairs
            .iter()
            .map(|pair| complex::from_pair(pair))
            .collect::<Result<Vec<_>>>()?;
        Self::from_amplitudes(amplitudes)
    }

    /// Swaps in the output of a kernel. The dimension never changes during a run.
    pub(crate) fn replace(&mut self, amplitudes: Vec<Amplitude>) -> Result<()> {
        if amplitudes.len() != self.amplitudes.len() {
            return Err(SimError::DimensionMismatch {
                expected: self.amplitudes.len(),
                actual: amplitudes.len(),
            });
        }
        self.amplitudes = amplitudes;
        Ok(())
    }

    /// Provides read-only access to the amplitudes.
    pub fn vector(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    /// Provides mutable access for the in-place kernels.
    pub(crate) fn vector_mut(&mut self) -> &mut [Amplitude] {
        &mut self.amplitudes
    }

    /// Number of basis states, `2^N`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Register size `N`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitude of basis state `index`, if it exists.
    pub fn amplitude(&self, index: usize) -> Option<Amplitude> {
        self.amplitudes.get(index).copied()
    }

    /// `|amplitude|²` of basis state `index`; zero for indices outside the register.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitude(index).map(|a| a.norm_sqr()).unwrap_or(0.0)
    }

    /// Sum of squared magnitudes. Equals 1 for any state produced by unitary gates.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// The wire form: one `[re, im]` pair per basis state.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.amplitudes.iter().map(|c| complex::to_pair(*c)).collect()
    }

    /// Binary label of basis state `index`, padded to `N` digits (`"01"` for 1 on two qubits).
    pub fn basis_label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }
}

/// Mask selecting `qubit` in a basis index: bit `num_qubits - 1 - qubit`.
/// Callers must have checked `qubit < num_qubits`.
pub(crate) fn qubit_mask(qubit: usize, num_qubits: usize) -> usize {
    1 << (num_qubits - 1 - qubit)
}

/// `2^num_qubits`, refusing sizes that overflow `usize`.
pub(crate) fn dimension(num_qubits: usize) -> Result<usize> {
    u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .ok_or_else(|| SimError::InvalidOperation {
            message: format!("{} qubits overflow the state vector dimension", num_qubits),
        })
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
