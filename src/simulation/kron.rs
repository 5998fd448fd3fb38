// src/simulation/kron.rs

//! Dense operator construction by Kronecker products.
//!
//! A gate acting on some qubits of an `N`-qubit register is expanded into the
//! full `2^N x 2^N` operator by chaining Kronecker products over the qubits,
//! left-most factor first. The left-most factor is qubit 0, which matches the
//! register convention that qubit 0 is the most-significant bit of a basis
//! index.
//!
//! Scaling limit: building and applying an operator costs `O(4^N)` time and
//! memory. The simulator caps `N` through `SimulatorConfig::max_qubits`
//! (10 by default, a 1024 x 1024 operator), which may not be raised past
//! `DENSE_QUBIT_LIMIT`.

use crate::core::complex::{self, Amplitude};
use crate::core::state::dimension;
use crate::core::{Result, SimError};
use crate::operations::matrices::{IDENTITY, Matrix2, Matrix4};
use num_complex::Complex;
use num_traits::{One, Zero};

/// A dense square complex matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    dim: usize,
    entries: Vec<Amplitude>,
}

impl Operator {
    pub fn identity(dim: usize) -> Result<Self> {
        let mut op = Self::zeros(dim)?;
        for i in 0..dim {
            op.entries[i * dim + i] = Complex::one();
        }
        Ok(op)
    }

    /// The `dim x dim` zero matrix. Fails when `dim²` entries overflow `usize`.
    pub fn zeros(dim: usize) -> Result<Self> {
        let len = dim.checked_mul(dim).ok_or_else(|| SimError::InvalidOperation {
            message: format!("a {0} x {0} operator does not fit in memory", dim),
        })?;
        Ok(Self { dim, entries: vec![Complex::zero(); len] })
    }

    pub fn from_2x2(matrix: &Matrix2) -> Self {
        Self { dim: 2, entries: matrix.iter().flatten().copied().collect() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> Amplitude {
        self.entries[row * self.dim + col]
    }

    /// Kronecker product `self ⊗ other`; `self` supplies the high-order index bits.
    pub fn kron(&self, other: &Operator) -> Result<Operator> {
        let dim = self.dim.checked_mul(other.dim).ok_or_else(|| SimError::InvalidOperation {
            message: format!("kronecker product of {} and {} overflows", self.dim, other.dim),
        })?;
        let mut result = Operator::zeros(dim)?;
        for i in 0..self.dim {
            for k in 0..self.dim {
                let a = self.get(i, k);
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.dim {
                    let row = i * other.dim + j;
                    for l in 0..other.dim {
                        let col = k * other.dim + l;
                        result.entries[row * dim + col] = complex::multiply(a, other.get(j, l))?;
                    }
                }
            }
        }
        Ok(result)
    }

    /// Element-wise sum of two operators of equal dimension.
    pub fn add(&self, other: &Operator) -> Result<Operator> {
        if self.dim != other.dim {
            return Err(SimError::DimensionMismatch { expected: self.dim, actual: other.dim });
        }
        let entries = self
            .entries
            .iter()
            .zip(&other.entries)
            .map(|(a, b)| complex::add(*a, *b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Operator { dim: self.dim, entries })
    }

    /// Matrix-vector product `self · state`.
    pub fn apply(&self, state: &[Amplitude]) -> Result<Vec<Amplitude>> {
        if state.len() != self.dim {
            return Err(SimError::DimensionMismatch { expected: self.dim, actual: state.len() });
        }
        let mut out = Vec::with_capacity(self.dim);
        for row in 0..self.dim {
            let mut sum = Complex::zero();
            for (col, amplitude) in state.iter().enumerate() {
                sum = complex::add(sum, complex::multiply(self.get(row, col), *amplitude)?)?;
            }
            out.push(sum);
        }
        Ok(out)
    }
}

/// Checks the register size against the state length and every qubit index.
fn check_register(state_len: usize, qubits: &[usize], num_qubits: usize) -> Result<()> {
    if num_qubits == 0 {
        return Err(SimError::InvalidQubitCount { num_qubits });
    }
    let dim = dimension(num_qubits)?;
    if state_len != dim {
        return Err(SimError::DimensionMismatch { expected: dim, actual: state_len });
    }
    if let Some(&qubit) = qubits.iter().find(|&&q| q >= num_qubits) {
        return Err(SimError::QubitOutOfRange { qubit, num_qubits });
    }
    Ok(())
}

/// `I ⊗ ... ⊗ gate ⊗ ... ⊗ I` with `gate` in the slot of `target`.
pub fn single_qubit_operator(gate: &Matrix2, target: usize, num_qubits: usize) -> Result<Operator> {
    if target >= num_qubits {
        return Err(SimError::QubitOutOfRange { qubit: target, num_qubits });
    }
    let gate_op = Operator::from_2x2(gate);
    let identity = Operator::from_2x2(&IDENTITY);

    let mut full = Operator::identity(1)?;
    for qubit in 0..num_qubits {
        let factor = if qubit == target { &gate_op } else { &identity };
        full = full.kron(factor)?;
    }
    Ok(full)
}

/// Full operator for a 4x4 gate whose basis order is `|first, second>`.
///
/// The gate is split into its 2x2 blocks `B_ac = <a|_first G |c>_first` and
/// expanded as `Σ_ac (|a><c| at first) ⊗ (B_ac at second) ⊗ (I elsewhere)`.
/// Each term is a plain Kronecker chain walked in register order, so the
/// result is right whether the two qubits are adjacent or not and whichever
/// of them is more significant.
pub fn two_qubit_operator(gate: &Matrix4, first: usize, second: usize, num_qubits: usize) -> Result<Operator> {
    for qubit in [first, second] {
        if qubit >= num_qubits {
            return Err(SimError::QubitOutOfRange { qubit, num_qubits });
        }
    }
    if first == second {
        return Err(SimError::InvalidOperation {
            message: format!("two-qubit gate needs distinct qubits, got {} twice", first),
        });
    }

    let identity = Operator::from_2x2(&IDENTITY);
    let mut total: Option<Operator> = None;

    for a in 0..2 {
        for c in 0..2 {
            let block: Matrix2 = [
                [gate[2 * a][2 * c], gate[2 * a][2 * c + 1]],
                [gate[2 * a + 1][2 * c], gate[2 * a + 1][2 * c + 1]],
            ];
            if block.iter().flatten().all(|z| z.is_zero()) {
                continue;
            }
            let mut projector = [[Complex::zero(); 2]; 2];
            projector[a][c] = Complex::one();
            let projector = Operator::from_2x2(&projector);
            let block = Operator::from_2x2(&block);

            let mut term = Operator::identity(1)?;
            for qubit in 0..num_qubits {
                let factor = if qubit == first {
                    &projector
                } else if qubit == second {
                    &block
                } else {
                    &identity
                };
                term = term.kron(factor)?;
            }
            total = Some(match total {
                Some(acc) => acc.add(&term)?,
                None => term,
            });
        }
    }

    match total {
        Some(op) => Ok(op),
        None => Operator::zeros(dimension(num_qubits)?),
    }
}

/// Applies a 2x2 gate to `target` and returns the new state vector.
pub fn apply_single_qubit_gate(
    state: &[Amplitude],
    gate: &Matrix2,
    target: usize,
    num_qubits: usize,
) -> Result<Vec<Amplitude>> {
    check_register(state.len(), &[target], num_qubits)?;
    single_qubit_operator(gate, target, num_qubits)?.apply(state)
}

/// Applies a 4x4 gate in `|control, target>` basis order and returns the new state vector.
pub fn apply_two_qubit_gate(
    state: &[Amplitude],
    gate: &Matrix4,
    control: usize,
    target: usize,
    num_qubits: usize,
) -> Result<Vec<Amplitude>> {
    check_register(state.len(), &[control, target], num_qubits)?;
    two_qubit_operator(gate, control, target, num_qubits)?.apply(state)
}
