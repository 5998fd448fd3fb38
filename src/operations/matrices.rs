// src/operations/matrices.rs

//! Canonical unitary matrices for the supported gates.
//!
//! Fixed gates are `const` values shared read-only by every run; rotation
//! gates are generated per angle. Conventions:
//! - Pauli-Y is `[[0, -i], [i, 0]]`.
//! - `RX(θ) = [[cos θ/2, -i sin θ/2], [-i sin θ/2, cos θ/2]]`.
//! - `RY(θ) = [[cos θ/2, -sin θ/2], [sin θ/2, cos θ/2]]` (real).
//! - `RZ(θ) = diag(e^{-iθ/2}, e^{iθ/2})`.
//! - `CNOT` uses the basis order `|control, target>`: `|00>, |01>, |10>, |11>`.

use super::Gate;
use crate::core::Amplitude;
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

/// A single-qubit operator.
pub type Matrix2 = [[Amplitude; 2]; 2];
/// A two-qubit operator in `|first, second>` basis order.
pub type Matrix4 = [[Amplitude; 4]; 4];

const ZERO: Amplitude = Complex::new(0.0, 0.0);
const ONE: Amplitude = Complex::new(1.0, 0.0);
const I: Amplitude = Complex::new(0.0, 1.0);
const NEG_I: Amplitude = Complex::new(0.0, -1.0);

pub const IDENTITY: Matrix2 = [
    [ONE, ZERO],
    [ZERO, ONE],
];

pub const HADAMARD: Matrix2 = [
    [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
    [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
];

pub const PAULI_X: Matrix2 = [
    [ZERO, ONE],
    [ONE, ZERO],
];

pub const PAULI_Y: Matrix2 = [
    [ZERO, NEG_I],
    [I, ZERO],
];

pub const PAULI_Z: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex::new(-1.0, 0.0)],
];

pub const CNOT: Matrix4 = [
    // Control |0> block: identity on target
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    // Control |1> block: X on target
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

pub fn rx(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos, 0.0), Complex::new(0.0, -sin)],
        [Complex::new(0.0, -sin), Complex::new(cos, 0.0)],
    ]
}

pub fn ry(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos, 0.0), Complex::new(-sin, 0.0)],
        [Complex::new(sin, 0.0), Complex::new(cos, 0.0)],
    ]
}

pub fn rz(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos, -sin), ZERO], // e^(-iθ/2)
        [ZERO, Complex::new(cos, sin)],  // e^(iθ/2)
    ]
}

/// The 2x2 matrix of a single-qubit gate, `None` for multi-qubit variants.
pub fn matrix_for(gate: &Gate) -> Option<Matrix2> {
    match gate {
        Gate::H { .. } => Some(HADAMARD),
        Gate::X { .. } => Some(PAULI_X),
        Gate::Y { .. } => Some(PAULI_Y),
        Gate::Z { .. } => Some(PAULI_Z),
        Gate::Rx { theta, .. } => Some(rx(*theta)),
        Gate::Ry { theta, .. } => Some(ry(*theta)),
        Gate::Rz { theta, .. } => Some(rz(*theta)),
        Gate::Cnot { .. } | Gate::Ccnot { .. } => None,
    }
}
