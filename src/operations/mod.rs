// src/operations/mod.rs

//! Defines the gate operations the simulator understands.
//!
//! Every variant of [`Gate`] carries exactly the qubit indices and parameters
//! its physics needs, so a CNOT cannot be built without a control and a
//! rotation cannot be built without an angle. The loosely-typed wire form is
//! converted into these variants by [`crate::circuits::wire`].

pub mod matrices;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type tag of a gate, as it appears in the `type` field of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Cnot,
    Ccnot,
}

impl GateKind {
    /// All supported kinds, in wire-name order.
    pub const ALL: [GateKind; 9] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cnot,
        GateKind::Ccnot,
    ];

    /// Number of qubit indices the gate takes.
    pub fn arity(&self) -> usize {
        match self {
            GateKind::Cnot => 2,
            GateKind::Ccnot => 3,
            _ => 1,
        }
    }

    /// Whether the gate takes a rotation angle.
    pub fn is_rotation(&self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }

    /// Whether applying the gate twice on the same qubits is the identity.
    pub fn is_self_inverse(&self) -> bool {
        !self.is_rotation()
    }

    /// Canonical upper-case wire name.
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
            GateKind::Ccnot => "CCNOT",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        GateKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == upper)
            .ok_or_else(|| format!("unknown gate type '{}'", s))
    }
}

/// A single gate application inside a circuit step.
///
/// Qubit indices follow the register convention of [`crate::StateVector`]:
/// qubit 0 is the most-significant bit of a basis index.
#[derive(Debug, Clone, Copy, PartialEq)] // f64 angles rule out Eq
pub enum Gate {
    /// Hadamard.
    H { target: usize },
    /// Pauli-X (bit flip).
    X { target: usize },
    /// Pauli-Y.
    Y { target: usize },
    /// Pauli-Z (phase flip).
    Z { target: usize },
    /// Rotation about the X axis by `theta` radians.
    Rx { target: usize, theta: f64 },
    /// Rotation about the Y axis by `theta` radians.
    Ry { target: usize, theta: f64 },
    /// Rotation about the Z axis by `theta` radians.
    Rz { target: usize, theta: f64 },
    /// Controlled NOT: flips `target` when `control` is |1>.
    Cnot { control: usize, target: usize },
    /// Toffoli: flips `target` when both controls are |1>.
    Ccnot { control1: usize, control2: usize, target: usize },
}

impl Gate {
    /// Builds a gate from its kind, wire-ordered qubit list and angle.
    ///
    /// `qubits` must hold exactly `kind.arity()` entries and rotation kinds
    /// need an angle; anything else returns `None`.
    pub fn from_parts(kind: GateKind, qubits: &[usize], theta: Option<f64>) -> Option<Gate> {
        let gate = match (kind, qubits) {
            (GateKind::H, &[target]) => Gate::H { target },
            (GateKind::X, &[target]) => Gate::X { target },
            (GateKind::Y, &[target]) => Gate::Y { target },
            (GateKind::Z, &[target]) => Gate::Z { target },
            (GateKind::Rx, &[target]) => Gate::Rx { target, theta: theta? },
            (GateKind::Ry, &[target]) => Gate::Ry { target, theta: theta? },
            (GateKind::Rz, &[target]) => Gate::Rz { target, theta: theta? },
            (GateKind::Cnot, &[control, target]) => Gate::Cnot { control, target },
            (GateKind::Ccnot, &[control1, control2, target]) => Gate::Ccnot { control1, control2, target },
            _ => return None,
        };
        Some(gate)
    }

    pub fn kind(&self) -> GateKind {
        match self {
            Gate::H { .. } => GateKind::H,
            Gate::X { .. } => GateKind::X,
            Gate::Y { .. } => GateKind::Y,
            Gate::Z { .. } => GateKind::Z,
            Gate::Rx { .. } => GateKind::Rx,
            Gate::Ry { .. } => GateKind::Ry,
            Gate::Rz { .. } => GateKind::Rz,
            Gate::Cnot { .. } => GateKind::Cnot,
            Gate::Ccnot { .. } => GateKind::Ccnot,
        }
    }

    /// Qubits touched by the gate, in wire order (controls first, target last).
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::H { target }
            | Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::Rx { target, .. }
            | Gate::Ry { target, .. }
            | Gate::Rz { target, .. } => vec![*target],
            Gate::Cnot { control, target } => vec![*control, *target],
            Gate::Ccnot { control1, control2, target } => vec![*control1, *control2, *target],
        }
    }

    /// Rotation angle, if the gate has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            Gate::Rx { theta, .. } | Gate::Ry { theta, .. } | Gate::Rz { theta, .. } => Some(*theta),
            _ => None,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self.qubits().iter().map(|q| q.to_string()).collect();
        match self.angle() {
            Some(theta) => write!(f, "{}({:.4})[{}]", self.kind(), theta, qubits.join(", ")),
            None => write!(f, "{}[{}]", self.kind(), qubits.join(", ")),
        }
    }
}
