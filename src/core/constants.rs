//! Numeric constants shared across the simulator.

/// Defaults used when the caller does not configure the simulator.
pub mod sim_constants {
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
    /// Angle substituted for a rotation gate that arrives without one.
    pub const DEFAULT_ROTATION_ANGLE: f64 = std::f64::consts::FRAC_PI_2;
    /// Probabilities at or below this value are treated as numerical noise.
    pub const PROBABILITY_THRESHOLD: f64 = 1e-3;
    /// Allowed deviation of `sum |a_i|^2` from 1.
    pub const NORM_TOLERANCE: f64 = 1e-6;
    /// Largest register the dense Kronecker kernels accept by default.
    pub const MAX_QUBITS: usize = 10;
    /// Upper bound for a configured `max_qubits`. A 12-qubit operator holds
    /// `4^12` amplitudes, 256 MiB.
    pub const DENSE_QUBIT_LIMIT: usize = 12;
}
