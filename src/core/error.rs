//! Error handling logic

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that abort a simulation or a direct kernel call.
///
/// Per-gate authoring mistakes inside a circuit run are *not* errors; they are
/// reported as [`crate::Warning`]s on the result and the gate is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// The register size is not usable (zero qubits).
    #[error("Invalid qubit count: {num_qubits} (must be at least 1)")]
    InvalidQubitCount {
        /// Requested register size
        num_qubits: usize,
    },

    /// The register is larger than the dense-operator kernels are configured for.
    #[error("Qubit limit exceeded: {num_qubits} qubits requested, limit is {max}")]
    QubitLimitExceeded {
        /// Requested register size
        num_qubits: usize,
        /// Configured maximum
        max: usize,
    },

    /// A qubit index handed directly to a kernel lies outside the register.
    #[error("Qubit index {qubit} out of range for {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// Offending index
        qubit: usize,
        /// Register size
        num_qubits: usize,
    },

    /// A state vector or operator does not have the expected dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Complex operands that are not finite numbers.
    #[error("Arithmetic input error: {message}")]
    ArithmeticInput {
        /// ArithmeticInput failure message
        message: String,
    },

    /// The circuit document itself is unusable (not a nested sequence of gates).
    #[error("Malformed circuit: {message}")]
    MalformedCircuit {
        /// MalformedCircuit failure message
        message: String,
    },

    /// An operation that is inconsistent with the register, e.g. control == target.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// The state vector lost its unit norm while norm validation was enabled.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Config failure message
        message: String,
    },
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::MalformedCircuit { message: err.to_string() }
    }
}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::Config { message: err.to_string() }
    }
}
