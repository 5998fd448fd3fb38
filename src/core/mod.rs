// src/core/mod.rs

//! Core data structures and types

pub mod complex;
pub mod error;
pub mod state;

pub use complex::Amplitude;
pub use error::{Result, SimError};
pub use state::StateVector;

pub mod constants;
pub use constants::sim_constants::{
    DEFAULT_ROTATION_ANGLE, DENSE_QUBIT_LIMIT, MAX_QUBITS, NORM_TOLERANCE, PI, PROBABILITY_THRESHOLD,
};
