// src/simulation/results.rs
use crate::core::{Result, StateVector};
use crate::operations::GateKind;
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A recoverable problem with one gate of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// The entry could not be read as a gate at all (null, empty, wrong field types,
    /// missing `type` or `targets`).
    MalformedGate { reason: String },
    UnknownGateType { name: String },
    /// Wrong number of qubit indices for the gate type.
    ArityMismatch { kind: GateKind, expected: usize, found: usize },
    NegativeQubit { qubit: i64 },
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    /// A multi-qubit gate names the same qubit twice.
    RepeatedQubit { qubit: usize },
    /// A rotation gate had no angle; `substituted` was used instead. The gate is applied.
    MissingAngle { kind: GateKind, substituted: f64 },
    /// Another gate earlier in the same step already touched `qubit`. The gate is
    /// applied after it.
    SharedQubitInStep { qubit: usize },
}

impl WarningKind {
    /// `true` if the gate was left out of the simulation.
    pub fn skips_gate(&self) -> bool {
        !matches!(self, WarningKind::MissingAngle { .. } | WarningKind::SharedQubitInStep { .. })
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MalformedGate { reason } => write!(f, "malformed gate: {}", reason),
            WarningKind::UnknownGateType { name } => write!(f, "unknown gate type '{}'", name),
            WarningKind::ArityMismatch { kind, expected, found } => {
                write!(f, "{} needs {} target(s), got {}", kind, expected, found)
            }
            WarningKind::NegativeQubit { qubit } => write!(f, "negative qubit index {}", qubit),
            WarningKind::QubitOutOfRange { qubit, num_qubits } => {
                write!(f, "qubit index {} out of range for {} qubit(s)", qubit, num_qubits)
            }
            WarningKind::RepeatedQubit { qubit } => write!(f, "qubit {} used more than once in one gate", qubit),
            WarningKind::MissingAngle { kind, substituted } => {
                write!(f, "{} missing angle, substituted {:.6}", kind, substituted)
            }
            WarningKind::SharedQubitInStep { qubit } => {
                write!(f, "qubit {} already used in this step, applied sequentially", qubit)
            }
        }
    }
}

/// A warning attached to the gate at `position` within `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub step: usize,
    pub position: usize,
    pub kind: WarningKind,
}

impl Warning {
    pub fn new(step: usize, position: usize, kind: WarningKind) -> Self {
        Self { step, position, kind }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} gate {}: {}", self.step, self.position, self.kind)
    }
}

/// Holds the outcome of one circuit run: the final state vector plus everything
/// that went wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    state: StateVector,
    warnings: Vec<Warning>,
    gates_applied: usize,
    gates_skipped: usize,
}

#[derive(Serialize)]
struct ResultDocument<'a> {
    state: Vec<[f64; 2]>,
    warnings: Vec<String>,
    partial: bool,
    gates_applied: usize,
    gates_skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    probabilities: Option<&'a BTreeMap<String, f64>>,
}

impl SimulationResult {
    pub(crate) fn from_run(state: StateVector, warnings: Vec<Warning>, gates_applied: usize) -> Self {
        let gates_skipped = warnings.iter().filter(|w| w.kind.skips_gate()).count();
        Self { state, warnings, gates_applied, gates_skipped }
    }

    /// The final state vector.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn into_state(self) -> StateVector {
        self.state
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn gates_applied(&self) -> usize {
        self.gates_applied
    }

    pub fn gates_skipped(&self) -> usize {
        self.gates_skipped
    }

    /// `true` if at least one gate was skipped, so the state may not be what the
    /// author of the circuit intended.
    pub fn is_partial(&self) -> bool {
        self.gates_skipped > 0
    }

    /// `true` if no gate was applied; the state is still `|0...0>`.
    pub fn is_empty_run(&self) -> bool {
        self.gates_applied == 0
    }

    /// `|a_i|²` for every basis state, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.vector().iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probabilities keyed by binary basis label (`"01"`), keeping only entries
    /// strictly above `threshold` to suppress numerical noise.
    pub fn probability_map(&self, threshold: f64) -> BTreeMap<String, f64> {
        self.state
            .vector()
            .iter()
            .enumerate()
            .filter_map(|(i, a)| {
                let p = a.norm_sqr();
                (p > threshold).then(|| (self.state.basis_label(i), p))
            })
            .collect()
    }

    /// Simulates `shots` measurements of the whole register in the computational
    /// basis and returns a histogram keyed by binary basis label.
    ///
    /// Sampling uses a `StdRng` seeded with `seed`, so equal seeds give equal
    /// histograms for the same state.
    pub fn sample_counts(&self, shots: usize, seed: u64) -> BTreeMap<String, usize> {
        let probabilities = self.probabilities();
        let total: f64 = probabilities.iter().sum();
        let mut counts = BTreeMap::new();
        if shots == 0 || total <= 0.0 {
            return counts;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let last_nonzero = probabilities.iter().rposition(|p| *p > 0.0).unwrap_or(0);
        for _ in 0..shots {
            let sample: f64 = StandardUniform.sample(&mut rng);
            let target = sample * total;
            let mut cumulative = 0.0;
            // Floating-point round-off can leave `target` just above the final sum.
            let mut chosen = last_nonzero;
            for (index, p) in probabilities.iter().enumerate() {
                cumulative += p;
                if target < cumulative {
                    chosen = index;
                    break;
                }
            }
            *counts.entry(self.state.basis_label(chosen)).or_insert(0) += 1;
        }
        counts
    }

    /// JSON document with the wire-form state, warnings and run counters.
    ///
    /// When `probability_threshold` is given, the filtered probability map is
    /// included as well.
    pub fn to_json(&self, probability_threshold: Option<f64>) -> Result<String> {
        let probabilities = probability_threshold.map(|t| self.probability_map(t));
        let doc = ResultDocument {
            state: self.state.to_pairs(),
            warnings: self.warnings.iter().map(|w| w.to_string()).collect(),
            partial: self.is_partial(),
            gates_applied: self.gates_applied,
            gates_skipped: self.gates_skipped,
            probabilities: probabilities.as_ref(),
        };
        Ok(serde_json::to_string(&doc)?)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        writeln!(f, "  {}", self.state)?;
        writeln!(f, "  Gates applied: {}, skipped: {}", self.gates_applied, self.gates_skipped)?;
        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    {}", warning)?;
            }
        }
        Ok(())
    }
}
