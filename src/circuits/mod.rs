// src/circuits/mod.rs

//! Defines structures for representing and building time-ordered sequences of
//! gate applications (`qsim::operations::Gate`).
//!
//! A [`Circuit`] is a list of steps. Gates inside one step are meant to act on
//! disjoint qubits and are applied in the order they are listed.

pub mod optimize;
pub mod templates;
pub mod wire;

use crate::operations::{Gate, GateKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Represents an ordered sequence of time-steps, each a list of gates.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    /// The order is significant: step `k` is applied before step `k + 1`.
    steps: Vec<Vec<Gate>>,
}

/// Coarse size class of a circuit by gate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Complexity {
    /// At most 5 gates.
    #[default]
    Simple,
    /// 6 to 10 gates.
    Intermediate,
    /// 11 to 20 gates.
    Moderate,
    /// More than 20 gates.
    Complex,
}

impl Complexity {
    pub fn from_gate_count(total_gates: usize) -> Self {
        match total_gates {
            n if n > 20 => Complexity::Complex,
            n if n > 10 => Complexity::Moderate,
            n if n > 5 => Complexity::Intermediate,
            _ => Complexity::Simple,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Complexity::Simple => "simple",
            Complexity::Intermediate => "intermediate",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// Summary figures for a circuit, independent of any register size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircuitStats {
    pub total_gates: usize,
    /// Number of steps, including empty ones.
    pub depth: usize,
    /// Number of distinct qubits touched by any gate.
    pub width: usize,
    pub per_kind: BTreeMap<GateKind, usize>,
    /// Grid cells per gate, `width * depth / total_gates`, rounded to two
    /// decimals. Zero for a circuit without gates.
    pub efficiency: f64,
    pub complexity: Complexity,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a time-step. An empty step is kept and counts towards the depth.
    pub fn add_step<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        self.steps.push(gates.into_iter().collect());
    }

    /// Appends a step containing a single gate.
    pub fn add_gate(&mut self, gate: Gate) {
        self.steps.push(vec![gate]);
    }

    pub fn steps(&self) -> &[Vec<Gate>] {
        &self.steps
    }

    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Total number of gates across all steps.
    pub fn gate_count(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no step contains a gate.
    pub fn is_empty(&self) -> bool {
        self.gate_count() == 0
    }

    /// Iterates over `(step, position, gate)`.
    pub fn gates(&self) -> impl Iterator<Item = (usize, usize, &Gate)> + '_ {
        self.steps
            .iter()
            .enumerate()
            .flat_map(|(s, step)| step.iter().enumerate().map(move |(p, g)| (s, p, g)))
    }

    /// Highest qubit index mentioned by any gate.
    pub fn max_qubit(&self) -> Option<usize> {
        self.gates().flat_map(|(_, _, g)| g.qubits()).max()
    }

    /// Distinct qubits mentioned by any gate, in ascending order.
    pub fn touched_qubits(&self) -> BTreeSet<usize> {
        self.gates().flat_map(|(_, _, g)| g.qubits()).collect()
    }

    pub fn stats(&self) -> CircuitStats {
        let mut per_kind = BTreeMap::new();
        for (_, _, gate) in self.gates() {
            *per_kind.entry(gate.kind()).or_insert(0) += 1;
        }
        let total_gates = self.gate_count();
        let depth = self.steps.len();
        let width = self.touched_qubits().len();
        let efficiency = if total_gates == 0 {
            0.0
        } else {
            let cells = width as f64 * depth as f64 / total_gates as f64;
            (cells * 100.0).round() / 100.0
        };
        CircuitStats {
            total_gates,
            depth,
            width,
            per_kind,
            efficiency,
            complexity: Complexity::from_gate_count(total_gates),
        }
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a time-step holding all given gates.
    pub fn step<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_step(gates);
        self
    }

    /// Adds a time-step holding one gate.
    pub fn gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

/// Registers up to this many qubits are drawn with one row per qubit. Wider
/// circuits only get rows for the qubits their gates touch.
const MAX_DENSE_ROWS: usize = 32;

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(max_qubit) = self.max_qubit() else {
            return writeln!(f, "qsim::Circuit[{} steps, 0 gates]", self.steps.len());
        };
        let qubits: Vec<usize> = if max_qubit < MAX_DENSE_ROWS {
            (0..=max_qubit).collect()
        } else {
            self.touched_qubits().into_iter().collect()
        };
        // qubits is sorted and contains every touched qubit
        let row_of = |qubit: usize| qubits.binary_search(&qubit).unwrap_or(0);
        let num_rows = qubits.len();
        let num_cols = self.steps.len();

        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                let post = total - pre;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
            }
        }

        let mut grid = vec![vec![WIRE.to_string(); num_cols]; num_rows];
        // connectors[r][t]: vertical link between row r and r + 1 at column t
        let mut connectors = vec![vec![' '; num_cols]; num_rows];

        for (t, _, gate) in self.gates() {
            let rows: Vec<usize> = gate.qubits().into_iter().map(row_of).collect();
            let Some((&target, controls)) = rows.split_last() else {
                continue;
            };
            for &c in controls {
                grid[c][t] = format_gate("@");
            }
            let symbol = match gate.kind() {
                GateKind::Cnot | GateKind::Ccnot => "X",
                kind => kind.name(),
            };
            grid[target][t] = format_gate(symbol);

            if !controls.is_empty() {
                let lo = rows.iter().copied().min().unwrap_or(target);
                let hi = rows.iter().copied().max().unwrap_or(target);
                for row in connectors.iter_mut().take(hi).skip(lo) {
                    row[t] = V_WIRE;
                }
            }
        }

        writeln!(f, "qsim::Circuit[{} steps, {} gates]", num_cols, self.gate_count())?;
        let label_width = format!("q{}: ", max_qubit).len();
        for (r, qubit) in qubits.iter().enumerate() {
            write!(f, "{:<width$}", format!("q{}: ", qubit), width = label_width)?;
            writeln!(f, "{}", grid[r].join(""))?;
            if r + 1 < num_rows {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_cols {
                    let pre = (GATE_WIDTH - 1) / 2;
                    let post = GATE_WIDTH - 1 - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), connectors[r][t], " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
