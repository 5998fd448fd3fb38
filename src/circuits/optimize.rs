// src/circuits/optimize.rs

//! Peephole cancellation of self-inverse gate pairs.
//!
//! H, X, Y, Z, CNOT and CCNOT are their own inverses. Two identical copies of
//! one of them cancel when no gate in between touches any of their qubits.
//! Removing a pair can make an outer pair adjacent, so `H X X H` on one qubit
//! disappears completely.

use super::Circuit;
use crate::operations::Gate;
use std::collections::{HashMap, HashSet};

/// The outcome of [`Circuit::optimized`].
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    pub circuit: Circuit,
    pub original_gates: usize,
    pub optimized_gates: usize,
    /// One line per cancelled pair.
    pub suggestions: Vec<String>,
}

impl Optimization {
    /// Number of gates removed.
    pub fn savings(&self) -> usize {
        self.original_gates - self.optimized_gates
    }
}

impl Circuit {
    /// Returns an equivalent circuit with cancelling gate pairs removed.
    ///
    /// Steps that lose all their gates are dropped; steps that were empty to
    /// begin with are kept. Rotations are never touched.
    pub fn optimized(&self) -> Optimization {
        let flat: Vec<(usize, usize, Gate)> = self.gates().map(|(s, p, g)| (s, p, *g)).collect();
        let mut removed = vec![false; flat.len()];
        // live[q]: indices of the kept gates on qubit q, latest last
        let mut live: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut suggestions = Vec::new();

        for (index, &(step, position, gate)) in flat.iter().enumerate() {
            let qubits = gate.qubits();
            let distinct = qubits.iter().collect::<HashSet<_>>().len() == qubits.len();
            let latest = |q: &usize| live.get(q).and_then(|stack| stack.last()).copied();

            let partner = qubits
                .first()
                .and_then(latest)
                .filter(|_| gate.kind().is_self_inverse() && distinct)
                .filter(|&prev| flat[prev].2 == gate)
                .filter(|&prev| qubits.iter().all(|q| latest(q) == Some(prev)));

            match partner {
                Some(prev) => {
                    removed[prev] = true;
                    removed[index] = true;
                    for q in &qubits {
                        if let Some(stack) = live.get_mut(q) {
                            stack.pop();
                        }
                    }
                    let (prev_step, prev_position, _) = flat[prev];
                    tracing::debug!(%gate, prev_step, step, "cancelling gate pair");
                    suggestions.push(format!(
                        "Removed {} pair at step {} position {} and step {} position {}",
                        gate, prev_step, prev_position, step, position
                    ));
                }
                None => {
                    for q in qubits {
                        live.entry(q).or_default().push(index);
                    }
                }
            }
        }

        let mut circuit = Circuit::new();
        let mut index = 0;
        for step in self.steps() {
            let kept: Vec<Gate> = step
                .iter()
                .filter(|_| {
                    let keep = !removed[index];
                    index += 1;
                    keep
                })
                .copied()
                .collect();
            if kept.is_empty() && !step.is_empty() {
                continue;
            }
            circuit.add_step(kept);
        }

        Optimization {
            original_gates: self.gate_count(),
            optimized_gates: circuit.gate_count(),
            circuit,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::Result;
    use crate::simulation::run_circuit;

    #[test]
    fn test_adjacent_pair_cancels() {
        let circuit = CircuitBuilder::new()
            .gate(Gate::H { target: 0 })
            .gate(Gate::H { target: 0 })
            .build();
        let opt = circuit.optimized();
        assert!(opt.circuit.is_empty());
        assert_eq!(opt.circuit.num_steps(), 0);
        assert_eq!(opt.savings(), 2);
        assert_eq!(opt.suggestions.len(), 1);
        assert!(opt.suggestions[0].contains("H[0]"));
    }

    #[test]
    fn test_cancellation_cascades_outward() {
        let circuit = CircuitBuilder::new()
            .gate(Gate::H { target: 0 })
            .gate(Gate::X { target: 0 })
            .gate(Gate::X { target: 0 })
            .gate(Gate::H { target: 0 })
            .build();
        let opt = circuit.optimized();
        assert_eq!(opt.optimized_gates, 0);
        assert_eq!(opt.suggestions.len(), 2);
    }

    #[test]
    fn test_intervening_gate_blocks_cancellation() {
        let blocked = CircuitBuilder::new()
            .gate(Gate::Cnot { control: 0, target: 1 })
            .gate(Gate::X { target: 1 })
            .gate(Gate::Cnot { control: 0, target: 1 })
            .build();
        let opt = blocked.optimized();
        assert_eq!(opt.savings(), 0);
        assert_eq!(opt.circuit, blocked);

        // a gate on an unrelated qubit does not block
        let unrelated = CircuitBuilder::new()
            .gate(Gate::Cnot { control: 0, target: 1 })
            .gate(Gate::H { target: 2 })
            .gate(Gate::Cnot { control: 0, target: 1 })
            .build();
        let opt = unrelated.optimized();
        assert_eq!(opt.savings(), 2);
        assert_eq!(opt.circuit.steps(), &[vec![Gate::H { target: 2 }]]);
    }

    #[test]
    fn test_rotations_and_swapped_controls_are_kept() {
        let circuit = CircuitBuilder::new()
            .gate(Gate::Rx { target: 0, theta: 0.3 })
            .gate(Gate::Rx { target: 0, theta: 0.3 })
            .gate(Gate::Cnot { control: 0, target: 1 })
            .gate(Gate::Cnot { control: 1, target: 0 })
            .build();
        assert_eq!(circuit.optimized().savings(), 0);
    }

    #[test]
    fn test_empty_steps_survive_and_emptied_steps_go() {
        let circuit = CircuitBuilder::new()
            .step(Vec::new())
            .step([Gate::Z { target: 0 }, Gate::Y { target: 1 }])
            .gate(Gate::Z { target: 0 })
            .build();
        let opt = circuit.optimized();
        assert_eq!(opt.circuit.steps(), &[Vec::new(), vec![Gate::Y { target: 1 }]]);
    }

    #[test]
    fn test_optimized_circuit_reaches_same_state() -> Result<()> {
        let circuit = CircuitBuilder::new()
            .step([Gate::H { target: 0 }, Gate::Ry { target: 1, theta: 0.4 }])
            .gate(Gate::Cnot { control: 0, target: 1 })
            .step([Gate::Cnot { control: 0, target: 1 }, Gate::Z { target: 2 }])
            .gate(Gate::Z { target: 2 })
            .gate(Gate::Rx { target: 0, theta: 0.2 })
            .step([Gate::Y { target: 1 }, Gate::Ccnot { control1: 0, control2: 1, target: 2 }])
            .gate(Gate::Y { target: 1 })
            .build();
        let opt = circuit.optimized();
        assert_eq!(opt.original_gates, 10);
        assert_eq!(opt.optimized_gates, 6);
        assert_eq!(opt.savings(), 4);

        let before = run_circuit(&circuit, 3)?;
        let after = run_circuit(&opt.circuit, 3)?;
        for (a, b) in before.state().vector().iter().zip(after.state().vector()) {
            assert!((a - b).norm() < 1e-12, "{} != {}", a, b);
        }
        Ok(())
    }
}
