// src/random.rs
//! Randomized operator construction.

use std::f64::consts::TAU;

use rand::Rng;

use crate::circuit::Circuit;
use crate::error::QopResult;
use crate::gate::Gate;
use crate::operator::Operator;

/// Build a random unitary on `num_qubits` qubits (at least one) from
/// `depth` layers of uniformly sampled Rz/Ry rotations followed by a chain
/// of Cx entanglers. The result is exactly unitary by construction.
pub fn random_unitary<R: Rng + ?Sized>(
    num_qubits: usize,
    depth: usize,
    rng: &mut R,
) -> QopResult<Operator> {
    let mut circuit = Circuit::new(num_qubits);
    for _ in 0..depth {
        for q in 0..num_qubits {
            circuit.push_gate(Gate::Rz(rng.gen_range(0.0..TAU)), &[q])?;
            circuit.push_gate(Gate::Ry(rng.gen_range(0.0..TAU)), &[q])?;
        }
        for q in 1..num_qubits {
            circuit.push_gate(Gate::Cx, &[q - 1, q])?;
        }
    }
    circuit.to_operator()
}
