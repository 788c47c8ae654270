// src/gate.rs
//! Gate vocabulary convertible to matrix operators.
//!
//! Every variant has a dense matrix representation; operations without one
//! (measurement, reset) live at the circuit level instead, where conversion
//! to an operator fails.
//!
//! Two-qubit gates follow the crate-wide subsystem ordering: the gate's
//! subsystem 0 (the control for the controlled gates) is the fastest index
//! of the matrix.

use std::fmt;

use ndarray::{array, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::math;

/// Common complex constants used in gate matrices.
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i.
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = 0.7071067811865475;

    /// Complex zero.
    pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

    /// Complex one.
    pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
}

use constants::{FRAC_1_SQRT_2, I, ONE, ZERO};

/// Fixed and rotation gates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Single-qubit identity
    I,
    /// Pauli-X (NOT)
    X,
    /// Pauli-Y
    Y,
    /// Pauli-Z
    Z,
    /// Hadamard
    H,
    /// Phase gate (S)
    S,
    /// Inverse phase gate
    Sdg,
    /// π/8 gate (T)
    T,
    /// Inverse π/8 gate
    Tdg,
    /// Controlled-X; subsystem 0 is the control
    Cx,
    /// Controlled-Y; subsystem 0 is the control
    Cy,
    /// Controlled-Z
    Cz,
    /// SWAP
    Swap,
    /// Rotation around the X axis
    Rx(f64),
    /// Rotation around the Y axis
    Ry(f64),
    /// Rotation around the Z axis
    Rz(f64),
    /// Phase rotation diag(1, e^{iθ})
    Phase(f64),
}

impl Gate {
    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::I
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::Sdg
            | Gate::T
            | Gate::Tdg
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_)
            | Gate::Phase(_) => 1,
            Gate::Cx | Gate::Cy | Gate::Cz | Gate::Swap => 2,
        }
    }

    /// Dense matrix representation.
    pub fn matrix(&self) -> Array2<Complex64> {
        match self {
            Gate::I => math::eye(2),
            Gate::X => array![[ZERO, ONE], [ONE, ZERO]],
            Gate::Y => array![[ZERO, -I], [I, ZERO]],
            Gate::Z => array![[ONE, ZERO], [ZERO, -ONE]],
            Gate::H => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![[factor, factor], [factor, -factor]]
            }
            Gate::S => array![[ONE, ZERO], [ZERO, I]],
            Gate::Sdg => array![[ONE, ZERO], [ZERO, -I]],
            Gate::T => array![[ONE, ZERO], [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]],
            Gate::Tdg => array![
                [ONE, ZERO],
                [ZERO, Complex64::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)]
            ],
            // Basis index is control + 2*target, so the X on the target
            // connects indices 1 and 3.
            Gate::Cx => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO]
            ],
            Gate::Cy => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ZERO, -I],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, I, ZERO, ZERO]
            ],
            Gate::Cz => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ZERO, ZERO, -ONE]
            ],
            Gate::Swap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE]
            ],
            Gate::Rx(theta) => {
                let cos = Complex64::new((theta / 2.0).cos(), 0.0);
                let isin = Complex64::new(0.0, -(theta / 2.0).sin());
                array![[cos, isin], [isin, cos]]
            }
            Gate::Ry(theta) => {
                let cos = Complex64::new((theta / 2.0).cos(), 0.0);
                let sin = Complex64::new((theta / 2.0).sin(), 0.0);
                array![[cos, -sin], [sin, cos]]
            }
            Gate::Rz(theta) => {
                let phase_pos = Complex64::new(0.0, theta / 2.0).exp();
                let phase_neg = Complex64::new(0.0, -theta / 2.0).exp();
                array![[phase_neg, ZERO], [ZERO, phase_pos]]
            }
            Gate::Phase(theta) => {
                array![[ONE, ZERO], [ZERO, Complex64::new(theta.cos(), theta.sin())]]
            }
        }
    }

    /// The Hermitian conjugate of the gate, as a gate.
    pub fn adjoint(&self) -> Gate {
        match self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            Gate::T => Gate::Tdg,
            Gate::Tdg => Gate::T,
            Gate::Rx(theta) => Gate::Rx(-theta),
            Gate::Ry(theta) => Gate::Ry(-theta),
            Gate::Rz(theta) => Gate::Rz(-theta),
            Gate::Phase(theta) => Gate::Phase(-theta),
            // The remaining gates are Hermitian.
            other => *other,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::I => write!(f, "I"),
            Gate::X => write!(f, "X"),
            Gate::Y => write!(f, "Y"),
            Gate::Z => write!(f, "Z"),
            Gate::H => write!(f, "H"),
            Gate::S => write!(f, "S"),
            Gate::Sdg => write!(f, "Sdg"),
            Gate::T => write!(f, "T"),
            Gate::Tdg => write!(f, "Tdg"),
            Gate::Cx => write!(f, "Cx"),
            Gate::Cy => write!(f, "Cy"),
            Gate::Cz => write!(f, "Cz"),
            Gate::Swap => write!(f, "Swap"),
            Gate::Rx(theta) => write!(f, "Rx({:.4})", theta),
            Gate::Ry(theta) => write!(f, "Ry({:.4})", theta),
            Gate::Rz(theta) => write!(f, "Rz({:.4})", theta),
            Gate::Phase(theta) => write!(f, "Phase({:.4})", theta),
        }
    }
}
