// src/convert.rs
//! The matrix-convertible capability.
//!
//! Anything that can produce a dense matrix participates in operator
//! algebra: every combination method on [`Operator`] accepts
//! `&impl ToOperator`, so raw matrices, gates, Pauli labels and circuits
//! convert implicitly. A source that cannot produce a matrix fails with
//! [`QopError::Conversion`](crate::QopError::Conversion) rather than
//! silently proceeding.

use ndarray::Array2;
use num_complex::Complex64;

use crate::circuit::Circuit;
use crate::error::QopResult;
use crate::gate::Gate;
use crate::operator::Operator;
use crate::pauli::PauliString;

/// Capability of producing a dense-matrix operator.
pub trait ToOperator {
    /// Convert the source into an [`Operator`].
    fn to_operator(&self) -> QopResult<Operator>;
}

impl ToOperator for Operator {
    fn to_operator(&self) -> QopResult<Operator> {
        Ok(self.clone())
    }
}

impl ToOperator for Array2<Complex64> {
    fn to_operator(&self) -> QopResult<Operator> {
        Operator::new(self.clone())
    }
}

impl ToOperator for Gate {
    fn to_operator(&self) -> QopResult<Operator> {
        Operator::new(self.matrix())
    }
}

impl ToOperator for PauliString {
    fn to_operator(&self) -> QopResult<Operator> {
        Operator::new(self.to_matrix())
    }
}

impl ToOperator for Circuit {
    fn to_operator(&self) -> QopResult<Operator> {
        Circuit::to_operator(self)
    }
}
