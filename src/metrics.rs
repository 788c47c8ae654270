// src/metrics.rs
//! Fidelity measures between unitary operators.
//!
//! Operator equality is sensitive to global phase; these metrics are not,
//! which is the distinction between physical equivalence and elementwise
//! equality.

use num_complex::Complex64;

use crate::error::{QopError, QopResult};
use crate::math;
use crate::operator::{Operator, DEFAULT_ATOL};

fn check_comparable(a: &Operator, b: &Operator) -> QopResult<()> {
    if a.input_dims() != b.input_dims() || a.output_dims() != b.output_dims() {
        return Err(QopError::dims(format!(
            "cannot compare {} with {}",
            a, b
        )));
    }
    if a.input_dim() != a.output_dim() {
        return Err(QopError::dims(
            "fidelity is defined for square operators".to_string(),
        ));
    }
    for operator in [a, b] {
        if !operator.is_unitary(DEFAULT_ATOL) {
            return Err(QopError::NotUnitary { atol: DEFAULT_ATOL });
        }
    }
    Ok(())
}

/// Process fidelity `|Tr(a† b)|² / d²` between two unitary operators.
///
/// Equals 1 exactly when the operators agree up to a global phase.
pub fn process_fidelity(a: &Operator, b: &Operator) -> QopResult<f64> {
    check_comparable(a, b)?;
    let d = a.input_dim() as f64;
    let product = math::dagger(a.data()).dot(b.data());
    let trace: Complex64 = product.diag().iter().sum();
    Ok((trace.norm() / d).powi(2))
}

/// Average gate fidelity `(d·F + 1) / (d + 1)` where `F` is the process
/// fidelity.
pub fn average_gate_fidelity(a: &Operator, b: &Operator) -> QopResult<f64> {
    let fidelity = process_fidelity(a, b)?;
    let d = a.input_dim() as f64;
    Ok((d * fidelity + 1.0) / (d + 1.0))
}
