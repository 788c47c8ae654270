// src/dims.rs
//! Subsystem dimension factorizations.
//!
//! A total extent factors into an ordered list of per-subsystem dimensions.
//! Subsystem 0 is the fastest-varying (lowest) index of the flattened
//! matrix axis, matching the Kronecker convention in [`crate::math::kron`].

use crate::error::{QopError, QopResult};

/// Infer a factoring for a total extent.
///
/// Extents that are exact powers of two (and greater than one) decompose
/// into qubits; anything else is treated as a single subsystem.
pub fn infer_factors(total: usize) -> Vec<usize> {
    if total > 1 && total.is_power_of_two() {
        vec![2; total.trailing_zeros() as usize]
    } else {
        vec![total]
    }
}

/// Product of a factoring.
pub fn total_dim(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Check that `dims` is a valid factoring of an axis of extent `extent`.
pub fn check_factors(dims: &[usize], extent: usize, axis: &str) -> QopResult<()> {
    if dims.is_empty() || dims.contains(&0) {
        return Err(QopError::dims(format!(
            "{} dims must be a non-empty list of positive integers, got {:?}",
            axis, dims
        )));
    }
    let total = total_dim(dims);
    if total != extent {
        return Err(QopError::dims(format!(
            "{} dims {:?} have total {} but the matrix axis has extent {}",
            axis, dims, total, extent
        )));
    }
    Ok(())
}

/// Per-subsystem strides of a factoring; subsystem 0 has stride 1.
pub fn strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(dims.len());
    let mut acc = 1;
    for &d in dims {
        strides.push(acc);
        acc *= d;
    }
    strides
}
