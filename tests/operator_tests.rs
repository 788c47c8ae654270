use ndarray::Array2;
use num_complex::Complex64;

use qop::math::{allclose, eye, kron};
use qop::{Gate, Operator, PauliString, QopError, ToOperator, DEFAULT_ATOL};

const ONE: Complex64 = Complex64::new(1.0, 0.0);

#[test]
fn tensor_of_unitaries_is_unitary() {
    let h = Gate::H.to_operator().unwrap();
    let s = Gate::S.to_operator().unwrap();
    let hs = h.tensor(&s).unwrap();

    assert!(hs.is_unitary(DEFAULT_ATOL));
    assert_eq!(hs.input_dims(), &[2, 2]);

    let cx = Gate::Cx.to_operator().unwrap();
    let big = hs.tensor(&cx).unwrap();
    assert!(big.is_unitary(DEFAULT_ATOL));
    assert_eq!(big.input_dims(), &[2, 2, 2, 2]);
}

#[test]
fn tensor_places_other_on_low_subsystems() {
    let x = Operator::from_label("X").unwrap();
    let z = Operator::from_label("Z").unwrap();

    // x.tensor(z) puts Z on qubit 0, which is the label "XZ".
    let xz = x.tensor(&z).unwrap();
    assert_eq!(xz, Operator::from_label("XZ").unwrap());
}

#[test]
fn expand_is_the_reversed_tensor() {
    let h = Gate::H.to_operator().unwrap();
    let cx = Gate::Cx.to_operator().unwrap();

    let tensored = h.tensor(&cx).unwrap();
    let expanded = cx.expand(&h).unwrap();

    assert_eq!(tensored, expanded);
    assert_eq!(tensored.input_dims(), expanded.input_dims());
    assert_eq!(tensored.output_dims(), expanded.output_dims());
}

#[test]
fn compose_applies_the_operand_after_self() {
    let a = Gate::H.to_operator().unwrap();
    let b = Gate::S.to_operator().unwrap();

    let composed = a.compose(&b, None, false).unwrap();
    let expected = b.data().dot(a.data());
    assert!(allclose(composed.data(), &expected, 1e-12));

    let fronted = a.compose(&b, None, true).unwrap();
    let expected = a.data().dot(b.data());
    assert!(allclose(fronted.data(), &expected, 1e-12));
}

#[test]
fn compose_rejects_mismatched_dimensions() {
    let one_qubit = Gate::H.to_operator().unwrap();
    let two_qubit = Gate::Cx.to_operator().unwrap();

    let result = one_qubit.compose(&two_qubit, None, false);
    assert!(matches!(result, Err(QopError::DimensionMismatch(_))));

    let result = one_qubit.compose(&two_qubit, None, true);
    assert!(matches!(result, Err(QopError::DimensionMismatch(_))));
}

#[test]
fn targeted_compose_leaves_untouched_subsystems_as_identity() {
    // Cx onto qubits {0, 2} of a 3-qubit identity: control is qubit 0,
    // target is qubit 2, qubit 1 untouched.
    let id3 = Operator::identity(&[2, 2, 2]).unwrap();
    let cx = Gate::Cx.to_operator().unwrap();
    let composed = id3.compose(&cx, Some(&[0, 2]), false).unwrap();

    let mut expected = Array2::zeros((8, 8));
    for j in 0..8usize {
        let i = if j & 1 == 1 { j ^ 4 } else { j };
        expected[[i, j]] = ONE;
    }
    assert!(allclose(composed.data(), &expected, 1e-12));
    assert_eq!(composed.input_dims(), &[2, 2, 2]);
}

#[test]
fn targeted_compose_follows_qarg_order() {
    // Reversed qargs turn Cx into control-on-qubit-1, target-on-qubit-0.
    let id2 = Operator::identity(&[2, 2]).unwrap();
    let cx = Gate::Cx.to_operator().unwrap();
    let composed = id2.compose(&cx, Some(&[1, 0]), false).unwrap();

    let mut expected = Array2::zeros((4, 4));
    for j in 0..4usize {
        let i = if j & 2 == 2 { j ^ 1 } else { j };
        expected[[i, j]] = ONE;
    }
    assert!(allclose(composed.data(), &expected, 1e-12));
}

#[test]
fn targeted_compose_validates_qargs() {
    let id3 = Operator::identity(&[2, 2, 2]).unwrap();
    let cx = Gate::Cx.to_operator().unwrap();

    assert!(id3.compose(&cx, Some(&[0]), false).is_err());
    assert!(id3.compose(&cx, Some(&[0, 3]), false).is_err());
    assert!(id3.compose(&cx, Some(&[1, 1]), false).is_err());

    // An operand larger than the target can never be embedded.
    let id2 = Operator::identity(&[2, 2]).unwrap();
    let big = id3.tensor(&id3).unwrap();
    assert!(id2.compose(&big, Some(&[0, 1, 0, 1, 0, 1]), false).is_err());
}

#[test]
fn linear_combination_is_not_unitary_in_general() {
    let xx = Operator::from_label("XX").unwrap();
    let yy = Operator::from_label("YY").unwrap();
    let zz = Operator::from_label("ZZ").unwrap();

    assert!(xx.is_unitary(DEFAULT_ATOL));
    assert!(yy.is_unitary(DEFAULT_ATOL));
    assert!(zz.is_unitary(DEFAULT_ATOL));

    let combination = (&(&xx + &yy) - &(3.0 * &zz)) * 0.5;
    assert!(!combination.is_unitary(DEFAULT_ATOL));
    assert_eq!(combination.input_dims(), &[2, 2]);
}

#[test]
fn checked_arithmetic_rejects_shape_mismatch() {
    let x = Operator::from_label("X").unwrap();
    let xx = Operator::from_label("XX").unwrap();

    assert!(matches!(
        x.checked_add(&xx),
        Err(QopError::DimensionMismatch(_))
    ));
    assert!(matches!(
        x.checked_sub(&xx),
        Err(QopError::DimensionMismatch(_))
    ));
}

#[test]
fn equality_is_phase_sensitive() {
    let x = Operator::from_label("X").unwrap();
    let phase = Complex64::new(0.0, 0.5).exp();
    let phased = phase * &x;

    assert_ne!(x, phased);
    // But a label and the raw gate matrix build the same operator.
    assert_eq!(x, Operator::new(Gate::X.matrix()).unwrap());
}

#[test]
fn equality_requires_matching_factorizations() {
    let matrix = eye(4);
    let as_qubits = Operator::with_dims(matrix.clone(), &[2, 2], &[2, 2]).unwrap();
    let as_qudit = Operator::with_dims(matrix, &[4], &[4]).unwrap();

    assert_ne!(as_qubits, as_qudit);
    assert!(allclose(as_qubits.data(), as_qudit.data(), 1e-12));
}

#[test]
fn data_round_trips_without_copy_corruption() {
    let matrix = kron(&Gate::H.matrix(), &Gate::T.matrix());
    let op = Operator::new(matrix.clone()).unwrap();
    assert_eq!(op.data(), &matrix);
    assert_eq!(op.clone().into_matrix(), matrix);
}

#[test]
fn raw_matrices_convert_implicitly() {
    let id = Operator::identity(&[2]).unwrap();
    let composed = id.compose(&Gate::X.matrix(), None, false).unwrap();
    assert_eq!(composed, Operator::from_label("X").unwrap());

    let tensored = id.tensor(&Gate::Z.matrix()).unwrap();
    assert_eq!(tensored.input_dims(), &[2, 2]);
}

#[test]
fn failed_conversions_surface_as_errors() {
    assert!(matches!(
        Operator::from_label("XQ"),
        Err(QopError::Conversion { .. })
    ));

    let id = Operator::identity(&[2]).unwrap();
    let bad = PauliString::new("XQ");
    assert!(bad.is_err());
    // Zero-sized matrices never become operators, even through a method.
    let empty: Array2<Complex64> = Array2::zeros((0, 0));
    assert!(id.tensor(&empty).is_err());
}

#[test]
fn adjoint_transpose_conjugate_agree() {
    let s = Gate::S.to_operator().unwrap();
    let adjoint = s.adjoint();

    assert_eq!(adjoint, s.conjugate().transpose());
    assert_eq!(adjoint, Gate::Sdg.to_operator().unwrap());
    // U†U = I for a unitary.
    let product = s.compose(&adjoint, None, false).unwrap();
    assert_eq!(product, Operator::identity(&[2]).unwrap());
}

#[test]
fn subsystem_counts_follow_the_factorization() {
    let cx = Gate::Cx.to_operator().unwrap();
    assert_eq!(cx.num_subsystems(), 2);

    let qudit = Operator::new(eye(6)).unwrap();
    assert_eq!(qudit.num_subsystems(), 1);

    let tensored = cx.tensor(&qudit).unwrap();
    assert_eq!(tensored.num_subsystems(), 3);
}

#[test]
fn deserialization_validates_dimension_factorizations() {
    // Forged dims that do not factor the matrix shape must not produce an
    // operator; accepting them would let compose feed mismatched shapes
    // into the matrix product.
    let x = Operator::from_label("X").unwrap();
    let mut value = serde_json::to_value(&x).unwrap();
    value["input_dims"] = serde_json::json!([4]);
    assert!(serde_json::from_value::<Operator>(value.clone()).is_err());

    value["input_dims"] = serde_json::json!([2]);
    let restored: Operator = serde_json::from_value(value).unwrap();
    assert_eq!(restored, x);
}

#[test]
fn operators_serialize_and_deserialize() {
    let op = Gate::Cx.to_operator().unwrap();
    let json = serde_json::to_string(&op).unwrap();
    let back: Operator = serde_json::from_str(&json).unwrap();
    assert_eq!(op, back);
    assert_eq!(op.input_dims(), back.input_dims());
}
