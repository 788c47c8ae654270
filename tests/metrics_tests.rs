use num_complex::Complex64;

use qop::{average_gate_fidelity, process_fidelity, random_unitary, Operator, QopError};

#[test]
fn process_fidelity_ignores_global_phase() {
    let x = Operator::from_label("X").unwrap();
    let phased = Complex64::new(0.0, 0.5).exp() * &x;

    // Equality sees the phase, the fidelity does not.
    assert_ne!(x, phased);
    let fidelity = process_fidelity(&x, &phased).unwrap();
    assert!((fidelity - 1.0).abs() < 1e-10);
}

#[test]
fn orthogonal_paulis_have_zero_fidelity() {
    let x = Operator::from_label("X").unwrap();
    let z = Operator::from_label("Z").unwrap();
    let fidelity = process_fidelity(&x, &z).unwrap();
    assert!(fidelity.abs() < 1e-10);
}

#[test]
fn identical_unitaries_have_unit_fidelity() {
    let mut rng = rand::thread_rng();
    let u = random_unitary(2, 3, &mut rng).unwrap();

    let fidelity = process_fidelity(&u, &u).unwrap();
    assert!((fidelity - 1.0).abs() < 1e-10);

    let average = average_gate_fidelity(&u, &u).unwrap();
    assert!((average - 1.0).abs() < 1e-10);
}

#[test]
fn average_gate_fidelity_interpolates_process_fidelity() {
    let x = Operator::from_label("X").unwrap();
    let z = Operator::from_label("Z").unwrap();

    // F = 0 on one qubit gives (2*0 + 1) / 3.
    let average = average_gate_fidelity(&x, &z).unwrap();
    assert!((average - 1.0 / 3.0).abs() < 1e-10);
}

#[test]
fn fidelity_requires_unitary_inputs() {
    let x = Operator::from_label("X").unwrap();
    let z = Operator::from_label("Z").unwrap();
    let sum = x.checked_add(&z).unwrap();

    assert!(matches!(
        process_fidelity(&x, &sum),
        Err(QopError::NotUnitary { .. })
    ));
    assert!(matches!(
        process_fidelity(&sum, &x),
        Err(QopError::NotUnitary { .. })
    ));
}

#[test]
fn fidelity_requires_matching_dimensions() {
    let x = Operator::from_label("X").unwrap();
    let xx = Operator::from_label("XX").unwrap();

    assert!(matches!(
        process_fidelity(&x, &xx),
        Err(QopError::DimensionMismatch(_))
    ));
}
