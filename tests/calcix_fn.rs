use calcix_rs::{calcix_fn, CalcError, Calculator, NativeFunction};

#[calcix_fn]
fn hypot(a: f64, b: f64) -> f64 {
    a.hypot(b)
}

#[calcix_fn]
fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[calcix_fn]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[calcix_fn]
fn tau() -> f64 {
    std::f64::consts::TAU
}

#[test]
fn test_descriptor_carries_name_and_arity() {
    assert_eq!(HYPOT.name, "hypot");
    assert_eq!(HYPOT.arity, 2);
    assert_eq!(CLAMP_UNIT.name, "clamp_unit");
    assert_eq!(CLAMP_UNIT.arity, 1);
    assert_eq!(LERP.arity, 3);
    assert_eq!(TAU.arity, 0);
}

#[test]
fn test_original_function_is_kept() {
    assert_eq!(hypot(3.0, 4.0), 5.0);
    assert_eq!((LERP.function)(&[0.0, 10.0, 0.25]), 2.5);
}

#[test]
fn test_native_functions_evaluate() {
    let mut calculator = Calculator::new();
    for native in [HYPOT, CLAMP_UNIT, LERP, TAU] {
        calculator.add_native(native).unwrap();
    }

    assert_eq!(calculator.evaluate("hypot(6,8)"), Ok(10.0));
    assert_eq!(calculator.evaluate("clamp_unit(7)"), Ok(1.0));
    assert_eq!(calculator.evaluate("lerp(2,4,.5)*3"), Ok(9.0));
    assert_eq!(calculator.evaluate("tau()/2"), Ok(std::f64::consts::PI));
}

#[test]
fn test_native_registration_rejects_duplicates() {
    let mut calculator = Calculator::new();
    calculator.add_native(HYPOT).unwrap();

    assert_eq!(
        calculator.add_native(HYPOT),
        Err(CalcError::DuplicateFunction("hypot".to_string()))
    );
}
