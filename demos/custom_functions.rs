use calcix_rs::{calcix_fn, Calculator, NativeFunction};

#[calcix_fn]
fn hypot(a: f64, b: f64) -> f64 {
    a.hypot(b)
}

#[calcix_fn]
fn avg(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

fn main() {
    pretty_env_logger::init();

    let mut calculator = Calculator::new();
    calculator.add_native(HYPOT).unwrap();
    calculator.add_native(AVG).unwrap();
    calculator
        .add_function("cube", 1, |args| args[0].powi(3))
        .unwrap();

    println!("functions: {:?}", calculator.function_names());
    println!("hypot(3,4) = {:?}", calculator.evaluate("hypot(3,4)"));
    println!("2avg(1,cube(2)) = {:?}", calculator.evaluate("2avg(1,cube(2))"));

    calculator
        .replace_function("cube", 1, |args| args[0] * args[0])
        .unwrap();
    println!("cube(3) after replace = {:?}", calculator.evaluate("cube(3)"));

    calculator.remove_function("cube");
    println!("cube(3) after remove = {:?}", calculator.evaluate("cube(3)"));
}
