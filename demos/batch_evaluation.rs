use calcix_rs::Calculator;

fn main() {
    pretty_env_logger::init();

    let calculator = Calculator::new();
    let expressions: Vec<String> = (1..=20).map(|i| format!("sqrt({i})^2+{i}%3")).collect();

    for (expr, result) in expressions.iter().zip(calculator.evaluate_batch(&expressions)) {
        println!("{expr} = {result:?}");
    }
}
