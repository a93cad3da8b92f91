use calcix_rs::Calculator;
use log::debug;

fn main() {
    pretty_env_logger::init();

    let calculator = Calculator::new();

    for expr in ["2+3*4", "(2+3)*4", "2^3^2", "-5+3", "2(3+4)", "sqrt(16)", "log(2,8)", "5/0"] {
        let postfix = calculator.to_postfix(expr);
        debug!("postfix: {postfix:?}");

        match calculator.evaluate(expr) {
            Ok(result) => println!("{expr} = {result}"),
            Err(err) => println!("{expr}: {err}"),
        }
    }
}
