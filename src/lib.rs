pub mod calculator;
pub mod error;
pub mod functions;
pub mod rpn;
pub mod token;

pub use calculator::Calculator;
pub use error::CalcError;
pub use functions::{Function, FunctionEntry, FunctionRegistry, NativeFunction};
pub use rpn::{evaluate_postfix, to_postfix};
pub use token::{Operator, Token, Tokenize, Tokenizer};

pub use calcix_macros::calcix_fn;

/// Evaluates `expression` with a calculator holding only the built-in functions.
pub fn evaluate_expression(expression: &str) -> Result<f64, CalcError> {
    Calculator::new().evaluate(expression)
}
