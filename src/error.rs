use thiserror::Error;

/// Errors raised while registering functions or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid number format: '{0}'")]
    InvalidNumberFormat(String),
    #[error("Invalid token '{character}' at position {position}")]
    InvalidToken { character: char, position: usize },
    #[error("Consecutive operators at position {position}")]
    ConsecutiveOperators { position: usize },
    #[error("Parentheses are misplaced")]
    UnbalancedParentheses,
    #[error("Not enough operands for '{0}'")]
    InsufficientOperands(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Malformed expression")]
    MalformedExpression,
    #[error("Only letters and underscore are allowed in a function name: '{0}'")]
    InvalidFunctionName(String),
    #[error("Function {0} already exists")]
    DuplicateFunction(String),
    #[error("Function {0} not registered")]
    UnknownFunction(String),
}
