use crate::error::CalcError;
use crate::functions::FunctionRegistry;
use crate::token::Token;
use log::{debug, trace};

/// Reduces a postfix sequence to a single value.
pub fn evaluate_postfix(
    postfix: &[Token],
    functions: &FunctionRegistry,
) -> Result<f64, CalcError> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(value) => stack.push(*value),

            Token::Operator(operator) => {
                if stack.len() < 2 {
                    return Err(CalcError::InsufficientOperands(
                        operator.symbol().to_string(),
                    ));
                }
                let (right, left) = (pop(&mut stack)?, pop(&mut stack)?);
                let result = operator.apply(left, right)?;
                trace!("{} {} {} = {}", left, operator.symbol(), right, result);
                stack.push(result);
            }

            Token::FunctionName(name) => {
                let entry = functions
                    .get(name)
                    .ok_or_else(|| CalcError::UnknownFunction(name.clone()))?;
                if stack.len() < entry.arity() {
                    return Err(CalcError::InsufficientOperands(name.clone()));
                }
                let args = stack.split_off(stack.len() - entry.arity());
                let result = entry.call(&args);
                trace!("{}{:?} = {}", name, args, result);
                stack.push(result);
            }

            Token::LeftParen | Token::RightParen | Token::ArgSeparator => {
                return Err(CalcError::MalformedExpression);
            }
        }
    }

    match stack.as_slice() {
        [value] => {
            debug!("Result: {}", value);
            Ok(*value)
        }
        _ => Err(CalcError::MalformedExpression),
    }
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, CalcError> {
    stack.pop().ok_or(CalcError::MalformedExpression)
}
