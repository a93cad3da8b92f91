use crate::error::CalcError;
use crate::functions::FunctionRegistry;
use crate::token::Token;
use log::{debug, trace};

/// Reorders infix `tokens` into postfix order.
///
/// The output only ever holds numbers, operators and function names.
/// `^` is right-associative, every other operator groups to the left.
pub fn to_postfix(
    tokens: Vec<Token>,
    functions: &FunctionRegistry,
) -> Result<Vec<Token>, CalcError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        trace!("token {:?}, stack {:?}", token, stack);
        match token {
            Token::Number(_) => output.push(token),

            Token::FunctionName(ref name) => {
                if !functions.contains(name) {
                    return Err(CalcError::UnknownFunction(name.clone()));
                }
                stack.push(token);
            }

            Token::ArgSeparator => {
                pop_until_left_paren(&mut stack, &mut output)?;
            }

            Token::Operator(operator) => {
                while let Some(Token::Operator(top)) = stack.last() {
                    let pops = if operator.is_left_associative() {
                        operator.precedence() <= top.precedence()
                    } else {
                        operator.precedence() < top.precedence()
                    };
                    if !pops {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token);
            }

            Token::LeftParen => stack.push(token),

            Token::RightParen => {
                pop_until_left_paren(&mut stack, &mut output)?;
                stack.pop();
                if matches!(stack.last(), Some(Token::FunctionName(_))) {
                    output.extend(stack.pop());
                }
            }
        }
    }

    while let Some(token) = stack.pop() {
        if token == Token::LeftParen {
            return Err(CalcError::UnbalancedParentheses);
        }
        output.push(token);
    }

    debug!(
        "Postfix: {}",
        output
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );
    Ok(output)
}

/// Moves operators to `output` until a `(` is on top, which is left in place.
fn pop_until_left_paren(
    stack: &mut Vec<Token>,
    output: &mut Vec<Token>,
) -> Result<(), CalcError> {
    if !stack.contains(&Token::LeftParen) {
        return Err(CalcError::UnbalancedParentheses);
    }
    while let Some(top) = stack.last() {
        if *top == Token::LeftParen {
            break;
        }
        output.extend(stack.pop());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::register_functions;
    use crate::token::{Tokenize, Tokenizer};

    fn postfix(expression: &str) -> Result<String, CalcError> {
        let mut functions = FunctionRegistry::new();
        register_functions(&mut functions);
        functions.add("max", 2, |args| args[0].max(args[1]))?;

        let names = functions.names();
        let tokens = Tokenizer.tokenize(expression, &names)?;
        let output = to_postfix(tokens, &functions)?;
        Ok(output
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("2+3*4").unwrap(), "2 3 4 * +");
        assert_eq!(postfix("2*3+4").unwrap(), "2 3 * 4 +");
        assert_eq!(postfix("8%3*2").unwrap(), "8 3 2 * %");
        assert_eq!(postfix("1+8%3").unwrap(), "1 8 3 % +");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix("10-4-3").unwrap(), "10 4 - 3 -");
        assert_eq!(postfix("64/4/2").unwrap(), "64 4 / 2 /");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(postfix("2^3^2").unwrap(), "2 3 2 ^ ^");
        assert_eq!(postfix("2^3*4").unwrap(), "2 3 ^ 4 *");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(postfix("(2+3)*4").unwrap(), "2 3 + 4 *");
        assert_eq!(postfix("2(3+4)").unwrap(), "2 3 4 + *");
    }

    #[test]
    fn test_functions_follow_their_arguments() {
        assert_eq!(postfix("sqrt(16)").unwrap(), "16 sqrt");
        assert_eq!(postfix("log(2,8)").unwrap(), "2 8 log");
        assert_eq!(postfix("max(1+2,3*4)").unwrap(), "1 2 + 3 4 * max");
        assert_eq!(
            postfix("sqrt(max(2,16))+1").unwrap(),
            "2 16 max sqrt 1 +"
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(postfix("(2+3"), Err(CalcError::UnbalancedParentheses));
        assert_eq!(postfix("2+3)"), Err(CalcError::UnbalancedParentheses));
        assert_eq!(postfix("1,2"), Err(CalcError::UnbalancedParentheses));
    }

    #[test]
    fn test_unknown_function() {
        let tokens = vec![
            Token::FunctionName("nope".to_string()),
            Token::LeftParen,
            Token::Number(1.0),
            Token::RightParen,
        ];
        assert_eq!(
            to_postfix(tokens, &FunctionRegistry::new()),
            Err(CalcError::UnknownFunction("nope".to_string()))
        );
    }
}
