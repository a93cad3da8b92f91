use crate::error::CalcError;
use crate::token::{Operator, Token};
use log::{debug, trace};

/// Turns an expression into tokens, given the function names currently known.
pub trait Tokenize {
    fn tokenize(&self, expression: &str, function_names: &[&str])
        -> Result<Vec<Token>, CalcError>;
}

/// Character scanner for infix arithmetic.
///
/// A `-` is folded into the following number when it opens the expression or
/// follows `(`, `^` or `,`. Anywhere else it is the subtraction operator, so
/// `2^-3` is accepted while `2+-3` is rejected as consecutive operators.
///
/// A `(` directly after a number or another parenthesis gets an implicit `*`,
/// so `2(3)` and `(2)(3)` multiply. Directly nested groups like `((1))` get one
/// too and fail later for lack of a left operand.
///
/// Function names are tried in the order given and the first literal match
/// wins. With overlapping names such as `log` and `log_two`, whichever was
/// registered first shadows the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tokenizer;

impl Tokenize for Tokenizer {
    fn tokenize(
        &self,
        expression: &str,
        function_names: &[&str],
    ) -> Result<Vec<Token>, CalcError> {
        debug!("Tokenizing expression: {}", expression);
        let chars: Vec<char> = expression.chars().collect();
        let mut tokens = Vec::new();
        let mut number_buffer = String::new();
        let mut pos = 0;

        while pos < chars.len() {
            let ch = chars[pos];

            if ch == '-' && (pos == 0 || matches!(chars[pos - 1], '(' | '^' | ',')) {
                number_buffer.push(ch);
                pos += 1;
                continue;
            }

            if ch.is_ascii_digit() || ch == '.' {
                number_buffer.push(ch);
                pos += 1;
                continue;
            }

            // flush, then look at the same character again
            if !number_buffer.is_empty() {
                tokens.push(Token::Number(parse_number(&number_buffer)?));
                number_buffer.clear();
                continue;
            }

            match ch {
                '(' => {
                    if matches!(
                        tokens.last(),
                        Some(Token::Number(_) | Token::LeftParen | Token::RightParen)
                    ) {
                        trace!("Implicit multiplication before '(' at {}", pos);
                        tokens.push(Token::Operator(Operator::Multiply));
                    }
                    tokens.push(Token::LeftParen);
                }
                ')' => tokens.push(Token::RightParen),
                ',' => tokens.push(Token::ArgSeparator),
                _ => {
                    if let Ok(operator) = Operator::try_from(ch) {
                        let next_is_operator = chars
                            .get(pos + 1)
                            .map_or(false, |next| Operator::try_from(*next).is_ok());
                        if operator != Operator::Power && next_is_operator {
                            return Err(CalcError::ConsecutiveOperators { position: pos });
                        }
                        tokens.push(Token::Operator(operator));
                    } else if let Some(name) = match_function(&chars[pos..], function_names) {
                        if matches!(tokens.last(), Some(Token::Number(_))) {
                            trace!("Implicit multiplication before '{}' at {}", name, pos);
                            tokens.push(Token::Operator(Operator::Multiply));
                        }
                        tokens.push(Token::FunctionName(name.to_string()));
                        pos += name.chars().count();
                        continue;
                    } else {
                        return Err(CalcError::InvalidToken {
                            character: ch,
                            position: pos,
                        });
                    }
                }
            }
            pos += 1;
        }

        if !number_buffer.is_empty() {
            tokens.push(Token::Number(parse_number(&number_buffer)?));
        }

        debug!("Tokens: {:?}", tokens);
        Ok(tokens)
    }
}

fn parse_number(buffer: &str) -> Result<f64, CalcError> {
    buffer
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidNumberFormat(buffer.to_string()))
}

fn match_function<'a>(rest: &[char], function_names: &[&'a str]) -> Option<&'a str> {
    function_names.iter().copied().find(|name| {
        !name.is_empty()
            && name.chars().count() <= rest.len()
            && name.chars().zip(rest).all(|(a, b)| a == *b)
    })
}
