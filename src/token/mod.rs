use crate::error::CalcError;
use std::fmt;

mod tokenizer;

pub use tokenizer::{Tokenize, Tokenizer};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
    ArgSeparator,
    FunctionName(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Operator(operator) => write!(f, "{}", operator.symbol()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::ArgSeparator => f.write_str(","),
            Token::FunctionName(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
            Operator::Modulo => '%',
        }
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Power => 6,
            Operator::Multiply | Operator::Divide => 4,
            Operator::Modulo => 2,
            Operator::Add | Operator::Subtract => 1,
        }
    }

    pub fn is_left_associative(&self) -> bool {
        !matches!(self, Operator::Power)
    }

    /// Applies the operator with operands in source order.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            // integer remainder: both operands are truncated first
            Operator::Modulo => {
                let (left, right) = (left.trunc() as i64, right.trunc() as i64);
                if right == 0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(left.checked_rem(right).unwrap_or(0) as f64)
            }
            Operator::Power => Ok(left.powf(right)),
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            '%' => Ok(Operator::Modulo),
            _ => Err(CalcError::MalformedExpression),
        }
    }
}
