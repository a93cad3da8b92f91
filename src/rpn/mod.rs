//! Postfix (reverse Polish) stage of the pipeline.
//!
//! [`to_postfix`] reorders infix tokens with the shunting-yard algorithm and
//! [`evaluate_postfix`] reduces the result on a value stack.

mod converter;
mod evaluator;

pub use converter::to_postfix;
pub use evaluator::evaluate_postfix;
