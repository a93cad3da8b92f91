use crate::error::CalcError;
use crate::functions::{register_functions, FunctionRegistry, NativeFunction};
use crate::rpn::{evaluate_postfix, to_postfix};
use crate::token::{Token, Tokenize, Tokenizer};
use log::debug;
use rayon::prelude::*;

/// Evaluates infix arithmetic against a set of registered functions.
///
/// Every call to [`Calculator::evaluate`] tokenizes, converts to postfix and
/// reduces from scratch; only the function registry outlives a call.
/// Registration needs `&mut self`, so the registry cannot change while an
/// evaluation is running.
pub struct Calculator {
    functions: FunctionRegistry,
    tokenizer: Box<dyn Tokenize + Send + Sync>,
}

impl Calculator {
    /// Creates a calculator with the built-in `sqrt(x)` and `log(base, x)`.
    pub fn new() -> Self {
        Self::with_tokenizer(Tokenizer)
    }

    /// Creates a calculator without any functions.
    pub fn empty() -> Self {
        Self {
            functions: FunctionRegistry::new(),
            tokenizer: Box::new(Tokenizer),
        }
    }

    /// Creates a calculator with the built-in functions and a custom tokenizer.
    pub fn with_tokenizer<T>(tokenizer: T) -> Self
    where
        T: Tokenize + Send + Sync + 'static,
    {
        let mut functions = FunctionRegistry::new();
        register_functions(&mut functions);
        Self {
            functions,
            tokenizer: Box::new(tokenizer),
        }
    }

    pub fn add_function<F>(&mut self, name: &str, arity: usize, function: F) -> Result<(), CalcError>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions.add(name, arity, function)
    }

    pub fn add_native(&mut self, native: NativeFunction) -> Result<(), CalcError> {
        self.functions.add_native(native)
    }

    /// See [`FunctionRegistry::replace`]; a rejected replacement leaves the
    /// old function removed.
    pub fn replace_function<F>(
        &mut self,
        name: &str,
        arity: usize,
        function: F,
    ) -> Result<(), CalcError>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions.replace(name, arity, function)
    }

    pub fn remove_function(&mut self, name: &str) {
        self.functions.remove(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.names()
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Tokenizes `expression` and returns it in postfix order.
    pub fn to_postfix(&self, expression: &str) -> Result<Vec<Token>, CalcError> {
        let names = self.functions.names();
        let tokens = self.tokenizer.tokenize(expression, &names)?;
        to_postfix(tokens, &self.functions)
    }

    /// Evaluates `expression`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CalcError`] raised by any stage; no partial result
    /// is produced.
    pub fn evaluate(&self, expression: &str) -> Result<f64, CalcError> {
        debug!("Evaluating expression: {}", expression);
        let postfix = self.to_postfix(expression)?;
        evaluate_postfix(&postfix, &self.functions)
    }

    /// Evaluates independent expressions in parallel, keeping input order.
    pub fn evaluate_batch<S>(&self, expressions: &[S]) -> Vec<Result<f64, CalcError>>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Evaluating batch of {} expressions", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate(expression.as_ref()))
            .collect()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("functions", &self.functions)
            .finish_non_exhaustive()
    }
}
