pub mod builtin;

use crate::error::CalcError;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type Function = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Compile-time description of a native function, usually emitted by
/// `#[calcix_fn]`.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(&[f64]) -> f64,
}

#[derive(Clone)]
pub struct FunctionEntry {
    name: String,
    arity: usize,
    function: Function,
}

impl FunctionEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values the function takes from the evaluation stack.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Calls the function with `args` in source order.
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.function)(args)
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl From<NativeFunction> for FunctionEntry {
    fn from(native: NativeFunction) -> Self {
        Self {
            name: native.name.to_string(),
            arity: native.arity,
            function: Arc::new(native.function),
        }
    }
}

/// Named, fixed-arity functions, kept in registration order.
///
/// Names are trimmed and lowercased before every lookup, so `" Sqrt"` and
/// `"sqrt"` refer to the same entry.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionEntry>,
    order: Vec<String>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under `name`.
    ///
    /// Fails with `InvalidFunctionName` unless the normalized name is made of
    /// ASCII letters and underscores with at least one letter, and with
    /// `DuplicateFunction` if the name is taken. The registry is left untouched
    /// on failure.
    pub fn add<F>(&mut self, name: &str, arity: usize, function: F) -> Result<(), CalcError>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        let name = normalize(name);
        if !name.chars().any(|c| c.is_ascii_lowercase())
            || !name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
        {
            return Err(CalcError::InvalidFunctionName(name));
        }
        if self.functions.contains_key(&name) {
            return Err(CalcError::DuplicateFunction(name));
        }

        debug!("Registering function {} with arity {}", name, arity);
        self.insert(FunctionEntry {
            name,
            arity,
            function: Arc::new(function),
        });
        Ok(())
    }

    /// Registers a descriptor produced by `#[calcix_fn]`.
    pub fn add_native(&mut self, native: NativeFunction) -> Result<(), CalcError> {
        self.add(native.name, native.arity, native.function)
    }

    /// Removes `name` and registers `function` in its place.
    ///
    /// Not transactional: if the new registration is rejected, the previous
    /// entry stays removed.
    pub fn replace<F>(&mut self, name: &str, arity: usize, function: F) -> Result<(), CalcError>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.remove(name);
        self.add(name, arity, function)
    }

    /// Removes `name`. Unknown names are ignored.
    pub fn remove(&mut self, name: &str) {
        let name = normalize(name);
        if self.functions.remove(&name).is_some() {
            debug!("Removed function {}", name);
            self.order.retain(|registered| *registered != name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&normalize(name))
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(&normalize(name))
    }

    /// Registered names, oldest registration first.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Inserts an entry whose name is already known to be valid and free.
    pub(crate) fn insert(&mut self, entry: FunctionEntry) {
        self.order.push(entry.name.clone());
        self.functions.insert(entry.name.clone(), entry);
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.order.iter().filter_map(|name| self.functions.get(name)))
            .finish()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Registers the functions every calculator starts with.
pub fn register_functions(registry: &mut FunctionRegistry) {
    for native in [builtin::SQRT, builtin::LOG] {
        if !registry.contains(native.name) {
            registry.insert(native.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_call() {
        let mut registry = FunctionRegistry::new();
        registry.add("double", 1, |args| args[0] * 2.0).unwrap();

        let entry = registry.get("double").unwrap();
        assert_eq!(entry.name(), "double");
        assert_eq!(entry.arity(), 1);
        assert_eq!(entry.call(&[21.0]), 42.0);
    }

    #[test]
    fn test_names_are_normalized() {
        let mut registry = FunctionRegistry::new();
        registry.add("  Half_Of ", 1, |args| args[0] / 2.0).unwrap();

        assert!(registry.contains("half_of"));
        assert!(registry.contains("HALF_OF"));
        assert_eq!(registry.names(), vec!["half_of"]);
    }

    #[test]
    fn test_invalid_names() {
        let mut registry = FunctionRegistry::new();
        for name in ["", "   ", "_", "___", "log2", "my-fn", "a b", "café"] {
            assert!(
                matches!(
                    registry.add(name, 1, |args| args[0]),
                    Err(CalcError::InvalidFunctionName(_))
                ),
                "{name:?} should be rejected"
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_keeps_first_registration() {
        let mut registry = FunctionRegistry::new();
        registry.add("pick", 1, |_| 1.0).unwrap();

        let result = registry.add(" PICK", 1, |_| 2.0);
        assert_eq!(result, Err(CalcError::DuplicateFunction("pick".to_string())));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("pick").unwrap().call(&[0.0]), 1.0);
    }

    #[test]
    fn test_replace() {
        let mut registry = FunctionRegistry::new();
        registry.add("pick", 1, |_| 1.0).unwrap();
        registry.replace("Pick", 2, |_| 2.0).unwrap();

        let entry = registry.get("pick").unwrap();
        assert_eq!(entry.arity(), 2);
        assert_eq!(entry.call(&[0.0, 0.0]), 2.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_replace_leaves_other_entries() {
        let mut registry = FunctionRegistry::new();
        registry.add("keep", 1, |_| 1.0).unwrap();

        assert!(registry.replace("bad-name", 1, |_| 2.0).is_err());
        assert!(registry.contains("keep"));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = FunctionRegistry::new();
        registry.add("keep", 1, |_| 1.0).unwrap();

        registry.remove("missing");
        assert_eq!(registry.names(), vec!["keep"]);

        registry.remove(" KEEP ");
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let mut registry = FunctionRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.add(name, 0, |_| 0.0).unwrap();
        }
        registry.remove("alpha");
        registry.add("alpha", 0, |_| 0.0).unwrap();

        assert_eq!(registry.names(), vec!["zeta", "mid", "alpha"]);
    }

    #[test]
    fn test_register_functions() {
        let mut registry = FunctionRegistry::new();
        register_functions(&mut registry);

        assert_eq!(registry.names(), vec!["sqrt", "log"]);
        assert_eq!(registry.get("sqrt").unwrap().arity(), 1);
        assert_eq!(registry.get("log").unwrap().arity(), 2);
    }
}
