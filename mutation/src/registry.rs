//! Operation registry and factories.
//!
//! The registry maps kind names to constructors over positional arguments.
//! Factories adapt a descriptor's named parameters to such a constructor,
//! so new kinds plug in without touching the session.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sculptor_core::{Params, Value};

use crate::descriptor::OperationFactory;
use crate::error::{MutationError, MutationResult};
use crate::operation::{Mutation, Operation, OperationKind};

/// Builds an operation from positional arguments.
pub type Constructor = Arc<dyn Fn(Vec<Value>) -> MutationResult<Box<dyn Mutation>> + Send + Sync>;

/// Maps descriptor parameters to positional constructor arguments.
pub type ParamMapper = Arc<dyn Fn(&Params) -> Vec<Value> + Send + Sync>;

/// Kind name to constructor map.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    constructors: HashMap<String, Constructor>,
}

impl OperationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in kind. Built-in constructors take
    /// their arguments in [`OperationKind::param_names`] order; a null
    /// argument means "not supplied".
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in OperationKind::ALL {
            registry.register(kind.as_str(), move |args: Vec<Value>| {
                let mut params = Params::new();
                for (name, arg) in kind.param_names().iter().zip(args) {
                    if !arg.is_null() {
                        params.insert(*name, arg);
                    }
                }
                Ok(Box::new(Operation::build(kind, &params)?) as Box<dyn Mutation>)
            });
        }
        registry
    }

    /// Register (or replace) the constructor for a kind.
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn(Vec<Value>) -> MutationResult<Box<dyn Mutation>> + Send + Sync + 'static,
    {
        self.constructors.insert(kind.into(), Arc::new(constructor));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn resolve(&self, kind: &str) -> MutationResult<&Constructor> {
        self.constructors
            .get(kind)
            .ok_or_else(|| MutationError::unknown_operation(kind))
    }

    /// Construct an operation from positional arguments.
    pub fn make(&self, kind: &str, args: Vec<Value>) -> MutationResult<Box<dyn Mutation>> {
        let constructor = self.resolve(kind)?;
        constructor(args)
    }

    /// Wrap a registered kind into a factory. Without a mapper the whole
    /// parameter map is passed as the single argument.
    pub fn wrap(&self, kind: &str, mapper: Option<ParamMapper>) -> OperationFactory {
        let kind = kind.to_string();
        let constructor = self.constructors.get(&kind).cloned();
        Arc::new(move |params: &Params| {
            let constructor = constructor
                .as_ref()
                .ok_or_else(|| MutationError::unknown_operation(kind.clone()))?;
            let args = match &mapper {
                Some(mapper) => mapper(params),
                None => vec![params.to_value()],
            };
            constructor(args)
        })
    }

    /// A factory passing the named parameters in order. Missing keys are
    /// passed as null.
    pub fn simple(&self, kind: &str, keys: &[&str]) -> OperationFactory {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let mapper: ParamMapper = Arc::new(move |params: &Params| {
            keys.iter()
                .map(|key| params.get(key).cloned().unwrap_or(Value::Null))
                .collect()
        });
        self.wrap(kind, Some(mapper))
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
