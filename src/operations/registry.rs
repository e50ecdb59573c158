//! Operation registry for name lookup.
//!
//! The `OperationRegistry` maps operation names to stack functions. The CLI
//! resolves a command name through it, and new operations can be added
//! without touching the dispatch code.

use rustc_hash::FxHashMap;

use super::OperationKind;
use crate::error::{Result, StackError};
use crate::stack::Stack;

/// Signature of a stack operation. Must not mutate its inputs.
pub type OperationFn = fn(&Stack, &Stack) -> Result<Stack>;

/// A named binary stack operation.
#[derive(Clone, Copy, Debug)]
pub struct Operation {
    /// Lookup name.
    pub name: &'static str,

    /// One-line description for listings.
    pub description: &'static str,

    /// The operation itself.
    pub func: OperationFn,
}

impl Operation {
    /// Create an operation.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        func: OperationFn,
    ) -> Self {
        Self {
            name,
            description,
            func,
        }
    }

    /// Run the operation on two stacks.
    pub fn execute(&self, left: &Stack, right: &Stack) -> Result<Stack> {
        (self.func)(left, right)
    }
}

/// Registry of stack operations.
///
/// ## Example
///
/// ```
/// use card_stacks::operations::OperationRegistry;
///
/// let registry = OperationRegistry::with_defaults();
///
/// assert!(registry.contains("union"));
/// assert!(registry.lookup("xor").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OperationRegistry {
    operations: FxHashMap<&'static str, Operation>,
}

impl OperationRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in operation.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in OperationKind::ALL {
            registry.register(kind.to_operation());
        }
        registry
    }

    /// Register an operation.
    ///
    /// Panics if an operation with the same name already exists.
    pub fn register(&mut self, operation: Operation) {
        if self.operations.contains_key(operation.name) {
            panic!("Operation '{}' already registered", operation.name);
        }
        self.operations.insert(operation.name, operation);
    }

    /// Get an operation by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Get an operation by name, failing with an unknown-operation error.
    pub fn lookup(&self, name: &str) -> Result<&Operation> {
        self.get(name).ok_or_else(|| StackError::UnknownOperation {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Look up and run an operation.
    pub fn execute(&self, name: &str, left: &Stack, right: &Stack) -> Result<Stack> {
        let operation = self.lookup(name)?;
        log::debug!("Executing {} on {} and {} cards", operation.name, left.total(), right.total());
        operation.execute(left, right)
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.operations.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Iterate over operations sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        let mut ops: Vec<_> = self.operations.values().collect();
        ops.sort_unstable_by_key(|op| op.name);
        ops.into_iter()
    }

    /// Get the number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
