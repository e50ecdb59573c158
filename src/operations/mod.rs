//! Named binary operations over stacks.
//!
//! ## Key Types
//!
//! - `OperationKind`: The built-in operations as a sum type (static dispatch)
//! - `Operation`: Name, description and function pointer
//! - `OperationRegistry`: Name lookup for the CLI

pub mod registry;

pub use registry::{Operation, OperationFn, OperationRegistry};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};
use crate::stack::Stack;

/// Built-in stack operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Union,
    Intersection,
    Difference,
}

impl OperationKind {
    /// Every built-in operation.
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Union,
        OperationKind::Intersection,
        OperationKind::Difference,
    ];

    /// Name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OperationKind::Union => "union",
            OperationKind::Intersection => "intersection",
            OperationKind::Difference => "difference",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            OperationKind::Union => "Combine all cards from both stacks",
            OperationKind::Intersection => "Find cards that exist in both stacks",
            OperationKind::Difference => {
                "Find cards in the first stack that are not in the second stack"
            }
        }
    }

    /// Apply the operation. Only a union can fail, when the combined count
    /// overflows.
    pub fn apply(self, left: &Stack, right: &Stack) -> Result<Stack> {
        match self {
            OperationKind::Union => left.checked_union(right),
            OperationKind::Intersection => Ok(left.intersection(right)),
            OperationKind::Difference => Ok(left.difference(right)),
        }
    }

    /// Registry entry for this operation.
    #[must_use]
    pub fn to_operation(self) -> Operation {
        let func: OperationFn = match self {
            OperationKind::Union => Stack::checked_union,
            OperationKind::Intersection => |a, b| Ok(a.intersection(b)),
            OperationKind::Difference => |a, b| Ok(a.difference(b)),
        };
        Operation::new(self.name(), self.description(), func)
    }
}

impl FromStr for OperationKind {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| StackError::UnknownOperation {
                name: s.to_string(),
                available: OperationKind::ALL.map(OperationKind::name).join(", "),
            })
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardKey};
    use crate::error::ErrorKind;

    fn bolt() -> CardKey {
        Card::new("Lightning Bolt").unwrap().into()
    }

    #[test]
    fn test_from_str() {
        assert_eq!("union".parse::<OperationKind>().unwrap(), OperationKind::Union);
        assert_eq!(
            "difference".parse::<OperationKind>().unwrap(),
            OperationKind::Difference
        );

        let err = "xor".parse::<OperationKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
        assert!(err.to_string().contains("union, intersection, difference"));
    }

    #[test]
    fn test_apply_matches_registry_function() {
        let a = Stack::from_entries([(bolt(), 4)]).unwrap();
        let b = Stack::from_entries([(bolt(), 1)]).unwrap();

        for kind in OperationKind::ALL {
            let op = kind.to_operation();
            assert_eq!(op.name, kind.name());
            assert_eq!(op.execute(&a, &b).unwrap(), kind.apply(&a, &b).unwrap());
        }
    }

    #[test]
    fn test_union_overflow_is_an_error() {
        let full = Stack::from_entries([(bolt(), usize::MAX)]).unwrap();
        let one = Stack::from_entries([(bolt(), 1)]).unwrap();

        let err = OperationKind::Union.apply(&full, &one).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(OperationKind::Union.to_operation().execute(&full, &one).is_err());
        assert_eq!(OperationKind::Difference.apply(&full, &one).unwrap().total(), usize::MAX - 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(OperationKind::Intersection.to_string(), "intersection");
    }
}
