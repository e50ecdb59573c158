//! # card-stacks
//!
//! Multiset algebra over trading-card collections.
//!
//! ## Design Principles
//!
//! 1. **Two Identity Domains**: A [`Card`] is identified by name alone, a
//!    [`Print`] by name, set, foil and price. Keys of different domains are
//!    never equal; conversion is explicit (`to_cards`, `to_prints`).
//!
//! 2. **Immutable Stacks**: Every operation returns a new [`Stack`]. Inputs
//!    are never modified.
//!
//! 3. **Deterministic Order**: Results list the left operand's keys first,
//!    then keys only the right operand has.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) stack cloning via `im-rs`, so
//!   chained operations share structure.
//!
//! - **Adapters at the Edges**: File formats produce and consume stacks and
//!   never reach into the algebra.
//!
//! ## Modules
//!
//! - `cards`: Card and print identities, prices
//! - `stack`: The stack multiset and property filters
//! - `operations`: Named operations and their registry
//! - `formats`: Deck-list and CSV readers/writers
//! - `config`: Adapter settings
//! - `cli`: The `stacks` command-line tool

pub mod cards;
pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod operations;
pub mod stack;

// Re-export commonly used types
pub use crate::cards::{Card, CardKey, KeyDomain, NamedCard, Price, Print, PrintIdentity};

pub use crate::config::IoConfig;

pub use crate::error::{ErrorKind, Result, StackError};

pub use crate::formats::{load_stack, write_stack, Format, StackReader, StackWriter};

pub use crate::operations::{Operation, OperationKind, OperationRegistry};

pub use crate::stack::{FilterOperator, Property, PropertyFilter, Stack, StackEntry};
