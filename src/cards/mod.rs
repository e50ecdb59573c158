//! Card model: cards, prints, and the keys stacks are built from.
//!
//! ## Key Types
//!
//! - `Card`: Identified by name only
//! - `Print`: Identified by name, set, foil and price
//! - `CardKey`: Tagged union of the two, used as the stack key
//! - `NamedCard`: Shared "has a name" capability
//!
//! ## Identity Domains
//!
//! A card and a print with the same name are different keys. Formats that
//! need one domain convert explicitly with `CardKey::to_card` or
//! `CardKey::to_print`; nothing merges the domains implicitly.

pub mod card;
pub mod key;
pub mod print;

pub use card::{Card, NamedCard};
pub use key::{CardKey, KeyDomain};
pub use print::{Price, Print, PrintIdentity};
