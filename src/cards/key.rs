//! Stack keys: the tagged union of the two identity domains.
//!
//! A stack is keyed by `CardKey`, which is either a bare [`Card`] or a
//! [`Print`]. The variant is part of identity, so `Card("Bolt")` and a
//! `Print` named "Bolt" are different keys. Moving between domains only
//! happens through the explicit conversions below.

use serde::{Deserialize, Serialize};

use super::card::{Card, NamedCard};
use super::print::Print;

/// Which identity domain a key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDomain {
    /// Identified by name.
    Card,
    /// Identified by name and printing metadata.
    Print,
}

impl std::fmt::Display for KeyDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyDomain::Card => f.write_str("card"),
            KeyDomain::Print => f.write_str("print"),
        }
    }
}

/// A key in a stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKey {
    Card(Card),
    Print(Print),
}

impl CardKey {
    /// Domain of this key.
    #[must_use]
    pub fn domain(&self) -> KeyDomain {
        match self {
            CardKey::Card(_) => KeyDomain::Card,
            CardKey::Print(_) => KeyDomain::Print,
        }
    }

    /// Get as print if this is a Print key.
    #[must_use]
    pub fn as_print(&self) -> Option<&Print> {
        match self {
            CardKey::Print(p) => Some(p),
            CardKey::Card(_) => None,
        }
    }

    /// Get as card if this is a Card key.
    #[must_use]
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            CardKey::Card(c) => Some(c),
            CardKey::Print(_) => None,
        }
    }

    /// Normalize into the card domain (prints lose their metadata).
    #[must_use]
    pub fn to_card(&self) -> CardKey {
        match self {
            CardKey::Card(_) => self.clone(),
            CardKey::Print(p) => CardKey::Card(p.to_card()),
        }
    }

    /// Normalize into the print domain (cards get default metadata).
    #[must_use]
    pub fn to_print(&self) -> CardKey {
        match self {
            CardKey::Card(c) => CardKey::Print(Print::from_card(c)),
            CardKey::Print(_) => self.clone(),
        }
    }
}

impl NamedCard for CardKey {
    fn name(&self) -> &str {
        match self {
            CardKey::Card(c) => c.name(),
            CardKey::Print(p) => p.name(),
        }
    }
}

impl From<Card> for CardKey {
    fn from(card: Card) -> Self {
        CardKey::Card(card)
    }
}

impl From<Print> for CardKey {
    fn from(print: Print) -> Self {
        CardKey::Print(print)
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKey::Card(c) => c.fmt(f),
            CardKey::Print(p) => p.fmt(f),
        }
    }
}
