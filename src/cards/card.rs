//! Cards identified by name alone.
//!
//! A `Card` is the coarsest identity in the crate: two cards are the same
//! card exactly when their names are equal. Deck lists only know names, so
//! everything read from a deck list is a `Card`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};

/// Capability shared by every card-like value: it has a name.
///
/// Implemented by [`Card`], [`Print`](super::Print) and
/// [`CardKey`](super::CardKey). Sharing the name does not make values
/// equal; each type keeps its own equality.
pub trait NamedCard {
    /// The card name.
    fn name(&self) -> &str;
}

/// A card identified by its name.
///
/// Immutable after construction. Equality and hashing use the name only,
/// and the comparison is case-sensitive.
///
/// ## Example
///
/// ```
/// use card_stacks::cards::{Card, NamedCard};
///
/// let bolt = Card::new("Lightning Bolt").unwrap();
/// assert_eq!(bolt.name(), "Lightning Bolt");
/// assert!(Card::new("   ").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "CardFields")]
pub struct Card {
    pub(super) name: String,
}

#[derive(Deserialize)]
struct CardFields {
    name: String,
}

impl TryFrom<CardFields> for Card {
    type Error = StackError;

    fn try_from(fields: CardFields) -> Result<Self> {
        Card::new(fields.name)
    }
}

impl Card {
    /// Create a card.
    ///
    /// Surrounding whitespace is trimmed. Fails with a validation error if
    /// nothing is left.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: validate_name(name.into())?,
        })
    }
}

impl NamedCard for Card {
    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Trim a card name and reject blank names.
pub(crate) fn validate_name(name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StackError::validation("Card name cannot be empty"));
    }
    if trimmed.len() == name.len() {
        Ok(name)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_card_new() {
        let card = Card::new("Island").unwrap();
        assert_eq!(card.name(), "Island");
        assert_eq!(format!("{}", card), "Island");
    }

    #[test]
    fn test_card_name_trimmed() {
        let card = Card::new("  Forest \t").unwrap();
        assert_eq!(card.name(), "Forest");
    }

    #[test]
    fn test_card_empty_name_rejected() {
        let err = Card::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(Card::new(" \n ").is_err());
    }

    #[test]
    fn test_card_equality_is_case_sensitive() {
        let a = Card::new("Lightning Bolt").unwrap();
        let b = Card::new("Lightning Bolt").unwrap();
        let c = Card::new("lightning bolt").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_card_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let a = Card::new("Counterspell").unwrap();
        let b = Card::new(" Counterspell").unwrap();

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        a.hash(&mut h1);
        b.hash(&mut h2);

        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new("Sol Ring").unwrap();

        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"name":"Sol Ring"}"#);

        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }

    #[test]
    fn test_card_deserialization_validates() {
        let result: std::result::Result<Card, _> = serde_json::from_str(r#"{"name":"  "}"#);
        assert!(result.is_err());
    }
}
