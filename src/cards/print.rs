//! Prints - cards with printing metadata.
//!
//! A `Print` is a specific printing of a card: which set it came from,
//! whether it is foil, and what it is worth. Collection exports carry this
//! metadata, so everything read from a CSV file is a `Print`.
//!
//! ## Identity
//!
//! Two prints are equal when `(name, set, foil, price)` are all equal. The
//! collector number is carried along as metadata and, by default, is not
//! part of identity. A print built with [`PrintIdentity::WithCollectorNumber`]
//! also compares collector numbers. Prints built under different identity
//! modes are never equal to each other.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::card::{validate_name, Card, NamedCard};
use crate::error::{Result, StackError};

/// Non-negative card price.
///
/// Backed by an exact decimal so that prices can be hashed. Equality ignores
/// trailing zeros (`100.0 == 100.00`) while display keeps the original scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negative amounts.
    pub fn new(amount: Decimal) -> Result<Self> {
        if amount.is_zero() {
            return Ok(Self(amount.abs()));
        }
        if amount.is_sign_negative() {
            return Err(StackError::validation(format!(
                "Price must be non-negative, got {}",
                amount
            )));
        }
        Ok(Self(amount))
    }

    /// The underlying amount.
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = StackError;

    fn try_from(amount: Decimal) -> Result<Self> {
        Price::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|_| StackError::validation(format!("Invalid price '{}'", s)))?;
        Price::new(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a foil-style flag: `true/false`, `1/0` or `yes/no`, any case.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Which fields make up a print's identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintIdentity {
    /// `(name, set, foil, price)`.
    #[default]
    Standard,
    /// `(name, set, foil, price, collector_number)`.
    WithCollectorNumber,
}

/// A specific printing of a card.
///
/// Read-only after construction. The `with_*` builders consume the print and
/// return a new one.
///
/// ## Example
///
/// ```
/// use card_stacks::cards::{NamedCard, Print};
///
/// let beta = Print::new("Lightning Bolt", "Beta", false, Some("100.00".parse().unwrap())).unwrap();
/// let foil = Print::new("Lightning Bolt", "Beta", true, Some("100.00".parse().unwrap())).unwrap();
///
/// assert_eq!(beta.name(), "Lightning Bolt");
/// assert_ne!(beta, foil);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PrintFields")]
pub struct Print {
    name: String,
    set: String,
    foil: bool,
    price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collector_number: Option<String>,
    #[serde(skip_serializing_if = "is_standard")]
    identity: PrintIdentity,
}

fn is_standard(identity: &PrintIdentity) -> bool {
    *identity == PrintIdentity::Standard
}

#[derive(Deserialize)]
struct PrintFields {
    name: String,
    #[serde(default)]
    set: String,
    #[serde(default)]
    foil: bool,
    #[serde(default)]
    price: Option<Price>,
    #[serde(default)]
    collector_number: Option<String>,
    #[serde(default)]
    identity: PrintIdentity,
}

impl TryFrom<PrintFields> for Print {
    type Error = StackError;

    fn try_from(fields: PrintFields) -> Result<Self> {
        let print = Print::new(fields.name, fields.set, fields.foil, fields.price)?
            .with_identity(fields.identity);
        Ok(match fields.collector_number {
            Some(number) => print.with_collector_number(number),
            None => print,
        })
    }
}

impl Print {
    /// Create a print.
    ///
    /// An empty `set` means the set is unknown. Fails with a validation error
    /// if the name is blank.
    pub fn new(
        name: impl Into<String>,
        set: impl Into<String>,
        foil: bool,
        price: Option<Price>,
    ) -> Result<Self> {
        Ok(Self {
            name: validate_name(name.into())?,
            set: set.into().trim().to_string(),
            foil,
            price,
            collector_number: None,
            identity: PrintIdentity::Standard,
        })
    }

    /// Upgrade a card to a print with default metadata: unknown set,
    /// non-foil, no price.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            name: card.name().to_string(),
            set: String::new(),
            foil: false,
            price: None,
            collector_number: None,
            identity: PrintIdentity::Standard,
        }
    }

    /// Downgrade to a card with the same name.
    #[must_use]
    pub fn to_card(&self) -> Card {
        Card {
            name: self.name.clone(),
        }
    }

    /// Attach a collector number (builder pattern).
    ///
    /// Blank numbers are treated as absent.
    #[must_use]
    pub fn with_collector_number(mut self, number: impl Into<String>) -> Self {
        let number = number.into();
        let number = number.trim();
        self.collector_number = (!number.is_empty()).then(|| number.to_string());
        self
    }

    /// Choose which fields take part in identity (builder pattern).
    #[must_use]
    pub fn with_identity(mut self, identity: PrintIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Set name; empty when unknown.
    #[must_use]
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Is this a foil printing?
    #[must_use]
    pub fn foil(&self) -> bool {
        self.foil
    }

    /// Price, if known.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Collector number, if known.
    #[must_use]
    pub fn collector_number(&self) -> Option<&str> {
        self.collector_number.as_deref()
    }

    /// Identity mode of this print.
    #[must_use]
    pub fn identity(&self) -> PrintIdentity {
        self.identity
    }
}

impl NamedCard for Print {
    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Print {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.set == other.set
            && self.foil == other.foil
            && self.price == other.price
            && self.identity == other.identity
            && (self.identity == PrintIdentity::Standard
                || self.collector_number == other.collector_number)
    }
}

impl Eq for Print {}

impl Hash for Print {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.name.hash(hasher);
        self.set.hash(hasher);
        self.foil.hash(hasher);
        self.price.hash(hasher);
        self.identity.hash(hasher);
        if self.identity == PrintIdentity::WithCollectorNumber {
            self.collector_number.hash(hasher);
        }
    }
}

impl std::fmt::Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.set.is_empty() {
            write!(f, " [{}]", self.set)?;
        }
        if self.foil {
            f.write_str(" (foil)")?;
        }
        if let Some(price) = self.price {
            write!(f, " @ {}", price)?;
        }
        Ok(())
    }
}
