//! Property filters over stack entries.
//!
//! A filter is written `property:operator:value`, for example
//! `price:gte:10` or `name:contains:bolt`. Filters see the key of each
//! entry; counts are kept as they are.
//!
//! ## Properties
//!
//! - `name`: every key
//! - `set`, `foil`, `price`, `collector_number`: prints only
//!
//! A key without the property (a bare card, or a print with no price) never
//! matches, not even with `ne` or `not_in`.
//!
//! ## Set Membership
//!
//! `in` and `not_in` take a comma-separated list, e.g. `set:in:Alpha,Beta`
//! or `price:not_in:0.10,0.25`. Items are trimmed and blanks dropped.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::Stack;
use crate::cards::print::parse_flag;
use crate::cards::{CardKey, NamedCard};
use crate::error::{Result, StackError};

/// Card property a filter looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    Name,
    Set,
    Foil,
    Price,
    CollectorNumber,
}

impl FromStr for Property {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Property::Name),
            "set" => Ok(Property::Set),
            "foil" => Ok(Property::Foil),
            "price" => Ok(Property::Price),
            "collector_number" | "cn" => Ok(Property::CollectorNumber),
            _ => Err(StackError::InvalidFilter(format!("unknown property '{}'", s))),
        }
    }
}

/// Comparison a filter applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    /// Case-insensitive substring match (text properties only).
    Contains,
    Gt,
    Lt,
    Gte,
    Lte,
    /// Value is one of a comma-separated list.
    In,
    /// Value is none of a comma-separated list.
    NotIn,
}

impl FromStr for FilterOperator {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eq" => Ok(FilterOperator::Eq),
            "ne" => Ok(FilterOperator::Ne),
            "contains" => Ok(FilterOperator::Contains),
            "gt" => Ok(FilterOperator::Gt),
            "lt" => Ok(FilterOperator::Lt),
            "gte" => Ok(FilterOperator::Gte),
            "lte" => Ok(FilterOperator::Lte),
            "in" => Ok(FilterOperator::In),
            "not_in" => Ok(FilterOperator::NotIn),
            _ => Err(StackError::InvalidFilter(format!("unknown operator '{}'", s))),
        }
    }
}

impl FilterOperator {
    fn compare<T: Ord + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            FilterOperator::Eq => lhs == rhs,
            FilterOperator::Ne => lhs != rhs,
            FilterOperator::Gt => lhs > rhs,
            FilterOperator::Lt => lhs < rhs,
            FilterOperator::Gte => lhs >= rhs,
            FilterOperator::Lte => lhs <= rhs,
            FilterOperator::Contains | FilterOperator::In | FilterOperator::NotIn => false,
        }
    }

    fn member(self, found: bool) -> bool {
        match self {
            FilterOperator::In => found,
            FilterOperator::NotIn => !found,
            _ => false,
        }
    }

    fn takes_list(self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }
}

/// Filter operand, typed by the property it applies to.
#[derive(Clone, Debug, PartialEq)]
enum FilterValue {
    Text(String),
    TextList(Vec<String>),
    Flag(bool),
    Amount(Decimal),
    AmountList(Vec<Decimal>),
}

/// A single `property:operator:value` filter.
///
/// ## Example
///
/// ```
/// use card_stacks::cards::{CardKey, Print};
/// use card_stacks::stack::PropertyFilter;
///
/// let filter: PropertyFilter = "price:gte:10".parse().unwrap();
/// let pricey: CardKey = Print::new("Bolt", "Beta", false, Some("100".parse().unwrap()))
///     .unwrap()
///     .into();
///
/// assert!(filter.matches(&pricey));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyFilter {
    property: Property,
    operator: FilterOperator,
    value: FilterValue,
}

impl PropertyFilter {
    /// Create a filter, checking that the operator and value suit the property.
    pub fn new(property: Property, operator: FilterOperator, value: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            StackError::InvalidFilter(format!("{:?} {:?} '{}': {}", property, operator, value, reason))
        };

        let items = || {
            let items: Vec<&str> = value.split(',').map(str::trim).filter(|v| !v.is_empty()).collect();
            if items.is_empty() {
                Err(invalid("empty list"))
            } else {
                Ok(items)
            }
        };

        let value = match property {
            Property::Name | Property::Set | Property::CollectorNumber => {
                if operator.takes_list() {
                    FilterValue::TextList(items()?.into_iter().map(str::to_string).collect())
                } else {
                    FilterValue::Text(value.trim().to_string())
                }
            }
            Property::Foil => {
                if !matches!(operator, FilterOperator::Eq | FilterOperator::Ne) {
                    return Err(invalid("foil supports only eq and ne"));
                }
                FilterValue::Flag(parse_flag(value).ok_or_else(|| invalid("not a flag"))?)
            }
            Property::Price => {
                if operator == FilterOperator::Contains {
                    return Err(invalid("price does not support contains"));
                }
                let amount = |v: &str| Decimal::from_str(v).map_err(|_| invalid("not a number"));
                if operator.takes_list() {
                    FilterValue::AmountList(items()?.into_iter().map(amount).collect::<Result<_>>()?)
                } else {
                    FilterValue::Amount(amount(value.trim())?)
                }
            }
        };

        Ok(Self {
            property,
            operator,
            value,
        })
    }

    /// Property this filter looks at.
    #[must_use]
    pub fn property(&self) -> Property {
        self.property
    }

    /// Operator this filter applies.
    #[must_use]
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Check a single key.
    #[must_use]
    pub fn matches(&self, key: &CardKey) -> bool {
        let print = key.as_print();
        match self.property {
            Property::Name => self.text(key.name()),
            Property::Set => print.is_some_and(|p| self.text(p.set())),
            Property::CollectorNumber => print
                .and_then(|p| p.collector_number())
                .is_some_and(|cn| self.text(cn)),
            Property::Foil => match (&self.value, print) {
                (FilterValue::Flag(expected), Some(p)) => self.operator.compare(&p.foil(), expected),
                _ => false,
            },
            Property::Price => print
                .and_then(|p| p.price())
                .is_some_and(|price| self.amount(price.amount())),
        }
    }

    fn text(&self, actual: &str) -> bool {
        match (&self.value, self.operator) {
            (FilterValue::Text(expected), FilterOperator::Contains) => {
                actual.to_lowercase().contains(&expected.to_lowercase())
            }
            (FilterValue::Text(expected), op) => op.compare(actual, expected.as_str()),
            (FilterValue::TextList(options), op) => op.member(options.iter().any(|o| o == actual)),
            _ => false,
        }
    }

    fn amount(&self, actual: Decimal) -> bool {
        match &self.value {
            FilterValue::Amount(expected) => self.operator.compare(&actual, expected),
            FilterValue::AmountList(options) => self.operator.member(options.contains(&actual)),
            _ => false,
        }
    }
}

impl FromStr for PropertyFilter {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(property), Some(operator), Some(value)) => {
                PropertyFilter::new(property.parse()?, operator.parse()?, value)
            }
            _ => Err(StackError::InvalidFilter(s.to_string())),
        }
    }
}

impl Stack {
    /// Keep the entries whose key passes every filter.
    ///
    /// Counts and display order are preserved. No filters keeps everything.
    #[must_use]
    pub fn filter(&self, filters: &[PropertyFilter]) -> Stack {
        let mut result = Stack::new();
        for (key, count) in self.items() {
            if filters.iter().all(|f| f.matches(key)) {
                result.insert(key.clone(), count);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Print};
    use crate::error::ErrorKind;

    fn print(name: &str, set: &str, foil: bool, price: Option<&str>) -> CardKey {
        Print::new(name, set, foil, price.map(|p| p.parse().unwrap()))
            .unwrap()
            .into()
    }

    fn filter(s: &str) -> PropertyFilter {
        s.parse().unwrap()
    }

    fn sample() -> Stack {
        Stack::from_entries([
            (print("Lightning Bolt", "Beta", false, Some("100.00")), 1),
            (print("Lightning Bolt", "M10", true, Some("2.50")), 4),
            (print("Island", "Beta", false, None), 10),
            (Card::new("Counterspell").unwrap().into(), 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse() {
        let f = filter("price:gte:10");
        assert_eq!(f.property(), Property::Price);
        assert_eq!(f.operator(), FilterOperator::Gte);

        // Value may itself contain colons
        let f = filter("name:eq:Circle of Protection: Red");
        assert!(f.matches(&Card::new("Circle of Protection: Red").unwrap().into()));
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "name",
            "name:eq",
            "colour:eq:red",
            "name:like:x",
            "price:gt:cheap",
            "foil:gt:true",
            "price:contains:1",
            "foil:eq:maybe",
            "foil:in:true",
            "set:in: , ",
            "price:in:1,cheap",
        ] {
            let err = bad.parse::<PropertyFilter>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{}", bad);
        }
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let result = sample().filter(&[filter("name:contains:BOLT")]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.total(), 5);
    }

    #[test]
    fn test_price_range() {
        let result = sample().filter(&[filter("price:gte:1"), filter("price:lt:50")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn test_cards_lack_print_properties() {
        let counterspell: CardKey = Card::new("Counterspell").unwrap().into();

        assert!(!filter("set:eq:Beta").matches(&counterspell));
        assert!(!filter("foil:eq:false").matches(&counterspell));
        assert!(!filter("price:lt:1000").matches(&counterspell));
        assert!(filter("name:eq:Counterspell").matches(&counterspell));
    }

    #[test]
    fn test_missing_price_never_matches() {
        let island = print("Island", "Beta", false, None);
        assert!(!filter("price:lt:1").matches(&island));
        assert!(!filter("price:ne:1").matches(&island));
    }

    #[test]
    fn test_foil_and_set() {
        let foils = sample().filter(&[filter("foil:eq:yes")]);
        assert_eq!(foils.total(), 4);

        let beta = sample().filter(&[filter("set:eq:Beta")]);
        assert_eq!(beta.len(), 2);
    }

    #[test]
    fn test_set_membership() {
        let old = sample().filter(&[filter("set:in:Beta, Alpha")]);
        assert_eq!(old.len(), 2);
        assert_eq!(old.total(), 11);

        let not_beta = sample().filter(&[filter("set:not_in:Beta")]);
        assert_eq!(not_beta.len(), 1);
        assert_eq!(not_beta.total(), 4);

        let named = sample().filter(&[filter("name:in:Island,Counterspell,")]);
        assert_eq!(named.total(), 12);
    }

    #[test]
    fn test_price_membership() {
        let result = sample().filter(&[filter("price:in:100,2.5")]);
        assert_eq!(result.len(), 2);

        let result = sample().filter(&[filter("price:not_in:100")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn test_collector_number() {
        let key: CardKey = Print::new("Bolt", "Beta", false, None)
            .unwrap()
            .with_collector_number("161")
            .into();

        assert!(filter("cn:eq:161").matches(&key));
        assert!(!filter("collector_number:eq:162").matches(&key));
        assert!(!filter("cn:eq:161").matches(&print("Bolt", "Beta", false, None)));
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        assert_eq!(sample().filter(&[]), sample());
    }
}
