//! Stacks: multisets of cards and their algebra.
//!
//! A `Stack` maps each [`CardKey`] to a positive count. Every operation
//! returns a new stack and leaves its inputs untouched, so one stack can feed
//! several operations. Cloning is O(1) thanks to `im` persistent structures.
//!
//! ## Operations
//!
//! - `union`: counts add up
//! - `intersection`: keys present in both, minimum count
//! - `difference`: what is left of the left operand after removing the right
//!
//! ## Display Order
//!
//! Entries keep first-seen order. Results list left-operand keys first, then
//! keys that only the right operand contributed. Order never affects
//! equality: two stacks are equal when they hold the same keys with the same
//! counts.
//!
//! ## Identity Domains
//!
//! Keys are compared with their own equality, so `Card("Bolt")` and a
//! `Print` of "Bolt" stay separate entries. Normalize with [`Stack::to_cards`]
//! or [`Stack::to_prints`] before combining stacks from different formats if
//! they should merge.

pub mod filter;

pub use filter::{FilterOperator, Property, PropertyFilter};

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{CardKey, KeyDomain, NamedCard};
use crate::error::{Result, StackError};

/// A multiset of cards.
///
/// ## Example
///
/// ```
/// use card_stacks::cards::{Card, CardKey};
/// use card_stacks::stack::Stack;
///
/// let bolt: CardKey = Card::new("Lightning Bolt").unwrap().into();
/// let island: CardKey = Card::new("Island").unwrap().into();
///
/// let a = Stack::from_entries([(bolt.clone(), 4), (island.clone(), 2)]).unwrap();
/// let b = Stack::from_entries([(bolt.clone(), 2)]).unwrap();
///
/// assert_eq!(a.union(&b).count(&bolt), 6);
/// assert_eq!(a.intersection(&b).count(&bolt), 2);
/// assert_eq!(a.difference(&b).total(), 4);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<StackEntry>", into = "Vec<StackEntry>")]
pub struct Stack {
    /// Count per key. Never holds a zero.
    counts: ImHashMap<CardKey, usize>,

    /// Keys in first-seen order.
    order: Vector<CardKey>,

    /// Sum of all counts. Bounds every single count, so checking it is
    /// enough to rule out overflow.
    total: usize,
}

/// One `(card, count)` entry, as serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    pub card: CardKey,
    pub count: usize,
}

impl Stack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from `(key, count)` pairs.
    ///
    /// Repeated keys accumulate. A zero count is a validation error.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, usize)>,
        K: Into<CardKey>,
    {
        let mut stack = Self::new();
        for (key, count) in entries {
            let key = key.into();
            if count == 0 {
                return Err(StackError::validation(format!(
                    "Count must be positive for '{}'",
                    key.name()
                )));
            }
            stack.try_insert(key, count)?;
        }
        Ok(stack)
    }

    /// Add copies of one key.
    ///
    /// Returns a new stack; `self` is unchanged.
    pub fn with(&self, key: impl Into<CardKey>, count: usize) -> Result<Self> {
        let key = key.into();
        if count == 0 {
            return Err(StackError::validation(format!(
                "Count must be positive for '{}'",
                key.name()
            )));
        }
        let mut stack = self.clone();
        stack.try_insert(key, count)?;
        Ok(stack)
    }

    /// Remove up to `count` copies of one key.
    ///
    /// Returns a new stack. The key disappears once its count reaches zero.
    #[must_use]
    pub fn without(&self, key: &CardKey, count: usize) -> Self {
        let current = self.count(key);
        if current == 0 || count == 0 {
            return self.clone();
        }

        let mut stack = self.clone();
        if count >= current {
            stack.counts.remove(key);
            stack.order.retain(|k| k != key);
            stack.total -= current;
        } else {
            stack.counts.insert(key.clone(), current - count);
            stack.total -= count;
        }
        stack
    }

    /// Add to a stack under construction, failing if the total would
    /// overflow.
    pub(crate) fn try_insert(&mut self, key: CardKey, count: usize) -> Result<()> {
        if self.total.checked_add(count).is_none() {
            return Err(StackError::validation(format!(
                "Card count overflow adding {} x '{}'",
                count,
                key.name()
            )));
        }
        self.insert(key, count);
        Ok(())
    }

    /// Add to a stack under construction. The caller guarantees the new
    /// total fits, e.g. because the result is a subset or a regrouping of an
    /// existing stack.
    fn insert(&mut self, key: CardKey, count: usize) {
        debug_assert!(count > 0);
        if let Some(current) = self.counts.get_mut(&key) {
            *current += count;
        } else {
            self.order.push_back(key.clone());
            self.counts.insert(key, count);
        }
        self.total += count;
    }

    // === Algebra ===

    /// Multiset union: counts add up.
    ///
    /// Commutative and associative; the empty stack is the identity.
    ///
    /// # Panics
    ///
    /// Panics if the combined total overflows `usize`. Use
    /// [`Stack::checked_union`] for untrusted input.
    #[must_use]
    pub fn union(&self, other: &Stack) -> Stack {
        match self.checked_union(other) {
            Ok(result) => result,
            Err(e) => panic!("{}", e),
        }
    }

    /// Multiset union that fails with a validation error instead of
    /// overflowing.
    pub fn checked_union(&self, other: &Stack) -> Result<Stack> {
        if self.total.checked_add(other.total).is_none() {
            return Err(StackError::validation(format!(
                "Card count overflow: union of {} and {} cards",
                self.total, other.total
            )));
        }
        let mut result = self.clone();
        for (key, count) in other.items() {
            result.insert(key.clone(), count);
        }
        Ok(result)
    }

    /// Multiset intersection: keys in both stacks, with the smaller count.
    ///
    /// Commutative; the empty stack absorbs everything.
    #[must_use]
    pub fn intersection(&self, other: &Stack) -> Stack {
        let mut result = Stack::new();
        for (key, count) in self.items() {
            let shared = count.min(other.count(key));
            if shared > 0 {
                result.insert(key.clone(), shared);
            }
        }
        result
    }

    /// Multiset difference: `self` minus `other`, key by key.
    ///
    /// Keys fully matched by `other` are dropped. Not commutative.
    #[must_use]
    pub fn difference(&self, other: &Stack) -> Stack {
        let mut result = Stack::new();
        for (key, count) in self.items() {
            let remaining = count.saturating_sub(other.count(key));
            if remaining > 0 {
                result.insert(key.clone(), remaining);
            }
        }
        result
    }

    // === Queries ===

    /// Copies of `key` in the stack (0 if absent).
    #[must_use]
    pub fn count(&self, key: &CardKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Check if the stack holds at least one copy of `key`.
    #[must_use]
    pub fn contains(&self, key: &CardKey) -> bool {
        self.counts.contains_key(key)
    }

    /// Distinct keys in display order.
    #[must_use]
    pub fn unique_cards(&self) -> Vec<&CardKey> {
        self.order.iter().collect()
    }

    /// Total number of cards (sum of all counts).
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(key, count)` pairs in display order.
    pub fn items(&self) -> impl Iterator<Item = (&CardKey, usize)> + '_ {
        self.order.iter().map(move |key| (key, self.count(key)))
    }

    /// Alias for [`Stack::items`].
    pub fn iter(&self) -> impl Iterator<Item = (&CardKey, usize)> + '_ {
        self.items()
    }

    /// Distinct card names in display order.
    ///
    /// Keys from different domains or printings that share a name appear once.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.order
            .iter()
            .map(|key| key.name())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Sub-stack of the entries equal to `query`.
    #[must_use]
    pub fn matching(&self, query: &CardKey) -> Stack {
        let mut result = Stack::new();
        if let Some(&count) = self.counts.get(query) {
            result.insert(query.clone(), count);
        }
        result
    }

    // === Identity domains ===

    /// The domain shared by every key.
    ///
    /// `None` for an empty stack or one that mixes cards and prints.
    #[must_use]
    pub fn domain(&self) -> Option<KeyDomain> {
        let mut domains = self.order.iter().map(CardKey::domain);
        let first = domains.next()?;
        domains.all(|d| d == first).then_some(first)
    }

    /// Check if the stack holds both cards and prints.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        !self.is_empty() && self.domain().is_none()
    }

    /// Normalize every key into the card domain, merging counts by name.
    #[must_use]
    pub fn to_cards(&self) -> Stack {
        self.map_keys(CardKey::to_card)
    }

    /// Normalize every key into the print domain.
    ///
    /// Cards become prints with default metadata and merge with any equal
    /// print already present.
    #[must_use]
    pub fn to_prints(&self) -> Stack {
        self.map_keys(CardKey::to_print)
    }

    fn map_keys(&self, f: impl Fn(&CardKey) -> CardKey) -> Stack {
        let mut result = Stack::new();
        for (key, count) in self.items() {
            result.insert(f(key), count);
        }
        result
    }
}

impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items().all(|(key, count)| other.count(key) == count)
    }
}

impl Eq for Stack {}

impl<K: Into<CardKey>> FromIterator<K> for Stack {
    /// Each item counts as one copy.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut stack = Stack::new();
        for key in iter {
            stack.insert(key.into(), 1);
        }
        stack
    }
}

impl TryFrom<Vec<StackEntry>> for Stack {
    type Error = StackError;

    fn try_from(entries: Vec<StackEntry>) -> Result<Self> {
        Stack::from_entries(entries.into_iter().map(|e| (e.card, e.count)))
    }
}

impl From<Stack> for Vec<StackEntry> {
    fn from(stack: Stack) -> Self {
        stack
            .items()
            .map(|(card, count)| StackEntry {
                card: card.clone(),
                count,
            })
            .collect()
    }
}

impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("Stack(empty)");
        }
        f.write_str("Stack(")?;
        for (key, count) in self.items() {
            write!(f, "\n  {}x {}", count, key)?;
        }
        f.write_str("\n)")
    }
}
