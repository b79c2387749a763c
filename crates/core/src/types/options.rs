//! Selected product options (customizations) attached to cart lines.
//!
//! Two cart lines for the same product are only merged when their selected
//! options are structurally equal. Equality here is recursive and ignores the
//! order in which keys were inserted, so `{color, size}` and `{size, color}`
//! with the same values describe the same customization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single option value.
///
/// Mirrors the JSON shapes customizations arrive in. `null` is not a valid
/// value; an absent customization is modelled as `Option<SelectedOptions>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A boolean flag (e.g., gift wrap).
    Bool(bool),
    /// A numeric choice (e.g., an engraving font size). Kept in the form it
    /// was supplied in, so `1` is written back as `1` and not `1.0`.
    Number(Number),
    /// A textual choice (e.g., `"red"`).
    Text(String),
    /// An ordered list of values (e.g., multi-select add-ons).
    List(Vec<OptionValue>),
    /// A nested group of options.
    Map(SelectedOptions),
}

impl OptionValue {
    /// Recursive structural comparison.
    ///
    /// Values of different kinds are never equal (`1` is not `"1"`). Numbers
    /// compare by value, so `1` equals `1.0`.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => numbers_equal(a, b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_equal(y))
            }
            (Self::Map(a), Self::Map(b)) => a.structurally_equal(b),
            _ => false,
        }
    }
}

/// Compare two JSON numbers by value.
///
/// Integers compare exactly; anything involving a float compares as `f64`.
#[allow(clippy::float_cmp)] // JSON numbers compare exactly
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        return matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y);
    }
    // One negative and one beyond `i64::MAX`.
    false
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_equal(other)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Number> for OptionValue {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for OptionValue {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

impl From<SelectedOptions> for OptionValue {
    fn from(options: SelectedOptions) -> Self {
        Self::Map(options)
    }
}

/// A mapping of option name to chosen value.
///
/// # Example
///
/// ```
/// use vitrine_core::SelectedOptions;
///
/// let a = SelectedOptions::new().with("color", "red").with("size", 42_i64);
/// let b = SelectedOptions::new().with("size", 42_i64).with("color", "red");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOptions(BTreeMap<String, OptionValue>);

impl SelectedOptions {
    /// Create an empty set of options.
    ///
    /// Note that an empty set is still a *present* customization and is
    /// distinct from no customization at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an option, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up an option by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Recursive structural comparison, independent of insertion order.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().all(|(name, value)| {
                other
                    .0
                    .get(name)
                    .is_some_and(|theirs| value.structurally_equal(theirs))
            })
    }
}

impl PartialEq for SelectedOptions {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_equal(other)
    }
}
