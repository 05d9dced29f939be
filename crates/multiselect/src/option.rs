//! Dropdown options and typed option lookup.
//!
//! Options are identified by `value`. Callers sometimes hand the dropdown a
//! display name where a value is expected, so [`OptionSet::find`] falls back
//! to a second index keyed by display name and reports which index matched.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DropdownError, Result};

/// Per-option change handler, called as `(checked, value)`.
pub type OptionHandler = Arc<dyn Fn(bool, &str) + Send + Sync>;

/// A selectable entry in the dropdown menu.
///
/// # Example
///
/// ```rust
/// use multiselect::DropdownOption;
///
/// let plain = DropdownOption::new("rust", "Rust");
/// assert!(!plain.has_handler());
///
/// let custom = DropdownOption::new("other", "Other").with_on_change(|checked, value| {
///     println!("{value} -> {checked}");
/// });
/// assert!(custom.has_handler());
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Unique value identifying this option.
    pub value: String,
    /// Human-readable label.
    pub display_name: String,
    #[serde(skip)]
    on_change: Option<OptionHandler>,
}

impl DropdownOption {
    /// Creates a new option without a custom handler.
    pub fn new(value: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_name: display_name.into(),
            on_change: None,
        }
    }

    /// Route changes of this option to `handler` instead of the dropdown's
    /// `on_change`.
    #[must_use]
    pub fn with_on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(bool, &str) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Whether this option overrides the dropdown's `on_change`.
    pub fn has_handler(&self) -> bool {
        self.on_change.is_some()
    }

    /// The custom handler, if any.
    pub fn handler(&self) -> Option<&OptionHandler> {
        self.on_change.as_ref()
    }
}

impl fmt::Debug for DropdownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownOption")
            .field("value", &self.value)
            .field("display_name", &self.display_name)
            .field("has_handler", &self.has_handler())
            .finish()
    }
}

impl PartialEq for DropdownOption {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.display_name == other.display_name
            && self.has_handler() == other.has_handler()
    }
}

/// Which index resolved a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPath {
    /// The key matched an option value.
    Value,
    /// The key matched a display name only.
    DisplayName,
}

/// Ordered option list with value and display-name indexes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DropdownOption>", into = "Vec<DropdownOption>")]
pub struct OptionSet {
    options: Vec<DropdownOption>,
    #[serde(skip)]
    by_value: HashMap<String, usize>,
    #[serde(skip)]
    by_display_name: HashMap<String, usize>,
}

impl OptionSet {
    /// Builds the set, rejecting duplicate values.
    ///
    /// Duplicate display names are allowed; the first option wins lookups.
    pub fn new(options: Vec<DropdownOption>) -> Result<Self> {
        let mut by_value = HashMap::with_capacity(options.len());
        let mut by_display_name = HashMap::with_capacity(options.len());

        for (i, opt) in options.iter().enumerate() {
            if by_value.insert(opt.value.clone(), i).is_some() {
                return Err(DropdownError::DuplicateOption(opt.value.clone()));
            }
            by_display_name.entry(opt.display_name.clone()).or_insert(i);
        }

        Ok(Self {
            options,
            by_value,
            by_display_name,
        })
    }

    /// Resolve a key by value, then by display name.
    pub fn find(&self, key: &str) -> Option<(&DropdownOption, LookupPath)> {
        self.index_of(key)
            .map(|(i, path)| (&self.options[i], path))
    }

    /// Resolve a key, ignoring which index matched.
    pub fn get(&self, key: &str) -> Option<&DropdownOption> {
        self.find(key).map(|(opt, _)| opt)
    }

    /// Position of the option a key resolves to.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index_of(key).map(|(i, _)| i)
    }

    fn index_of(&self, key: &str) -> Option<(usize, LookupPath)> {
        if let Some(&i) = self.by_value.get(key) {
            return Some((i, LookupPath::Value));
        }
        self.by_display_name
            .get(key)
            .map(|&i| (i, LookupPath::DisplayName))
    }

    /// Check that every selected key resolves to an option.
    pub fn validate_selection(&self, selected: &[String]) -> Result<()> {
        match selected.iter().find(|key| self.index_of(key).is_none()) {
            Some(missing) => Err(DropdownError::unknown_option(missing.as_str())),
            None => Ok(()),
        }
    }

    /// Options in display order.
    pub fn as_slice(&self) -> &[DropdownOption] {
        &self.options
    }

    /// Iterate options in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, DropdownOption> {
        self.options.iter()
    }

    /// Option at a display position.
    pub fn at(&self, index: usize) -> Option<&DropdownOption> {
        self.options.get(index)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the set has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl TryFrom<Vec<DropdownOption>> for OptionSet {
    type Error = DropdownError;

    fn try_from(options: Vec<DropdownOption>) -> Result<Self> {
        Self::new(options)
    }
}

impl From<OptionSet> for Vec<DropdownOption> {
    fn from(set: OptionSet) -> Self {
        set.options
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a DropdownOption;
    type IntoIter = std::slice::Iter<'a, DropdownOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
