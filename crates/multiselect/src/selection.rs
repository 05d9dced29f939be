//! Selection reducer.
//!
//! Turns one checkbox change into either a proposed new selection for the
//! owner or a delegation to the option's own handler. Nothing here touches
//! component state or invokes callbacks; [`SelectionOutcome::dispatch`] does
//! that on behalf of the dropdown.

use std::fmt;

use crate::error::{DropdownError, Result};
use crate::option::{OptionHandler, OptionSet};

/// What a checkbox change should do.
#[derive(Clone)]
pub enum SelectionOutcome {
    /// The option handles its own changes; the owner's `on_change` is skipped.
    Delegated {
        /// The option's handler.
        handler: OptionHandler,
        /// New checkbox state.
        checked: bool,
        /// Canonical value of the option.
        value: String,
    },
    /// A new selection to hand to the owner's `on_change`.
    Proposed(Vec<String>),
}

impl SelectionOutcome {
    /// The proposed selection, if this outcome is not a delegation.
    pub fn proposed(&self) -> Option<&[String]> {
        match self {
            Self::Proposed(next) => Some(next),
            Self::Delegated { .. } => None,
        }
    }

    /// Whether the change is delegated to the option's handler.
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated { .. })
    }

    /// Invoke the handler this outcome targets.
    pub fn dispatch(self, on_change: impl FnOnce(Vec<String>)) {
        match self {
            Self::Delegated {
                handler,
                checked,
                value,
            } => handler(checked, &value),
            Self::Proposed(next) => on_change(next),
        }
    }
}

impl fmt::Debug for SelectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delegated { checked, value, .. } => f
                .debug_struct("Delegated")
                .field("checked", checked)
                .field("value", value)
                .finish_non_exhaustive(),
            Self::Proposed(next) => f.debug_tuple("Proposed").field(next).finish(),
        }
    }
}

/// Reduce a checkbox change against the current selection.
///
/// `changed` may be an option value or a display name. The returned
/// selection is always a fresh vector; `current` is never modified.
///
/// # Errors
///
/// [`DropdownError::UnknownOption`] when `changed` matches no option.
///
/// # Example
///
/// ```rust
/// use multiselect::{DropdownOption, OptionSet, selection::reduce};
///
/// let options = OptionSet::new(vec![
///     DropdownOption::new("a", "Alpha"),
///     DropdownOption::new("b", "Beta"),
/// ])
/// .unwrap();
///
/// let outcome = reduce("b", true, &["a".to_string()], &options).unwrap();
/// assert_eq!(outcome.proposed(), Some(&["a".to_string(), "b".to_string()][..]));
/// ```
pub fn reduce(
    changed: &str,
    checked: bool,
    current: &[String],
    options: &OptionSet,
) -> Result<SelectionOutcome> {
    let option = options
        .get(changed)
        .ok_or_else(|| DropdownError::unknown_option(changed))?;

    if let Some(handler) = option.handler() {
        return Ok(SelectionOutcome::Delegated {
            handler: handler.clone(),
            checked,
            value: option.value.clone(),
        });
    }

    Ok(SelectionOutcome::Proposed(toggle(
        current,
        &option.value,
        checked,
    )))
}

/// Add or remove `value`: appended once when checking an absent value,
/// every occurrence removed when unchecking a present one, otherwise an
/// unchanged copy.
pub fn toggle(current: &[String], value: &str, checked: bool) -> Vec<String> {
    let present = current.iter().any(|v| v == value);

    if checked && !present {
        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend_from_slice(current);
        next.push(value.to_string());
        next
    } else if !checked && present {
        current.iter().filter(|v| *v != value).cloned().collect()
    } else {
        current.to_vec()
    }
}
