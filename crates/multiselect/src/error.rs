//! Error types for the dropdown component.

use thiserror::Error;

/// Errors reported by the dropdown and its option set.
///
/// Every variant describes a caller contract violation: a prop that is
/// missing, an option list that is malformed, or a value that does not refer
/// to any option. None of them come from I/O, so none are retried.
///
/// # Where they surface
///
/// | Variant | Reported by |
/// |--------------|-------------------|
/// | [`UnknownOption`](DropdownError::UnknownOption) | `set_selected`, `mount`, the selection reducer |
/// | [`DuplicateOption`](DropdownError::DuplicateOption) | `OptionSet::new`, `mount` |
/// | [`MissingProp`](DropdownError::MissingProp) | `mount` |
/// | [`AlreadyMounted`](DropdownError::AlreadyMounted) | `mount` |
///
/// # Example
///
/// ```rust
/// use multiselect::{DropdownError, DropdownOption, OptionSet};
///
/// let result = OptionSet::new(vec![
///     DropdownOption::new("a", "Alpha"),
///     DropdownOption::new("a", "Again"),
/// ]);
/// assert_eq!(result.unwrap_err(), DropdownError::DuplicateOption("a".into()));
/// ```
///
/// # Note on Clone and PartialEq
///
/// The error carries owned strings only so that it can derive `Clone` and
/// `PartialEq` for use in tests and in `last_error` bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DropdownError {
    /// A value (or display name) does not match any option.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// Two options share the same value.
    #[error("duplicate option value: {0}")]
    DuplicateOption(String),

    /// A required prop was never provided.
    #[error("missing required prop: {0}")]
    MissingProp(&'static str),

    /// `mount` was called on a component that is already mounted.
    #[error("component is already mounted")]
    AlreadyMounted,
}

impl DropdownError {
    /// Creates an unknown-option error for the given key.
    pub fn unknown_option(key: impl Into<String>) -> Self {
        Self::UnknownOption(key.into())
    }

    /// Returns true if this error names a value missing from the options.
    pub fn is_unknown_option(&self) -> bool {
        matches!(self, Self::UnknownOption(_))
    }

    /// Returns true if the error comes from malformed or missing props.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownOption(_) | Self::DuplicateOption(_) | Self::MissingProp(_)
        )
    }
}

/// A specialized [`Result`] type for dropdown operations.
pub type Result<T> = std::result::Result<T, DropdownError>;
