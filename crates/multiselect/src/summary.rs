//! Trigger summary text.
//!
//! Lengths are measured in extended grapheme clusters so truncation never
//! splits a user-perceived character.

use std::borrow::Cow;

use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::option::OptionSet;

/// Longest joined summary shown without truncation.
pub const MAX_SUMMARY_LEN: usize = 60;

/// Characters kept when the summary is truncated.
pub const TRUNCATED_LEN: usize = 55;

/// Appended to a truncated summary.
pub const ELLIPSIS: &str = "...";

/// Separator between display names.
pub const SEPARATOR: &str = ", ";

/// Summary of the current selection for the trigger.
///
/// Returns `empty_label` for an empty selection, otherwise the selected
/// display names joined with `", "` and truncated by [`truncate`].
///
/// # Example
///
/// ```rust
/// use multiselect::{DropdownOption, OptionSet, summary::render_summary};
///
/// let options = OptionSet::new(vec![
///     DropdownOption::new("a", "Alpha"),
///     DropdownOption::new("b", "Beta"),
/// ])
/// .unwrap();
///
/// assert_eq!(render_summary(&[], &options, "None"), "None");
/// assert_eq!(render_summary(&["a".into()], &options, "None"), "Alpha");
/// ```
pub fn render_summary(selected: &[String], options: &OptionSet, empty_label: &str) -> String {
    if selected.is_empty() {
        return empty_label.to_string();
    }

    let names: Vec<&str> = selected
        .iter()
        .map(|key| match options.get(key) {
            Some(opt) => opt.display_name.as_str(),
            None => {
                warn!(value = %key, "selected value has no matching option");
                key.as_str()
            }
        })
        .collect();

    truncate(&names.join(SEPARATOR)).into_owned()
}

/// Cut `joined` to [`TRUNCATED_LEN`] characters plus [`ELLIPSIS`] when it
/// is longer than [`MAX_SUMMARY_LEN`].
pub fn truncate(joined: &str) -> Cow<'_, str> {
    let mut graphemes = joined.grapheme_indices(true);

    // Byte offset where the kept prefix ends, found in the same pass that
    // decides whether truncation is needed.
    let cut = graphemes.nth(TRUNCATED_LEN).map(|(idx, _)| idx);
    let Some(cut) = cut else {
        return Cow::Borrowed(joined);
    };

    let remaining = graphemes.count();
    if TRUNCATED_LEN + 1 + remaining <= MAX_SUMMARY_LEN {
        return Cow::Borrowed(joined);
    }

    let mut out = String::with_capacity(cut + ELLIPSIS.len());
    out.push_str(&joined[..cut]);
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}
