//! The multiselect dropdown component.
//!
//! A trigger showing a summary of the selection, a clear-all control shown
//! while anything is selected, and a checkbox menu shown while open. The
//! component is fully controlled: it never edits its own selection, it
//! proposes new selections through `on_change` and the owner pushes the
//! accepted value back with [`MultiselectDropdown::set_selected`].
//!
//! # Layout
//!
//! ```text
//! Languages                      row 0: label
//! [ Rust, Go ▾ ] [Clear all]     row 1: trigger and clear-all
//!   [x] Rust                     rows 2..: menu, only while open
//!   [ ] Python
//!   [x] Go
//! ```
//!
//! The focused control is drawn with angle brackets (`< Rust ▾ >`,
//! `<Clear all>`, `<x> Rust`) so focus never changes the layout.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use unicode_width::UnicodeWidthStr;

use crate::Model;
use crate::command::Cmd;
use crate::document::{Document, DocumentKeyMsg, KeyListener, ListenerId};
use crate::error::{DropdownError, Result};
use crate::key::KeyMsg;
use crate::keymap::{KeyMap, matches};
use crate::message::{BlurMsg, FocusMsg, Message};
use crate::mouse::MouseMsg;
use crate::option::{DropdownOption, OptionSet};
use crate::selection::reduce;
use crate::summary::render_summary;

/// Owner callback receiving each proposed selection.
pub type ChangeHandler = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// Owner callback for focus leaving the widget.
pub type BlurHandler = Arc<dyn Fn() + Send + Sync>;

/// Element id of the label.
pub const LABEL_ID: &str = "multiselect-dropdown-label";
/// Element id of the trigger.
pub const BUTTON_ID: &str = "multiselect-dropdown-button";
/// Element id of the clear-all control.
pub const CLEAR_ID: &str = "unselect-button";
/// Element id of the menu fieldset.
pub const FIELDSET_ID: &str = "multiselect-dropdown-fieldset";

/// Element id of the row holding an option.
pub fn option_container_id(value: &str) -> String {
    format!("{value}-option-container")
}

/// Element id of an option's checkbox.
pub fn option_checkbox_id(value: &str) -> String {
    format!("{value}-option-checkbox")
}

const CLEAR_LABEL: &str = "Clear all";
const DROPDOWN_ARROW: &str = "▾";
const TRIGGER_ROW: u16 = 1;
const MENU_ROW: u16 = 2;
const OPTION_INDENT: &str = "  ";

/// Which inner element holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is outside the widget.
    #[default]
    None,
    /// The trigger.
    Trigger,
    /// The clear-all control.
    ClearAll,
    /// The checkbox at this menu position.
    Option(usize),
}

impl Focus {
    /// Whether any element of the widget is focused.
    pub fn is_focused(self) -> bool {
        self != Self::None
    }
}

/// A clickable area of the rendered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The trigger.
    Trigger,
    /// The clear-all control.
    ClearAll,
    /// The option row at this menu position.
    Option(usize),
}

impl From<Region> for Focus {
    fn from(region: Region) -> Self {
        match region {
            Region::Trigger => Self::Trigger,
            Region::ClearAll => Self::ClearAll,
            Region::Option(i) => Self::Option(i),
        }
    }
}

/// Accessibility attributes of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AriaAttributes {
    /// `aria-haspopup`.
    pub has_popup: &'static str,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-labelledby`.
    pub labelled_by: &'static str,
}

/// Asks the dropdown owning `listener` to focus its trigger.
///
/// Returned as a command after an Escape close so focus moves only once the
/// menu is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTriggerMsg {
    /// Registration of the dropdown the message is for.
    pub listener: ListenerId,
}

/// A multiselect dropdown.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use multiselect::{Document, DropdownOption, MultiselectDropdown};
///
/// let proposed = Arc::new(Mutex::new(Vec::new()));
/// let sink = proposed.clone();
///
/// let doc = Document::new();
/// let mut dropdown = MultiselectDropdown::new()
///     .label("Greek")
///     .empty_label("None")
///     .options(vec![
///         DropdownOption::new("a", "Alpha"),
///         DropdownOption::new("b", "Beta"),
///     ])
///     .selected(vec!["a".into()])
///     .on_change(move |next| sink.lock().unwrap().push(next));
/// dropdown.mount(&doc).unwrap();
///
/// assert_eq!(dropdown.summary(), "Alpha");
/// dropdown.toggle_option("b", true).unwrap();
/// assert_eq!(proposed.lock().unwrap()[0], vec!["a".to_string(), "b".to_string()]);
/// ```
pub struct MultiselectDropdown {
    label: String,
    empty_label: String,
    options: OptionSet,
    options_given: bool,
    options_error: Option<DropdownError>,
    selected: Vec<String>,
    on_change: Option<ChangeHandler>,
    on_blur: Option<BlurHandler>,
    keymap: KeyMap,
    open: bool,
    focus: Focus,
    listener: Option<KeyListener>,
    last_error: Option<DropdownError>,
}

impl Default for MultiselectDropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiselectDropdown {
    /// Creates a closed, unmounted dropdown with no options.
    pub fn new() -> Self {
        Self {
            label: String::new(),
            empty_label: String::new(),
            options: OptionSet::default(),
            options_given: false,
            options_error: None,
            selected: Vec::new(),
            on_change: None,
            on_blur: None,
            keymap: KeyMap::default(),
            open: false,
            focus: Focus::None,
            listener: None,
            last_error: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the summary shown when nothing is selected.
    #[must_use]
    pub fn empty_label(mut self, empty_label: impl Into<String>) -> Self {
        self.empty_label = empty_label.into();
        self
    }

    /// Sets the options. Duplicate values are reported by [`mount`](Self::mount).
    #[must_use]
    pub fn options(mut self, options: Vec<DropdownOption>) -> Self {
        self.options_given = true;
        match OptionSet::new(options) {
            Ok(set) => {
                self.options = set;
                self.options_error = None;
            }
            Err(err) => {
                self.options = OptionSet::default();
                self.options_error = Some(err);
            }
        }
        self
    }

    /// Sets an already validated option set.
    #[must_use]
    pub fn option_set(mut self, options: OptionSet) -> Self {
        self.options_given = true;
        self.options_error = None;
        self.options = options;
        self
    }

    /// Sets the initial selection. Unknown values are reported by
    /// [`mount`](Self::mount).
    #[must_use]
    pub fn selected(mut self, selected: Vec<String>) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the callback receiving proposed selections.
    #[must_use]
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<String>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Sets the callback for focus leaving the widget.
    #[must_use]
    pub fn on_blur<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_blur = Some(Arc::new(f));
        self
    }

    /// Replaces the keybindings.
    #[must_use]
    pub fn keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// The label text.
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// The empty-selection summary.
    pub fn get_empty_label(&self) -> &str {
        &self.empty_label
    }

    /// The options.
    pub fn get_options(&self) -> &OptionSet {
        &self.options
    }

    /// The current (owner-controlled) selection.
    pub fn get_selected(&self) -> &[String] {
        &self.selected
    }

    /// The keybindings.
    pub fn get_keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Which element holds focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether the keydown listener is attached.
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// The active listener registration.
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(KeyListener::id)
    }

    /// The most recent error swallowed while handling input.
    pub fn last_error(&self) -> Option<&DropdownError> {
        self.last_error.as_ref()
    }

    /// Whether the clear-all control is rendered.
    pub fn shows_clear_all(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Whether the option at `key` is checked.
    pub fn is_checked(&self, key: &str) -> bool {
        self.options
            .get(key)
            .is_some_and(|opt| self.selected.iter().any(|v| *v == opt.value))
    }

    /// Trigger summary text.
    pub fn summary(&self) -> String {
        render_summary(&self.selected, &self.options, &self.empty_label)
    }

    /// Accessibility attributes of the trigger.
    pub fn aria(&self) -> AriaAttributes {
        AriaAttributes {
            has_popup: "true",
            expanded: self.open,
            labelled_by: "multiselect-dropdown-label multiselect-dropdown-button",
        }
    }

    /// Element id of a region. `None` for an option position past the end.
    pub fn element_id(&self, region: Region) -> Option<String> {
        match region {
            Region::Trigger => Some(BUTTON_ID.to_string()),
            Region::ClearAll => Some(CLEAR_ID.to_string()),
            Region::Option(i) => self.options.at(i).map(|opt| option_checkbox_id(&opt.value)),
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Validates the props and attaches the document keydown listener.
    ///
    /// # Errors
    ///
    /// - [`DropdownError::AlreadyMounted`] if already mounted.
    /// - [`DropdownError::MissingProp`] without options or `on_change`.
    /// - [`DropdownError::DuplicateOption`] if two options share a value.
    /// - [`DropdownError::UnknownOption`] if a selected value has no option.
    pub fn mount(&mut self, document: &Document) -> Result<()> {
        if self.listener.is_some() {
            return Err(DropdownError::AlreadyMounted);
        }
        if let Some(err) = &self.options_error {
            return Err(err.clone());
        }
        if !self.options_given {
            return Err(DropdownError::MissingProp("options"));
        }
        if self.on_change.is_none() {
            return Err(DropdownError::MissingProp("on_change"));
        }
        self.options.validate_selection(&self.selected)?;

        let listener = document.add_keydown_listener();
        debug!(listener = %listener.id(), "multiselect mounted");
        self.listener = Some(listener);
        Ok(())
    }

    /// Detaches the keydown listener. Returns whether it was attached.
    pub fn unmount(&mut self) -> bool {
        match self.listener.take() {
            Some(listener) => {
                debug!(listener = %listener.id(), "multiselect unmounted");
                listener.release();
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Pushes the owner's current selection.
    ///
    /// # Errors
    ///
    /// [`DropdownError::UnknownOption`] if a value has no option; the
    /// previous selection is kept.
    pub fn set_selected(&mut self, selected: Vec<String>) -> Result<()> {
        if self.options_given {
            self.options.validate_selection(&selected)?;
        }
        self.selected = selected;
        self.normalize_focus();
        Ok(())
    }

    /// Opens the menu.
    pub fn open(&mut self) {
        if !self.open {
            debug!("multiselect opened");
        }
        self.open = true;
    }

    /// Closes the menu.
    pub fn close(&mut self) {
        if self.open {
            debug!("multiselect closed");
        }
        self.open = false;
        self.normalize_focus();
    }

    /// Opens a closed menu or closes an open one.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Feeds one checkbox change through the reducer and invokes the
    /// handler it selects.
    ///
    /// # Errors
    ///
    /// [`DropdownError::UnknownOption`] if `key` matches no option; no
    /// callback runs.
    pub fn toggle_option(&mut self, key: &str, checked: bool) -> Result<()> {
        let outcome = reduce(key, checked, &self.selected, &self.options)?;
        debug!(key, checked, delegated = outcome.is_delegated(), "option toggled");

        let on_change = self.on_change.clone();
        outcome.dispatch(|next| {
            if let Some(on_change) = on_change {
                on_change(next);
            }
        });
        Ok(())
    }

    /// Proposes an empty selection and focuses the trigger. The menu's open
    /// state is left alone.
    pub fn clear_all(&mut self) {
        debug!(cleared = self.selected.len(), "clear all");
        if let Some(on_change) = &self.on_change {
            on_change(Vec::new());
        }
        self.focus = Focus::Trigger;
    }

    fn blur(&mut self) {
        self.focus = Focus::None;
        if let Some(on_blur) = &self.on_blur {
            on_blur();
        }
    }

    fn record(&mut self, result: Result<()>) {
        if let Err(err) = result {
            warn!(error = %err, "ignoring checkbox change");
            self.last_error = Some(err);
        }
    }

    // ---------------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------------

    /// Focusable elements in tab order.
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Trigger];
        if self.shows_clear_all() {
            order.push(Focus::ClearAll);
        }
        if self.open {
            order.extend((0..self.options.len()).map(Focus::Option));
        }
        order
    }

    /// Moves focus along the tab order. Stepping past either end leaves the
    /// widget so the host can focus the next field.
    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let next = match order.iter().position(|f| *f == self.focus) {
            Some(i) if forward => Some(i + 1),
            Some(i) => i.checked_sub(1),
            None => Some(0),
        };
        match next.and_then(|i| order.get(i)) {
            Some(&focus) => {
                self.focus = focus;
                trace!(focus = ?self.focus, "focus moved");
            }
            None => {
                trace!("focus left widget");
                self.blur();
            }
        }
    }

    /// Moves focus off elements that are no longer rendered.
    fn normalize_focus(&mut self) {
        let gone = match self.focus {
            Focus::ClearAll => !self.shows_clear_all(),
            Focus::Option(i) => !self.open || i >= self.options.len(),
            Focus::None | Focus::Trigger => false,
        };
        if gone {
            self.focus = Focus::Trigger;
        }
    }

    fn activate(&mut self, target: Focus) {
        match target {
            Focus::None => {}
            Focus::Trigger => self.toggle(),
            Focus::ClearAll => self.clear_all(),
            Focus::Option(i) => {
                let Some(value) = self.options.at(i).map(|opt| opt.value.clone()) else {
                    return;
                };
                let checked = !self.is_checked(&value);
                let result = self.toggle_option(&value, checked);
                self.record(result);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Rendering and hit testing
    // ---------------------------------------------------------------------

    fn trigger_text(&self) -> String {
        let (l, r) = brackets(self.focus == Focus::Trigger);
        format!("{l} {} {DROPDOWN_ARROW} {r}", self.summary())
    }

    fn clear_text(&self) -> String {
        let (l, r) = brackets(self.focus == Focus::ClearAll);
        format!("{l}{CLEAR_LABEL}{r}")
    }

    fn option_text(&self, index: usize, opt: &DropdownOption) -> String {
        let (l, r) = brackets(self.focus == Focus::Option(index));
        let mark = if self.is_checked(&opt.value) { 'x' } else { ' ' };
        format!("{OPTION_INDENT}{l}{mark}{r} {}", opt.display_name)
    }

    /// Which region a widget-relative cell belongs to.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Region> {
        let x = usize::from(x);
        match y {
            TRIGGER_ROW => {
                let trigger_width = self.trigger_text().width();
                if x < trigger_width {
                    return Some(Region::Trigger);
                }
                let clear_start = trigger_width + 1;
                let clear_end = clear_start + self.clear_text().width();
                (self.shows_clear_all() && (clear_start..clear_end).contains(&x))
                    .then_some(Region::ClearAll)
            }
            row if row >= MENU_ROW && self.open => {
                let index = usize::from(row - MENU_ROW);
                let opt = self.options.at(index)?;
                (x < self.option_text(index, opt).width()).then_some(Region::Option(index))
            }
            _ => None,
        }
    }

    /// Whether a widget-relative cell lies inside the rendered widget, i.e.
    /// within its rows and no wider than its widest line.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let view = self.view();
        let rows = view.lines().count();
        let width = view.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
        usize::from(y) < rows && usize::from(x) < width
    }

    fn handle_key(&mut self, key: &KeyMsg) {
        if !self.focus.is_focused() || key.is_escape() {
            return;
        }
        if matches(key, &[&self.keymap.activate]) {
            self.activate(self.focus);
        } else if matches(key, &[&self.keymap.next]) {
            self.move_focus(true);
        } else if matches(key, &[&self.keymap.prev]) {
            self.move_focus(false);
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseMsg) {
        if !mouse.is_left_press() {
            return;
        }
        match self.hit_test(mouse.x, mouse.y) {
            Some(region) => {
                trace!(?region, "click");
                self.focus = region.into();
                self.activate(self.focus);
            }
            None if self.focus.is_focused() && !self.contains(mouse.x, mouse.y) => self.blur(),
            // Label, gaps and padding keep the current focus.
            None => {}
        }
    }

    fn handle_document_key(&mut self, msg: &DocumentKeyMsg) -> Option<Cmd> {
        let listener = self.listener_id()?;
        if msg.listener != listener || !matches(&msg.key, &[&self.keymap.close]) {
            return None;
        }
        if !self.open {
            return None;
        }
        self.close();
        Some(Cmd::new(move || Message::new(FocusTriggerMsg { listener })))
    }
}

fn brackets(focused: bool) -> (char, char) {
    if focused { ('<', '>') } else { ('[', ']') }
}

impl Model for MultiselectDropdown {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(doc_key) = msg.downcast_ref::<DocumentKeyMsg>() {
            return self.handle_document_key(doc_key);
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key);
            return None;
        }

        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            self.handle_mouse(mouse);
            return None;
        }

        if let Some(focus) = msg.downcast_ref::<FocusTriggerMsg>() {
            if self.listener_id() == Some(focus.listener) {
                self.focus = Focus::Trigger;
            }
            return None;
        }

        if msg.is::<FocusMsg>() {
            if !self.focus.is_focused() {
                self.focus = Focus::Trigger;
            }
            return None;
        }

        if msg.is::<BlurMsg>() {
            self.blur();
        }

        None
    }

    fn view(&self) -> String {
        let mut lines = Vec::with_capacity(2 + self.options.len());
        lines.push(self.label.clone());

        let mut trigger_row = self.trigger_text();
        if self.shows_clear_all() {
            trigger_row.push(' ');
            trigger_row.push_str(&self.clear_text());
        }
        lines.push(trigger_row);

        if self.open {
            for (i, opt) in self.options.iter().enumerate() {
                lines.push(self.option_text(i, opt));
            }
        }

        lines.join("\n")
    }
}

impl fmt::Debug for MultiselectDropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiselectDropdown")
            .field("label", &self.label)
            .field("options", &self.options.len())
            .field("selected", &self.selected)
            .field("open", &self.open)
            .field("focus", &self.focus)
            .field("listener", &self.listener_id())
            .finish_non_exhaustive()
    }
}
