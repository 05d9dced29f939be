//! Keybinding definitions for the dropdown.
//!
//! # Example
//!
//! ```rust
//! use multiselect::keymap::{Binding, matches};
//!
//! let activate = Binding::new().keys(&["enter", " "]).help("enter", "toggle");
//! assert!(matches("enter", &[&activate]));
//! assert!(!matches("x", &[&activate]));
//! ```

use std::fmt;

/// Help information for a keybinding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key(s) to display in help text.
    pub key: String,
    /// Description of what the binding does.
    pub desc: String,
}

impl Help {
    /// Creates new help information.
    #[must_use]
    pub fn new(key: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            desc: desc.into(),
        }
    }
}

/// A keybinding with associated help text.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<String>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a new empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keys for this binding.
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|&s| s.to_string()).collect();
        self
    }

    /// Sets the help text for this binding.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help::new(key, desc);
        self
    }

    /// Enables or disables the binding (builder version).
    #[must_use]
    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.disabled = !enabled;
        self
    }

    /// Returns the keys for this binding.
    #[must_use]
    pub fn get_keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the help information for this binding.
    #[must_use]
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// A binding is enabled if it's not disabled and has at least one key.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }
}

/// Checks if the given key matches any of the given enabled bindings.
pub fn matches<K: fmt::Display>(key: K, bindings: &[&Binding]) -> bool {
    let key_str = key.to_string();
    bindings
        .iter()
        .filter(|b| b.enabled())
        .any(|b| b.keys.iter().any(|k| *k == key_str))
}

/// Keybindings for the dropdown.
///
/// `close` is never matched against keys delivered to the focused widget;
/// Escape only reaches the dropdown through its document listener.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Activate the focused element (toggle menu, clear all, toggle option).
    pub activate: Binding,
    /// Move focus to the next element, or out of the widget after the last.
    pub next: Binding,
    /// Move focus to the previous element, or out of the widget before the
    /// trigger.
    pub prev: Binding,
    /// Close the open menu.
    pub close: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            activate: Binding::new()
                .keys(&["enter", " "])
                .help("enter/space", "toggle"),
            next: Binding::new().keys(&["tab", "down"]).help("tab", "next"),
            prev: Binding::new()
                .keys(&["shift+tab", "up"])
                .help("shift+tab", "back"),
            close: Binding::new().keys(&["esc"]).help("esc", "close"),
        }
    }
}

impl KeyMap {
    /// Bindings shown in a help line, in display order.
    pub fn short_help(&self) -> Vec<&Binding> {
        vec![&self.activate, &self.next, &self.prev, &self.close]
    }
}
