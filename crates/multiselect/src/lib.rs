#![forbid(unsafe_code)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # Multiselect
//!
//! A controlled multiselect dropdown for terminal forms, built on the Elm
//! Architecture.
//!
//! The dropdown shows a trigger with a summary of the current selection, a
//! "Clear all" control, and a checkbox menu. It never owns the selection:
//! every change is proposed through `on_change`, and the owner pushes the
//! accepted selection back with
//! [`set_selected`](MultiselectDropdown::set_selected).
//!
//! ## Modules
//!
//! - **dropdown** - The component, its focus model, and hit testing
//! - **selection** - Pure selection reducer
//! - **summary** - Trigger summary rendering and truncation
//! - **option** - Options and the value / display-name index
//! - **document** - Document-scoped keydown listener registry
//! - **keymap** - Keybindings
//! - **simulator** - Headless update/command driver for tests
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use multiselect::{Document, DropdownOption, KeyMsg, KeyType, Model, MultiselectDropdown};
//!
//! let store = Arc::new(Mutex::new(vec!["a".to_string()]));
//! let sink = store.clone();
//!
//! let doc = Document::new();
//! let mut dropdown = MultiselectDropdown::new()
//!     .label("Greek")
//!     .empty_label("None")
//!     .options(vec![
//!         DropdownOption::new("a", "Alpha"),
//!         DropdownOption::new("b", "Beta"),
//!     ])
//!     .selected(store.lock().clone())
//!     .on_change(move |next| *sink.lock() = next);
//! dropdown.mount(&doc).unwrap();
//!
//! dropdown.open();
//! for msg in doc.dispatch_key(&KeyMsg::from_type(KeyType::Esc)) {
//!     dropdown.update(msg);
//! }
//! assert!(!dropdown.is_open());
//! ```

pub mod command;
pub mod document;
pub mod dropdown;
pub mod error;
pub mod key;
pub mod keymap;
pub mod message;
pub mod mouse;
pub mod option;
pub mod selection;
pub mod simulator;
pub mod summary;

pub use command::{Cmd, SequenceMsg, quit, sequence};
pub use document::{Document, DocumentKeyMsg, KeyListener, ListenerId};
pub use dropdown::{AriaAttributes, Focus, FocusTriggerMsg, MultiselectDropdown, Region};
pub use error::{DropdownError, Result};
pub use key::{KeyMsg, KeyType, from_crossterm_key};
pub use message::{BlurMsg, FocusMsg, Message, QuitMsg};
pub use mouse::{MouseAction, MouseButton, MouseMsg, from_crossterm_mouse};
pub use option::{DropdownOption, LookupPath, OptionHandler, OptionSet};

/// The Model trait for components and hosts.
///
/// `update` applies one message and may return a command for the host to
/// run afterwards; `view` renders the current state without side effects.
pub trait Model: Send + 'static {
    /// Initialize the model and return an optional startup command.
    fn init(&self) -> Option<Cmd>;

    /// Process a message and return a new command.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render the model as a string for display.
    fn view(&self) -> String;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Model;
    pub use crate::command::Cmd;
    pub use crate::document::{Document, DocumentKeyMsg};
    pub use crate::dropdown::{Focus, FocusTriggerMsg, MultiselectDropdown};
    pub use crate::error::{DropdownError, Result};
    pub use crate::key::{KeyMsg, KeyType};
    pub use crate::message::{BlurMsg, FocusMsg, Message};
    pub use crate::mouse::MouseMsg;
    pub use crate::option::{DropdownOption, OptionSet};
}
