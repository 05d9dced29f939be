//! The demo application model.
//!
//! `App` owns the selection the dropdown reports into, the document the
//! dropdown registers its Escape listener on, and the screen layout around
//! the widget.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use multiselect::{
    Cmd, Document, DropdownError, FocusMsg, KeyMsg, KeyType, Message, Model, MouseMsg,
    MultiselectDropdown, quit, sequence,
};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::Config;

/// Row at which the dropdown is drawn.
pub const WIDGET_ROW: u16 = 2;

/// Column at which the dropdown is drawn.
pub const WIDGET_COL: u16 = 0;

const TITLE: &str = "multiselect demo";

/// Top-level demo model.
pub struct App {
    document: Document,
    dropdown: MultiselectDropdown,
    store: Arc<Mutex<Vec<String>>>,
    blurs: Arc<AtomicUsize>,
}

impl App {
    /// Build the dropdown from `config` and mount it.
    ///
    /// # Errors
    ///
    /// Returns the dropdown's error if the configuration breaks its
    /// contract.
    pub fn from_config(config: &Config) -> Result<Self, DropdownError> {
        let document = Document::new();
        let store = Arc::new(Mutex::new(config.selected.clone()));
        let blurs = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&store);
        let blur_count = Arc::clone(&blurs);
        let mut dropdown = MultiselectDropdown::new()
            .label(config.label.clone())
            .empty_label(config.empty_label.clone())
            .options(config.options.clone())
            .selected(config.selected.clone())
            .on_change(move |next| {
                info!(selected = ?next, "selection changed");
                *sink.lock() = next;
            })
            .on_blur(move || {
                blur_count.fetch_add(1, Ordering::Relaxed);
            });
        dropdown.mount(&document)?;

        Ok(Self {
            document,
            dropdown,
            store,
            blurs,
        })
    }

    /// The dropdown.
    pub fn dropdown(&self) -> &MultiselectDropdown {
        &self.dropdown
    }

    /// The selection the owner currently holds.
    pub fn selection(&self) -> Vec<String> {
        self.store.lock().clone()
    }

    /// How many times focus left the dropdown.
    pub fn blur_count(&self) -> usize {
        self.blurs.load(Ordering::Relaxed)
    }

    fn handle_key(&mut self, msg: Message) -> Option<Cmd> {
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return None;
        };

        if key.key_type == KeyType::CtrlC || (key.runes == ['q'] && !self.dropdown.is_open()) {
            return Some(quit());
        }

        // Tab from outside the widget moves focus back in.
        if !self.dropdown.focus().is_focused()
            && matches!(key.key_type, KeyType::Tab | KeyType::ShiftTab)
        {
            return self.dropdown.update(Message::new(FocusMsg));
        }

        let mut cmds: Vec<Option<Cmd>> = self
            .document
            .dispatch_key(key)
            .into_iter()
            .map(|routed| self.dropdown.update(routed))
            .collect();
        cmds.push(self.dropdown.update(msg));
        sequence(cmds)
    }

    /// Push the owner's selection back into the controlled dropdown.
    fn sync_selection(&mut self) {
        let current = self.store.lock().clone();
        if current == self.dropdown.get_selected() {
            return;
        }
        if let Err(err) = self.dropdown.set_selected(current) {
            warn!(error = %err, "rejected selection from owner");
        }
    }
}

impl Model for App {
    fn init(&self) -> Option<Cmd> {
        Some(Cmd::new(|| Message::new(FocusMsg)))
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        let cmd = if msg.is::<KeyMsg>() {
            self.handle_key(msg)
        } else if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            // Presses above or left of the widget still count as outside it.
            let local = mouse
                .relative_to(WIDGET_COL, WIDGET_ROW)
                .unwrap_or(MouseMsg {
                    x: u16::MAX,
                    y: u16::MAX,
                    ..*mouse
                });
            self.dropdown.update(Message::new(local))
        } else {
            self.dropdown.update(msg)
        };

        self.sync_selection();
        cmd
    }

    fn view(&self) -> String {
        let mut out = String::new();
        out.push_str(TITLE);
        out.push_str("\n\n");
        out.push_str(&self.dropdown.view());
        out.push_str("\n\n");

        let selection = self.selection();
        out.push_str(&format!("selected: [{}]\n", selection.join(", ")));
        out.push_str(&format!("blur events: {}\n", self.blur_count()));

        let help: Vec<String> = self
            .dropdown
            .get_keymap()
            .short_help()
            .iter()
            .filter(|b| b.enabled())
            .map(|b| format!("{} {}", b.get_help().key, b.get_help().desc))
            .collect();
        out.push_str(&help.join(" • "));
        out.push_str(" • q quit");
        out
    }
}
