//! Document-scoped keydown listeners.
//!
//! A [`Document`] stands in for the page-wide event target: components that
//! need to see keys regardless of focus (the dropdown's Escape handling)
//! register a listener on mount and release it on unmount. The host asks the
//! document to [`dispatch_key`](Document::dispatch_key) every key press and
//! routes the resulting [`DocumentKeyMsg`]s to its components.
//!
//! Registration is scoped: [`KeyListener`] removes itself from the document
//! when dropped, so a component torn down without an explicit unmount still
//! leaves no listener behind.
//!
//! # Example
//!
//! ```rust
//! use multiselect::{Document, DocumentKeyMsg, KeyMsg, KeyType};
//!
//! let doc = Document::new();
//! let listener = doc.add_keydown_listener();
//! assert_eq!(doc.listener_count(), 1);
//!
//! let routed = doc.dispatch_key(&KeyMsg::from_type(KeyType::Esc));
//! let msg = routed[0].downcast_ref::<DocumentKeyMsg>().unwrap();
//! assert_eq!(msg.listener, listener.id());
//!
//! drop(listener);
//! assert_eq!(doc.listener_count(), 0);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::trace;

use crate::key::KeyMsg;
use crate::message::Message;

/// Unique ID for a keydown listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric id, in registration order.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    keydown: BTreeSet<ListenerId>,
}

/// Shared handle to the document's listener registry.
///
/// Cloning a `Document` yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct Document {
    registry: Arc<Mutex<Registry>>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a keydown listener. It stays attached until the returned
    /// guard is released or dropped.
    pub fn add_keydown_listener(&self) -> KeyListener {
        let mut registry = self.registry.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.keydown.insert(id);
        trace!(%id, "keydown listener attached");

        KeyListener {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of attached keydown listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.lock().keydown.len()
    }

    /// Whether the given listener is currently attached.
    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.registry.lock().keydown.contains(&id)
    }

    /// Fan a key press out to every attached listener, in registration order.
    pub fn dispatch_key(&self, key: &KeyMsg) -> Vec<Message> {
        let listeners: Vec<ListenerId> = self.registry.lock().keydown.iter().copied().collect();
        trace!(key = %key, listeners = listeners.len(), "dispatching document keydown");

        listeners
            .into_iter()
            .map(|listener| {
                Message::new(DocumentKeyMsg {
                    listener,
                    key: key.clone(),
                })
            })
            .collect()
    }
}

/// Registration guard for a document keydown listener.
#[derive(Debug)]
pub struct KeyListener {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl KeyListener {
    /// The id keys are routed with.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Detach the listener now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().keydown.remove(&self.id);
            trace!(id = %self.id, "keydown listener detached");
        }
    }
}

/// A key press delivered through a document listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKeyMsg {
    /// The listener this copy of the key is addressed to.
    pub listener: ListenerId,
    /// The key that was pressed.
    pub key: KeyMsg,
}
