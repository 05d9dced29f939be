//! Message types for the Elm Architecture.
//!
//! Every input the dropdown reacts to (keys, mouse presses, focus changes,
//! keys routed from the document listener) reaches it as a [`Message`].

use std::any::Any;
use std::fmt;

/// A type-erased message container.
///
/// Messages can be any type that is `Send + 'static`. Use [`Message::new`] to
/// wrap a value and [`Message::downcast_ref`] to inspect it.
///
/// # Example
///
/// ```rust
/// use multiselect::{BlurMsg, Message};
///
/// let msg = Message::new(BlurMsg);
/// assert!(msg.is::<BlurMsg>());
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Create a new message from any sendable type.
    pub fn new<M: Any + Send + 'static>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Try to downcast to a specific message type.
    pub fn downcast<M: Any + Send + 'static>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Try to get a reference to the message as a specific type.
    pub fn downcast_ref<M: Any + Send + 'static>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Check if the message is of a specific type.
    pub fn is<M: Any + Send + 'static>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

/// Message to stop the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitMsg;

/// Focus entered the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMsg;

/// Focus left the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurMsg;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_downcast() {
        struct TestMsg(i32);

        let msg = Message::new(TestMsg(7));
        assert!(msg.is::<TestMsg>());
        assert_eq!(msg.downcast::<TestMsg>().unwrap().0, 7);
    }

    #[test]
    fn test_message_downcast_wrong_type() {
        let msg = Message::new(FocusMsg);
        assert!(!msg.is::<BlurMsg>());
        assert!(msg.downcast_ref::<BlurMsg>().is_none());
        assert!(msg.downcast::<BlurMsg>().is_none());
    }

    #[test]
    fn test_message_debug_is_opaque() {
        let msg = Message::new(QuitMsg);
        assert_eq!(format!("{msg:?}"), "Message { .. }");
    }
}
