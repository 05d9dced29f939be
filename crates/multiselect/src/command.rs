//! Commands for deferred effects.
//!
//! `update` never performs follow-up work itself; it returns a [`Cmd`] that
//! the host runs after the state change has been applied. The dropdown uses
//! this to move focus back to the trigger only once the menu is closed.

use crate::message::{Message, QuitMsg};

/// A command that produces a message when executed.
///
/// Commands are lazy: nothing happens until the host calls [`Cmd::execute`].
///
/// # Example
///
/// ```rust
/// use multiselect::{Cmd, FocusMsg, Message};
///
/// let cmd = Cmd::new(|| Message::new(FocusMsg));
/// assert!(cmd.execute().unwrap().is::<FocusMsg>());
/// ```
pub struct Cmd(Box<dyn FnOnce() -> Option<Message> + Send + 'static>);

impl Cmd {
    /// Create a new command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self(Box::new(move || Some(f())))
    }

    /// Create a command that may not produce a message.
    pub fn new_optional<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Message> + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Execute the command and return the resulting message.
    pub fn execute(self) -> Option<Message> {
        (self.0)()
    }
}

impl std::fmt::Debug for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmd").finish_non_exhaustive()
    }
}

/// Run several commands in order, collecting every message they produce.
///
/// Returns `None` when no command is left after dropping the `None`s.
pub fn sequence(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let mut valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.pop(),
        _ => Some(Cmd::new(move || {
            let messages: Vec<Message> = valid.into_iter().filter_map(Cmd::execute).collect();
            Message::new(SequenceMsg(messages))
        })),
    }
}

/// Messages produced by a [`sequence`], in execution order.
#[derive(Debug)]
pub struct SequenceMsg(pub Vec<Message>);

/// Command that asks the host to stop.
pub fn quit() -> Cmd {
    Cmd::new(|| Message::new(QuitMsg))
}
