//! Crossterm host loop.
//!
//! Puts the terminal in raw mode on the alternate screen, turns terminal
//! events into messages, runs commands to completion after each update, and
//! redraws when the view changes. [`TerminalGuard`] restores the terminal on
//! every exit path, including panics that unwind through [`run`].

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use multiselect::{
    BlurMsg, Cmd, FocusMsg, Message, Model, QuitMsg, SequenceMsg, from_crossterm_key,
    from_crossterm_mouse,
};
use tracing::{debug, trace};

/// Terminal modes to enable.
#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    /// Capture mouse events.
    pub mouse: bool,
}

/// Restores the terminal when dropped.
pub struct TerminalGuard<W: Write> {
    writer: W,
    options: TerminalOptions,
}

impl<W: Write> TerminalGuard<W> {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal rejects a mode change.
    pub fn enter(mut writer: W, options: TerminalOptions) -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(writer, EnterAlternateScreen, Hide, EnableFocusChange)?;
        if options.mouse {
            execute!(writer, EnableMouseCapture)?;
        }
        Ok(Self { writer, options })
    }

    fn draw(&mut self, view: &str) -> io::Result<()> {
        execute!(self.writer, MoveTo(0, 0), Clear(ClearType::All))?;
        // Raw mode does not translate newlines.
        write!(self.writer, "{}", view.replace('\n', "\r\n"))?;
        self.writer.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.options.mouse {
            let _ = execute!(self.writer, DisableMouseCapture);
        }
        let _ = execute!(self.writer, DisableFocusChange, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// What the loop should do after applying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Stop and return the model.
    Quit,
}

/// Apply `msg` and every message its commands produce, in order.
pub fn dispatch<M: Model>(model: &mut M, msg: Message) -> Flow {
    let mut pending = vec![msg];
    while let Some(msg) = pending.pop() {
        if msg.is::<QuitMsg>() {
            return Flow::Quit;
        }
        if msg.is::<SequenceMsg>() {
            if let Some(SequenceMsg(msgs)) = msg.downcast::<SequenceMsg>() {
                pending.extend(msgs.into_iter().rev());
            }
            continue;
        }
        if let Some(msg) = model.update(msg).and_then(Cmd::execute) {
            pending.push(msg);
        }
    }
    Flow::Continue
}

fn translate(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Some(Message::new(from_crossterm_key(key.code, key.modifiers)))
        }
        Event::Mouse(mouse) => Some(Message::new(from_crossterm_mouse(mouse))),
        Event::FocusGained => Some(Message::new(FocusMsg)),
        Event::FocusLost => Some(Message::new(BlurMsg)),
        _ => None,
    }
}

/// Run `model` until it quits.
///
/// # Errors
///
/// Returns an error if terminal setup, event reading, or drawing fails.
pub fn run<M: Model>(mut model: M, options: TerminalOptions) -> io::Result<M> {
    let mut terminal = TerminalGuard::enter(io::stdout(), options)?;
    debug!(mouse = options.mouse, "terminal ready");

    if let Some(msg) = model.init().and_then(Cmd::execute)
        && dispatch(&mut model, msg) == Flow::Quit
    {
        return Ok(model);
    }

    let mut last_view = String::new();
    loop {
        let view = model.view();
        if view != last_view {
            terminal.draw(&view)?;
            last_view = view;
        }

        let Some(msg) = translate(event::read()?) else {
            continue;
        };
        trace!(?msg, "terminal event");
        if dispatch(&mut model, msg) == Flow::Quit {
            debug!("quit requested");
            return Ok(model);
        }
    }
}
