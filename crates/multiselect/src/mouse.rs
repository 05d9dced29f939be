//! Mouse input handling.
//!
//! The dropdown only reacts to left-button presses; other buttons and
//! motion are converted so hosts can forward every event without filtering.

use std::fmt;

/// Mouse event message, in cells relative to the widget's top-left corner.
///
/// # Example
///
/// ```rust
/// use multiselect::{MouseAction, MouseButton, MouseMsg};
///
/// let click = MouseMsg::left_press(4, 1);
/// assert!(click.is_left_press());
/// assert_eq!(click.button, MouseButton::Left);
/// assert_eq!(click.action, MouseAction::Press);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseMsg {
    /// X coordinate (column), 0-indexed.
    pub x: u16,
    /// Y coordinate (row), 0-indexed.
    pub y: u16,
    /// The action that occurred.
    pub action: MouseAction,
    /// The button involved.
    pub button: MouseButton,
}

impl MouseMsg {
    /// A left-button press at the given cell.
    pub fn left_press(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            action: MouseAction::Press,
            button: MouseButton::Left,
        }
    }

    /// Whether this is a left-button press (a "click" for the widget).
    pub fn is_left_press(&self) -> bool {
        self.action == MouseAction::Press && self.button == MouseButton::Left
    }

    /// Translate into coordinates relative to `(origin_x, origin_y)`.
    ///
    /// Returns `None` when the event lies above or left of the origin.
    pub fn relative_to(&self, origin_x: u16, origin_y: u16) -> Option<Self> {
        Some(Self {
            x: self.x.checked_sub(origin_x)?,
            y: self.y.checked_sub(origin_y)?,
            ..*self
        })
    }
}

impl fmt::Display for MouseMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.button == MouseButton::None {
            write!(f, "{}", self.action)
        } else if self.action == MouseAction::Press {
            write!(f, "{}", self.button)
        } else {
            write!(f, "{} {}", self.button, self.action)
        }
    }
}

/// Mouse action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseAction {
    /// Mouse button pressed.
    #[default]
    Press,
    /// Mouse button released.
    Release,
    /// Mouse moved.
    Motion,
}

impl fmt::Display for MouseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseAction::Press => "press",
            MouseAction::Release => "release",
            MouseAction::Motion => "motion",
        };
        write!(f, "{name}")
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// No button (motion only).
    #[default]
    None,
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// Any scroll wheel direction.
    Wheel,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::None => "none",
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
            MouseButton::Wheel => "wheel",
        };
        write!(f, "{name}")
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(b: crossterm::event::MouseButton) -> Self {
        match b {
            crossterm::event::MouseButton::Left => MouseButton::Left,
            crossterm::event::MouseButton::Right => MouseButton::Right,
            crossterm::event::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

/// Convert a crossterm mouse event to a [`MouseMsg`] in screen coordinates.
pub fn from_crossterm_mouse(event: crossterm::event::MouseEvent) -> MouseMsg {
    use crossterm::event::MouseEventKind;

    let (action, button): (MouseAction, MouseButton) = match event.kind {
        MouseEventKind::Down(b) => (MouseAction::Press, b.into()),
        MouseEventKind::Up(b) => (MouseAction::Release, b.into()),
        MouseEventKind::Drag(b) => (MouseAction::Motion, b.into()),
        MouseEventKind::Moved => (MouseAction::Motion, MouseButton::None),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => (MouseAction::Press, MouseButton::Wheel),
    };

    MouseMsg {
        x: event.column,
        y: event.row,
        action,
        button,
    }
}
