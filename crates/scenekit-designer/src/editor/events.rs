//! Input event definitions for the scene editor.
//!
//! Positions are widget (screen) pixels, y down. The host translates its
//! toolkit events into these and feeds them to
//! [`SceneEditor::handle_event`](super::SceneEditor::handle_event).

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

use super::menu::MenuEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Delete,
    Escape,
}

/// Root input event enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Button pressed.
    Press {
        pos: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Pointer moved (with or without a button held).
    Move { pos: Point },
    /// Button released.
    Release { pos: Point, button: MouseButton },
    /// Wheel turned; positive `delta` is away from the user.
    Wheel { pos: Point, delta: f64 },
    /// Context menu requested.
    ContextMenu { pos: Point },
    /// Key pressed.
    Key { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            InputEvent::Press { pos, button, .. } => {
                format!("Press {:?} at ({:.1}, {:.1})", button, pos.x, pos.y)
            }
            InputEvent::Move { pos } => format!("Move to ({:.1}, {:.1})", pos.x, pos.y),
            InputEvent::Release { pos, button } => {
                format!("Release {:?} at ({:.1}, {:.1})", button, pos.x, pos.y)
            }
            InputEvent::Wheel { delta, .. } => format!("Wheel {:+}", delta),
            InputEvent::ContextMenu { pos } => {
                format!("Context menu at ({:.1}, {:.1})", pos.x, pos.y)
            }
            InputEvent::Key { key, modifiers } => {
                if modifiers.ctrl {
                    format!("Key Ctrl+{:?}", key)
                } else {
                    format!("Key {:?}", key)
                }
            }
        }
    }
}

/// What the editor did with an event
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Nothing changed.
    Ignored,
    /// State changed; the host should redraw.
    Handled,
    /// The host should pop up this menu and call
    /// [`SceneEditor::trigger`](super::SceneEditor::trigger) with the chosen action.
    ContextMenu(Vec<MenuEntry>),
}

impl EventOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventOutcome::Ignored)
    }
}
