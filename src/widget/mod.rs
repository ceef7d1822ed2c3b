//! GUI toolkit seam.
//!
//! The message box core never draws anything itself. It talks to whatever
//! toolkit hosts it through [`GuiToolkit`], and receives pointer and keyboard
//! input back as [`ToolkitEvent`] values.

mod headless;
mod panel;
mod registry;

pub use headless::HeadlessGui;
pub use panel::{Panel, PanelKind};
pub use registry::WidgetRegistry;

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a unique widget handle.
pub fn next_widget_handle() -> WidgetHandle {
    WidgetHandle(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
}

/// Opaque reference to a panel owned by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(pub u64);

/// Capabilities the message box core needs from a GUI toolkit.
pub trait GuiToolkit {
    /// Create a non-interactive text panel.
    fn create_text_panel(&mut self, text: &str) -> WidgetHandle;

    /// Replace the text of an existing panel in place.
    fn set_text(&mut self, handle: WidgetHandle, text: &str);

    /// Create a modal panel with one button per label, in order.
    fn create_modal(&mut self, text: &str, buttons: &[String]) -> WidgetHandle;

    /// Destroy a panel. Unknown handles are ignored.
    fn destroy(&mut self, handle: WidgetHandle);

    /// Preferred height of the panel in layout units.
    fn preferred_height(&self, handle: WidgetHandle) -> i32;

    /// Move a panel to `offset` layout units above the bottom of the screen.
    fn set_offset(&mut self, handle: WidgetHandle, offset: i32);

    /// Highlight the button that keyboard confirmation would activate.
    fn set_focus(&mut self, handle: WidgetHandle, button: usize);
}

/// Input reported by the toolkit for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitEvent {
    /// A button widget was activated with the pointer.
    ButtonClicked { panel: WidgetHandle, button: usize },
    /// A key was pressed while the panel had keyboard focus.
    KeyPressed { panel: WidgetHandle, key: Key },
}

impl ToolkitEvent {
    pub fn panel(&self) -> WidgetHandle {
        match self {
            Self::ButtonClicked { panel, .. } | Self::KeyPressed { panel, .. } => *panel,
        }
    }
}

/// Keys the dialog logic cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Other,
}

impl Key {
    /// Parse a key name ("ENTER", "escape", ...). Names are case-insensitive.
    pub fn from_name(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RETURN" | "NUMPADENTER" => Self::Enter,
            "SPACE" => Self::Space,
            "ESCAPE" | "ESC" => Self::Escape,
            "TAB" => Self::Tab,
            "LEFT" => Self::Left,
            "RIGHT" => Self::Right,
            "UP" => Self::Up,
            "DOWN" => Self::Down,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enter => "ENTER",
            Self::Space => "SPACE",
            Self::Escape => "ESCAPE",
            Self::Tab => "TAB",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Other => "OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_case_insensitive() {
        assert_eq!(Key::from_name("enter"), Key::Enter);
        assert_eq!(Key::from_name("Return"), Key::Enter);
        assert_eq!(Key::from_name("ESC"), Key::Escape);
        assert_eq!(Key::from_name("F1"), Key::Other);
        assert_eq!(Key::from_name(Key::Tab.as_str()), Key::Tab);
    }

    #[test]
    fn test_handles_are_unique() {
        let a = next_widget_handle();
        let b = next_widget_handle();
        assert_ne!(a, b);
    }
}
