//! Panel record kept by the headless toolkit.

use super::WidgetHandle;

/// What a panel was created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Plain text notification.
    Text,
    /// Modal dialog with buttons.
    Modal,
}

/// A toolkit-side panel.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Handle given out to the core.
    pub handle: WidgetHandle,
    pub kind: PanelKind,
    /// Displayed text.
    pub text: String,
    /// Button labels, in display order (empty for text panels).
    pub buttons: Vec<String>,
    /// Distance above the bottom of the screen.
    pub offset: i32,
    /// Highlighted button index, for modals.
    pub focus: Option<usize>,
}

impl Panel {
    pub fn text(handle: WidgetHandle, text: &str) -> Self {
        Self {
            handle,
            kind: PanelKind::Text,
            text: text.to_string(),
            buttons: Vec::new(),
            offset: 0,
            focus: None,
        }
    }

    pub fn modal(handle: WidgetHandle, text: &str, buttons: &[String]) -> Self {
        Self {
            handle,
            kind: PanelKind::Modal,
            text: text.to_string(),
            buttons: buttons.to_vec(),
            offset: 0,
            focus: None,
        }
    }

    /// Number of text lines (an empty string still takes one line).
    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }
}
