//! Modal dialog with a fixed set of buttons.
//!
//! The box only translates toolkit input into a button index. The first
//! qualifying event wins; anything after that is ignored until the manager
//! sweeps the box away on its next tick.

use crate::widget::{GuiToolkit, Key, ToolkitEvent, WidgetHandle};

/// Per-dialog keyboard mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractiveOptions {
    /// Button focused when the dialog opens (clamped to the button list).
    pub default_button: usize,
    /// Button chosen by ESCAPE. Without one, ESCAPE is ignored.
    pub cancel_button: Option<usize>,
}

impl InteractiveOptions {
    pub fn with_cancel(cancel_button: usize) -> Self {
        Self {
            cancel_button: Some(cancel_button),
            ..Default::default()
        }
    }
}

/// Lifecycle of an interactive box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Waiting for input.
    Displayed,
    /// A button was chosen and is being delivered to the manager.
    ButtonChosen { button: usize },
    /// Answer consumed; the box is a tombstone until the next tick.
    MarkedForDeletion { button: usize },
}

#[derive(Debug)]
pub struct InteractiveMessageBox {
    handle: WidgetHandle,
    text: String,
    buttons: Vec<String>,
    focused: usize,
    cancel_button: Option<usize>,
    state: DialogState,
}

impl InteractiveMessageBox {
    /// Build the modal. Callers guarantee `buttons` is non-empty.
    pub(crate) fn new(
        gui: &mut impl GuiToolkit,
        text: &str,
        buttons: &[String],
        options: InteractiveOptions,
    ) -> Self {
        debug_assert!(!buttons.is_empty());
        let handle = gui.create_modal(text, buttons);
        let focused = options.default_button.min(buttons.len().saturating_sub(1));
        gui.set_focus(handle, focused);
        let cancel_button = options.cancel_button.filter(|&b| b < buttons.len());
        if cancel_button != options.cancel_button {
            tracing::warn!(
                "Cancel button {:?} out of range for {} buttons, ESCAPE disabled",
                options.cancel_button,
                buttons.len()
            );
        }
        Self {
            handle,
            text: text.to_string(),
            buttons: buttons.to_vec(),
            focused,
            cancel_button,
            state: DialogState::Displayed,
        }
    }

    /// Feed one toolkit event. Returns the chosen button the first time one
    /// is chosen, and `None` for everything else.
    pub(crate) fn handle_event(
        &mut self,
        gui: &mut impl GuiToolkit,
        event: ToolkitEvent,
    ) -> Option<usize> {
        if event.panel() != self.handle || self.state != DialogState::Displayed {
            return None;
        }
        let chosen = match event {
            ToolkitEvent::ButtonClicked { button, .. } => {
                (button < self.buttons.len()).then_some(button)
            }
            ToolkitEvent::KeyPressed { key, .. } => self.handle_key(gui, key),
        }?;
        self.state = DialogState::ButtonChosen { button: chosen };
        Some(chosen)
    }

    fn handle_key(&mut self, gui: &mut impl GuiToolkit, key: Key) -> Option<usize> {
        let count = self.buttons.len();
        match key {
            Key::Enter | Key::Space => Some(self.focused),
            Key::Escape => self.cancel_button,
            Key::Tab | Key::Right | Key::Down => {
                self.move_focus(gui, (self.focused + 1) % count);
                None
            }
            Key::Left | Key::Up => {
                self.move_focus(gui, (self.focused + count - 1) % count);
                None
            }
            Key::Other => None,
        }
    }

    fn move_focus(&mut self, gui: &mut impl GuiToolkit, button: usize) {
        self.focused = button;
        gui.set_focus(self.handle, button);
    }

    /// Tombstone the box once its answer has been delivered.
    pub(crate) fn mark_for_deletion(&mut self) {
        if let DialogState::ButtonChosen { button } = self.state {
            self.state = DialogState::MarkedForDeletion { button };
        }
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        matches!(self.state, DialogState::MarkedForDeletion { .. })
    }

    /// The chosen button, once there is one.
    pub fn pressed_button(&self) -> Option<usize> {
        match self.state {
            DialogState::ButtonChosen { button } | DialogState::MarkedForDeletion { button } => {
                Some(button)
            }
            DialogState::Displayed => None,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn focused_button(&self) -> usize {
        self.focused
    }

    pub fn cancel_button(&self) -> Option<usize> {
        self.cancel_button
    }

    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle(&self) -> WidgetHandle {
        self.handle
    }

    pub(crate) fn destroy(self, gui: &mut impl GuiToolkit) {
        gui.destroy(self.handle);
    }
}
