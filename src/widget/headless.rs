//! In-memory toolkit used by tests and the CLI.
//!
//! Panels are plain records in a [`WidgetRegistry`]; height is measured from
//! the line count, which is enough to exercise the stacking pass.

use super::{GuiToolkit, Panel, PanelKind, WidgetHandle, WidgetRegistry, next_widget_handle};
use crate::config::MessageBoxConfig;

/// Toolkit that records panels instead of drawing them.
#[derive(Debug)]
pub struct HeadlessGui {
    pub widgets: WidgetRegistry,
    line_height: i32,
    vertical_padding: i32,
}

impl Default for HeadlessGui {
    fn default() -> Self {
        Self::from_config(&MessageBoxConfig::default())
    }
}

impl HeadlessGui {
    pub fn new(line_height: i32, vertical_padding: i32) -> Self {
        Self {
            widgets: WidgetRegistry::new(),
            line_height,
            vertical_padding,
        }
    }

    pub fn from_config(config: &MessageBoxConfig) -> Self {
        Self::new(config.line_height, config.vertical_padding)
    }

    pub fn panel(&self, handle: WidgetHandle) -> Option<&Panel> {
        self.widgets.get(handle)
    }

    /// Text panels still alive, oldest first.
    pub fn text_panels(&self) -> Vec<&Panel> {
        self.widgets
            .handles_of_kind(PanelKind::Text)
            .into_iter()
            .filter_map(|h| self.widgets.get(h))
            .collect()
    }

    /// Modal panels still alive, oldest first.
    pub fn modal_panels(&self) -> Vec<&Panel> {
        self.widgets
            .handles_of_kind(PanelKind::Modal)
            .into_iter()
            .filter_map(|h| self.widgets.get(h))
            .collect()
    }
}

impl GuiToolkit for HeadlessGui {
    fn create_text_panel(&mut self, text: &str) -> WidgetHandle {
        let handle = next_widget_handle();
        self.widgets.register(Panel::text(handle, text))
    }

    fn set_text(&mut self, handle: WidgetHandle, text: &str) {
        match self.widgets.get_mut(handle) {
            Some(panel) => panel.text = text.to_string(),
            None => tracing::debug!("set_text on unknown panel {:?}", handle),
        }
    }

    fn create_modal(&mut self, text: &str, buttons: &[String]) -> WidgetHandle {
        let handle = next_widget_handle();
        self.widgets.register(Panel::modal(handle, text, buttons))
    }

    fn destroy(&mut self, handle: WidgetHandle) {
        if self.widgets.remove(handle).is_none() {
            tracing::debug!("destroy on unknown panel {:?}", handle);
        }
    }

    fn preferred_height(&self, handle: WidgetHandle) -> i32 {
        self.widgets
            .get(handle)
            .map(|p| p.line_count() as i32 * self.line_height + self.vertical_padding)
            .unwrap_or(0)
    }

    fn set_offset(&mut self, handle: WidgetHandle, offset: i32) {
        if let Some(panel) = self.widgets.get_mut(handle) {
            panel.offset = offset;
        }
    }

    fn set_focus(&mut self, handle: WidgetHandle, button: usize) {
        if let Some(panel) = self.widgets.get_mut(handle) {
            panel.focus = Some(button);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_scales_with_lines() {
        let mut gui = HeadlessGui::new(10, 4);
        let one = gui.create_text_panel("single");
        let three = gui.create_text_panel("a\nb\nc");
        let empty = gui.create_text_panel("");

        assert_eq!(gui.preferred_height(one), 14);
        assert_eq!(gui.preferred_height(three), 34);
        assert_eq!(gui.preferred_height(empty), 14);
    }

    #[test]
    fn test_destroy_unknown_is_noop() {
        let mut gui = HeadlessGui::default();
        let h = gui.create_text_panel("x");
        gui.destroy(h);
        gui.destroy(h);
        assert!(gui.widgets.is_empty());
        assert_eq!(gui.preferred_height(h), 0);
    }

    #[test]
    fn test_modal_keeps_button_order() {
        let mut gui = HeadlessGui::default();
        let buttons = vec!["Yes".to_string(), "No".to_string()];
        let h = gui.create_modal("Rest here?", &buttons);
        gui.set_focus(h, 1);

        let panel = gui.panel(h).unwrap();
        assert_eq!(panel.kind, PanelKind::Modal);
        assert_eq!(panel.buttons, buttons);
        assert_eq!(panel.focus, Some(1));
        assert_eq!(gui.modal_panels().len(), 1);
        assert!(gui.text_panels().is_empty());
    }
}
