//! Owner of every live message box, advanced once per rendered frame.

use super::{InteractiveMessageBox, InteractiveOptions, MessageBox};
use crate::config::{sanitize_time_per_char, MessageBoxConfig};
use crate::event::{EventChannel, SubscriberId};
use crate::widget::{GuiToolkit, ToolkitEvent};

/// Value of [`MessageBoxManager::read_pressed_button`] when nothing was pressed.
pub const NO_BUTTON: i32 = -1;

/// Identity of a static message box inside one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageBoxId(u64);

/// Queues static notifications and arbitrates the single interactive dialog.
///
/// Static boxes are stacked bottom-up in creation order. At most one
/// interactive box exists at a time; once its answer has been delivered it
/// stays as a tombstone until the next [`on_frame`](Self::on_frame).
#[derive(Debug)]
pub struct MessageBoxManager<G: GuiToolkit> {
    gui: G,
    message_boxes: Vec<(MessageBoxId, MessageBox)>,
    next_id: u64,
    status_box: Option<MessageBoxId>,
    interactive: Option<InteractiveMessageBox>,
    time_per_char: f64,
    bottom_padding: i32,
    next_box_padding: i32,
    max_static_boxes: Option<usize>,
    last_pressed_button: i32,
    button_pressed: EventChannel,
}

impl<G: GuiToolkit> MessageBoxManager<G> {
    /// Manager with default layout and the given display speed.
    pub fn new(gui: G, time_per_char: f64) -> Self {
        let config = MessageBoxConfig {
            time_per_char,
            ..Default::default()
        };
        Self::from_config(gui, &config)
    }

    /// Manager laid out by `config`. An unusable `time_per_char` falls back to
    /// the default speed.
    pub fn from_config(gui: G, config: &MessageBoxConfig) -> Self {
        Self {
            gui,
            message_boxes: Vec::new(),
            next_id: 0,
            status_box: None,
            interactive: None,
            time_per_char: sanitize_time_per_char(config.time_per_char),
            bottom_padding: config.bottom_padding,
            next_box_padding: config.next_box_padding,
            max_static_boxes: config.max_static_boxes,
            last_pressed_button: NO_BUTTON,
            button_pressed: EventChannel::new(),
        }
    }

    /// Advance every box by `dt` seconds.
    ///
    /// Sweeps an answered interactive box, evicts expired static boxes (the
    /// status box never expires) and restacks the survivors.
    pub fn on_frame(&mut self, dt: f64) {
        if let Some(dialog) = self.interactive.take_if(|b| b.is_marked_for_deletion()) {
            tracing::debug!("Removing answered interactive box {:?}", dialog.handle());
            dialog.destroy(&mut self.gui);
        }

        let status = self.status_box;
        let boxes = std::mem::take(&mut self.message_boxes);
        for (id, mut mb) in boxes {
            mb.advance(dt);
            if mb.is_expired() && Some(id) != status {
                tracing::debug!("Message box {:?} expired after {:.2}s", id, mb.elapsed_time);
                mb.destroy(&mut self.gui);
            } else {
                self.message_boxes.push((id, mb));
            }
        }

        self.update_offsets();
    }

    /// Queue a static message.
    ///
    /// With `stat` set, the box becomes the status message: it does not
    /// expire, and it replaces any previous status message.
    pub fn create_message_box(&mut self, message: &str, stat: bool) -> MessageBoxId {
        if stat {
            self.remove_static_message_box();
        }

        self.make_room_for_one();
        let mb = MessageBox::new(&mut self.gui, message, self.time_per_char, self.next_box_padding);
        let id = MessageBoxId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Created message box {:?} ({:.2}s): {}", id, mb.max_time, message);
        self.message_boxes.push((id, mb));
        if stat {
            self.status_box = Some(id);
        }

        self.update_offsets();
        id
    }

    /// Remove the status message, if there is one.
    pub fn remove_static_message_box(&mut self) {
        if let Some(id) = self.status_box.take() {
            self.remove_message_box(id);
        }
    }

    /// Remove one static box. Returns false if it is not live.
    pub fn remove_message_box(&mut self, id: MessageBoxId) -> bool {
        let Some(index) = self.message_boxes.iter().position(|(bid, _)| *bid == id) else {
            return false;
        };
        let (_, mb) = self.message_boxes.remove(index);
        mb.destroy(&mut self.gui);
        if self.status_box == Some(id) {
            self.status_box = None;
        }
        self.update_offsets();
        true
    }

    /// Replace the text of a live static box. Its display timer restarts.
    pub fn set_message(&mut self, id: MessageBoxId, message: &str) -> bool {
        let Some((_, mb)) = self.message_boxes.iter_mut().find(|(bid, _)| *bid == id) else {
            return false;
        };
        mb.set_message(&mut self.gui, message, self.time_per_char);
        self.update_offsets();
        true
    }

    /// Open a dialog. Fails if one is already live or `buttons` is empty.
    pub fn create_interactive_message_box<I, S>(&mut self, message: &str, buttons: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create_interactive_message_box_with(message, buttons, InteractiveOptions::default())
    }

    /// Like [`create_interactive_message_box`](Self::create_interactive_message_box),
    /// with explicit default and cancel buttons.
    pub fn create_interactive_message_box_with<I, S>(
        &mut self,
        message: &str,
        buttons: I,
        options: InteractiveOptions,
    ) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.interactive.is_some() {
            tracing::warn!("Interactive message box already active, rejecting: {}", message);
            return false;
        }
        let buttons: Vec<String> = buttons.into_iter().map(Into::into).collect();
        if buttons.is_empty() {
            tracing::warn!("Interactive message box without buttons, rejecting: {}", message);
            return false;
        }

        let dialog = InteractiveMessageBox::new(&mut self.gui, message, &buttons, options);
        tracing::debug!("Created interactive box {:?} with {} button(s)", dialog.handle(), buttons.len());
        self.interactive = Some(dialog);
        true
    }

    pub fn is_interactive_message_box(&self) -> bool {
        self.interactive.is_some()
    }

    /// Destroy every box at once. An unread button press is kept.
    pub fn clear(&mut self) {
        if let Some(dialog) = self.interactive.take() {
            dialog.destroy(&mut self.gui);
        }
        for (_, mb) in self.message_boxes.drain(..) {
            mb.destroy(&mut self.gui);
        }
        self.status_box = None;
        tracing::debug!("Cleared all message boxes");
    }

    /// Return the last pressed button and reset it to [`NO_BUTTON`].
    pub fn read_pressed_button(&mut self) -> i32 {
        std::mem::replace(&mut self.last_pressed_button, NO_BUTTON)
    }

    /// Record a button press and notify (then drop) every pending subscriber.
    pub fn on_button_pressed(&mut self, button: i32) {
        self.last_pressed_button = button;
        let notified = self.button_pressed.dispatch(button);
        tracing::debug!("Button {} pressed, {} subscriber(s) notified", button, notified);
    }

    /// Be notified of the next button press only.
    pub fn subscribe_button_pressed<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(i32) + 'static,
    {
        self.button_pressed.subscribe(callback)
    }

    pub fn unsubscribe_button_pressed(&mut self, id: SubscriberId) -> bool {
        self.button_pressed.unsubscribe(id)
    }

    /// Route toolkit input to the live dialog. Returns true if it chose a button.
    pub fn handle_toolkit_event(&mut self, event: ToolkitEvent) -> bool {
        let Some(dialog) = self.interactive.as_mut() else {
            return false;
        };
        let Some(button) = dialog.handle_event(&mut self.gui, event) else {
            return false;
        };

        self.on_button_pressed(button as i32);
        if let Some(dialog) = self.interactive.as_mut() {
            dialog.mark_for_deletion();
        }
        true
    }

    /// Static boxes in stacking order, lowest first.
    pub fn static_messages(&self) -> impl Iterator<Item = (MessageBoxId, &MessageBox)> {
        self.message_boxes.iter().map(|(id, mb)| (*id, mb))
    }

    pub fn static_message_count(&self) -> usize {
        self.message_boxes.len()
    }

    pub fn message_box(&self, id: MessageBoxId) -> Option<&MessageBox> {
        self.message_boxes.iter().find(|(bid, _)| *bid == id).map(|(_, mb)| mb)
    }

    pub fn status_message(&self) -> Option<&MessageBox> {
        self.status_box.and_then(|id| self.message_box(id))
    }

    pub fn interactive(&self) -> Option<&InteractiveMessageBox> {
        self.interactive.as_ref()
    }

    pub fn time_per_char(&self) -> f64 {
        self.time_per_char
    }

    /// Change the display speed. Only boxes created afterwards are affected.
    /// NaN, infinite and negative speeds are replaced by the default.
    pub fn set_time_per_char(&mut self, time_per_char: f64) {
        self.time_per_char = sanitize_time_per_char(time_per_char);
    }

    pub fn gui(&self) -> &G {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut G {
        &mut self.gui
    }

    /// Drop the oldest non-status boxes until one more fits under the limit.
    /// Runs before the new box is pushed, so the new box is never a candidate.
    /// A live status box is kept even when that leaves the stack one over.
    fn make_room_for_one(&mut self) {
        let Some(max) = self.max_static_boxes else {
            return;
        };
        while self.message_boxes.len() >= max {
            let Some(index) = self
                .message_boxes
                .iter()
                .position(|(id, _)| Some(*id) != self.status_box)
            else {
                break;
            };
            let (id, mb) = self.message_boxes.remove(index);
            tracing::debug!("Message box limit {} reached, dropping {:?}", max, id);
            mb.destroy(&mut self.gui);
        }
    }

    /// Stack boxes bottom-up: each sits on top of everything created before it.
    fn update_offsets(&mut self) {
        let mut height = 0;
        for (_, mb) in &mut self.message_boxes {
            mb.update(&mut self.gui, self.bottom_padding + height);
            height += mb.height();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::HeadlessGui;

    fn manager() -> MessageBoxManager<HeadlessGui> {
        MessageBoxManager::new(HeadlessGui::new(10, 0), 0.1)
    }

    #[test]
    fn test_offsets_are_running_sums() {
        let config = MessageBoxConfig {
            bottom_padding: 5,
            next_box_padding: 3,
            ..Default::default()
        };
        let mut mgr = MessageBoxManager::from_config(HeadlessGui::new(10, 0), &config);
        let a = mgr.create_message_box("one", false);
        let b = mgr.create_message_box("two\nlines", false);
        let c = mgr.create_message_box("three", false);

        assert_eq!(mgr.message_box(a).unwrap().offset(), 5);
        assert_eq!(mgr.message_box(b).unwrap().offset(), 5 + 13);
        assert_eq!(mgr.message_box(c).unwrap().offset(), 5 + 13 + 23);

        mgr.remove_message_box(a);
        assert_eq!(mgr.message_box(b).unwrap().offset(), 5);
        assert_eq!(mgr.message_box(c).unwrap().offset(), 5 + 23);
        let panel = mgr.gui().panel(mgr.message_box(c).unwrap().handle()).unwrap();
        assert_eq!(panel.offset, 28);
    }

    #[test]
    fn test_limit_drops_oldest_but_keeps_status() {
        let config = MessageBoxConfig {
            max_static_boxes: Some(2),
            ..Default::default()
        };
        let mut mgr = MessageBoxManager::from_config(HeadlessGui::default(), &config);
        let status = mgr.create_message_box("status", true);
        mgr.create_message_box("first", false);
        mgr.create_message_box("second", false);

        let texts: Vec<_> = mgr.static_messages().map(|(_, mb)| mb.text()).collect();
        assert_eq!(texts, vec!["status", "second"]);
        assert!(mgr.message_box(status).is_some());
        assert_eq!(mgr.gui().text_panels().len(), 2);
    }

    #[test]
    fn test_limit_never_drops_new_box() {
        let config = MessageBoxConfig {
            max_static_boxes: Some(1),
            ..Default::default()
        };
        let mut mgr = MessageBoxManager::from_config(HeadlessGui::default(), &config);
        let status = mgr.create_message_box("status", true);
        let fresh = mgr.create_message_box("fresh", false);

        assert!(mgr.message_box(fresh).is_some());
        assert!(mgr.message_box(status).is_some());

        let newer = mgr.create_message_box("newer", false);
        assert!(mgr.message_box(newer).is_some());
        assert!(mgr.message_box(fresh).is_none());
        assert_eq!(mgr.static_message_count(), 2);
    }

    #[test]
    fn test_limit_of_one_keeps_latest() {
        let config = MessageBoxConfig {
            max_static_boxes: Some(1),
            ..Default::default()
        };
        let mut mgr = MessageBoxManager::from_config(HeadlessGui::default(), &config);
        mgr.create_message_box("first", false);
        let second = mgr.create_message_box("second", false);

        let texts: Vec<_> = mgr.static_messages().map(|(_, mb)| mb.text()).collect();
        assert_eq!(texts, vec!["second"]);
        assert!(mgr.message_box(second).is_some());
    }

    #[test]
    fn test_nan_time_per_char_falls_back() {
        let mut mgr = MessageBoxManager::new(HeadlessGui::default(), f64::NAN);
        assert_eq!(mgr.time_per_char(), 0.1);
        mgr.create_message_box("hello", false);
        mgr.on_frame(1.0);
        assert_eq!(mgr.static_message_count(), 0);
    }

    #[test]
    fn test_negative_time_per_char_falls_back() {
        let mut mgr = manager();
        mgr.set_time_per_char(-1.0);
        let id = mgr.create_message_box("hello", false);
        assert!((mgr.message_box(id).unwrap().max_time - 0.5).abs() < 1e-9);

        mgr.on_frame(0.25);
        assert!(mgr.message_box(id).is_some());
    }

    #[test]
    fn test_answered_dialog_swept_next_frame() {
        let mut mgr = manager();
        assert!(mgr.create_interactive_message_box("Rest?", ["Yes", "No"]));
        let panel = mgr.interactive().unwrap().handle();

        assert!(mgr.handle_toolkit_event(ToolkitEvent::ButtonClicked { panel, button: 1 }));
        assert!(mgr.interactive().unwrap().is_marked_for_deletion());
        assert!(mgr.is_interactive_message_box());
        assert!(mgr.gui().panel(panel).is_some());

        mgr.on_frame(0.0);
        assert!(!mgr.is_interactive_message_box());
        assert!(mgr.gui().panel(panel).is_none());
        assert_eq!(mgr.read_pressed_button(), 1);
    }

    #[test]
    fn test_event_without_dialog_is_ignored() {
        let mut mgr = manager();
        let stray = ToolkitEvent::ButtonClicked { panel: crate::widget::WidgetHandle(0), button: 0 };
        assert!(!mgr.handle_toolkit_event(stray));
        assert_eq!(mgr.read_pressed_button(), NO_BUTTON);
    }
}
