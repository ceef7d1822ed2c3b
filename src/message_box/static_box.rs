//! Timed, non-interactive notification.

use crate::widget::{GuiToolkit, WidgetHandle};

/// One static message. Expires once `elapsed_time` reaches `max_time`.
#[derive(Debug)]
pub struct MessageBox {
    handle: WidgetHandle,
    text: String,
    /// Seconds this box has been on screen.
    pub elapsed_time: f64,
    /// Seconds this box stays on screen.
    pub max_time: f64,
    height_px: i32,
    next_box_padding: i32,
    offset: i32,
}

/// Relative slack for accumulated frame deltas falling a few ulps short of `max_time`.
const EXPIRY_TOLERANCE: f64 = 1e-12;

/// Display duration for `text`: one `time_per_char` per character.
pub fn display_time(text: &str, time_per_char: f64) -> f64 {
    text.chars().count() as f64 * time_per_char
}

impl MessageBox {
    pub fn new(
        gui: &mut impl GuiToolkit,
        text: &str,
        time_per_char: f64,
        next_box_padding: i32,
    ) -> Self {
        let handle = gui.create_text_panel(text);
        Self {
            handle,
            text: text.to_string(),
            elapsed_time: 0.0,
            max_time: display_time(text, time_per_char),
            height_px: gui.preferred_height(handle),
            next_box_padding,
            offset: 0,
        }
    }

    /// Replace the text. The display timer starts over for the new content.
    pub fn set_message(&mut self, gui: &mut impl GuiToolkit, text: &str, time_per_char: f64) {
        gui.set_text(self.handle, text);
        self.text = text.to_string();
        self.max_time = display_time(text, time_per_char);
        self.elapsed_time = 0.0;
        self.height_px = gui.preferred_height(self.handle);
    }

    /// Vertical extent this box takes up in the stack, gap included.
    pub fn height(&self) -> i32 {
        self.height_px + self.next_box_padding
    }

    /// Reposition the panel. Only the manager's stacking pass calls this.
    pub(crate) fn update(&mut self, gui: &mut impl GuiToolkit, offset: i32) {
        self.offset = offset;
        gui.set_offset(self.handle, offset);
    }

    /// Advance the timer; negative steps are treated as zero.
    pub(crate) fn advance(&mut self, dt: f64) {
        self.elapsed_time += dt.max(0.0);
    }

    /// Whether the display time is used up. The slack scales with `max_time`,
    /// so even very short boxes survive a frame with no elapsed time.
    pub fn is_expired(&self) -> bool {
        self.elapsed_time + self.max_time * EXPIRY_TOLERANCE >= self.max_time
    }

    pub(crate) fn destroy(self, gui: &mut impl GuiToolkit) {
        gui.destroy(self.handle);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle(&self) -> WidgetHandle {
        self.handle
    }

    /// Current distance above the bottom of the screen.
    pub fn offset(&self) -> i32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::HeadlessGui;

    #[test]
    fn test_max_time_counts_chars_not_bytes() {
        let mut gui = HeadlessGui::new(10, 0);
        let mb = MessageBox::new(&mut gui, "héllo", 0.5, 0);
        assert_eq!(mb.max_time, 2.5);
    }

    #[test]
    fn test_expires_at_boundary() {
        let mut gui = HeadlessGui::new(10, 0);
        let mut mb = MessageBox::new(&mut gui, "abcd", 0.25, 0);
        mb.advance(0.5);
        assert!(!mb.is_expired());
        mb.advance(0.5);
        assert!(mb.is_expired());
    }

    #[test]
    fn test_accumulated_small_steps_reach_boundary() {
        let mut gui = HeadlessGui::new(10, 0);
        let mut mb = MessageBox::new(&mut gui, "0123456789", 0.1, 0);
        for _ in 0..9 {
            mb.advance(0.1);
        }
        assert!(!mb.is_expired());
        mb.advance(0.1);
        assert!(mb.is_expired());
    }

    #[test]
    fn test_tiny_time_per_char_survives_zero_dt() {
        let mut gui = HeadlessGui::new(10, 0);
        let mut mb = MessageBox::new(&mut gui, "a", 1e-10, 0);
        mb.advance(0.0);
        assert!(!mb.is_expired());
        mb.advance(1e-10);
        assert!(mb.is_expired());
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut gui = HeadlessGui::new(10, 0);
        let mut mb = MessageBox::new(&mut gui, "abcd", 1.0, 0);
        mb.advance(1.0);
        mb.advance(-5.0);
        assert_eq!(mb.elapsed_time, 1.0);
    }

    #[test]
    fn test_set_message_restarts_timer() {
        let mut gui = HeadlessGui::new(10, 2);
        let mut mb = MessageBox::new(&mut gui, "short", 0.1, 5);
        mb.advance(0.3);
        mb.set_message(&mut gui, "two\nlines", 0.1);

        assert_eq!(mb.elapsed_time, 0.0);
        assert!((mb.max_time - 0.9).abs() < 1e-9);
        assert_eq!(mb.height(), 2 * 10 + 2 + 5);
        assert_eq!(gui.panel(mb.handle()).unwrap().text, "two\nlines");
    }

    #[test]
    fn test_destroy_releases_panel() {
        let mut gui = HeadlessGui::default();
        let mb = MessageBox::new(&mut gui, "bye", 0.1, 0);
        let handle = mb.handle();
        mb.destroy(&mut gui);
        assert!(gui.panel(handle).is_none());
    }
}
