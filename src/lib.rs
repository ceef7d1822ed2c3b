//! Message box simulator
//!
//! Frame-driven manager for in-game notifications: timed static messages
//! stacked at the bottom of the screen and a single modal dialog whose
//! answer is delivered through a one-shot callback channel.

pub mod config;
pub mod error;
pub mod event;
pub mod message_box;
pub mod widget;

pub use config::MessageBoxConfig;
pub use error::{Error, Result};
pub use message_box::{
    InteractiveMessageBox, InteractiveOptions, MessageBox, MessageBoxId, MessageBoxManager,
    NO_BUTTON,
};
pub use widget::{GuiToolkit, HeadlessGui, Key, ToolkitEvent, WidgetHandle};
