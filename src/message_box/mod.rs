//! In-game message boxes.
//!
//! - [`MessageBox`]: timed notification, stacked with the others
//! - [`InteractiveMessageBox`]: modal dialog with buttons, at most one live
//! - [`MessageBoxManager`]: owns both kinds and is ticked once per frame

mod interactive;
mod manager;
mod static_box;

pub use interactive::{DialogState, InteractiveMessageBox, InteractiveOptions};
pub use manager::{MessageBoxId, MessageBoxManager, NO_BUTTON};
pub use static_box::{MessageBox, display_time};
