//! Registry of live toolkit panels.

use super::{Panel, PanelKind, WidgetHandle};
use std::collections::HashMap;

/// Registry of every panel the toolkit currently owns.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    panels: HashMap<WidgetHandle, Panel>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new panel.
    pub fn register(&mut self, panel: Panel) -> WidgetHandle {
        let handle = panel.handle;
        if self.panels.contains_key(&handle) {
            tracing::warn!("Re-registering panel {:?}", handle);
        }
        self.panels.insert(handle, panel);
        handle
    }

    /// Remove a panel, returning it if it was registered.
    pub fn remove(&mut self, handle: WidgetHandle) -> Option<Panel> {
        self.panels.remove(&handle)
    }

    /// Get a panel by handle.
    pub fn get(&self, handle: WidgetHandle) -> Option<&Panel> {
        self.panels.get(&handle)
    }

    /// Get a mutable panel by handle.
    pub fn get_mut(&mut self, handle: WidgetHandle) -> Option<&mut Panel> {
        self.panels.get_mut(&handle)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Handles of all panels of one kind, oldest first.
    pub fn handles_of_kind(&self, kind: PanelKind) -> Vec<WidgetHandle> {
        let mut handles: Vec<_> = self
            .panels
            .values()
            .filter(|p| p.kind == kind)
            .map(|p| p.handle)
            .collect();
        handles.sort();
        handles
    }
}
