//! Server state management for the line server

use crate::draw::renderer::LineRenderer;
use indexmap::IndexMap;

/// In-memory state: every line widget the client has created, in creation order
pub struct ServerState {
    pub widgets: IndexMap<String, LineRenderer>,
    pub requests_handled: u64,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            widgets: IndexMap::new(),
            requests_handled: 0,
        }
    }

    pub fn widget(&self, widget_id: &str) -> Option<&LineRenderer> {
        self.widgets.get(widget_id)
    }

    pub fn widget_mut(&mut self, widget_id: &str) -> Option<&mut LineRenderer> {
        self.widgets.get_mut(widget_id)
    }

    /// Check if a widget exists
    pub fn has_widget(&self, widget_id: &str) -> bool {
        self.widgets.contains_key(widget_id)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
