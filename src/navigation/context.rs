//! Navigation context: the controller's only view of the browser.
//!
//! # Responsibilities
//! - Read the current location
//! - Push and replace history entries
//! - Reset scroll position
//!
//! # Design Decisions
//! - Injected into the controller instead of reached for as a global
//! - `MemoryHistory` backs tests and offline tooling

/// History primitives the router controller needs.
pub trait NavigationContext {
    /// Current location: path, optionally followed by query and fragment.
    fn current_path(&self) -> String;

    /// Append a new history entry and make it current.
    fn push(&mut self, path: &str);

    /// Overwrite the current history entry.
    fn replace(&mut self, path: &str);

    fn scroll_to_top(&mut self);
}

/// In-memory history with back/forward stacks.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
    scroll_resets: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    pub fn with_initial_path(path: impl Into<String>) -> Self {
        Self {
            entries: vec![path.into()],
            index: 0,
            scroll_resets: 0,
        }
    }

    /// Step back one entry. Returns false at the start of history.
    ///
    /// Like the browser, this only moves the cursor; the caller delivers the
    /// resulting history-changed event to the controller.
    pub fn go_back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn go_forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// How often the viewport was scrolled to the top.
    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets
    }
}

impl NavigationContext for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, path: &str) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = path.to_string(),
            None => self.entries.push(path.to_string()),
        }
    }

    fn scroll_to_top(&mut self) {
        self.scroll_resets += 1;
    }
}
