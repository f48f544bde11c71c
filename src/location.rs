//! Address fragment and navigation history.
//!
//! Models the page address as an explicit value owned by the app: a stack
//! of fragment entries with a cursor, mirroring browser history semantics.
//! `push` creates a back-navigable entry, `replace` keeps the address
//! accurate without growing history, and `back`/`forward` move the cursor.

/// Fragment history with a current-entry cursor. The empty string stands
/// for "no fragment".
#[derive(Debug, Clone)]
pub struct Location {
    entries: Vec<String>,
    index: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl Location {
    /// Start with a single fragment-less entry
    pub fn new() -> Self {
        Self {
            entries: vec![String::new()],
            index: 0,
        }
    }

    /// Start with an initial fragment, as when the page is opened via a
    /// shared `#id` link
    pub fn with_fragment(fragment: &str) -> Self {
        Self {
            entries: vec![fragment.to_string()],
            index: 0,
        }
    }

    /// Fragment of the current entry
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Create a new history entry and move to it. Any forward entries are
    /// discarded, as a browser would on navigation after going back.
    pub fn push(&mut self, fragment: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(fragment.to_string());
        self.index += 1;
    }

    /// Overwrite the current entry in place without creating history
    pub fn replace(&mut self, fragment: &str) {
        self.entries[self.index] = fragment.to_string();
    }

    /// Move one entry back, returning the new fragment, or `None` at the
    /// oldest entry
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Move one entry forward, returning the new fragment, or `None` at
    /// the newest entry
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Whether a back navigation is possible
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Whether a forward navigation is possible
    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of history entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: there is at least the initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
