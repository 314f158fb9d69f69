use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// The kinds of catalog mutation that are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ActionKind {
    /// A record entered the catalog
    BookAdded,
    /// A request was admitted to the queue
    BookRequested,
    /// The head request was fulfilled
    BookReturned,
}

impl ActionKind {
    /// Describe an action of this kind
    ///
    /// Additions only name the title. The other kinds also name the reader.
    #[must_use]
    pub fn describe(self, title: &str, reader_name: &str) -> String {
        match self {
            Self::BookAdded => format!("book added: {title}"),
            Self::BookRequested => format!("book requested: {title} by {reader_name}"),
            Self::BookReturned => format!("book returned: {title} by {reader_name}"),
        }
    }
}

/// One recorded action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionEntry {
    /// Zero-based position in the log
    pub sequence: u64,
    /// What happened
    pub description: String,
}

/// Append-only history of actions with last-in-first-out review
///
/// Popping walks backwards through the history without removing anything
/// from the stored sequence.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    /// Every entry ever recorded, oldest first
    entries: Vec<ActionEntry>,
    /// Positions of entries not yet popped, most recent last
    unreviewed: Vec<usize>,
}

impl ActionLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a copy of it
    pub fn record(&mut self, description: impl Into<String>) -> ActionEntry {
        let position = self.entries.len();
        let entry = ActionEntry {
            sequence: u64::try_from(position).unwrap_or(u64::MAX),
            description: description.into(),
        };
        self.entries.push(entry.clone());
        self.unreviewed.push(position);
        entry
    }

    /// Whether every entry has been popped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unreviewed.is_empty()
    }

    /// Return the most recent entry not yet popped
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::EmptyLog` once every entry has been popped.
    pub fn pop(&mut self) -> Result<ActionEntry> {
        self.unreviewed
            .pop()
            .and_then(|position| self.entries.get(position))
            .cloned()
            .ok_or(LibraryError::EmptyLog)
    }

    /// Total number of entries ever recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All entries in chronological order
    #[must_use]
    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_is_last_in_first_out() {
        let mut log = ActionLog::new();
        log.record("first");
        log.record("second");

        assert_eq!(log.pop().ok().map(|e| e.description), Some("second".to_string()));
        assert_eq!(log.pop().ok().map(|e| e.description), Some("first".to_string()));
        assert!(log.is_empty());
        assert!(matches!(log.pop(), Err(LibraryError::EmptyLog)));
    }

    #[test]
    fn test_pop_keeps_stored_order() {
        let mut log = ActionLog::new();
        log.record("first");
        log.record("second");
        drop(log.pop());
        log.record("third");

        // The newest unreviewed entry comes back first, then older ones
        assert_eq!(log.pop().ok().map(|e| e.sequence), Some(2));
        assert_eq!(log.pop().ok().map(|e| e.sequence), Some(0));

        let descriptions: Vec<&str> =
            log.entries().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_record_returns_the_stored_entry() {
        let mut log = ActionLog::new();
        let first = log.record("first");
        let second = log.record("second");

        assert_eq!(first.sequence, 0);
        assert_eq!(second.sequence, 1);
        assert_eq!(log.entries().last(), Some(&second));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ActionKind::BookAdded.describe("Dune", "Ana"), "book added: Dune");
        assert_eq!(
            ActionKind::BookRequested.describe("Dune", "Ana"),
            "book requested: Dune by Ana"
        );
        assert_eq!(
            ActionKind::BookReturned.describe("Dune", "Ana"),
            "book returned: Dune by Ana"
        );
    }
}
