use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LibraryError, Result};

/// A reader asking for a book held in the catalog
///
/// Keeps a copy of the title, not a reference to the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ReaderRequest {
    /// Name of the requesting reader
    pub reader_name: String,
    /// Identity document of the reader
    pub reader_id: String,
    /// Title of the requested book
    pub book_title: String,
}

impl ReaderRequest {
    /// Create a new request
    #[must_use]
    pub fn new(
        reader_name: impl Into<String>,
        reader_id: impl Into<String>,
        book_title: impl Into<String>,
    ) -> Self {
        Self {
            reader_name: reader_name.into(),
            reader_id: reader_id.into(),
            book_title: book_title.into(),
        }
    }
}

/// First-in-first-out queue of pending reader requests
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    /// Pending requests, head at the front
    pending: VecDeque<ReaderRequest>,
}

impl RequestQueue {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request to the tail
    pub fn enqueue(&mut self, request: ReaderRequest) {
        debug!(reader = %request.reader_name, title = %request.book_title, "request enqueued");
        self.pending.push_back(request);
    }

    /// Remove and return the head request
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::EmptyQueue` if no request is pending.
    pub fn dequeue(&mut self) -> Result<ReaderRequest> {
        let request = self.pending.pop_front().ok_or(LibraryError::EmptyQueue)?;
        debug!(reader = %request.reader_name, title = %request.book_title, "request dequeued");
        Ok(request)
    }

    /// Whether no request is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending requests
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Pending requests from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &ReaderRequest> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequeue_in_arrival_order() {
        let mut queue = RequestQueue::new();
        queue.enqueue(ReaderRequest::new("Ana", "1", "Dune"));
        queue.enqueue(ReaderRequest::new("Luis", "2", "Emma"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue().ok().map(|r| r.reader_name), Some("Ana".to_string()));
        assert_eq!(queue.dequeue().ok().map(|r| r.reader_name), Some("Luis".to_string()));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_on_empty_queue() {
        let mut queue = RequestQueue::new();
        assert!(matches!(queue.dequeue(), Err(LibraryError::EmptyQueue)));
    }

    #[test]
    fn test_iter_does_not_consume() {
        let mut queue = RequestQueue::new();
        queue.enqueue(ReaderRequest::new("Ana", "1", "Dune"));
        queue.enqueue(ReaderRequest::new("Luis", "2", "Emma"));

        let titles: Vec<&str> = queue.iter().map(|r| r.book_title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Emma"]);
        assert_eq!(queue.len(), 2);
    }
}
