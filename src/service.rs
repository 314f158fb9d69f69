use std::{
    fmt,
    io::{BufRead, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    action_log::{ActionEntry, ActionKind, ActionLog},
    book::BookRecord,
    catalog::{Catalog, SearchCriterion},
    error::{LibraryError, Result},
    observers::{ActionObserver, TracingObserver},
    request_queue::{ReaderRequest, RequestQueue},
};

/// What a fulfilled return hands back for display
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnedInfo {
    /// Reader who held the request
    pub reader_name: String,
    /// Identity document of that reader
    pub reader_id: String,
    /// Title of the returned book
    pub book_title: String,
}

impl From<ReaderRequest> for ReturnedInfo {
    fn from(request: ReaderRequest) -> Self {
        Self {
            reader_name: request.reader_name,
            reader_id: request.reader_id,
            book_title: request.book_title,
        }
    }
}

/// Coordinates the catalog, the request queue and the action history
///
/// This is the only type that touches more than one of them per operation.
/// Each public method runs as a single step: it either completes every
/// mutation it implies or performs none.
pub struct LibraryService {
    /// Books known to the library
    catalog: Catalog,
    /// Requests waiting to be fulfilled
    requests: RequestQueue,
    /// History of every mutation
    history: ActionLog,
    /// Registered action observers
    observers: Vec<Box<dyn ActionObserver>>,
}

// Manual implementation of Debug for LibraryService
impl fmt::Debug for LibraryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryService")
            .field("catalog", &self.catalog)
            .field("requests", &self.requests)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for LibraryService {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryService {
    /// Create a service with an empty catalog and the tracing observer attached
    #[must_use]
    pub fn new() -> Self {
        let mut service = Self::without_observers();
        service.register_observer(Box::new(TracingObserver));
        service
    }

    /// Create a service with an empty catalog and no observers
    #[must_use]
    pub fn without_observers() -> Self {
        Self {
            catalog: Catalog::new(),
            requests: RequestQueue::new(),
            history: ActionLog::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of recorded actions
    pub fn register_observer(&mut self, observer: Box<dyn ActionObserver>) {
        self.observers.push(observer);
    }

    /// Add a book to the catalog
    pub fn add_book(&mut self, record: BookRecord) {
        let description = ActionKind::BookAdded.describe(&record.title, "");
        self.catalog.add(record);
        self.record(description);
    }

    /// Admit a request for `title` if the catalog holds it
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if no record carries `title`. Nothing
    /// is enqueued or recorded in that case.
    pub fn request_book(&mut self, reader_name: &str, reader_id: &str, title: &str) -> Result<()> {
        if self.catalog.find_by_title(title).is_none() {
            return Err(LibraryError::NotFound(title.to_string()));
        }

        self.requests.enqueue(ReaderRequest::new(reader_name, reader_id, title));
        self.record(ActionKind::BookRequested.describe(title, reader_name));
        Ok(())
    }

    /// Fulfill the oldest pending request
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::EmptyQueue` if nothing is pending. That error is
    /// informational and nothing is recorded.
    pub fn return_book(&mut self) -> Result<ReturnedInfo> {
        let request = self.requests.dequeue()?;
        self.record(ActionKind::BookReturned.describe(&request.book_title, &request.reader_name));
        Ok(request.into())
    }

    /// Pop the most recent action that has not been reviewed yet
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::EmptyLog` once every action has been reviewed.
    pub fn review_last_action(&mut self) -> Result<ActionEntry> {
        self.history.pop()
    }

    /// Search the catalog
    #[must_use]
    pub fn search(&self, criterion: &SearchCriterion) -> Vec<&BookRecord> {
        self.catalog.search(criterion)
    }

    /// Replace the catalog with the records read from `source`
    ///
    /// Every loaded record is recorded as an addition, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Load` if reading fails. The catalog is left
    /// empty and nothing is recorded.
    pub fn load_catalog(&mut self, source: impl BufRead) -> Result<usize> {
        let loaded = self.catalog.load_from(source)?;
        self.record_loaded();
        Ok(loaded)
    }

    /// Replace the catalog with the records of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Load` if the file cannot be opened or read.
    pub fn load_catalog_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let loaded = self.catalog.load_from_path(path)?;
        self.record_loaded();
        Ok(loaded)
    }

    /// Write the catalog to `sink`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Save` if writing fails.
    pub fn save_catalog(&self, sink: impl Write) -> Result<()> {
        self.catalog.save_to(sink)
    }

    /// Write the catalog to the file at `path`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Save` if the file cannot be created or written.
    pub fn save_catalog_path(&self, path: impl AsRef<Path>) -> Result<()> {
        self.catalog.save_to_path(path)
    }

    /// The catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The pending requests
    #[must_use]
    pub fn requests(&self) -> &RequestQueue {
        &self.requests
    }

    /// The action history
    #[must_use]
    pub fn history(&self) -> &ActionLog {
        &self.history
    }

    /// Record one addition per catalog record
    fn record_loaded(&mut self) {
        let descriptions: Vec<String> = self
            .catalog
            .all()
            .map(|record| ActionKind::BookAdded.describe(&record.title, ""))
            .collect();
        for description in descriptions {
            self.record(description);
        }
    }

    /// Append to the history and notify observers
    fn record(&mut self, description: String) {
        let entry = self.history.record(description);
        for observer in &self.observers {
            observer.on_action(&entry);
        }
    }
}
