//! The book catalog and its flat-file persistence.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{
    book::BookRecord,
    error::{LibraryError, Result},
};

/// Origin reported for loads and saves that do not go through a path
const STREAM_ORIGIN: &str = "stream";

/// Criteria accepted by [`Catalog::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriterion {
    /// Case-insensitive substring of the title
    Title(String),
    /// Case-insensitive substring of the author
    Author(String),
    /// Exact ISBN
    Isbn(String),
}

impl SearchCriterion {
    /// Check whether a record satisfies this criterion
    #[must_use]
    pub fn matches(&self, record: &BookRecord) -> bool {
        match self {
            Self::Title(needle) => contains_ignore_case(&record.title, needle),
            Self::Author(needle) => contains_ignore_case(&record.author, needle),
            Self::Isbn(isbn) => record.isbn == *isbn,
        }
    }
}

/// Case-insensitive substring test
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Unordered collection of book records
///
/// Records are kept in insertion order, oldest first. That is the order of
/// [`Catalog::all`], of lookups and of saved files, so a save followed by a
/// load reproduces the same sequence.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Records in insertion order
    records: Vec<BookRecord>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Duplicate titles are allowed.
    pub fn add(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    /// Return the first record whose title matches exactly
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&BookRecord> {
        self.records.iter().find(|record| record.title == title)
    }

    /// Enumerate every record, oldest first
    pub fn all(&self) -> impl Iterator<Item = &BookRecord> {
        self.records.iter()
    }

    /// Collect the records matching `criterion`, in catalog order
    #[must_use]
    pub fn search(&self, criterion: &SearchCriterion) -> Vec<&BookRecord> {
        self.records.iter().filter(|record| criterion.matches(record)).collect()
    }

    /// Number of records held
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the catalog contents with the records read from `source`.
    ///
    /// Lines that do not hold exactly six fields or are not valid UTF-8 are
    /// skipped. On a read failure the catalog is left empty.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Load` if `source` fails while being read.
    pub fn load_from(&mut self, source: impl BufRead) -> Result<usize> {
        self.load_with_origin(source, STREAM_ORIGIN)
    }

    /// Replace the catalog contents with the records of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Load` if the file cannot be opened or read. The
    /// catalog is empty afterwards in both cases.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        match File::open(path) {
            Ok(file) => self.load_with_origin(BufReader::new(file), &origin),
            Err(source) => {
                self.records.clear();
                Err(LibraryError::Load { origin, source })
            }
        }
    }

    /// Shared body of the two load entry points
    fn load_with_origin(&mut self, source: impl BufRead, origin: &str) -> Result<usize> {
        self.records.clear();

        let mut loaded = Vec::new();
        for (index, bytes) in source.split(b'\n').enumerate() {
            let bytes = bytes
                .map_err(|source| LibraryError::Load { origin: origin.to_string(), source })?;
            let line_number = index.saturating_add(1);
            let Ok(line) = String::from_utf8(bytes) else {
                warn!(origin, line = line_number, "skipping catalog line that is not valid UTF-8");
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            match BookRecord::from_line(&line) {
                Some(record) => loaded.push(record),
                None => warn!(origin, line = line_number, "skipping malformed catalog line"),
            }
        }

        self.records = loaded;
        info!(origin, records = self.records.len(), "catalog loaded");
        Ok(self.records.len())
    }

    /// Write every record, one line each, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Save` if writing to `sink` fails.
    pub fn save_to(&self, sink: impl Write) -> Result<()> {
        self.save_with_origin(sink, STREAM_ORIGIN)
    }

    /// Write the catalog to the file at `path`, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Save` if the file cannot be created or written.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::create(path)
            .map_err(|source| LibraryError::Save { origin: origin.clone(), source })?;
        self.save_with_origin(BufWriter::new(file), &origin)
    }

    /// Shared body of the two save entry points
    fn save_with_origin(&self, mut sink: impl Write, origin: &str) -> Result<()> {
        let to_error = |source| LibraryError::Save { origin: origin.to_string(), source };
        for record in &self.records {
            writeln!(sink, "{}", record.to_line()).map_err(to_error)?;
        }
        sink.flush().map_err(to_error)?;

        info!(origin, records = self.records.len(), "catalog saved");
        Ok(())
    }
}
