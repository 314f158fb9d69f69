//! In-memory library catalog with a request queue and an action history.
//!
//! This crate holds a catalog of book records, admits reader requests only
//! for titles the catalog knows, fulfills them in arrival order and keeps an
//! append-only history of every mutation. The catalog persists to a flat
//! comma-separated text file.

pub mod action_log;
pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod menu;
pub mod observers;
pub mod request_queue;
pub mod service;

pub use action_log::{ActionEntry, ActionKind, ActionLog};
pub use book::BookRecord;
pub use catalog::{Catalog, SearchCriterion};
pub use config::LibraryConfig;
pub use error::{LibraryError, Result};
pub use observers::{ActionObserver, TracingObserver};
pub use request_queue::{ReaderRequest, RequestQueue};
pub use service::{LibraryService, ReturnedInfo};
