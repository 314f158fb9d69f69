#![allow(clippy::unwrap_used, missing_docs)]

use library_catalog::{BookRecord, Catalog, LibraryError, LibraryService};
use proptest::prelude::*;
use tempfile::TempDir;

/// Strategy for text fields that survive the unescaped line format
fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .'-]{0,16}"
}

/// Strategy for arbitrary catalog records
fn book() -> impl Strategy<Value = BookRecord> {
    (field(), field(), any::<i32>(), field(), field(), any::<u32>()).prop_map(
        |(title, author, year, publisher, isbn, page_count)| {
            BookRecord::new(title, author, year, publisher, isbn, page_count)
        },
    )
}

#[test]
fn test_save_and_reload_through_a_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.txt");

    let mut service = LibraryService::without_observers();
    service.add_book(BookRecord::new("Dune", "Herbert", 1965, "Ace", "0441013597", 412));
    service.add_book(BookRecord::new("Iliad", "Homer", -750, "Penguin", "9780140275360", 704));
    service.save_catalog_path(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "Dune,Herbert,1965,Ace,0441013597,412\nIliad,Homer,-750,Penguin,9780140275360,704\n"
    );

    let mut reloaded = LibraryService::without_observers();
    assert_eq!(reloaded.load_catalog_path(&path).unwrap(), 2);
    assert!(reloaded.request_book("Ana", "123", "Iliad").is_ok());
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("library.txt");

    let catalog = Catalog::new();
    let result = catalog.save_to_path(&path);
    assert!(matches!(result, Err(LibraryError::Save { .. })));
    assert!(!path.exists());
}

proptest! {
    #[test]
    fn prop_catalog_holds_exactly_the_added_records(books in prop::collection::vec(book(), 0..20)) {
        let mut service = LibraryService::without_observers();
        for record in &books {
            service.add_book(record.clone());
        }

        let held: Vec<BookRecord> = service.catalog().all().cloned().collect();
        prop_assert_eq!(held, books.clone());
        prop_assert_eq!(service.history().len(), books.len());
    }

    #[test]
    fn prop_file_round_trip_preserves_records(books in prop::collection::vec(book(), 0..20)) {
        let mut catalog = Catalog::new();
        for record in &books {
            catalog.add(record.clone());
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.txt");
        catalog.save_to_path(&path).unwrap();

        let mut reloaded = Catalog::new();
        prop_assert_eq!(reloaded.load_from_path(&path).unwrap(), books.len());
        let held: Vec<BookRecord> = reloaded.all().cloned().collect();
        prop_assert_eq!(held, books);
    }

    #[test]
    fn prop_returns_follow_request_order(
        titles in prop::collection::vec("[A-Z][a-z]{1,8}", 1..10)
    ) {
        let mut service = LibraryService::without_observers();
        for title in &titles {
            service.add_book(BookRecord::new(title.as_str(), "Author", 2000, "Press", "isbn", 100));
        }
        for (reader, title) in titles.iter().enumerate() {
            service.request_book(&format!("reader-{reader}"), "id", title).unwrap();
        }

        for (reader, title) in titles.iter().enumerate() {
            let info = service.return_book().unwrap();
            prop_assert_eq!(&info.book_title, title);
            prop_assert_eq!(info.reader_name, format!("reader-{reader}"));
        }
        prop_assert!(matches!(service.return_book(), Err(LibraryError::EmptyQueue)));
    }
}
