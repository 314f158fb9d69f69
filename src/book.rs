use std::fmt;

use serde::{Deserialize, Serialize};

/// A single book held by the catalog
///
/// The title acts as identity, but duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BookRecord {
    /// Title used for lookups and requests
    pub title: String,
    /// Author name
    pub author: String,
    /// Publication year, negative for years before the common era
    pub year: i32,
    /// Publisher name
    pub publisher: String,
    /// ISBN as written, without format validation
    pub isbn: String,
    /// Number of pages
    pub page_count: u32,
}

impl BookRecord {
    /// Create a record from its six fields
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        publisher: impl Into<String>,
        isbn: impl Into<String>,
        page_count: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            publisher: publisher.into(),
            isbn: isbn.into(),
            page_count,
        }
    }

    /// Parse one `title,author,year,publisher,isbn,pageCount` line.
    ///
    /// Returns `None` unless the line splits into exactly six fields. Numeric
    /// fields that do not parse become zero.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(',').collect();
        let [title, author, year, publisher, isbn, page_count] = fields.as_slice() else {
            return None;
        };

        Some(Self::new(
            *title,
            *author,
            parse_year(year),
            *publisher,
            *isbn,
            parse_page_count(page_count),
        ))
    }

    /// Render the record as a catalog line, without the trailing newline
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.title, self.author, self.year, self.publisher, self.isbn, self.page_count
        )
    }
}

/// Parse a year, falling back to zero on malformed input
#[must_use]
pub fn parse_year(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse a page count, falling back to zero on malformed input
#[must_use]
pub fn parse_page_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, Year: {}, Publisher: {}, ISBN: {}, Pages: {}",
            self.title, self.author, self.year, self.publisher, self.isbn, self.page_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_well_formed_line() {
        let record = BookRecord::from_line("Dune,Herbert,1965,Ace,0441013597,412");
        assert_eq!(
            record,
            Some(BookRecord::new("Dune", "Herbert", 1965, "Ace", "0441013597", 412))
        );
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let record = BookRecord::from_line("Dune,Herbert,unknown,Ace,0441013597,many\r");
        assert_eq!(record.map(|r| (r.year, r.page_count)), Some((0, 0)));
    }

    #[test]
    fn test_numeric_fields_are_trimmed() {
        let record = BookRecord::from_line("Iliad,Homer, -750 ,Penguin,123, 704 ");
        assert_eq!(record.map(|r| (r.year, r.page_count)), Some((-750, 704)));
    }

    #[test]
    fn test_wrong_field_count_is_rejected() {
        assert_eq!(BookRecord::from_line("Dune,Herbert,1965"), None);
        assert_eq!(BookRecord::from_line(""), None);
        // Embedded commas are not escaped, so this line has seven fields
        assert_eq!(BookRecord::from_line("Dune, Part One,Herbert,1965,Ace,0441013597,412"), None);
    }

    #[test]
    fn test_line_format_matches_parser() {
        let record = BookRecord::new("Dune", "Herbert", 1965, "Ace", "0441013597", 412);
        assert_eq!(record.to_line(), "Dune,Herbert,1965,Ace,0441013597,412");
        assert_eq!(BookRecord::from_line(&record.to_line()), Some(record));
    }
}
