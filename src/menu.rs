//! Interactive text menu driving a [`LibraryService`].
//!
//! The loop reads from any `BufRead` and writes to any `Write`, so scripted
//! sessions can be run against in-memory buffers.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use colored::Colorize;

use crate::{
    book::{BookRecord, parse_page_count, parse_year},
    catalog::SearchCriterion,
    error::LibraryError,
    service::LibraryService,
};

/// Session settings taken from the command line and configuration file
#[derive(Debug, Clone)]
pub struct MenuOptions {
    /// File used by the save action
    pub catalog_path: PathBuf,
    /// Print catalog listings as JSON lines
    pub json: bool,
    /// Save the catalog when the session exits
    pub save_on_exit: bool,
}

/// Actions offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// List every book
    Display,
    /// Queue a request for a book
    Request,
    /// Fulfill the oldest request
    Return,
    /// Add a new book
    Add,
    /// Search by title, author or ISBN
    Search,
    /// List the waiting queue
    ShowQueue,
    /// Pop the most recent action from the history
    ReviewLast,
    /// Write the catalog file
    Save,
    /// Leave the session
    Exit,
}

impl MenuChoice {
    /// Map the option typed by the user to a choice
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Display),
            "2" => Some(Self::Request),
            "3" => Some(Self::Return),
            "4" => Some(Self::Add),
            "5" => Some(Self::Search),
            "6" => Some(Self::ShowQueue),
            "7" => Some(Self::ReviewLast),
            "8" => Some(Self::Save),
            "9" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Menu text shown before every prompt
const MENU_ITEMS: [&str; 9] = [
    "1. Display catalog",
    "2. Request a book",
    "3. Return a book",
    "4. Add a book",
    "5. Search catalog",
    "6. Show waiting queue",
    "7. Review last action",
    "8. Save catalog",
    "9. Exit",
];

/// Input and output of one running session
struct Session<'a, R, W> {
    /// Service being driven
    service: &'a mut LibraryService,
    /// Session settings
    options: &'a MenuOptions,
    /// Source of user input
    input: R,
    /// Destination of every message
    output: W,
}

/// Run the menu until the user exits or input ends.
///
/// Failed actions are reported and the loop continues.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run(
    service: &mut LibraryService,
    options: &MenuOptions,
    input: impl BufRead,
    output: impl Write,
) -> io::Result<()> {
    let mut session = Session { service, options, input, output };
    session.run()
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    /// Main loop
    fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                return self.exit();
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Display) => self.display_catalog()?,
                Some(MenuChoice::Request) => self.request_book()?,
                Some(MenuChoice::Return) => self.return_book()?,
                Some(MenuChoice::Add) => self.add_book()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::ShowQueue) => self.show_queue()?,
                Some(MenuChoice::ReviewLast) => self.review_last()?,
                Some(MenuChoice::Save) => self.save()?,
                Some(MenuChoice::Exit) => return self.exit(),
                None => writeln!(self.output, "{}", "Invalid option, please try again.".red())?,
            }
        }
    }

    /// Print the menu header and items
    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", "Library Catalog".green().bold())?;
        for item in MENU_ITEMS {
            writeln!(self.output, "{item}")?;
        }
        Ok(())
    }

    /// Print a prompt and read one line; `None` once input is exhausted
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print an error, using a softer tone for empty-state conditions
    fn report(&mut self, error: &LibraryError) -> io::Result<()> {
        if error.is_informational() {
            writeln!(self.output, "{}", error.to_string().yellow())
        } else {
            writeln!(self.output, "{} {}", "Error:".red().bold(), error)
        }
    }

    /// Write one record in the configured format
    fn write_record(&mut self, record: &BookRecord) -> io::Result<()> {
        if self.options.json {
            let json = serde_json::to_string(record).map_err(io::Error::other)?;
            writeln!(self.output, "{json}")
        } else {
            writeln!(self.output, "{record}")
        }
    }

    /// List every book
    fn display_catalog(&mut self) -> io::Result<()> {
        if self.service.catalog().is_empty() {
            return writeln!(self.output, "The catalog is empty.");
        }
        let records: Vec<BookRecord> = self.service.catalog().all().cloned().collect();
        for record in &records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Prompt for a reader and a title and queue the request
    fn request_book(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Reader name: ")? else {
            return Ok(());
        };
        let Some(id) = self.prompt("Reader id: ")? else {
            return Ok(());
        };
        let Some(title) = self.prompt("Book title: ")? else {
            return Ok(());
        };

        match self.service.request_book(&name, &id, &title) {
            Ok(()) => writeln!(self.output, "{}", "Book requested successfully.".green()),
            Err(e) => self.report(&e),
        }
    }

    /// Fulfill the oldest request
    fn return_book(&mut self) -> io::Result<()> {
        match self.service.return_book() {
            Ok(info) => writeln!(
                self.output,
                "{} returned the book: {}",
                info.reader_name, info.book_title
            ),
            Err(e) => self.report(&e),
        }
    }

    /// Prompt for the six fields of a new book
    fn add_book(&mut self) -> io::Result<()> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(());
        };
        if title.trim().is_empty() {
            return writeln!(self.output, "{} a title is required", "Error:".red().bold());
        }
        let Some(author) = self.prompt("Author: ")? else {
            return Ok(());
        };
        let Some(year) = self.prompt("Year: ")? else {
            return Ok(());
        };
        let Some(publisher) = self.prompt("Publisher: ")? else {
            return Ok(());
        };
        let Some(isbn) = self.prompt("ISBN: ")? else {
            return Ok(());
        };
        let Some(pages) = self.prompt("Pages: ")? else {
            return Ok(());
        };

        self.service.add_book(BookRecord::new(
            title,
            author,
            parse_year(&year),
            publisher,
            isbn,
            parse_page_count(&pages),
        ));
        writeln!(self.output, "{}", "Book added successfully.".green())
    }

    /// Prompt for a criterion and list the matches
    fn search(&mut self) -> io::Result<()> {
        writeln!(self.output, "1. By title\n2. By author\n3. By ISBN")?;
        let Some(kind) = self.prompt("Search criterion: ")? else {
            return Ok(());
        };
        let kind = kind.trim().to_string();
        if !matches!(kind.as_str(), "1" | "2" | "3") {
            return writeln!(self.output, "{}", "Invalid option, please try again.".red());
        }
        let Some(value) = self.prompt("Search for: ")? else {
            return Ok(());
        };

        let criterion = match kind.as_str() {
            "1" => SearchCriterion::Title(value),
            "2" => SearchCriterion::Author(value),
            _ => SearchCriterion::Isbn(value),
        };

        let found: Vec<BookRecord> = self.service.search(&criterion).into_iter().cloned().collect();
        if found.is_empty() {
            return writeln!(self.output, "No books matched.");
        }
        for record in &found {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// List pending requests from head to tail
    fn show_queue(&mut self) -> io::Result<()> {
        if self.service.requests().is_empty() {
            return writeln!(self.output, "{}", "No pending requests in the queue.".yellow());
        }
        let lines: Vec<String> = self
            .service
            .requests()
            .iter()
            .zip(1_usize..)
            .map(|(request, position)| {
                format!(
                    "{position}. Reader: {} (id: {}) - Book: {}",
                    request.reader_name, request.reader_id, request.book_title
                )
            })
            .collect();
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    /// Pop the most recent action from the history
    fn review_last(&mut self) -> io::Result<()> {
        match self.service.review_last_action() {
            Ok(entry) => writeln!(self.output, "Last action: {}", entry.description),
            Err(e) => self.report(&e),
        }
    }

    /// Write the catalog to the configured file
    fn save(&mut self) -> io::Result<()> {
        match self.service.save_catalog_path(&self.options.catalog_path) {
            Ok(()) => writeln!(self.output, "{}", "Catalog saved.".green()),
            Err(e) => self.report(&e),
        }
    }

    /// Leave the loop, saving first when configured to
    fn exit(&mut self) -> io::Result<()> {
        if self.options.save_on_exit {
            self.save()?;
        }
        writeln!(self.output, "Goodbye!")
    }
}
