//! In-memory book collection.
//!
//! Records keep insertion order and are looked up by linear scan. Every
//! operation validates before it mutates, so a failed call leaves the
//! collection untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use thiserror::Error;
use time::OffsetDateTime;

use super::models::{Book, BookPayload, BookSummary, ListFilter};

/// Length of generated book ids.
pub const ID_LENGTH: usize = 16;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Store shared between request handlers. Each operation holds the lock
/// for its whole read-modify-write sequence.
pub type SharedBookStore = Arc<Mutex<BookStore>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("book name is missing")]
    MissingName,

    #[error("readPage ({read_page}) is greater than pageCount ({page_count})")]
    InvalidPageRange { read_page: u32, page_count: u32 },

    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("book '{0}' was not retrievable after insert")]
    InternalInsertFailure(String),
}

#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
    recompute_finished_on_update: bool,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute `finished` on update as well as on create.
    pub fn recompute_finished_on_update(mut self, enabled: bool) -> Self {
        self.recompute_finished_on_update = enabled;
        self
    }

    pub fn into_shared(self) -> SharedBookStore {
        Arc::new(Mutex::new(self))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a book and return its generated id.
    pub fn create(&mut self, payload: BookPayload) -> Result<String, BookError> {
        let name = validate(&payload)?.to_string();

        let id = self.fresh_id();
        let now = OffsetDateTime::now_utc();

        self.books.push(Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.page_count == payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        });

        if self.position(&id).is_none() {
            return Err(BookError::InternalInsertFailure(id));
        }

        tracing::debug!(book_id = %id, "book created");
        Ok(id)
    }

    /// Summaries of the books matching `filter`, in insertion order.
    pub fn list(&self, filter: &ListFilter) -> Vec<BookSummary> {
        self.books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Book, BookError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    /// Replace every mutable field of the book with the payload.
    ///
    /// `finished` keeps its creation-time value unless recomputation was
    /// enabled with [`BookStore::recompute_finished_on_update`].
    pub fn update(&mut self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        let name = validate(&payload)?.to_string();
        let index = self
            .position(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let recompute_finished = self.recompute_finished_on_update;

        let book = &mut self.books[index];
        book.name = name;
        book.year = payload.year;
        book.author = payload.author;
        book.summary = payload.summary;
        book.publisher = payload.publisher;
        book.page_count = payload.page_count;
        book.read_page = payload.read_page;
        book.reading = payload.reading;
        if recompute_finished {
            book.finished = book.page_count == book.read_page;
        }
        book.updated_at = OffsetDateTime::now_utc();

        tracing::debug!(book_id = %id, "book updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Book, BookError> {
        let index = self
            .position(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        let removed = self.books.remove(index);
        tracing::debug!(book_id = %id, "book deleted");
        Ok(removed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

/// Checks shared by create and update, in the order clients see them.
fn validate(payload: &BookPayload) -> Result<&str, BookError> {
    let name = payload
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(BookError::MissingName)?;

    if payload.read_page > payload.page_count {
        return Err(BookError::InvalidPageRange {
            read_page: payload.read_page,
            page_count: payload.page_count,
        });
    }

    Ok(name)
}

fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
