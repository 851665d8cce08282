//! HTTP handlers for the books module.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use bookshelf_http::{AppError, AppResult, Envelope, Payload, Reply};
use serde::{Deserialize, Serialize};

use super::models::{Book, BookPayload, BookSummary, ListFilter};
use super::store::{BookError, SharedBookStore};

/// Build the books router over a shared store.
pub fn router(store: SharedBookStore) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

/// Operation a store error happened in; selects the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Create,
    Fetch,
    Update,
    Delete,
}

impl Action {
    fn missing_name(self) -> &'static str {
        match self {
            Action::Update => "Gagal memperbarui buku. Mohon isi nama buku",
            _ => "Gagal menambahkan buku. Mohon isi nama buku",
        }
    }

    fn invalid_page_range(self) -> &'static str {
        match self {
            Action::Update => {
                "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
            }
            _ => "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount",
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Action::Update => "Gagal memperbarui buku. Id tidak ditemukan",
            Action::Delete => "Buku gagal dihapus. Id tidak ditemukan",
            Action::Create | Action::Fetch => "Buku tidak ditemukan",
        }
    }

    fn app_error(self, err: BookError) -> AppError {
        match err {
            BookError::MissingName => {
                AppError::bad_request(self.missing_name()).with_code("missing_name")
            }
            BookError::InvalidPageRange { .. } => {
                AppError::bad_request(self.invalid_page_range()).with_code("invalid_page_range")
            }
            BookError::NotFound(_) => AppError::not_found(self.not_found()),
            BookError::InternalInsertFailure(id) => {
                tracing::error!(book_id = %id, "inserted book could not be found");
                AppError::internal("Buku gagal ditambahkan").with_code("insert_failure")
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBook {
    book_id: String,
}

#[derive(Debug, Serialize)]
struct BookList {
    books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
struct BookDetail {
    book: Book,
}

/// Raw query string of the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl From<ListQuery> for ListFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            name: query.name.filter(|name| !name.is_empty()),
            reading: query.reading.as_deref().and_then(parse_flag),
            finished: query.finished.as_deref().and_then(parse_flag),
        }
    }
}

/// `"1"` and `"0"` select; anything else leaves the filter off.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

async fn create_book(
    State(store): State<SharedBookStore>,
    Payload(payload): Payload<BookPayload>,
) -> AppResult<Reply<CreatedBook>> {
    let book_id = store
        .lock()
        .create(payload)
        .map_err(|err| Action::Create.app_error(err))?;

    Ok(Reply::created(
        Envelope::success(CreatedBook { book_id }).with_message("Buku berhasil ditambahkan"),
    ))
}

async fn list_books(
    State(store): State<SharedBookStore>,
    Query(query): Query<ListQuery>,
) -> Reply<BookList> {
    let filter = ListFilter::from(query);
    let books = store.lock().list(&filter);

    Reply::ok(Envelope::success(BookList { books }))
}

async fn get_book(
    State(store): State<SharedBookStore>,
    Path(book_id): Path<String>,
) -> AppResult<Reply<BookDetail>> {
    let book = store
        .lock()
        .get(&book_id)
        .cloned()
        .map_err(|err| Action::Fetch.app_error(err))?;

    Ok(Reply::ok(Envelope::success(BookDetail { book })))
}

async fn update_book(
    State(store): State<SharedBookStore>,
    Path(book_id): Path<String>,
    Payload(payload): Payload<BookPayload>,
) -> AppResult<Reply<()>> {
    store
        .lock()
        .update(&book_id, payload)
        .map_err(|err| Action::Update.app_error(err))?;

    Ok(Reply::ok(Envelope::message("Buku berhasil diperbarui")))
}

async fn delete_book(
    State(store): State<SharedBookStore>,
    Path(book_id): Path<String>,
) -> AppResult<Reply<()>> {
    store
        .lock()
        .delete(&book_id)
        .map_err(|err| Action::Delete.app_error(err))?;

    Ok(Reply::ok(Envelope::message("Buku berhasil dihapus")))
}
