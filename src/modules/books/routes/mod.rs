//! HTTP handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_http::{AppError, JsonBody};
use bookshelf_kernel::validation::Violation;
use serde_json::json;

use super::models::{Book, BookChanges, BookResponse, BooksResponse, MessageResponse};
use super::repository::{BookRepository, RepositoryError};
use super::schema::{CREATE_SCHEMA, UPDATE_SCHEMA};

pub type SharedRepository = Arc<dyn BookRepository>;

/// Routes relative to the module's mount path
pub fn router(repository: SharedRepository) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{isbn}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(repository)
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => AppError::not_found(err.to_string()),
            RepositoryError::Conflict { ref isbn } => AppError::conflict(
                vec![json!({"field": "isbn", "error": "already exists", "value": isbn})],
                err.to_string(),
            ),
            RepositoryError::Store(store) => AppError::Internal(store.into()),
        }
    }
}

/// GET / => {books: [book, ...]}
async fn list_books(
    State(repository): State<SharedRepository>,
) -> Result<Json<BooksResponse>, AppError> {
    let books = repository.find_all().await?;
    Ok(Json(BooksResponse { books }))
}

/// GET /{isbn} => {book: book}
async fn get_book(
    State(repository): State<SharedRepository>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let book = repository.find_one(&isbn).await?;
    Ok(Json(BookResponse { book }))
}

/// POST / {book} => 201 {book: book}
async fn create_book(
    State(repository): State<SharedRepository>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    CREATE_SCHEMA.validate(&payload).map_err(AppError::validation)?;
    let book: Book =
        serde_json::from_value(payload).map_err(|e| AppError::bad_request(e.to_string()))?;

    let book = repository.create(book).await?;
    tracing::info!(isbn = %book.isbn, "book created");
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// PUT /{isbn} {book} => {book: book}
///
/// The body replaces every non-key field. An `isbn` in the body must match the path.
async fn update_book(
    State(repository): State<SharedRepository>,
    Path(isbn): Path<String>,
    JsonBody(payload): JsonBody,
) -> Result<Json<BookResponse>, AppError> {
    UPDATE_SCHEMA.validate(&payload).map_err(AppError::validation)?;
    if let Some(body_isbn) = payload.get("isbn") {
        if body_isbn.as_str() != Some(isbn.as_str()) {
            return Err(AppError::validation(vec![Violation::new(
                "isbn",
                "isbn cannot be changed",
            )]));
        }
    }
    let changes: BookChanges =
        serde_json::from_value(payload).map_err(|e| AppError::bad_request(e.to_string()))?;

    let book = repository.update(&isbn, changes).await?;
    tracing::info!(isbn = %book.isbn, "book updated");
    Ok(Json(BookResponse { book }))
}

/// DELETE /{isbn} => {message: "Book deleted"}
async fn delete_book(
    State(repository): State<SharedRepository>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    repository.remove(&isbn).await?;
    tracing::info!(isbn = %isbn, "book deleted");
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
