//! Persistence for books.

pub use memory::InMemoryBookRepository;
pub use postgres::PgBookRepository;

use super::models::{Book, BookChanges};

mod memory;
mod postgres;

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("no book with isbn {isbn}")]
    NotFound { isbn: String },

    #[error("a book with isbn {isbn} already exists")]
    Conflict { isbn: String },

    #[error("book store failure: {0}")]
    Store(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Every stored book, in no particular order
    async fn find_all(&self) -> RepositoryResult<Vec<Book>>;
    /// The book with exactly this isbn
    async fn find_one(&self, isbn: &str) -> RepositoryResult<Book>;
    /// Inserts a new book; fails with `Conflict` if the isbn is taken
    async fn create(&self, book: Book) -> RepositoryResult<Book>;
    /// Overwrites every non-key field and returns the new state
    async fn update(&self, isbn: &str, changes: BookChanges) -> RepositoryResult<Book>;
    async fn remove(&self, isbn: &str) -> RepositoryResult<()>;
    /// Confirms the backing store is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}
