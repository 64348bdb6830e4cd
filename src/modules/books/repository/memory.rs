use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookRepository, RepositoryError, RepositoryResult};
use crate::modules::books::models::{Book, BookChanges};

/// Process-local store that keeps books in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store; later duplicates of an isbn are dropped.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mut seeded: Vec<Book> = Vec::new();
        for book in books {
            if !seeded.iter().any(|b| b.isbn == book.isbn) {
                seeded.push(book);
            }
        }
        Self {
            books: RwLock::new(seeded),
        }
    }
}

fn not_found(isbn: &str) -> RepositoryError {
    RepositoryError::NotFound {
        isbn: isbn.to_string(),
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find_one(&self, isbn: &str) -> RepositoryResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|b| b.isbn == isbn)
            .cloned()
            .ok_or_else(|| not_found(isbn))
    }

    async fn create(&self, book: Book) -> RepositoryResult<Book> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.isbn == book.isbn) {
            return Err(RepositoryError::Conflict { isbn: book.isbn });
        }
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, isbn: &str, changes: BookChanges) -> RepositoryResult<Book> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| not_found(isbn))?;
        *slot = Book::with_changes(isbn, changes);
        Ok(slot.clone())
    }

    async fn remove(&self, isbn: &str) -> RepositoryResult<()> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.isbn == isbn)
            .ok_or_else(|| not_found(isbn))?;
        books.remove(index);
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
