use serde::{Deserialize, Serialize};

/// A catalog entry, keyed by `isbn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Natural key; never changes once the book exists
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl Book {
    /// The stored row after `changes` fully replace its non-key fields.
    pub fn with_changes(isbn: impl Into<String>, changes: BookChanges) -> Self {
        Self {
            isbn: isbn.into(),
            amazon_url: changes.amazon_url,
            author: changes.author,
            language: changes.language,
            pages: changes.pages,
            publisher: changes.publisher,
            title: changes.title,
            year: changes.year,
        }
    }
}

/// Full replacement of every field except the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChanges {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
