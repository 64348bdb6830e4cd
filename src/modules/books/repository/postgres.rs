use async_trait::async_trait;
use bookshelf_db::Database;
use sqlx::PgPool;

use super::{BookRepository, RepositoryError, RepositoryResult};
use crate::modules::books::models::{Book, BookChanges};

/// `books` table access. User input only ever reaches SQL through bound parameters.
#[derive(Debug, Clone)]
pub struct PgBookRepository {
    database: Database,
}

impl PgBookRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn pool(&self) -> &PgPool {
        self.database.pool()
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
             FROM books",
        )
        .fetch_all(self.pool())
        .await?;

        tracing::debug!(count = books.len(), "listed books");
        Ok(books)
    }

    async fn find_one(&self, isbn: &str) -> RepositoryResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
             FROM books
             WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| RepositoryError::NotFound {
            isbn: isbn.to_string(),
        })
    }

    async fn create(&self, book: Book) -> RepositoryResult<Book> {
        let result = sqlx::query_as::<_, Book>(
            "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(self.pool())
        .await;

        match result {
            Ok(created) => {
                tracing::debug!(isbn = %created.isbn, "created book");
                Ok(created)
            }
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(RepositoryError::Conflict { isbn: book.isbn })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, isbn: &str, changes: BookChanges) -> RepositoryResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            "UPDATE books
             SET amazon_url = $1, author = $2, language = $3, pages = $4,
                 publisher = $5, title = $6, year = $7
             WHERE isbn = $8
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(&changes.amazon_url)
        .bind(&changes.author)
        .bind(&changes.language)
        .bind(changes.pages)
        .bind(&changes.publisher)
        .bind(&changes.title)
        .bind(changes.year)
        .bind(isbn)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| RepositoryError::NotFound {
            isbn: isbn.to_string(),
        })?;

        tracing::debug!(isbn = %isbn, "updated book");
        Ok(updated)
    }

    async fn remove(&self, isbn: &str) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                isbn: isbn.to_string(),
            });
        }

        tracing::debug!(isbn = %isbn, "deleted book");
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.database.ping().await?;
        Ok(())
    }
}
