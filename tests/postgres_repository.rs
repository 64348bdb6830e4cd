//! Runs against a real database only when `BOOKSHELF_TEST_DATABASE_URL` is set.

use bookshelf_app::books::models::{Book, BookChanges};
use bookshelf_app::books::repository::{BookRepository, PgBookRepository, RepositoryError};
use bookshelf_db::Database;
use bookshelf_kernel::settings::DatabaseSettings;

const TEST_DATABASE_URL: &str = "BOOKSHELF_TEST_DATABASE_URL";

fn book(isbn: &str, title: &str) -> Book {
    Book {
        isbn: isbn.to_string(),
        amazon_url: format!("http://amazon.com/{isbn}"),
        author: "Author".to_string(),
        language: "English".to_string(),
        pages: 200,
        publisher: "Publisher".to_string(),
        title: title.to_string(),
        year: 2020,
    }
}

#[tokio::test]
async fn postgres_repository_honours_the_crud_contract() {
    let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
        eprintln!("{TEST_DATABASE_URL} not set; skipping");
        return;
    };

    let settings = DatabaseSettings {
        url,
        ..DatabaseSettings::default()
    };
    let database = Database::connect(&settings).await.unwrap();
    database
        .apply_schema(&bookshelf_app::schema_definitions())
        .await
        .unwrap();
    sqlx::query("DELETE FROM books")
        .execute(database.pool())
        .await
        .unwrap();

    let repo = PgBookRepository::new(database.clone());
    repo.ping().await.unwrap();

    repo.create(book("1234567890", "Book 1")).await.unwrap();
    repo.create(book("0987654321", "Book 2")).await.unwrap();
    assert_eq!(repo.find_all().await.unwrap().len(), 2);

    let err = repo.create(book("1234567890", "Impostor")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict { .. }));
    assert_eq!(repo.find_one("1234567890").await.unwrap().title, "Book 1");

    // Bound parameters keep quotes inert.
    let hostile = book("x' OR '1'='1", "Robert'); DROP TABLE books;--");
    repo.create(hostile.clone()).await.unwrap();
    assert_eq!(repo.find_one(&hostile.isbn).await.unwrap(), hostile);
    assert_eq!(repo.find_all().await.unwrap().len(), 3);

    let changes = BookChanges {
        amazon_url: "http://amazon.com/updated".to_string(),
        author: "Updated Author".to_string(),
        language: "German".to_string(),
        pages: 250,
        publisher: "Updated Publisher".to_string(),
        title: "Updated Book".to_string(),
        year: 2023,
    };
    let updated = repo.update("1234567890", changes.clone()).await.unwrap();
    assert_eq!(updated, Book::with_changes("1234567890", changes.clone()));

    assert!(matches!(
        repo.update("1111111111", changes).await,
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(matches!(
        repo.find_one("1111111111").await,
        Err(RepositoryError::NotFound { .. })
    ));

    repo.remove("1234567890").await.unwrap();
    assert!(matches!(
        repo.remove("1234567890").await,
        Err(RepositoryError::NotFound { .. })
    ));

    database.close().await;
}
