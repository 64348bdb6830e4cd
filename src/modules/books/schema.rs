//! Request schemas and table definition for books.

use bookshelf_kernel::validation::{FieldRule, Schema};
use bookshelf_kernel::SchemaDef;

/// Body of `POST /books`: every column is required.
pub const CREATE_SCHEMA: Schema = Schema::new(&[
    FieldRule::non_empty_string("isbn"),
    FieldRule::non_empty_string("amazon_url"),
    FieldRule::non_empty_string("author"),
    FieldRule::non_empty_string("language"),
    FieldRule::positive_integer("pages"),
    FieldRule::non_empty_string("publisher"),
    FieldRule::non_empty_string("title"),
    FieldRule::integer("year"),
]);

/// Body of `PUT /books/{isbn}`: every column except the key.
pub const UPDATE_SCHEMA: Schema = Schema::new(&[
    FieldRule::non_empty_string("amazon_url"),
    FieldRule::non_empty_string("author"),
    FieldRule::non_empty_string("language"),
    FieldRule::positive_integer("pages"),
    FieldRule::non_empty_string("publisher"),
    FieldRule::non_empty_string("title"),
    FieldRule::integer("year"),
]);

pub const BOOKS_TABLE: SchemaDef = SchemaDef {
    id: "001_books",
    ddl: r#"
        CREATE TABLE IF NOT EXISTS books (
            isbn       TEXT PRIMARY KEY,
            amazon_url TEXT NOT NULL,
            author     TEXT NOT NULL,
            language   TEXT NOT NULL,
            pages      INTEGER NOT NULL CHECK (pages > 0),
            publisher  TEXT NOT NULL,
            title      TEXT NOT NULL,
            year       INTEGER NOT NULL
        );
        "#,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_book() -> serde_json::Value {
        json!({
            "isbn": "1122334455",
            "amazon_url": "http://amazon.com/newbook",
            "author": "New Author",
            "language": "French",
            "pages": 150,
            "publisher": "New Publisher",
            "title": "New Book",
            "year": 2022
        })
    }

    #[test]
    fn create_schema_accepts_complete_book() {
        assert!(CREATE_SCHEMA.validate(&valid_book()).is_ok());
    }

    #[test]
    fn create_schema_reports_each_missing_field() {
        let violations = CREATE_SCHEMA
            .validate(&json!({"isbn": "1122334455", "title": ""}))
            .unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["amazon_url", "author", "language", "pages", "publisher", "title", "year"]
        );
    }

    #[test]
    fn pages_must_be_positive_but_year_is_unbounded() {
        let mut book = valid_book();
        book["pages"] = json!(-1);
        book["year"] = json!(-300);
        let violations = CREATE_SCHEMA.validate(&book).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "pages must be greater than 0");
    }

    #[test]
    fn update_schema_does_not_require_isbn() {
        let mut book = valid_book();
        book.as_object_mut().unwrap().remove("isbn");
        assert!(UPDATE_SCHEMA.validate(&book).is_ok());
    }

    #[test]
    fn update_schema_rejects_partial_body() {
        let violations = UPDATE_SCHEMA.validate(&json!({"title": ""})).unwrap_err();
        assert_eq!(violations.len(), 7);
    }
}
