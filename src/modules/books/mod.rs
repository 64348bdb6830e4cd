pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module, SchemaDef};
use serde_json::json;

use repository::BookRepository;

/// Book catalog: CRUD over the `books` table, mounted at `/books`
pub struct BooksModule {
    repository: Arc<dyn BookRepository>,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ?ctx.settings.database.backend,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    fn schema(&self) -> Vec<SchemaDef> {
        vec![schema::BOOKS_TABLE]
    }

    async fn health(&self) -> anyhow::Result<()> {
        self.repository
            .ping()
            .await
            .context("book store is unreachable")
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn book_envelope() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": { "book": { "$ref": "#/components/schemas/Book" } },
        "required": ["book"]
    })
}

fn openapi_fragment() -> serde_json::Value {
    let isbn_param = json!({
        "name": "isbn",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let string_field = |description: &str| json!({"type": "string", "minLength": 1, "description": description});

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": json_response("Every book in the catalog", json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/Book" }
                                }
                            },
                            "required": ["books"]
                        })),
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Book" }
                            }
                        }
                    },
                    "responses": {
                        "201": json_response("Created book", book_envelope()),
                        "400": error_response("Validation error"),
                        "409": error_response("A book with this isbn already exists"),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/{isbn}": {
                "get": {
                    "summary": "Get a book by isbn",
                    "tags": ["Books"],
                    "parameters": [isbn_param.clone()],
                    "responses": {
                        "200": json_response("The book", book_envelope()),
                        "404": error_response("Book not found"),
                        "500": error_response("Internal server error")
                    }
                },
                "put": {
                    "summary": "Replace every field of a book except its isbn",
                    "tags": ["Books"],
                    "parameters": [isbn_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BookChanges" }
                            }
                        }
                    },
                    "responses": {
                        "200": json_response("Updated book", book_envelope()),
                        "400": error_response("Validation error"),
                        "404": error_response("Book not found"),
                        "500": error_response("Internal server error")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [isbn_param],
                    "responses": {
                        "200": json_response("Deletion confirmation", json!({
                            "type": "object",
                            "properties": { "message": { "type": "string" } },
                            "required": ["message"]
                        })),
                        "404": error_response("Book not found"),
                        "500": error_response("Internal server error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "isbn": string_field("Natural key, immutable once created"),
                        "amazon_url": string_field("Store page for the book"),
                        "author": string_field("Author of the book"),
                        "language": string_field("Language the book is written in"),
                        "pages": { "type": "integer", "minimum": 1 },
                        "publisher": string_field("Publisher of the book"),
                        "title": string_field("Title of the book"),
                        "year": { "type": "integer" }
                    },
                    "required": ["isbn", "amazon_url", "author", "language", "pages", "publisher", "title", "year"]
                },
                "BookChanges": {
                    "type": "object",
                    "properties": {
                        "amazon_url": string_field("Store page for the book"),
                        "author": string_field("Author of the book"),
                        "language": string_field("Language the book is written in"),
                        "pages": { "type": "integer", "minimum": 1 },
                        "publisher": string_field("Publisher of the book"),
                        "title": string_field("Title of the book"),
                        "year": { "type": "integer" }
                    },
                    "required": ["amazon_url", "author", "language", "pages", "publisher", "title", "year"]
                }
            }
        }
    })
}

/// Create a new instance of the books module backed by `repository`
pub fn create_module(repository: Arc<dyn BookRepository>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository))
}
