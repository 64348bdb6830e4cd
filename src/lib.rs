//! Bookshelf application library
//!
//! Wires the books module to its store and serves it over HTTP.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use bookshelf_db::Database;
use bookshelf_kernel::settings::{DatabaseSettings, Settings, StorageBackend};
use bookshelf_kernel::{InitCtx, ModuleRegistry, SchemaDef};

use modules::books::repository::{BookRepository, InMemoryBookRepository, PgBookRepository};

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every application module, each backed by `books`
pub fn registry(books: Arc<dyn BookRepository>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, books);
    registry
}

/// DDL contributed by the application modules, in application order
pub fn schema_definitions() -> Vec<(String, SchemaDef)> {
    registry(Arc::new(InMemoryBookRepository::new())).collect_schema()
}

/// Open the configured store. Postgres is connected eagerly so startup fails fast.
async fn open_repository(
    settings: &DatabaseSettings,
) -> anyhow::Result<(Arc<dyn BookRepository>, Option<Database>)> {
    match settings.backend {
        StorageBackend::Postgres => {
            let database = Database::connect(settings)
                .await
                .context("failed to open the book store")?;
            let repository = PgBookRepository::new(database.clone());
            Ok((Arc::new(repository), Some(database)))
        }
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory book store; data is lost on exit");
            Ok((Arc::new(InMemoryBookRepository::new()), None))
        }
    }
}

/// Run the service until a shutdown signal arrives
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let (repository, database) = open_repository(&settings.database).await?;
    let registry = registry(repository);

    if let Some(database) = &database {
        database
            .apply_schema(&registry.collect_schema())
            .await
            .context("failed to prepare the database schema")?;
    }

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let app = bookshelf_http::build_router(&registry, &settings);
    let served = bookshelf_http::start_server(app, &settings).await;

    let stopped = registry.stop_modules().await;
    if let Some(database) = database {
        database.close().await;
    }

    served?;
    stopped
}
