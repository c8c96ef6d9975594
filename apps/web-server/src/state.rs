//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use board_core::ports::{AuthorRepository, PostRepository};
use board_infra::{
    DatabaseConfig, DatabaseConnections, InMemoryStore, SqlAuthorRepository, SqlPostRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached is a startup failure.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> io::Result<Self> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        let connections = DatabaseConnections::init(config).await.map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            io::Error::other(e)
        })?;

        let state = Self {
            posts: Arc::new(SqlPostRepository::new(Arc::clone(&connections.main))),
            authors: Arc::new(SqlAuthorRepository::new(Arc::clone(&connections.main))),
            db: Some(Arc::new(connections)),
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            posts: Arc::new(store.posts()),
            authors: Arc::new(store.authors()),
            db: None,
        }
    }

    /// Short name of the storage backend, for the health probe.
    pub fn storage_name(&self) -> &'static str {
        if self.db.is_some() { "database" } else { "memory" }
    }

    /// Release the database pool once the server has stopped.
    pub async fn shutdown(self) {
        let Some(db) = self.db else {
            return;
        };
        drop(self.posts);
        drop(self.authors);

        match Arc::try_unwrap(db) {
            Ok(connections) => {
                if let Err(e) = connections.close().await {
                    tracing::error!("Failed to close database connection: {}", e);
                }
            }
            Err(_) => tracing::warn!("Database handle still shared at shutdown; dropping it"),
        }
    }
}
