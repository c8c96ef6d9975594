#[cfg(feature = "database")]
use std::sync::Arc;
#[cfg(feature = "database")]
use std::time::Duration;

#[cfg(feature = "database")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the board database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// Owned handle to the board's connection pool.
///
/// Built once at startup with [`DatabaseConnections::init`] and released
/// with [`DatabaseConnections::close`] when the server stops.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&DatabaseConfig::new("sqlite::memory:")).await?;
/// let posts = SqlPostRepository::new(Arc::clone(&db.main));
/// // ... serve requests ...
/// drop(posts);
/// db.close().await?;
/// ```
#[cfg(feature = "database")]
pub struct DatabaseConnections {
    /// Pool shared by every repository.
    pub main: Arc<DbConn>,
}

#[cfg(feature = "database")]
impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            backend = ?main.get_database_backend(),
            "Database connected (pool: {})",
            config.max_connections
        );

        Ok(Self {
            main: Arc::new(main),
        })
    }

    /// Check that the database still answers.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }

    /// Close every pooled connection.
    ///
    /// Repositories built from [`DatabaseConnections::main`] must be dropped
    /// first; while one is alive the pool is left to close on drop.
    pub async fn close(self) -> Result<(), DbErr> {
        match Arc::try_unwrap(self.main) {
            Ok(main) => {
                tracing::info!("Closing database connection");
                main.close().await
            }
            Err(_) => {
                tracing::warn!("Database pool still shared at close; leaving it to drop");
                Ok(())
            }
        }
    }
}
