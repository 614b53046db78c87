//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Concurrency Model
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │              Single writer, multiple readers                 │
//! │                                                              │
//! │  Bulk loads are append-only and infrequent; queries are      │
//! │  simple key lookups. SQLite WAL mode gives exactly the       │
//! │  discipline needed:                                          │
//! │  • readers never block the loader                            │
//! │  • the loader never blocks readers                           │
//! │  • writes serialize through the WAL                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Foreign keys are enabled on every connection; SQLite disables them by
//! default for backwards compatibility.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::commentary::{DiscussionRepository, RecommendationRepository};
use crate::repository::company::CompanyRepository;
use crate::repository::market::{PricePerformanceRepository, ShareholdingRepository};
use crate::repository::statements::{
    BalanceSheetRepository, CashFlowRepository, FinancialResultRepository, KeyRatiosRepository,
};
use crate::store::FundamentalsStore;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/fundamentals.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (archival dataset, light query load)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// In-memory SQLite requires a single connection: each connection
    /// would otherwise see its own empty database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// Configures SQLite with WAL journaling, NORMAL synchronous mode and
    /// enforced foreign keys, then runs migrations (if enabled).
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Automatically called by `new()` unless disabled in the config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The validated facade over all nine collections.
    ///
    /// This is the normal entry point; the per-table repositories below
    /// are lower-level building blocks.
    pub fn store(&self) -> FundamentalsStore {
        FundamentalsStore::new(self.clone())
    }

    /// Returns the company repository.
    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.pool.clone())
    }

    /// Returns the shareholding-pattern repository.
    pub fn shareholding(&self) -> ShareholdingRepository {
        ShareholdingRepository::new(self.pool.clone())
    }

    /// Returns the price-performance repository.
    pub fn price_performance(&self) -> PricePerformanceRepository {
        PricePerformanceRepository::new(self.pool.clone())
    }

    /// Returns the financial-results repository.
    pub fn financial_results(&self) -> FinancialResultRepository {
        FinancialResultRepository::new(self.pool.clone())
    }

    /// Returns the balance-sheet repository.
    pub fn balance_sheets(&self) -> BalanceSheetRepository {
        BalanceSheetRepository::new(self.pool.clone())
    }

    /// Returns the cash-flow repository.
    pub fn cash_flows(&self) -> CashFlowRepository {
        CashFlowRepository::new(self.pool.clone())
    }

    /// Returns the key-ratios repository.
    pub fn key_ratios(&self) -> KeyRatiosRepository {
        KeyRatiosRepository::new(self.pool.clone())
    }

    /// Returns the management-discussion repository.
    pub fn discussions(&self) -> DiscussionRepository {
        DiscussionRepository::new(self.pool.clone())
    }

    /// Returns the recommendation repository.
    pub fn recommendations(&self) -> RecommendationRepository {
        RecommendationRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
