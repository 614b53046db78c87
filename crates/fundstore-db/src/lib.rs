//! # fundstore-db: Storage Layer for the Fundamentals Store
//!
//! This crate persists the nine fundamentals collections in SQLite,
//! using sqlx for async operations. All writes and reads go through
//! [`store::FundamentalsStore`], which validates records and enforces
//! referential integrity before any SQL runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fundamentals Store Data Flow                         │
//! │                                                                         │
//! │  Producer (research-document extraction, seed tooling)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    fundstore-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ Fundamentals  │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │ Store         │    │ (per table    │    │  (embedded)  │   │   │
//! │  │   │ (store.rs)    │───►│  family)      │    │              │   │   │
//! │  │   │               │    │               │    │ 001_initial_ │   │   │
//! │  │   │ validate →    │    │ CompanyRepo   │    │ schema.sql   │   │   │
//! │  │   │ pre-check →   │    │ Shareholding  │    │              │   │   │
//! │  │   │ insert        │    │ CashFlow ...  │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./fundamentals.db (WAL mode, foreign keys ON)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Per-table repositories
//! - [`store`] - The validated facade and bulk loader
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fundstore_db::{Database, DbConfig, LoadMode};
//!
//! let db = Database::new(DbConfig::new("./fundamentals.db")).await?;
//! let store = db.store();
//!
//! let bundle = CompanyBundle::from_json(&json)?;
//! let report = store.load_bundle(&bundle, LoadMode::Strict).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{FundamentalsStore, LoadError, LoadMode, LoadReport};

// Repository re-exports for convenience
pub use repository::commentary::{DiscussionRepository, RecommendationRepository};
pub use repository::company::CompanyRepository;
pub use repository::market::{PricePerformanceRepository, ShareholdingRepository};
pub use repository::statements::{
    BalanceSheetRepository, CashFlowRepository, FinancialResultRepository, KeyRatiosRepository,
};
