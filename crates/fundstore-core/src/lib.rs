//! # fundstore-core: Pure Domain Logic for the Fundamentals Store
//!
//! This crate is the heart of the Fundamentals Store. It contains the
//! entity model and every business rule as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                Fundamentals Store Architecture               │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              Host application / loader                 │  │
//! │  │     bundle imports, queries, report generation         │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │                               │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │            ★ fundstore-core (THIS CRATE) ★             │  │
//! │  │                                                        │  │
//! │  │  ┌────────┐ ┌────────┐ ┌───────────┐ ┌────────────┐    │  │
//! │  │  │ types  │ │ period │ │validation │ │ derivation │    │  │
//! │  │  │ 9 ents │ │ QxFYyy │ │  rules    │ │  checks    │    │  │
//! │  │  └────────┘ └────────┘ └───────────┘ └────────────┘    │  │
//! │  │                                                        │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS    │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │                               │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │              fundstore-db (Storage Layer)              │  │
//! │  │       SQLite queries, migrations, repositories         │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The nine entity collections and the [`PeriodRecord`] wrapper
//! - [`period`] - Fiscal-period parsing and the total order over period strings
//! - [`validation`] - Field validation (signs, ranges, required fields)
//! - [`derivation`] - Advisory consistency checks for derived columns
//! - [`bundle`] - The per-document bulk-load format
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: deterministic, no side effects
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Explicit errors**: all errors are typed, never strings or panics
//! 4. **Immutable snapshots**: records are period snapshots; a new fiscal
//!    period means a new row, never an update in place
//!
//! ## Example
//!
//! ```rust
//! use fundstore_core::period::period_sort_key;
//!
//! let mut periods = vec!["Q4FY24", "FY23", "Q1FY25"];
//! periods.sort_by_key(|p| period_sort_key(p));
//! assert_eq!(periods.last(), Some(&"Q1FY25"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bundle;
pub mod derivation;
pub mod error;
pub mod period;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bundle::CompanyBundle;
pub use derivation::{validate_derivations, DerivationMismatch, DERIVATION_TOLERANCE};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
