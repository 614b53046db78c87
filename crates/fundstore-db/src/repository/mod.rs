//! # Repository Implementations
//!
//! One repository per table family:
//!
//! - [`company`] - `company_info`, the parent table
//! - [`market`] - `shareholding_pattern`, `price_performance` (composite keys)
//! - [`statements`] - `financial_results`, `balance_sheet`, `cash_flow`,
//!   `key_ratios` (surrogate keys)
//! - [`commentary`] - `management_discussion`, `recommendations`
//!
//! Repositories execute SQL and map constraint failures to typed errors;
//! validation, referential pre-checks and period ordering live in
//! [`crate::store::FundamentalsStore`], which composes these.

pub mod commentary;
pub mod company;
pub mod market;
pub mod statements;
