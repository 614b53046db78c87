//! # Error Types
//!
//! Domain-specific error types for fundstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  fundstore-core errors (this file)                           │
//! │  ├── CoreError        - General domain errors                │
//! │  └── ValidationError  - Field validation failures            │
//! │                                                              │
//! │  fundstore-db errors (separate crate)                        │
//! │  └── DbError          - Storage operation failures           │
//! │                                                              │
//! │  Flow: ValidationError → CoreError → DbError → caller        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, table, key)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A bulk-load bundle could not be deserialized.
    #[error("Malformed bundle: {0}")]
    MalformedBundle(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
///
/// Raised before a record reaches storage; the offending field is always
/// named so the caller can point at the bad column.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Value must not be negative.
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: f64 },

    /// Value is not a finite number (NaN or infinity).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Two fields contradict each other.
    #[error("{field} is inconsistent: {reason}")]
    Inconsistent { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "company_name".to_string(),
        };
        assert_eq!(err.to_string(), "company_name is required");

        let err = ValidationError::OutOfRange {
            field: "promoter_holding_pct".to_string(),
            min: 0.0,
            max: 100.0,
            value: 154.0,
        };
        assert_eq!(
            err.to_string(),
            "promoter_holding_pct must be between 0 and 100, got 154"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "market_cap_cr".to_string(),
            value: -1.0,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
