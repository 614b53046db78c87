//! # Fiscal Period Parsing & Ordering
//!
//! The dataset tags rows with free-form period strings mixing three
//! conventions:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  "Q4FY24"  quarter 4 of fiscal year 2024                     │
//! │  "FY24"    fiscal year 2024 (annual)                         │
//! │  "CY23"    calendar year 2023 (annual)                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listings and `get_latest` need a total order over these strings. The
//! rule: parse into (kind, year, sub-period index) and compare by year
//! then sub-period index. Within a year, quarters come first (index 1-4),
//! the fiscal-year annual row after its quarters (index 5), and a
//! calendar-year annual row last (index 6).
//!
//! Strings that match none of the conventions are NOT an error: they are
//! opaque, sort after every parsed period, and order among themselves
//! lexicographically so listings stay deterministic. Callers that care
//! log a warning; ingestion never fails on an odd period string.

use serde::{Deserialize, Serialize};

/// Reporting-interval convention a period string was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// One quarter of a fiscal year ("Q4FY24").
    Quarter,
    /// A full fiscal year ("FY24").
    Fiscal,
    /// A full calendar year ("CY23").
    Calendar,
}

/// A successfully parsed period string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPeriod {
    pub kind: PeriodKind,
    /// Four-digit year. Two-digit suffixes are taken as 20yy.
    pub year: u16,
    /// Sub-period index within the year: quarters 1-4, fiscal annual 5,
    /// calendar annual 6.
    pub sub: u8,
}

/// Sort key for a period string.
///
/// Derived ordering does the whole job: `Parsed` sorts before `Opaque`
/// (variant order), parsed keys compare by `(year, sub)` (field order),
/// opaque keys compare as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PeriodSortKey {
    Parsed { year: u16, sub: u8 },
    Opaque(String),
}

/// Parses a period string into its (kind, year, sub-period) components.
///
/// Case-insensitive, surrounding whitespace ignored. Returns `None` for
/// anything outside the three known conventions.
///
/// ## Example
/// ```rust
/// use fundstore_core::period::{parse_period, PeriodKind};
///
/// let p = parse_period("Q4FY24").unwrap();
/// assert_eq!(p.kind, PeriodKind::Quarter);
/// assert_eq!(p.year, 2024);
/// assert_eq!(p.sub, 4);
///
/// assert!(parse_period("H1-2024").is_none());
/// ```
pub fn parse_period(raw: &str) -> Option<ParsedPeriod> {
    let s = raw.trim().to_ascii_uppercase();

    if let Some(rest) = s.strip_prefix('Q') {
        // QxFYyy - quarter digit, then fiscal-year suffix
        let mut chars = rest.chars();
        let quarter = chars.next()?.to_digit(10)?;
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let year = parse_year(chars.as_str().strip_prefix("FY")?)?;
        return Some(ParsedPeriod {
            kind: PeriodKind::Quarter,
            year,
            sub: quarter as u8,
        });
    }

    if let Some(rest) = s.strip_prefix("FY") {
        let year = parse_year(rest)?;
        return Some(ParsedPeriod {
            kind: PeriodKind::Fiscal,
            year,
            sub: 5,
        });
    }

    if let Some(rest) = s.strip_prefix("CY") {
        let year = parse_year(rest)?;
        return Some(ParsedPeriod {
            kind: PeriodKind::Calendar,
            year,
            sub: 6,
        });
    }

    None
}

/// Year suffix: exactly two digits ("24" -> 2024) or four ("2024").
fn parse_year(s: &str) -> Option<u16> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match s.len() {
        2 => Some(2000 + s.parse::<u16>().ok()?),
        4 => s.parse::<u16>().ok(),
        _ => None,
    }
}

/// Sort key for a period string; unparseable strings become opaque keys
/// that sort after every parsed period.
pub fn period_sort_key(raw: &str) -> PeriodSortKey {
    match parse_period(raw) {
        Some(p) => PeriodSortKey::Parsed {
            year: p.year,
            sub: p.sub,
        },
        None => PeriodSortKey::Opaque(raw.trim().to_ascii_uppercase()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
