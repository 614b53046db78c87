//! # Derivation Checks
//!
//! Some stored columns are documented derivations of other columns:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  financial_results                                           │
//! │    ebitda_margin_pct     = ebitda_cr / revenue_cr * 100      │
//! │    net_profit_margin_pct = net_profit_cr / revenue_cr * 100  │
//! │                                                              │
//! │  cash_flow                                                   │
//! │    free_cash_flow_cr = net_cash_from_operations_cr           │
//! │                        - capex_cr                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The schema does NOT enforce these; source documents carry pre-computed
//! values that round differently from a fresh computation. The checks
//! here are advisory: they return a list of mismatches, they never fail
//! an insert. Tolerance is [`DERIVATION_TOLERANCE`] to absorb the
//! rounding in the source PDFs.

use crate::types::{CashFlow, FinancialResult, PeriodRecord};

/// Maximum absolute difference between a stored derived value and its
/// recomputation before a mismatch is reported.
pub const DERIVATION_TOLERANCE: f64 = 0.01;

/// One advisory inconsistency between a stored derived field and its
/// recomputed value.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationMismatch {
    /// Table the record belongs to.
    pub table: &'static str,
    /// The derived column that disagrees.
    pub field: &'static str,
    /// Value recomputed from the input columns.
    pub expected: f64,
    /// Value actually stored.
    pub actual: f64,
}

impl std::fmt::Display for DerivationMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}: stored {} but computed {:.4}",
            self.table, self.field, self.actual, self.expected
        )
    }
}

/// Checks every documented derivation the record carries.
///
/// A check only runs when both the inputs and the stored derived value
/// are present; missing columns are not mismatches. Kinds without
/// documented derivations return an empty list.
pub fn validate_derivations(record: &PeriodRecord) -> Vec<DerivationMismatch> {
    match record {
        PeriodRecord::FinancialResults(r) => check_financial_result(r),
        PeriodRecord::CashFlow(r) => check_cash_flow(r),
        _ => Vec::new(),
    }
}

fn check_financial_result(r: &FinancialResult) -> Vec<DerivationMismatch> {
    let mut mismatches = Vec::new();

    // Margins are only defined for positive revenue.
    let revenue = match r.revenue_cr {
        Some(v) if v > 0.0 => v,
        _ => return mismatches,
    };

    if let (Some(ebitda), Some(stored)) = (r.ebitda_cr, r.ebitda_margin_pct) {
        push_if_off(
            &mut mismatches,
            "financial_results",
            "ebitda_margin_pct",
            ebitda / revenue * 100.0,
            stored,
        );
    }

    if let (Some(net_profit), Some(stored)) = (r.net_profit_cr, r.net_profit_margin_pct) {
        push_if_off(
            &mut mismatches,
            "financial_results",
            "net_profit_margin_pct",
            net_profit / revenue * 100.0,
            stored,
        );
    }

    mismatches
}

fn check_cash_flow(r: &CashFlow) -> Vec<DerivationMismatch> {
    let mut mismatches = Vec::new();

    if let (Some(ops), Some(capex), Some(stored)) =
        (r.net_cash_from_operations_cr, r.capex_cr, r.free_cash_flow_cr)
    {
        push_if_off(
            &mut mismatches,
            "cash_flow",
            "free_cash_flow_cr",
            ops - capex,
            stored,
        );
    }

    mismatches
}

fn push_if_off(
    out: &mut Vec<DerivationMismatch>,
    table: &'static str,
    field: &'static str,
    expected: f64,
    actual: f64,
) {
    if (expected - actual).abs() > DERIVATION_TOLERANCE {
        out.push(DerivationMismatch {
            table,
            field,
            expected,
            actual,
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
