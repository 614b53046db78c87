//! # Validation Module
//!
//! Field validation for the Fundamentals Store.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                        │
//! │                                                              │
//! │  Layer 1: THIS MODULE (pure, pre-storage)                    │
//! │  ├── Required fields (company_name, period strings)          │
//! │  ├── Sign rules (currency non-negative, returns unbounded)   │
//! │  └── Range rules (holding percentages in [0, 100])           │
//! │           │                                                  │
//! │           ▼                                                  │
//! │  Layer 2: Database (SQLite)                                  │
//! │  ├── NOT NULL constraints                                    │
//! │  ├── PRIMARY KEY / UNIQUE constraints                        │
//! │  └── Foreign key constraints                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sign Rules
//! - `*_cr` currency fields are non-negative, EXCEPT earnings figures
//!   (`ebitda_cr`, `net_profit_cr`), `capex_cr` and the net-cash-flow
//!   components, which may legitimately be negative.
//! - Holding percentages (`*_holding_pct`) are bounded to [0, 100].
//! - Return and margin percentages are unbounded in sign (a stock can
//!   fall, a company can make a loss) but must be finite.

use crate::error::ValidationError;
use crate::types::{
    BalanceSheet, CashFlow, Company, FinancialResult, KeyRatios, ManagementDiscussion,
    PeriodRecord, PricePerformance, Recommendation, ShareholdingPattern,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Helpers
// =============================================================================

/// A required text field must contain at least one non-whitespace char.
fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Any numeric field, regardless of sign rules, must be finite.
fn check_finite(field: &str, value: Option<f64>) -> ValidationResult<()> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Non-negative numeric field (currency amounts, prices, share counts).
fn check_non_negative(field: &str, value: Option<f64>) -> ValidationResult<()> {
    check_finite(field, value)?;
    if let Some(v) = value {
        if v < 0.0 {
            return Err(ValidationError::Negative {
                field: field.to_string(),
                value: v,
            });
        }
    }
    Ok(())
}

/// Holding percentage, bounded to [0, 100].
fn check_holding_pct(field: &str, value: Option<f64>) -> ValidationResult<()> {
    check_finite(field, value)?;
    if let Some(v) = value {
        if !(0.0..=100.0).contains(&v) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0.0,
                max: 100.0,
                value: v,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Company
// =============================================================================

/// Validates a company record before upsert.
///
/// ## Rules
/// - `company_name` required
/// - market cap, EV, share count, face value and 52-week prices
///   non-negative
/// - 52-week high must not be below the 52-week low
pub fn validate_company(company: &Company) -> ValidationResult<()> {
    require_text("company_name", &company.company_name)?;

    check_non_negative("market_cap_cr", company.market_cap_cr)?;
    check_non_negative("enterprise_value_cr", company.enterprise_value_cr)?;
    check_non_negative("outstanding_shares_cr", company.outstanding_shares_cr)?;
    check_finite("beta", company.beta)?;
    check_non_negative("face_value_rs", company.face_value_rs)?;
    check_non_negative("year_high_price_rs", company.year_high_price_rs)?;
    check_non_negative("year_low_price_rs", company.year_low_price_rs)?;

    if let (Some(high), Some(low)) = (company.year_high_price_rs, company.year_low_price_rs) {
        if high < low {
            return Err(ValidationError::Inconsistent {
                field: "year_high_price_rs".to_string(),
                reason: format!("52-week high {high} is below 52-week low {low}"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Dependent Records
// =============================================================================

/// Validates a dependent record before insert, dispatching on its kind.
pub fn validate_period_record(record: &PeriodRecord) -> ValidationResult<()> {
    match record {
        PeriodRecord::Shareholding(r) => validate_shareholding(r),
        PeriodRecord::PricePerformance(r) => validate_price_performance(r),
        PeriodRecord::FinancialResults(r) => validate_financial_result(r),
        PeriodRecord::BalanceSheet(r) => validate_balance_sheet(r),
        PeriodRecord::CashFlow(r) => validate_cash_flow(r),
        PeriodRecord::KeyRatios(r) => validate_key_ratios(r),
        PeriodRecord::ManagementDiscussion(r) => validate_management_discussion(r),
        PeriodRecord::Recommendations(r) => validate_recommendation(r),
    }
}

fn validate_shareholding(r: &ShareholdingPattern) -> ValidationResult<()> {
    require_text("quarter", &r.quarter)?;
    check_holding_pct("promoter_holding_pct", r.promoter_holding_pct)?;
    check_holding_pct("fii_holding_pct", r.fii_holding_pct)?;
    check_holding_pct("mf_insti_holding_pct", r.mf_insti_holding_pct)?;
    check_holding_pct("public_holding_pct", r.public_holding_pct)?;
    check_holding_pct("others_holding_pct", r.others_holding_pct)?;
    Ok(())
}

fn validate_price_performance(r: &PricePerformance) -> ValidationResult<()> {
    require_text("period", &r.period)?;
    // Returns are unbounded in sign; only reject NaN/infinity.
    check_finite("absolute_return_3m_pct", r.absolute_return_3m_pct)?;
    check_finite("absolute_return_6m_pct", r.absolute_return_6m_pct)?;
    check_finite("absolute_return_1y_pct", r.absolute_return_1y_pct)?;
    check_finite("sensex_return_3m_pct", r.sensex_return_3m_pct)?;
    check_finite("sensex_return_6m_pct", r.sensex_return_6m_pct)?;
    check_finite("sensex_return_1y_pct", r.sensex_return_1y_pct)?;
    check_finite("relative_return_3m_pct", r.relative_return_3m_pct)?;
    check_finite("relative_return_6m_pct", r.relative_return_6m_pct)?;
    check_finite("relative_return_1y_pct", r.relative_return_1y_pct)?;
    Ok(())
}

fn validate_financial_result(r: &FinancialResult) -> ValidationResult<()> {
    require_text("fiscal_period", &r.fiscal_period)?;
    check_non_negative("revenue_cr", r.revenue_cr)?;
    // Earnings figures can be negative in a loss period, and the margins
    // derived from them follow; only revenue carries a sign rule.
    check_finite("ebitda_cr", r.ebitda_cr)?;
    check_finite("net_profit_cr", r.net_profit_cr)?;
    check_finite("yoy_growth_revenue_pct", r.yoy_growth_revenue_pct)?;
    check_finite("ebitda_margin_pct", r.ebitda_margin_pct)?;
    check_finite("net_profit_margin_pct", r.net_profit_margin_pct)?;
    check_finite("eps_rs", r.eps_rs)?;
    Ok(())
}

fn validate_balance_sheet(r: &BalanceSheet) -> ValidationResult<()> {
    require_text("fiscal_period", &r.fiscal_period)?;
    check_non_negative("total_assets_cr", r.total_assets_cr)?;
    check_non_negative("total_liabilities_cr", r.total_liabilities_cr)?;
    check_non_negative("current_assets_cr", r.current_assets_cr)?;
    check_non_negative("cash_cr", r.cash_cr)?;
    check_non_negative("inventories_cr", r.inventories_cr)?;
    check_non_negative("accounts_receivable_cr", r.accounts_receivable_cr)?;
    check_non_negative("accounts_payable_cr", r.accounts_payable_cr)?;
    check_non_negative("long_term_debt_cr", r.long_term_debt_cr)?;
    check_non_negative("shareholder_equity_cr", r.shareholder_equity_cr)?;
    Ok(())
}

fn validate_cash_flow(r: &CashFlow) -> ValidationResult<()> {
    require_text("fiscal_period", &r.fiscal_period)?;
    // All cash-flow components may be negative (outflows); only reject
    // non-finite values.
    check_finite("net_cash_from_operations_cr", r.net_cash_from_operations_cr)?;
    check_finite("net_cash_from_investing_cr", r.net_cash_from_investing_cr)?;
    check_finite("net_cash_from_financing_cr", r.net_cash_from_financing_cr)?;
    check_finite("capex_cr", r.capex_cr)?;
    check_finite("free_cash_flow_cr", r.free_cash_flow_cr)?;
    Ok(())
}

fn validate_key_ratios(r: &KeyRatios) -> ValidationResult<()> {
    require_text("fiscal_period", &r.fiscal_period)?;
    check_finite("pe_x", r.pe_x)?;
    check_finite("pb_x", r.pb_x)?;
    check_finite("ev_ebitda_x", r.ev_ebitda_x)?;
    check_finite("roe_pct", r.roe_pct)?;
    check_finite("roce_pct", r.roce_pct)?;
    check_non_negative("dividend_yield_pct", r.dividend_yield_pct)?;
    Ok(())
}

fn validate_management_discussion(r: &ManagementDiscussion) -> ValidationResult<()> {
    require_text("fiscal_period", &r.fiscal_period)?;
    Ok(())
}

/// Ratings are passed through verbatim (the source imposes no rating
/// vocabulary); only the numeric fields are checked.
fn validate_recommendation(r: &Recommendation) -> ValidationResult<()> {
    check_non_negative("target_price_rs", r.target_price_rs)?;
    if let Some(months) = r.time_horizon_months {
        if months <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "time_horizon_months".to_string(),
                min: 1.0,
                max: f64::MAX,
                value: months as f64,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_company() -> Company {
        Company {
            company_id: 1,
            company_name: "Sun Pharmaceutical Industries Limited".to_string(),
            bse_code: None,
            nse_code: None,
            bloomberg_code: None,
            sector: None,
            market_cap_cr: Some(351905.0),
            enterprise_value_cr: None,
            outstanding_shares_cr: None,
            beta: None,
            face_value_rs: None,
            year_high_price_rs: None,
            year_low_price_rs: None,
            data_source: None,
        }
    }

    #[test]
    fn test_validate_company_ok() {
        assert!(validate_company(&minimal_company()).is_ok());
    }

    #[test]
    fn test_validate_company_rejects_empty_name() {
        let mut company = minimal_company();
        company.company_name = "   ".to_string();
        let err = validate_company(&company).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "company_name"));
    }

    #[test]
    fn test_validate_company_rejects_negative_market_cap() {
        let mut company = minimal_company();
        company.market_cap_cr = Some(-5.0);
        assert!(matches!(
            validate_company(&company),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_validate_company_rejects_inverted_price_range() {
        let mut company = minimal_company();
        company.year_high_price_rs = Some(900.0);
        company.year_low_price_rs = Some(1600.0);
        assert!(matches!(
            validate_company(&company),
            Err(ValidationError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_holding_pct_bounds() {
        let mut r = ShareholdingPattern {
            company_id: 1,
            quarter: "Q4FY24".to_string(),
            promoter_holding_pct: Some(54.48),
            fii_holding_pct: None,
            mf_insti_holding_pct: None,
            public_holding_pct: None,
            others_holding_pct: None,
            data_source: None,
        };
        assert!(validate_shareholding(&r).is_ok());

        r.promoter_holding_pct = Some(154.0);
        assert!(matches!(
            validate_shareholding(&r),
            Err(ValidationError::OutOfRange { .. })
        ));

        r.promoter_holding_pct = Some(-1.0);
        assert!(validate_shareholding(&r).is_err());
    }

    #[test]
    fn test_negative_returns_are_allowed() {
        let r = PricePerformance {
            company_id: 1,
            period: "Q4FY24".to_string(),
            absolute_return_3m_pct: Some(-12.4),
            absolute_return_6m_pct: None,
            absolute_return_1y_pct: None,
            sensex_return_3m_pct: Some(2.1),
            sensex_return_6m_pct: None,
            sensex_return_1y_pct: None,
            relative_return_3m_pct: Some(-14.5),
            relative_return_6m_pct: None,
            relative_return_1y_pct: None,
            data_source: None,
        };
        assert!(validate_price_performance(&r).is_ok());
    }

    #[test]
    fn test_empty_period_rejected() {
        let r = CashFlow {
            cash_flow_id: 3,
            company_id: 3,
            fiscal_period: "".to_string(),
            net_cash_from_operations_cr: Some(65336.0),
            net_cash_from_investing_cr: None,
            net_cash_from_financing_cr: None,
            capex_cr: Some(37667.0),
            free_cash_flow_cr: Some(27669.0),
            data_source: None,
        };
        assert!(matches!(
            validate_cash_flow(&r),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_negative_capex_is_allowed() {
        let r = CashFlow {
            cash_flow_id: 4,
            company_id: 3,
            fiscal_period: "FY24".to_string(),
            net_cash_from_operations_cr: Some(100.0),
            net_cash_from_investing_cr: Some(-250.0),
            net_cash_from_financing_cr: None,
            capex_cr: Some(-37667.0),
            free_cash_flow_cr: None,
            data_source: None,
        };
        assert!(validate_cash_flow(&r).is_ok());
    }

    #[test]
    fn test_loss_period_financials_are_allowed() {
        let r = FinancialResult {
            financial_id: 1,
            company_id: 1,
            fiscal_period: "Q3FY25".to_string(),
            revenue_cr: Some(1200.0),
            yoy_growth_revenue_pct: Some(-8.5),
            ebitda_cr: Some(-45.0),
            ebitda_margin_pct: Some(-3.75),
            net_profit_cr: Some(-130.0),
            net_profit_margin_pct: Some(-10.83),
            eps_rs: Some(-2.1),
            data_source: None,
        };
        assert!(validate_financial_result(&r).is_ok());

        // Revenue keeps its sign rule even when earnings are negative.
        let bad_revenue = FinancialResult {
            revenue_cr: Some(-1200.0),
            ..r
        };
        assert!(matches!(
            validate_financial_result(&bad_revenue),
            Err(ValidationError::Negative { ref field, .. }) if field == "revenue_cr"
        ));
    }

    #[test]
    fn test_recommendation_rating_is_passthrough() {
        let r = Recommendation {
            recommendation_id: 1,
            company_id: 1,
            rating: Some("ACCUMULATE ON DIPS".to_string()),
            target_price_rs: Some(1980.0),
            time_horizon_months: Some(12),
            data_source: None,
        };
        assert!(validate_recommendation(&r).is_ok());

        let bad_horizon = Recommendation {
            time_horizon_months: Some(0),
            ..r
        };
        assert!(validate_recommendation(&bad_horizon).is_err());
    }
}
