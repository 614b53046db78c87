//! # Entity Types
//!
//! The nine entity collections of the Fundamentals Store.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        company_info (parent)                        │
//! │                          company_id (PK)                            │
//! └───────┬─────────┬─────────┬────────┬────────┬────────┬────────┬────┘
//!         │         │         │        │        │        │        │
//!   shareholding  price  financial  balance  cash_   key_   mgmt  recom-
//!   _pattern      _perf  _results   _sheet   flow    ratios disc. mendations
//!   (cid,quarter) (cid,  surrogate  surro-   surro-  surro- surro- surrogate
//!                 period) id        gate id  gate id gate id gate id id
//! ```
//!
//! ## Identity Pattern
//! - `company_info` is keyed by a producer-assigned `company_id` (i64).
//! - `shareholding_pattern` and `price_performance` use composite natural
//!   keys `(company_id, quarter/period)` - no surrogate id.
//! - The remaining six dependent tables carry producer-assigned surrogate
//!   ids (`financial_id`, `balance_sheet_id`, ...).
//!
//! The store never generates ids; the upstream ingestion pipeline owns them.
//!
//! ## Units
//! - `*_cr`  - crore (10 million) of rupees
//! - `*_pct` - percentage points
//! - `*_rs`  - rupees per share
//! - `*_x`   - multiple (e.g. P/E of 32.5x)

use serde::{Deserialize, Serialize};

// =============================================================================
// Company
// =============================================================================

/// Identity and static reference data for a listed company.
///
/// The only parent entity: every other record points back at
/// `company_id`. All numeric fields are nullable because the source
/// documents frequently omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Company {
    /// Producer-assigned identifier, primary key.
    pub company_id: i64,

    /// Legal name, e.g. "Sun Pharmaceutical Industries Limited". Required.
    pub company_name: String,

    /// BSE scrip code.
    pub bse_code: Option<String>,

    /// NSE ticker symbol.
    pub nse_code: Option<String>,

    /// Bloomberg terminal code.
    pub bloomberg_code: Option<String>,

    /// Industry sector, free text.
    pub sector: Option<String>,

    /// Market capitalisation in crore.
    pub market_cap_cr: Option<f64>,

    /// Enterprise value in crore.
    pub enterprise_value_cr: Option<f64>,

    /// Outstanding share count in crore.
    pub outstanding_shares_cr: Option<f64>,

    /// Beta versus the benchmark index. May be negative.
    pub beta: Option<f64>,

    /// Face value per share in rupees.
    pub face_value_rs: Option<f64>,

    /// 52-week high price in rupees.
    pub year_high_price_rs: Option<f64>,

    /// 52-week low price in rupees.
    pub year_low_price_rs: Option<f64>,

    /// Originating document name. Informational, never a key.
    pub data_source: Option<String>,
}

// =============================================================================
// Shareholding Pattern
// =============================================================================

/// Ownership split for one reporting quarter.
///
/// Natural key `(company_id, quarter)`. Holding percentages are bounded
/// to [0, 100] by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShareholdingPattern {
    pub company_id: i64,
    /// Reporting quarter, e.g. "Q4FY24".
    pub quarter: String,
    pub promoter_holding_pct: Option<f64>,
    pub fii_holding_pct: Option<f64>,
    /// Mutual fund / institutional holding. Source documents spell this
    /// field several ways; the aliases absorb the known variants.
    #[serde(
        alias = "mfi_instl_holding_pct",
        alias = "mf_holding_pct",
        alias = "institutional_holding_pct"
    )]
    pub mf_insti_holding_pct: Option<f64>,
    pub public_holding_pct: Option<f64>,
    pub others_holding_pct: Option<f64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Price Performance
// =============================================================================

/// Absolute, benchmark (Sensex) and relative returns over trailing
/// 3-month, 6-month and 1-year windows.
///
/// Natural key `(company_id, period)`. Returns may be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PricePerformance {
    pub company_id: i64,
    /// Reporting period, e.g. "Q4FY24".
    pub period: String,
    pub absolute_return_3m_pct: Option<f64>,
    pub absolute_return_6m_pct: Option<f64>,
    pub absolute_return_1y_pct: Option<f64>,
    pub sensex_return_3m_pct: Option<f64>,
    pub sensex_return_6m_pct: Option<f64>,
    pub sensex_return_1y_pct: Option<f64>,
    pub relative_return_3m_pct: Option<f64>,
    pub relative_return_6m_pct: Option<f64>,
    pub relative_return_1y_pct: Option<f64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Financial Result
// =============================================================================

/// Income-statement metrics for one fiscal period.
///
/// Documented derivations (checked by [`crate::derivation`], never
/// enforced):
/// - `ebitda_margin_pct = ebitda_cr / revenue_cr * 100`
/// - `net_profit_margin_pct = net_profit_cr / revenue_cr * 100`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FinancialResult {
    pub financial_id: i64,
    pub company_id: i64,
    pub fiscal_period: String,
    pub revenue_cr: Option<f64>,
    pub yoy_growth_revenue_pct: Option<f64>,
    pub ebitda_cr: Option<f64>,
    pub ebitda_margin_pct: Option<f64>,
    pub net_profit_cr: Option<f64>,
    pub net_profit_margin_pct: Option<f64>,
    pub eps_rs: Option<f64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Balance Sheet
// =============================================================================

/// Balance-sheet snapshot for one fiscal period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BalanceSheet {
    pub balance_sheet_id: i64,
    pub company_id: i64,
    pub fiscal_period: String,
    pub total_assets_cr: Option<f64>,
    pub total_liabilities_cr: Option<f64>,
    pub current_assets_cr: Option<f64>,
    pub cash_cr: Option<f64>,
    pub inventories_cr: Option<f64>,
    pub accounts_receivable_cr: Option<f64>,
    pub accounts_payable_cr: Option<f64>,
    pub long_term_debt_cr: Option<f64>,
    pub shareholder_equity_cr: Option<f64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Cash Flow
// =============================================================================

/// Cash-flow summary for one fiscal period.
///
/// `capex_cr` and the three net-cash components may legitimately be
/// negative. Documented derivation:
/// `free_cash_flow_cr = net_cash_from_operations_cr - capex_cr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CashFlow {
    pub cash_flow_id: i64,
    pub company_id: i64,
    pub fiscal_period: String,
    pub net_cash_from_operations_cr: Option<f64>,
    pub net_cash_from_investing_cr: Option<f64>,
    pub net_cash_from_financing_cr: Option<f64>,
    pub capex_cr: Option<f64>,
    pub free_cash_flow_cr: Option<f64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Key Ratios
// =============================================================================

/// Valuation and profitability ratios for one fiscal period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct KeyRatios {
    pub ratio_id: i64,
    pub company_id: i64,
    pub fiscal_period: String,
    pub pe_x: Option<f64>,
    pub pb_x: Option<f64>,
    pub ev_ebitda_x: Option<f64>,
    pub roe_pct: Option<f64>,
    pub roce_pct: Option<f64>,
    pub dividend_yield_pct: Option<f64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Management Discussion
// =============================================================================

/// Free-text management commentary keyed by topic and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ManagementDiscussion {
    pub discussion_id: i64,
    pub company_id: i64,
    pub fiscal_period: String,
    pub topic: Option<String>,
    pub discussion_text: Option<String>,
    pub data_source: Option<String>,
}

// =============================================================================
// Recommendation
// =============================================================================

/// Analyst rating and target price.
///
/// `rating` is passed through verbatim: the source imposes no rating
/// vocabulary, so neither does the store. Recommendations carry no
/// fiscal period; listings order by `recommendation_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Recommendation {
    pub recommendation_id: i64,
    pub company_id: i64,
    pub rating: Option<String>,
    pub target_price_rs: Option<f64>,
    pub time_horizon_months: Option<i64>,
    pub data_source: Option<String>,
}

// =============================================================================
// Entity Kind
// =============================================================================

/// Discriminant for the eight company-dependent collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Shareholding,
    PricePerformance,
    FinancialResults,
    BalanceSheet,
    CashFlow,
    KeyRatios,
    ManagementDiscussion,
    Recommendations,
}

impl EntityKind {
    /// Backing table name, as the upstream pipeline names its CSV files.
    pub const fn table(&self) -> &'static str {
        match self {
            EntityKind::Shareholding => "shareholding_pattern",
            EntityKind::PricePerformance => "price_performance",
            EntityKind::FinancialResults => "financial_results",
            EntityKind::BalanceSheet => "balance_sheet",
            EntityKind::CashFlow => "cash_flow",
            EntityKind::KeyRatios => "key_ratios",
            EntityKind::ManagementDiscussion => "management_discussion",
            EntityKind::Recommendations => "recommendations",
        }
    }

    /// All eight kinds, in bulk-load application order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Shareholding,
        EntityKind::PricePerformance,
        EntityKind::FinancialResults,
        EntityKind::BalanceSheet,
        EntityKind::CashFlow,
        EntityKind::KeyRatios,
        EntityKind::ManagementDiscussion,
        EntityKind::Recommendations,
    ];
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

// =============================================================================
// Period Record
// =============================================================================

/// A record destined for one of the eight dependent collections.
///
/// This is the unit `add_period_record` accepts: one typed row plus its
/// kind discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodRecord {
    Shareholding(ShareholdingPattern),
    PricePerformance(PricePerformance),
    FinancialResults(FinancialResult),
    BalanceSheet(BalanceSheet),
    CashFlow(CashFlow),
    KeyRatios(KeyRatios),
    ManagementDiscussion(ManagementDiscussion),
    Recommendations(Recommendation),
}

impl PeriodRecord {
    /// The collection this record belongs to.
    pub const fn kind(&self) -> EntityKind {
        match self {
            PeriodRecord::Shareholding(_) => EntityKind::Shareholding,
            PeriodRecord::PricePerformance(_) => EntityKind::PricePerformance,
            PeriodRecord::FinancialResults(_) => EntityKind::FinancialResults,
            PeriodRecord::BalanceSheet(_) => EntityKind::BalanceSheet,
            PeriodRecord::CashFlow(_) => EntityKind::CashFlow,
            PeriodRecord::KeyRatios(_) => EntityKind::KeyRatios,
            PeriodRecord::ManagementDiscussion(_) => EntityKind::ManagementDiscussion,
            PeriodRecord::Recommendations(_) => EntityKind::Recommendations,
        }
    }

    /// The parent company this record references.
    pub fn company_id(&self) -> i64 {
        match self {
            PeriodRecord::Shareholding(r) => r.company_id,
            PeriodRecord::PricePerformance(r) => r.company_id,
            PeriodRecord::FinancialResults(r) => r.company_id,
            PeriodRecord::BalanceSheet(r) => r.company_id,
            PeriodRecord::CashFlow(r) => r.company_id,
            PeriodRecord::KeyRatios(r) => r.company_id,
            PeriodRecord::ManagementDiscussion(r) => r.company_id,
            PeriodRecord::Recommendations(r) => r.company_id,
        }
    }

    /// The fiscal-period string, if the kind carries one.
    ///
    /// Recommendations have no period column and return `None`.
    pub fn period(&self) -> Option<&str> {
        match self {
            PeriodRecord::Shareholding(r) => Some(&r.quarter),
            PeriodRecord::PricePerformance(r) => Some(&r.period),
            PeriodRecord::FinancialResults(r) => Some(&r.fiscal_period),
            PeriodRecord::BalanceSheet(r) => Some(&r.fiscal_period),
            PeriodRecord::CashFlow(r) => Some(&r.fiscal_period),
            PeriodRecord::KeyRatios(r) => Some(&r.fiscal_period),
            PeriodRecord::ManagementDiscussion(r) => Some(&r.fiscal_period),
            PeriodRecord::Recommendations(_) => None,
        }
    }

    /// Human-readable key for error reporting.
    ///
    /// Composite-keyed kinds report `(company_id, period)`; the rest report
    /// their surrogate id.
    pub fn key_description(&self) -> String {
        match self {
            PeriodRecord::Shareholding(r) => format!("({}, '{}')", r.company_id, r.quarter),
            PeriodRecord::PricePerformance(r) => format!("({}, '{}')", r.company_id, r.period),
            PeriodRecord::FinancialResults(r) => format!("financial_id={}", r.financial_id),
            PeriodRecord::BalanceSheet(r) => format!("balance_sheet_id={}", r.balance_sheet_id),
            PeriodRecord::CashFlow(r) => format!("cash_flow_id={}", r.cash_flow_id),
            PeriodRecord::KeyRatios(r) => format!("ratio_id={}", r.ratio_id),
            PeriodRecord::ManagementDiscussion(r) => format!("discussion_id={}", r.discussion_id),
            PeriodRecord::Recommendations(r) => {
                format!("recommendation_id={}", r.recommendation_id)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shareholding() -> ShareholdingPattern {
        ShareholdingPattern {
            company_id: 1,
            quarter: "Q4FY24".to_string(),
            promoter_holding_pct: Some(54.48),
            fii_holding_pct: Some(17.6),
            mf_insti_holding_pct: Some(19.3),
            public_holding_pct: Some(8.62),
            others_holding_pct: None,
            data_source: Some("SP20241006_SUNPHARMA.pdf".to_string()),
        }
    }

    #[test]
    fn test_entity_kind_table_names() {
        assert_eq!(EntityKind::Shareholding.table(), "shareholding_pattern");
        assert_eq!(EntityKind::CashFlow.table(), "cash_flow");
        assert_eq!(EntityKind::Recommendations.to_string(), "recommendations");
    }

    #[test]
    fn test_period_record_accessors() {
        let rec = PeriodRecord::Shareholding(sample_shareholding());
        assert_eq!(rec.kind(), EntityKind::Shareholding);
        assert_eq!(rec.company_id(), 1);
        assert_eq!(rec.period(), Some("Q4FY24"));
        assert_eq!(rec.key_description(), "(1, 'Q4FY24')");
    }

    #[test]
    fn test_recommendation_has_no_period() {
        let rec = PeriodRecord::Recommendations(Recommendation {
            recommendation_id: 9,
            company_id: 1,
            rating: Some("BUY".to_string()),
            target_price_rs: Some(1980.0),
            time_horizon_months: Some(12),
            data_source: None,
        });
        assert_eq!(rec.period(), None);
        assert_eq!(rec.key_description(), "recommendation_id=9");
    }

    #[test]
    fn test_company_serde_round_trip() {
        let company = Company {
            company_id: 1,
            company_name: "Sun Pharmaceutical Industries Limited".to_string(),
            bse_code: Some("524715".to_string()),
            nse_code: Some("SUNPHARMA".to_string()),
            bloomberg_code: Some("SUNP:IN".to_string()),
            sector: Some("Pharmaceuticals".to_string()),
            market_cap_cr: Some(351905.0),
            enterprise_value_cr: Some(344089.0),
            outstanding_shares_cr: Some(239.9),
            beta: Some(0.6),
            face_value_rs: Some(1.0),
            year_high_price_rs: Some(1639.4),
            year_low_price_rs: Some(938.7),
            data_source: Some("SP20241006_SUNPHARMA.pdf".to_string()),
        };

        let json = serde_json::to_string(&company).unwrap();
        let back: Company = serde_json::from_str(&json).unwrap();
        assert_eq!(company, back);
    }
}
