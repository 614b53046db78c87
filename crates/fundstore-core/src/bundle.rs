//! # Company Bundle
//!
//! The bulk-load unit. The upstream extraction pipeline emits one JSON
//! document per source PDF:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  {                                                           │
//! │    "company_info":          { ... },   ← required            │
//! │    "shareholding":          { ... },   ← optional            │
//! │    "price_performance":     { ... },                         │
//! │    "financial_results":     { ... },                         │
//! │    "balance_sheet":         { ... },                         │
//! │    "cash_flow":             { ... },                         │
//! │    "key_ratios":            { ... },                         │
//! │    "management_discussion": { ... },                         │
//! │    "recommendations":       { ... }                          │
//! │  }                                                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bundle is applied in dependency order: company first, dependents
//! after, so referential integrity holds at every step.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{
    BalanceSheet, CashFlow, Company, FinancialResult, KeyRatios, ManagementDiscussion,
    PeriodRecord, PricePerformance, Recommendation, ShareholdingPattern,
};

/// One source document's worth of records.
///
/// Every section except `company_info` is optional; source documents
/// routinely omit sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyBundle {
    pub company_info: Company,
    #[serde(default)]
    pub shareholding: Option<ShareholdingPattern>,
    #[serde(default)]
    pub price_performance: Option<PricePerformance>,
    #[serde(default)]
    pub financial_results: Option<FinancialResult>,
    #[serde(default)]
    pub balance_sheet: Option<BalanceSheet>,
    #[serde(default)]
    pub cash_flow: Option<CashFlow>,
    #[serde(default)]
    pub key_ratios: Option<KeyRatios>,
    #[serde(default)]
    pub management_discussion: Option<ManagementDiscussion>,
    #[serde(default)]
    pub recommendations: Option<Recommendation>,
}

impl CompanyBundle {
    /// Parses a bundle from the pipeline's JSON document format.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fills in any missing `data_source` with the originating document
    /// name, the way the extraction pipeline stamps its output rows.
    pub fn stamp_data_source(&mut self, document: &str) {
        let stamp = |slot: &mut Option<String>| {
            if slot.is_none() {
                *slot = Some(document.to_string());
            }
        };

        stamp(&mut self.company_info.data_source);
        if let Some(r) = &mut self.shareholding {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.price_performance {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.financial_results {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.balance_sheet {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.cash_flow {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.key_ratios {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.management_discussion {
            stamp(&mut r.data_source);
        }
        if let Some(r) = &mut self.recommendations {
            stamp(&mut r.data_source);
        }
    }

    /// The dependent records present in this bundle, in bulk-load
    /// application order.
    pub fn dependent_records(&self) -> Vec<PeriodRecord> {
        let mut records = Vec::new();
        if let Some(r) = &self.shareholding {
            records.push(PeriodRecord::Shareholding(r.clone()));
        }
        if let Some(r) = &self.price_performance {
            records.push(PeriodRecord::PricePerformance(r.clone()));
        }
        if let Some(r) = &self.financial_results {
            records.push(PeriodRecord::FinancialResults(r.clone()));
        }
        if let Some(r) = &self.balance_sheet {
            records.push(PeriodRecord::BalanceSheet(r.clone()));
        }
        if let Some(r) = &self.cash_flow {
            records.push(PeriodRecord::CashFlow(r.clone()));
        }
        if let Some(r) = &self.key_ratios {
            records.push(PeriodRecord::KeyRatios(r.clone()));
        }
        if let Some(r) = &self.management_discussion {
            records.push(PeriodRecord::ManagementDiscussion(r.clone()));
        }
        if let Some(r) = &self.recommendations {
            records.push(PeriodRecord::Recommendations(r.clone()));
        }
        records
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;

    const SAMPLE: &str = r#"{
        "company_info": {
            "company_id": 1,
            "company_name": "Sun Pharmaceutical Industries Limited",
            "bse_code": "524715",
            "nse_code": "SUNPHARMA",
            "bloomberg_code": null,
            "sector": "Pharmaceuticals",
            "market_cap_cr": 351905,
            "enterprise_value_cr": null,
            "outstanding_shares_cr": 239.9,
            "beta": 0.6,
            "face_value_rs": 1,
            "year_high_price_rs": 1639.4,
            "year_low_price_rs": 938.7,
            "data_source": null
        },
        "shareholding": {
            "company_id": 1,
            "quarter": "Q4FY24",
            "promoter_holding_pct": 54.48,
            "fii_holding_pct": 17.6,
            "mf_holding_pct": 19.3,
            "public_holding_pct": 8.62,
            "others_holding_pct": null,
            "data_source": null
        },
        "financial_results": {
            "financial_id": 1,
            "company_id": 1,
            "fiscal_period": "Q2FY25",
            "revenue_cr": 11813,
            "yoy_growth_revenue_pct": 9.1,
            "ebitda_cr": null,
            "ebitda_margin_pct": null,
            "net_profit_cr": 2756,
            "net_profit_margin_pct": 23.33,
            "eps_rs": null,
            "data_source": null
        }
    }"#;

    #[test]
    fn test_bundle_parses_and_orders_dependents() {
        let bundle = CompanyBundle::from_json(SAMPLE).unwrap();
        assert_eq!(bundle.company_info.company_id, 1);

        let records = bundle.dependent_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), EntityKind::Shareholding);
        assert_eq!(records[1].kind(), EntityKind::FinancialResults);
    }

    #[test]
    fn test_legacy_holding_field_alias() {
        // The pipeline normalizes "mf_holding_pct" and friends into
        // "mf_insti_holding_pct"; the serde aliases reproduce that.
        let bundle = CompanyBundle::from_json(SAMPLE).unwrap();
        let sh = bundle.shareholding.unwrap();
        assert_eq!(sh.mf_insti_holding_pct, Some(19.3));
    }

    #[test]
    fn test_stamp_data_source_fills_only_missing() {
        let mut bundle = CompanyBundle::from_json(SAMPLE).unwrap();
        bundle.company_info.data_source = Some("original.pdf".to_string());
        bundle.stamp_data_source("SP20241006_SUNPHARMA.pdf");

        assert_eq!(
            bundle.company_info.data_source.as_deref(),
            Some("original.pdf")
        );
        assert_eq!(
            bundle.shareholding.unwrap().data_source.as_deref(),
            Some("SP20241006_SUNPHARMA.pdf")
        );
    }

    #[test]
    fn test_malformed_bundle_is_an_error() {
        assert!(CompanyBundle::from_json("{\"company_info\": 42}").is_err());
        assert!(CompanyBundle::from_json("not json").is_err());
    }
}
