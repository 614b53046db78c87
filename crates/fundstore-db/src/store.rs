//! # Fundamentals Store Facade
//!
//! The validated entry point over all nine collections.
//!
//! ## Operation Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  add_period_record(record)                                   │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  validate fields (fundstore-core)  ──► ValidationError       │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  company exists?                   ──► ReferentialViolation  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  INSERT (repository)               ──► Duplicate on key hit  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failure semantics: validation, referential and duplicate-key
//! violations are fatal to the single record. Derivation mismatches are
//! advisory: they are logged, collected into the bulk-load report, and
//! never abort anything. Unparseable fiscal periods are warned about and
//! sorted last, never rejected.

use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use fundstore_core::derivation::{validate_derivations, DerivationMismatch};
use fundstore_core::period::{parse_period, period_sort_key, PeriodSortKey};
use fundstore_core::validation::{validate_company, validate_period_record};
use fundstore_core::{Company, CompanyBundle, EntityKind, PeriodRecord};

// =============================================================================
// Bulk Load Types
// =============================================================================

/// How a bulk load reacts to a bad record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// The first error aborts the load (default).
    Strict,
    /// Bad records are skipped; all errors are collected in the report.
    BestEffort,
}

/// One record that a best-effort load rejected.
#[derive(Debug)]
pub struct LoadError {
    /// Target table of the rejected record.
    pub table: &'static str,
    /// Key of the rejected record, human-readable.
    pub key: String,
    /// What went wrong.
    pub error: DbError,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.table, self.key, self.error)
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records successfully written (companies and dependents).
    pub loaded: usize,
    /// Rejected records (empty in strict mode: the first one aborts).
    pub errors: Vec<LoadError>,
    /// Advisory derivation mismatches found along the way.
    pub mismatches: Vec<DerivationMismatch>,
}

impl LoadReport {
    /// True when nothing was rejected (mismatches don't count).
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.errors.extend(other.errors);
        self.mismatches.extend(other.mismatches);
    }
}

// =============================================================================
// Fundamentals Store
// =============================================================================

/// Typed, validated access to the nine entity collections.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./fundamentals.db")).await?;
/// let store = db.store();
///
/// store.upsert_company(&company).await?;
/// store.add_period_record(&record).await?;
/// let latest = store.get_latest(EntityKind::FinancialResults, 1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FundamentalsStore {
    db: Database,
}

impl FundamentalsStore {
    /// Creates a store over an open database handle.
    pub fn new(db: Database) -> Self {
        FundamentalsStore { db }
    }

    // -------------------------------------------------------------------------
    // Company operations
    // -------------------------------------------------------------------------

    /// Inserts or replaces a company by `company_id`.
    ///
    /// Fails with a validation error if `company_name` is empty or a
    /// numeric field breaks its sign rule. Dependent rows are untouched.
    pub async fn upsert_company(&self, company: &Company) -> DbResult<()> {
        validate_company(company)?;
        self.db.companies().upsert(company).await
    }

    /// Returns the company, or NotFound.
    pub async fn get_company(&self, company_id: i64) -> DbResult<Company> {
        self.db.companies().get_required(company_id).await
    }

    // -------------------------------------------------------------------------
    // Dependent-record operations
    // -------------------------------------------------------------------------

    /// Inserts a record into one of the eight dependent collections.
    ///
    /// ## Failure semantics
    /// * field validation failure - the record never reaches storage
    /// * missing parent company - `ReferentialViolation`
    /// * natural or surrogate key collision - `Duplicate`
    ///
    /// An unparseable fiscal period is a warning, not a failure.
    pub async fn add_period_record(&self, record: &PeriodRecord) -> DbResult<()> {
        validate_period_record(record)?;

        let kind = record.kind();
        let company_id = record.company_id();

        // Explicit pre-check so the error names the table and company;
        // the SQLite FK constraint remains the backstop.
        if !self.db.companies().exists(company_id).await? {
            return Err(DbError::referential(kind.table(), company_id));
        }

        if let Some(period) = record.period() {
            if parse_period(period).is_none() {
                warn!(
                    table = kind.table(),
                    period = %period,
                    "Unparseable fiscal period; record accepted, will sort last"
                );
            }
        }

        let result = match record {
            PeriodRecord::Shareholding(r) => self.db.shareholding().insert(r).await,
            PeriodRecord::PricePerformance(r) => self.db.price_performance().insert(r).await,
            PeriodRecord::FinancialResults(r) => self.db.financial_results().insert(r).await,
            PeriodRecord::BalanceSheet(r) => self.db.balance_sheets().insert(r).await,
            PeriodRecord::CashFlow(r) => self.db.cash_flows().insert(r).await,
            PeriodRecord::KeyRatios(r) => self.db.key_ratios().insert(r).await,
            PeriodRecord::ManagementDiscussion(r) => self.db.discussions().insert(r).await,
            PeriodRecord::Recommendations(r) => self.db.recommendations().insert(r).await,
        };

        // Rewrite constraint errors with the record's own key description;
        // the raw SQLite message only names columns.
        result.map_err(|e| match e {
            DbError::Duplicate { .. } => DbError::duplicate(kind.table(), record.key_description()),
            DbError::ReferentialViolation { .. } => DbError::referential(kind.table(), company_id),
            other => other,
        })
    }

    /// All dependent records of one kind for a company, ordered
    /// ascending by fiscal period.
    ///
    /// Unparseable periods sort after all parsed ones (with a warning);
    /// recommendations order by surrogate id since they carry no period.
    /// Fails with NotFound if the company itself does not exist; a
    /// company with no records of the kind yields an empty list.
    pub async fn list_by_company(
        &self,
        kind: EntityKind,
        company_id: i64,
    ) -> DbResult<Vec<PeriodRecord>> {
        if !self.db.companies().exists(company_id).await? {
            return Err(DbError::not_found("Company", company_id));
        }

        let mut records: Vec<PeriodRecord> = match kind {
            EntityKind::Shareholding => self
                .db
                .shareholding()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::Shareholding)
                .collect(),
            EntityKind::PricePerformance => self
                .db
                .price_performance()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::PricePerformance)
                .collect(),
            EntityKind::FinancialResults => self
                .db
                .financial_results()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::FinancialResults)
                .collect(),
            EntityKind::BalanceSheet => self
                .db
                .balance_sheets()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::BalanceSheet)
                .collect(),
            EntityKind::CashFlow => self
                .db
                .cash_flows()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::CashFlow)
                .collect(),
            EntityKind::KeyRatios => self
                .db
                .key_ratios()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::KeyRatios)
                .collect(),
            EntityKind::ManagementDiscussion => self
                .db
                .discussions()
                .list_for_company(company_id)
                .await?
                .into_iter()
                .map(PeriodRecord::ManagementDiscussion)
                .collect(),
            EntityKind::Recommendations => {
                // Already ordered by surrogate id in SQL; no period sort.
                return Ok(self
                    .db
                    .recommendations()
                    .list_for_company(company_id)
                    .await?
                    .into_iter()
                    .map(PeriodRecord::Recommendations)
                    .collect());
            }
        };

        for record in &records {
            if let Some(period) = record.period() {
                if parse_period(period).is_none() {
                    warn!(
                        table = kind.table(),
                        period = %period,
                        "Unparseable fiscal period; sorting last"
                    );
                }
            }
        }

        records.sort_by_cached_key(|r| {
            r.period()
                .map(period_sort_key)
                .unwrap_or(PeriodSortKey::Opaque(String::new()))
        });

        Ok(records)
    }

    /// The most recent period's record of one kind for a company, per
    /// the period-ordering rule.
    ///
    /// NotFound if the company has no records of the kind (or doesn't
    /// exist at all).
    pub async fn get_latest(&self, kind: EntityKind, company_id: i64) -> DbResult<PeriodRecord> {
        self.list_by_company(kind, company_id)
            .await?
            .pop()
            .ok_or_else(|| DbError::not_found(kind.table(), format!("company {company_id}")))
    }

    // -------------------------------------------------------------------------
    // Bulk load
    // -------------------------------------------------------------------------

    /// Applies one source document's bundle in dependency order:
    /// company first, dependents after.
    ///
    /// Strict mode aborts on the first bad record; best-effort mode
    /// skips it and keeps going, collecting every error in the report.
    /// Derivation mismatches are collected in both modes and never
    /// abort anything.
    pub async fn load_bundle(&self, bundle: &CompanyBundle, mode: LoadMode) -> DbResult<LoadReport> {
        let mut report = LoadReport::default();
        let company = &bundle.company_info;

        debug!(company_id = company.company_id, "Loading bundle");

        match self.upsert_company(company).await {
            Ok(()) => report.loaded += 1,
            Err(e) if mode == LoadMode::Strict => return Err(e),
            Err(e) => report.errors.push(LoadError {
                table: "company_info",
                key: format!("company_id={}", company.company_id),
                error: e,
            }),
        }

        for record in bundle.dependent_records() {
            let mismatches = validate_derivations(&record);
            for m in &mismatches {
                warn!(mismatch = %m, "Derivation mismatch (advisory)");
            }
            report.mismatches.extend(mismatches);

            match self.add_period_record(&record).await {
                Ok(()) => report.loaded += 1,
                Err(e) if mode == LoadMode::Strict => return Err(e),
                Err(e) => report.errors.push(LoadError {
                    table: record.kind().table(),
                    key: record.key_description(),
                    error: e,
                }),
            }
        }

        Ok(report)
    }

    /// Applies a sequence of bundles, aggregating the reports.
    pub async fn load_bundles(
        &self,
        bundles: &[CompanyBundle],
        mode: LoadMode,
    ) -> DbResult<LoadReport> {
        let mut report = LoadReport::default();
        for bundle in bundles {
            report.merge(self.load_bundle(bundle, mode).await?);
        }
        info!(
            bundles = bundles.len(),
            loaded = report.loaded,
            rejected = report.errors.len(),
            mismatches = report.mismatches.len(),
            "Bulk load complete"
        );
        Ok(report)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use fundstore_core::{
        BalanceSheet, CashFlow, FinancialResult, KeyRatios, ManagementDiscussion,
        PricePerformance, Recommendation, ShareholdingPattern,
    };

    async fn fresh_store() -> FundamentalsStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.store()
    }

    fn sun_pharma() -> Company {
        Company {
            company_id: 1,
            company_name: "Sun Pharmaceutical Industries Limited".to_string(),
            bse_code: Some("524715".to_string()),
            nse_code: Some("SUNPHARMA".to_string()),
            bloomberg_code: None,
            sector: Some("Pharmaceuticals".to_string()),
            market_cap_cr: Some(351905.0),
            enterprise_value_cr: Some(344089.0),
            outstanding_shares_cr: Some(239.9),
            beta: Some(0.6),
            face_value_rs: Some(1.0),
            year_high_price_rs: Some(1639.4),
            year_low_price_rs: Some(938.7),
            data_source: Some("SP20241006_SUNPHARMA.pdf".to_string()),
        }
    }

    fn company(id: i64, name: &str) -> Company {
        Company {
            company_id: id,
            company_name: name.to_string(),
            bse_code: None,
            nse_code: None,
            bloomberg_code: None,
            sector: None,
            market_cap_cr: None,
            enterprise_value_cr: None,
            outstanding_shares_cr: None,
            beta: None,
            face_value_rs: None,
            year_high_price_rs: None,
            year_low_price_rs: None,
            data_source: None,
        }
    }

    fn shareholding(company_id: i64, quarter: &str) -> ShareholdingPattern {
        ShareholdingPattern {
            company_id,
            quarter: quarter.to_string(),
            promoter_holding_pct: Some(54.48),
            fii_holding_pct: Some(17.6),
            mf_insti_holding_pct: Some(19.3),
            public_holding_pct: Some(8.62),
            others_holding_pct: None,
            data_source: None,
        }
    }

    fn financial(financial_id: i64, company_id: i64, period: &str) -> FinancialResult {
        FinancialResult {
            financial_id,
            company_id,
            fiscal_period: period.to_string(),
            revenue_cr: Some(11813.0),
            yoy_growth_revenue_pct: None,
            ebitda_cr: None,
            ebitda_margin_pct: None,
            net_profit_cr: Some(2756.0),
            net_profit_margin_pct: None,
            eps_rs: None,
            data_source: None,
        }
    }

    /// One record of each dependent kind, pointing at `company_id`.
    fn one_of_each(company_id: i64) -> Vec<PeriodRecord> {
        vec![
            PeriodRecord::Shareholding(shareholding(company_id, "Q4FY24")),
            PeriodRecord::PricePerformance(PricePerformance {
                company_id,
                period: "Q4FY24".to_string(),
                absolute_return_3m_pct: Some(-4.2),
                absolute_return_6m_pct: None,
                absolute_return_1y_pct: Some(38.9),
                sensex_return_3m_pct: None,
                sensex_return_6m_pct: None,
                sensex_return_1y_pct: None,
                relative_return_3m_pct: None,
                relative_return_6m_pct: None,
                relative_return_1y_pct: None,
                data_source: None,
            }),
            PeriodRecord::FinancialResults(financial(1, company_id, "Q2FY25")),
            PeriodRecord::BalanceSheet(BalanceSheet {
                balance_sheet_id: 1,
                company_id,
                fiscal_period: "FY24".to_string(),
                total_assets_cr: Some(91600.0),
                total_liabilities_cr: Some(22500.0),
                current_assets_cr: None,
                cash_cr: Some(12000.0),
                inventories_cr: None,
                accounts_receivable_cr: None,
                accounts_payable_cr: None,
                long_term_debt_cr: None,
                shareholder_equity_cr: Some(69100.0),
                data_source: None,
            }),
            PeriodRecord::CashFlow(CashFlow {
                cash_flow_id: 1,
                company_id,
                fiscal_period: "FY24".to_string(),
                net_cash_from_operations_cr: Some(13000.0),
                net_cash_from_investing_cr: Some(-5300.0),
                net_cash_from_financing_cr: Some(-4200.0),
                capex_cr: Some(2900.0),
                free_cash_flow_cr: Some(10100.0),
                data_source: None,
            }),
            PeriodRecord::KeyRatios(KeyRatios {
                ratio_id: 1,
                company_id,
                fiscal_period: "FY24".to_string(),
                pe_x: Some(36.7),
                pb_x: Some(5.1),
                ev_ebitda_x: Some(24.2),
                roe_pct: Some(14.8),
                roce_pct: Some(17.1),
                dividend_yield_pct: Some(0.9),
                data_source: None,
            }),
            PeriodRecord::ManagementDiscussion(ManagementDiscussion {
                discussion_id: 1,
                company_id,
                fiscal_period: "Q2FY25".to_string(),
                topic: Some("Specialty portfolio momentum".to_string()),
                discussion_text: Some("Specialty sales grew on global ramp-up.".to_string()),
                data_source: None,
            }),
            PeriodRecord::Recommendations(Recommendation {
                recommendation_id: 1,
                company_id,
                rating: Some("BUY".to_string()),
                target_price_rs: Some(1980.0),
                time_horizon_months: Some(12),
                data_source: None,
            }),
        ]
    }

    // -------------------------------------------------------------------------
    // Company operations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_upsert_then_get_round_trips() {
        let store = fresh_store().await;
        let company = sun_pharma();

        store.upsert_company(&company).await.unwrap();
        let fetched = store.get_company(1).await.unwrap();

        assert_eq!(fetched, company);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        let mut refreshed = sun_pharma();
        refreshed.market_cap_cr = Some(360000.0);
        store.upsert_company(&refreshed).await.unwrap();

        let fetched = store.get_company(1).await.unwrap();
        assert_eq!(fetched.market_cap_cr, Some(360000.0));
    }

    #[tokio::test]
    async fn test_upsert_rejects_empty_name() {
        let store = fresh_store().await;
        let mut company = sun_pharma();
        company.company_name = "".to_string();

        let err = store.upsert_company(&company).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_company_not_found() {
        let store = fresh_store().await;
        let err = store.get_company(404).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    // -------------------------------------------------------------------------
    // Referential integrity
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_every_kind_requires_existing_company() {
        let store = fresh_store().await;

        for record in one_of_each(999) {
            let kind = record.kind();
            let err = store.add_period_record(&record).await.unwrap_err();
            assert!(
                matches!(
                    err,
                    DbError::ReferentialViolation { company_id: 999, .. }
                ),
                "{kind} accepted a record for a missing company"
            );
        }
    }

    #[tokio::test]
    async fn test_all_kinds_insert_and_list() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        for record in one_of_each(1) {
            store.add_period_record(&record).await.unwrap();
        }

        for kind in EntityKind::ALL {
            let rows = store.list_by_company(kind, 1).await.unwrap();
            assert_eq!(rows.len(), 1, "{kind} should have one row");
        }
    }

    // -------------------------------------------------------------------------
    // Duplicate keys
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_duplicate_natural_key_rejected() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        let row = PeriodRecord::Shareholding(shareholding(1, "Q4FY24"));
        store.add_period_record(&row).await.unwrap();

        let err = store.add_period_record(&row).await.unwrap_err();
        match err {
            DbError::Duplicate { table, key } => {
                assert_eq!(table, "shareholding_pattern");
                assert_eq!(key, "(1, 'Q4FY24')");
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_surrogate_id_rejected() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        let first = PeriodRecord::FinancialResults(financial(7, 1, "Q1FY25"));
        let second = PeriodRecord::FinancialResults(financial(7, 1, "Q2FY25"));

        store.add_period_record(&first).await.unwrap();
        let err = store.add_period_record(&second).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate { .. }));
    }

    // -------------------------------------------------------------------------
    // Period ordering
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_latest_uses_period_order() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        // Deliberately inserted out of order.
        for (id, period) in [(1, "Q4FY24"), (2, "FY23"), (3, "Q1FY25")] {
            store
                .add_period_record(&PeriodRecord::FinancialResults(financial(id, 1, period)))
                .await
                .unwrap();
        }

        let latest = store
            .get_latest(EntityKind::FinancialResults, 1)
            .await
            .unwrap();
        assert_eq!(latest.period(), Some("Q1FY25"));

        let listed = store
            .list_by_company(EntityKind::FinancialResults, 1)
            .await
            .unwrap();
        let periods: Vec<_> = listed.iter().filter_map(|r| r.period()).collect();
        assert_eq!(periods, vec!["FY23", "Q4FY24", "Q1FY25"]);
    }

    #[tokio::test]
    async fn test_unparseable_period_accepted_and_sorted_last() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        for (id, period) in [(1, "H1FY26"), (2, "Q1FY25")] {
            store
                .add_period_record(&PeriodRecord::FinancialResults(financial(id, 1, period)))
                .await
                .unwrap();
        }

        let latest = store
            .get_latest(EntityKind::FinancialResults, 1)
            .await
            .unwrap();
        // The opaque period sorts last, so it wins "latest" by the rule.
        assert_eq!(latest.period(), Some("H1FY26"));
    }

    #[tokio::test]
    async fn test_get_latest_not_found_when_no_rows() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        let err = store
            .get_latest(EntityKind::CashFlow, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_for_missing_company_is_not_found() {
        let store = fresh_store().await;
        let err = store
            .list_by_company(EntityKind::KeyRatios, 42)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    // -------------------------------------------------------------------------
    // Spec scenarios
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_cash_flow_free_cash_flow_scenario() {
        let store = fresh_store().await;
        store
            .upsert_company(&company(3, "Reliance Industries Limited"))
            .await
            .unwrap();

        store
            .add_period_record(&PeriodRecord::CashFlow(CashFlow {
                cash_flow_id: 3,
                company_id: 3,
                fiscal_period: "FY24".to_string(),
                net_cash_from_operations_cr: Some(65336.0),
                net_cash_from_investing_cr: None,
                net_cash_from_financing_cr: None,
                capex_cr: Some(37667.0),
                free_cash_flow_cr: Some(27669.0),
                data_source: None,
            }))
            .await
            .unwrap();

        let rows = store.list_by_company(EntityKind::CashFlow, 3).await.unwrap();
        assert_eq!(rows.len(), 1);

        let PeriodRecord::CashFlow(cf) = &rows[0] else {
            panic!("expected a cash flow record");
        };
        assert_eq!(
            cf.free_cash_flow_cr,
            Some(cf.net_cash_from_operations_cr.unwrap() - cf.capex_cr.unwrap())
        );
    }

    #[tokio::test]
    async fn test_rating_is_stored_verbatim() {
        let store = fresh_store().await;
        store.upsert_company(&sun_pharma()).await.unwrap();

        store
            .add_period_record(&PeriodRecord::Recommendations(Recommendation {
                recommendation_id: 5,
                company_id: 1,
                rating: Some("Accumulate on dips".to_string()),
                target_price_rs: Some(1980.0),
                time_horizon_months: Some(12),
                data_source: None,
            }))
            .await
            .unwrap();

        let latest = store
            .get_latest(EntityKind::Recommendations, 1)
            .await
            .unwrap();
        let PeriodRecord::Recommendations(rec) = latest else {
            panic!("expected a recommendation");
        };
        assert_eq!(rec.rating.as_deref(), Some("Accumulate on dips"));
    }

    // -------------------------------------------------------------------------
    // Bulk load
    // -------------------------------------------------------------------------

    fn bundle_json(company_id: i64, promoter_pct: f64, stored_margin: f64) -> String {
        format!(
            r#"{{
                "company_info": {{
                    "company_id": {company_id},
                    "company_name": "Sun Pharmaceutical Industries Limited",
                    "bse_code": null, "nse_code": null, "bloomberg_code": null,
                    "sector": null, "market_cap_cr": 351905,
                    "enterprise_value_cr": null, "outstanding_shares_cr": null,
                    "beta": null, "face_value_rs": null,
                    "year_high_price_rs": null, "year_low_price_rs": null,
                    "data_source": null
                }},
                "shareholding": {{
                    "company_id": {company_id}, "quarter": "Q4FY24",
                    "promoter_holding_pct": {promoter_pct},
                    "fii_holding_pct": null, "mf_insti_holding_pct": null,
                    "public_holding_pct": null, "others_holding_pct": null,
                    "data_source": null
                }},
                "financial_results": {{
                    "financial_id": 1, "company_id": {company_id},
                    "fiscal_period": "Q2FY25", "revenue_cr": 11813,
                    "yoy_growth_revenue_pct": null, "ebitda_cr": null,
                    "ebitda_margin_pct": null, "net_profit_cr": 2756,
                    "net_profit_margin_pct": {stored_margin}, "eps_rs": null,
                    "data_source": null
                }}
            }}"#
        )
    }

    #[tokio::test]
    async fn test_load_bundle_strict_clean() {
        let store = fresh_store().await;
        let bundle = CompanyBundle::from_json(&bundle_json(1, 54.48, 23.33)).unwrap();

        let report = store.load_bundle(&bundle, LoadMode::Strict).await.unwrap();
        assert!(report.is_clean());
        assert_eq!(report.loaded, 3);
        assert!(report.mismatches.is_empty());

        assert_eq!(store.get_company(1).await.unwrap().company_id, 1);
    }

    #[tokio::test]
    async fn test_load_bundle_strict_aborts_on_bad_record() {
        let store = fresh_store().await;
        // 154% promoter holding fails validation.
        let bundle = CompanyBundle::from_json(&bundle_json(1, 154.0, 23.33)).unwrap();

        let err = store.load_bundle(&bundle, LoadMode::Strict).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_load_bundle_best_effort_collects_errors() {
        let store = fresh_store().await;
        let bundle = CompanyBundle::from_json(&bundle_json(1, 154.0, 23.33)).unwrap();

        let report = store
            .load_bundle(&bundle, LoadMode::BestEffort)
            .await
            .unwrap();

        // Company and financial result load; the bad shareholding is
        // skipped and reported.
        assert_eq!(report.loaded, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].table, "shareholding_pattern");

        let rows = store
            .list_by_company(EntityKind::FinancialResults, 1)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_load_bundle_reports_derivation_mismatch() {
        let store = fresh_store().await;
        // Stored margin 25.0 disagrees with 2756/11813*100 = 23.33.
        let bundle = CompanyBundle::from_json(&bundle_json(1, 54.48, 25.0)).unwrap();

        let report = store.load_bundle(&bundle, LoadMode::Strict).await.unwrap();

        // Advisory only: everything still loads.
        assert_eq!(report.loaded, 3);
        assert!(report.is_clean());
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].field, "net_profit_margin_pct");
    }
}
