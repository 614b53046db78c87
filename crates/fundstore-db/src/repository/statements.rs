//! # Financial Statement Repositories
//!
//! Database operations for the four surrogate-keyed, per-period
//! statement tables: `financial_results`, `balance_sheet`, `cash_flow`
//! and `key_ratios`.
//!
//! All four share the same shape: producer-assigned surrogate primary
//! key, `company_id` foreign key, a free-form `fiscal_period`, and a set
//! of nullable REAL measures. Inserting a surrogate id twice is a
//! duplicate-key error; rows are immutable snapshots.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fundstore_core::{BalanceSheet, CashFlow, FinancialResult, KeyRatios};

// =============================================================================
// Financial Results
// =============================================================================

/// Repository for income-statement rows.
#[derive(Debug, Clone)]
pub struct FinancialResultRepository {
    pool: SqlitePool,
}

impl FinancialResultRepository {
    /// Creates a new FinancialResultRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FinancialResultRepository { pool }
    }

    /// Inserts one period's income-statement metrics.
    pub async fn insert(&self, row: &FinancialResult) -> DbResult<()> {
        debug!(
            financial_id = row.financial_id,
            company_id = row.company_id,
            fiscal_period = %row.fiscal_period,
            "Inserting financial result"
        );

        sqlx::query(
            r#"
            INSERT INTO financial_results (
                financial_id, company_id, fiscal_period, revenue_cr,
                yoy_growth_revenue_pct, ebitda_cr, ebitda_margin_pct,
                net_profit_cr, net_profit_margin_pct, eps_rs, data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(row.financial_id)
        .bind(row.company_id)
        .bind(&row.fiscal_period)
        .bind(row.revenue_cr)
        .bind(row.yoy_growth_revenue_pct)
        .bind(row.ebitda_cr)
        .bind(row.ebitda_margin_pct)
        .bind(row.net_profit_cr)
        .bind(row.net_profit_margin_pct)
        .bind(row.eps_rs)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<FinancialResult>> {
        let rows = sqlx::query_as::<_, FinancialResult>(
            r#"
            SELECT
                financial_id, company_id, fiscal_period, revenue_cr,
                yoy_growth_revenue_pct, ebitda_cr, ebitda_margin_pct,
                net_profit_cr, net_profit_margin_pct, eps_rs, data_source
            FROM financial_results
            WHERE company_id = ?1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Balance Sheet
// =============================================================================

/// Repository for balance-sheet rows.
#[derive(Debug, Clone)]
pub struct BalanceSheetRepository {
    pool: SqlitePool,
}

impl BalanceSheetRepository {
    /// Creates a new BalanceSheetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BalanceSheetRepository { pool }
    }

    /// Inserts one period's balance-sheet snapshot.
    pub async fn insert(&self, row: &BalanceSheet) -> DbResult<()> {
        debug!(
            balance_sheet_id = row.balance_sheet_id,
            company_id = row.company_id,
            fiscal_period = %row.fiscal_period,
            "Inserting balance sheet"
        );

        sqlx::query(
            r#"
            INSERT INTO balance_sheet (
                balance_sheet_id, company_id, fiscal_period, total_assets_cr,
                total_liabilities_cr, current_assets_cr, cash_cr, inventories_cr,
                accounts_receivable_cr, accounts_payable_cr, long_term_debt_cr,
                shareholder_equity_cr, data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(row.balance_sheet_id)
        .bind(row.company_id)
        .bind(&row.fiscal_period)
        .bind(row.total_assets_cr)
        .bind(row.total_liabilities_cr)
        .bind(row.current_assets_cr)
        .bind(row.cash_cr)
        .bind(row.inventories_cr)
        .bind(row.accounts_receivable_cr)
        .bind(row.accounts_payable_cr)
        .bind(row.long_term_debt_cr)
        .bind(row.shareholder_equity_cr)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<BalanceSheet>> {
        let rows = sqlx::query_as::<_, BalanceSheet>(
            r#"
            SELECT
                balance_sheet_id, company_id, fiscal_period, total_assets_cr,
                total_liabilities_cr, current_assets_cr, cash_cr, inventories_cr,
                accounts_receivable_cr, accounts_payable_cr, long_term_debt_cr,
                shareholder_equity_cr, data_source
            FROM balance_sheet
            WHERE company_id = ?1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Cash Flow
// =============================================================================

/// Repository for cash-flow rows.
#[derive(Debug, Clone)]
pub struct CashFlowRepository {
    pool: SqlitePool,
}

impl CashFlowRepository {
    /// Creates a new CashFlowRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashFlowRepository { pool }
    }

    /// Inserts one period's cash-flow summary.
    pub async fn insert(&self, row: &CashFlow) -> DbResult<()> {
        debug!(
            cash_flow_id = row.cash_flow_id,
            company_id = row.company_id,
            fiscal_period = %row.fiscal_period,
            "Inserting cash flow"
        );

        sqlx::query(
            r#"
            INSERT INTO cash_flow (
                cash_flow_id, company_id, fiscal_period,
                net_cash_from_operations_cr, net_cash_from_investing_cr,
                net_cash_from_financing_cr, capex_cr, free_cash_flow_cr,
                data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(row.cash_flow_id)
        .bind(row.company_id)
        .bind(&row.fiscal_period)
        .bind(row.net_cash_from_operations_cr)
        .bind(row.net_cash_from_investing_cr)
        .bind(row.net_cash_from_financing_cr)
        .bind(row.capex_cr)
        .bind(row.free_cash_flow_cr)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<CashFlow>> {
        let rows = sqlx::query_as::<_, CashFlow>(
            r#"
            SELECT
                cash_flow_id, company_id, fiscal_period,
                net_cash_from_operations_cr, net_cash_from_investing_cr,
                net_cash_from_financing_cr, capex_cr, free_cash_flow_cr,
                data_source
            FROM cash_flow
            WHERE company_id = ?1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Key Ratios
// =============================================================================

/// Repository for valuation-ratio rows.
#[derive(Debug, Clone)]
pub struct KeyRatiosRepository {
    pool: SqlitePool,
}

impl KeyRatiosRepository {
    /// Creates a new KeyRatiosRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyRatiosRepository { pool }
    }

    /// Inserts one period's valuation ratios.
    pub async fn insert(&self, row: &KeyRatios) -> DbResult<()> {
        debug!(
            ratio_id = row.ratio_id,
            company_id = row.company_id,
            fiscal_period = %row.fiscal_period,
            "Inserting key ratios"
        );

        sqlx::query(
            r#"
            INSERT INTO key_ratios (
                ratio_id, company_id, fiscal_period, pe_x, pb_x, ev_ebitda_x,
                roe_pct, roce_pct, dividend_yield_pct, data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(row.ratio_id)
        .bind(row.company_id)
        .bind(&row.fiscal_period)
        .bind(row.pe_x)
        .bind(row.pb_x)
        .bind(row.ev_ebitda_x)
        .bind(row.roe_pct)
        .bind(row.roce_pct)
        .bind(row.dividend_yield_pct)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<KeyRatios>> {
        let rows = sqlx::query_as::<_, KeyRatios>(
            r#"
            SELECT
                ratio_id, company_id, fiscal_period, pe_x, pb_x, ev_ebitda_x,
                roe_pct, roce_pct, dividend_yield_pct, data_source
            FROM key_ratios
            WHERE company_id = ?1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
