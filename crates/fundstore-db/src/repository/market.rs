//! # Market Data Repositories
//!
//! Database operations for the two composite-keyed tables:
//! `shareholding_pattern` (keyed by `(company_id, quarter)`) and
//! `price_performance` (keyed by `(company_id, period)`).
//!
//! Inserts are plain INSERTs: the composite primary keys make a repeat
//! load of the same quarter a duplicate-key error, which the caller sees
//! as [`crate::error::DbError::Duplicate`]. Snapshots are immutable; a
//! new quarter is a new row.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fundstore_core::{PricePerformance, ShareholdingPattern};

// =============================================================================
// Shareholding Pattern
// =============================================================================

/// Repository for shareholding-pattern rows.
#[derive(Debug, Clone)]
pub struct ShareholdingRepository {
    pool: SqlitePool,
}

impl ShareholdingRepository {
    /// Creates a new ShareholdingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShareholdingRepository { pool }
    }

    /// Inserts one quarter's ownership split.
    pub async fn insert(&self, row: &ShareholdingPattern) -> DbResult<()> {
        debug!(
            company_id = row.company_id,
            quarter = %row.quarter,
            "Inserting shareholding pattern"
        );

        sqlx::query(
            r#"
            INSERT INTO shareholding_pattern (
                company_id, quarter, promoter_holding_pct, fii_holding_pct,
                mf_insti_holding_pct, public_holding_pct, others_holding_pct,
                data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(row.company_id)
        .bind(&row.quarter)
        .bind(row.promoter_holding_pct)
        .bind(row.fii_holding_pct)
        .bind(row.mf_insti_holding_pct)
        .bind(row.public_holding_pct)
        .bind(row.others_holding_pct)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<ShareholdingPattern>> {
        let rows = sqlx::query_as::<_, ShareholdingPattern>(
            r#"
            SELECT
                company_id, quarter, promoter_holding_pct, fii_holding_pct,
                mf_insti_holding_pct, public_holding_pct, others_holding_pct,
                data_source
            FROM shareholding_pattern
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
// Price Performance
// =============================================================================

/// Repository for price-performance rows.
#[derive(Debug, Clone)]
pub struct PricePerformanceRepository {
    pool: SqlitePool,
}

impl PricePerformanceRepository {
    /// Creates a new PricePerformanceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PricePerformanceRepository { pool }
    }

    /// Inserts one period's return figures.
    pub async fn insert(&self, row: &PricePerformance) -> DbResult<()> {
        debug!(
            company_id = row.company_id,
            period = %row.period,
            "Inserting price performance"
        );

        sqlx::query(
            r#"
            INSERT INTO price_performance (
                company_id, period,
                absolute_return_3m_pct, absolute_return_6m_pct, absolute_return_1y_pct,
                sensex_return_3m_pct, sensex_return_6m_pct, sensex_return_1y_pct,
                relative_return_3m_pct, relative_return_6m_pct, relative_return_1y_pct,
                data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(row.company_id)
        .bind(&row.period)
        .bind(row.absolute_return_3m_pct)
        .bind(row.absolute_return_6m_pct)
        .bind(row.absolute_return_1y_pct)
        .bind(row.sensex_return_3m_pct)
        .bind(row.sensex_return_6m_pct)
        .bind(row.sensex_return_1y_pct)
        .bind(row.relative_return_3m_pct)
        .bind(row.relative_return_6m_pct)
        .bind(row.relative_return_1y_pct)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<PricePerformance>> {
        let rows = sqlx::query_as::<_, PricePerformance>(
            r#"
            SELECT
                company_id, period,
                absolute_return_3m_pct, absolute_return_6m_pct, absolute_return_1y_pct,
                sensex_return_3m_pct, sensex_return_6m_pct, sensex_return_1y_pct,
                relative_return_3m_pct, relative_return_6m_pct, relative_return_1y_pct,
                data_source
            FROM price_performance
            WHERE company_id = ?1
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
