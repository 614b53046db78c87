//! # Company Repository
//!
//! Database operations for `company_info`, the sole parent table.
//!
//! Companies are upserted (insert-or-replace by `company_id`): reloading
//! a newer source document for the same company refreshes its reference
//! data. Dependent rows are untouched by an upsert.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fundstore_core::Company;

/// Repository for company database operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CompanyRepository { pool }
    }

    /// Inserts or replaces a company by `company_id`.
    pub async fn upsert(&self, company: &Company) -> DbResult<()> {
        debug!(company_id = company.company_id, name = %company.company_name, "Upserting company");

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO company_info (
                company_id, company_name, bse_code, nse_code, bloomberg_code,
                sector, market_cap_cr, enterprise_value_cr, outstanding_shares_cr,
                beta, face_value_rs, year_high_price_rs, year_low_price_rs,
                data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(company.company_id)
        .bind(&company.company_name)
        .bind(&company.bse_code)
        .bind(&company.nse_code)
        .bind(&company.bloomberg_code)
        .bind(&company.sector)
        .bind(company.market_cap_cr)
        .bind(company.enterprise_value_cr)
        .bind(company.outstanding_shares_cr)
        .bind(company.beta)
        .bind(company.face_value_rs)
        .bind(company.year_high_price_rs)
        .bind(company.year_low_price_rs)
        .bind(&company.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a company by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Company))` - company found
    /// * `Ok(None)` - no such company
    pub async fn get(&self, company_id: i64) -> DbResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT
                company_id, company_name, bse_code, nse_code, bloomberg_code,
                sector, market_cap_cr, enterprise_value_cr, outstanding_shares_cr,
                beta, face_value_rs, year_high_price_rs, year_low_price_rs,
                data_source
            FROM company_info
            WHERE company_id = ?1
            "#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// Gets a company by id, failing with NotFound on a miss.
    pub async fn get_required(&self, company_id: i64) -> DbResult<Company> {
        self.get(company_id)
            .await?
            .ok_or_else(|| DbError::not_found("Company", company_id))
    }

    /// Checks whether a company exists (referential pre-check for
    /// dependent inserts).
    pub async fn exists(&self, company_id: i64) -> DbResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM company_info WHERE company_id = ?1")
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Lists all companies, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT
                company_id, company_name, bse_code, nse_code, bloomberg_code,
                sector, market_cap_cr, enterprise_value_cr, outstanding_shares_cr,
                beta, face_value_rs, year_high_price_rs, year_low_price_rs,
                data_source
            FROM company_info
            ORDER BY company_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Counts companies (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM company_info")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
