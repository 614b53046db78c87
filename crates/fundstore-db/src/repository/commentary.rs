//! # Commentary Repositories
//!
//! Database operations for `management_discussion` (free-text commentary
//! per topic and period) and `recommendations` (analyst rating and
//! target price).
//!
//! Recommendations carry no fiscal period, so their listings order by
//! `recommendation_id` directly in SQL; the other dependent kinds are
//! ordered by parsed period in the store.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fundstore_core::{ManagementDiscussion, Recommendation};

// =============================================================================
// Management Discussion
// =============================================================================

/// Repository for management-commentary rows.
#[derive(Debug, Clone)]
pub struct DiscussionRepository {
    pool: SqlitePool,
}

impl DiscussionRepository {
    /// Creates a new DiscussionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscussionRepository { pool }
    }

    /// Inserts one commentary row.
    pub async fn insert(&self, row: &ManagementDiscussion) -> DbResult<()> {
        debug!(
            discussion_id = row.discussion_id,
            company_id = row.company_id,
            fiscal_period = %row.fiscal_period,
            "Inserting management discussion"
        );

        sqlx::query(
            r#"
            INSERT INTO management_discussion (
                discussion_id, company_id, fiscal_period, topic,
                discussion_text, data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(row.discussion_id)
        .bind(row.company_id)
        .bind(&row.fiscal_period)
        .bind(&row.topic)
        .bind(&row.discussion_text)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company. Unordered; the store applies the
    /// fiscal-period order.
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<ManagementDiscussion>> {
        let rows = sqlx::query_as::<_, ManagementDiscussion>(
            r#"
            SELECT
                discussion_id, company_id, fiscal_period, topic,
                discussion_text, data_source
            FROM management_discussion
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
// Recommendations
// =============================================================================

/// Repository for analyst-recommendation rows.
#[derive(Debug, Clone)]
pub struct RecommendationRepository {
    pool: SqlitePool,
}

impl RecommendationRepository {
    /// Creates a new RecommendationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecommendationRepository { pool }
    }

    /// Inserts one recommendation.
    ///
    /// The rating is stored verbatim; the source imposes no rating
    /// vocabulary.
    pub async fn insert(&self, row: &Recommendation) -> DbResult<()> {
        debug!(
            recommendation_id = row.recommendation_id,
            company_id = row.company_id,
            "Inserting recommendation"
        );

        sqlx::query(
            r#"
            INSERT INTO recommendations (
                recommendation_id, company_id, rating, target_price_rs,
                time_horizon_months, data_source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(row.recommendation_id)
        .bind(row.company_id)
        .bind(&row.rating)
        .bind(row.target_price_rs)
        .bind(row.time_horizon_months)
        .bind(&row.data_source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows for a company, ordered by surrogate id (no period
    /// column to order by).
    pub async fn list_for_company(&self, company_id: i64) -> DbResult<Vec<Recommendation>> {
        let rows = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT
                recommendation_id, company_id, rating, target_price_rs,
                time_horizon_months, data_source
            FROM recommendations
            WHERE company_id = ?1
            ORDER BY recommendation_id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
