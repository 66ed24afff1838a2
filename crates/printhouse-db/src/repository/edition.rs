//! # Edition Repository
//!
//! The catalog of editions a print house can print.
//!
//! Editions are kept in insertion order and addressed by position in that
//! order, so removing one shifts the positions of the later ones down.

use chrono::{DateTime, Utc};
use printhouse_core::Edition;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// An edition as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEdition {
    pub id: String,
    /// Zero-based position within the house's catalog.
    pub position: usize,
    pub edition: Edition,
    pub created_at: DateTime<Utc>,
}

/// Repository for edition database operations.
#[derive(Debug, Clone)]
pub struct EditionRepository {
    pool: SqlitePool,
}

impl EditionRepository {
    /// Creates a new EditionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EditionRepository { pool }
    }

    /// Appends an edition to a house's catalog.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - The print house doesn't exist
    pub async fn add(&self, house_id: &str, edition: &Edition) -> DbResult<StoredEdition> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let payload = serde_json::to_string(edition)?;

        debug!(house_id = %house_id, title = %edition.title(), "Adding edition");

        sqlx::query(
            r#"
            INSERT INTO editions (id, print_house_id, payload, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&id)
        .bind(house_id)
        .bind(&payload)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => DbError::not_found("Print house", house_id),
            other => other,
        })?;

        let position: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) - 1 FROM editions WHERE print_house_id = ?1",
        )
        .bind(house_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(StoredEdition {
            id,
            position: usize::try_from(position).unwrap_or(0),
            edition: edition.clone(),
            created_at: now,
        })
    }

    /// Lists a house's editions in catalog order.
    pub async fn list(&self, house_id: &str) -> DbResult<Vec<StoredEdition>> {
        let rows = sqlx::query(
            r#"
            SELECT id, payload, created_at
            FROM editions
            WHERE print_house_id = ?1
            ORDER BY seq
            "#,
        )
        .bind(house_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .enumerate()
            .map(|(position, row)| decode(position, row))
            .collect()
    }

    /// Gets the edition at `position`, if any.
    pub async fn get(&self, house_id: &str, position: usize) -> DbResult<Option<StoredEdition>> {
        let row = sqlx::query(
            r#"
            SELECT id, payload, created_at
            FROM editions
            WHERE print_house_id = ?1
            ORDER BY seq
            LIMIT 1 OFFSET ?2
            "#,
        )
        .bind(house_id)
        .bind(offset(position)?)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|r| decode(position, r)).transpose()
    }

    /// Replaces the edition at `position`, keeping its id and place.
    ///
    /// Returns false when the position is past the end of the catalog.
    pub async fn update(&self, house_id: &str, position: usize, edition: &Edition) -> DbResult<bool> {
        let payload = serde_json::to_string(edition)?;

        debug!(house_id = %house_id, position, title = %edition.title(), "Updating edition");

        let result = sqlx::query(
            r#"
            UPDATE editions
            SET payload = ?3
            WHERE seq = (
                SELECT seq FROM editions
                WHERE print_house_id = ?1
                ORDER BY seq
                LIMIT 1 OFFSET ?2
            )
            "#,
        )
        .bind(house_id)
        .bind(offset(position)?)
        .bind(&payload)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes the edition at `position`.
    ///
    /// Returns false when the position is past the end of the catalog.
    pub async fn remove(&self, house_id: &str, position: usize) -> DbResult<bool> {
        debug!(house_id = %house_id, position, "Removing edition");

        let result = sqlx::query(
            r#"
            DELETE FROM editions
            WHERE seq = (
                SELECT seq FROM editions
                WHERE print_house_id = ?1
                ORDER BY seq
                LIMIT 1 OFFSET ?2
            )
            "#,
        )
        .bind(house_id)
        .bind(offset(position)?)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces a house's whole catalog, in one transaction.
    pub async fn replace_all(&self, house_id: &str, editions: &[Edition]) -> DbResult<()> {
        let payloads = editions
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query("DELETE FROM editions WHERE print_house_id = ?1")
            .bind(house_id)
            .execute(&mut *tx)
            .await?;

        for payload in &payloads {
            sqlx::query(
                r#"
                INSERT INTO editions (id, print_house_id, payload, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(house_id)
            .bind(payload)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ForeignKeyViolation { .. } => DbError::not_found("Print house", house_id),
                other => other,
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(house_id = %house_id, count = editions.len(), "Replaced edition catalog");
        Ok(())
    }
}

fn decode(position: usize, row: &SqliteRow) -> DbResult<StoredEdition> {
    let payload: String = row.try_get("payload")?;
    Ok(StoredEdition {
        id: row.try_get("id")?,
        position,
        edition: serde_json::from_str(&payload)?,
        created_at: row.try_get("created_at")?,
    })
}

fn offset(position: usize) -> DbResult<i64> {
    i64::try_from(position)
        .map_err(|_| DbError::QueryFailed(format!("position {position} is too large")))
}

// =============================================================================
// Unit Tests
// =============================================================================
