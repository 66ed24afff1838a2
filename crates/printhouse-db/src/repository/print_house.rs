//! # Print House Repository
//!
//! Database operations for print houses.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  print_houses                                                           │
//! │  ┌──────────┬───────────┬───────────────────────────┬────────────────┐ │
//! │  │ id       │ name      │ payload                   │ timestamps     │ │
//! │  ├──────────┼───────────┼───────────────────────────┼────────────────┤ │
//! │  │ uuid v4  │ unique    │ serde_json(PrintHouse)    │ created/updated│ │
//! │  └──────────┴───────────┴───────────────────────────┴────────────────┘ │
//! │                                                                         │
//! │  The payload is opaque to SQL. Decoding it re-validates every press    │
//! │  and setting, so a tampered row surfaces as DbError::Serialization.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use printhouse_core::PrintHouse;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// A print house as stored: identity, name and timestamps around the domain
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPrintHouse {
    pub id: String,
    pub name: String,
    pub house: PrintHouse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredPrintHouse {
    fn from_row(row: &SqliteRow) -> DbResult<Self> {
        let payload: String = row.try_get("payload")?;
        Ok(StoredPrintHouse {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            house: serde_json::from_str(&payload)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Repository for print house database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.print_houses();
///
/// let stored = repo.insert("Main Street", &house).await?;
/// let again = repo.get_by_id(&stored.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PrintHouseRepository {
    pool: SqlitePool,
}

impl PrintHouseRepository {
    /// Creates a new PrintHouseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PrintHouseRepository { pool }
    }

    /// Inserts a new print house under a fresh id.
    ///
    /// ## Returns
    /// * `Ok(StoredPrintHouse)` - The stored row
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    pub async fn insert(&self, name: &str, house: &PrintHouse) -> DbResult<StoredPrintHouse> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let payload = serde_json::to_string(house)?;

        debug!(id = %id, name = %name, "Inserting print house");

        sqlx::query(
            r#"
            INSERT INTO print_houses (id, name, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(&payload)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, name),
            other => other,
        })?;

        Ok(StoredPrintHouse {
            id,
            name: name.to_string(),
            house: house.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a print house by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StoredPrintHouse>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, payload, created_at, updated_at
            FROM print_houses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(StoredPrintHouse::from_row).transpose()
    }

    /// Gets a print house by its name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<StoredPrintHouse>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, payload, created_at, updated_at
            FROM print_houses
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(StoredPrintHouse::from_row).transpose()
    }

    /// Lists all print houses, oldest first.
    pub async fn list(&self) -> DbResult<Vec<StoredPrintHouse>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, payload, created_at, updated_at
            FROM print_houses
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let houses = rows
            .iter()
            .map(StoredPrintHouse::from_row)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = houses.len(), "Listed print houses");
        Ok(houses)
    }

    /// Replaces the stored payload of a print house.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - No such id
    pub async fn update(&self, id: &str, house: &PrintHouse) -> DbResult<()> {
        debug!(id = %id, "Updating print house");

        let payload = serde_json::to_string(house)?;

        let result = sqlx::query(
            r#"
            UPDATE print_houses SET
                payload = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Print house", id));
        }

        Ok(())
    }

    /// Deletes a print house and, by cascade, its editions.
    ///
    /// Returns false when there was nothing to delete.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting print house");

        let result = sqlx::query("DELETE FROM print_houses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces every stored print house with `houses`, in one transaction.
    ///
    /// Existing editions are dropped with their houses.
    pub async fn replace_all(
        &self,
        houses: &[(String, PrintHouse)],
    ) -> DbResult<Vec<StoredPrintHouse>> {
        let payloads = houses
            .iter()
            .map(|(_, house)| serde_json::to_string(house))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query("DELETE FROM print_houses")
            .execute(&mut *tx)
            .await?;

        let mut stored = Vec::with_capacity(houses.len());
        for ((name, house), payload) in houses.iter().zip(payloads) {
            let id = Uuid::new_v4().to_string();
            let now = Utc::now();

            sqlx::query(
                r#"
                INSERT INTO print_houses (id, name, payload, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&id)
            .bind(name)
            .bind(&payload)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            stored.push(StoredPrintHouse {
                id,
                name: name.clone(),
                house: house.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(count = stored.len(), "Replaced all print houses");
        Ok(stored)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
