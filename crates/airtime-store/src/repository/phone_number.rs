//! Database operations for the phone number registry.
//!
//! The registry is the anti-abuse mechanism: one row per number, guarded by
//! a unique constraint. [`PhoneNumberRepository::save`] is deliberately
//! insert-or-ignore; the unique index, not the advisory pre-check in the
//! request handler, is what actually prevents double-serving a number.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use airtime_core::PhoneNumberRecord;

use crate::error::StoreResult;

/// Repository for phone number registry operations.
#[derive(Debug, Clone)]
pub struct PhoneNumberRepository {
    pool: SqlitePool,
}

impl PhoneNumberRepository {
    /// Creates a new repository over the given pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        PhoneNumberRepository { pool }
    }

    /// Saves a phone number, ignoring the insert when the number is already
    /// registered.
    ///
    /// Returns the newly created record, or `None` when the unique
    /// constraint already held. Never errors on a duplicate.
    pub async fn save(&self, phone_number: &str) -> StoreResult<Option<PhoneNumberRecord>> {
        debug!(phone_number = %phone_number, "registering phone number");

        let now = Utc::now();
        let record = sqlx::query_as::<_, PhoneNumberRecord>(
            r"
            INSERT INTO phone_numbers (phone_number, created_at)
            VALUES (?1, ?2)
            ON CONFLICT(phone_number) DO NOTHING
            RETURNING id, phone_number, created_at
            ",
        )
        .bind(phone_number)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Looks up a phone number by exact match.
    pub async fn find_by_number(
        &self,
        phone_number: &str,
    ) -> StoreResult<Option<PhoneNumberRecord>> {
        let record = sqlx::query_as::<_, PhoneNumberRecord>(
            r"
            SELECT id, phone_number, created_at
            FROM phone_numbers
            WHERE phone_number = ?1
            ",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Returns all registered numbers, most recently created first.
    pub async fn get_all(&self) -> StoreResult<Vec<PhoneNumberRecord>> {
        let records = sqlx::query_as::<_, PhoneNumberRecord>(
            r"
            SELECT id, phone_number, created_at
            FROM phone_numbers
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn save_returns_new_record() {
        let db = test_db().await;
        let record = db.phone_numbers().save("0245667942").await.unwrap();

        let record = record.expect("fresh number should insert");
        assert_eq!(record.phone_number, "0245667942");
        assert!(record.id > 0);
    }

    #[tokio::test]
    async fn save_is_insert_or_ignore() {
        let db = test_db().await;
        let repo = db.phone_numbers();

        assert!(repo.save("0245667942").await.unwrap().is_some());
        assert!(repo.save("0245667942").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_number_exact_match() {
        let db = test_db().await;
        let repo = db.phone_numbers();
        repo.save("0245667942").await.unwrap();

        let found = repo.find_by_number("0245667942").await.unwrap();
        assert!(found.is_some());

        let missing = repo.find_by_number("0245667943").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn get_all_orders_newest_first() {
        let db = test_db().await;
        let repo = db.phone_numbers();
        repo.save("0245667941").await.unwrap();
        repo.save("0245667942").await.unwrap();
        repo.save("0245667943").await.unwrap();

        let all = repo.get_all().await.unwrap();
        let numbers: Vec<_> = all.iter().map(|r| r.phone_number.as_str()).collect();
        assert_eq!(numbers, vec!["0245667943", "0245667942", "0245667941"]);
    }
}
