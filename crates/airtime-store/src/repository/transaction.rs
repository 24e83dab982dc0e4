//! Database operations for the airtime transaction log.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use airtime_core::{AirtimeTransaction, Amount, TransactionStatus, DEFAULT_CURRENCY};

use crate::error::StoreResult;

const TRANSACTION_COLUMNS: &str = "id, phone_number, amount_cents, currency, status, \
     network_provider, transaction_reference, created_at, processed_at";

/// Repository for airtime transaction operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new repository over the given pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts a fresh transaction in `pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::RelationConstraint`] when `phone_number`
    /// has no matching registry row; transactions are only ever created for
    /// numbers that were registered first.
    pub async fn create(
        &self,
        phone_number: &str,
        amount: Amount,
        network_provider: Option<&str>,
    ) -> StoreResult<AirtimeTransaction> {
        debug!(phone_number = %phone_number, amount = %amount, "creating transaction");

        let now = Utc::now();
        let tx = sqlx::query_as::<_, AirtimeTransaction>(&format!(
            r"
            INSERT INTO airtime_transactions
                (phone_number, amount_cents, currency, status, network_provider, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {TRANSACTION_COLUMNS}
            ",
        ))
        .bind(phone_number)
        .bind(amount.minor_units())
        .bind(DEFAULT_CURRENCY)
        .bind(TransactionStatus::Pending)
        .bind(network_provider)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(tx)
    }

    /// Updates a transaction's status.
    ///
    /// `processed_at` is stamped only when the transaction enters a terminal
    /// state. An omitted `reference` preserves the existing value rather than
    /// overwriting it with null.
    ///
    /// Returns the updated transaction, or `None` when `id` does not exist.
    pub async fn update_status(
        &self,
        id: i64,
        status: TransactionStatus,
        reference: Option<&str>,
    ) -> StoreResult<Option<AirtimeTransaction>> {
        debug!(transaction_id = id, status = %status, "updating transaction status");

        let now = Utc::now();
        let tx = sqlx::query_as::<_, AirtimeTransaction>(&format!(
            r"
            UPDATE airtime_transactions
            SET status = ?2,
                transaction_reference = COALESCE(?3, transaction_reference),
                processed_at = CASE WHEN ?4 THEN ?5 ELSE processed_at END
            WHERE id = ?1
            RETURNING {TRANSACTION_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(status)
        .bind(reference)
        .bind(status.is_terminal())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tx)
    }

    /// Returns all transactions for a phone number, most recent first.
    pub async fn get_by_phone_number(
        &self,
        phone_number: &str,
    ) -> StoreResult<Vec<AirtimeTransaction>> {
        let txs = sqlx::query_as::<_, AirtimeTransaction>(&format!(
            r"
            SELECT {TRANSACTION_COLUMNS}
            FROM airtime_transactions
            WHERE phone_number = ?1
            ORDER BY created_at DESC, id DESC
            ",
        ))
        .bind(phone_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }
}

#[cfg(test)]
mod tests {
    use airtime_core::{TransactionStatus, TOPUP_AMOUNT};

    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};

    const NUMBER: &str = "0245667942";

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.phone_numbers().save(NUMBER).await.unwrap();
        db
    }

    #[tokio::test]
    async fn create_starts_pending() {
        let db = test_db().await;
        let tx = db
            .transactions()
            .create(NUMBER, TOPUP_AMOUNT, None)
            .await
            .unwrap();

        assert_eq!(tx.phone_number, NUMBER);
        assert_eq!(tx.amount_cents, 1000);
        assert_eq!(tx.currency, "NGN");
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.network_provider.is_none());
        assert!(tx.transaction_reference.is_none());
        assert!(tx.processed_at.is_none());
    }

    #[tokio::test]
    async fn create_requires_registered_number() {
        let db = test_db().await;
        let err = db
            .transactions()
            .create("0200000000", TOPUP_AMOUNT, None)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RelationConstraint(_)));
    }

    #[tokio::test]
    async fn completing_sets_reference_and_processed_at() {
        let db = test_db().await;
        let repo = db.transactions();
        let tx = repo.create(NUMBER, TOPUP_AMOUNT, None).await.unwrap();

        let updated = repo
            .update_status(tx.id, TransactionStatus::Completed, Some("REF-123"))
            .await
            .unwrap()
            .expect("transaction exists");

        assert_eq!(updated.status, TransactionStatus::Completed);
        assert_eq!(updated.transaction_reference.as_deref(), Some("REF-123"));
        assert!(updated.processed_at.is_some());
    }

    #[tokio::test]
    async fn failing_leaves_reference_null() {
        let db = test_db().await;
        let repo = db.transactions();
        let tx = repo.create(NUMBER, TOPUP_AMOUNT, None).await.unwrap();

        let updated = repo
            .update_status(tx.id, TransactionStatus::Failed, None)
            .await
            .unwrap()
            .expect("transaction exists");

        assert_eq!(updated.status, TransactionStatus::Failed);
        assert!(updated.transaction_reference.is_none());
        assert!(updated.processed_at.is_some());
    }

    #[tokio::test]
    async fn omitted_reference_preserves_existing_value() {
        let db = test_db().await;
        let repo = db.transactions();
        let tx = repo.create(NUMBER, TOPUP_AMOUNT, None).await.unwrap();

        repo.update_status(tx.id, TransactionStatus::Completed, Some("REF-123"))
            .await
            .unwrap();
        let updated = repo
            .update_status(tx.id, TransactionStatus::Completed, None)
            .await
            .unwrap()
            .expect("transaction exists");

        assert_eq!(updated.transaction_reference.as_deref(), Some("REF-123"));
    }

    #[tokio::test]
    async fn non_terminal_update_leaves_processed_at_null() {
        let db = test_db().await;
        let repo = db.transactions();
        let tx = repo.create(NUMBER, TOPUP_AMOUNT, None).await.unwrap();

        let updated = repo
            .update_status(tx.id, TransactionStatus::Pending, Some("EARLY-REF"))
            .await
            .unwrap()
            .expect("transaction exists");

        assert_eq!(updated.status, TransactionStatus::Pending);
        assert_eq!(updated.transaction_reference.as_deref(), Some("EARLY-REF"));
        assert!(updated.processed_at.is_none());
    }

    #[tokio::test]
    async fn updating_unknown_id_returns_none() {
        let db = test_db().await;
        let updated = db
            .transactions()
            .update_status(9999, TransactionStatus::Failed, None)
            .await
            .unwrap();

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn get_by_phone_number_orders_newest_first() {
        let db = test_db().await;
        let repo = db.transactions();
        let first = repo.create(NUMBER, TOPUP_AMOUNT, None).await.unwrap();
        let second = repo.create(NUMBER, TOPUP_AMOUNT, None).await.unwrap();

        let txs = repo.get_by_phone_number(NUMBER).await.unwrap();
        let ids: Vec<_> = txs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
