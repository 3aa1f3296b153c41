//! Refund repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{PaymentRecordId, RefundId};
use domain_payment::PaymentRecord;
use domain_refund::{RefundError, RefundRecord, RefundStatus, RefundStore};

use crate::error::DatabaseError;
use crate::repositories::payments::PaymentRepository;

/// Repository for refund records
#[derive(Debug, Clone)]
pub struct RefundRepository {
    pool: PgPool,
    payments: PaymentRepository,
}

#[derive(sqlx::FromRow)]
struct RefundRow {
    refund_id: Uuid,
    payment_id: Uuid,
    refund_amount: i64,
    reason: String,
    status: String,
    processed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

fn parse_status(status: &str) -> Result<RefundStatus, DatabaseError> {
    match status {
        "pending" => Ok(RefundStatus::Pending),
        "processed" => Ok(RefundStatus::Processed),
        "failed" => Ok(RefundStatus::Failed),
        other => Err(DatabaseError::RowMapping(format!(
            "unknown refund status: {other}"
        ))),
    }
}

fn status_str(status: RefundStatus) -> &'static str {
    match status {
        RefundStatus::Pending => "pending",
        RefundStatus::Processed => "processed",
        RefundStatus::Failed => "failed",
    }
}

impl TryFrom<RefundRow> for RefundRecord {
    type Error = DatabaseError;

    fn try_from(row: RefundRow) -> Result<Self, Self::Error> {
        Ok(RefundRecord {
            id: RefundId::from(row.refund_id),
            payment_id: PaymentRecordId::from(row.payment_id),
            refund_amount: row.refund_amount,
            reason: row.reason,
            status: parse_status(&row.status)?,
            processed_at: row.processed_at,
            created_at: row.created_at,
        })
    }
}

impl RefundRepository {
    pub fn new(pool: PgPool) -> Self {
        let payments = PaymentRepository::new(pool.clone());
        Self { pool, payments }
    }

    /// Inserts a refund record
    pub async fn insert(&self, refund: &RefundRecord) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO refund_records (
                refund_id, payment_id, refund_amount, reason, status,
                processed_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(refund.id.as_uuid())
        .bind(refund.payment_id.as_uuid())
        .bind(refund.refund_amount)
        .bind(&refund.reason)
        .bind(status_str(refund.status))
        .bind(refund.processed_at)
        .bind(refund.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::classify)?;

        Ok(())
    }

    /// Fetches a payment's refund history, oldest first
    pub async fn history(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Vec<RefundRecord>, DatabaseError> {
        let rows: Vec<RefundRow> = sqlx::query_as(
            r#"
            SELECT refund_id, payment_id, refund_amount, reason, status,
                   processed_at, created_at
            FROM refund_records
            WHERE payment_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(payment_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RefundRecord::try_from).collect()
    }

    /// Updates a refund's status once the gateway settles or rejects it
    pub async fn set_status(
        &self,
        refund_id: RefundId,
        status: RefundStatus,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE refund_records
            SET status = $2, processed_at = now()
            WHERE refund_id = $1 AND status = 'pending'
            "#,
        )
        .bind(refund_id.as_uuid())
        .bind(status_str(status))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RefundStore for RefundRepository {
    async fn payment(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Option<PaymentRecord>, RefundError> {
        self.payments
            .find(payment_id)
            .await
            .map_err(|e| RefundError::Storage(e.to_string()))
    }

    async fn refunds_for(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Vec<RefundRecord>, RefundError> {
        self.history(payment_id)
            .await
            .map_err(|e| RefundError::Storage(e.to_string()))
    }

    async fn insert(&self, refund: &RefundRecord) -> Result<(), RefundError> {
        RefundRepository::insert(self, refund)
            .await
            .map_err(|e| RefundError::Storage(e.to_string()))
    }
}
