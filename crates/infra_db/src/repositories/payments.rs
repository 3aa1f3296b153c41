//! Payment record repository
//!
//! The per-recipient record set for one confirmed payment is written inside
//! a single transaction: either every recipient gets its record or none do.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::PaymentRecordId;
use core_kernel::ServiceRequestId;
use domain_payment::{GatewayReference, PaymentError, PaymentRecord, PaymentStore};

use crate::error::DatabaseError;

/// Repository for payment records
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PaymentRecordRow {
    payment_id: Uuid,
    recipient_id: Uuid,
    payer_id: Uuid,
    service_type: String,
    pricing_category: Option<String>,
    base_amount: i64,
    gst_amount: i64,
    amount: i64,
    currency: String,
    gateway_payment_id: String,
    gateway_order_id: Option<String>,
    gateway_signature: Option<String>,
    service_request_id: Uuid,
    is_demo_payment: bool,
    partner_referral_code: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRecordRow> for PaymentRecord {
    type Error = DatabaseError;

    fn try_from(row: PaymentRecordRow) -> Result<Self, Self::Error> {
        let pricing_category = row
            .pricing_category
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| DatabaseError::RowMapping(format!("pricing_category: {e}")))?;
        let currency = row
            .currency
            .parse()
            .map_err(|e| DatabaseError::RowMapping(format!("currency: {e}")))?;
        let gateway = match (row.gateway_order_id, row.gateway_signature) {
            (Some(order_id), Some(signature)) => Some(GatewayReference {
                order_id,
                signature,
            }),
            (None, None) => None,
            _ => {
                return Err(DatabaseError::RowMapping(format!(
                    "payment {} has a partial gateway reference",
                    row.payment_id
                )))
            }
        };

        Ok(PaymentRecord {
            id: PaymentRecordId::from(row.payment_id),
            recipient_id: row.recipient_id.into(),
            payer_id: row.payer_id.into(),
            service_type: row.service_type,
            pricing_category,
            base_amount: row.base_amount,
            gst_amount: row.gst_amount,
            amount: row.amount,
            currency,
            gateway_payment_id: row.gateway_payment_id,
            gateway,
            service_request_id: row.service_request_id.into(),
            is_demo_payment: row.is_demo_payment,
            partner_referral_code: row.partner_referral_code,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT payment_id, recipient_id, payer_id, service_type, \
     pricing_category, base_amount, gst_amount, amount, currency, \
     gateway_payment_id, gateway_order_id, gateway_signature, \
     service_request_id, is_demo_payment, partner_referral_code, created_at \
     FROM payment_records";

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the whole record set in one transaction
    pub async fn insert_all(&self, records: &[PaymentRecord]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            let (order_id, signature) = match &record.gateway {
                Some(gateway) => (Some(&gateway.order_id), Some(&gateway.signature)),
                None => (None, None),
            };
            sqlx::query(
                r#"
                INSERT INTO payment_records (
                    payment_id, recipient_id, payer_id, service_type,
                    pricing_category, base_amount, gst_amount, amount, currency,
                    gateway_payment_id, gateway_order_id, gateway_signature,
                    service_request_id, is_demo_payment, partner_referral_code,
                    created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                          $13, $14, $15, $16)
                "#,
            )
            .bind(record.id.as_uuid())
            .bind(record.recipient_id.as_uuid())
            .bind(record.payer_id.as_uuid())
            .bind(&record.service_type)
            .bind(record.pricing_category.map(|k| k.as_str()))
            .bind(record.base_amount)
            .bind(record.gst_amount)
            .bind(record.amount)
            .bind(record.currency.code())
            .bind(&record.gateway_payment_id)
            .bind(order_id)
            .bind(signature)
            .bind(record.service_request_id.as_uuid())
            .bind(record.is_demo_payment)
            .bind(&record.partner_referral_code)
            .bind(record.created_at)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::classify)?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetches one payment record
    pub async fn find(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Option<PaymentRecord>, DatabaseError> {
        let row: Option<PaymentRecordRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE payment_id = $1"))
                .bind(payment_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        row.map(PaymentRecord::try_from).transpose()
    }

    /// Fetches all records for a service request, in creation order
    pub async fn find_by_service_request(
        &self,
        service_request_id: ServiceRequestId,
    ) -> Result<Vec<PaymentRecord>, DatabaseError> {
        let rows: Vec<PaymentRecordRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE service_request_id = $1 ORDER BY created_at, payment_id"
        ))
        .bind(service_request_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRecord::try_from).collect()
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn insert_records(&self, records: &[PaymentRecord]) -> Result<(), PaymentError> {
        self.insert_all(records)
            .await
            .map_err(|e| PaymentError::Storage(e.to_string()))
    }
}
