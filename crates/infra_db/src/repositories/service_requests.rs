//! Service request repository

use async_trait::async_trait;
use sqlx::PgPool;

use domain_payment::{PaymentError, ServiceRequestStore};

use crate::error::DatabaseError;

/// Repository for service requests
#[derive(Debug, Clone)]
pub struct ServiceRequestRepository {
    pool: PgPool,
}

impl ServiceRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Marks the service request holding this gateway order as paid
    ///
    /// Returns whether a request matched. Idempotent: a request already
    /// marked paid keeps its original `paid_at`.
    pub async fn mark_paid(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE service_requests
            SET status = 'paid',
                gateway_payment_id = $2,
                paid_at = COALESCE(paid_at, now())
            WHERE gateway_order_id = $1
            "#,
        )
        .bind(gateway_order_id)
        .bind(gateway_payment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ServiceRequestStore for ServiceRequestRepository {
    async fn mark_paid_by_order(
        &self,
        order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<bool, PaymentError> {
        self.mark_paid(order_id, gateway_payment_id)
            .await
            .map_err(|e| PaymentError::Storage(e.to_string()))
    }
}
