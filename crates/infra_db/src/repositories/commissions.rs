//! Partner and commission repository
//!
//! The (partner, service request) uniqueness is a database constraint, not a
//! read-then-write check: concurrent duplicate creation loses the race at
//! the index, never in application code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{CommissionId, PartnerId, ServiceRequestId};
use domain_referral::{
    CommissionMode, CommissionStatus, CommissionStore, Partner, PartnerCommission,
    PartnerDirectory, ReferralError,
};

use crate::error::DatabaseError;

/// Repository for partners and their commissions
#[derive(Debug, Clone)]
pub struct CommissionRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PartnerRow {
    partner_id: Uuid,
    referral_code: String,
    commission_mode: String,
    commission_percent: Decimal,
    fixed_amount: i64,
}

#[derive(sqlx::FromRow)]
struct CommissionRow {
    commission_id: Uuid,
    partner_id: Uuid,
    referral_code: String,
    service_request_id: Uuid,
    calculated_amount: i64,
    mode_snapshot: String,
    percent_snapshot: Decimal,
    fixed_amount_snapshot: i64,
    status: String,
    created_at: DateTime<Utc>,
}

fn parse_mode(mode: &str) -> Result<CommissionMode, DatabaseError> {
    match mode {
        "percent" => Ok(CommissionMode::Percent),
        "fixed" => Ok(CommissionMode::Fixed),
        "both" => Ok(CommissionMode::Both),
        other => Err(DatabaseError::RowMapping(format!(
            "unknown commission mode: {other}"
        ))),
    }
}

fn mode_str(mode: CommissionMode) -> &'static str {
    match mode {
        CommissionMode::Percent => "percent",
        CommissionMode::Fixed => "fixed",
        CommissionMode::Both => "both",
    }
}

fn parse_status(status: &str) -> Result<CommissionStatus, DatabaseError> {
    match status {
        "pending" => Ok(CommissionStatus::Pending),
        "paid" => Ok(CommissionStatus::Paid),
        other => Err(DatabaseError::RowMapping(format!(
            "unknown commission status: {other}"
        ))),
    }
}

fn status_str(status: CommissionStatus) -> &'static str {
    match status {
        CommissionStatus::Pending => "pending",
        CommissionStatus::Paid => "paid",
    }
}

impl TryFrom<PartnerRow> for Partner {
    type Error = DatabaseError;

    fn try_from(row: PartnerRow) -> Result<Self, Self::Error> {
        Ok(Partner {
            id: PartnerId::from(row.partner_id),
            referral_code: row.referral_code,
            mode: parse_mode(&row.commission_mode)?,
            percent: row.commission_percent,
            fixed_amount: row.fixed_amount,
        })
    }
}

impl TryFrom<CommissionRow> for PartnerCommission {
    type Error = DatabaseError;

    fn try_from(row: CommissionRow) -> Result<Self, Self::Error> {
        Ok(PartnerCommission {
            id: CommissionId::from(row.commission_id),
            partner_id: PartnerId::from(row.partner_id),
            referral_code: row.referral_code,
            service_request_id: ServiceRequestId::from(row.service_request_id),
            calculated_amount: row.calculated_amount,
            mode_snapshot: parse_mode(&row.mode_snapshot)?,
            percent_snapshot: row.percent_snapshot,
            fixed_amount_snapshot: row.fixed_amount_snapshot,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

impl CommissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn partner_by_code(&self, code: &str) -> Result<Option<Partner>, DatabaseError> {
        let row: Option<PartnerRow> = sqlx::query_as(
            r#"
            SELECT partner_id, referral_code, commission_mode,
                   commission_percent, fixed_amount
            FROM partners
            WHERE referral_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Partner::try_from).transpose()
    }

    async fn commission_for(
        &self,
        partner_id: PartnerId,
        service_request_id: ServiceRequestId,
    ) -> Result<Option<PartnerCommission>, DatabaseError> {
        let row: Option<CommissionRow> = sqlx::query_as(
            r#"
            SELECT commission_id, partner_id, referral_code, service_request_id,
                   calculated_amount, mode_snapshot, percent_snapshot,
                   fixed_amount_snapshot, status, created_at
            FROM partner_commissions
            WHERE partner_id = $1 AND service_request_id = $2
            "#,
        )
        .bind(partner_id.as_uuid())
        .bind(service_request_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PartnerCommission::try_from).transpose()
    }

    async fn insert_commission(
        &self,
        commission: &PartnerCommission,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO partner_commissions (
                commission_id, partner_id, referral_code, service_request_id,
                calculated_amount, mode_snapshot, percent_snapshot,
                fixed_amount_snapshot, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (partner_id, service_request_id) DO NOTHING
            "#,
        )
        .bind(commission.id.as_uuid())
        .bind(commission.partner_id.as_uuid())
        .bind(&commission.referral_code)
        .bind(commission.service_request_id.as_uuid())
        .bind(commission.calculated_amount)
        .bind(mode_str(commission.mode_snapshot))
        .bind(commission.percent_snapshot)
        .bind(commission.fixed_amount_snapshot)
        .bind(status_str(commission.status))
        .bind(commission.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::classify)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PartnerDirectory for CommissionRepository {
    async fn find_by_referral_code(&self, code: &str) -> Result<Option<Partner>, ReferralError> {
        self.partner_by_code(code)
            .await
            .map_err(|e| ReferralError::Storage(e.to_string()))
    }
}

#[async_trait]
impl CommissionStore for CommissionRepository {
    async fn find(
        &self,
        partner_id: PartnerId,
        service_request_id: ServiceRequestId,
    ) -> Result<Option<PartnerCommission>, ReferralError> {
        self.commission_for(partner_id, service_request_id)
            .await
            .map_err(|e| ReferralError::Storage(e.to_string()))
    }

    async fn insert_if_absent(
        &self,
        commission: &PartnerCommission,
    ) -> Result<bool, ReferralError> {
        self.insert_commission(commission)
            .await
            .map_err(|e| ReferralError::Storage(e.to_string()))
    }
}
