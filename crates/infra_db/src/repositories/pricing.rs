//! Pricing plan source backed by the config table
//!
//! The remote pricing config is modelled as a table; the catalog's fallback
//! handling covers it being empty or unreachable.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use domain_pricing::{PlanKey, PlanSource, PricingError, PricingPlan};

/// `PlanSource` adapter over the pricing_plans table
#[derive(Debug, Clone)]
pub struct PricingRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    plan_key: String,
    base_price: i64,
    gst: i64,
    chat_duration_hours: i32,
    availability_window_hours: i32,
    phone_call_available: bool,
    video_call_available: bool,
}

impl PricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanSource for PricingRepository {
    async fn fetch_plans(&self) -> Result<HashMap<PlanKey, PricingPlan>, PricingError> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            r#"
            SELECT plan_key, base_price, gst, chat_duration_hours,
                   availability_window_hours, phone_call_available,
                   video_call_available
            FROM pricing_plans
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PricingError::SourceUnavailable(e.to_string()))?;

        let mut plans = HashMap::new();
        for row in rows {
            // Rows that fail the closed key set or plan invariants are
            // skipped; the catalog falls back to the built-in entry
            let key: PlanKey = match row.plan_key.parse() {
                Ok(key) => key,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping pricing row with unknown key");
                    continue;
                }
            };
            let plan = PricingPlan::new(
                key,
                row.base_price,
                row.gst,
                row.chat_duration_hours as u32,
                row.availability_window_hours as u32,
            );
            let plan = match plan {
                Ok(plan) => plan,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping invalid pricing row");
                    continue;
                }
            };
            let plan = match (row.phone_call_available, row.video_call_available) {
                (true, true) => plan.with_phone_call().with_video_call(),
                (true, false) => plan.with_phone_call(),
                (false, true) => plan.with_video_call(),
                (false, false) => plan,
            };
            plans.insert(key, plan);
        }

        Ok(plans)
    }
}
