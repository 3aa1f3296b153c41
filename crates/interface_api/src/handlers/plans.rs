//! Pricing plan handlers

use axum::{
    extract::{Path, State},
    Json,
};

use domain_pricing::{PlanKey, PricingPlan};

use crate::error::ApiError;
use crate::AppState;

/// Lists all consultation plans
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<PricingPlan>> {
    let mut plans = Vec::with_capacity(PlanKey::ALL.len());
    for key in PlanKey::ALL {
        plans.push(state.catalog.plan(key).await);
    }
    Json(plans)
}

/// Gets one plan by its key
pub async fn get_plan(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<PricingPlan>, ApiError> {
    state
        .catalog
        .lookup(&key)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("unknown plan: {key}")))
}
