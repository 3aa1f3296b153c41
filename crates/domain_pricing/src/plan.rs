//! Consultation pricing plans

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// The fixed set of consultation tiers
///
/// This enumeration is closed: every consumer switches over exactly these
/// three values, and adding a tier means touching all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKey {
    Pothigai,
    Ganga,
    Himalaya,
}

impl PlanKey {
    /// All keys, in tier order
    pub const ALL: [PlanKey; 3] = [PlanKey::Pothigai, PlanKey::Ganga, PlanKey::Himalaya];

    /// Returns the stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKey::Pothigai => "pothigai",
            PlanKey::Ganga => "ganga",
            PlanKey::Himalaya => "himalaya",
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanKey {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pothigai" => Ok(PlanKey::Pothigai),
            "ganga" => Ok(PlanKey::Ganga),
            "himalaya" => Ok(PlanKey::Himalaya),
            other => Err(PricingError::UnknownPlan(other.to_string())),
        }
    }
}

/// A consultation pricing plan
///
/// `total_price` is computed at construction and is always exactly
/// `base_price + gst`; callers must never recompute GST independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Plan tier
    pub key: PlanKey,
    /// Base price in whole currency units
    pub base_price: i64,
    /// GST in whole currency units
    pub gst: i64,
    /// Exact sum of base price and GST
    pub total_price: i64,
    /// Chat entitlement in hours
    pub chat_duration_hours: u32,
    /// Window within which the chat must be consumed
    pub availability_window_hours: u32,
    /// Whether the tier includes a phone call
    pub phone_call_available: bool,
    /// Whether the tier includes a video call
    pub video_call_available: bool,
}

impl PricingPlan {
    /// Creates a plan, deriving `total_price` from base and GST
    pub fn new(
        key: PlanKey,
        base_price: i64,
        gst: i64,
        chat_duration_hours: u32,
        availability_window_hours: u32,
    ) -> Result<Self, PricingError> {
        if base_price < 0 || gst < 0 {
            return Err(PricingError::InvalidPlan(format!(
                "{key}: negative amounts (base {base_price}, gst {gst})"
            )));
        }
        if chat_duration_hours == 0 {
            return Err(PricingError::InvalidPlan(format!(
                "{key}: chat duration must be positive"
            )));
        }
        if availability_window_hours < chat_duration_hours {
            return Err(PricingError::InvalidPlan(format!(
                "{key}: availability window shorter than chat duration"
            )));
        }

        Ok(Self {
            key,
            base_price,
            gst,
            total_price: base_price + gst,
            chat_duration_hours,
            availability_window_hours,
            phone_call_available: false,
            video_call_available: false,
        })
    }

    /// Enables the phone-call entitlement
    pub fn with_phone_call(mut self) -> Self {
        self.phone_call_available = true;
        self
    }

    /// Enables the video-call entitlement
    pub fn with_video_call(mut self) -> Self {
        self.video_call_available = true;
        self
    }
}

static FALLBACK_PLANS: Lazy<HashMap<PlanKey, PricingPlan>> = Lazy::new(|| {
    let plans = [
        PricingPlan::new(PlanKey::Pothigai, 1000, 180, 1, 24).expect("valid fallback plan"),
        PricingPlan::new(PlanKey::Ganga, 2500, 450, 3, 48)
            .expect("valid fallback plan")
            .with_phone_call(),
        PricingPlan::new(PlanKey::Himalaya, 5000, 900, 6, 72)
            .expect("valid fallback plan")
            .with_phone_call()
            .with_video_call(),
    ];
    plans.into_iter().map(|p| (p.key, p)).collect()
});

/// The built-in plan table used when the remote config is unavailable
pub fn fallback_plans() -> &'static HashMap<PlanKey, PricingPlan> {
    &FALLBACK_PLANS
}
