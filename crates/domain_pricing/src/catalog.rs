//! Cached plan catalog
//!
//! The authoritative plan table lives in a remote config store behind the
//! [`PlanSource`] port. The catalog caches a fetched table for a bounded
//! duration and serves the built-in fallback whenever the source fails, so
//! a pricing lookup never surfaces an error to the payment flow.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::error::PricingError;
use crate::plan::{fallback_plans, PlanKey, PricingPlan};

/// How long a fetched plan table is served before re-fetching
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the authoritative plan table
#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn fetch_plans(&self) -> Result<HashMap<PlanKey, PricingPlan>, PricingError>;
}

struct CachedTable {
    plans: HashMap<PlanKey, PricingPlan>,
    fetched_at: Instant,
}

/// Plan catalog with a TTL cache and fallback table
///
/// Stale reads within the TTL are accepted; concurrent cache misses may each
/// fetch (the table is overwritten wholesale, so duplicate fetches are
/// harmless).
pub struct PricingCatalog {
    source: Arc<dyn PlanSource>,
    ttl: Duration,
    cache: RwLock<Option<CachedTable>>,
}

impl PricingCatalog {
    /// Creates a catalog over the given source with the default TTL
    pub fn new(source: Arc<dyn PlanSource>) -> Self {
        Self {
            source,
            ttl: CACHE_TTL,
            cache: RwLock::new(None),
        }
    }

    /// Overrides the cache TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Resolves a plan for a known key
    ///
    /// Falls back to the built-in table when the source fails or has no row
    /// for the key, so this never fails.
    pub async fn plan(&self, key: PlanKey) -> PricingPlan {
        let table = self.current_table().await;
        table
            .and_then(|plans| plans.get(&key).cloned())
            .unwrap_or_else(|| fallback_plans()[&key].clone())
    }

    /// Resolves a plan from its stored string key
    ///
    /// Returns `None` only when the key is not one of the known tiers.
    pub async fn lookup(&self, key: &str) -> Option<PricingPlan> {
        let key: PlanKey = key.parse().ok()?;
        Some(self.plan(key).await)
    }

    /// Total price for a stored string key, zero when unrecognized
    pub async fn plan_total(&self, key: &str) -> i64 {
        self.lookup(key).await.map(|p| p.total_price).unwrap_or(0)
    }

    /// Base price for a stored string key, zero when unrecognized
    pub async fn plan_base(&self, key: &str) -> i64 {
        self.lookup(key).await.map(|p| p.base_price).unwrap_or(0)
    }

    /// GST for a stored string key, zero when unrecognized
    pub async fn plan_gst(&self, key: &str) -> i64 {
        self.lookup(key).await.map(|p| p.gst).unwrap_or(0)
    }

    /// Returns the cached table, refreshing it when stale
    ///
    /// A failed refresh is not cached: the fallback is served for this call
    /// and the next call retries the source.
    async fn current_table(&self) -> Option<HashMap<PlanKey, PricingPlan>> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() <= self.ttl {
                    return Some(cached.plans.clone());
                }
            }
        }

        match self.source.fetch_plans().await {
            Ok(plans) => {
                let mut cache = self.cache.write().await;
                *cache = Some(CachedTable {
                    plans: plans.clone(),
                    fetched_at: Instant::now(),
                });
                Some(plans)
            }
            Err(err) => {
                tracing::warn!(error = %err, "plan source unavailable, serving fallback table");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        plans: HashMap<PlanKey, PricingPlan>,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn new(plans: HashMap<PlanKey, PricingPlan>) -> Self {
            Self {
                plans,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlanSource for StaticSource {
        async fn fetch_plans(&self) -> Result<HashMap<PlanKey, PricingPlan>, PricingError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.plans.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PlanSource for FailingSource {
        async fn fetch_plans(&self) -> Result<HashMap<PlanKey, PricingPlan>, PricingError> {
            Err(PricingError::SourceUnavailable("remote config down".into()))
        }
    }

    fn discounted_pothigai() -> HashMap<PlanKey, PricingPlan> {
        let plan = PricingPlan::new(PlanKey::Pothigai, 900, 162, 1, 24).unwrap();
        [(PlanKey::Pothigai, plan)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_serves_remote_table() {
        let source = Arc::new(StaticSource::new(discounted_pothigai()));
        let catalog = PricingCatalog::new(source);

        let plan = catalog.plan(PlanKey::Pothigai).await;
        assert_eq!(plan.total_price, 1062);
    }

    #[tokio::test]
    async fn test_falls_back_when_source_fails() {
        let catalog = PricingCatalog::new(Arc::new(FailingSource));

        let plan = catalog.plan(PlanKey::Ganga).await;
        assert_eq!(plan, fallback_plans()[&PlanKey::Ganga]);
    }

    #[tokio::test]
    async fn test_falls_back_for_key_missing_from_remote_table() {
        // Remote table only knows pothigai; himalaya comes from the fallback
        let source = Arc::new(StaticSource::new(discounted_pothigai()));
        let catalog = PricingCatalog::new(source);

        let plan = catalog.plan(PlanKey::Himalaya).await;
        assert_eq!(plan, fallback_plans()[&PlanKey::Himalaya]);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_refetch() {
        let source = Arc::new(StaticSource::new(discounted_pothigai()));
        let catalog = PricingCatalog::new(source.clone());

        catalog.plan(PlanKey::Pothigai).await;
        catalog.plan(PlanKey::Pothigai).await;

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let source = Arc::new(StaticSource::new(discounted_pothigai()));
        let catalog = PricingCatalog::new(source.clone()).with_ttl(Duration::ZERO);

        catalog.plan(PlanKey::Pothigai).await;
        catalog.plan(PlanKey::Pothigai).await;

        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_accessors_zero_for_unknown_key() {
        let catalog = PricingCatalog::new(Arc::new(FailingSource));

        assert_eq!(catalog.plan_total("everest").await, 0);
        assert_eq!(catalog.plan_base("everest").await, 0);
        assert_eq!(catalog.plan_gst("everest").await, 0);
    }

    #[tokio::test]
    async fn test_accessors_for_known_key() {
        let catalog = PricingCatalog::new(Arc::new(FailingSource));
        let expected = &fallback_plans()[&PlanKey::Pothigai];

        assert_eq!(catalog.plan_total("pothigai").await, expected.total_price);
        assert_eq!(catalog.plan_base("pothigai").await, expected.base_price);
        assert_eq!(catalog.plan_gst("pothigai").await, expected.gst);
    }
}
