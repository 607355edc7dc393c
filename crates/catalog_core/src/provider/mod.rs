//! The offering catalog: public entry point tying the caches, the
//! synthesizer, and the pricing collaborator together.
//!
//! `get` is fully serialized behind one async mutex spanning catalog fetch,
//! zone fetch, pricing, and synthesis, so a cold cache triggers one upstream
//! fill rather than one per concurrent caller. `report_unavailable` never
//! takes that mutex.

pub mod config;
pub mod request;

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

pub use config::{
    CatalogConfig, DEFAULT_CATALOG_TTL, DEFAULT_SWEEP_INTERVAL, DEFAULT_UNAVAILABLE_OFFERING_TTL,
    DEFAULT_ZONE_TTL,
};
pub use request::{CapacityRejection, GetRequest};

use crate::cache::{
    ShapeCatalogCache, Sweep, SweeperHandle, UnavailableOfferings, ZonalOfferingCache,
    spawn_sweeper, unavailable_offering_cache_key,
};
use crate::error::Result;
use crate::metrics::CatalogMetrics;
use crate::offering::{OfferedShape, ShapePrice, synthesize_offerings};
use crate::shape::{ShapeId, ZoneSet};
use crate::upstream::{ComputeApi, PriceLookup, SubnetResolver};

/// Cache state owned by one catalog instance.
#[derive(Debug)]
pub struct CatalogCaches {
    pub shapes: ShapeCatalogCache,
    pub zones: ZonalOfferingCache,
    pub unavailable: UnavailableOfferings,
    pub metrics: CatalogMetrics,
}

impl CatalogCaches {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            shapes: ShapeCatalogCache::new(config.catalog_ttl),
            zones: ZonalOfferingCache::new(config.zone_ttl),
            unavailable: UnavailableOfferings::new(config.unavailable_offering_ttl),
            metrics: CatalogMetrics::new(),
        }
    }
}

impl Sweep for CatalogCaches {
    fn sweep_expired(&self, now: Instant) -> usize {
        let removed =
            self.shapes.sweep_at(now) + self.zones.sweep_at(now) + self.unavailable.sweep_at(now);
        self.metrics.record_swept(removed as u64);
        removed
    }
}

pub struct OfferingCatalog {
    api: Arc<dyn ComputeApi>,
    resolver: Arc<dyn SubnetResolver>,
    pricing: Arc<dyn PriceLookup>,
    config: CatalogConfig,
    caches: Arc<CatalogCaches>,
    get_lock: Mutex<()>,
}

impl OfferingCatalog {
    pub fn new(
        api: Arc<dyn ComputeApi>,
        resolver: Arc<dyn SubnetResolver>,
        pricing: Arc<dyn PriceLookup>,
        config: CatalogConfig,
    ) -> Self {
        let caches = Arc::new(CatalogCaches::new(&config));
        Self {
            api,
            resolver,
            pricing,
            config,
            caches,
            get_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn caches(&self) -> &CatalogCaches {
        &self.caches
    }

    pub fn metrics(&self) -> &CatalogMetrics {
        &self.caches.metrics
    }

    /// Start the background sweep on the current tokio runtime.
    ///
    /// The task ends when the returned handle or this catalog is dropped.
    pub fn spawn_sweeper(&self) -> SweeperHandle {
        spawn_sweeper(Arc::downgrade(&self.caches), self.config.sweep_interval)
    }

    /// Every catalog shape with its price and currently viable offerings,
    /// sorted by shape name.
    ///
    /// Fails as a whole if the catalog or zone fill fails; a failed price
    /// lookup only degrades that shape's price to [`ShapePrice::Unknown`].
    pub async fn get(&self, request: &GetRequest) -> Result<Vec<OfferedShape>> {
        let _serialized = self.get_lock.lock().await;
        let deadline = self.effective_deadline(request.deadline);
        let metrics = &self.caches.metrics;

        let shapes = self
            .caches
            .shapes
            .get_or_fetch(
                self.api.as_ref(),
                &self.config.shape_query,
                &self.config.shape_filter,
                deadline,
                metrics,
            )
            .await?;
        let zones = self
            .caches
            .zones
            .get_or_fetch(
                self.api.as_ref(),
                self.resolver.as_ref(),
                &request.subnet_selector,
                &self.config.zone_overrides,
                deadline,
                metrics,
            )
            .await?;

        let now = Instant::now();
        let no_zones = ZoneSet::new();
        let mut names: Vec<&ShapeId> = shapes.keys().collect();
        names.sort_unstable();

        let mut result = Vec::with_capacity(names.len());
        for name in names {
            let shape = &shapes[name];
            let price = match self.pricing.on_demand_price(name) {
                Ok(value) => ShapePrice::known(value),
                Err(err) => {
                    // Frequent for new or regional shapes; not worth a warning.
                    trace!(shape = %name, error = %err, "price unavailable, ranking shape last");
                    ShapePrice::Unknown
                }
            };
            // Also catches a lookup that returned a non-finite value.
            if !price.is_known() {
                metrics.record_price_fallback();
            }
            let synthesized = synthesize_offerings(
                shape,
                zones.get(name).unwrap_or(&no_zones),
                price,
                |class, shape, zone| {
                    self.caches
                        .unavailable
                        .is_unavailable_at(class, shape, zone, now)
                },
            );
            if synthesized.suppressed > 0 {
                metrics.record_suppressed(synthesized.suppressed as u64);
            }
            result.push(OfferedShape {
                shape: Arc::clone(shape),
                price,
                offerings: synthesized.offerings,
            });
        }
        Ok(result)
    }

    /// Quarantine the rejected offering for the configured TTL, refreshing
    /// any existing quarantine. Best effort: there is nothing to fail.
    pub fn report_unavailable(&self, rejection: &CapacityRejection) {
        debug!(
            error_code = %rejection.error_code,
            offering = %unavailable_offering_cache_key(
                rejection.purchase_class,
                &rejection.shape,
                &rejection.zone,
            ),
            ttl_s = self.caches.unavailable.quarantine_ttl().as_secs(),
            "capacity rejection, avoiding offering"
        );
        self.caches.unavailable.mark_unavailable(
            rejection.purchase_class,
            &rejection.shape,
            &rejection.zone,
        );
        self.caches.metrics.record_unavailable_report();
    }

    fn effective_deadline(&self, requested: Option<Instant>) -> Option<Instant> {
        // An unrepresentable bound is no bound.
        let bounded = self
            .config
            .upstream_timeout
            .and_then(|t| Instant::now().checked_add(t));
        match (requested, bounded) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
