//! Shape catalog cache: a single entry holding the whole filtered catalog.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use super::TtlCache;
use crate::error::{CatalogError, FetchStage, Result};
use crate::metrics::CatalogMetrics;
use crate::shape::{ShapeFilter, ShapeMap, compress_shape};
use crate::upstream::{ComputeApi, ShapeQuery, ShapeRecord, drain_pages, within_deadline};

/// The catalog's only cache key.
pub const SHAPE_CATALOG_CACHE_KEY: &str = "types";

#[derive(Debug)]
pub struct ShapeCatalogCache {
    cache: TtlCache<String, Arc<ShapeMap>>,
}

impl ShapeCatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    /// The cached catalog, if one is live at `now`.
    pub fn cached_at(&self, now: Instant) -> Option<Arc<ShapeMap>> {
        self.cache.get_at(SHAPE_CATALOG_CACHE_KEY, now)
    }

    /// Return the cached catalog, or page the full listing, filter,
    /// compress, and cache it.
    ///
    /// A failed fetch caches nothing and never falls back to an older catalog.
    pub async fn get_or_fetch(
        &self,
        api: &dyn ComputeApi,
        query: &ShapeQuery,
        filter: &ShapeFilter,
        deadline: Option<Instant>,
        metrics: &CatalogMetrics,
    ) -> Result<Arc<ShapeMap>> {
        if let Some(cached) = self.cache.get(SHAPE_CATALOG_CACHE_KEY) {
            metrics.record_catalog_hit();
            return Ok(cached);
        }
        metrics.record_catalog_miss();

        let mut shapes = ShapeMap::new();
        let walk = drain_pages(
            move |token| async move {
                within_deadline(deadline, FetchStage::Shapes, api.describe_shapes(query, token))
                    .await?
                    .map_err(|source| CatalogError::UpstreamFetch {
                        stage: FetchStage::Shapes,
                        source,
                    })
            },
            |records: Vec<ShapeRecord>| {
                for record in records {
                    if filter.accepts(&record) {
                        let shape = compress_shape(record);
                        shapes.insert(shape.name.clone(), Arc::new(shape));
                    }
                }
                ControlFlow::Continue(())
            },
        )
        .await;

        let pages = match walk {
            Ok(pages) => pages,
            Err(err) => {
                metrics.record_fetch_failure();
                warn!(error = %err, "shape catalog fetch failed");
                return Err(err);
            }
        };

        debug!(
            count = shapes.len(),
            pages,
            cache_key = SHAPE_CATALOG_CACHE_KEY,
            "discovered compute shapes"
        );
        let shapes = Arc::new(shapes);
        self.cache
            .set_default(SHAPE_CATALOG_CACHE_KEY.to_string(), Arc::clone(&shapes));
        Ok(shapes)
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        self.cache.sweep_at(now)
    }

    pub fn ttl(&self) -> Duration {
        self.cache.default_ttl()
    }

    /// Stored entries (0 or 1), including an expired one not yet swept.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
