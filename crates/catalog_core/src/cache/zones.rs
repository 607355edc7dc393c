//! Zonal offering cache: shape -> zones, one entry per selector fingerprint.
//!
//! Values are cached *before* negative capacity signals are applied; the
//! synthesizer filters against [`super::UnavailableOfferings`] on every read.

use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::TtlCache;
use crate::error::{CatalogError, FetchStage, Result};
use crate::metrics::CatalogMetrics;
use crate::selector::{SelectorFingerprint, SelectorValue, fingerprint};
use crate::shape::{ShapeId, Zone, ZoneMap};
use crate::upstream::{
    ComputeApi, LocationType, ShapeOfferingRecord, SubnetResolver, drain_pages, within_deadline,
};

pub const ZONE_CACHE_KEY_PREFIX: &str = "zones:";

/// Cache key for a selector fingerprint, e.g. `zones:00c0ffee12345678`.
pub fn zone_cache_key(fp: SelectorFingerprint) -> String {
    format!("{ZONE_CACHE_KEY_PREFIX}{fp}")
}

/// A (shape, zone) pair known to be obtainable even though the upstream
/// offering listing omits it.
///
/// Applied only when `zone` is among the selector's candidate zones and the
/// pair is missing from the listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneOverride {
    pub shape: ShapeId,
    pub zone: Zone,
}

impl ZoneOverride {
    pub fn new(shape: impl Into<ShapeId>, zone: impl Into<Zone>) -> Self {
        Self {
            shape: shape.into(),
            zone: zone.into(),
        }
    }
}

#[derive(Debug)]
pub struct ZonalOfferingCache {
    cache: TtlCache<String, Arc<ZoneMap>>,
}

impl ZonalOfferingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    pub fn cached_at(&self, key: &str, now: Instant) -> Option<Arc<ZoneMap>> {
        self.cache.get_at(key, now)
    }

    /// Return the zone map for `selector`, filling it on miss.
    pub async fn get_or_fetch(
        &self,
        api: &dyn ComputeApi,
        resolver: &dyn SubnetResolver,
        selector: &SelectorValue,
        overrides: &[ZoneOverride],
        deadline: Option<Instant>,
        metrics: &CatalogMetrics,
    ) -> Result<Arc<ZoneMap>> {
        let cache_key = zone_cache_key(fingerprint(selector)?);
        if let Some(cached) = self.cache.get(cache_key.as_str()) {
            metrics.record_zone_hit();
            return Ok(cached);
        }
        metrics.record_zone_miss();

        let zones = match fetch_zone_map(api, resolver, selector, overrides, deadline).await {
            Ok(zones) => zones,
            Err(err) => {
                metrics.record_fetch_failure();
                warn!(error = %err, cache_key = %cache_key, "zonal offering fetch failed");
                return Err(err);
            }
        };

        debug!(
            shapes = zones.len(),
            cache_key = %cache_key,
            "discovered zonal offerings"
        );
        let zones = Arc::new(zones);
        self.cache.set_default(cache_key, Arc::clone(&zones));
        Ok(zones)
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        self.cache.sweep_at(now)
    }

    pub fn ttl(&self) -> Duration {
        self.cache.default_ttl()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

async fn fetch_zone_map(
    api: &dyn ComputeApi,
    resolver: &dyn SubnetResolver,
    selector: &SelectorValue,
    overrides: &[ZoneOverride],
    deadline: Option<Instant>,
) -> Result<ZoneMap> {
    let subnets =
        within_deadline(deadline, FetchStage::Subnets, resolver.resolve(selector)).await??;
    let candidates: BTreeSet<Zone> = subnets.into_iter().map(|subnet| subnet.zone).collect();

    let mut zones = ZoneMap::new();
    drain_pages(
        move |token| async move {
            within_deadline(
                deadline,
                FetchStage::ZoneOfferings,
                api.describe_shape_offerings(LocationType::AvailabilityZone, token),
            )
            .await?
            .map_err(|source| CatalogError::UpstreamFetch {
                stage: FetchStage::ZoneOfferings,
                source,
            })
        },
        |records: Vec<ShapeOfferingRecord>| {
            for record in records {
                if candidates.contains(&record.location) {
                    zones.entry(record.shape).or_default().insert(record.location);
                }
            }
            ControlFlow::Continue(())
        },
    )
    .await?;

    for over in overrides {
        if !candidates.contains(&over.zone) {
            continue;
        }
        if zones
            .entry(over.shape.clone())
            .or_default()
            .insert(over.zone.clone())
        {
            debug!(
                shape = %over.shape,
                zone = %over.zone,
                "forcing shape into zone missing from upstream offerings"
            );
        }
    }

    Ok(zones)
}
