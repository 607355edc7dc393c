//! Negative offering cache: (purchase class, shape, zone) keys that the fleet
//! API recently rejected for insufficient capacity.
//!
//! Every report rewrites the entry, so the quarantine window slides: it ends
//! one TTL after the most recent report, not the first. There is no removal
//! API; entries disappear only by expiring.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use super::TtlCache;
use crate::shape::{PurchaseClass, ShapeId, Zone};

/// Key of a quarantined offering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnavailableOffering {
    pub purchase_class: PurchaseClass,
    pub shape: ShapeId,
    pub zone: Zone,
}

impl UnavailableOffering {
    pub fn new(purchase_class: PurchaseClass, shape: &str, zone: &str) -> Self {
        Self {
            purchase_class,
            shape: shape.to_string(),
            zone: zone.to_string(),
        }
    }
}

/// Renders as `class:shape:zone`.
impl fmt::Display for UnavailableOffering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.purchase_class, self.shape, self.zone)
    }
}

/// Stable string key for logs and debugging, e.g. `spot:m5.large:us-east-1a`.
pub fn unavailable_offering_cache_key(class: PurchaseClass, shape: &str, zone: &str) -> String {
    format!("{class}:{shape}:{zone}")
}

#[derive(Debug)]
pub struct UnavailableOfferings {
    cache: TtlCache<UnavailableOffering, ()>,
}

impl UnavailableOfferings {
    pub fn new(quarantine_ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(quarantine_ttl),
        }
    }

    pub fn quarantine_ttl(&self) -> Duration {
        self.cache.default_ttl()
    }

    /// Insert or refresh the quarantine for an offering.
    pub fn mark_unavailable(&self, class: PurchaseClass, shape: &str, zone: &str) {
        self.mark_unavailable_at(class, shape, zone, Instant::now());
    }

    pub fn mark_unavailable_at(&self, class: PurchaseClass, shape: &str, zone: &str, now: Instant) {
        self.cache
            .set_default_at(UnavailableOffering::new(class, shape, zone), (), now);
    }

    /// `true` while the offering is quarantined. Absent or expired keys are available.
    pub fn is_unavailable(&self, class: PurchaseClass, shape: &str, zone: &str) -> bool {
        self.is_unavailable_at(class, shape, zone, Instant::now())
    }

    pub fn is_unavailable_at(
        &self,
        class: PurchaseClass,
        shape: &str,
        zone: &str,
        now: Instant,
    ) -> bool {
        self.cache
            .contains_live_at(&UnavailableOffering::new(class, shape, zone), now)
    }

    /// When the current quarantine for an offering lifts, if it is quarantined.
    pub fn quarantined_until(
        &self,
        class: PurchaseClass,
        shape: &str,
        zone: &str,
        now: Instant,
    ) -> Option<Instant> {
        self.cache
            .expires_at(&UnavailableOffering::new(class, shape, zone), now)
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        self.cache.sweep_at(now)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
