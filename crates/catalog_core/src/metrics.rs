//! Observability counters for the offering catalog.
//!
//! Counter names:
//! - `catalog_cache_hits_total` / `catalog_cache_misses_total`
//! - `zone_cache_hits_total` / `zone_cache_misses_total`
//! - `upstream_fetch_failures_total`
//! - `unavailable_reports_total`
//! - `offerings_suppressed_total`
//! - `price_fallbacks_total`
//! - `cache_entries_swept_total`

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct CatalogMetrics {
    catalog_cache_hits_total: AtomicU64,
    catalog_cache_misses_total: AtomicU64,
    zone_cache_hits_total: AtomicU64,
    zone_cache_misses_total: AtomicU64,
    upstream_fetch_failures_total: AtomicU64,
    unavailable_reports_total: AtomicU64,
    offerings_suppressed_total: AtomicU64,
    price_fallbacks_total: AtomicU64,
    cache_entries_swept_total: AtomicU64,
}

impl CatalogMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_catalog_hit(&self) {
        self.catalog_cache_hits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_miss(&self) {
        self.catalog_cache_misses_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_zone_hit(&self) {
        self.zone_cache_hits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_zone_miss(&self) {
        self.zone_cache_misses_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.upstream_fetch_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unavailable_report(&self) {
        self.unavailable_reports_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed(&self, count: u64) {
        self.offerings_suppressed_total
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_price_fallback(&self) {
        self.price_fallbacks_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swept(&self, count: u64) {
        self.cache_entries_swept_total
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn catalog_cache_hits_total(&self) -> u64 {
        self.catalog_cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn catalog_cache_misses_total(&self) -> u64 {
        self.catalog_cache_misses_total.load(Ordering::Relaxed)
    }

    pub fn zone_cache_hits_total(&self) -> u64 {
        self.zone_cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn zone_cache_misses_total(&self) -> u64 {
        self.zone_cache_misses_total.load(Ordering::Relaxed)
    }

    pub fn upstream_fetch_failures_total(&self) -> u64 {
        self.upstream_fetch_failures_total.load(Ordering::Relaxed)
    }

    pub fn unavailable_reports_total(&self) -> u64 {
        self.unavailable_reports_total.load(Ordering::Relaxed)
    }

    pub fn offerings_suppressed_total(&self) -> u64 {
        self.offerings_suppressed_total.load(Ordering::Relaxed)
    }

    pub fn price_fallbacks_total(&self) -> u64 {
        self.price_fallbacks_total.load(Ordering::Relaxed)
    }

    pub fn cache_entries_swept_total(&self) -> u64 {
        self.cache_entries_swept_total.load(Ordering::Relaxed)
    }
}
