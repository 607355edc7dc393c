//! The three independently expiring caches behind the offering catalog.
//!
//! - [`ShapeCatalogCache`]: one entry, the filtered shape catalog.
//! - [`ZonalOfferingCache`]: one entry per selector fingerprint.
//! - [`UnavailableOfferings`]: recently rejected (class, shape, zone) keys
//!   with sliding expiry.
//!
//! Each cache is individually thread-safe. None of them coordinates with the
//! others; skew between them is tolerated.

pub mod catalog;
pub mod sweeper;
pub mod ttl;
pub mod unavailable;
pub mod zones;

pub use catalog::{SHAPE_CATALOG_CACHE_KEY, ShapeCatalogCache};
pub use sweeper::{Sweep, SweeperHandle, spawn_sweeper};
pub use ttl::TtlCache;
pub use unavailable::{UnavailableOffering, UnavailableOfferings, unavailable_offering_cache_key};
pub use zones::{ZONE_CACHE_KEY_PREFIX, ZonalOfferingCache, ZoneOverride, zone_cache_key};
