use std::time::Duration;

use crate::cache::ZoneOverride;
use crate::shape::ShapeFilter;
use crate::upstream::ShapeQuery;

pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_ZONE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_UNAVAILABLE_OFFERING_TTL: Duration = Duration::from_secs(3 * 60);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Tuning and policy for an [`super::OfferingCatalog`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub catalog_ttl: Duration,
    pub zone_ttl: Duration,
    /// Quarantine window after a capacity rejection.
    pub unavailable_offering_ttl: Duration,
    /// Cadence of the background sweep. Unrelated to any entry TTL.
    pub sweep_interval: Duration,
    /// Upper bound on each `get`'s upstream calls when the request carries
    /// no tighter deadline. `None` means unbounded.
    pub upstream_timeout: Option<Duration>,
    pub shape_query: ShapeQuery,
    pub shape_filter: ShapeFilter,
    pub zone_overrides: Vec<ZoneOverride>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_ttl: DEFAULT_CATALOG_TTL,
            zone_ttl: DEFAULT_ZONE_TTL,
            unavailable_offering_ttl: DEFAULT_UNAVAILABLE_OFFERING_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            upstream_timeout: None,
            shape_query: ShapeQuery::default(),
            shape_filter: ShapeFilter::default(),
            zone_overrides: vec![ZoneOverride::new("p4de.24xlarge", "us-east-1d")],
        }
    }
}
