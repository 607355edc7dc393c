//! Collaborator traits.

use async_trait::async_trait;

use super::{
    Page, PageToken, PricingError, ResolutionError, ShapeOfferingRecord, ShapeRecord, Subnet,
    UpstreamError,
};
use crate::selector::SelectorValue;

/// Server-side filter for the shape listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeQuery {
    pub virtualization_types: Vec<String>,
    pub architectures: Vec<String>,
}

impl Default for ShapeQuery {
    fn default() -> Self {
        Self {
            virtualization_types: vec!["hvm".to_string()],
            architectures: vec!["x86_64".to_string(), "arm64".to_string()],
        }
    }
}

/// Granularity of offering locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    Region,
    AvailabilityZone,
    AvailabilityZoneId,
}

impl LocationType {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Region => "region",
            LocationType::AvailabilityZone => "availability-zone",
            LocationType::AvailabilityZoneId => "availability-zone-id",
        }
    }
}

/// Paginated compute-description API.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    async fn describe_shapes(
        &self,
        query: &ShapeQuery,
        token: Option<PageToken>,
    ) -> Result<Page<ShapeRecord>, UpstreamError>;

    async fn describe_shape_offerings(
        &self,
        location_type: LocationType,
        token: Option<PageToken>,
    ) -> Result<Page<ShapeOfferingRecord>, UpstreamError>;
}

/// Maps a network selector onto concrete subnets.
#[async_trait]
pub trait SubnetResolver: Send + Sync {
    async fn resolve(&self, selector: &SelectorValue) -> Result<Vec<Subnet>, ResolutionError>;
}

/// On-demand price lookup. Expected to be an in-memory read.
pub trait PriceLookup: Send + Sync {
    fn on_demand_price(&self, shape: &str) -> Result<f64, PricingError>;
}
