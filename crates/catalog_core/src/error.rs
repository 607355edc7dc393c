//! Catalog error taxonomy.
//!
//! Every variant here is fatal to the `get` call that produced it. Pricing
//! failures never surface as a `CatalogError`; they degrade the price to
//! [`crate::offering::ShapePrice::Unknown`].

use std::fmt;

use thiserror::Error;

use crate::selector::HashError;
use crate::upstream::{ResolutionError, UpstreamError};

/// Which upstream sub-fetch of a `get` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStage {
    /// Paginated shape listing (catalog fill).
    Shapes,
    /// Subnet resolution for the zonal fill.
    Subnets,
    /// Paginated (shape, zone) offering listing (zonal fill).
    ZoneOfferings,
}

impl FetchStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchStage::Shapes => "shapes",
            FetchStage::Subnets => "subnets",
            FetchStage::ZoneOfferings => "zone_offerings",
        }
    }
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("failed to hash the subnet selector: {0}")]
    Hash(#[from] HashError),

    #[error("fetching {stage}: {source}")]
    UpstreamFetch {
        stage: FetchStage,
        #[source]
        source: UpstreamError,
    },

    #[error("resolving subnets: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("deadline exceeded while fetching {stage}")]
    DeadlineExceeded { stage: FetchStage },
}

impl CatalogError {
    /// The sub-fetch that failed, if the error came from an upstream call.
    pub fn stage(&self) -> Option<FetchStage> {
        match self {
            CatalogError::Hash(_) => None,
            CatalogError::UpstreamFetch { stage, .. } => Some(*stage),
            CatalogError::Resolution(_) => Some(FetchStage::Subnets),
            CatalogError::DeadlineExceeded { stage } => Some(*stage),
        }
    }
}
