//! A `ComputeApi` served from a recorded catalog snapshot.
//!
//! Useful for offline runs and tests: the snapshot holds full listing
//! results and is paged back out with the same filter and token semantics as
//! the live service (filters match any listed value; tokens are opaque).

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use catalog_core::upstream::{
    ComputeApi, LocationType, Page, PageToken, ShapeOfferingRecord, ShapeQuery, ShapeRecord,
    UpstreamError,
};

use super::wire::{WireShape, WireShapeOffering};

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("page size must be positive")]
    ZeroPageSize,
}

/// Recorded listing results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputeSnapshot {
    #[serde(rename = "InstanceTypes", default)]
    pub shapes: Vec<WireShape>,
    #[serde(rename = "InstanceTypeOfferings", default)]
    pub offerings: Vec<WireShapeOffering>,
}

#[derive(Debug)]
pub struct SnapshotComputeApi {
    snapshot: ComputeSnapshot,
    page_size: usize,
}

impl SnapshotComputeApi {
    pub fn new(snapshot: ComputeSnapshot, page_size: usize) -> Result<Self, SnapshotError> {
        if page_size == 0 {
            return Err(SnapshotError::ZeroPageSize);
        }
        debug!(
            shapes = snapshot.shapes.len(),
            offerings = snapshot.offerings.len(),
            page_size,
            "loaded compute snapshot"
        );
        Ok(Self {
            snapshot,
            page_size,
        })
    }

    pub fn from_json_str(raw: &str, page_size: usize) -> Result<Self, SnapshotError> {
        Self::new(serde_json::from_str(raw)?, page_size)
    }

    pub fn from_path(path: impl AsRef<Path>, page_size: usize) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw, page_size)
    }

    pub fn snapshot(&self) -> &ComputeSnapshot {
        &self.snapshot
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn page<T, R>(
        &self,
        matching: Vec<&T>,
        token: Option<PageToken>,
    ) -> Result<Page<R>, UpstreamError>
    where
        T: Clone,
        R: From<T>,
    {
        let start = match token {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .ok()
                .filter(|&offset| offset > 0 && offset < matching.len())
                .ok_or_else(|| {
                    UpstreamError::Malformed(format!("invalid page token {token:?}"))
                })?,
        };
        let end = (start + self.page_size).min(matching.len());
        let items = matching[start..end]
            .iter()
            .map(|&item| R::from(item.clone()))
            .collect();
        let next_token = (end < matching.len()).then(|| end.to_string());
        Ok(Page { items, next_token })
    }
}

fn matches_any(filter: &[String], values: &[String]) -> bool {
    filter.is_empty() || values.iter().any(|v| filter.contains(v))
}

#[async_trait]
impl ComputeApi for SnapshotComputeApi {
    async fn describe_shapes(
        &self,
        query: &ShapeQuery,
        token: Option<PageToken>,
    ) -> Result<Page<ShapeRecord>, UpstreamError> {
        let matching: Vec<_> = self
            .snapshot
            .shapes
            .iter()
            .filter(|s| {
                matches_any(&query.virtualization_types, &s.supported_virtualization_types)
                    && matches_any(
                        &query.architectures,
                        &s.processor_info.supported_architectures,
                    )
            })
            .collect();
        self.page(matching, token)
    }

    async fn describe_shape_offerings(
        &self,
        location_type: LocationType,
        token: Option<PageToken>,
    ) -> Result<Page<ShapeOfferingRecord>, UpstreamError> {
        let matching: Vec<_> = self
            .snapshot
            .offerings
            .iter()
            .filter(|o| o.location_type == location_type.as_str())
            .collect();
        self.page(matching, token)
    }
}
