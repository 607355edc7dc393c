//! Compute-description API adapters.

pub mod snapshot;
pub mod wire;

pub use snapshot::{ComputeSnapshot, SnapshotComputeApi, SnapshotError};
pub use wire::{
    DescribeShapeOfferingsResponse, DescribeShapesResponse, WireAccelerator, WireShape,
    WireShapeOffering,
};
