#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod metrics;
pub mod offering;
pub mod provider;
pub mod selector;
pub mod shape;
pub mod upstream;

pub use error::{CatalogError, FetchStage};
pub use offering::{OfferedShape, Offering, ShapePrice};
pub use provider::{CapacityRejection, CatalogConfig, GetRequest, OfferingCatalog};
