//! Collaborator seams: the compute-description API, subnet resolution, and
//! pricing. Implementations live outside this crate.

pub mod api;
pub mod deadline;
pub mod error;
pub mod pager;
pub mod records;

pub use api::{ComputeApi, LocationType, PriceLookup, ShapeQuery, SubnetResolver};
pub use deadline::within_deadline;
pub use error::{PricingError, ResolutionError, UpstreamError};
pub use pager::{Page, PageToken, drain_pages};
pub use records::{ShapeOfferingRecord, ShapeRecord, Subnet};
