//! Compute shapes: the compressed catalog record, purchase classes, and the
//! admission filter applied while the catalog is fetched.

pub mod filter;
pub mod types;

pub use filter::{ShapeFilter, compress_shape};
pub use types::{
    AcceleratorDevice, InstanceStorage, NetworkLimits, PurchaseClass, Shape, ShapeId, ShapeMap,
    Zone, ZoneMap, ZoneSet,
};
