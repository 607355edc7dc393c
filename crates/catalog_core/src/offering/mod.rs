//! Offerings: the (shape, zone, purchase class) combinations returned to
//! callers, and the synthesizer that builds them.

pub mod price;
pub mod synth;

use std::sync::Arc;

pub use price::{ShapePrice, sort_by_price};
pub use synth::{Synthesized, synthesize_offerings};

use crate::shape::{PurchaseClass, Shape, ShapeId, Zone};

/// A concrete combination believed to be obtainable right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offering {
    pub shape: ShapeId,
    pub zone: Zone,
    pub purchase_class: PurchaseClass,
    pub price: ShapePrice,
}

/// One catalog shape with its price and currently viable offerings.
///
/// `offerings` may be empty: the shape exists but has no known zone, or every
/// combination is quarantined.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferedShape {
    pub shape: Arc<Shape>,
    pub price: ShapePrice,
    pub offerings: Vec<Offering>,
}

impl OfferedShape {
    pub fn name(&self) -> &str {
        &self.shape.name
    }

    pub fn has_offering(&self, zone: &str, class: PurchaseClass) -> bool {
        self.offerings
            .iter()
            .any(|o| o.zone == zone && o.purchase_class == class)
    }
}
