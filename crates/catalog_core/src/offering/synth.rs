//! Offering synthesis: zones × distinct purchase classes, minus quarantined keys.

use super::{Offering, ShapePrice};
use crate::shape::{PurchaseClass, Shape, ZoneSet};

/// Output of [`synthesize_offerings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    pub offerings: Vec<Offering>,
    /// Combinations dropped because they were quarantined.
    pub suppressed: usize,
}

/// Build every (zone, class) offering for `shape` that `is_unavailable`
/// does not reject.
///
/// Zones are visited in sorted order and classes in first-seen order, so the
/// output is deterministic. An empty zone set yields no offerings.
pub fn synthesize_offerings<F>(
    shape: &Shape,
    zones: &ZoneSet,
    price: ShapePrice,
    is_unavailable: F,
) -> Synthesized
where
    F: Fn(PurchaseClass, &str, &str) -> bool,
{
    // Upstream does not guarantee distinct classes.
    let classes = shape.distinct_purchase_classes();
    let mut offerings = Vec::with_capacity(zones.len() * classes.len());
    let mut suppressed = 0usize;

    for zone in zones {
        for &class in &classes {
            if is_unavailable(class, &shape.name, zone) {
                suppressed += 1;
                continue;
            }
            offerings.push(Offering {
                shape: shape.name.clone(),
                zone: zone.clone(),
                purchase_class: class,
                price,
            });
        }
    }

    Synthesized {
        offerings,
        suppressed,
    }
}
