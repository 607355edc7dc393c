//! Shape price with an explicit "unknown" that orders as worst.

use std::cmp::Ordering;
use std::fmt;

use super::OfferedShape;

/// On-demand price of a shape.
///
/// `Unknown` (lookup failed, or returned a non-finite value) compares greater
/// than every `Known` price, so cost-based selection never prefers it. There
/// is no numeric sentinel to do arithmetic on by accident.
#[derive(Debug, Clone, Copy)]
pub enum ShapePrice {
    Known(f64),
    Unknown,
}

impl ShapePrice {
    /// `Known` for finite values, `Unknown` otherwise.
    pub fn known(value: f64) -> Self {
        if value.is_finite() {
            ShapePrice::Known(value)
        } else {
            ShapePrice::Unknown
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            ShapePrice::Known(v) => Some(v),
            ShapePrice::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, ShapePrice::Known(_))
    }
}

impl Ord for ShapePrice {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ShapePrice::Known(a), ShapePrice::Known(b)) => a.total_cmp(b),
            (ShapePrice::Known(_), ShapePrice::Unknown) => Ordering::Less,
            (ShapePrice::Unknown, ShapePrice::Known(_)) => Ordering::Greater,
            (ShapePrice::Unknown, ShapePrice::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for ShapePrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ShapePrice {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ShapePrice {}

impl fmt::Display for ShapePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapePrice::Known(v) => write!(f, "{v}"),
            ShapePrice::Unknown => f.write_str("unknown"),
        }
    }
}

/// Cheapest first; unknown prices last; ties broken by shape name.
pub fn sort_by_price(shapes: &mut [OfferedShape]) {
    shapes.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name().cmp(b.name())));
}
