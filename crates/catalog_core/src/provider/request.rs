use std::time::Duration;

use tokio::time::Instant;

use crate::selector::SelectorValue;
use crate::shape::{PurchaseClass, ShapeId, Zone};

/// Input to [`super::OfferingCatalog::get`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetRequest {
    /// Network selection criteria; resolved to candidate zones.
    pub subnet_selector: SelectorValue,
    /// Upstream calls still running at this instant fail the request.
    pub deadline: Option<Instant>,
}

impl GetRequest {
    pub fn new(subnet_selector: SelectorValue) -> Self {
        Self {
            subnet_selector,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }
}

/// A capacity rejection observed by the fleet-provisioning caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityRejection {
    pub shape: ShapeId,
    pub zone: Zone,
    pub purchase_class: PurchaseClass,
    /// Upstream error code, e.g. "InsufficientInstanceCapacity". Logged only.
    pub error_code: String,
}
