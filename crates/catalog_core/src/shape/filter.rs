//! Shape admission filter and record compression.

use tracing::debug;

use super::{NetworkLimits, PurchaseClass, Shape};
use crate::upstream::ShapeRecord;

/// Rejects shapes that cannot be scheduled usefully on this platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeFilter {
    /// Shape-name prefixes of families whose accelerators have no working
    /// device plugin (e.g. "g2": older GPUs reported as unhealthy, leaving
    /// zero allocatable GPUs).
    pub blocked_family_prefixes: Vec<String>,
}

impl Default for ShapeFilter {
    fn default() -> Self {
        Self {
            blocked_family_prefixes: vec!["g2".to_string()],
        }
    }
}

impl ShapeFilter {
    /// Returns `true` if the record should enter the catalog.
    pub fn accepts(&self, record: &ShapeRecord) -> bool {
        if record.fpgas.is_some() {
            return false;
        }
        !self
            .blocked_family_prefixes
            .iter()
            .any(|prefix| record.name.starts_with(prefix.as_str()))
    }
}

/// Reduce an upstream record to the fields placement decisions need.
///
/// Unknown purchase-class tokens are dropped. Duplicates are kept as reported.
pub fn compress_shape(record: ShapeRecord) -> Shape {
    let mut purchase_classes = Vec::with_capacity(record.supported_usage_classes.len());
    for token in &record.supported_usage_classes {
        match PurchaseClass::parse(token) {
            Some(class) => purchase_classes.push(class),
            None => debug!(shape = %record.name, token = %token, "ignoring unknown purchase class"),
        }
    }

    Shape {
        name: record.name,
        hypervisor: record.hypervisor,
        purchase_classes,
        default_vcpus: record.default_vcpus,
        memory_mib: record.memory_mib,
        gpus: record.gpus,
        inference_accelerators: record.inference_accelerators,
        instance_storage: record.instance_storage,
        network: NetworkLimits {
            ipv4_addresses_per_interface: record.ipv4_addresses_per_interface,
            maximum_network_interfaces: record.maximum_network_interfaces,
        },
        architectures: record.architectures,
    }
}
