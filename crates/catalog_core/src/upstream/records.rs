//! Upstream records as handed to the catalog by a `ComputeApi` adapter.
//!
//! These carry more than the catalog keeps; see
//! [`crate::shape::compress_shape`] for the retained projection.

use crate::shape::{AcceleratorDevice, InstanceStorage, ShapeId, Zone};

/// Full shape description from the compute-description API.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeRecord {
    pub name: ShapeId,
    pub hypervisor: Option<String>,
    /// Raw purchase-class tokens ("on-demand", "spot", ...). Not guaranteed distinct.
    pub supported_usage_classes: Vec<String>,
    pub supported_virtualization_types: Vec<String>,
    pub default_vcpus: u32,
    pub default_cores: Option<u32>,
    pub memory_mib: u64,
    pub gpus: Vec<AcceleratorDevice>,
    /// `Some` whenever the upstream record carries an FPGA section at all.
    pub fpgas: Option<Vec<AcceleratorDevice>>,
    pub inference_accelerators: Vec<AcceleratorDevice>,
    pub instance_storage: Option<InstanceStorage>,
    pub ipv4_addresses_per_interface: u32,
    pub maximum_network_interfaces: u32,
    pub network_performance: Option<String>,
    pub architectures: Vec<String>,
    pub sustained_clock_speed_ghz: Option<f64>,
    pub current_generation: bool,
    pub bare_metal: bool,
}

/// One (shape, location) availability pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeOfferingRecord {
    pub shape: ShapeId,
    pub location: Zone,
}

/// A resolved subnet. Only its zone matters to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub id: String,
    pub zone: Zone,
}
