//! Compute-description API response structs.
//!
//! These model the JSON bodies of the shape listing and shape-offering
//! listing calls. Field names follow the API's PascalCase; everything the
//! catalog does not strictly need is optional so that sparse records still
//! parse.

use serde::{Deserialize, Serialize};

use catalog_core::shape::{AcceleratorDevice, InstanceStorage};
use catalog_core::upstream::{Page, ShapeOfferingRecord, ShapeRecord};

/// One page of the shape listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeShapesResponse {
    #[serde(rename = "InstanceTypes", default)]
    pub shapes: Vec<WireShape>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// One page of the shape-offering listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeShapeOfferingsResponse {
    #[serde(rename = "InstanceTypeOfferings", default)]
    pub offerings: Vec<WireShapeOffering>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Shape description as returned by the listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireShape {
    /// Shape name (e.g., "m5.large", "p4de.24xlarge")
    #[serde(rename = "InstanceType")]
    pub name: String,

    /// "nitro" | "xen"; absent for bare metal
    #[serde(default)]
    pub hypervisor: Option<String>,

    /// Purchase-class tokens ("on-demand", "spot")
    #[serde(default)]
    pub supported_usage_classes: Vec<String>,

    #[serde(default)]
    pub supported_virtualization_types: Vec<String>,

    #[serde(default)]
    pub current_generation: bool,

    #[serde(default)]
    pub bare_metal: bool,

    #[serde(rename = "VCpuInfo", default)]
    pub vcpu_info: WireVCpuInfo,

    #[serde(default)]
    pub memory_info: WireMemoryInfo,

    #[serde(default)]
    pub processor_info: WireProcessorInfo,

    #[serde(default)]
    pub gpu_info: Option<WireGpuInfo>,

    /// Present at all means the shape carries FPGAs.
    #[serde(default)]
    pub fpga_info: Option<WireFpgaInfo>,

    #[serde(default)]
    pub inference_accelerator_info: Option<WireInferenceAcceleratorInfo>,

    #[serde(default)]
    pub instance_storage_info: Option<WireInstanceStorageInfo>,

    #[serde(default)]
    pub network_info: WireNetworkInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireVCpuInfo {
    #[serde(rename = "DefaultVCpus", default)]
    pub default_vcpus: u32,
    #[serde(default)]
    pub default_cores: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireMemoryInfo {
    #[serde(rename = "SizeInMiB", default)]
    pub size_in_mib: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireProcessorInfo {
    #[serde(default)]
    pub supported_architectures: Vec<String>,
    #[serde(rename = "SustainedClockSpeedInGhz", default)]
    pub sustained_clock_speed_ghz: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireGpuInfo {
    #[serde(default)]
    pub gpus: Vec<WireAccelerator>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireFpgaInfo {
    #[serde(default)]
    pub fpgas: Vec<WireAccelerator>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireInferenceAcceleratorInfo {
    #[serde(default)]
    pub accelerators: Vec<WireAccelerator>,
}

/// GPU, FPGA, or inference accelerator entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireAccelerator {
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub memory_info: Option<WireMemoryInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireInstanceStorageInfo {
    #[serde(rename = "TotalSizeInGB", default)]
    pub total_size_gb: u64,
    #[serde(default)]
    pub nvme_support: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireNetworkInfo {
    #[serde(default)]
    pub ipv4_addresses_per_interface: u32,
    #[serde(default)]
    pub maximum_network_interfaces: u32,
    #[serde(default)]
    pub network_performance: Option<String>,
}

/// One (shape, location) pair from the offering listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireShapeOffering {
    #[serde(rename = "InstanceType")]
    pub shape: String,
    /// "region" | "availability-zone" | "availability-zone-id"
    pub location_type: String,
    pub location: String,
}

impl From<WireAccelerator> for AcceleratorDevice {
    fn from(wire: WireAccelerator) -> Self {
        AcceleratorDevice {
            name: wire.name,
            manufacturer: wire.manufacturer,
            count: wire.count,
            memory_mib: wire.memory_info.map(|m| m.size_in_mib),
        }
    }
}

fn devices(wire: Vec<WireAccelerator>) -> Vec<AcceleratorDevice> {
    wire.into_iter().map(AcceleratorDevice::from).collect()
}

impl From<WireShape> for ShapeRecord {
    fn from(wire: WireShape) -> Self {
        ShapeRecord {
            name: wire.name,
            hypervisor: wire.hypervisor,
            supported_usage_classes: wire.supported_usage_classes,
            supported_virtualization_types: wire.supported_virtualization_types,
            default_vcpus: wire.vcpu_info.default_vcpus,
            default_cores: wire.vcpu_info.default_cores,
            memory_mib: wire.memory_info.size_in_mib,
            gpus: wire.gpu_info.map(|g| devices(g.gpus)).unwrap_or_default(),
            fpgas: wire.fpga_info.map(|f| devices(f.fpgas)),
            inference_accelerators: wire
                .inference_accelerator_info
                .map(|i| devices(i.accelerators))
                .unwrap_or_default(),
            instance_storage: wire.instance_storage_info.map(|s| InstanceStorage {
                total_size_gb: s.total_size_gb,
                nvme_support: s.nvme_support,
            }),
            ipv4_addresses_per_interface: wire.network_info.ipv4_addresses_per_interface,
            maximum_network_interfaces: wire.network_info.maximum_network_interfaces,
            network_performance: wire.network_info.network_performance,
            architectures: wire.processor_info.supported_architectures,
            sustained_clock_speed_ghz: wire.processor_info.sustained_clock_speed_ghz,
            current_generation: wire.current_generation,
            bare_metal: wire.bare_metal,
        }
    }
}

impl From<WireShapeOffering> for ShapeOfferingRecord {
    fn from(wire: WireShapeOffering) -> Self {
        ShapeOfferingRecord {
            shape: wire.shape,
            location: wire.location,
        }
    }
}

/// An empty `NextToken` is treated as the end of the listing.
fn next_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

impl From<DescribeShapesResponse> for Page<ShapeRecord> {
    fn from(wire: DescribeShapesResponse) -> Self {
        Page {
            items: wire.shapes.into_iter().map(ShapeRecord::from).collect(),
            next_token: next_token(wire.next_token),
        }
    }
}

impl From<DescribeShapeOfferingsResponse> for Page<ShapeOfferingRecord> {
    fn from(wire: DescribeShapeOfferingsResponse) -> Self {
        Page {
            items: wire
                .offerings
                .into_iter()
                .map(ShapeOfferingRecord::from)
                .collect(),
            next_token: next_token(wire.next_token),
        }
    }
}
