//! Catalog-level shape types.
//!
//! `Shape` is the reduced projection of an upstream shape record that the
//! catalog keeps in memory. Fields not needed for placement are dropped
//! at fetch time (see [`super::compress_shape`]).

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shape identifier (e.g. "m5.large").
pub type ShapeId = String;

/// Zone identifier (e.g. "us-east-1a").
pub type Zone = String;

/// Zones in which a shape is obtainable. Ordered for stable iteration.
pub type ZoneSet = BTreeSet<Zone>;

/// Filtered, compressed catalog keyed by shape name.
pub type ShapeMap = HashMap<ShapeId, Arc<Shape>>;

/// Shape name to the candidate zones it is offered in.
pub type ZoneMap = HashMap<ShapeId, ZoneSet>;

/// Purchase mode of an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurchaseClass {
    OnDemand,
    Spot,
}

impl PurchaseClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseClass::OnDemand => "on-demand",
            PurchaseClass::Spot => "spot",
        }
    }

    /// Parse the upstream wire token. Unknown tokens return `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "on-demand" => Some(PurchaseClass::OnDemand),
            "spot" => Some(PurchaseClass::Spot),
            _ => None,
        }
    }
}

impl fmt::Display for PurchaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPU or inference accelerator attached to a shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorDevice {
    pub name: String,
    pub manufacturer: String,
    pub count: u32,
    /// Per-device memory, when reported.
    pub memory_mib: Option<u64>,
}

/// Local instance storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStorage {
    pub total_size_gb: u64,
    /// "required" | "supported" | "unsupported", as reported.
    pub nvme_support: Option<String>,
}

/// Network limits that bound pod/ENI density on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkLimits {
    pub ipv4_addresses_per_interface: u32,
    pub maximum_network_interfaces: u32,
}

/// Compressed compute shape. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub name: ShapeId,
    pub hypervisor: Option<String>,
    /// Purchase classes exactly as reported upstream. May contain duplicates;
    /// use [`Shape::distinct_purchase_classes`] when enumerating.
    pub purchase_classes: Vec<PurchaseClass>,
    pub default_vcpus: u32,
    pub memory_mib: u64,
    pub gpus: Vec<AcceleratorDevice>,
    pub inference_accelerators: Vec<AcceleratorDevice>,
    pub instance_storage: Option<InstanceStorage>,
    pub network: NetworkLimits,
    pub architectures: Vec<String>,
}

impl Shape {
    /// Purchase classes de-duplicated, first-seen order preserved.
    pub fn distinct_purchase_classes(&self) -> Vec<PurchaseClass> {
        let mut out: Vec<PurchaseClass> = Vec::with_capacity(self.purchase_classes.len());
        for class in &self.purchase_classes {
            if !out.contains(class) {
                out.push(*class);
            }
        }
        out
    }
}
