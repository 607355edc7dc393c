#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use catalog_core::selector::SelectorValue;
use catalog_core::upstream::{
    ComputeApi, LocationType, Page, PageToken, PriceLookup, PricingError, ResolutionError,
    ShapeOfferingRecord, ShapeQuery, ShapeRecord, Subnet, SubnetResolver, UpstreamError,
};

/// Test helper: a minimal upstream shape record.
pub fn shape(name: &str, classes: &[&str]) -> ShapeRecord {
    ShapeRecord {
        name: name.to_string(),
        hypervisor: Some("nitro".to_string()),
        supported_usage_classes: classes.iter().map(|c| c.to_string()).collect(),
        supported_virtualization_types: vec!["hvm".to_string()],
        default_vcpus: 2,
        memory_mib: 8192,
        ipv4_addresses_per_interface: 10,
        maximum_network_interfaces: 3,
        architectures: vec!["x86_64".to_string()],
        current_generation: true,
        ..ShapeRecord::default()
    }
}

pub fn offering(shape: &str, zone: &str) -> ShapeOfferingRecord {
    ShapeOfferingRecord {
        shape: shape.to_string(),
        location: zone.to_string(),
    }
}

pub fn subnet(id: &str, zone: &str) -> Subnet {
    Subnet {
        id: id.to_string(),
        zone: zone.to_string(),
    }
}

pub fn tag_selector(key: &str, value: &str) -> SelectorValue {
    SelectorValue::map([(key, value)])
}

fn page_of<T: Clone>(pages: &[Vec<T>], token: Option<PageToken>) -> Result<Page<T>, UpstreamError> {
    let idx = match token {
        None => 0,
        Some(t) => t
            .parse::<usize>()
            .map_err(|_| UpstreamError::Malformed(format!("bad token {t}")))?,
    };
    if pages.is_empty() {
        return Ok(Page::last(Vec::new()));
    }
    let items = pages
        .get(idx)
        .cloned()
        .ok_or_else(|| UpstreamError::Malformed(format!("no page {idx}")))?;
    let next_token = (idx + 1 < pages.len()).then(|| (idx + 1).to_string());
    Ok(Page { items, next_token })
}

/// Scripted compute API. Pages are addressed by index tokens.
#[derive(Default)]
pub struct FakeComputeApi {
    pub shape_pages: Mutex<Vec<Vec<ShapeRecord>>>,
    pub offering_pages: Mutex<Vec<Vec<ShapeOfferingRecord>>>,
    pub shape_calls: AtomicUsize,
    pub offering_calls: AtomicUsize,
    pub fail_shapes: AtomicBool,
    pub fail_offerings: AtomicBool,
    pub delay: Option<Duration>,
    /// When set, every shape call waits for one notification.
    pub gate: Option<Arc<Notify>>,
    pub last_query: Mutex<Option<ShapeQuery>>,
    pub last_location_type: Mutex<Option<LocationType>>,
}

impl FakeComputeApi {
    pub fn new(shapes: Vec<ShapeRecord>, offerings: Vec<ShapeOfferingRecord>) -> Self {
        Self::paged(vec![shapes], vec![offerings])
    }

    pub fn paged(
        shape_pages: Vec<Vec<ShapeRecord>>,
        offering_pages: Vec<Vec<ShapeOfferingRecord>>,
    ) -> Self {
        Self {
            shape_pages: Mutex::new(shape_pages),
            offering_pages: Mutex::new(offering_pages),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn shape_calls(&self) -> usize {
        self.shape_calls.load(Ordering::SeqCst)
    }

    pub fn offering_calls(&self) -> usize {
        self.offering_calls.load(Ordering::SeqCst)
    }

    pub fn set_offerings(&self, offerings: Vec<ShapeOfferingRecord>) {
        *self.offering_pages.lock().unwrap() = vec![offerings];
    }
}

#[async_trait]
impl ComputeApi for FakeComputeApi {
    async fn describe_shapes(
        &self,
        query: &ShapeQuery,
        token: Option<PageToken>,
    ) -> Result<Page<ShapeRecord>, UpstreamError> {
        self.shape_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_shapes.load(Ordering::SeqCst) {
            return Err(UpstreamError::Throttled("RequestLimitExceeded".to_string()));
        }
        let pages = self.shape_pages.lock().unwrap().clone();
        page_of(&pages, token)
    }

    async fn describe_shape_offerings(
        &self,
        location_type: LocationType,
        token: Option<PageToken>,
    ) -> Result<Page<ShapeOfferingRecord>, UpstreamError> {
        self.offering_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_location_type.lock().unwrap() = Some(location_type);
        if self.fail_offerings.load(Ordering::SeqCst) {
            return Err(UpstreamError::Service {
                code: "InternalError".to_string(),
                message: "try again".to_string(),
            });
        }
        let pages = self.offering_pages.lock().unwrap().clone();
        page_of(&pages, token)
    }
}

/// Resolver that returns the same subnets for every selector.
#[derive(Default)]
pub struct FakeResolver {
    pub subnets: Mutex<Vec<Subnet>>,
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeResolver {
    pub fn new(subnets: Vec<Subnet>) -> Self {
        Self {
            subnets: Mutex::new(subnets),
            ..Self::default()
        }
    }

    pub fn in_zones(zones: &[&str]) -> Self {
        Self::new(
            zones
                .iter()
                .enumerate()
                .map(|(i, z)| subnet(&format!("subnet-{i}"), z))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubnetResolver for FakeResolver {
    async fn resolve(&self, _selector: &SelectorValue) -> Result<Vec<Subnet>, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ResolutionError::NoMatchingSubnets);
        }
        Ok(self.subnets.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct FakePricing {
    pub prices: HashMap<String, f64>,
}

impl FakePricing {
    pub fn new(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: prices.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

impl PriceLookup for FakePricing {
    fn on_demand_price(&self, shape: &str) -> Result<f64, PricingError> {
        self.prices
            .get(shape)
            .copied()
            .ok_or_else(|| PricingError::UnknownShape(shape.to_string()))
    }
}
