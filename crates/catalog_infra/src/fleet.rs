//! Fleet-provisioning error payloads.
//!
//! A fleet launch reports one error per (shape, zone) override it could not
//! place. Capacity errors among them become [`CapacityRejection`]s for
//! `OfferingCatalog::report_unavailable`; the purchase class comes from the
//! launch request, not from the error.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use catalog_core::CapacityRejection;
use catalog_core::shape::PurchaseClass;

/// Error codes meaning "no capacity for this offering right now".
pub const UNFULFILLABLE_CAPACITY_ERROR_CODES: &[&str] = &[
    "InsufficientInstanceCapacity",
    "MaxSpotInstanceCountExceeded",
    "VcpuLimitExceeded",
    "UnfulfillableCapacity",
    "Unsupported",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetErrorParse {
    #[error("fleet error {error_code} carries no shape override")]
    MissingShape { error_code: String },
    #[error("fleet error {error_code} carries no zone override")]
    MissingZone { error_code: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FleetError {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub launch_template_and_overrides: Option<LaunchTemplateAndOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchTemplateAndOverrides {
    #[serde(default)]
    pub overrides: Option<FleetOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FleetOverrides {
    #[serde(rename = "InstanceType", default)]
    pub shape: Option<String>,
    #[serde(rename = "AvailabilityZone", default)]
    pub zone: Option<String>,
}

impl FleetError {
    pub fn is_capacity_error(&self) -> bool {
        UNFULFILLABLE_CAPACITY_ERROR_CODES.contains(&self.error_code.as_str())
    }

    fn overrides(&self) -> Option<&FleetOverrides> {
        self.launch_template_and_overrides
            .as_ref()
            .and_then(|l| l.overrides.as_ref())
    }

    /// The offering this error rejected, attributed to `purchase_class`.
    pub fn to_rejection(
        &self,
        purchase_class: PurchaseClass,
    ) -> Result<CapacityRejection, FleetErrorParse> {
        let overrides = self.overrides();
        let shape = overrides
            .and_then(|o| o.shape.clone())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FleetErrorParse::MissingShape {
                error_code: self.error_code.clone(),
            })?;
        let zone = overrides
            .and_then(|o| o.zone.clone())
            .filter(|z| !z.is_empty())
            .ok_or_else(|| FleetErrorParse::MissingZone {
                error_code: self.error_code.clone(),
            })?;
        Ok(CapacityRejection {
            shape,
            zone,
            purchase_class,
            error_code: self.error_code.clone(),
        })
    }
}

/// Rejections for every capacity error in `errors` that names an offering.
///
/// Non-capacity errors and errors without a (shape, zone) are skipped.
pub fn capacity_rejections(
    errors: &[FleetError],
    purchase_class: PurchaseClass,
) -> Vec<CapacityRejection> {
    errors
        .iter()
        .filter(|e| e.is_capacity_error())
        .filter_map(|e| match e.to_rejection(purchase_class) {
            Ok(rejection) => Some(rejection),
            Err(err) => {
                trace!(error = %err, "skipping fleet error");
                None
            }
        })
        .collect()
}
