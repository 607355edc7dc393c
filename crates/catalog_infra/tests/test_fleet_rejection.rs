//! Fleet error payloads to capacity rejections.

use catalog_core::shape::PurchaseClass;
use catalog_infra::fleet::{FleetError, FleetErrorParse, capacity_rejections};

const FLEET_ERRORS_JSON: &str = r#"
[
    {
        "ErrorCode": "InsufficientInstanceCapacity",
        "ErrorMessage": "We currently do not have sufficient p4de.24xlarge capacity.",
        "LaunchTemplateAndOverrides": {
            "Overrides": {"InstanceType": "p4de.24xlarge", "AvailabilityZone": "us-east-1a"}
        }
    },
    {
        "ErrorCode": "UnfulfillableCapacity",
        "LaunchTemplateAndOverrides": {
            "Overrides": {"InstanceType": "m5.large", "AvailabilityZone": "us-east-1b"}
        }
    },
    {
        "ErrorCode": "InvalidLaunchTemplateName.NotFoundException",
        "LaunchTemplateAndOverrides": {
            "Overrides": {"InstanceType": "m5.large", "AvailabilityZone": "us-east-1c"}
        }
    },
    {
        "ErrorCode": "InsufficientInstanceCapacity",
        "LaunchTemplateAndOverrides": {"Overrides": {"InstanceType": "c5.large"}}
    }
]
"#;

fn fleet_errors() -> Vec<FleetError> {
    serde_json::from_str(FLEET_ERRORS_JSON).unwrap()
}

#[test]
fn test_capacity_errors_become_rejections() {
    let rejections = capacity_rejections(&fleet_errors(), PurchaseClass::Spot);

    assert_eq!(rejections.len(), 2);
    assert_eq!(rejections[0].shape, "p4de.24xlarge");
    assert_eq!(rejections[0].zone, "us-east-1a");
    assert_eq!(rejections[0].purchase_class, PurchaseClass::Spot);
    assert_eq!(rejections[0].error_code, "InsufficientInstanceCapacity");
    assert_eq!(rejections[1].shape, "m5.large");
    assert_eq!(rejections[1].zone, "us-east-1b");
}

#[test]
fn test_non_capacity_error_is_not_classified() {
    let errors = fleet_errors();
    assert!(errors[0].is_capacity_error());
    assert!(!errors[2].is_capacity_error());
}

#[test]
fn test_purchase_class_comes_from_caller() {
    let errors = fleet_errors();
    let rejection = errors[0].to_rejection(PurchaseClass::OnDemand).unwrap();
    assert_eq!(rejection.purchase_class, PurchaseClass::OnDemand);
}

#[test]
fn test_missing_zone_is_reported() {
    let errors = fleet_errors();
    let err = errors[3].to_rejection(PurchaseClass::Spot).unwrap_err();
    assert_eq!(
        err,
        FleetErrorParse::MissingZone {
            error_code: "InsufficientInstanceCapacity".to_string()
        }
    );
}

#[test]
fn test_missing_overrides_is_reported() {
    let error: FleetError =
        serde_json::from_str(r#"{"ErrorCode": "InsufficientInstanceCapacity"}"#).unwrap();
    assert!(matches!(
        error.to_rejection(PurchaseClass::Spot),
        Err(FleetErrorParse::MissingShape { .. })
    ));
}
