//! Catalog configuration defaults and settings conversion.

use std::time::Duration;

use catalog_core::cache::ZoneOverride;
use catalog_infra::config::{
    ALL_PARAMS, CatalogSettings, ConfigError, ConfigParam, MAX_DURATION_S, default_value,
    param_name, resolve_config_value, resolve_duration,
};

// --- Defaults apply when values are missing ---

#[test]
fn test_missing_catalog_ttl_applies_default_300() {
    let result = resolve_config_value(ConfigParam::CatalogTtlS, None);
    assert_eq!(result.unwrap(), 300.0);
}

#[test]
fn test_missing_unavailable_offering_ttl_applies_default_180() {
    let result = resolve_config_value(ConfigParam::UnavailableOfferingTtlS, None);
    assert_eq!(result.unwrap(), 180.0);
}

#[test]
fn test_missing_sweep_interval_applies_default_600() {
    let result = resolve_duration(ConfigParam::CacheSweepIntervalS, None);
    assert_eq!(result.unwrap(), Duration::from_secs(600));
}

#[test]
fn test_all_params_resolve_through_resolver() {
    for &param in ALL_PARAMS {
        let resolved = resolve_config_value(param, None).unwrap();
        assert_eq!(resolved, default_value(param), "{}", param_name(param));
    }
}

// --- Explicit values ---

#[test]
fn test_explicit_value_takes_precedence() {
    let result = resolve_config_value(ConfigParam::ZoneTtlS, Some(42.5));
    assert_eq!(result.unwrap(), 42.5);
}

#[test]
fn test_explicit_zero_is_allowed() {
    let result = resolve_config_value(ConfigParam::CatalogTtlS, Some(0.0));
    assert_eq!(result.unwrap(), 0.0);
}

#[test]
fn test_non_finite_value_rejected() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = resolve_config_value(ConfigParam::ZoneTtlS, Some(bad)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("zone_ttl_s"), "error must identify the parameter: {msg}");
        assert!(msg.contains("non-finite"), "{msg}");
    }
}

#[test]
fn test_negative_value_rejected() {
    let err = resolve_config_value(ConfigParam::CatalogTtlS, Some(-1.0)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            param_name: "catalog_ttl_s",
            ..
        }
    ));
}

#[test]
fn test_out_of_range_duration_rejected() {
    let err = resolve_duration(ConfigParam::UpstreamTimeoutS, Some(1e300)).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_duration_unrepresentable_as_deadline_rejected() {
    // Representable as a Duration, but `now + ttl` would overflow.
    let err = resolve_duration(ConfigParam::CatalogTtlS, Some(1e19)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            param_name: "catalog_ttl_s",
            reason: "is out of range for a duration",
        }
    ));
}

#[test]
fn test_ten_year_duration_accepted() {
    let resolved = resolve_duration(ConfigParam::ZoneTtlS, Some(MAX_DURATION_S)).unwrap();
    assert_eq!(resolved, Duration::from_secs(315_360_000));
    assert!(resolve_duration(ConfigParam::ZoneTtlS, Some(MAX_DURATION_S + 1.0)).is_err());
}

// --- CatalogSettings ---

#[test]
fn test_empty_settings_yield_defaults() {
    let config = CatalogSettings::from_json_str("{}")
        .unwrap()
        .into_catalog_config()
        .unwrap();

    assert_eq!(config.catalog_ttl, Duration::from_secs(300));
    assert_eq!(config.zone_ttl, Duration::from_secs(300));
    assert_eq!(config.unavailable_offering_ttl, Duration::from_secs(180));
    assert_eq!(config.sweep_interval, Duration::from_secs(600));
    assert_eq!(config.upstream_timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.shape_filter.blocked_family_prefixes, vec!["g2"]);
    assert_eq!(
        config.zone_overrides,
        vec![ZoneOverride::new("p4de.24xlarge", "us-east-1d")]
    );
    assert_eq!(config.shape_query.virtualization_types, vec!["hvm"]);
    assert_eq!(config.shape_query.architectures, vec!["x86_64", "arm64"]);
}

#[test]
fn test_settings_override_everything() {
    let raw = r#"{
        "catalog_ttl_s": 60,
        "zone_ttl_s": 90.5,
        "unavailable_offering_ttl_s": 30,
        "cache_sweep_interval_s": 120,
        "upstream_timeout_s": 5,
        "blocked_family_prefixes": ["g2", "p2"],
        "zone_overrides": [{"shape": "trn1.32xlarge", "zone": "us-west-2d"}],
        "architectures": ["arm64"]
    }"#;

    let config = CatalogSettings::from_json_str(raw)
        .unwrap()
        .into_catalog_config()
        .unwrap();

    assert_eq!(config.catalog_ttl, Duration::from_secs(60));
    assert_eq!(config.zone_ttl, Duration::from_millis(90_500));
    assert_eq!(config.unavailable_offering_ttl, Duration::from_secs(30));
    assert_eq!(config.sweep_interval, Duration::from_secs(120));
    assert_eq!(config.upstream_timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.shape_filter.blocked_family_prefixes, vec!["g2", "p2"]);
    assert_eq!(
        config.zone_overrides,
        vec![ZoneOverride::new("trn1.32xlarge", "us-west-2d")]
    );
    assert_eq!(config.shape_query.virtualization_types, vec!["hvm"]);
    assert_eq!(config.shape_query.architectures, vec!["arm64"]);
}

#[test]
fn test_empty_override_list_disables_overrides() {
    let config = CatalogSettings::from_json_str(r#"{"zone_overrides": []}"#)
        .unwrap()
        .into_catalog_config()
        .unwrap();
    assert!(config.zone_overrides.is_empty());
}

#[test]
fn test_zero_upstream_timeout_means_unbounded() {
    let settings = CatalogSettings {
        upstream_timeout_s: Some(0.0),
        ..CatalogSettings::default()
    };
    assert_eq!(settings.into_catalog_config().unwrap().upstream_timeout, None);
}

#[test]
fn test_zero_sweep_interval_rejected() {
    let settings = CatalogSettings {
        cache_sweep_interval_s: Some(0.0),
        ..CatalogSettings::default()
    };
    let err = settings.into_catalog_config().unwrap_err();
    assert!(err.to_string().contains("cache_sweep_interval_s"));
}

#[test]
fn test_invalid_numeric_setting_fails_conversion() {
    let settings = CatalogSettings {
        unavailable_offering_ttl_s: Some(-5.0),
        ..CatalogSettings::default()
    };
    let err = settings.into_catalog_config().unwrap_err();
    assert!(err.to_string().contains("unavailable_offering_ttl_s"));
}

#[test]
fn test_blank_override_rejected() {
    let raw = r#"{"zone_overrides": [{"shape": "p4de.24xlarge", "zone": ""}]}"#;
    let err = CatalogSettings::from_json_str(raw)
        .unwrap()
        .into_catalog_config()
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyOverride { .. }));
}

#[test]
fn test_blank_prefix_rejected() {
    let raw = r#"{"blocked_family_prefixes": ["g2", ""]}"#;
    let err = CatalogSettings::from_json_str(raw)
        .unwrap()
        .into_catalog_config()
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPrefix));
}

#[test]
fn test_unknown_setting_is_a_parse_error() {
    let err = CatalogSettings::from_json_str(r#"{"catalog_ttl": 60}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_huge_ttl_setting_fails_conversion() {
    let err = CatalogSettings::from_json_str(r#"{"catalog_ttl_s": 1e19}"#)
        .unwrap()
        .into_catalog_config()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("catalog_ttl_s"), "{msg}");
    assert!(msg.contains("out of range"), "{msg}");
}

#[test]
fn test_huge_upstream_timeout_setting_fails_conversion() {
    let err = CatalogSettings::from_json_str(r#"{"upstream_timeout_s": 1e19}"#)
        .unwrap()
        .into_catalog_config()
        .unwrap_err();
    assert!(err.to_string().contains("upstream_timeout_s"));
}
