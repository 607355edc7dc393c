//! Catalog configuration defaults and resolution.
//!
//! Every tunable has a documented default. A missing value takes its
//! default; an explicit value that is non-finite or negative is rejected
//! rather than silently replaced.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use catalog_core::CatalogConfig;
use catalog_core::cache::ZoneOverride;

/// Numeric catalog tunables, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    // Cache lifetimes
    CatalogTtlS,
    ZoneTtlS,
    UnavailableOfferingTtlS,

    // Background work
    CacheSweepIntervalS,

    // Upstream calls
    UpstreamTimeoutS,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config rejected: '{param_name}' {reason}")]
    Invalid {
        param_name: &'static str,
        reason: &'static str,
    },
    #[error("config rejected: zone override {shape:?}/{zone:?} has an empty field")]
    EmptyOverride { shape: String, zone: String },
    #[error("config rejected: empty blocked family prefix")]
    EmptyPrefix,
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returns the documented default for a parameter.
pub fn default_value(param: ConfigParam) -> f64 {
    match param {
        ConfigParam::CatalogTtlS => 300.0,
        ConfigParam::ZoneTtlS => 300.0,
        ConfigParam::UnavailableOfferingTtlS => 180.0,
        ConfigParam::CacheSweepIntervalS => 600.0,
        ConfigParam::UpstreamTimeoutS => 30.0,
    }
}

/// Returns the snake_case name for a parameter, as it appears in settings JSON.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::CatalogTtlS => "catalog_ttl_s",
        ConfigParam::ZoneTtlS => "zone_ttl_s",
        ConfigParam::UnavailableOfferingTtlS => "unavailable_offering_ttl_s",
        ConfigParam::CacheSweepIntervalS => "cache_sweep_interval_s",
        ConfigParam::UpstreamTimeoutS => "upstream_timeout_s",
    }
}

/// Expected number of ConfigParam variants. Update when adding new variants.
pub const EXPECTED_PARAM_COUNT: usize = 5;

/// All known `ConfigParam` variants.
pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::CatalogTtlS,
    ConfigParam::ZoneTtlS,
    ConfigParam::UnavailableOfferingTtlS,
    ConfigParam::CacheSweepIntervalS,
    ConfigParam::UpstreamTimeoutS,
];

/// Resolve a configuration value.
///
/// - `Some(v)` wins if finite and non-negative; otherwise `Err`.
/// - `None` resolves to the parameter's default.
pub fn resolve_config_value(param: ConfigParam, value: Option<f64>) -> Result<f64, ConfigError> {
    let Some(v) = value else {
        return Ok(default_value(param));
    };
    if !v.is_finite() {
        return Err(ConfigError::Invalid {
            param_name: param_name(param),
            reason: "is non-finite (NaN or Infinity)",
        });
    }
    if v < 0.0 {
        return Err(ConfigError::Invalid {
            param_name: param_name(param),
            reason: "is negative",
        });
    }
    Ok(v)
}

/// Longest accepted duration setting: ten years.
pub const MAX_DURATION_S: f64 = 10.0 * 365.0 * 24.0 * 60.0 * 60.0;

/// Resolve a parameter straight to a `Duration`.
///
/// Values above [`MAX_DURATION_S`] are rejected; deadlines are computed as
/// `now + duration` and must stay representable.
pub fn resolve_duration(param: ConfigParam, value: Option<f64>) -> Result<Duration, ConfigError> {
    let secs = resolve_config_value(param, value)?;
    if secs > MAX_DURATION_S {
        return Err(ConfigError::Invalid {
            param_name: param_name(param),
            reason: "is out of range for a duration",
        });
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::Invalid {
        param_name: param_name(param),
        reason: "is out of range for a duration",
    })
}

/// Catalog settings as deployed, typically loaded from JSON.
///
/// Every field is optional. Omitted numeric fields take their
/// [`default_value`]; omitted lists take the catalog's built-in policy.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSettings {
    #[serde(default)]
    pub catalog_ttl_s: Option<f64>,
    #[serde(default)]
    pub zone_ttl_s: Option<f64>,
    #[serde(default)]
    pub unavailable_offering_ttl_s: Option<f64>,
    #[serde(default)]
    pub cache_sweep_interval_s: Option<f64>,
    /// Zero disables the bound.
    #[serde(default)]
    pub upstream_timeout_s: Option<f64>,
    #[serde(default)]
    pub blocked_family_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub zone_overrides: Option<Vec<ZoneOverride>>,
    #[serde(default)]
    pub virtualization_types: Option<Vec<String>>,
    #[serde(default)]
    pub architectures: Option<Vec<String>>,
}

impl CatalogSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn value(&self, param: ConfigParam) -> Option<f64> {
        match param {
            ConfigParam::CatalogTtlS => self.catalog_ttl_s,
            ConfigParam::ZoneTtlS => self.zone_ttl_s,
            ConfigParam::UnavailableOfferingTtlS => self.unavailable_offering_ttl_s,
            ConfigParam::CacheSweepIntervalS => self.cache_sweep_interval_s,
            ConfigParam::UpstreamTimeoutS => self.upstream_timeout_s,
        }
    }

    /// Validate and convert into the core catalog configuration.
    pub fn into_catalog_config(self) -> Result<CatalogConfig, ConfigError> {
        let duration = |param| resolve_duration(param, self.value(param));

        let sweep_interval = duration(ConfigParam::CacheSweepIntervalS)?;
        if sweep_interval.is_zero() {
            return Err(ConfigError::Invalid {
                param_name: param_name(ConfigParam::CacheSweepIntervalS),
                reason: "must be positive",
            });
        }
        let upstream_timeout =
            Some(duration(ConfigParam::UpstreamTimeoutS)?).filter(|t| !t.is_zero());

        let mut config = CatalogConfig {
            catalog_ttl: duration(ConfigParam::CatalogTtlS)?,
            zone_ttl: duration(ConfigParam::ZoneTtlS)?,
            unavailable_offering_ttl: duration(ConfigParam::UnavailableOfferingTtlS)?,
            sweep_interval,
            upstream_timeout,
            ..CatalogConfig::default()
        };

        if let Some(prefixes) = self.blocked_family_prefixes {
            if prefixes.iter().any(|p| p.is_empty()) {
                return Err(ConfigError::EmptyPrefix);
            }
            config.shape_filter.blocked_family_prefixes = prefixes;
        }
        if let Some(overrides) = self.zone_overrides {
            let blank = overrides
                .iter()
                .find(|o| o.shape.is_empty() || o.zone.is_empty());
            if let Some(bad) = blank {
                return Err(ConfigError::EmptyOverride {
                    shape: bad.shape.clone(),
                    zone: bad.zone.clone(),
                });
            }
            config.zone_overrides = overrides;
        }
        if let Some(types) = self.virtualization_types {
            config.shape_query.virtualization_types = types;
        }
        if let Some(archs) = self.architectures {
            config.shape_query.architectures = archs;
        }
        Ok(config)
    }
}
