//! Static subnet table resolved by tag match.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use catalog_core::selector::SelectorValue;
use catalog_core::upstream::{ResolutionError, Subnet, SubnetResolver};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaggedSubnet {
    pub id: String,
    pub zone: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl TaggedSubnet {
    /// `*` matches any value of a present key.
    fn matches(&self, required: &[(&str, &str)]) -> bool {
        required.iter().all(|&(key, want)| match self.tags.get(key) {
            Some(have) => want == "*" || have == want,
            None => false,
        })
    }
}

/// Tag requirements of a selector: a flat map of string values.
fn required_tags(selector: &SelectorValue) -> Result<Vec<(&str, &str)>, ResolutionError> {
    let SelectorValue::Map(entries) = selector else {
        return Err(ResolutionError::UnsupportedSelector(
            "expected a map of tag names to values".to_string(),
        ));
    };
    if let Some(key) = entries
        .iter()
        .find(|(_, v)| !matches!(v, SelectorValue::String(_)))
        .map(|(k, _)| k)
    {
        return Err(ResolutionError::UnsupportedSelector(format!(
            "tag {key:?} must have a string value"
        )));
    }
    Ok(selector.string_entries())
}

/// Resolves a selector against a fixed subnet list.
///
/// The selector must be a map of tag names to string values; every entry
/// must match a subnet tag. An empty map matches every subnet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StaticSubnetTable {
    subnets: Vec<TaggedSubnet>,
}

impl StaticSubnetTable {
    pub fn new(subnets: Vec<TaggedSubnet>) -> Self {
        Self { subnets }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn matching(&self, selector: &SelectorValue) -> Result<Vec<Subnet>, ResolutionError> {
        let required = required_tags(selector)?;
        Ok(self
            .subnets
            .iter()
            .filter(|s| s.matches(&required))
            .map(|s| Subnet {
                id: s.id.clone(),
                zone: s.zone.clone(),
            })
            .collect())
    }
}

/// Non-map selectors and non-string tag values are rejected with
/// [`ResolutionError::UnsupportedSelector`] rather than ignored.
#[async_trait]
impl SubnetResolver for StaticSubnetTable {
    async fn resolve(&self, selector: &SelectorValue) -> Result<Vec<Subnet>, ResolutionError> {
        let subnets = self.matching(selector)?;
        if subnets.is_empty() {
            return Err(ResolutionError::NoMatchingSubnets);
        }
        Ok(subnets)
    }
}
