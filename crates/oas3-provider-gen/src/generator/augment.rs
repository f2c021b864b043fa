use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Per-resource overrides layered on top of the derived projections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Augment {
  /// Top-level properties to drop in addition to metadata and navigation properties.
  pub exclude_properties: Vec<String>,
  /// Attributes that may stand in for the primary key when reading.
  pub alt_lookups: Vec<String>,
  /// Properties forced Optional+Computed in the read-only view.
  pub data_source_optional: Vec<String>,
  /// Properties forced Computed in the managed resource.
  pub resource_computed: Vec<String>,
}

impl Augment {
  pub fn is_alt_lookup(&self, attribute: &str) -> bool {
    self.alt_lookups.iter().any(|a| a == attribute)
  }

  pub fn is_data_source_optional(&self, property: &str) -> bool {
    self.data_source_optional.iter().any(|p| p == property)
  }

  pub fn is_resource_computed(&self, property: &str) -> bool {
    self.resource_computed.iter().any(|p| p == property)
  }
}

/// Augments keyed by resource path template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AugmentSet(BTreeMap<String, Augment>);

impl AugmentSet {
  /// Parses an augment document, reporting the JSON path of any mismatch.
  pub fn from_json(json: &str) -> anyhow::Result<Self> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(deserializer).map_err(|error| {
      let path = error.path().to_string();
      anyhow::anyhow!("{} at '{path}'", error.into_inner())
    })
  }

  pub async fn load(path: &Path) -> anyhow::Result<Self> {
    let contents = tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("Failed to read augment file {}", path.display()))?;
    Self::from_json(&contents).with_context(|| format!("Failed to parse augment file {}", path.display()))
  }

  pub fn for_path(&self, path: &str) -> Option<&Augment> {
    self.0.get(path)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
impl AugmentSet {
  pub fn insert(&mut self, path: impl Into<String>, augment: Augment) {
    self.0.insert(path.into(), augment);
  }
}
