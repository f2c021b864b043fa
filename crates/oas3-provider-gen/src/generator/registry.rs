use indexmap::IndexMap;
use serde::Serialize;

use super::{
  error::{GenerationError, GenerationResult},
  schema_tree::SchemaNode,
};
use crate::reserved::to_type_name;

/// Canonical nested-model names mapped to their shapes, in registration order.
///
/// Scoped to one resource: built by [`ModelDeduplicator`] and dropped with the
/// resource's output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelRegistry {
  models: IndexMap<String, SchemaNode>,
}

impl ModelRegistry {
  pub fn get(&self, name: &str) -> Option<&SchemaNode> {
    self.models.get(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.models.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.models.len()
  }

  pub fn is_empty(&self) -> bool {
    self.models.is_empty()
  }
}

#[cfg(test)]
impl ModelRegistry {
  pub fn contains(&self, name: &str) -> bool {
    self.models.contains_key(name)
  }
}

/// Names nested object shapes and collapses repeats into shared models.
pub(crate) struct ModelDeduplicator<'a> {
  owner: &'a str,
}

impl<'a> ModelDeduplicator<'a> {
  /// `owner` is the owning resource's type name; every model name starts with it.
  pub(crate) fn new(owner: &'a str) -> Self {
    Self { owner }
  }

  pub(crate) fn canonical_name(&self, title: &str) -> String {
    format!("{}{}", self.owner, to_type_name(title))
  }

  /// Assigns model names throughout `tree` and returns the registry of distinct shapes.
  ///
  /// Both passes walk pre-order in sorted property order, so the same tree
  /// always yields the same names in the same registration order.
  pub(crate) fn deduplicate(&self, tree: &mut SchemaNode) -> GenerationResult<ModelRegistry> {
    self.assign(tree);
    let mut registry = ModelRegistry::default();
    self.register(tree, &mut registry)?;
    Ok(registry)
  }

  fn assign(&self, node: &mut SchemaNode) {
    for property in &mut node.properties {
      let Some(nested) = property.object_of.as_deref_mut() else {
        continue;
      };
      if property.kind.carries_model() {
        property.model = Some(self.canonical_name(&nested.title));
        self.assign(nested);
      }
    }
  }

  fn register(&self, node: &SchemaNode, registry: &mut ModelRegistry) -> GenerationResult<()> {
    for property in &node.properties {
      let (Some(name), Some(nested)) = (&property.model, property.nested()) else {
        continue;
      };

      if let Some(existing) = registry.models.get(name) {
        if existing.same_shape(nested) {
          continue;
        }
        return Err(GenerationError::ModelNameCollision {
          name: name.clone(),
          existing: existing.summary(),
          incoming: nested.summary(),
        });
      }

      registry.models.insert(name.clone(), nested.clone());
      self.register(nested, registry)?;
    }
    Ok(())
  }
}
