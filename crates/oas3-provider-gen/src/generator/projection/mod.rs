//! Projections of a deduplicated schema tree into the node trees the renderer consumes.
//!
//! Schema, Read, Create and Update are independent walks over the same tree;
//! they share the model registry, the path bindings and the attribute-kind
//! dispatch, all reached through [`ProjectionContext`].

pub(crate) mod bindings;
pub mod create;
pub mod read;
pub mod schema;
pub mod update;

#[cfg(test)]
mod tests;

use super::{
  error::{GenerationError, GenerationResult},
  path::PathBinding,
  registry::ModelRegistry,
  resource::ResourceDescriptor,
  schema_tree::{PropertyNode, SchemaNode},
};
use crate::reserved::{to_attribute_name, to_type_name};

/// Shared, read-only inputs of the four projections for one resource.
pub(crate) struct ProjectionContext<'a> {
  pub resource: &'a ResourceDescriptor,
  pub tree: &'a SchemaNode,
  pub registry: &'a ModelRegistry,
  bindings: Vec<PathBinding>,
}

impl<'a> ProjectionContext<'a> {
  pub(crate) fn new(resource: &'a ResourceDescriptor, tree: &'a SchemaNode, registry: &'a ModelRegistry) -> Self {
    Self {
      resource,
      tree,
      registry,
      bindings: resource.path.bindings(),
    }
  }

  /// The registered model a nested property projects to.
  pub(crate) fn model<'p>(&self, property: &'p PropertyNode) -> GenerationResult<(&'p str, &'a SchemaNode)> {
    property
      .model
      .as_deref()
      .and_then(|name| self.registry.get(name).map(|node| (name, node)))
      .ok_or_else(|| GenerationError::MissingModel {
        property: property.name.clone(),
      })
  }

  /// Client SDK enum type of a `StringEnum` property.
  pub(crate) fn enum_type(property: &PropertyNode) -> String {
    to_type_name(property.nested().map_or(property.name.as_str(), |node| node.title.as_str()))
  }

  pub(crate) fn enum_values(property: &PropertyNode) -> Vec<String> {
    property.nested().map(|node| node.enum_values.clone()).unwrap_or_default()
  }

  /// Client SDK type of a nested object property.
  pub(crate) fn sdk_type(node: &SchemaNode) -> String {
    to_type_name(&node.title)
  }

  pub(crate) fn own_key(&self) -> Option<&PathBinding> {
    self.bindings.iter().find(|b| b.own_key)
  }

  pub(crate) fn ancestors(&self) -> impl Iterator<Item = &PathBinding> {
    self.bindings.iter().filter(|b| !b.own_key)
  }

  /// True when a top-level property is supplied by a path parameter.
  pub(crate) fn is_path_bound(&self, property: &PropertyNode) -> bool {
    let attribute = to_attribute_name(&property.name);
    self.bindings.iter().any(|b| b.attribute == attribute)
  }

  /// True when the client may send a value for the property in a request body.
  pub(crate) fn is_writable(&self, property: &PropertyNode, top_level: bool) -> bool {
    if property.read_only {
      return false;
    }
    !top_level || !(self.is_path_bound(property) || self.resource.augment.is_resource_computed(&property.name))
  }
}
