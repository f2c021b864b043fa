use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use super::{
  ProjectionContext,
  bindings::{BindingArena, BindingId},
};
use crate::{
  generator::{
    classifier::AttributeKind,
    error::GenerationResult,
    path::AccessorStep,
    schema_tree::PropertyNode,
  },
  reserved::{getter_name, to_attribute_name},
};

pub const RESPONSE_BINDING: &str = "response";
pub const STATE_BINDING: &str = "state";

/// How a present SDK value is turned into state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Decode {
  /// Scalar assigned directly.
  Value {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
  },
  /// Enum rendered through its string form.
  Enum {
    enum_type: String,
  },
  /// Nested object decoded into a fresh model value.
  Object {
    model: String,
    /// Local holding the SDK value.
    binding: String,
    /// Local holding the model value under construction.
    target: String,
    steps: Vec<DecodeStep>,
  },
  /// Array decoded element by element; `steps` is empty for scalar elements.
  List {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    element_kind: AttributeKind,
    /// Local holding the SDK collection.
    collection: String,
    /// Local holding one SDK element.
    element: String,
    /// Local holding one model element under construction.
    element_target: String,
    steps: Vec<DecodeStep>,
  },
}

/// Check-for-presence then assign, for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeStep {
  pub property: String,
  pub attribute: String,
  pub getter: String,
  pub kind: AttributeKind,
  /// Binding the getter is called on.
  pub source: String,
  /// Binding the decoded value is assigned to.
  pub target: String,
  pub decode: Decode,
}

#[cfg(test)]
impl DecodeStep {
  pub fn nested_steps(&self) -> &[DecodeStep] {
    match &self.decode {
      Decode::Object { steps, .. } | Decode::List { steps, .. } => steps,
      Decode::Value { .. } | Decode::Enum { .. } => &[],
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadProjection {
  pub resource: String,
  pub sdk_type: String,
  pub chain: Vec<AccessorStep>,
  /// Attributes that can identify the instance: the primary key first, then alternates.
  pub lookups: Vec<String>,
  /// `$select` fields to request, sorted.
  pub select: Vec<String>,
  pub source: String,
  pub target: String,
  pub steps: Vec<DecodeStep>,
}

#[cfg(test)]
impl ReadProjection {
  pub fn step(&self, property: &str) -> Option<&DecodeStep> {
    self.steps.iter().find(|s| s.property == property)
  }
}

pub(crate) fn project(ctx: &ProjectionContext<'_>) -> GenerationResult<ReadProjection> {
  let mut arena = BindingArena::default();
  let source = arena.root(RESPONSE_BINDING);
  let target = arena.root(STATE_BINDING);
  let steps = decode_properties(ctx, &ctx.tree.properties, source, target, &mut arena)?;

  let mut lookups = ctx.own_key().map(|key| vec![key.attribute.clone()]).unwrap_or_default();
  lookups.extend(ctx.resource.augment.alt_lookups.iter().map(String::as_str).map(to_attribute_name));

  let top_level = ctx.tree.properties.iter().map(|p| p.name.as_str()).collect::<BTreeSet<_>>();
  let select = ctx
    .resource
    .operations
    .select_fields
    .iter()
    .filter(|field| top_level.contains(field.as_str()))
    .cloned()
    .sorted()
    .dedup()
    .collect();

  Ok(ReadProjection {
    resource: ctx.resource.name.clone(),
    sdk_type: ctx.resource.sdk_type.clone(),
    chain: ctx.resource.path.read_chain(),
    lookups,
    select,
    source: RESPONSE_BINDING.to_string(),
    target: STATE_BINDING.to_string(),
    steps,
  })
}

fn decode_properties(
  ctx: &ProjectionContext<'_>,
  properties: &[PropertyNode],
  source: BindingId,
  target: BindingId,
  arena: &mut BindingArena,
) -> GenerationResult<Vec<DecodeStep>> {
  properties
    .iter()
    .map(|property| decode_property(ctx, property, source, target, arena))
    .collect()
}

fn decode_property(
  ctx: &ProjectionContext<'_>,
  property: &PropertyNode,
  source: BindingId,
  target: BindingId,
  arena: &mut BindingArena,
) -> GenerationResult<DecodeStep> {
  let field = arena.field(target, &property.name);

  let decode = match property.kind {
    AttributeKind::StringEnum => Decode::Enum {
      enum_type: ProjectionContext::enum_type(property),
    },
    AttributeKind::Object => {
      let (model, node) = ctx.model(property)?;
      let binding = arena.local(source, &property.name);
      let nested_target = arena.local(target, &property.name);
      Decode::Object {
        model: model.to_string(),
        binding: arena.name(binding).to_string(),
        target: arena.name(nested_target).to_string(),
        steps: decode_properties(ctx, &node.properties, binding, nested_target, arena)?,
      }
    }
    kind if kind.is_array() => decode_list(ctx, property, source, target, arena)?,
    _ => Decode::Value {
      format: property.format.clone(),
    },
  };

  Ok(DecodeStep {
    property: property.name.clone(),
    attribute: to_attribute_name(&property.name),
    getter: getter_name(&property.name),
    kind: property.kind,
    source: arena.name(source).to_string(),
    target: arena.name(field).to_string(),
    decode,
  })
}

fn decode_list(
  ctx: &ProjectionContext<'_>,
  property: &PropertyNode,
  source: BindingId,
  target: BindingId,
  arena: &mut BindingArena,
) -> GenerationResult<Decode> {
  let collection = arena.local(source, &property.name);
  let element = arena.local(collection, "element");
  let element_target = arena.local(target, &format!("{}Element", property.name));

  let (model, steps) = match property.kind {
    AttributeKind::ArrayOfObject => {
      let (model, node) = ctx.model(property)?;
      (
        Some(model.to_string()),
        decode_properties(ctx, &node.properties, element, element_target, arena)?,
      )
    }
    _ => (None, vec![]),
  };

  Ok(Decode::List {
    model,
    element_kind: property.kind.element_kind().unwrap_or(property.kind),
    collection: arena.name(collection).to_string(),
    element: arena.name(element).to_string(),
    element_target: arena.name(element_target).to_string(),
    steps,
  })
}
