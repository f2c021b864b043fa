use serde::Serialize;

use super::{
  ProjectionContext,
  bindings::{BindingArena, BindingId},
};
use crate::{
  generator::{
    classifier::AttributeKind,
    error::GenerationResult,
    path::{AccessorStep, PathBinding},
    schema_tree::PropertyNode,
  },
  reserved::{setter_name, to_attribute_name},
};

pub const PLAN_BINDING: &str = "plan";
pub const REQUEST_BODY_BINDING: &str = "requestBody";

/// How a known plan value is written into a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Encode {
  /// Scalar passed to the setter directly.
  Value {
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
  },
  /// String parsed into the SDK enum before it is set.
  Enum { enum_type: String, parser: String },
  /// Nested object built into a fresh SDK value.
  Object {
    model: String,
    sdk_type: String,
    /// Local holding the new SDK value.
    binding: String,
    /// Local holding the decoded plan model.
    model_binding: String,
    steps: Vec<EncodeStep>,
  },
  /// Array encoded element by element; `steps` is empty for scalar elements.
  List {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sdk_type: Option<String>,
    element_kind: AttributeKind,
    /// Local holding one new SDK element.
    element: String,
    /// Local holding one plan element.
    element_source: String,
    steps: Vec<EncodeStep>,
  },
}

/// Set-if-known, for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeStep {
  pub property: String,
  pub attribute: String,
  pub setter: String,
  pub kind: AttributeKind,
  /// Binding the plan value is read from.
  pub source: String,
  /// Binding the setter is called on.
  pub target: String,
  pub encode: Encode,
}

#[cfg(test)]
impl EncodeStep {
  pub fn nested_steps(&self) -> &[EncodeStep] {
    match &self.encode {
      Encode::Object { steps, .. } | Encode::List { steps, .. } => steps,
      Encode::Value { .. } | Encode::Enum { .. } => &[],
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjection {
  pub resource: String,
  pub sdk_type: String,
  /// Accessors to the collection the instance is created in.
  pub chain: Vec<AccessorStep>,
  /// Path parameters filled from plan attributes rather than the body.
  pub path_bound: Vec<PathBinding>,
  pub source: String,
  pub body: String,
  pub steps: Vec<EncodeStep>,
}

#[cfg(test)]
impl CreateProjection {
  pub fn step(&self, property: &str) -> Option<&EncodeStep> {
    self.steps.iter().find(|s| s.property == property)
  }
}

pub(crate) fn project(ctx: &ProjectionContext<'_>) -> GenerationResult<CreateProjection> {
  let mut arena = BindingArena::default();
  let source = arena.root(PLAN_BINDING);
  let body = arena.root(REQUEST_BODY_BINDING);
  let steps = encode_properties(ctx, &ctx.tree.properties, true, source, body, &mut arena)?;

  Ok(CreateProjection {
    resource: ctx.resource.name.clone(),
    sdk_type: ctx.resource.sdk_type.clone(),
    chain: ctx.resource.path.create_chain()?,
    path_bound: ctx.ancestors().cloned().collect(),
    source: PLAN_BINDING.to_string(),
    body: REQUEST_BODY_BINDING.to_string(),
    steps,
  })
}

/// Encodes every writable property of one level.
pub(crate) fn encode_properties(
  ctx: &ProjectionContext<'_>,
  properties: &[PropertyNode],
  top_level: bool,
  source: BindingId,
  target: BindingId,
  arena: &mut BindingArena,
) -> GenerationResult<Vec<EncodeStep>> {
  properties
    .iter()
    .filter(|property| ctx.is_writable(property, top_level))
    .map(|property| encode_property(ctx, property, source, target, arena))
    .collect()
}

pub(crate) fn encode_property(
  ctx: &ProjectionContext<'_>,
  property: &PropertyNode,
  source: BindingId,
  target: BindingId,
  arena: &mut BindingArena,
) -> GenerationResult<EncodeStep> {
  let field = arena.field(source, &property.name);

  let encode = match property.kind {
    AttributeKind::StringEnum => {
      let enum_type = ProjectionContext::enum_type(property);
      Encode::Enum {
        parser: format!("Parse{enum_type}"),
        enum_type,
      }
    }
    AttributeKind::Object => {
      let (model, node) = ctx.model(property)?;
      let binding = arena.local(target, &property.name);
      let model_binding = arena.local(source, &property.name);
      Encode::Object {
        model: model.to_string(),
        sdk_type: ProjectionContext::sdk_type(node),
        binding: arena.name(binding).to_string(),
        model_binding: arena.name(model_binding).to_string(),
        steps: encode_properties(ctx, &node.properties, false, model_binding, binding, arena)?,
      }
    }
    kind if kind.is_array() => encode_list(ctx, property, source, target, arena)?,
    _ => Encode::Value {
      format: property.format.clone(),
    },
  };

  Ok(EncodeStep {
    property: property.name.clone(),
    attribute: to_attribute_name(&property.name),
    setter: setter_name(&property.name),
    kind: property.kind,
    source: arena.name(field).to_string(),
    target: arena.name(target).to_string(),
    encode,
  })
}

fn encode_list(
  ctx: &ProjectionContext<'_>,
  property: &PropertyNode,
  source: BindingId,
  target: BindingId,
  arena: &mut BindingArena,
) -> GenerationResult<Encode> {
  let element = arena.local(target, &format!("{}Element", property.name));
  let element_source = arena.local(source, &format!("{}Element", property.name));

  let (model, sdk_type, steps) = match property.kind {
    AttributeKind::ArrayOfObject => {
      let (model, node) = ctx.model(property)?;
      (
        Some(model.to_string()),
        Some(ProjectionContext::sdk_type(node)),
        encode_properties(ctx, &node.properties, false, element_source, element, arena)?,
      )
    }
    _ => (None, None, vec![]),
  };

  Ok(Encode::List {
    model,
    sdk_type,
    element_kind: property.kind.element_kind().unwrap_or(property.kind),
    element: arena.name(element).to_string(),
    element_source: arena.name(element_source).to_string(),
    steps,
  })
}
