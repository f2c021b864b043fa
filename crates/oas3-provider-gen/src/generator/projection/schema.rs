use serde::Serialize;
use strum::Display;

use super::ProjectionContext;
use crate::{
  generator::{
    classifier::AttributeKind,
    error::GenerationResult,
    resource::BehaviorMode,
    schema_tree::{PropertyNode, SchemaNode},
  },
  reserved::to_attribute_name,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttributeFlags {
  pub required: bool,
  pub optional: bool,
  pub computed: bool,
}

impl AttributeFlags {
  pub const REQUIRED: Self = Self {
    required: true,
    optional: false,
    computed: false,
  };
  pub const COMPUTED: Self = Self {
    required: false,
    optional: false,
    computed: true,
  };
  pub const OPTIONAL_COMPUTED: Self = Self {
    required: false,
    optional: true,
    computed: true,
  };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum PlanModifier {
  UseStateForUnknown,
  RequiresReplace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAttribute {
  pub name: String,
  /// Source property name; empty for attributes synthesized from path parameters.
  pub property: String,
  pub kind: AttributeKind,
  pub flags: AttributeFlags,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub plan_modifiers: Vec<PlanModifier>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub allowed_values: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub attributes: Vec<SchemaAttribute>,
}

#[cfg(test)]
impl SchemaAttribute {
  pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
    self.attributes.iter().find(|a| a.name == name)
  }
}

/// The attribute schema of a resource, in one behavior mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProjection {
  pub resource: String,
  pub mode: BehaviorMode,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub attributes: Vec<SchemaAttribute>,
}

impl SchemaProjection {
  /// Number of attributes at every depth.
  pub fn attribute_count(&self) -> usize {
    fn count(attributes: &[SchemaAttribute]) -> usize {
      attributes.iter().map(|a| 1 + count(&a.attributes)).sum()
    }
    count(&self.attributes)
  }
}

#[cfg(test)]
impl SchemaProjection {
  pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
    self.attributes.iter().find(|a| a.name == name)
  }
}

pub(crate) fn project(ctx: &ProjectionContext<'_>, mode: BehaviorMode) -> GenerationResult<SchemaProjection> {
  let mut attributes = vec![];
  for binding in ctx.ancestors() {
    // A property the path already supplies folds into the binding's attribute.
    let bound = ctx
      .tree
      .properties
      .iter()
      .find(|property| to_attribute_name(&property.name) == binding.attribute);
    attributes.push(match bound {
      Some(property) => {
        let mut merged = attribute(ctx, property, AttributeFlags::REQUIRED, ancestor_modifiers(mode), mode)?;
        merged.description.get_or_insert_with(|| parameter_description(&binding.parameter));
        merged
      }
      None => ancestor_attribute(&binding.attribute, &binding.parameter, mode),
    });
  }

  for property in &ctx.tree.properties {
    let name = to_attribute_name(&property.name);
    if ctx.ancestors().any(|binding| binding.attribute == name) {
      continue;
    }
    let (flags, plan_modifiers) = top_level_flags(ctx, property, mode);
    attributes.push(attribute(ctx, property, flags, plan_modifiers, mode)?);
  }

  Ok(SchemaProjection {
    resource: ctx.resource.name.clone(),
    mode,
    description: ctx.tree.description.clone(),
    attributes,
  })
}

fn ancestor_modifiers(mode: BehaviorMode) -> Vec<PlanModifier> {
  match mode {
    BehaviorMode::Managed => vec![PlanModifier::RequiresReplace],
    BehaviorMode::ReadOnly => vec![],
  }
}

fn parameter_description(parameter: &str) -> String {
  format!("Value of the `{parameter}` path parameter.")
}

fn ancestor_attribute(name: &str, parameter: &str, mode: BehaviorMode) -> SchemaAttribute {
  SchemaAttribute {
    name: name.to_string(),
    property: String::new(),
    kind: AttributeKind::String,
    flags: AttributeFlags::REQUIRED,
    plan_modifiers: ancestor_modifiers(mode),
    description: Some(parameter_description(parameter)),
    model: None,
    allowed_values: vec![],
    attributes: vec![],
  }
}

fn top_level_flags(ctx: &ProjectionContext<'_>, property: &PropertyNode, mode: BehaviorMode) -> (AttributeFlags, Vec<PlanModifier>) {
  let augment = &ctx.resource.augment;
  let name = to_attribute_name(&property.name);
  let is_alt_lookup = augment.is_alt_lookup(&property.name) || augment.is_alt_lookup(&name);
  let is_own_key = ctx.own_key().is_some_and(|key| key.attribute == name);

  match mode {
    BehaviorMode::ReadOnly => {
      let flags = if is_own_key && augment.alt_lookups.is_empty() {
        AttributeFlags::REQUIRED
      } else if is_own_key || is_alt_lookup || augment.is_data_source_optional(&property.name) {
        AttributeFlags::OPTIONAL_COMPUTED
      } else {
        AttributeFlags::COMPUTED
      };
      (flags, vec![])
    }
    BehaviorMode::Managed => {
      // Path-bound properties are user-supplied, never purely computed.
      let flags = if !ctx.is_path_bound(property) && (property.read_only || augment.is_resource_computed(&property.name)) {
        AttributeFlags::COMPUTED
      } else {
        AttributeFlags::OPTIONAL_COMPUTED
      };
      (flags, vec![PlanModifier::UseStateForUnknown])
    }
  }
}

fn nested_flags(mode: BehaviorMode) -> AttributeFlags {
  match mode {
    BehaviorMode::ReadOnly => AttributeFlags::COMPUTED,
    BehaviorMode::Managed => AttributeFlags::OPTIONAL_COMPUTED,
  }
}

fn attribute(
  ctx: &ProjectionContext<'_>,
  property: &PropertyNode,
  flags: AttributeFlags,
  plan_modifiers: Vec<PlanModifier>,
  mode: BehaviorMode,
) -> GenerationResult<SchemaAttribute> {
  let (model, attributes) = if property.kind.carries_model() {
    let (model, node) = ctx.model(property)?;
    (Some(model.to_string()), nested_attributes(ctx, node, mode)?)
  } else {
    (None, vec![])
  };

  let allowed_values = match property.kind {
    AttributeKind::StringEnum => ProjectionContext::enum_values(property),
    _ => vec![],
  };

  Ok(SchemaAttribute {
    name: to_attribute_name(&property.name),
    property: property.name.clone(),
    kind: property.kind,
    flags,
    plan_modifiers,
    description: property.description.clone(),
    model,
    allowed_values,
    attributes,
  })
}

fn nested_attributes(ctx: &ProjectionContext<'_>, node: &SchemaNode, mode: BehaviorMode) -> GenerationResult<Vec<SchemaAttribute>> {
  node
    .properties
    .iter()
    .map(|property| attribute(ctx, property, nested_flags(mode), vec![], mode))
    .collect()
}
