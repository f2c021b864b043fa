use std::collections::BTreeSet;

use oas3::spec::{ObjectOrReference, ObjectSchema, SchemaType};
use serde::Serialize;
use strum::Display;

use super::{
  classifier::{AttributeKind, PropertyShape, classify},
  error::{GenerationError, GenerationResult},
  inheritance::InheritanceFlattener,
  resolver::{ReferenceResolver, ResolvedSchema},
};
use crate::utils::{SchemaExt, short_component_name};

/// Prefix of the metadata-envelope properties the service adds to every payload.
pub const METADATA_PREFIX: &str = "@odata.";

/// Arrays and scalars live on [`PropertyNode::kind`]; only objects and enums get a node of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum SchemaKind {
  Object,
  Enum,
}

/// One resolved, object-shaped (or enum) schema.
///
/// Properties are unique, sorted by name, and never include synthetic
/// metadata or navigation properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
  pub title: String,
  pub kind: SchemaKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub properties: Vec<PropertyNode>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub lineage: Vec<String>,
}

impl SchemaNode {
  pub fn property(&self, name: &str) -> Option<&PropertyNode> {
    self.properties.iter().find(|p| p.name == name)
  }

  /// Structural equality used by model deduplication.
  ///
  /// Descriptions, lineage and assigned model names do not take part.
  pub fn same_shape(&self, other: &Self) -> bool {
    self.title == other.title
      && self.kind == other.kind
      && self.enum_values == other.enum_values
      && self.properties.len() == other.properties.len()
      && self.properties.iter().zip(&other.properties).all(|(a, b)| a.same_shape(b))
  }

  /// Compact rendering of the shape for diagnostics: `title{name: Kind, ...}`.
  pub fn summary(&self) -> String {
    if self.kind == SchemaKind::Enum {
      return format!("{}[{}]", self.title, self.enum_values.join("|"));
    }
    let properties = self
      .properties
      .iter()
      .map(|p| format!("{}: {}", p.name, p.kind))
      .collect::<Vec<_>>()
      .join(", ");
    format!("{}{{{properties}}}", self.title)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
  pub name: String,
  pub kind: AttributeKind,
  /// Declared format, kept for scalar kinds only.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub read_only: bool,
  /// Nested node; present exactly for `Object`, `ArrayOfObject` and `StringEnum`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub object_of: Option<Box<SchemaNode>>,
  /// Canonical model name, assigned by the deduplicator.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model: Option<String>,
}

impl PropertyNode {
  fn same_shape(&self, other: &Self) -> bool {
    self.name == other.name
      && self.kind == other.kind
      && self.format == other.format
      && match (&self.object_of, &other.object_of) {
        (Some(a), Some(b)) => a.same_shape(b),
        (None, None) => true,
        _ => false,
      }
  }

  pub fn nested(&self) -> Option<&SchemaNode> {
    self.object_of.as_deref()
  }
}

/// Builds sorted, filtered schema trees from resolved components.
pub(crate) struct SchemaTreeBuilder<'a> {
  resolver: &'a ReferenceResolver,
  flattener: InheritanceFlattener<'a>,
  excluded: BTreeSet<&'a str>,
}

impl<'a> SchemaTreeBuilder<'a> {
  pub(crate) fn new(resolver: &'a ReferenceResolver) -> Self {
    Self {
      resolver,
      flattener: InheritanceFlattener::new(resolver),
      excluded: BTreeSet::new(),
    }
  }

  /// Additional top-level property names to drop, on top of the synthetic ones.
  #[must_use]
  pub(crate) fn with_exclusions(mut self, names: &'a [String]) -> Self {
    self.excluded.extend(names.iter().map(String::as_str));
    self
  }

  /// Builds the tree rooted at a resource's response schema.
  pub(crate) fn build<'s>(&self, root: &'s ObjectOrReference<ObjectSchema>) -> GenerationResult<SchemaNode>
  where
    'a: 's,
  {
    let resolved = self.resolver.resolve(root)?;
    let fallback = resolved.name.map_or("resource", short_component_name);
    let mut stack = vec![];
    self.object_node(resolved, fallback, &mut stack, true)
  }

  fn object_node<'s>(
    &self,
    resolved: ResolvedSchema<'s>,
    fallback_title: &str,
    stack: &mut Vec<&'s str>,
    top_level: bool,
  ) -> GenerationResult<SchemaNode>
  where
    'a: 's,
  {
    if let Some(name) = resolved.name {
      if stack.contains(&name) {
        return Err(GenerationError::cycle(stack.iter().copied().chain([name])));
      }
      stack.push(name);
    }

    let flattened = self.flattener.flatten(resolved.name, resolved.schema)?;
    let title = flattened
      .title
      .or_else(|| resolved.name.map(short_component_name))
      .unwrap_or(fallback_title)
      .to_string();

    let mut properties = vec![];
    for (&name, &property) in &flattened.properties {
      if top_level && self.excluded.contains(name) {
        continue;
      }
      let inline = match property {
        ObjectOrReference::Object(schema) => Some(schema),
        ObjectOrReference::Ref { .. } => None,
      };
      let resolved_property = self.resolver.resolve(property)?;
      if is_synthetic(name, inline, resolved_property.schema) {
        continue;
      }
      properties.push(self.property_node(&title, name, inline, resolved_property, stack)?);
    }
    properties.sort_by(|a, b| a.name.cmp(&b.name));

    if resolved.name.is_some() {
      stack.pop();
    }

    Ok(SchemaNode {
      title,
      kind: SchemaKind::Object,
      description: flattened.description.map(String::from),
      properties,
      enum_values: vec![],
      lineage: flattened.lineage.iter().map(|s| (*s).to_string()).collect(),
    })
  }

  fn property_node<'s>(
    &self,
    owner: &str,
    name: &str,
    inline: Option<&'s ObjectSchema>,
    resolved: ResolvedSchema<'s>,
    stack: &mut Vec<&'s str>,
  ) -> GenerationResult<PropertyNode>
  where
    'a: 's,
  {
    let schema = resolved.schema;
    let shape = self.shape_of(schema)?;
    let kind = classify(&shape).map_err(|reason| GenerationError::UnsupportedShape {
      schema: owner.to_string(),
      property: name.to_string(),
      reason,
    })?;

    let object_of = match kind {
      AttributeKind::Object => Some(self.object_node(self.object_target(resolved)?, name, stack, false)?),
      AttributeKind::ArrayOfObject => {
        let items = schema.array_items().map(|items| self.resolver.resolve(items)).transpose()?;
        match items {
          Some(items) => Some(self.object_node(self.object_target(items)?, name, stack, false)?),
          None => None,
        }
      }
      AttributeKind::StringEnum => Some(self.enum_node(resolved, name)?),
      _ => None,
    };
    debug_assert_eq!(object_of.is_some(), kind.has_nested_node(), "nested node of '{name}'");

    let description = inline
      .and_then(|s| s.description.as_deref())
      .or(schema.description.as_deref())
      .map(String::from);

    Ok(PropertyNode {
      name: name.to_string(),
      kind,
      format: if kind.is_scalar() { schema.format.clone() } else { None },
      description,
      read_only: inline.is_some_and(SchemaExt::is_read_only) || schema.is_read_only(),
      object_of: object_of.map(Box::new),
      model: None,
    })
  }

  /// Collects the facts the classifier needs, resolving item and variant references.
  fn shape_of(&self, schema: &ObjectSchema) -> GenerationResult<PropertyShape> {
    let mut shape = PropertyShape {
      declared_type: schema.declared_type(),
      format: schema.format.clone(),
      ..PropertyShape::default()
    };

    if shape.declared_type == Some(SchemaType::Array)
      && let Some(items) = schema.array_items()
    {
      let items = self.resolver.resolve(items)?;
      shape.items = Some(Box::new(self.shape_of(items.schema)?));
    }

    if let Some(first) = schema.union_variants().next() {
      shape.has_variants = true;
      shape.first_variant_type = self.resolver.resolve(first)?.schema.declared_type();
    }

    Ok(shape)
  }

  /// The schema an object-kinded property projects to: the first variant of a
  /// polymorphic wrapper, or the schema itself.
  fn object_target<'s>(&self, resolved: ResolvedSchema<'s>) -> GenerationResult<ResolvedSchema<'s>>
  where
    'a: 's,
  {
    let schema = resolved.schema;
    if schema.properties.is_empty()
      && !schema.has_intersection()
      && let Some(first) = schema.union_variants().next()
    {
      return self.resolver.resolve(first);
    }
    Ok(resolved)
  }

  fn enum_node(&self, resolved: ResolvedSchema<'_>, property: &str) -> GenerationResult<SchemaNode> {
    let variant = match resolved.schema.union_variants().next() {
      Some(first) => self.resolver.resolve(first)?,
      None => resolved,
    };
    let title = variant
      .schema
      .title
      .clone()
      .or_else(|| variant.name.map(|n| short_component_name(n).to_string()))
      .unwrap_or_else(|| property.to_string());

    Ok(SchemaNode {
      title,
      kind: SchemaKind::Enum,
      description: variant.schema.description.clone(),
      properties: vec![],
      enum_values: variant.schema.string_enum_values(),
      lineage: vec![],
    })
  }
}

/// Metadata-envelope and navigation properties never reach the tree.
fn is_synthetic(name: &str, inline: Option<&ObjectSchema>, resolved: &ObjectSchema) -> bool {
  name.starts_with(METADATA_PREFIX)
    || inline.is_some_and(SchemaExt::is_navigation_property)
    || resolved.is_navigation_property()
}
