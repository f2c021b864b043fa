//! Attribute classification.
//!
//! Every consumer of the schema tree dispatches on [`AttributeKind`], so the
//! classification is a pure function of a property's declared shape and never
//! of where the property sits or which projection asks.

use oas3::spec::SchemaType;
use serde::Serialize;
use strum::{Display, EnumIter};
use thiserror::Error;

/// The closed set of attribute kinds understood by every projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum AttributeKind {
  String,
  StringTime,
  StringUuid,
  StringBase64,
  StringEnum,
  Int,
  Bool,
  ArrayOfString,
  ArrayOfUuid,
  ArrayOfObject,
  Object,
}

impl AttributeKind {
  pub const fn is_array(self) -> bool {
    matches!(self, Self::ArrayOfString | Self::ArrayOfUuid | Self::ArrayOfObject)
  }

  /// Scalars are assigned directly; they never point at a nested node.
  pub const fn is_scalar(self) -> bool {
    matches!(
      self,
      Self::String | Self::StringTime | Self::StringUuid | Self::StringBase64 | Self::Int | Self::Bool
    )
  }

  /// Kinds whose values are nested objects registered as shared models.
  pub const fn carries_model(self) -> bool {
    matches!(self, Self::Object | Self::ArrayOfObject)
  }

  /// Kinds that point at a nested schema node (objects, object arrays and enums).
  pub const fn has_nested_node(self) -> bool {
    matches!(self, Self::Object | Self::ArrayOfObject | Self::StringEnum)
  }

  /// The kind of one element of an array kind.
  pub const fn element_kind(self) -> Option<Self> {
    match self {
      Self::ArrayOfString => Some(Self::String),
      Self::ArrayOfUuid => Some(Self::StringUuid),
      Self::ArrayOfObject => Some(Self::Object),
      _ => None,
    }
  }
}

/// The facts about one resolved property the classifier decides on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyShape {
  pub declared_type: Option<SchemaType>,
  pub format: Option<String>,
  /// Shape of the array items, present when `declared_type` is `array`.
  pub items: Option<Box<PropertyShape>>,
  pub has_variants: bool,
  /// Declared type of the first polymorphic variant, after reference resolution.
  pub first_variant_type: Option<SchemaType>,
}

#[cfg(test)]
impl PropertyShape {
  pub fn typed(declared_type: SchemaType) -> Self {
    Self {
      declared_type: Some(declared_type),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_format(mut self, format: impl Into<String>) -> Self {
    self.format = Some(format.into());
    self
  }

  pub fn array_of(items: PropertyShape) -> Self {
    Self {
      declared_type: Some(SchemaType::Array),
      items: Some(Box::new(items)),
      ..Self::default()
    }
  }

  pub fn polymorphic(first_variant_type: Option<SchemaType>) -> Self {
    Self {
      has_variants: true,
      first_variant_type,
      ..Self::default()
    }
  }
}

/// Why a shape has no attribute kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnsupportedShape {
  #[error("array declares no item schema")]
  MissingItems,
  #[error("arrays of {0} are not supported")]
  ArrayItems(AttributeKind),
  #[error("{} has no classification rule", describe(.declared_type, .format))]
  Unclassified {
    declared_type: Option<SchemaType>,
    format: Option<String>,
  },
}

fn describe(declared_type: &Option<SchemaType>, format: &Option<String>) -> String {
  let type_name = declared_type
    .as_ref()
    .map_or_else(|| "untyped schema".to_string(), |t| format!("type '{t:?}'").to_lowercase());
  match format {
    Some(format) => format!("{type_name} with format '{format}'"),
    None => type_name,
  }
}

/// Classifies a property shape.
///
/// Rules apply in order:
/// 1. arrays classify their items and wrap them (`String`, `StringUuid` and `Object` items only);
/// 2. objects and polymorphic schemas are `StringEnum` when the first variant is a string, `Object` otherwise;
/// 3. strings classify by format;
/// 4. integers and booleans map directly;
/// 5. anything else is unsupported.
pub fn classify(shape: &PropertyShape) -> Result<AttributeKind, UnsupportedShape> {
  if shape.declared_type == Some(SchemaType::Array) {
    let items = shape.items.as_deref().ok_or(UnsupportedShape::MissingItems)?;
    return match classify(items)? {
      AttributeKind::String => Ok(AttributeKind::ArrayOfString),
      AttributeKind::StringUuid => Ok(AttributeKind::ArrayOfUuid),
      AttributeKind::Object => Ok(AttributeKind::ArrayOfObject),
      other => Err(UnsupportedShape::ArrayItems(other)),
    };
  }

  if shape.declared_type == Some(SchemaType::Object) || shape.has_variants {
    return Ok(if shape.first_variant_type == Some(SchemaType::String) {
      AttributeKind::StringEnum
    } else {
      AttributeKind::Object
    });
  }

  match shape.declared_type {
    Some(SchemaType::String) => Ok(classify_string(shape.format.as_deref())),
    Some(SchemaType::Integer) => Ok(AttributeKind::Int),
    Some(SchemaType::Boolean) => Ok(AttributeKind::Bool),
    _ => Err(UnsupportedShape::Unclassified {
      declared_type: shape.declared_type,
      format: shape.format.clone(),
    }),
  }
}

fn classify_string(format: Option<&str>) -> AttributeKind {
  match format {
    Some("date-time") => AttributeKind::StringTime,
    Some("uuid") => AttributeKind::StringUuid,
    Some(format) if format.contains("base64") => AttributeKind::StringBase64,
    _ => AttributeKind::String,
  }
}
