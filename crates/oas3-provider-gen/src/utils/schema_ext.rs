use oas3::spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet};

/// Extension marking a service-managed relationship property.
pub const NAVIGATION_PROPERTY_EXTENSION: &str = "x-ms-navigationProperty";

/// Extension methods for `ObjectSchema` to query the shape facts the classifier works from.
pub(crate) trait SchemaExt {
  /// Returns the single `SchemaType` if exactly one is defined, None otherwise.
  fn single_type(&self) -> Option<SchemaType>;

  /// Returns the non-null type from a two-type nullable set (e.g., `[string, null]` -> `string`).
  fn non_null_type(&self) -> Option<SchemaType>;

  /// Returns the single `SchemaType` if exactly one is defined, or the non-null type
  /// from a two-type nullable set.
  fn single_type_or_nullable(&self) -> Option<SchemaType>;

  /// The type a property declares once composition is taken into account.
  ///
  /// An untyped schema that carries properties or an `allOf` composition is an
  /// object; everything else reports its explicit (possibly nullable) type.
  ///
  /// # Example
  /// ```text
  /// { "type": ["integer", "null"] }        => Some(Integer)
  /// { "allOf": [{ "$ref": "..." }] }       => Some(Object)
  /// { "anyOf": [{ "$ref": "..." }] }       => None
  /// ```
  fn declared_type(&self) -> Option<SchemaType>;

  /// Returns true if the schema has allOf composition.
  fn has_intersection(&self) -> bool;

  /// Returns an iterator over all union variants (`anyOf` then `oneOf`).
  fn union_variants(&self) -> impl Iterator<Item = &ObjectOrReference<ObjectSchema>>;

  /// The array item schema, when the items keyword holds a schema rather than a boolean.
  fn array_items(&self) -> Option<&ObjectOrReference<ObjectSchema>>;

  /// Looks up a vendor extension, accepting the name with or without its `x-` prefix.
  fn extension(&self, name: &str) -> Option<&serde_json::Value>;

  /// Returns true if the schema is flagged as a navigation (relationship) property.
  fn is_navigation_property(&self) -> bool;

  /// Returns true if the schema is declared `readOnly`.
  fn is_read_only(&self) -> bool;

  /// Extracts string values from a schema's direct `enum` field, in declaration order.
  ///
  /// # Example
  /// ```text
  /// { "enum": ["active", "pending", 123] } => ["active", "pending"]
  /// ```
  fn string_enum_values(&self) -> Vec<String>;
}

impl SchemaExt for ObjectSchema {
  fn single_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Single(t)) => Some(*t),
      _ => None,
    }
  }

  fn non_null_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Multiple(types)) if types.len() == 2 && types.contains(&SchemaType::Null) => {
        types.iter().find(|t| **t != SchemaType::Null).copied()
      }
      _ => None,
    }
  }

  fn single_type_or_nullable(&self) -> Option<SchemaType> {
    self.single_type().or_else(|| self.non_null_type())
  }

  fn declared_type(&self) -> Option<SchemaType> {
    if let Some(schema_type) = self.single_type_or_nullable() {
      return Some(schema_type);
    }
    if self.has_intersection() || !self.properties.is_empty() {
      return Some(SchemaType::Object);
    }
    None
  }

  fn has_intersection(&self) -> bool {
    !self.all_of.is_empty()
  }

  fn union_variants(&self) -> impl Iterator<Item = &ObjectOrReference<ObjectSchema>> {
    self.any_of.iter().chain(&self.one_of)
  }

  fn array_items(&self) -> Option<&ObjectOrReference<ObjectSchema>> {
    match self.items.as_deref() {
      Some(Schema::Object(items)) => Some(&**items),
      Some(Schema::Boolean(_)) | None => None,
    }
  }

  fn extension(&self, name: &str) -> Option<&serde_json::Value> {
    let bare = name.strip_prefix("x-").unwrap_or(name);
    self
      .extensions
      .get(bare)
      .or_else(|| self.extensions.get(&format!("x-{bare}")))
  }

  fn is_navigation_property(&self) -> bool {
    self
      .extension(NAVIGATION_PROPERTY_EXTENSION)
      .and_then(serde_json::Value::as_bool)
      .unwrap_or(false)
  }

  fn is_read_only(&self) -> bool {
    self.read_only.unwrap_or(false)
  }

  fn string_enum_values(&self) -> Vec<String> {
    self
      .enum_values
      .iter()
      .filter_map(|value| value.as_str().map(String::from))
      .collect()
  }
}
