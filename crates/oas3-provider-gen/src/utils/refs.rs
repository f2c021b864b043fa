use oas3::spec::{ObjectOrReference, ObjectSchema};

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Parses a schema `$ref` path and extracts the referenced component name.
///
/// Only internal references into the schema component table
/// (`#/components/schemas/<name>`) are recognised. Every other form, including
/// references into other component kinds or external documents, yields `None`.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<&str> {
  ref_path
    .strip_prefix(SCHEMA_REF_PREFIX)
    .filter(|name| !name.is_empty() && !name.contains('/'))
}

/// Extracts the component name from an [`ObjectOrReference`] variant.
///
/// Returns `None` for inline schemas and for references that
/// [`parse_schema_ref_path`] does not accept.
pub fn extract_schema_ref_name(obj_ref: &ObjectOrReference<ObjectSchema>) -> Option<&str> {
  match obj_ref {
    ObjectOrReference::Ref { ref_path, .. } => parse_schema_ref_path(ref_path),
    ObjectOrReference::Object(_) => None,
  }
}

/// Returns the short, human name of a namespaced component
/// (`microsoft.graph.passwordProfile` -> `passwordProfile`).
pub fn short_component_name(name: &str) -> &str {
  name.rsplit('.').next().unwrap_or(name)
}
