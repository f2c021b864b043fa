use std::{collections::BTreeMap, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Source property names that collide with accessor names reserved by the client SDK,
/// mapped to the escaped accessor stem the SDK exposes instead.
static ACCESSOR_ESCAPES: LazyLock<BTreeMap<&'static str, &'static str>> =
  LazyLock::new(|| [("type", "typeEscaped")].into_iter().collect());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores, and trims any leading or trailing underscores.
fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("bad regex"));
  static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("bad regex"));

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts a source property or path name into the externally visible attribute name (`snake_case`).
///
/// # Rules:
/// 1. Sanitizes the base string.
/// 2. Converts to `snake_case`.
/// 3. If the result starts with a digit, it's prefixed with `_`.
/// 4. If the result is empty, it becomes `_`.
///
/// Reserved accessor names are left alone here; see [`accessor_stem`].
pub(crate) fn to_attribute_name(name: &str) -> String {
  let mut ident = sanitize(name).to_snake_case();

  if ident.is_empty() {
    return "_".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Converts a string into a type or member name (`PascalCase`).
///
/// # Rules:
/// 1. Sanitizes the base string.
/// 2. Splits digit/upper boundaries (`v2Beta` -> `V2_Beta`) before casing.
/// 3. Converts to `PascalCase`.
/// 4. If the result starts with a digit, it's prefixed with `T`.
/// 5. If the result is empty, it becomes `Unnamed`.
pub(crate) fn to_type_name(name: &str) -> String {
  static DIGIT_TO_UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d)([A-Z])").expect("bad regex"));

  let sanitized = sanitize(name);
  let preprocessed = DIGIT_TO_UPPER_RE.replace_all(&sanitized, "${1}_${2}");
  let mut ident = preprocessed.to_snake_case().to_pascal_case();

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }

  ident
}

/// The accessor stem used against the client SDK for a source property name.
///
/// Names listed in the escape table resolve to their escaped stem; all others
/// pass through unchanged.
pub(crate) fn accessor_stem(name: &str) -> &str {
  ACCESSOR_ESCAPES.get(name).copied().unwrap_or(name)
}

/// SDK getter for a property (`displayName` -> `GetDisplayName`, `type` -> `GetTypeEscaped`).
pub(crate) fn getter_name(name: &str) -> String {
  format!("Get{}", to_type_name(accessor_stem(name)))
}

/// SDK setter for a property (`displayName` -> `SetDisplayName`, `type` -> `SetTypeEscaped`).
pub(crate) fn setter_name(name: &str) -> String {
  format!("Set{}", to_type_name(accessor_stem(name)))
}

/// Field name of a property inside the provider's state/plan model.
pub(crate) fn model_field_name(name: &str) -> String {
  to_type_name(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_attribute_names() {
    assert_eq!(to_attribute_name("displayName"), "display_name");
    assert_eq!(to_attribute_name("userPrincipalName"), "user_principal_name");
    assert_eq!(to_attribute_name("@odata.type"), "odata_type");
    assert_eq!(to_attribute_name("Über"), "uber");
    assert_eq!(to_attribute_name("123name"), "_123name");
    assert_eq!(to_attribute_name(""), "_");
    assert_eq!(to_attribute_name("  "), "_");
  }

  #[test]
  fn test_reserved_names_stay_in_attributes() {
    assert_eq!(to_attribute_name("type"), "type");
    assert_eq!(accessor_stem("type"), "typeEscaped");
    assert_eq!(accessor_stem("usage"), "usage");
  }

  #[test]
  fn test_type_names() {
    assert_eq!(to_type_name("user"), "User");
    assert_eq!(to_type_name("conditionalAccessPolicy"), "ConditionalAccessPolicy");
    assert_eq!(to_type_name("group_owners"), "GroupOwners");
    assert_eq!(to_type_name("123Response"), "T123Response");
    assert_eq!(to_type_name(""), "Unnamed");
  }

  #[test]
  fn test_accessor_names() {
    assert_eq!(getter_name("displayName"), "GetDisplayName");
    assert_eq!(getter_name("type"), "GetTypeEscaped");
    assert_eq!(setter_name("keyId"), "SetKeyId");
    assert_eq!(setter_name("type"), "SetTypeEscaped");
    assert_eq!(model_field_name("passwordProfile"), "PasswordProfile");
  }
}
