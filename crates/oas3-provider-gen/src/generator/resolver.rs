use std::collections::BTreeMap;

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema},
};

use super::error::{GenerationError, GenerationResult};
use crate::utils::{parse_schema_ref_path, refs::SCHEMA_REF_PREFIX};

type ComponentTable = BTreeMap<String, ObjectOrReference<ObjectSchema>>;

/// A concrete schema together with the component name it was reached through.
///
/// `name` is `None` for schemas written inline at the point of use.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedSchema<'a> {
  pub name: Option<&'a str>,
  pub schema: &'a ObjectSchema,
}

/// Resolves component names and `$ref` indirections to concrete schemas.
///
/// The whole component table is resolved once at construction, so lookups
/// afterwards are pure reads and the resolver can be shared across resources.
/// Components that cannot be resolved are remembered with their error and
/// reported again whenever they are asked for.
#[derive(Debug, Default)]
pub(crate) struct ReferenceResolver {
  schemas: BTreeMap<String, ObjectSchema>,
  failures: BTreeMap<String, GenerationError>,
}

impl ReferenceResolver {
  pub(crate) fn new(spec: &Spec) -> Self {
    let mut schemas = BTreeMap::new();
    let mut failures = BTreeMap::new();

    if let Some(components) = &spec.components {
      for name in components.schemas.keys() {
        match Self::follow(&components.schemas, name) {
          Ok(schema) => {
            schemas.insert(name.clone(), schema.clone());
          }
          Err(error) => {
            failures.insert(name.clone(), error);
          }
        }
      }
    }

    Self { schemas, failures }
  }

  /// Follows a component through any chain of pure `$ref` aliases.
  fn follow<'t>(components: &'t ComponentTable, name: &'t str) -> GenerationResult<&'t ObjectSchema> {
    let mut chain = vec![name];
    let mut current = name;

    loop {
      let entry = components
        .get(current)
        .ok_or_else(|| GenerationError::broken(format!("{SCHEMA_REF_PREFIX}{current}")))?;

      match entry {
        ObjectOrReference::Object(schema) => return Ok(schema),
        ObjectOrReference::Ref { ref_path, .. } => {
          let next = parse_schema_ref_path(ref_path).ok_or_else(|| GenerationError::broken(ref_path.as_str()))?;
          let seen = chain.contains(&next);
          chain.push(next);
          if seen {
            return Err(GenerationError::cycle(chain));
          }
          current = next;
        }
      }
    }
  }

  /// Looks up a component by name.
  pub(crate) fn schema(&self, name: &str) -> GenerationResult<&ObjectSchema> {
    self.schemas.get(name).ok_or_else(|| self.missing(name))
  }

  fn missing(&self, name: &str) -> GenerationError {
    self
      .failures
      .get(name)
      .cloned()
      .unwrap_or_else(|| GenerationError::broken(format!("{SCHEMA_REF_PREFIX}{name}")))
  }

  /// Looks up a component by name, returning the stored key alongside the schema.
  pub(crate) fn named(&self, name: &str) -> GenerationResult<ResolvedSchema<'_>> {
    self
      .schemas
      .get_key_value(name)
      .map(|(key, schema)| ResolvedSchema {
        name: Some(key.as_str()),
        schema,
      })
      .ok_or_else(|| self.missing(name))
  }

  /// Resolves a `$ref` path of the form `#/components/schemas/<name>`.
  pub(crate) fn resolve_ref_path(&self, ref_path: &str) -> GenerationResult<ResolvedSchema<'_>> {
    let name = parse_schema_ref_path(ref_path).ok_or_else(|| GenerationError::broken(ref_path))?;
    self.named(name)
  }

  /// Resolves a reference, or returns an inline schema unchanged.
  pub(crate) fn resolve<'a>(&'a self, schema_ref: &'a ObjectOrReference<ObjectSchema>) -> GenerationResult<ResolvedSchema<'a>> {
    match schema_ref {
      ObjectOrReference::Ref { ref_path, .. } => self.resolve_ref_path(ref_path),
      ObjectOrReference::Object(schema) => Ok(ResolvedSchema { name: None, schema }),
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.schemas.len()
  }
}
