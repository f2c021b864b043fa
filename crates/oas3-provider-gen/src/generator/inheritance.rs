use indexmap::IndexMap;
use oas3::spec::{ObjectOrReference, ObjectSchema};

use super::{
  error::{GenerationError, GenerationResult},
  resolver::ReferenceResolver,
};

/// The union of properties along an `allOf` chain.
///
/// Properties keep first-seen order, base first; a property redefined by a
/// later member of the chain keeps its position but takes the later definition.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlattenedSchema<'s> {
  pub title: Option<&'s str>,
  pub description: Option<&'s str>,
  pub properties: IndexMap<&'s str, &'s ObjectOrReference<ObjectSchema>>,
  /// Named components visited, base first, ending with the flattened schema itself when named.
  pub lineage: Vec<&'s str>,
}

/// Flattens `allOf` inheritance into a single property set.
pub(crate) struct InheritanceFlattener<'a> {
  resolver: &'a ReferenceResolver,
}

impl<'a> InheritanceFlattener<'a> {
  pub(crate) fn new(resolver: &'a ReferenceResolver) -> Self {
    Self { resolver }
  }

  /// Flattens `schema`, reached through the component `identity` when it is named.
  ///
  /// Fails with `SchemaCycle` when a component reappears on its own inheritance
  /// chain (`A extends B extends A`).
  pub(crate) fn flatten<'s>(&self, identity: Option<&'s str>, schema: &'s ObjectSchema) -> GenerationResult<FlattenedSchema<'s>>
  where
    'a: 's,
  {
    let mut flattened = FlattenedSchema::default();
    let mut stack = vec![];
    self.flatten_into(identity, schema, &mut stack, &mut flattened)?;
    Ok(flattened)
  }

  fn flatten_into<'s>(
    &self,
    identity: Option<&'s str>,
    schema: &'s ObjectSchema,
    stack: &mut Vec<&'s str>,
    acc: &mut FlattenedSchema<'s>,
  ) -> GenerationResult<()>
  where
    'a: 's,
  {
    if let Some(name) = identity {
      if stack.contains(&name) {
        return Err(GenerationError::cycle(stack.iter().copied().chain([name])));
      }
      stack.push(name);
    }

    for member in &schema.all_of {
      let resolved = self.resolver.resolve(member)?;
      self.flatten_into(resolved.name, resolved.schema, stack, acc)?;
    }

    for (name, property) in &schema.properties {
      acc.properties.insert(name.as_str(), property);
    }
    if let Some(title) = schema.title.as_deref() {
      acc.title = Some(title);
    }
    if let Some(description) = schema.description.as_deref() {
      acc.description = Some(description);
    }

    if let Some(name) = identity {
      acc.lineage.push(name);
      stack.pop();
    }

    Ok(())
  }
}
