use serde_json::json;

use super::support::{graph, spec_with_schemas};
use crate::generator::{error::GenerationError, resolver::ReferenceResolver};

#[test]
fn resolves_every_fixture_component() {
  let resolver = ReferenceResolver::new(&graph());
  assert_eq!(resolver.len(), 12);
  assert!(resolver.schema("microsoft.graph.user").is_ok());

  let resolved = resolver
    .resolve_ref_path("#/components/schemas/microsoft.graph.passwordProfile")
    .expect("reference should resolve");
  assert_eq!(resolved.name, Some("microsoft.graph.passwordProfile"));
  assert_eq!(resolved.schema.title.as_deref(), Some("passwordProfile"));
}

#[test]
fn missing_component_is_a_broken_reference() {
  let resolver = ReferenceResolver::new(&graph());
  let err = resolver
    .resolve_ref_path("#/components/schemas/microsoft.graph.missing")
    .unwrap_err();
  assert_eq!(
    err,
    GenerationError::BrokenReference {
      reference: "#/components/schemas/microsoft.graph.missing".to_string()
    }
  );
}

#[test]
fn foreign_reference_forms_are_broken() {
  let resolver = ReferenceResolver::new(&graph());
  for reference in [
    "#/components/responses/error",
    "other.json#/components/schemas/user",
    "#/components/schemas/",
  ] {
    assert!(
      matches!(resolver.resolve_ref_path(reference), Err(GenerationError::BrokenReference { .. })),
      "{reference} should not resolve"
    );
  }
}

#[test]
fn follows_alias_chains_to_the_concrete_schema() {
  let spec = spec_with_schemas(json!({
    "alias": { "$ref": "#/components/schemas/middle" },
    "middle": { "$ref": "#/components/schemas/concrete" },
    "concrete": { "title": "concrete", "type": "object" }
  }));
  let resolver = ReferenceResolver::new(&spec);

  let schema = resolver.schema("alias").expect("alias should resolve");
  assert_eq!(schema.title.as_deref(), Some("concrete"));
}

#[test]
fn alias_loop_is_a_cycle_and_dangling_alias_is_broken() {
  let spec = spec_with_schemas(json!({
    "a": { "$ref": "#/components/schemas/b" },
    "b": { "$ref": "#/components/schemas/a" },
    "dangling": { "$ref": "#/components/schemas/nowhere" }
  }));
  let resolver = ReferenceResolver::new(&spec);

  assert_eq!(
    resolver.schema("a").unwrap_err(),
    GenerationError::SchemaCycle {
      chain: vec!["a".to_string(), "b".to_string(), "a".to_string()]
    }
  );
  assert!(matches!(
    resolver.schema("dangling"),
    Err(GenerationError::BrokenReference { reference }) if reference.ends_with("nowhere")
  ));
  assert_eq!(resolver.len(), 0);
}
