use serde_json::json;

use super::support::{build_tree, graph, spec_with_schemas};
use crate::generator::{error::GenerationError, registry::ModelDeduplicator};

fn shared_profile_spec() -> oas3::Spec {
  spec_with_schemas(json!({
    "account": {
      "title": "account",
      "type": "object",
      "properties": {
        "primary": { "$ref": "#/components/schemas/profile" },
        "backup": {
          "anyOf": [
            { "$ref": "#/components/schemas/profile" },
            { "type": "null" }
          ]
        },
        "history": {
          "type": "array",
          "items": { "$ref": "#/components/schemas/profile" }
        }
      }
    },
    "profile": {
      "title": "profile",
      "type": "object",
      "properties": {
        "label": { "type": "string" },
        "owner": { "$ref": "#/components/schemas/contact" }
      }
    },
    "contact": {
      "title": "contact",
      "type": "object",
      "properties": { "email": { "type": "string" } }
    }
  }))
}

#[test]
fn same_shape_from_several_properties_registers_once() {
  let mut tree = build_tree(&shared_profile_spec(), "account").unwrap();
  let registry = ModelDeduplicator::new("Account").deduplicate(&mut tree).unwrap();

  assert_eq!(
    registry.names().collect::<Vec<_>>(),
    vec!["AccountProfile", "AccountContact"]
  );
  for property in ["backup", "history", "primary"] {
    assert_eq!(
      tree.property(property).unwrap().model.as_deref(),
      Some("AccountProfile"),
      "{property}"
    );
  }

  let profile = registry.get("AccountProfile").unwrap();
  assert_eq!(profile.property("owner").unwrap().model.as_deref(), Some("AccountContact"));
}

#[test]
fn enum_properties_are_not_registered() {
  let mut tree = build_tree(&graph(), "microsoft.graph.conditionalAccessPolicy").unwrap();
  let registry = ModelDeduplicator::new("ConditionalAccessPolicy")
    .deduplicate(&mut tree)
    .unwrap();

  assert!(registry.is_empty());
  assert!(tree.property("state").unwrap().model.is_none());
}

#[test]
fn different_shapes_with_one_title_collide() {
  let spec = spec_with_schemas(json!({
    "holder": {
      "type": "object",
      "properties": {
        "home": { "$ref": "#/components/schemas/home.address" },
        "work": { "$ref": "#/components/schemas/work.address" }
      }
    },
    "home.address": {
      "title": "address",
      "type": "object",
      "properties": { "street": { "type": "string" } }
    },
    "work.address": {
      "title": "address",
      "type": "object",
      "properties": { "building": { "type": "string" } }
    }
  }));
  let mut tree = build_tree(&spec, "holder").unwrap();

  let err = ModelDeduplicator::new("Holder").deduplicate(&mut tree).unwrap_err();
  assert_eq!(
    err,
    GenerationError::ModelNameCollision {
      name: "HolderAddress".to_string(),
      existing: "address{street: String}".to_string(),
      incoming: "address{building: String}".to_string(),
    }
  );
}

#[test]
fn registry_is_deterministic_across_runs() {
  let spec = graph();
  let run = || {
    let mut tree = build_tree(&spec, "microsoft.graph.user").unwrap();
    let registry = ModelDeduplicator::new("User").deduplicate(&mut tree).unwrap();
    (tree, registry)
  };

  let (first_tree, first) = run();
  let (second_tree, second) = run();
  assert_eq!(first, second);
  assert_eq!(first_tree, second_tree);
  assert_eq!(
    first.names().collect::<Vec<_>>(),
    vec!["UserObjectIdentity", "UserPasswordProfile"]
  );
}
