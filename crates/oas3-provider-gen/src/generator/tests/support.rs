use oas3::Spec;
use serde_json::{Value, json};

use crate::generator::{
  error::GenerationResult,
  orchestrator::{GeneratorConfig, Orchestrator, ResourceOutput},
  resolver::ReferenceResolver,
  schema_tree::{SchemaNode, SchemaTreeBuilder},
};

pub(crate) const GRAPH: &str = include_str!("../../../fixtures/graph.json");

pub(crate) const USER_PATH: &str = "/users/{user-id}";
pub(crate) const GROUP_OWNERS_PATH: &str = "/groups/{group-id}/owners";
pub(crate) const APPLICATION_PATH: &str = "/applications/{application-id}";
pub(crate) const POLICY_PATH: &str = "/identity/conditionalAccess/policies/{conditionalAccessPolicy-id}";

pub(crate) fn parse_spec(spec_json: &str) -> Spec {
  oas3::from_json(spec_json).expect("failed to parse test spec")
}

pub(crate) fn graph() -> Spec {
  parse_spec(GRAPH)
}

/// A document holding only the given component schemas.
pub(crate) fn spec_with_schemas(schemas: Value) -> Spec {
  spec_with(json!({}), schemas)
}

pub(crate) fn spec_with(paths: Value, schemas: Value) -> Spec {
  let document = json!({
    "openapi": "3.1.0",
    "info": { "title": "Test", "version": "1.0.0" },
    "paths": paths,
    "components": { "schemas": schemas }
  });
  parse_spec(&document.to_string())
}

/// A managed-resource path item (GET, PATCH, DELETE) whose GET returns `schema`.
pub(crate) fn managed_path(schema: &str) -> Value {
  json!({
    "get": ok_response(schema),
    "patch": { "responses": { "204": { "description": "Success" } } },
    "delete": { "responses": { "204": { "description": "Success" } } }
  })
}

/// A read-only path item (GET only) whose GET returns `schema`.
pub(crate) fn read_only_path(schema: &str) -> Value {
  json!({ "get": ok_response(schema) })
}

fn ok_response(schema: &str) -> Value {
  json!({
    "responses": {
      "200": {
        "description": "OK",
        "content": {
          "application/json": {
            "schema": { "$ref": format!("#/components/schemas/{schema}") }
          }
        }
      }
    }
  })
}

pub(crate) fn schema_ref(name: &str) -> oas3::spec::ObjectOrReference<oas3::spec::ObjectSchema> {
  oas3::spec::ObjectOrReference::Ref {
    ref_path: format!("#/components/schemas/{name}"),
    summary: None,
    description: None,
  }
}

pub(crate) fn build_tree(spec: &Spec, component: &str) -> GenerationResult<SchemaNode> {
  let resolver = ReferenceResolver::new(spec);
  SchemaTreeBuilder::new(&resolver).build(&schema_ref(component))
}

pub(crate) fn orchestrator(spec: Spec) -> Orchestrator {
  Orchestrator::new(spec, GeneratorConfig::default())
}

pub(crate) fn graph_output(path: &str) -> ResourceOutput {
  orchestrator(graph())
    .generate_resource(path)
    .expect("fixture resource should generate")
}

pub(crate) fn property_names(node: &SchemaNode) -> Vec<&str> {
  node.properties.iter().map(|p| p.name.as_str()).collect()
}
