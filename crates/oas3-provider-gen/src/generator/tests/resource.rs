use serde_json::json;

use super::support::{
  APPLICATION_PATH, GROUP_OWNERS_PATH, USER_PATH, graph, managed_path, read_only_path, spec_with,
};
use crate::generator::{
  augment::Augment,
  error::GenerationError,
  resolver::ReferenceResolver,
  resource::{BehaviorMode, ResourceDescriptor},
};

fn describe(spec: &oas3::Spec, path: &str) -> Result<ResourceDescriptor, GenerationError> {
  let resolver = ReferenceResolver::new(spec);
  ResourceDescriptor::describe(spec, &resolver, path, Augment::default())
}

#[test]
fn describes_a_managed_item_resource() {
  let resource = describe(&graph(), USER_PATH).unwrap();

  assert_eq!(resource.name, "user");
  assert_eq!(resource.type_name, "User");
  assert_eq!(resource.sdk_type, "User");
  assert_eq!(resource.mode, BehaviorMode::Managed);
  assert_eq!(
    resource.operations.methods.iter().map(String::as_str).collect::<Vec<_>>(),
    vec!["DELETE", "GET", "PATCH"]
  );
  assert_eq!(resource.operations.response_schema_name(), Some("microsoft.graph.user"));
  assert_eq!(resource.operations.select_fields.len(), 11);
  assert_eq!(resource.operations.select_fields[0], "id");
}

#[test]
fn get_only_path_is_read_only() {
  let resource = describe(&graph(), GROUP_OWNERS_PATH).unwrap();

  assert_eq!(resource.name, "group_owners");
  assert_eq!(resource.type_name, "GroupOwners");
  assert_eq!(resource.sdk_type, "DirectoryObjectCollectionResponse");
  assert_eq!(resource.mode, BehaviorMode::ReadOnly);
  assert!(resource.operations.select_fields.is_empty());
}

#[test]
fn managed_requires_both_patch_and_delete() {
  let widget = json!({ "widget": { "type": "object", "properties": { "id": { "type": "string" } } } });

  let mut patch_only = read_only_path("widget");
  patch_only["patch"] = json!({ "responses": { "204": { "description": "Success" } } });
  let mut delete_only = read_only_path("widget");
  delete_only["delete"] = json!({ "responses": { "204": { "description": "Success" } } });

  let spec = spec_with(
    json!({
      "/full/{widget-id}": managed_path("widget"),
      "/patch/{widget-id}": patch_only,
      "/delete/{widget-id}": delete_only,
    }),
    widget,
  );

  assert_eq!(describe(&spec, "/full/{widget-id}").unwrap().mode, BehaviorMode::Managed);
  assert_eq!(describe(&spec, "/patch/{widget-id}").unwrap().mode, BehaviorMode::ReadOnly);
  assert_eq!(describe(&spec, "/delete/{widget-id}").unwrap().mode, BehaviorMode::ReadOnly);
}

#[test]
fn undeclared_path_is_reported() {
  let err = describe(&graph(), "/devices/{device-id}").unwrap_err();
  assert_eq!(
    err,
    GenerationError::PathNotFound {
      path: "/devices/{device-id}".to_string()
    }
  );
}

#[test]
fn path_without_readable_schema_is_reported() {
  let spec = spec_with(
    json!({
      "/things/{thing-id}": {
        "delete": { "responses": { "204": { "description": "Success" } } }
      },
      "/empty/{thing-id}": {
        "get": { "responses": { "204": { "description": "No content" } } }
      }
    }),
    json!({}),
  );

  for path in ["/things/{thing-id}", "/empty/{thing-id}"] {
    assert_eq!(
      describe(&spec, path).unwrap_err(),
      GenerationError::MissingReadOperation { path: path.to_string() }
    );
  }
}

#[test]
fn response_reference_must_resolve() {
  let spec = spec_with(json!({ "/ghosts/{ghost-id}": read_only_path("ghost") }), json!({}));
  let err = describe(&spec, "/ghosts/{ghost-id}").unwrap_err();
  assert!(matches!(err, GenerationError::BrokenReference { .. }));
}

#[test]
fn invalid_template_is_reported_with_its_cause() {
  let spec = spec_with(json!({ "/bad/{thing}": read_only_path("thing") }), json!({}));
  let err = describe(&spec, "/bad/{thing}").unwrap_err();

  assert!(matches!(err, GenerationError::InvalidPath { .. }));
  assert_eq!(
    err.to_string(),
    "invalid path template '/bad/{thing}': parameter 'thing' is not of the form '{entity-key}'"
  );
  assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn sdk_type_follows_the_response_component() {
  let resource = describe(&graph(), APPLICATION_PATH).unwrap();
  assert_eq!(resource.sdk_type, "Application");
  assert_eq!(resource.path.template(), APPLICATION_PATH);
}
