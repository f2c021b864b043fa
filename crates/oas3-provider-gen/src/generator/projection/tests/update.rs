use serde_json::json;

use super::generate_widget;
use crate::generator::{
  augment::Augment,
  projection::{create::Encode, read::STATE_BINDING},
  tests::support::{USER_PATH, graph_output, managed_path},
};

#[test]
fn guards_every_writable_top_level_property() {
  let output = graph_output(USER_PATH);
  let create = output.create.unwrap();
  let update = output.update.unwrap();

  assert_eq!(update.state, STATE_BINDING);
  assert_eq!(
    update.steps.iter().map(|s| s.step.property.as_str()).collect::<Vec<_>>(),
    create.steps.iter().map(|s| s.property.as_str()).collect::<Vec<_>>()
  );

  let display_name = update.step("displayName").unwrap();
  assert_eq!(display_name.plan, "plan.DisplayName");
  assert_eq!(display_name.state, "state.DisplayName");
  assert_eq!(display_name.step.source, "plan.DisplayName");
  assert_eq!(display_name.step.target, "requestBody");
  assert_eq!(display_name.step.setter, "SetDisplayName");
}

#[test]
fn changed_nested_objects_are_resent_whole() {
  let update = graph_output(USER_PATH).update.unwrap();
  let profile = update.step("passwordProfile").unwrap();

  assert_eq!(profile.plan, "plan.PasswordProfile");
  assert!(matches!(profile.step.encode, Encode::Object { .. }));
  assert_eq!(profile.step.nested_steps().len(), 2);
}

#[test]
fn update_targets_the_existing_instance() {
  let update = graph_output(USER_PATH).update.unwrap();

  assert_eq!(update.chain.len(), 1);
  let lookup = update.chain[0].lookup.as_ref().unwrap();
  assert_eq!(lookup.method, "ByUserId");
  assert_eq!(lookup.attribute, "id");
}

#[test]
fn resource_computed_properties_are_never_sent() {
  let path = "/widgets/{widget-id}";
  let output = generate_widget(
    json!({ path: managed_path("widget") }),
    path,
    Augment {
      resource_computed: vec!["region".to_string()],
      ..Augment::default()
    },
  );
  let update = output.update.unwrap();

  assert_eq!(
    update.steps.iter().map(|s| s.step.property.as_str()).collect::<Vec<_>>(),
    vec!["name", "settings"]
  );
  assert!(update.step("id").is_none());
  assert!(update.step("secret").is_none());
}
