use serde_json::json;

use super::generate_widget;
use crate::generator::{
  augment::Augment,
  classifier::AttributeKind,
  path::AccessorStep,
  projection::read::{Decode, RESPONSE_BINDING, STATE_BINDING},
  tests::support::{GROUP_OWNERS_PATH, POLICY_PATH, USER_PATH, graph_output, read_only_path},
};

#[test]
fn scalars_are_assigned_to_state_fields() {
  let read = graph_output(USER_PATH).read;

  assert_eq!(read.source, RESPONSE_BINDING);
  assert_eq!(read.target, STATE_BINDING);
  assert_eq!(read.sdk_type, "User");

  let display_name = read.step("displayName").unwrap();
  assert_eq!(display_name.attribute, "display_name");
  assert_eq!(display_name.getter, "GetDisplayName");
  assert_eq!(display_name.source, "response");
  assert_eq!(display_name.target, "state.DisplayName");
  assert_eq!(display_name.decode, Decode::Value { format: None });

  let created = read.step("createdDateTime").unwrap();
  assert_eq!(created.kind, AttributeKind::StringTime);
  assert_eq!(
    created.decode,
    Decode::Value {
      format: Some("date-time".to_string())
    }
  );
}

#[test]
fn nested_objects_decode_into_fresh_locals() {
  let read = graph_output(USER_PATH).read;
  let profile = read.step("passwordProfile").unwrap();

  let Decode::Object {
    model,
    binding,
    target,
    steps,
  } = &profile.decode
  else {
    panic!("expected object decode, got {:?}", profile.decode);
  };
  assert_eq!(model, "UserPasswordProfile");
  assert_eq!(binding, "responsePasswordProfile");
  assert_eq!(target, "statePasswordProfile");
  assert_eq!(profile.target, "state.PasswordProfile");

  let password = steps.iter().find(|s| s.property == "password").unwrap();
  assert_eq!(password.source, "responsePasswordProfile");
  assert_eq!(password.target, "statePasswordProfile.Password");
  assert_eq!(password.getter, "GetPassword");
}

#[test]
fn object_arrays_decode_element_by_element() {
  let read = graph_output(USER_PATH).read;
  let identities = read.step("identities").unwrap();

  let Decode::List {
    model,
    element_kind,
    collection,
    element,
    element_target,
    steps,
  } = &identities.decode
  else {
    panic!("expected list decode, got {:?}", identities.decode);
  };
  assert_eq!(model.as_deref(), Some("UserObjectIdentity"));
  assert_eq!(*element_kind, AttributeKind::Object);
  assert_eq!(collection, "responseIdentities");
  assert_eq!(element, "responseIdentitiesElement");
  assert_eq!(element_target, "stateIdentitiesElement");
  assert_eq!(
    steps.iter().map(|s| s.target.as_str()).collect::<Vec<_>>(),
    vec![
      "stateIdentitiesElement.Issuer",
      "stateIdentitiesElement.IssuerAssignedId",
      "stateIdentitiesElement.SignInType"
    ]
  );
  assert!(steps.iter().all(|s| s.source == "responseIdentitiesElement"));
}

#[test]
fn scalar_arrays_have_no_nested_steps() {
  let read = graph_output(USER_PATH).read;
  let phones = read.step("businessPhones").unwrap();

  assert_eq!(
    phones.decode,
    Decode::List {
      model: None,
      element_kind: AttributeKind::String,
      collection: "responseBusinessPhones".to_string(),
      element: "responseBusinessPhonesElement".to_string(),
      element_target: "stateBusinessPhonesElement".to_string(),
      steps: vec![],
    }
  );
}

#[test]
fn enums_decode_through_their_string_form() {
  let read = graph_output(POLICY_PATH).read;

  assert_eq!(
    read.step("state").unwrap().decode,
    Decode::Enum {
      enum_type: "ConditionalAccessPolicyState".to_string()
    }
  );
}

#[test]
fn item_chain_looks_up_by_own_key() {
  let read = graph_output(POLICY_PATH).read;

  assert_eq!(read.chain.len(), 1);
  let AccessorStep { navigation, lookup } = &read.chain[0];
  assert_eq!(navigation, &vec!["Identity", "ConditionalAccess", "Policies"]);
  let lookup = lookup.as_ref().unwrap();
  assert_eq!(lookup.method, "ByConditionalAccessPolicyId");
  assert_eq!(lookup.attribute, "id");
  assert_eq!(read.lookups, vec!["id"]);
}

#[test]
fn nested_literal_chain_ends_in_navigation() {
  let read = graph_output(GROUP_OWNERS_PATH).read;

  assert_eq!(read.chain.len(), 2);
  assert_eq!(read.chain[0].lookup.as_ref().unwrap().attribute, "group_id");
  assert_eq!(read.chain[1].navigation, vec!["Owners"]);
  assert!(read.chain[1].lookup.is_none());
  assert!(read.lookups.is_empty());
}

#[test]
fn select_is_the_sorted_intersection_with_the_tree() {
  let read = graph_output(USER_PATH).read;

  assert_eq!(
    read.select,
    vec![
      "accountEnabled",
      "businessPhones",
      "deletedDateTime",
      "displayName",
      "id",
      "identities",
      "mail",
      "passwordProfile",
      "userPrincipalName",
      "userType",
    ]
  );
}

#[test]
fn alternate_lookups_follow_the_primary_key() {
  let path = "/widgets/{widget-id}";
  let output = generate_widget(
    json!({ path: read_only_path("widget") }),
    path,
    Augment {
      alt_lookups: vec!["name".to_string()],
      ..Augment::default()
    },
  );

  assert_eq!(output.read.lookups, vec!["id", "name"]);
}

#[test]
fn every_property_is_decoded_once() {
  let output = graph_output(USER_PATH);

  assert_eq!(
    output.read.steps.iter().map(|s| s.property.as_str()).collect::<Vec<_>>(),
    output.tree.properties.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
  );
}
