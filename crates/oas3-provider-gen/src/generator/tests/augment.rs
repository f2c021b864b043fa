use crate::generator::augment::{Augment, AugmentSet};

#[test]
fn parses_camel_case_overrides_keyed_by_path() {
  let set = AugmentSet::from_json(
    r#"{
      "/users/{user-id}": {
        "excludeProperties": ["mail"],
        "altLookups": ["userPrincipalName"],
        "dataSourceOptional": ["displayName"]
      },
      "/groups/{group-id}": {
        "resourceComputed": ["mailEnabled"]
      }
    }"#,
  )
  .expect("augments should parse");

  assert_eq!(set.len(), 2);
  let user = set.for_path("/users/{user-id}").unwrap();
  assert_eq!(user.exclude_properties, vec!["mail"]);
  assert!(user.is_alt_lookup("userPrincipalName"));
  assert!(user.is_data_source_optional("displayName"));
  assert!(user.resource_computed.is_empty());

  let group = set.for_path("/groups/{group-id}").unwrap();
  assert!(group.is_resource_computed("mailEnabled"));
  assert!(set.for_path("/applications/{application-id}").is_none());
}

#[test]
fn unknown_fields_are_reported_with_their_location() {
  let err = AugmentSet::from_json(r#"{ "/users/{user-id}": { "excludeProperty": ["mail"] } }"#).unwrap_err();
  let message = err.to_string();
  assert!(message.contains("excludeProperty"), "{message}");
  assert!(message.contains("/users/{user-id}"), "{message}");
}

#[test]
fn wrong_value_type_is_reported_with_its_location() {
  let err = AugmentSet::from_json(r#"{ "/users/{user-id}": { "altLookups": "mail" } }"#).unwrap_err();
  assert!(err.to_string().contains("altLookups"), "{err}");
}

#[test]
fn empty_document_is_an_empty_set() {
  let set = AugmentSet::from_json("{}").unwrap();
  assert!(set.is_empty());
  assert_eq!(Augment::default(), Augment {
    exclude_properties: vec![],
    alt_lookups: vec![],
    data_source_optional: vec![],
    resource_computed: vec![],
  });
}

#[tokio::test]
async fn loads_from_disk() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("augment.json");
  tokio::fs::write(&path, r#"{ "/users/{user-id}": { "altLookups": ["mail"] } }"#)
    .await
    .unwrap();

  let set = AugmentSet::load(&path).await.unwrap();
  assert!(set.for_path("/users/{user-id}").unwrap().is_alt_lookup("mail"));

  let missing = AugmentSet::load(&dir.path().join("missing.json")).await.unwrap_err();
  assert!(missing.to_string().starts_with("Failed to read augment file"));
}
