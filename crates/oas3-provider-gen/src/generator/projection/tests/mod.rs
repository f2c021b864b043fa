mod read;
mod update;

use serde_json::{Value, json};

use crate::generator::{
  augment::{Augment, AugmentSet},
  orchestrator::{GeneratorConfig, Orchestrator, ResourceOutput},
  tests::support::spec_with,
};

/// Properties of the `widget` component used by the inline documents below.
fn widget_schemas() -> Value {
  json!({
    "widget": {
      "type": "object",
      "description": "A configurable widget.",
      "properties": {
        "id": { "type": "string" },
        "name": { "type": "string" },
        "region": { "type": "string" },
        "secret": { "type": "string", "readOnly": true },
        "settings": { "$ref": "#/components/schemas/widgetSettings" }
      }
    },
    "widgetSettings": {
      "title": "widgetSettings",
      "type": "object",
      "properties": {
        "colour": { "type": "string" },
        "revision": { "type": "integer", "readOnly": true }
      }
    }
  })
}

/// Generates `path` from a document whose only paths are `paths`, all returning `widget`.
fn generate_widget(paths: Value, path: &str, augment: Augment) -> ResourceOutput {
  generate_widget_with(paths, widget_schemas(), path, augment)
}

/// Like [`generate_widget`], over a caller-adjusted copy of [`widget_schemas`].
fn generate_widget_with(paths: Value, schemas: Value, path: &str, augment: Augment) -> ResourceOutput {
  let mut augments = AugmentSet::default();
  augments.insert(path, augment);
  let config = GeneratorConfig::builder().augments(augments).build();
  Orchestrator::new(spec_with(paths, schemas), config)
    .generate_resource(path)
    .expect("widget resource should generate")
}
