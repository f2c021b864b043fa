use std::collections::BTreeSet;

use http::Method;
use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Operation, Parameter, ParameterIn, PathItem},
};
use serde::Serialize;
use strum::Display;

use super::{
  augment::Augment,
  error::{GenerationError, GenerationResult},
  path::ResourcePath,
  resolver::ReferenceResolver,
};
use crate::{
  reserved::to_type_name,
  utils::{SchemaExt, extract_schema_ref_name, short_component_name},
};

const SELECT_PARAMETER: &str = "$select";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Whether a resource is projected as a read-only view or as a fully managed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum BehaviorMode {
  ReadOnly,
  Managed,
}

/// The operations a path item declares, reduced to what the projections need.
#[derive(Debug, Clone)]
pub struct ResourceOperations {
  pub methods: BTreeSet<String>,
  /// Schema of the GET operation's successful JSON response.
  pub response_schema: ObjectOrReference<ObjectSchema>,
  /// Field names the GET operation accepts in `$select`, in declaration order.
  pub select_fields: Vec<String>,
}

impl ResourceOperations {
  pub fn has(&self, method: &Method) -> bool {
    self.methods.contains(method.as_str())
  }

  /// A resource is managed exactly when its path item declares both PATCH and DELETE.
  ///
  /// Everything else, including paths that only add POST, is projected read-only.
  pub fn behavior_mode(&self) -> BehaviorMode {
    if self.has(&Method::PATCH) && self.has(&Method::DELETE) {
      BehaviorMode::Managed
    } else {
      BehaviorMode::ReadOnly
    }
  }

  /// Component name of the response schema, when it is a reference.
  pub fn response_schema_name(&self) -> Option<&str> {
    extract_schema_ref_name(&self.response_schema)
  }
}

/// Everything known about one resource before its schema tree is built.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
  pub name: String,
  pub type_name: String,
  /// Client SDK model type of the response (`microsoft.graph.user` -> `User`).
  pub sdk_type: String,
  pub path: ResourcePath,
  pub mode: BehaviorMode,
  pub operations: ResourceOperations,
  pub augment: Augment,
}

impl ResourceDescriptor {
  pub fn describe(spec: &Spec, resolver: &ReferenceResolver, template: &str, augment: Augment) -> GenerationResult<Self> {
    let path = ResourcePath::parse(template).map_err(|source| GenerationError::InvalidPath {
      path: template.to_string(),
      source,
    })?;

    let path_item = spec
      .paths
      .as_ref()
      .and_then(|paths| paths.get(template))
      .ok_or_else(|| GenerationError::PathNotFound {
        path: template.to_string(),
      })?;

    let operations = ResourceOperations::collect(spec, resolver, template, path_item)?;
    let name = path.resource_name();
    let type_name = to_type_name(&name);
    let sdk_type = operations
      .response_schema_name()
      .map_or_else(|| type_name.clone(), |schema| to_type_name(short_component_name(schema)));

    Ok(Self {
      mode: operations.behavior_mode(),
      name,
      type_name,
      sdk_type,
      path,
      operations,
      augment,
    })
  }
}

impl ResourceOperations {
  fn collect(spec: &Spec, resolver: &ReferenceResolver, template: &str, path_item: &PathItem) -> GenerationResult<Self> {
    let methods = path_item
      .methods()
      .into_iter()
      .map(|(method, _)| method.as_str().to_string())
      .collect::<BTreeSet<_>>();

    let missing = || GenerationError::MissingReadOperation {
      path: template.to_string(),
    };
    let get = path_item.get.as_ref().ok_or_else(missing)?;
    let response_schema = success_schema(spec, get).ok_or_else(missing)?;
    if let Some(name) = extract_schema_ref_name(&response_schema) {
      resolver.schema(name)?;
    } else if let ObjectOrReference::Ref { ref_path, .. } = &response_schema {
      return Err(GenerationError::broken(ref_path.as_str()));
    }

    let select_fields = select_fields(spec, resolver, path_item, get)?;

    Ok(Self {
      methods,
      response_schema,
      select_fields,
    })
  }
}

/// The JSON schema of the first successful response, preferring `200`.
fn success_schema(spec: &Spec, operation: &Operation) -> Option<ObjectOrReference<ObjectSchema>> {
  let responses = operation.responses.as_ref()?;
  let status = responses
    .keys()
    .find(|code| code.as_str() == "200")
    .or_else(|| responses.keys().find(|code| code.starts_with('2')))?;
  let response = responses.get(status)?.resolve(spec).ok()?;
  let media = response
    .content
    .get(JSON_MEDIA_TYPE)
    .or_else(|| response.content.values().next())?;
  media.schema.clone()
}

fn select_fields(
  spec: &Spec,
  resolver: &ReferenceResolver,
  path_item: &PathItem,
  operation: &Operation,
) -> GenerationResult<Vec<String>> {
  let mut parameters = operation
    .parameters
    .iter()
    .chain(&path_item.parameters)
    .filter_map(|p| p.resolve(spec).ok());

  let Some(select) = parameters.find(|p: &Parameter| p.location == ParameterIn::Query && p.name == SELECT_PARAMETER)
  else {
    return Ok(vec![]);
  };
  let Some(schema) = select.schema.as_ref() else {
    return Ok(vec![]);
  };

  let schema = resolver.resolve(schema)?.schema;
  if let Some(items) = schema.array_items() {
    return Ok(resolver.resolve(items)?.schema.string_enum_values());
  }
  Ok(schema.string_enum_values())
}
