//! Orchestration of the resource projection pipeline.
//!
//! The `Orchestrator` owns the parsed document and the resolution cache built
//! from it, and turns resource paths into [`ResourceOutput`]s:
//!
//! 1. describe the path (operations, behavior mode, accessor chains)
//! 2. build the schema tree of the GET response
//! 3. deduplicate nested models into a per-resource registry
//! 4. project Schema, Read and, for managed resources, Create and Update
//!
//! A resource either produces a complete output or an error; nothing partial
//! escapes. In a batch, one resource's error never stops the next.
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! let spec = SpecLoader::open(std::path::Path::new("graph.json")).await?.parse()?;
//! let orchestrator = Orchestrator::new(spec, GeneratorConfig::default());
//! let report = orchestrator.generate_all(KNOWN_RESOURCE_PATHS.iter().copied());
//! println!("{} generated, {} failed", report.outputs.len(), report.failures.len());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use super::{
  augment::AugmentSet,
  error::{GenerationError, GenerationResult},
  metrics::{GenerationStats, GenerationWarning},
  path::PathTopology,
  projection::{
    ProjectionContext,
    create::{self, CreateProjection},
    read::{self, ReadProjection},
    schema::{self, SchemaProjection},
    update::{self, UpdateProjection},
  },
  registry::{ModelDeduplicator, ModelRegistry},
  resolver::ReferenceResolver,
  resource::{BehaviorMode, ResourceDescriptor},
  schema_tree::{SchemaNode, SchemaTreeBuilder},
};

/// Options applied to every resource in a run.
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct GeneratorConfig {
  #[builder(default)]
  pub augments: AugmentSet,
}

/// Everything generated for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOutput {
  pub name: String,
  pub path: String,
  pub mode: BehaviorMode,
  pub tree: SchemaNode,
  pub schema: SchemaProjection,
  pub read: ReadProjection,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub create: Option<CreateProjection>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub update: Option<UpdateProjection>,
  pub models: ModelRegistry,
  #[serde(skip)]
  pub warnings: Vec<GenerationWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceFailure {
  pub path: String,
  pub error: GenerationError,
}

/// Outcome of a batch run: complete outputs, per-path failures and aggregate stats.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
  pub outputs: Vec<ResourceOutput>,
  pub failures: Vec<ResourceFailure>,
  pub stats: GenerationStats,
}

pub struct Orchestrator {
  spec: oas3::Spec,
  resolver: ReferenceResolver,
  config: GeneratorConfig,
}

impl Orchestrator {
  /// Resolves the document's component table once; every resource shares the result.
  pub fn new(spec: oas3::Spec, config: GeneratorConfig) -> Self {
    let resolver = ReferenceResolver::new(&spec);
    Self { spec, resolver, config }
  }

  pub fn describe(&self, path: &str) -> GenerationResult<ResourceDescriptor> {
    let augment = self.config.augments.for_path(path).cloned().unwrap_or_default();
    ResourceDescriptor::describe(&self.spec, &self.resolver, path, augment)
  }

  pub fn generate_resource(&self, path: &str) -> GenerationResult<ResourceOutput> {
    let resource = self.describe(path)?;

    let mut tree = SchemaTreeBuilder::new(&self.resolver)
      .with_exclusions(&resource.augment.exclude_properties)
      .build(&resource.operations.response_schema)?;
    let models = ModelDeduplicator::new(&resource.type_name).deduplicate(&mut tree)?;

    let ctx = ProjectionContext::new(&resource, &tree, &models);
    let schema = schema::project(&ctx, resource.mode)?;
    let read = read::project(&ctx)?;
    let (create, update) = match resource.mode {
      BehaviorMode::Managed => (Some(create::project(&ctx)?), Some(update::project(&ctx)?)),
      BehaviorMode::ReadOnly => (None, None),
    };
    let warnings = resource_warnings(&resource, &tree);

    Ok(ResourceOutput {
      name: resource.name,
      path: path.to_string(),
      mode: resource.mode,
      tree,
      schema,
      read,
      create,
      update,
      models,
      warnings,
    })
  }

  /// Generates every path in order, isolating failures per resource.
  ///
  /// Outputs are keyed by resource name downstream, so a path whose name was
  /// already produced earlier in the run fails instead of replacing it.
  pub fn generate_all<'p>(&self, paths: impl IntoIterator<Item = &'p str>) -> BatchReport {
    let mut report = BatchReport::default();
    report.stats.components_resolved = self.resolver.len();
    let mut names = BTreeMap::<String, &str>::new();

    for path in paths {
      let generated = self.generate_resource(path).and_then(|output| match names.get(&output.name) {
        Some(existing) => Err(GenerationError::ResourceNameCollision {
          name: output.name,
          existing: (*existing).to_string(),
        }),
        None => {
          names.insert(output.name.clone(), path);
          Ok(output)
        }
      });

      match generated {
        Ok(output) => {
          report.stats.record_output(&output);
          report.stats.record_warnings(output.warnings.iter().cloned());
          report.outputs.push(output);
        }
        Err(error) => {
          report.stats.record_failure(path, &error);
          report.failures.push(ResourceFailure {
            path: path.to_string(),
            error,
          });
        }
      }
    }

    report
  }
}

fn resource_warnings(resource: &ResourceDescriptor, tree: &SchemaNode) -> Vec<GenerationWarning> {
  let mut warnings = vec![];
  let path = resource.path.template();

  if let PathTopology::Unresolved { trailing } = resource.path.topology() {
    warnings.push(GenerationWarning::UnresolvedTopology {
      path: path.to_string(),
      trailing: trailing.join("/"),
    });
  }

  let unknown = resource
    .operations
    .select_fields
    .iter()
    .filter(|field| tree.property(field).is_none())
    .map(String::as_str)
    .collect::<Vec<_>>();
  if !unknown.is_empty() {
    warnings.push(GenerationWarning::UnknownSelectFields {
      path: path.to_string(),
      fields: unknown.join(", "),
    });
  }

  warnings
}
