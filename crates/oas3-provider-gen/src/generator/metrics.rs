use strum::Display;

use super::{orchestrator::ResourceOutput, resource::BehaviorMode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub resources_generated: usize,
  pub resources_failed: usize,
  pub managed_resources: usize,
  pub read_only_resources: usize,
  pub attributes_generated: usize,
  pub models_registered: usize,
  pub components_resolved: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_output(&mut self, output: &ResourceOutput) {
    self.resources_generated += 1;
    match output.mode {
      BehaviorMode::Managed => self.managed_resources += 1,
      BehaviorMode::ReadOnly => self.read_only_resources += 1,
    }
    self.attributes_generated += output.schema.attribute_count();
    self.models_registered += output.models.len();
  }

  pub fn record_failure(&mut self, path: &str, error: &impl std::fmt::Display) {
    self.resources_failed += 1;
    self.record_warning(GenerationWarning::ResourceSkipped {
      path: path.to_string(),
      error: error.to_string(),
    });
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "{path}: {error}")]
  ResourceSkipped { path: String, error: String },
  #[strum(to_string = "'{path}' has more than one literal after its last parameter ({trailing}); its create target is unresolved")]
  UnresolvedTopology { path: String, trailing: String },
  #[strum(to_string = "'{path}': $select names fields the schema does not have: {fields}")]
  UnknownSelectFields { path: String, fields: String },
}

impl GenerationWarning {
  pub fn is_skipped_resource(&self) -> bool {
    matches!(self, Self::ResourceSkipped { .. })
  }
}
