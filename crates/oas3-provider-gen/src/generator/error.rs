use thiserror::Error;

use super::{classifier::UnsupportedShape, path::PathParseError};

/// Unrecoverable failures while projecting one resource.
///
/// Every variant is resource-scoped: the orchestrator records it against the
/// resource path being generated and moves on to the next resource.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
  #[error("broken reference '{reference}': no such schema in components")]
  BrokenReference { reference: String },

  #[error("schema cycle detected: {}", .chain.join(" -> "))]
  SchemaCycle { chain: Vec<String> },

  #[error("model name '{name}' claimed by two different shapes: {existing} vs {incoming}")]
  ModelNameCollision {
    name: String,
    existing: String,
    incoming: String,
  },

  #[error("unsupported shape for property '{property}' of '{schema}': {reason}")]
  UnsupportedShape {
    schema: String,
    property: String,
    reason: UnsupportedShape,
  },

  #[error("property '{property}' refers to a model that was never registered")]
  MissingModel { property: String },

  #[error("path '{path}' is not declared in the document")]
  PathNotFound { path: String },

  #[error("path '{path}' has no GET operation returning a schema")]
  MissingReadOperation { path: String },

  #[error("invalid path template '{path}': {source}")]
  InvalidPath {
    path: String,
    #[source]
    source: PathParseError,
  },

  #[error("resource name '{name}' is already taken by '{existing}' in this run")]
  ResourceNameCollision { name: String, existing: String },

  #[error("path '{path}' has {} literal segments after its last parameter ({}); create target is ambiguous", .trailing.len(), .trailing.join("/"))]
  UnresolvedTopology { path: String, trailing: Vec<String> },
}

impl GenerationError {
  pub(crate) fn cycle(chain: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self::SchemaCycle {
      chain: chain.into_iter().map(Into::into).collect(),
    }
  }

  pub(crate) fn broken(reference: impl Into<String>) -> Self {
    Self::BrokenReference {
      reference: reference.into(),
    }
  }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
