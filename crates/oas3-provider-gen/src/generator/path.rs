use std::collections::BTreeSet;

use serde::Serialize;
use strum::Display;

use super::error::{GenerationError, GenerationResult};
use crate::reserved::{to_attribute_name, to_type_name};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PathParseError {
  #[strum(to_string = "unclosed '{{' at position {position} in segment '{segment}'")]
  UnclosedBrace { segment: String, position: usize },
  #[strum(to_string = "empty parameter '{{}}' in segment '{segment}'")]
  EmptyParameter { segment: String },
  #[strum(to_string = "unmatched '}}' at position {position} in segment '{segment}'")]
  UnmatchedClosingBrace { segment: String, position: usize },
  #[strum(to_string = "nested '{{' at position {position} in segment '{segment}'")]
  NestedBraces { segment: String, position: usize },
  #[strum(to_string = "segment '{segment}' mixes a parameter with literal text")]
  MixedSegment { segment: String },
  #[strum(to_string = "parameter '{parameter}' is not of the form '{{entity-key}}'")]
  MissingKeySeparator { parameter: String },
  #[strum(to_string = "parameter '{parameter}' appears more than once")]
  DuplicateParameter { parameter: String },
  #[strum(to_string = "path has no segments")]
  EmptyPath,
}

impl std::error::Error for PathParseError {}

/// A `{entity-key}` path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PathParameter {
  pub name: String,
  pub entity: String,
  pub key: String,
}

impl PathParameter {
  fn parse(name: &str) -> Result<Self, PathParseError> {
    match name.rsplit_once('-') {
      Some((entity, key)) if !entity.is_empty() && !key.is_empty() => Ok(Self {
        name: name.to_string(),
        entity: entity.to_string(),
        key: key.to_string(),
      }),
      _ => Err(PathParseError::MissingKeySeparator {
        parameter: name.to_string(),
      }),
    }
  }

  /// SDK lookup accessor for this parameter (`user-id` -> `ByUserId`).
  pub fn lookup_method(&self) -> String {
    format!("By{}{}", to_type_name(&self.entity), to_type_name(&self.key))
  }

  /// Attribute an ancestor parameter binds to (`user-id` -> `user_id`).
  pub fn ancestor_attribute(&self) -> String {
    to_attribute_name(&format!("{}_{}", self.entity, self.key))
  }

  /// Attribute the resource's own final parameter binds to (`user-id` -> `id`).
  pub fn own_attribute(&self) -> String {
    to_attribute_name(&self.key)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
  Literal(String),
  Parameter(PathParameter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentPart<'a> {
  Literal(&'a str),
  Param(&'a str),
}

impl PathSegment {
  fn parse(segment: &str) -> Result<Self, PathParseError> {
    match tokenize(segment)?.as_slice() {
      [SegmentPart::Literal(literal)] => Ok(Self::Literal((*literal).to_string())),
      [SegmentPart::Param(name)] => Ok(Self::Parameter(PathParameter::parse(name)?)),
      _ => Err(PathParseError::MixedSegment {
        segment: segment.to_string(),
      }),
    }
  }

  pub fn as_parameter(&self) -> Option<&PathParameter> {
    match self {
      Self::Parameter(parameter) => Some(parameter),
      Self::Literal(_) => None,
    }
  }
}

fn tokenize(segment: &str) -> Result<Vec<SegmentPart<'_>>, PathParseError> {
  let mut parts = vec![];
  let mut rest = segment;
  let mut offset = 0;

  while !rest.is_empty() {
    let Some(open_pos) = rest.find('{') else {
      break;
    };

    if let Some(stray_close) = rest[..open_pos].find('}') {
      return Err(PathParseError::UnmatchedClosingBrace {
        segment: segment.to_string(),
        position: offset + stray_close,
      });
    }

    if open_pos > 0 {
      parts.push(SegmentPart::Literal(&rest[..open_pos]));
    }

    let after_open = &rest[open_pos + 1..];
    let Some(close_pos) = after_open.find('}') else {
      return Err(PathParseError::UnclosedBrace {
        segment: segment.to_string(),
        position: offset + open_pos,
      });
    };

    if let Some(nested) = after_open[..close_pos].find('{') {
      return Err(PathParseError::NestedBraces {
        segment: segment.to_string(),
        position: offset + open_pos + 1 + nested,
      });
    }

    let name = &after_open[..close_pos];
    if name.is_empty() {
      return Err(PathParseError::EmptyParameter {
        segment: segment.to_string(),
      });
    }
    parts.push(SegmentPart::Param(name));

    let consumed = open_pos + 1 + close_pos + 1;
    offset += consumed;
    rest = &rest[consumed..];
  }

  if let Some(stray_close) = rest.find('}') {
    return Err(PathParseError::UnmatchedClosingBrace {
      segment: segment.to_string(),
      position: offset + stray_close,
    });
  }
  if !rest.is_empty() {
    parts.push(SegmentPart::Literal(rest));
  }

  Ok(parts)
}

/// How the segments after the last parameter shape the resource.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
pub enum PathTopology {
  /// No parameters at all: a collection or singleton.
  Collection,
  /// Ends in a parameter: one instance addressed by key.
  Item,
  /// Exactly one literal after the last parameter.
  NestedLiteral,
  /// More than one literal after the last parameter; the create target cannot be derived.
  #[strum(to_string = "Unresolved({trailing:?})")]
  Unresolved { trailing: Vec<String> },
}

/// A parameter lookup in an accessor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
  pub parameter: PathParameter,
  pub method: String,
  /// Attribute whose value is passed to the lookup.
  pub attribute: String,
}

/// One hop of an accessor chain: navigate through literal accessors, then optionally look up by parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessorStep {
  pub navigation: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lookup: Option<Lookup>,
}

/// A path parameter and the attribute that supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathBinding {
  pub parameter: String,
  pub attribute: String,
  /// True for the resource's own key; false for ancestor parameters.
  pub own_key: bool,
}

/// A parsed resource path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
  template: String,
  segments: Vec<PathSegment>,
}

impl ResourcePath {
  pub fn parse(template: &str) -> Result<Self, PathParseError> {
    let segments = template
      .split('/')
      .filter(|s| !s.is_empty())
      .map(PathSegment::parse)
      .collect::<Result<Vec<_>, _>>()?;

    if segments.is_empty() {
      return Err(PathParseError::EmptyPath);
    }

    let mut seen = BTreeSet::new();
    for parameter in segments.iter().filter_map(PathSegment::as_parameter) {
      if !seen.insert(parameter.name.as_str()) {
        return Err(PathParseError::DuplicateParameter {
          parameter: parameter.name.clone(),
        });
      }
    }

    Ok(Self {
      template: template.to_string(),
      segments,
    })
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn parameters(&self) -> impl Iterator<Item = &PathParameter> {
    self.segments.iter().filter_map(PathSegment::as_parameter)
  }

  fn last_parameter_index(&self) -> Option<usize> {
    self
      .segments
      .iter()
      .rposition(|segment| matches!(segment, PathSegment::Parameter(_)))
  }

  fn trailing_literals(&self) -> Vec<&str> {
    let start = self.last_parameter_index().map_or(0, |index| index + 1);
    self.segments[start..]
      .iter()
      .filter_map(|segment| match segment {
        PathSegment::Literal(literal) => Some(literal.as_str()),
        PathSegment::Parameter(_) => None,
      })
      .collect()
  }

  pub fn topology(&self) -> PathTopology {
    if self.last_parameter_index().is_none() {
      return PathTopology::Collection;
    }
    match self.trailing_literals().as_slice() {
      [] => PathTopology::Item,
      [_] => PathTopology::NestedLiteral,
      trailing => PathTopology::Unresolved {
        trailing: trailing.iter().map(|s| (*s).to_string()).collect(),
      },
    }
  }

  /// Resource name: parameter entities followed by trailing literals, in `snake_case`.
  ///
  /// `/users/{user-id}` -> `user`, `/groups/{group-id}/owners` -> `group_owners`,
  /// `/users` -> `users`.
  pub fn resource_name(&self) -> String {
    let parts = self
      .parameters()
      .map(|p| p.entity.as_str())
      .chain(self.trailing_literals())
      .map(to_attribute_name)
      .collect::<Vec<_>>();
    parts.join("_")
  }

  /// The chain of accessors that reaches an existing instance.
  ///
  /// One step per parameter, each carrying the literal accessors in front of
  /// it, then a final literal-only step when literals trail the last parameter.
  pub fn read_chain(&self) -> Vec<AccessorStep> {
    let own = match self.topology() {
      PathTopology::Item => self.last_parameter_index(),
      _ => None,
    };

    let mut steps = vec![];
    let mut navigation = vec![];
    for (index, segment) in self.segments.iter().enumerate() {
      match segment {
        PathSegment::Literal(literal) => navigation.push(to_type_name(literal)),
        PathSegment::Parameter(parameter) => {
          let attribute = if own == Some(index) {
            parameter.own_attribute()
          } else {
            parameter.ancestor_attribute()
          };
          steps.push(AccessorStep {
            navigation: std::mem::take(&mut navigation),
            lookup: Some(Lookup {
              parameter: parameter.clone(),
              method: parameter.lookup_method(),
              attribute,
            }),
          });
        }
      }
    }
    if !navigation.is_empty() {
      steps.push(AccessorStep { navigation, lookup: None });
    }
    steps
  }

  /// The chain of accessors a new instance is created through.
  ///
  /// For an item path the final lookup is dropped: the instance is created on
  /// the collection one level up. With exactly one trailing literal
  /// (`/users/{user-id}/foo`) no parameter belongs to the resource itself, so
  /// the chain equals [`Self::read_chain`]: the `user-id` lookup addresses the
  /// parent and the instance is created on its `foo` collection. Paths with
  /// more than one trailing literal are rejected rather than guessed at.
  pub fn create_chain(&self) -> GenerationResult<Vec<AccessorStep>> {
    let mut chain = self.read_chain();
    match self.topology() {
      PathTopology::Item => {
        if let Some(last) = chain.last_mut() {
          last.lookup = None;
        }
        Ok(chain)
      }
      PathTopology::Collection | PathTopology::NestedLiteral => Ok(chain),
      PathTopology::Unresolved { trailing } => Err(GenerationError::UnresolvedTopology {
        path: self.template.clone(),
        trailing,
      }),
    }
  }

  /// Attributes that supply path parameters, in path order.
  pub fn bindings(&self) -> Vec<PathBinding> {
    let own = match self.topology() {
      PathTopology::Item => self.last_parameter_index(),
      _ => None,
    };
    self
      .segments
      .iter()
      .enumerate()
      .filter_map(|(index, segment)| {
        let parameter = segment.as_parameter()?;
        let own_key = own == Some(index);
        Some(PathBinding {
          parameter: parameter.name.clone(),
          attribute: if own_key {
            parameter.own_attribute()
          } else {
            parameter.ancestor_attribute()
          },
          own_key,
        })
      })
      .collect()
  }
}

#[cfg(test)]
impl ResourcePath {
  pub fn segments(&self) -> &[PathSegment] {
    &self.segments
  }
}
