use serde::Serialize;

use super::{
  ProjectionContext,
  bindings::BindingArena,
  create::{EncodeStep, PLAN_BINDING, REQUEST_BODY_BINDING, encode_property},
  read::STATE_BINDING,
};
use crate::generator::{error::GenerationResult, path::AccessorStep};

/// An encode step emitted only when the plan value differs from the stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardedStep {
  pub plan: String,
  pub state: String,
  pub step: EncodeStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjection {
  pub resource: String,
  pub sdk_type: String,
  /// Accessors to the existing instance.
  pub chain: Vec<AccessorStep>,
  pub plan: String,
  pub state: String,
  pub body: String,
  pub steps: Vec<GuardedStep>,
}

#[cfg(test)]
impl UpdateProjection {
  pub fn step(&self, property: &str) -> Option<&GuardedStep> {
    self.steps.iter().find(|s| s.step.property == property)
  }
}

/// Change detection happens per top-level property; a changed nested object is re-sent whole.
pub(crate) fn project(ctx: &ProjectionContext<'_>) -> GenerationResult<UpdateProjection> {
  let mut arena = BindingArena::default();
  let plan = arena.root(PLAN_BINDING);
  let state = arena.root(STATE_BINDING);
  let body = arena.root(REQUEST_BODY_BINDING);

  let mut steps = vec![];
  for property in ctx.tree.properties.iter().filter(|p| ctx.is_writable(p, true)) {
    let plan_field = arena.field(plan, &property.name);
    let state_field = arena.field(state, &property.name);
    steps.push(GuardedStep {
      plan: arena.name(plan_field).to_string(),
      state: arena.name(state_field).to_string(),
      step: encode_property(ctx, property, plan, body, &mut arena)?,
    });
  }

  Ok(UpdateProjection {
    resource: ctx.resource.name.clone(),
    sdk_type: ctx.resource.sdk_type.clone(),
    chain: ctx.resource.path.read_chain(),
    plan: PLAN_BINDING.to_string(),
    state: STATE_BINDING.to_string(),
    body: REQUEST_BODY_BINDING.to_string(),
    steps,
  })
}
