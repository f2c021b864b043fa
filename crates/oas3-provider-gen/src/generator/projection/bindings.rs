use crate::reserved::model_field_name;

/// Index of a binding inside a [`BindingArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BindingId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingKind {
  Root,
  /// A fresh local variable, named after its parent.
  Local,
  /// A field access on its parent.
  Field,
}

#[derive(Debug, Clone)]
struct Binding {
  name: String,
  kind: BindingKind,
}

/// Variable names for one projection walk.
///
/// Bindings are addressed by index so nested walks can hold on to their
/// parents while the arena keeps growing.
#[derive(Debug, Clone, Default)]
pub(crate) struct BindingArena {
  bindings: Vec<Binding>,
}

impl BindingArena {
  pub(crate) fn root(&mut self, name: &str) -> BindingId {
    self.push(name.to_string(), BindingKind::Root)
  }

  /// A new local derived from `parent` (`response` + `passwordProfile` -> `responsePasswordProfile`).
  ///
  /// Locals are unique within the arena; a clash gets a numeric suffix.
  pub(crate) fn local(&mut self, parent: BindingId, segment: &str) -> BindingId {
    let base = format!("{}{}", self.local_stem(parent), model_field_name(segment));
    let mut name = base.clone();
    let mut counter = 2;
    while self.bindings.iter().any(|b| b.kind == BindingKind::Local && b.name == name) {
      name = format!("{base}{counter}");
      counter += 1;
    }
    self.push(name, BindingKind::Local)
  }

  /// A field of `parent` (`state` + `passwordProfile` -> `state.PasswordProfile`).
  pub(crate) fn field(&mut self, parent: BindingId, field: &str) -> BindingId {
    let name = format!("{}.{}", self.name(parent), model_field_name(field));
    self.push(name, BindingKind::Field)
  }

  pub(crate) fn name(&self, id: BindingId) -> &str {
    &self.bindings[id.0].name
  }

  /// Locals derive their names from the nearest non-field ancestor, dot-free.
  fn local_stem(&self, id: BindingId) -> String {
    let binding = &self.bindings[id.0];
    match binding.kind {
      BindingKind::Root | BindingKind::Local => binding.name.clone(),
      BindingKind::Field => binding.name.replace('.', ""),
    }
  }

  fn push(&mut self, name: String, kind: BindingKind) -> BindingId {
    self.bindings.push(Binding { name, kind });
    BindingId(self.bindings.len() - 1)
  }
}
