mod augment;
mod registry;
mod resolver;
mod resource;
pub(crate) mod support;
