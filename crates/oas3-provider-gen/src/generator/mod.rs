pub mod augment;
pub mod catalog;
pub mod classifier;
pub mod error;
pub(crate) mod inheritance;
pub mod metrics;
pub mod orchestrator;
pub mod path;
pub mod projection;
pub mod registry;
pub mod render;
pub(crate) mod resolver;
pub mod resource;
pub mod schema_tree;

#[cfg(test)]
mod tests;
