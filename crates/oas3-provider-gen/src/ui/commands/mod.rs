pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_resources};
pub use list::list_resources;
