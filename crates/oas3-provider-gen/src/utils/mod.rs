pub mod refs;
pub mod schema_ext;
pub mod spec;

pub(crate) use refs::{extract_schema_ref_name, parse_schema_ref_path, short_component_name};
pub(crate) use schema_ext::SchemaExt;
