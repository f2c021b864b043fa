use std::path::Path;

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};

use crate::{
  generator::{
    catalog::KNOWN_RESOURCE_PATHS,
    orchestrator::{GeneratorConfig, Orchestrator},
  },
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

pub async fn list_resources(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(input).await?.parse()?;
  let orchestrator = Orchestrator::new(spec, GeneratorConfig::default());

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["PATH", "RESOURCE", "MODE", "SCHEMA"] {
    header.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(header);

  for path in KNOWN_RESOURCE_PATHS {
    let mut row = Row::new();
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));

    match orchestrator.describe(path) {
      Ok(resource) => {
        row.add_cell(
          Cell::new(&resource.name)
            .fg(IntoComfyColor::into(colors.value()))
            .add_attribute(Attribute::Bold),
        );
        row.add_cell(Cell::new(resource.mode).fg(IntoComfyColor::into(colors.mode(resource.mode))));
        row.add_cell(
          Cell::new(resource.operations.response_schema_name().unwrap_or("inline"))
            .fg(IntoComfyColor::into(colors.info())),
        );
      }
      Err(error) => {
        row.add_cell(Cell::new("-"));
        row.add_cell(Cell::new("unavailable").fg(IntoComfyColor::into(colors.failure())));
        row.add_cell(Cell::new(error).fg(IntoComfyColor::into(colors.failure())));
      }
    }
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
