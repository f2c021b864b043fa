use super::orchestrator::ResourceOutput;

/// One file produced by a renderer, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
  pub name: String,
  pub contents: String,
}

/// Turns a complete resource output into files.
pub trait Renderer {
  fn render(&self, output: &ResourceOutput) -> anyhow::Result<Vec<RenderedFile>>;
}

/// Writes the projections and model registry of a resource as one pretty-printed JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
  fn render(&self, output: &ResourceOutput) -> anyhow::Result<Vec<RenderedFile>> {
    let mut contents = serde_json::to_string_pretty(output)?;
    contents.push('\n');
    Ok(vec![RenderedFile {
      name: format!("{}.json", output.name),
      contents,
    }])
  }
}
