use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    augment::AugmentSet,
    catalog::KNOWN_RESOURCE_PATHS,
    metrics::GenerationStats,
    orchestrator::{BatchReport, GeneratorConfig, Orchestrator, ResourceOutput},
    render::{JsonRenderer, RenderedFile, Renderer},
  },
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub resource_paths: Vec<String>,
  pub input: PathBuf,
  pub output: PathBuf,
  pub augment: Option<PathBuf>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      resource_path,
      input,
      output,
      augment,
      verbose,
      quiet,
    } = command;

    let resource_paths = resource_path.map_or_else(
      || KNOWN_RESOURCE_PATHS.iter().map(|path| (*path).to_string()).collect(),
      |path| vec![path],
    );

    Self {
      resource_paths,
      input,
      output,
      augment,
      verbose,
      quiet,
    }
  }

  async fn load_spec(&self) -> anyhow::Result<oas3::Spec> {
    SpecLoader::open(&self.input).await?.parse()
  }

  async fn load_augments(&self) -> anyhow::Result<AugmentSet> {
    match &self.augment {
      Some(path) => AugmentSet::load(path).await,
      None => Ok(AugmentSet::default()),
    }
  }

  async fn write_files(&self, files: &[RenderedFile]) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&self.output).await?;
    for file in files {
      tokio::fs::write(self.output.join(&file.name), &file.contents).await?;
    }
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI document from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_augments(&self, augments: &AugmentSet) {
    let Some(path) = &self.config.augment else {
      return;
    };
    let message = if augments.is_empty() {
      format!("No augments declared in: {}", path.display())
    } else {
      format!("Loaded {} augments from: {}", augments.len(), path.display())
    };
    self.info(&message.with(self.colors.primary()).to_string());
  }

  fn log_generating(&self) {
    self.info(
      &format!("Generating {} resources...", self.config.resource_paths.len())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_resource(&self, output: &ResourceOutput) {
    if !self.config.verbose || self.config.quiet {
      return;
    }
    let models = if output.models.is_empty() {
      "no models".to_string()
    } else {
      format!("{} models", output.models.len())
    };
    println!(
      "              {} {} {}",
      output.name.as_str().with(self.colors.value()),
      format!("[{}]", output.mode).with(self.colors.mode(output.mode)),
      format!("{} attributes, {models}", output.schema.attribute_count()).with(self.colors.info())
    );
    for model in output.models.names() {
      println!("                {}", model.with(self.colors.info()));
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Components resolved:", stats.components_resolved.to_string());
    self.stat("Resources generated:", stats.resources_generated.to_string());
    self.stat(
      "",
      format!(
        "{} managed, {} read-only",
        stats.managed_resources, stats.read_only_resources
      ),
    );
    self.stat("Attributes:", stats.attributes_generated.to_string());
    self.stat("Models:", stats.models_registered.to_string());
    if stats.resources_failed > 0 {
      self.stat("Failed:", stats.resources_failed.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
  }

  /// Skipped resources always reach stderr; other warnings only when verbose.
  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      let skipped = warning.is_skipped_resource();
      if !skipped && (!self.config.verbose || self.config.quiet) {
        continue;
      }

      if !printed_header && !self.config.quiet {
        println!();
        printed_header = true;
      }

      let (label, color) = if skipped {
        ("Skipped:", self.colors.failure())
      } else {
        ("Warning:", self.colors.accent())
      };
      eprintln!("{} {}", label.with(color), warning.to_string().with(self.colors.primary()));
    }
  }

  fn log_writing(&self, count: usize) {
    self.info(
      &format!("Writing {count} files to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated resource projections".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_resources(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let spec = config.load_spec().await?;
  let augments = config.load_augments().await?;
  logger.log_augments(&augments);

  logger.log_generating();
  let orchestrator = Orchestrator::new(spec, GeneratorConfig::builder().augments(augments).build());
  let BatchReport { outputs, failures, stats } =
    orchestrator.generate_all(config.resource_paths.iter().map(String::as_str));

  let renderer = JsonRenderer;
  let mut files = vec![];
  for output in &outputs {
    logger.log_resource(output);
    files.extend(renderer.render(output)?);
  }

  logger.print_statistics(&stats);
  logger.print_warnings(&stats);

  if !files.is_empty() {
    logger.log_writing(files.len());
    config.write_files(&files).await?;
  }

  if !failures.is_empty() {
    anyhow::bail!("{} of {} resources failed", failures.len(), config.resource_paths.len());
  }

  logger.log_success();
  Ok(())
}
