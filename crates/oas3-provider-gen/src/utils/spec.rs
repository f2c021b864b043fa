use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::OpenApiV3Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// Memory-mapped source document, parsed once per run.
pub struct SpecLoader {
  path: PathBuf,
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      path: path.to_path_buf(),
      file,
      format: SpecFormat::from_path(path),
    })
  }

  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    let bytes = self.file.as_slice();
    let spec = match self.format {
      SpecFormat::Json => serde_json::from_slice::<OpenApiV3Spec>(bytes)
        .with_context(|| format!("{} is not a valid OpenAPI JSON document", self.path.display()))?,
      SpecFormat::Yaml => {
        let content = std::str::from_utf8(bytes).context("YAML document is not valid UTF-8")?;
        oas3::from_yaml(content)
          .with_context(|| format!("{} is not a valid OpenAPI YAML document", self.path.display()))?
      }
    };
    Ok(spec)
  }
}
