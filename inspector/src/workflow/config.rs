use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one inspection run, loaded from YAML and/or the command line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub ldr: Option<PathBuf>,
    pub raw: Option<PathBuf>,
    /// Patches to decode; zero decodes until the raw file is exhausted.
    pub max_patches: usize,
    pub json: bool,
    pub fields: bool,
    pub spectrum: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            ldr: None,
            raw: None,
            max_patches: 1,
            json: false,
            fields: false,
            spectrum: false,
        }
    }
}

/// Command-line values that take precedence over a loaded config.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub ldr: Option<PathBuf>,
    pub raw: Option<PathBuf>,
    pub max_patches: Option<usize>,
    pub json: bool,
    pub fields: bool,
    pub spectrum: bool,
}

impl InspectConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: InspectConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.ldr.is_some() {
            self.ldr = overrides.ldr;
        }
        if overrides.raw.is_some() {
            self.raw = overrides.raw;
        }
        if let Some(max_patches) = overrides.max_patches {
            self.max_patches = max_patches;
        }
        self.json |= overrides.json;
        self.fields |= overrides.fields;
        self.spectrum |= overrides.spectrum;
        self
    }

    /// Leader and raw paths, or a usage error naming what is missing.
    pub fn inputs(&self) -> anyhow::Result<(&Path, &Path)> {
        match (self.ldr.as_deref(), self.raw.as_deref()) {
            (Some(ldr), Some(raw)) => Ok((ldr, raw)),
            (None, None) => bail!("no input: both --ldr and --raw are required"),
            (None, Some(_)) => bail!("no input: --ldr is required"),
            (Some(_), None) => bail!("no input: --raw is required"),
        }
    }
}
