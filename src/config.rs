//! contractc project configuration
//!
//! Handles discovery and loading of `contractc.yaml`. The file is looked up
//! in the working directory and then in each parent directory; the first one
//! found wins. Every field is optional and CLI flags override it.
//!
//! ```yaml
//! targets: [typescript, rust]
//! out_dir: generated
//! provenance: true
//! naming:
//!   pattern: "{name}.validators.{ext}"
//! typescript:
//!   types: true
//! rust:
//!   format: true
//! template_dir: templates
//! ```

use crate::error::{Error, Result};
use crate::render::Target;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file name
pub const CONFIG_FILE: &str = "contractc.yaml";

/// Project configuration (`contractc.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Target languages to generate
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,

    /// Output directory, relative to the config file
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Emit the provenance header
    #[serde(default = "default_true")]
    pub provenance: bool,

    /// File naming conventions
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub typescript: TypeScriptConfig,

    #[serde(default)]
    pub rust: RustConfig,

    /// Directory with template overrides, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

fn default_targets() -> Vec<Target> {
    vec![Target::TypeScript]
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Naming convention for generated files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NamingConfig {
    /// Unit file pattern: {name}, {target}, {ext}
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    "{name}.validators.{ext}".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
        }
    }
}

/// TypeScript output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeScriptConfig {
    /// Emit `export type` aliases ahead of the validators
    #[serde(default = "default_true")]
    pub types: bool,
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self { types: true }
    }
}

/// Rust output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RustConfig {
    /// Pretty-print generated units
    #[serde(default = "default_true")]
    pub format: bool,
}

impl Default for RustConfig {
    fn default() -> Self {
        Self { format: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            out_dir: default_out_dir(),
            provenance: true,
            naming: NamingConfig::default(),
            typescript: TypeScriptConfig::default(),
            rust: RustConfig::default(),
            template_dir: None,
        }
    }
}

impl Config {
    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        if config.targets.is_empty() {
            return Err(Error::Config("targets must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Load a configuration file. Relative paths inside it are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut config = Self::from_yaml(&content)?;
        if let Some(base) = path.parent() {
            config.out_dir = base.join(&config.out_dir);
            config.template_dir = config.template_dir.map(|dir| base.join(dir));
        }
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Find `contractc.yaml` in `start` or any of its ancestors
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest configuration, or defaults if there is none
    pub fn load_or_default(start: &Path) -> Result<Self> {
        match Self::discover(start) {
            Some(path) => Self::load(&path),
            None => {
                debug!(start = %start.display(), "no {} found, using defaults", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// Apply naming pattern to generate output filename
    pub fn file_name(&self, name: &str, target: Target) -> String {
        self.naming
            .pattern
            .replace("{name}", name)
            .replace("{target}", &target.to_string())
            .replace("{ext}", target.extension())
    }

    /// Full output path of a unit
    pub fn output_path(&self, name: &str, target: Target) -> PathBuf {
        self.out_dir.join(self.file_name(name, target))
    }
}
