//! Configuration management for the converter
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (`dto-converter.toml` in the platform config directory,
//!   or an explicit path)
//! - Environment variables (`DTO_CONVERTER__*`)
//!
//! ## Example config file (dto-converter.toml):
//! ```toml
//! [output]
//! header = false
//!
//! [[projects]]
//! name = "blog"
//! language = "csharp"
//! input_dir = "/home/me/blog-api/Models/DTOs"
//! output_dir = "/home/me/blog-web/src/types"
//! ```

use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::TypeScriptWriter;
use crate::error::{ConvertError, Result};
use crate::projects::Project;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "dto-converter.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Configured project aliases
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefix generated files with a "DO NOT EDIT" comment
    #[serde(default)]
    pub header: bool,
}

impl ConverterConfig {
    /// Platform config location, e.g. `~/.config/dto-converter/dto-converter.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "dto-converter", "dto-converter")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from `path` (if it exists) layered with the
    /// environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DTO_CONVERTER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Create an empty config file at `path`. Returns `false` if one exists.
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save(path)?;
        Ok(true)
    }

    /// Save configuration to a file (overwrites)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConvertError::io(dir, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConvertError::io(path, e))
    }

    /// Writer targeting `project`'s output directory
    pub fn writer_for(&self, project: &Project) -> TypeScriptWriter {
        TypeScriptWriter::new(&project.output_dir).with_header(self.output.header)
    }
}
