//! Project aliases
//!
//! A project names a source language, an input directory and an output
//! directory. Projects live in the `[[projects]]` array of the config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};

/// Names that can't be used for a project (languages and command words)
pub const RESERVED_NAMES: &[&str] = &[
    "csharp", "go", "java", "python", "typescript", "javascript", "cpp",
    "swift", "kotlin", "rust", "scala", "php", "objective-c", "fsharp",
    "dart", "ada", "haskell",
    "run", "list", "add", "remove", "help", "init", "projects", "set", "file",
    "r", "l", "a", "rm", "h", "i", "p", "s",
];

/// A named conversion target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub language: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Which directory of a project to update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl std::str::FromStr for Direction {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(ConvertError::InvalidDirection(other.to_string())),
        }
    }
}

impl ConverterConfig {
    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    fn find_project_mut(&mut self, name: &str) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ConvertError::ProjectNotFound(name.to_string()))
    }

    /// Add a project, replacing any existing project with the same name.
    /// Paths are stored as given; normalize them first with [`normalize_path`].
    pub fn add_project(&mut self, project: Project) -> Result<()> {
        if RESERVED_NAMES.contains(&project.name.as_str()) {
            return Err(ConvertError::ReservedName(project.name));
        }
        match self.projects.iter_mut().find(|p| p.name == project.name) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
        Ok(())
    }

    /// Remove a project by name, returning it
    pub fn remove_project(&mut self, name: &str) -> Result<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ConvertError::ProjectNotFound(name.to_string()))?;
        Ok(self.projects.remove(index))
    }

    /// Point a project's input or output directory at `path`
    pub fn set_project_dir(&mut self, name: &str, direction: Direction, path: PathBuf) -> Result<()> {
        let project = self.find_project_mut(name)?;
        match direction {
            Direction::In => project.input_dir = path,
            Direction::Out => project.output_dir = path,
        }
        Ok(())
    }

    /// One line per project: `name: language, in=..., out=...`, names
    /// right-aligned
    pub fn project_listing(&self) -> Vec<String> {
        let width = self.projects.iter().map(|p| p.name.len()).max().unwrap_or(0);
        self.projects
            .iter()
            .map(|p| {
                format!(
                    "{:>width$}: {}, in={}, out={}",
                    p.name,
                    p.language,
                    p.input_dir.display(),
                    p.output_dir.display(),
                )
            })
            .collect()
    }
}

/// Expand a leading `~` and make the path absolute
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => {
            let home = directories::BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .ok_or_else(|| {
                    ConvertError::io(path, std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found"))
                })?;
            home.join(rest)
        }
        Err(_) => path.to_path_buf(),
    };

    std::path::absolute(&expanded).map_err(|e| ConvertError::io(&expanded, e))
}
