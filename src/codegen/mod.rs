//! Code Generation
//!
//! Converts source-language DTO declarations into TypeScript types.
//!
//! Architecture:
//! - types: C# type name → TypeScript type (static table + fallbacks)
//! - fields: one parameter line → rendered property
//! - scanner: source file → ordered `TypeRecord`s
//! - typescript: `TypeRecord`s → `.ts` file
//! - Converter: per-language facade over the pipeline, picked from a
//!   `ConverterRegistry` by language identifier

pub mod csharp;
pub mod fields;
pub mod scanner;
pub mod types;
pub mod typescript;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::walk::walk_matching;

pub use csharp::CSharpConverter;
pub use fields::{FormattedField, ParsedField};
pub use scanner::TypeRecord;
pub use types::{map_type, MappedType};
pub use typescript::TypeScriptWriter;

// =============================================================================
// Outcomes
// =============================================================================

/// Result of converting a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// Output written with this many types
    Written { path: PathBuf, type_count: usize },
    /// No complete declaration found; nothing written
    NoDeclarations,
}

/// One successfully converted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub type_count: usize,
}

/// Two inputs in one batch that wrote the same output file; the later one wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCollision {
    pub output: PathBuf,
    pub overwritten: PathBuf,
    pub kept: PathBuf,
}

/// Summary of a directory conversion
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConvertedFile>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, ConvertError)>,
    pub collisions: Vec<OutputCollision>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn type_count(&self) -> usize {
        self.converted.iter().map(|c| c.type_count).sum()
    }

    fn record(&mut self, input: &Path, result: Result<ConvertOutcome>) {
        match result {
            Ok(ConvertOutcome::Written { path, type_count }) => {
                if let Some(earlier) = self.converted.iter().rev().find(|c| c.output == path) {
                    tracing::warn!(
                        output = %path.display(),
                        overwritten = %earlier.input.display(),
                        kept = %input.display(),
                        "output file written twice in one batch"
                    );
                    self.collisions.push(OutputCollision {
                        output: path.clone(),
                        overwritten: earlier.input.clone(),
                        kept: input.to_path_buf(),
                    });
                }
                self.converted.push(ConvertedFile {
                    input: input.to_path_buf(),
                    output: path,
                    type_count,
                });
            }
            Ok(ConvertOutcome::NoDeclarations) => self.skipped.push(input.to_path_buf()),
            Err(err) => self.fail(input.to_path_buf(), err),
        }
    }

    fn fail(&mut self, path: PathBuf, err: ConvertError) {
        tracing::warn!(path = %path.display(), error = %err, "conversion failed");
        self.failures.push((path, err));
    }
}

// =============================================================================
// Converter
// =============================================================================

/// A per-language converter
pub trait Converter {
    /// Language identifier this converter is registered under
    fn language(&self) -> &'static str;

    /// File name suffix of source files (e.g. `.cs`)
    fn source_suffix(&self) -> &'static str;

    /// Convert one source file into one output file
    fn convert(&self, input: &Path) -> Result<ConvertOutcome>;

    /// Convert every matching file under `input_dir`.
    ///
    /// A failing file is recorded in the report and does not stop the batch.
    fn convert_directory(&self, input_dir: &Path) -> BatchReport {
        let mut report = BatchReport::default();
        let mut inputs = Vec::new();
        walk_matching(
            input_dir,
            self.source_suffix(),
            |path, _| inputs.push(path.to_path_buf()),
            |path, err| report.fail(path, err),
        );

        for input in inputs {
            let result = self.convert(&input);
            report.record(&input, result);
        }

        tracing::debug!(
            dir = %input_dir.display(),
            converted = report.converted.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "directory conversion finished"
        );
        report
    }
}

// =============================================================================
// Registry
// =============================================================================

type Constructor = fn(TypeScriptWriter) -> Box<dyn Converter>;

/// Language identifier → converter constructor
pub struct ConverterRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(csharp::LANGUAGE, |writer| Box::new(CSharpConverter::new(writer)));
        registry
    }
}

impl ConverterRegistry {
    /// Registry with every built-in language
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with no languages
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register (or replace) a language
    pub fn register(&mut self, language: &'static str, constructor: Constructor) {
        self.constructors.insert(language, constructor);
    }

    pub fn is_supported(&self, language: &str) -> bool {
        self.constructors.contains_key(language)
    }

    /// Registered language identifiers, sorted
    pub fn languages(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }

    /// Build the converter for `language` writing through `writer`
    pub fn create(&self, language: &str, writer: TypeScriptWriter) -> Result<Box<dyn Converter>> {
        let constructor = self
            .constructors
            .get(language)
            .ok_or_else(|| ConvertError::UnsupportedLanguage(language.to_string()))?;
        Ok(constructor(writer))
    }
}
