//! TypeScript Emitter
//!
//! Renders [`TypeRecord`]s as `export type` blocks and writes one `.ts` file
//! per input file under the configured output root.

use std::fs;
use std::path::{Path, PathBuf};

use super::scanner::TypeRecord;
use crate::error::{ConvertError, Result};

/// Extension of emitted files
pub const TS_EXTENSION: &str = "ts";

/// Writes TypeScript definitions under an output root
#[derive(Debug, Clone)]
pub struct TypeScriptWriter {
    out_root: PathBuf,
    header: bool,
}

impl TypeScriptWriter {
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
            header: false,
        }
    }

    /// Prefix every file with a generated-file comment
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn out_root(&self) -> &Path {
        &self.out_root
    }

    /// `<out_root>/<input stem>.ts`
    pub fn output_path(&self, input: &Path) -> PathBuf {
        output_path(input, &self.out_root)
    }

    /// Render all records, with the optional header naming `input`
    pub fn render_for(&self, records: &[TypeRecord], input: &Path) -> String {
        let body = render(records);
        if !self.header {
            return body;
        }
        let source = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("// Generated from {source} - DO NOT EDIT\n\n{body}")
    }

    /// Write all records from `input` into a single file, replacing any
    /// previous output. Returns the path written.
    pub fn write_all(&self, records: &[TypeRecord], input: &Path) -> Result<PathBuf> {
        let path = self.output_path(input);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConvertError::io(dir, e))?;
        }
        fs::write(&path, self.render_for(records, input)).map_err(|e| ConvertError::io(&path, e))?;
        tracing::info!(path = %path.display(), types = records.len(), "wrote TypeScript definitions");
        Ok(path)
    }
}

/// Render records as `export type` blocks separated by a blank line
pub fn render(records: &[TypeRecord]) -> String {
    let blocks: Vec<String> = records.iter().map(render_record).collect();
    blocks.join("\n")
}

fn render_record(record: &TypeRecord) -> String {
    let mut output = format!("export type {} = {{\n", record.name);
    for field in &record.fields {
        output.push_str("  ");
        output.push_str(&lower_first(field.as_str()));
        output.push('\n');
    }
    output.push_str("}\n");
    output
}

/// Replace the extension with `.ts` and relocate under `out_root`
pub fn output_path(input: &Path, out_root: &Path) -> PathBuf {
    let mut file_name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    file_name.push(".");
    file_name.push(TS_EXTENSION);
    out_root.join(file_name)
}

/// Lower-case the first character, leaving the rest untouched
fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
