//! C# record converter

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::scanner::scan_reader;
use super::{ConvertOutcome, Converter, TypeScriptWriter};
use crate::error::{ConvertError, Result};

/// Registry identifier for C#
pub const LANGUAGE: &str = "csharp";

/// Converts C# positional records into TypeScript types
#[derive(Debug, Clone)]
pub struct CSharpConverter {
    writer: TypeScriptWriter,
}

impl CSharpConverter {
    pub fn new(writer: TypeScriptWriter) -> Self {
        Self { writer }
    }
}

impl Converter for CSharpConverter {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn source_suffix(&self) -> &'static str {
        ".cs"
    }

    fn convert(&self, input: &Path) -> Result<ConvertOutcome> {
        tracing::debug!(path = %input.display(), "scanning");
        let file = File::open(input).map_err(|e| ConvertError::io(input, e))?;
        let records = scan_reader(BufReader::new(file)).map_err(|e| ConvertError::io(input, e))?;

        if records.is_empty() {
            return Ok(ConvertOutcome::NoDeclarations);
        }

        let path = self.writer.write_all(&records, input)?;
        Ok(ConvertOutcome::Written {
            path,
            type_count: records.len(),
        })
    }
}
