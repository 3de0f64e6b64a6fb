//! Declaration Scanner
//!
//! Line-based state machine that recovers C# positional `record`
//! declarations from a source file.
//!
//! ```text
//!            start line                       `)` closing the parameter list
//! Outside ───────────────► InsideDeclaration ───────────────────────────────► Outside
//!                              │      ▲                                  (record kept)
//!                              └──────┘ parameter lines
//! ```
//!
//! The scanner is deliberately permissive: anything outside a declaration is
//! ignored, and a declaration that is still open when the next header or the
//! end of input arrives is dropped. Comments and preprocessor lines are
//! skipped everywhere.

use std::io::BufRead;
use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use super::fields::{attributes_only, format_field, parse_field, FormattedField};

/// Matches `public record Person(`, `internal sealed record struct Point<T>(`, ...
static DECLARATION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:public|internal|private|protected|sealed|abstract|partial|readonly|file)\s+)*record(?:\s+(?:class|struct))?\s+([A-Za-z_][A-Za-z0-9_]*(?:\s*<[^>]*>)?)\s*\((.*)$",
    )
    .expect("declaration pattern is valid")
});

/// A recovered type: its name and rendered fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    pub name: String,
    pub fields: Vec<FormattedField>,
}

impl TypeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Outside,
    InsideDeclaration {
        record: TypeRecord,
        pending_attributes: Option<String>,
    },
}

/// Incremental scanner; feed lines then call [`DeclarationScanner::finish`]
#[derive(Debug, Default)]
pub struct DeclarationScanner {
    state: ScanState,
    records: Vec<TypeRecord>,
    in_block_comment: bool,
}

impl DeclarationScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine by one source line
    pub fn feed_line(&mut self, line: &str) {
        let cleaned = strip_comments(line, &mut self.in_block_comment);
        let line = cleaned.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some(caps) = DECLARATION_START.captures(line) {
            if let ScanState::InsideDeclaration { record, .. } = mem::take(&mut self.state) {
                tracing::debug!(name = %record.name, "dropping unterminated declaration");
            }
            let name: String = caps[1].split_whitespace().collect();
            let rest = caps.get(2).map_or("", |m| m.as_str());
            self.state = ScanState::InsideDeclaration {
                record: TypeRecord::new(name),
                pending_attributes: None,
            };
            self.consume_parameters(rest);
            return;
        }

        if matches!(self.state, ScanState::InsideDeclaration { .. }) {
            self.consume_parameters(line);
        }
    }

    /// Finish scanning. An unterminated declaration is discarded.
    pub fn finish(self) -> Vec<TypeRecord> {
        if let ScanState::InsideDeclaration { record, .. } = self.state {
            tracing::debug!(name = %record.name, "dropping unterminated declaration");
        }
        self.records
    }

    fn consume_parameters(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let (params, closes) = match find_list_end(text) {
            Some(end) => (&text[..end], true),
            None => (text.strip_suffix(");").unwrap_or(text), text.ends_with(");")),
        };

        if let ScanState::InsideDeclaration { record, pending_attributes } = &mut self.state {
            for param in split_parameters(params) {
                if let Some(attributes) = attributes_only(param) {
                    *pending_attributes = Some(match pending_attributes.take() {
                        Some(prev) => format!("{prev} {attributes}"),
                        None => attributes,
                    });
                    continue;
                }

                let mut field = parse_field(param);
                if field.is_empty() {
                    continue;
                }
                if let Some(pending) = pending_attributes.take() {
                    field.attribute = Some(match field.attribute {
                        Some(own) => format!("{pending} {own}"),
                        None => pending,
                    });
                }
                record.fields.push(format_field(&field));
            }
        }

        if closes {
            if let ScanState::InsideDeclaration { record, .. } = mem::take(&mut self.state) {
                tracing::debug!(name = %record.name, fields = record.fields.len(), "closed declaration");
                self.records.push(record);
            }
        }
    }
}

/// Scan an entire reader, line by line
pub fn scan_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<TypeRecord>> {
    let mut scanner = DeclarationScanner::new();
    for line in reader.lines() {
        scanner.feed_line(&line?);
    }
    Ok(scanner.finish())
}

/// Scan an in-memory source string
pub fn scan_str(source: &str) -> Vec<TypeRecord> {
    let mut scanner = DeclarationScanner::new();
    for line in source.lines() {
        scanner.feed_line(line);
    }
    scanner.finish()
}

// =============================================================================
// Helpers
// =============================================================================

/// Byte offset of the `)` that closes the parameter list, if on this line
fn find_list_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' | '<' => depth += 1,
            ']' | '>' => depth = depth.saturating_sub(1),
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Split a parameter run on commas that aren't nested in brackets
fn split_parameters(text: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' | '<' => depth += 1,
            ']' | ')' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty())
}

/// Remove `/* ... */` spans, which may run across lines, and a trailing
/// `//` comment that isn't inside brackets or quotes
fn strip_comments(text: &str, in_block_comment: &mut bool) -> String {
    let mut output = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut in_string = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        if *in_block_comment {
            if c == '*' && next == Some('/') {
                chars.next();
                *in_block_comment = false;
            }
            continue;
        }
        match c {
            '"' => in_string = !in_string,
            _ if in_string => {}
            '/' if next == Some('*') => {
                chars.next();
                *in_block_comment = true;
                output.push(' ');
                continue;
            }
            '/' if next == Some('/') && depth == 0 => break,
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        output.push(c);
    }

    output
}
