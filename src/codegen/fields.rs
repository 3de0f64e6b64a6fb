//! Field Extraction
//!
//! Turns one C# record parameter (e.g. `[Required] string? Name`) into a
//! rendered TypeScript property line.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::types::map_type;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// A parsed record parameter, before rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedField {
    /// Field name as declared in the source
    pub name: String,
    /// Mapped TypeScript type
    pub ts_type: String,
    /// Note from the type mapper
    pub annotation: Option<&'static str>,
    /// Leading attribute list, verbatim (e.g. `[Required] [MaxLength(50)]`)
    pub attribute: Option<String>,
}

impl ParsedField {
    /// Degenerate lines parse to an empty field
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// A fully rendered property line: `name: type;` plus inline comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedField(String);

impl FormattedField {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormattedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a single parameter line.
///
/// The caller has already removed one trailing comma. Lines with fewer than
/// two tokens (after attributes), or whose name isn't an identifier, yield an
/// empty [`ParsedField`].
pub fn parse_field(line: &str) -> ParsedField {
    let tokens = tokenize(strip_default_value(line));

    let attribute_count = tokens.iter().take_while(|t| t.starts_with('[')).count();
    let (attributes, rest) = tokens.split_at(attribute_count);

    let [.., source_type, raw_name] = rest else {
        return ParsedField::default();
    };

    let name = raw_name.trim_end_matches([',', ';']).trim_start_matches('@');
    if !IDENTIFIER.is_match(name) {
        return ParsedField::default();
    }

    let mapped = map_type(source_type);
    ParsedField {
        name: name.to_string(),
        ts_type: mapped.ts_type,
        annotation: mapped.annotation,
        attribute: (!attributes.is_empty()).then(|| attributes.join(" ")),
    }
}

/// Render a parsed field as `name: type;` with its annotation and attribute
pub fn format_field(field: &ParsedField) -> FormattedField {
    let mut line = format!("{}: {};", field.name, field.ts_type);
    if let Some(note) = field.annotation {
        line.push_str(" // ");
        line.push_str(note);
    }
    if let Some(attribute) = &field.attribute {
        line.push_str(" // ");
        line.push_str(attribute);
    }
    FormattedField(line)
}

/// If the line holds nothing but attributes (e.g. `[Required]` on its own
/// line), return them joined by a space
pub fn attributes_only(line: &str) -> Option<String> {
    let tokens = tokenize(line);
    if tokens.is_empty() || !tokens.iter().all(|t| t.starts_with('[')) {
        return None;
    }
    Some(tokens.join(" "))
}

/// Split on whitespace, keeping `[...]`, `(...)` and `<...>` groups whole
fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in line.char_indices() {
        match c {
            '[' | '(' | '<' => depth += 1,
            ']' | ')' | '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c.is_whitespace() && depth == 0 {
            if let Some(s) = start.take() {
                tokens.push(&line[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&line[s..]);
    }

    tokens
}

/// Drop a `= default` suffix that sits outside any brackets
fn strip_default_value(line: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in line.char_indices() {
        match c {
            '[' | '(' | '<' => depth += 1,
            ']' | ')' | '>' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return &line[..i],
            _ => {}
        }
    }
    line
}
