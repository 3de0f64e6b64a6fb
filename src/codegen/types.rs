//! C# → TypeScript Type Mapping
//!
//! Translates a declared C# type name into the TypeScript type used in the
//! emitted definition, together with an optional note explaining any
//! non-obvious translation.
//!
//! Resolution order:
//! 1. Nullable suffix (`T?`) → mapping of `T` plus ` | null`
//! 2. Fixed lookup table (primitives, dates, identifiers, dynamic)
//! 3. Collections (`T[]`, `List<T>`, `Dictionary<K, V>`, ...)
//! 4. Pass-through with an unknown-type note

use std::collections::HashMap;
use std::sync::LazyLock;

/// Note attached to any type the mapper doesn't recognize
pub const UNKNOWN_TYPE_NOTE: &str = "Unknown type - could be an enum, or a custom type";

/// Note attached to DateTime-like types
pub const DATETIME_NOTE: &str = "Represents a DateTime type in string format";

/// Note attached to Guid
pub const GUID_NOTE: &str = "Represents a GUID/UUID in string format";

/// Note attached to dynamic
pub const DYNAMIC_NOTE: &str = "Dynamic type in C#, any type in TypeScript";

/// Note attached to known domain enums
pub const KNOWN_ENUM_NOTE: &str = "Known enum type";

/// The result of mapping a single C# type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// TypeScript type expression
    pub ts_type: String,
    /// Explanatory note, if the translation needs one
    pub annotation: Option<&'static str>,
}

impl MappedType {
    fn new(ts_type: impl Into<String>, annotation: Option<&'static str>) -> Self {
        Self {
            ts_type: ts_type.into(),
            annotation,
        }
    }

    /// Whether the type is recognized (no unknown-type note)
    pub fn is_known(&self) -> bool {
        self.annotation != Some(UNKNOWN_TYPE_NOTE)
    }
}

#[derive(Debug, Clone, Copy)]
struct TableEntry {
    ts_type: &'static str,
    annotation: Option<&'static str>,
}

/// Fixed C# → TypeScript table, built once on first use
static TYPE_TABLE: LazyLock<HashMap<&'static str, TableEntry>> = LazyLock::new(|| {
    let plain = |ts_type| TableEntry { ts_type, annotation: None };
    let noted = |ts_type, note| TableEntry { ts_type, annotation: Some(note) };

    let mut table = HashMap::new();

    for numeric in [
        "int", "long", "short", "byte", "float", "double", "decimal",
        "uint", "ulong", "ushort", "sbyte",
    ] {
        table.insert(numeric, plain("number"));
    }

    table.insert("string", plain("string"));
    table.insert("char", plain("string"));
    table.insert("bool", plain("boolean"));
    table.insert("DateTime", noted("string", DATETIME_NOTE));
    table.insert("DateTimeOffset", noted("string", DATETIME_NOTE));
    table.insert("Guid", noted("string", GUID_NOTE));
    table.insert("object", plain("any"));
    table.insert("dynamic", noted("any", DYNAMIC_NOTE));
    table.insert("PublicationStatus", noted("PublicationStatus", KNOWN_ENUM_NOTE));

    table
});

const LIST_TYPES: &[&str] = &[
    "List",
    "IList",
    "IEnumerable",
    "ICollection",
    "IReadOnlyList",
    "IReadOnlyCollection",
];

const DICTIONARY_TYPES: &[&str] = &["Dictionary", "IDictionary", "IReadOnlyDictionary"];

// =============================================================================
// Public API
// =============================================================================

/// Map a C# type name to its TypeScript equivalent.
///
/// Never fails: unrecognized names pass through unchanged with
/// [`UNKNOWN_TYPE_NOTE`].
pub fn map_type(source: &str) -> MappedType {
    if let Some(base) = source.strip_suffix('?') {
        let mut mapped = map_type(base);
        mapped.ts_type.push_str(" | null");
        return mapped;
    }

    if let Some(entry) = TYPE_TABLE.get(source) {
        return MappedType::new(entry.ts_type, entry.annotation);
    }

    if let Some(element) = source.strip_suffix("[]") {
        return map_array(element);
    }

    if let Some((outer, args)) = split_generic(source) {
        match args.as_slice() {
            [element] if LIST_TYPES.contains(&outer) => return map_array(element),
            [key, value] if DICTIONARY_TYPES.contains(&outer) => {
                let key = map_type(key);
                let value = map_type(value);
                return MappedType::new(
                    format!("Record<{}, {}>", key.ts_type, value.ts_type),
                    value.annotation.or(key.annotation),
                );
            }
            _ => {}
        }
    }

    MappedType::new(source, Some(UNKNOWN_TYPE_NOTE))
}

// =============================================================================
// Helpers
// =============================================================================

fn map_array(element: &str) -> MappedType {
    let inner = map_type(element);
    let ts_type = if inner.ts_type.contains(" | ") {
        format!("({})[]", inner.ts_type)
    } else {
        format!("{}[]", inner.ts_type)
    };
    MappedType::new(ts_type, inner.annotation)
}

/// Split `Outer<A, B<C, D>>` into (`Outer`, [`A`, `B<C, D>`])
fn split_generic(source: &str) -> Option<(&str, Vec<&str>)> {
    let open = source.find('<')?;
    let inner = source.strip_suffix('>')?.get(open + 1..)?;
    let outer = &source[..open];

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(inner[start..].trim());

    if outer.is_empty() || args.iter().any(|a| a.is_empty()) {
        return None;
    }
    Some((outer, args))
}
