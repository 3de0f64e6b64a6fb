//! End-to-end conversion tests
//!
//! Runs the C# converter against files on disk and checks the emitted
//! TypeScript byte for byte.

use std::fs;
use std::path::{Path, PathBuf};

use dto_converter::codegen::types::{DATETIME_NOTE, GUID_NOTE, KNOWN_ENUM_NOTE, UNKNOWN_TYPE_NOTE};
use dto_converter::{
    ConvertError, ConvertOutcome, Converter, ConverterConfig, ConverterRegistry, CSharpConverter,
    OutputCollision, Project, TypeScriptWriter,
};

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn converter(out: &Path) -> CSharpConverter {
    CSharpConverter::new(TypeScriptWriter::new(out))
}

// =============================================================================
// Single File
// =============================================================================

#[test]
fn test_person_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Person.cs");
    fs::write(&input, "public record Person(\n    string? Name,\n    int Age);\n").unwrap();

    let out = dir.path().join("out");
    let outcome = converter(&out).convert(&input).unwrap();

    let expected_path = out.join("Person.ts");
    assert_eq!(
        outcome,
        ConvertOutcome::Written { path: expected_path.clone(), type_count: 1 }
    );
    assert_eq!(
        fs::read_to_string(expected_path).unwrap(),
        "export type Person = {\n  name: string | null;\n  age: number;\n}\n"
    );
}

#[test]
fn test_attribute_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Audit.cs");
    fs::write(&input, "public record Audit(\n    [JsonPropertyName] DateTime Created,\n);\n").unwrap();

    converter(dir.path()).convert(&input).unwrap();

    let output = fs::read_to_string(dir.path().join("Audit.ts")).unwrap();
    assert!(output.contains(&format!("  created: string; // {DATETIME_NOTE} // [JsonPropertyName]\n")));
}

#[test]
fn test_fixture_file() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = converter(dir.path())
        .convert(&fixtures_path().join("Library.cs"))
        .unwrap();
    assert!(matches!(outcome, ConvertOutcome::Written { type_count: 3, .. }));

    let output = fs::read_to_string(dir.path().join("Library.ts")).unwrap();
    let expected = format!(
        "\
export type MemberProfileDto = {{
  memberId: string; // {GUID_NOTE}
  displayName: string;
  joinedAt: string | null; // {DATETIME_NOTE}
  email: string; // [EmailAddress]
  tags: string[];
}}

export type LoanRequestDto = {{
  bookId: string; // {GUID_NOTE} // [Required]
  days: number; // [Range(1, 30)] [Required]
  status: PublicationStatus; // {KNOWN_ENUM_NOTE}
  policy: LoanPolicy; // {UNKNOWN_TYPE_NOTE}
}}

export type ReviewDto = {{
  bookId: string; // {GUID_NOTE}
  stars: number; // [Range(1, 5)]
  comment: string | null;
}}
"
    );
    assert_eq!(output, expected);
    assert!(!output.contains("Abandoned"));
    assert!(!output.contains("NotARecord"));
}

#[test]
fn test_conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let converter = converter(dir.path());
    let input = fixtures_path().join("Library.cs");

    converter.convert(&input).unwrap();
    let first = fs::read(dir.path().join("Library.ts")).unwrap();
    converter.convert(&input).unwrap();
    let second = fs::read(dir.path().join("Library.ts")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_existing_output_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Tag.cs");
    fs::write(&input, "public record Tag(string Label);").unwrap();
    fs::write(dir.path().join("Tag.ts"), "stale content that is much longer than the new file\n").unwrap();

    converter(dir.path()).convert(&input).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("Tag.ts")).unwrap(),
        "export type Tag = {\n  label: string;\n}\n"
    );
}

#[test]
fn test_no_declarations_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Service.cs");
    fs::write(&input, "public class Service {}\npublic record Open(\n    int A,\n").unwrap();

    let out = dir.path().join("out");
    let outcome = converter(&out).convert(&input).unwrap();

    assert_eq!(outcome, ConvertOutcome::NoDeclarations);
    assert!(!out.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Missing.cs");
    let err = converter(dir.path()).convert(&missing).unwrap_err();
    assert!(matches!(err, ConvertError::Io { ref path, .. } if path == &missing));
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Tag.cs");
    fs::write(&input, "public record Tag(string Label);").unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file where the output directory should be").unwrap();

    let err = converter(&blocker.join("out")).convert(&input).unwrap_err();
    assert!(matches!(err, ConvertError::Io { .. }));
}

// =============================================================================
// Directory
// =============================================================================

#[test]
fn test_convert_directory() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::create_dir_all(input.path().join("Nested")).unwrap();
    fs::write(input.path().join("A.cs"), "public record A(int X);").unwrap();
    fs::write(input.path().join("Nested/B.cs"), "public record B(int Y);\npublic record C(int Z);").unwrap();
    fs::write(input.path().join("Empty.cs"), "namespace Nothing;").unwrap();
    fs::write(input.path().join("README.md"), "public record NotCSharp(int X);").unwrap();

    let report = converter(out.path()).convert_directory(input.path());

    assert!(report.is_clean());
    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.type_count(), 3);
    assert_eq!(report.skipped, vec![input.path().join("Empty.cs")]);
    assert!(out.path().join("A.ts").exists());
    assert!(out.path().join("B.ts").exists());
    assert!(!out.path().join("README.ts").exists());
}

#[test]
fn test_same_stem_in_two_folders_reported_as_collision() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::create_dir_all(input.path().join("A")).unwrap();
    fs::create_dir_all(input.path().join("B")).unwrap();
    fs::write(input.path().join("A/Dto.cs"), "public record First(int X);").unwrap();
    fs::write(input.path().join("B/Dto.cs"), "public record Second(int Y);").unwrap();

    let report = converter(out.path()).convert_directory(input.path());

    assert!(report.is_clean());
    assert_eq!(
        report.collisions,
        vec![OutputCollision {
            output: out.path().join("Dto.ts"),
            overwritten: input.path().join("A/Dto.cs"),
            kept: input.path().join("B/Dto.cs"),
        }]
    );
    let output = fs::read_to_string(out.path().join("Dto.ts")).unwrap();
    assert!(output.contains("export type Second"));
    assert!(!output.contains("export type First"));
}

#[test]
fn test_convert_directory_without_collisions() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(input.path().join("A.cs"), "public record A(int X);").unwrap();
    fs::write(input.path().join("B.cs"), "public record B(int Y);").unwrap();

    let report = converter(out.path()).convert_directory(input.path());
    assert!(report.collisions.is_empty());
}

#[test]
fn test_batch_isolation_invalid_utf8() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(input.path().join("Bad.cs"), [0x70, 0x75, 0xff, 0xfe, 0x0a]).unwrap();
    fs::write(input.path().join("Good.cs"), "public record Good(int X);").unwrap();

    let report = converter(out.path()).convert_directory(input.path());

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, input.path().join("Bad.cs"));
    assert_eq!(report.converted.len(), 1);
    assert!(out.path().join("Good.ts").exists());
}

#[cfg(unix)]
#[test]
fn test_batch_isolation_unreadable_file() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(input.path().join("nowhere.cs"), input.path().join("Broken.cs")).unwrap();
    fs::write(input.path().join("Good.cs"), "public record Good(int X);").unwrap();

    let report = converter(out.path()).convert_directory(input.path());

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].1, ConvertError::Io { .. }));
    assert_eq!(
        fs::read_to_string(out.path().join("Good.ts")).unwrap(),
        "export type Good = {\n  x: number;\n}\n"
    );
}

#[test]
fn test_missing_input_directory_reported() {
    let dir = tempfile::tempdir().unwrap();
    let report = converter(dir.path()).convert_directory(&dir.path().join("absent"));
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].1, ConvertError::Walk(_)));
}

// =============================================================================
// Projects
// =============================================================================

#[test]
fn test_project_round_trip_through_registry() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("dtos");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("Order.cs"), "public record Order(Guid Id, decimal Total);").unwrap();

    let config_path = root.path().join("dto-converter.toml");
    let mut config = ConverterConfig::default();
    config.output.header = true;
    config
        .add_project(Project {
            name: "shop".to_string(),
            language: "csharp".to_string(),
            input_dir: input.clone(),
            output_dir: root.path().join("types"),
        })
        .unwrap();
    config.save(&config_path).unwrap();

    let config = ConverterConfig::load_from(&config_path).unwrap();
    let project = config.find_project("shop").unwrap();
    let converter = ConverterRegistry::new()
        .create(&project.language, config.writer_for(project))
        .unwrap();
    let report = converter.convert_directory(&project.input_dir);

    assert!(report.is_clean());
    assert_eq!(
        fs::read_to_string(root.path().join("types/Order.ts")).unwrap(),
        format!(
            "// Generated from Order.cs - DO NOT EDIT\n\nexport type Order = {{\n  id: string; // {GUID_NOTE}\n  total: number;\n}}\n"
        )
    );
}
