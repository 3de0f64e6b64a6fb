//! DTO Converter
//!
//! Converts C# record DTOs into TypeScript type definitions so that a
//! backend's data contracts can be shared with a frontend.
//!
//! ## Features
//!
//! - **Record Scanning**: Recovers positional `record` declarations line by line
//! - **Type Mapping**: Primitives, nullables, collections, dates and GUIDs
//! - **Annotations**: Inline notes for lossy or unknown translations
//! - **Projects**: Named input/output directory pairs stored in a TOML config
//! - **Batch Isolation**: One bad file never stops a directory conversion
//!
//! ## Pipeline
//!
//! ```text
//! Models/DTOs/Example.cs
//!   └─ scanner ─► [TypeRecord, ...] ─► typescript ─► types/Example.ts
//!        └─ fields ─► types (C# → TS)
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod projects;
pub mod walk;

pub use codegen::{
    BatchReport, ConvertOutcome, ConvertedFile, Converter, ConverterRegistry, CSharpConverter,
    OutputCollision, TypeRecord, TypeScriptWriter,
};
pub use config::ConverterConfig;
pub use error::{ConvertError, Result};
pub use projects::{Direction, Project};
