//! Parser trait definitions and error types.

use crate::model::{ConfigEntity, Domain};
use std::path::PathBuf;
use thiserror::Error;

/// Schema versions this build understands.
pub const SUPPORTED_SCHEMA_VERSIONS: std::ops::RangeInclusive<u32> = 1..=2;

/// Errors that can occur while parsing one export file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("invalid export structure: {0}")]
    InvalidStructure(String),

    #[error("unsupported schema version {found} (supported: {}-{})",
        SUPPORTED_SCHEMA_VERSIONS.start(), SUPPORTED_SCHEMA_VERSIONS.end())]
    UnsupportedVersion { found: String },

    #[error("unknown entity kind `{kind}` for {domain} export")]
    UnknownEntityKind { kind: String, domain: Domain },

    #[error("root element `{found}` does not match `{expected}` expected from the file name")]
    RootMismatch {
        expected: &'static str,
        found: String,
    },
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<quick_xml::DeError> for ParseError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::Xml(err.to_string())
    }
}

/// A [`ParseError`] pinned to the file that produced it.
#[derive(Error, Debug)]
#[error("{}: {kind}", path.display())]
pub struct LoadError {
    /// Offending file, or the export folder itself for folder-level IO
    /// failures.
    pub path: PathBuf,
    #[source]
    pub kind: ParseError,
}

impl LoadError {
    pub(crate) fn new(path: impl Into<PathBuf>, kind: ParseError) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Trait for domain-specific export file parsers.
///
/// Each configuration domain ships one implementor. Parsing is pure string
/// to entity-tree conversion; file IO and domain detection live in the
/// folder loader.
pub trait ExportParser {
    /// Domain this parser handles.
    fn domain(&self) -> Domain;

    /// Parse one export file's content into top-level entities.
    ///
    /// Returns the file's schema version alongside the entities; every
    /// entity in the returned trees carries that version.
    fn parse_str(&self, content: &str) -> Result<ParsedExport, ParseError>;
}

/// Result of parsing one export file.
#[derive(Debug)]
pub struct ParsedExport {
    /// Schema version declared by the file's root element.
    pub schema_version: u32,
    /// Top-level entities in document order.
    pub entities: Vec<ConfigEntity>,
}
