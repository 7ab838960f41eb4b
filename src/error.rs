//! Error types for lexo operations.

use std::fmt;

use thiserror::Error;

/// Errors raised by a single extraction step.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("entry not found in archive: {0}")]
    NotFound(String),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid descriptor: {0}")]
    Parse(String),

    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    #[error("no <body> element found")]
    MissingRoot,

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Stage of the extraction pipeline whose failure aborts the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening the archive.
    Archive,
    /// Resolving `META-INF/container.xml`.
    Container,
    /// Parsing the package document (OPF).
    Package,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Archive => "open archive",
            Stage::Container => "resolve container descriptor",
            Stage::Package => "parse package descriptor",
        })
    }
}

/// A fatal extraction failure, tagged with the stage that produced it.
#[derive(Error, Debug)]
#[error("failed to {stage}: {source}")]
pub struct ExtractError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl ExtractError {
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }
}
