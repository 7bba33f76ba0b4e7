//! Error types for configuration extraction.
//!
//! Every failure the extractor can report is a variant of [`ExtractError`].
//! Load and lookup failures are non-fatal: they are logged, recorded and
//! turned into an empty or partial collection. Only the empty-result
//! variants end the run with a failure status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur while loading or walking a switch configuration.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document could not be read from disk.
    #[error("Read xml failed: {}: {source}", .path.display())]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The document is not well-formed markup.
    #[error("Read xml failed: {}: {source}", .path.display())]
    Xml {
        /// Path of the document.
        path: PathBuf,
        /// The underlying parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// A section path does not resolve in the document.
    #[error("No such node ({path})")]
    SectionNotFound {
        /// The dotted section path.
        path: String,
    },

    /// An entry in a section lacks a required attribute.
    #[error("No such attribute '{attribute}' on entry {index} of {section}")]
    MissingAttribute {
        /// The dotted section path.
        section: String,
        /// Zero-based position of the entry within the section.
        index: usize,
        /// The attribute name.
        attribute: String,
    },

    /// An entry lacks a required field.
    #[error("No such node ({field}) for port {port}")]
    MissingField {
        /// The entry's port identifier.
        port: String,
        /// The field path.
        field: String,
    },

    /// A field is present but does not coerce to its expected type.
    #[error("Conversion of data '{value}' to type {expected} failed ({field}) for port {port}")]
    InvalidField {
        /// The entry's port identifier.
        port: String,
        /// The field path.
        field: String,
        /// The raw field text.
        value: String,
        /// Name of the expected type.
        expected: &'static str,
    },

    /// A report block could not be written to the output sink.
    #[error("Failed to write report: {source}")]
    Report {
        /// The underlying IO error.
        #[from]
        source: io::Error,
    },

    /// No ports were extracted.
    #[error("Ports is not found!")]
    PortsNotFound,

    /// No default VLANs were extracted for the known ports.
    #[error("Vlans is not found!")]
    VlansNotFound,

    /// Extractor configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ExtractError {
    /// Creates a section-not-found error.
    pub fn section_not_found(path: impl Into<String>) -> Self {
        Self::SectionNotFound { path: path.into() }
    }

    /// Creates a missing-attribute error.
    pub fn missing_attribute(
        section: impl Into<String>,
        index: usize,
        attribute: impl Into<String>,
    ) -> Self {
        Self::MissingAttribute {
            section: section.into(),
            index,
            attribute: attribute.into(),
        }
    }

    /// Creates a missing-field error.
    pub fn missing_field(port: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            port: port.into(),
            field: field.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the document itself could not be loaded.
    pub fn is_load_error(&self) -> bool {
        matches!(self, ExtractError::Io { .. } | ExtractError::Xml { .. })
    }

    /// Returns true if this error stopped the walk of a section.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            ExtractError::SectionNotFound { .. }
                | ExtractError::MissingAttribute { .. }
                | ExtractError::MissingField { .. }
                | ExtractError::InvalidField { .. }
                | ExtractError::Report { .. }
        )
    }

    /// Returns true if this error reports an empty extraction result.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            ExtractError::PortsNotFound | ExtractError::VlansNotFound
        )
    }
}
