#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the badge composer crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint, so the lint is disabled
//! for this module.
//!
//! Precondition failures ([`Error::IndexOutOfRange`], [`Error::InvalidStyle`])
//! signal a mismatch between a caller and the catalogs. They are returned
//! immediately and never retried.

use std::path::{Path, PathBuf};

/// Unified error type returned by the composition engine, catalog loader and
/// CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// An index does not address an entry of a catalog-backed collection.
    #[error("{collection} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        /// Name of the collection that was indexed.
        collection: &'static str,
        /// Offending index.
        index:      usize,
        /// Length of the collection at the time of the call.
        len:        usize
    },
    /// A style identifier is not a member of the style catalog.
    #[error("unknown badge style '{style}'")]
    InvalidStyle {
        /// Style identifier as supplied by the caller.
        style: String
    },
    /// No service in the catalog carries the requested key.
    #[error("unknown badge service '{key}'")]
    UnknownService {
        /// Service key as supplied by the caller.
        key: String
    },
    /// No format in the catalog carries the requested identifier.
    #[error("unknown snippet format '{identifier}'")]
    UnknownFormat {
        /// Format identifier as supplied by the caller.
        identifier: String
    },
    /// Returned when a catalog violates its invariants.
    #[error("invalid catalog: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps I/O errors that occur while reading catalog files.
    #[error("failed to read catalog from {path:?}: {source}")]
    Io {
        /// Location of the catalog file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse catalog: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps I/O errors that occur while writing CLI output.
    #[error("failed to write output: {source}")]
    Output {
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps serialization errors when writing resolved badges.
    #[error("failed to serialize badges: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided message.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs an [`Error::IndexOutOfRange`] for the named collection.
    pub fn index_out_of_range(collection: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            collection,
            index,
            len
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Intended for CLI contexts. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Output`] variant from a failed write.
pub fn output_error(source: std::io::Error) -> Error {
    Error::Output {
        source
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the catalog file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
