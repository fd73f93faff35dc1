//! I/O error types for vaxcast-io.

use std::path::PathBuf;

/// Errors from dataset loading, validation, and artifact writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the input file is not valid JSON.
    #[error("JSON parse error in {path}")]
    JsonParse {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when the top level of the input file is not an object.
    #[error("expected a top-level JSON object of region records in {path}")]
    NotAnObject {
        /// Path to the JSON file.
        path: PathBuf,
    },

    /// Returned when the input file contains zero region records.
    #[error("empty dataset (no region records) in {path}")]
    EmptyDataset {
        /// Path to the JSON file.
        path: PathBuf,
    },

    /// Returned when a region's value is not a JSON object.
    #[error("region \"{region}\" in {path} is not a JSON object")]
    MalformedRecord {
        /// Path to the JSON file.
        path: PathBuf,
        /// The offending region key.
        region: String,
    },

    /// Returned when a record lacks a schema attribute or the label field.
    #[error("region \"{region}\" in {path} is missing field \"{field}\"")]
    MissingField {
        /// Path to the JSON file.
        path: PathBuf,
        /// The offending region key.
        region: String,
        /// The absent field name.
        field: String,
    },

    /// Returned when a field has the wrong JSON type for its schema kind.
    #[error("region \"{region}\" field \"{field}\" in {path}: expected {expected}")]
    WrongValueType {
        /// Path to the JSON file.
        path: PathBuf,
        /// The offending region key.
        region: String,
        /// The offending field name.
        field: String,
        /// What the schema declares ("a number" or "a string").
        expected: &'static str,
    },

    /// Returned when a numeric field is NaN or infinite.
    #[error("region \"{region}\" field \"{field}\" in {path} is not a finite number")]
    NonFiniteValue {
        /// Path to the JSON file.
        path: PathBuf,
        /// The offending region key.
        region: String,
        /// The offending field name.
        field: String,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when an artifact file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
