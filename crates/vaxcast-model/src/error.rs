//! Error types for the classification pipeline.

use crate::aggregate::ClassSide;

/// Errors from schema construction, model fitting, and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Returned when the classification threshold is NaN or infinite.
    #[error("classification threshold must be finite, got {threshold}")]
    InvalidThreshold {
        /// The invalid threshold value provided.
        threshold: f64,
    },

    /// Returned when a schema is built with zero attributes.
    #[error("schema must declare at least one attribute")]
    EmptySchema,

    /// Returned when a schema declares the same name twice (or the label
    /// name collides with an attribute name).
    #[error("duplicate attribute name \"{name}\" in schema")]
    DuplicateAttribute {
        /// The repeated name.
        name: String,
    },

    /// Returned when a class partition has zero observations for an
    /// attribute at fitting time. A zero-member class means the
    /// training set is degenerate; the mean/proportion is undefined.
    #[error("{class} class has zero observations for attribute \"{attribute}\"; training set is degenerate")]
    EmptyClass {
        /// Which side of the partition was empty.
        class: ClassSide,
        /// The first schema attribute with no observations.
        attribute: String,
    },

    /// Returned when evaluation is invoked on an empty dataset.
    #[error("cannot evaluate an empty dataset")]
    EmptyDataset,

    /// Returned when single-attribute classification names an attribute
    /// outside the schema.
    #[error("unknown attribute \"{name}\": not in the configured schema")]
    UnknownAttribute {
        /// The name that was requested.
        name: String,
    },

    /// Returned when a record lacks a value for a schema attribute.
    #[error("record \"{region}\" has no value for attribute \"{attribute}\"")]
    MissingAttributeValue {
        /// The region whose record is incomplete.
        region: String,
        /// The absent attribute.
        attribute: String,
    },

    /// Returned when a record's value kind contradicts the schema
    /// (a string where a number is declared, or vice versa).
    #[error("record \"{region}\" attribute \"{attribute}\" has the wrong value kind for the schema")]
    TypeMismatch {
        /// The region whose record is malformed.
        region: String,
        /// The offending attribute.
        attribute: String,
    },
}
