//! Two-class vaccination-rate classification: partition, fit, predict,
//! evaluate.
//!
//! Training computes class-conditional summary statistics — means for
//! continuous attributes, empirical token frequencies for the
//! categorical attribute — split at a configured vaccination-rate
//! threshold. Prediction is a per-attribute vote between the two fitted
//! models, with a leave-one-attribute-in sensitivity analysis measuring
//! each attribute's individual contribution.

mod aggregate;
mod classify;
mod dataset;
mod error;
mod evaluate;
mod fit;
mod schema;
mod sensitivity;

#[cfg(test)]
mod testutil;

pub use aggregate::{partition, ClassCollection, ClassPartition, ClassSide};
pub use classify::{classify, classify_by_attribute, Prediction, Predictions};
pub use dataset::{AttributeValue, Dataset, Record, RegionId};
pub use error::ModelError;
pub use evaluate::{evaluate, Evaluation};
pub use fit::{fit, ClassModel, FittedModels, Statistic};
pub use schema::{Attribute, AttributeKind, ClassifierConfig, Schema};
pub use sensitivity::{sensitivity_analysis, SensitivityReport};
