//! Leave-one-attribute-in sensitivity analysis.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::classify::classify_by_attribute;
use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::evaluate::evaluate;
use crate::fit::FittedModels;
use crate::schema::ClassifierConfig;

/// Per-attribute single-attribute accuracy, one entry per schema
/// attribute.
#[derive(Debug)]
pub struct SensitivityReport {
    accuracies: BTreeMap<String, f64>,
}

impl SensitivityReport {
    /// Return the single-attribute accuracy for an attribute, if it is
    /// in the schema.
    #[must_use]
    pub fn accuracy(&self, attribute: &str) -> Option<f64> {
        self.accuracies.get(attribute).copied()
    }

    /// Iterate (attribute, accuracy) entries in attribute-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.accuracies.iter().map(|(name, acc)| (name.as_str(), *acc))
    }

    /// Return the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accuracies.len()
    }

    /// Return `true` when the report has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accuracies.is_empty()
    }
}

/// Measure each attribute's individual predictive contribution.
///
/// For every schema attribute in turn, classifies the full test set on
/// that attribute alone and records the resulting accuracy. Each pass
/// reads only raw attribute values and true labels; predictions are a
/// separate output per pass, so passes cannot leak into each other.
///
/// # Errors
///
/// Propagates classification and evaluation errors, notably
/// [`ModelError::EmptyDataset`] for an empty test set.
#[instrument(skip_all, fields(n_records = test_set.len()))]
pub fn sensitivity_analysis(
    test_set: &Dataset,
    models: &FittedModels,
    config: &ClassifierConfig,
) -> Result<SensitivityReport, ModelError> {
    let mut accuracies = BTreeMap::new();

    for attr in config.schema().attributes() {
        let predictions = classify_by_attribute(test_set, models, attr.name(), config)?;
        let evaluation = evaluate(test_set, &predictions, config)?;
        info!(
            attribute = attr.name(),
            accuracy = evaluation.accuracy,
            "single-attribute pass complete"
        );
        accuracies.insert(attr.name().to_string(), evaluation.accuracy);
    }

    Ok(SensitivityReport { accuracies })
}
