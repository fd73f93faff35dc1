//! Per-class summary statistics: the fitted model.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::aggregate::{ClassCollection, ClassPartition, ClassSide};
use crate::dataset::AttributeValue;
use crate::error::ModelError;
use crate::schema::{AttributeKind, ClassifierConfig};

/// The fitted summary statistic for one attribute in one class.
#[derive(Debug, Clone, PartialEq)]
pub enum Statistic {
    /// Arithmetic mean of a continuous attribute's observations.
    Mean(f64),
    /// Empirical proportions of a categorical attribute's tokens.
    ///
    /// Proportions over observed tokens sum to 1.0; a token the class
    /// never produced is an absent key, not a zero entry.
    Frequencies(BTreeMap<String, f64>),
}

/// One class's fitted statistics, keyed by attribute name.
///
/// Immutable once fitted. The low and high models are structurally
/// symmetric: same keys, same statistic kinds.
#[derive(Debug)]
pub struct ClassModel {
    stats: BTreeMap<String, Statistic>,
}

impl ClassModel {
    /// Return the fitted statistic for an attribute, if it is in the
    /// schema this model was fitted from.
    #[must_use]
    pub fn statistic(&self, attribute: &str) -> Option<&Statistic> {
        self.stats.get(attribute)
    }
}

/// The pair of fitted class models for one run.
#[derive(Debug)]
pub struct FittedModels {
    /// Statistics for records at or below the threshold.
    pub low: ClassModel,
    /// Statistics for records strictly above the threshold.
    pub high: ClassModel,
}

/// Fit both class models from a training partition.
///
/// Continuous attributes fit to their arithmetic mean; the categorical
/// attribute fits to a token frequency table (count / total
/// observations).
///
/// # Errors
///
/// Returns [`ModelError::EmptyClass`] naming the class side and the
/// first schema attribute with zero observations — an empty class means
/// the training set cannot support two-class fitting.
#[instrument(skip_all)]
pub fn fit(partition: &ClassPartition, config: &ClassifierConfig) -> Result<FittedModels, ModelError> {
    let low = fit_class(&partition.low, ClassSide::Low, config)?;
    let high = fit_class(&partition.high, ClassSide::High, config)?;
    debug!("fitted low and high class models");
    Ok(FittedModels { low, high })
}

fn fit_class(
    collection: &ClassCollection,
    side: ClassSide,
    config: &ClassifierConfig,
) -> Result<ClassModel, ModelError> {
    let mut stats = BTreeMap::new();

    for attr in config.schema().attributes() {
        let values = collection
            .values(attr.name())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ModelError::EmptyClass {
                class: side,
                attribute: attr.name().to_string(),
            })?;

        let statistic = match attr.kind() {
            AttributeKind::Continuous => {
                let total: f64 = values
                    .iter()
                    .map(|v| match v {
                        AttributeValue::Continuous(x) => *x,
                        // partition() already enforced the kind.
                        AttributeValue::Categorical(_) => 0.0,
                    })
                    .sum();
                Statistic::Mean(total / values.len() as f64)
            }
            AttributeKind::Categorical => {
                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for value in values {
                    if let AttributeValue::Categorical(token) = value {
                        *counts.entry(token.clone()).or_insert(0) += 1;
                    }
                }
                let total = values.len() as f64;
                let table = counts
                    .into_iter()
                    .map(|(token, count)| (token, count as f64 / total))
                    .collect();
                Statistic::Frequencies(table)
            }
        };
        stats.insert(attr.name().to_string(), statistic);
    }

    Ok(ClassModel { stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::partition;
    use crate::dataset::Dataset;
    use crate::testutil::{record, two_county_training_set};

    fn fit_two_counties() -> FittedModels {
        let config = ClassifierConfig::new(55.0).unwrap();
        let dataset = two_county_training_set();
        let split = partition(&dataset, &config).unwrap();
        fit(&split, &config).unwrap()
    }

    #[test]
    fn continuous_attributes_fit_to_mean() {
        // county1 (pop 100) is the high class, county2 (pop 200) the low.
        let models = fit_two_counties();
        assert_eq!(
            models.high.statistic("Population-Density"),
            Some(&Statistic::Mean(100.0))
        );
        assert_eq!(
            models.low.statistic("Population-Density"),
            Some(&Statistic::Mean(200.0))
        );
    }

    #[test]
    fn categorical_proportions_sum_to_one() {
        // Observed-token proportions must sum to 1.0 within tolerance.
        let config = ClassifierConfig::new(55.0).unwrap();
        let dataset = Dataset::from_records(vec![
            record("c1", 100.0, "A", 70.0),
            record("c2", 120.0, "A", 72.0),
            record("c3", 140.0, "B", 68.0),
            record("c4", 300.0, "C", 40.0),
        ]);
        let split = partition(&dataset, &config).unwrap();
        let models = fit(&split, &config).unwrap();

        let Some(Statistic::Frequencies(table)) =
            models.high.statistic("Social Vulnerability Index")
        else {
            panic!("categorical attribute must fit to a frequency table");
        };
        assert!((table["A"] - 2.0 / 3.0).abs() < 1e-9);
        assert!((table["B"] - 1.0 / 3.0).abs() < 1e-9);
        assert!((table.values().sum::<f64>() - 1.0).abs() < 1e-9);
        // Token observed only in the low class is an absent key here.
        assert!(!table.contains_key("C"));
    }

    #[test]
    fn empty_class_is_fatal() {
        let config = ClassifierConfig::new(55.0).unwrap();
        let dataset = Dataset::from_records(vec![record("c1", 100.0, "A", 70.0)]);
        let split = partition(&dataset, &config).unwrap();
        let err = fit(&split, &config).unwrap_err();
        assert!(matches!(
            err,
            ModelError::EmptyClass { class: ClassSide::Low, .. }
        ));
    }
}
