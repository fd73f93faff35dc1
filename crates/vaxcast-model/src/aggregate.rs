//! Class partitioning of labeled training data.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::dataset::{AttributeValue, Dataset};
use crate::error::ModelError;
use crate::schema::{AttributeKind, ClassifierConfig};

/// Which side of the threshold a class sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSide {
    /// Label at or below the threshold.
    Low,
    /// Label strictly above the threshold.
    High,
}

impl std::fmt::Display for ClassSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassSide::Low => f.write_str("low"),
            ClassSide::High => f.write_str("high"),
        }
    }
}

/// Per-attribute observed values for the records of one class.
///
/// An attribute appears as a key only when the class has at least one
/// observation for it; each value sequence has one entry per class
/// member, in dataset iteration order.
#[derive(Debug, Default)]
pub struct ClassCollection {
    values: BTreeMap<String, Vec<AttributeValue>>,
    n_records: usize,
}

impl ClassCollection {
    /// Return the observed values for an attribute, if any.
    #[must_use]
    pub fn values(&self, attribute: &str) -> Option<&[AttributeValue]> {
        self.values.get(attribute).map(Vec::as_slice)
    }

    /// Return the number of records assigned to this class.
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    fn push(&mut self, attribute: &str, value: AttributeValue) {
        self.values.entry(attribute.to_string()).or_default().push(value);
    }
}

/// The two class collections produced from one training set.
#[derive(Debug)]
pub struct ClassPartition {
    /// Observations from records with label at or below the threshold.
    pub low: ClassCollection,
    /// Observations from records with label strictly above the threshold.
    pub high: ClassCollection,
}

impl ClassPartition {
    /// Return the collection for one side.
    #[must_use]
    pub fn side(&self, side: ClassSide) -> &ClassCollection {
        match side {
            ClassSide::Low => &self.low,
            ClassSide::High => &self.high,
        }
    }
}

/// Split a training dataset into per-class attribute collections.
///
/// A record whose label is strictly greater than the configured
/// threshold joins the high class; every other record joins the low
/// class. For each class member, every schema attribute's value is
/// collected in dataset iteration order. A zero-member class yields an
/// empty collection; rejecting it is the fitter's job.
///
/// # Errors
///
/// | Variant | When |
/// |---|---|
/// | [`ModelError::MissingAttributeValue`] | a record lacks a schema attribute |
/// | [`ModelError::TypeMismatch`] | a value's kind contradicts the schema |
#[instrument(skip_all, fields(n_records = dataset.len()))]
pub fn partition(
    dataset: &Dataset,
    config: &ClassifierConfig,
) -> Result<ClassPartition, ModelError> {
    let mut low = ClassCollection::default();
    let mut high = ClassCollection::default();

    for (region, record) in dataset.iter() {
        let target = if record.label() > config.threshold() {
            &mut high
        } else {
            &mut low
        };
        target.n_records += 1;

        for attr in config.schema().attributes() {
            let value = record.value(attr.name()).ok_or_else(|| {
                ModelError::MissingAttributeValue {
                    region: region.as_str().to_string(),
                    attribute: attr.name().to_string(),
                }
            })?;
            match (attr.kind(), value) {
                (AttributeKind::Continuous, AttributeValue::Continuous(_))
                | (AttributeKind::Categorical, AttributeValue::Categorical(_)) => {
                    target.push(attr.name(), value.clone());
                }
                _ => {
                    return Err(ModelError::TypeMismatch {
                        region: region.as_str().to_string(),
                        attribute: attr.name().to_string(),
                    });
                }
            }
        }
    }

    debug!(
        n_low = low.n_records(),
        n_high = high.n_records(),
        "training set partitioned"
    );

    Ok(ClassPartition { low, high })
}
