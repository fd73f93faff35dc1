//! The voting decision rule: joint and single-attribute classification.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::dataset::{AttributeValue, Dataset, Record, RegionId};
use crate::error::ModelError;
use crate::fit::{ClassModel, FittedModels, Statistic};
use crate::schema::{Attribute, AttributeKind, ClassifierConfig};

/// The tri-state outcome of classifying one record.
///
/// `Unknown` is a valid steady-state outcome (tied votes, or a
/// categorical token unseen in training), never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// Vaccination rate predicted at or below the threshold.
    Low,
    /// Vaccination rate predicted strictly above the threshold.
    High,
    /// The evidence does not favor either side.
    Unknown,
}

impl Prediction {
    /// Render the prediction as a report label, e.g. `<=55%`, `>55%`,
    /// or `Unknown`.
    #[must_use]
    pub fn label(self, config: &ClassifierConfig) -> String {
        match self {
            Prediction::Low => format!("<={}%", config.threshold_text()),
            Prediction::High => format!(">{}%", config.threshold_text()),
            Prediction::Unknown => "Unknown".to_string(),
        }
    }
}

/// Predictions for one classification pass, keyed by region.
///
/// An explicit output value: records are never mutated, so repeated
/// passes over the same dataset cannot interfere with each other.
#[derive(Debug, Default)]
pub struct Predictions {
    by_region: BTreeMap<RegionId, Prediction>,
}

impl Predictions {
    /// Return the prediction for a region, if one was produced.
    #[must_use]
    pub fn get(&self, region: &RegionId) -> Option<Prediction> {
        self.by_region.get(region).copied()
    }

    /// Iterate predictions in region-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, Prediction)> {
        self.by_region.iter().map(|(id, p)| (id, *p))
    }

    /// Return the number of predictions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_region.len()
    }

    /// Return `true` when no predictions were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty()
    }
}

/// One attribute's evidence for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Low,
    High,
    /// No determinable direction: an exact continuous tie, equal
    /// categorical proportions, or a token unseen in both classes.
    None,
}

/// Classify every record using all schema attributes jointly.
///
/// Each attribute casts one vote (see [`Vote`]); the majority side wins
/// and a tied tally yields [`Prediction::Unknown`]. An exact continuous
/// tie casts no vote, the same no-evidence treatment the
/// single-attribute path gives it.
///
/// # Errors
///
/// | Variant | When |
/// |---|---|
/// | [`ModelError::MissingAttributeValue`] | a record lacks a schema attribute |
/// | [`ModelError::TypeMismatch`] | a value's kind contradicts the fitted statistic |
#[instrument(skip_all, fields(n_records = dataset.len()))]
pub fn classify(
    dataset: &Dataset,
    models: &FittedModels,
    config: &ClassifierConfig,
) -> Result<Predictions, ModelError> {
    let mut predictions = Predictions::default();

    for (region, record) in dataset.iter() {
        let mut low_votes = 0usize;
        let mut high_votes = 0usize;

        for attr in config.schema().attributes() {
            match attribute_vote(region, record, attr, &models.low, &models.high)? {
                Vote::Low => low_votes += 1,
                Vote::High => high_votes += 1,
                Vote::None => {}
            }
        }

        let prediction = match high_votes.cmp(&low_votes) {
            std::cmp::Ordering::Greater => Prediction::High,
            std::cmp::Ordering::Less => Prediction::Low,
            std::cmp::Ordering::Equal => Prediction::Unknown,
        };
        predictions.by_region.insert(region.clone(), prediction);
    }

    debug!(n_predictions = predictions.len(), "joint classification complete");
    Ok(predictions)
}

/// Classify every record using one attribute's evidence alone.
///
/// The single attribute's vote *is* the prediction: a low vote maps to
/// [`Prediction::Low`], a high vote to [`Prediction::High`], and no
/// determinable direction (exact tie, equal proportions, unseen token)
/// to [`Prediction::Unknown`].
///
/// # Errors
///
/// As [`classify`], plus [`ModelError::UnknownAttribute`] when
/// `attribute` is not in the configured schema.
#[instrument(skip_all, fields(attribute, n_records = dataset.len()))]
pub fn classify_by_attribute(
    dataset: &Dataset,
    models: &FittedModels,
    attribute: &str,
    config: &ClassifierConfig,
) -> Result<Predictions, ModelError> {
    let attr = config
        .schema()
        .attribute(attribute)
        .ok_or_else(|| ModelError::UnknownAttribute { name: attribute.to_string() })?;

    let mut predictions = Predictions::default();
    for (region, record) in dataset.iter() {
        let prediction = match attribute_vote(region, record, attr, &models.low, &models.high)? {
            Vote::Low => Prediction::Low,
            Vote::High => Prediction::High,
            Vote::None => Prediction::Unknown,
        };
        predictions.by_region.insert(region.clone(), prediction);
    }
    Ok(predictions)
}

/// Apply the shared decision rule for one attribute of one record.
fn attribute_vote(
    region: &RegionId,
    record: &Record,
    attr: &Attribute,
    low: &ClassModel,
    high: &ClassModel,
) -> Result<Vote, ModelError> {
    let value = record.value(attr.name()).ok_or_else(|| {
        ModelError::MissingAttributeValue {
            region: region.as_str().to_string(),
            attribute: attr.name().to_string(),
        }
    })?;
    let low_stat = low.statistic(attr.name());
    let high_stat = high.statistic(attr.name());

    let vote = match (attr.kind(), value, low_stat, high_stat) {
        (
            AttributeKind::Continuous,
            AttributeValue::Continuous(x),
            Some(Statistic::Mean(low_mean)),
            Some(Statistic::Mean(high_mean)),
        ) => {
            let low_diff = (low_mean - x).abs();
            let high_diff = (high_mean - x).abs();
            if low_diff < high_diff {
                Vote::Low
            } else if high_diff < low_diff {
                Vote::High
            } else {
                Vote::None
            }
        }
        (
            AttributeKind::Categorical,
            AttributeValue::Categorical(token),
            Some(Statistic::Frequencies(low_table)),
            Some(Statistic::Frequencies(high_table)),
        ) => match (low_table.get(token), high_table.get(token)) {
            (Some(low_p), Some(high_p)) => {
                if low_p < high_p {
                    Vote::High
                } else if low_p > high_p {
                    Vote::Low
                } else {
                    Vote::None
                }
            }
            (Some(_), None) => Vote::Low,
            (None, Some(_)) => Vote::High,
            (None, None) => Vote::None,
        },
        _ => {
            return Err(ModelError::TypeMismatch {
                region: region.as_str().to_string(),
                attribute: attr.name().to_string(),
            });
        }
    };
    Ok(vote)
}
