//! Accuracy scoring of predictions against true labels.

use tracing::{debug, instrument};

use crate::classify::{Prediction, Predictions};
use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::schema::ClassifierConfig;

/// Correct/incorrect counts and the accuracy ratio for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Records whose predicted side matches the label's relation to the
    /// threshold.
    pub num_correct: usize,
    /// Everything else, including `Unknown` predictions.
    pub num_incorrect: usize,
    /// `num_correct / total records`, in [0.0, 1.0].
    pub accuracy: f64,
}

/// Score a predictions map against a dataset's true labels.
///
/// A record is correct iff its prediction is `Low` and its label is at
/// or below the threshold, or its prediction is `High` and its label is
/// strictly above it. `Unknown` always counts as incorrect, as does a
/// record with no entry in the predictions map.
///
/// # Errors
///
/// Returns [`ModelError::EmptyDataset`] when `dataset` has no records
/// (the accuracy ratio is undefined).
#[instrument(skip_all, fields(n_records = dataset.len()))]
pub fn evaluate(
    dataset: &Dataset,
    predictions: &Predictions,
    config: &ClassifierConfig,
) -> Result<Evaluation, ModelError> {
    if dataset.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let mut num_correct = 0usize;
    for (region, record) in dataset.iter() {
        let prediction = predictions.get(region).unwrap_or(Prediction::Unknown);
        let correct = match prediction {
            Prediction::Low => record.label() <= config.threshold(),
            Prediction::High => record.label() > config.threshold(),
            Prediction::Unknown => false,
        };
        if correct {
            num_correct += 1;
        }
    }

    let total = dataset.len();
    let evaluation = Evaluation {
        num_correct,
        num_incorrect: total - num_correct,
        accuracy: num_correct as f64 / total as f64,
    };
    debug!(
        num_correct = evaluation.num_correct,
        num_incorrect = evaluation.num_incorrect,
        accuracy = evaluation.accuracy,
        "evaluation complete"
    );
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::partition;
    use crate::classify::classify;
    use crate::fit::fit;
    use crate::testutil::{record, two_county_training_set};

    #[test]
    fn counts_and_ratio() {
        // 4 records, 3 correct, 1 wrong -> 0.75.
        let config = ClassifierConfig::new(55.0).unwrap();
        let training = two_county_training_set();
        let models = fit(&partition(&training, &config).unwrap(), &config).unwrap();

        // Density and SVI carry the votes; three records match their
        // evidence, the last carries low evidence but a high label.
        let test = Dataset::from_records(vec![
            record("t1", 110.0, "A", 70.0),
            record("t2", 105.0, "A", 68.0),
            record("t3", 190.0, "B", 40.0),
            record("t4", 195.0, "B", 70.0),
        ]);
        let predictions = classify(&test, &models, &config).unwrap();
        let evaluation = evaluate(&test, &predictions, &config).unwrap();

        assert_eq!(evaluation.num_correct, 3);
        assert_eq!(evaluation.num_incorrect, 1);
        assert!((evaluation.accuracy - 0.75).abs() < 1e-9);
    }

    #[test]
    fn unknown_counts_as_incorrect() {
        let config = ClassifierConfig::new(55.0).unwrap();
        let training = two_county_training_set();
        let models = fit(&partition(&training, &config).unwrap(), &config).unwrap();

        // Midpoint density + unseen token: joint vote is 0-0, Unknown.
        let test = Dataset::from_records(vec![crate::testutil::full_record(
            "t1", 150.0, 15.0, 45_000.0, 25.0, "Z", 70.0,
        )]);
        let predictions = classify(&test, &models, &config).unwrap();
        let evaluation = evaluate(&test, &predictions, &config).unwrap();

        assert_eq!(evaluation.num_correct, 0);
        assert_eq!(evaluation.num_incorrect, 1);
        assert!((evaluation.accuracy - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_dataset_is_fatal() {
        let config = ClassifierConfig::new(55.0).unwrap();
        let err = evaluate(&Dataset::default(), &Predictions::default(), &config).unwrap_err();
        assert!(matches!(err, ModelError::EmptyDataset));
    }
}
