//! JSON artifact writer for classification and sensitivity results.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use vaxcast_model::{ClassifierConfig, Evaluation, Predictions, SensitivityReport};

use crate::domain::ExperimentName;
use crate::IoError;

/// Writes run results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_accuracy.json`,
/// `{experiment}_predictions.json`, and `{experiment}_sensitivity.json`.
pub struct ReportWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ReportWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write the evaluation result to `{experiment}_accuracy.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_accuracy(
        &self,
        evaluation: &Evaluation,
        config: &ClassifierConfig,
    ) -> Result<(), IoError> {
        let artifact = AccuracyArtifact {
            experiment: self.experiment.as_str(),
            threshold: config.threshold(),
            num_correct: evaluation.num_correct,
            num_incorrect: evaluation.num_incorrect,
            accuracy: evaluation.accuracy,
        };
        self.write_json("accuracy", &artifact)
    }

    /// Write per-region predicted labels to `{experiment}_predictions.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_predictions(
        &self,
        predictions: &Predictions,
        config: &ClassifierConfig,
    ) -> Result<(), IoError> {
        // region -> rendered label, e.g. "06037": ">55%"
        let by_region: BTreeMap<&str, String> = predictions
            .iter()
            .map(|(region, prediction)| (region.as_str(), prediction.label(config)))
            .collect();

        let artifact = PredictionsArtifact {
            experiment: self.experiment.as_str(),
            threshold: config.threshold(),
            n_regions: by_region.len(),
            predictions: by_region,
        };
        self.write_json("predictions", &artifact)
    }

    /// Write the sensitivity report to `{experiment}_sensitivity.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_sensitivity(&self, report: &SensitivityReport) -> Result<(), IoError> {
        let accuracies: BTreeMap<&str, f64> = report.iter().collect();
        let artifact = SensitivityArtifact {
            experiment: self.experiment.as_str(),
            accuracies,
        };
        self.write_json("sensitivity", &artifact)
    }

    /// Return the path an artifact of the given kind is written to.
    #[must_use]
    pub fn artifact_path(&self, kind: &str, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{kind}.{extension}", self.experiment.as_str()))
    }

    fn write_json<T: Serialize>(&self, kind: &str, artifact: &T) -> Result<(), IoError> {
        let path = self.artifact_path(kind, "json");
        let json = serde_json::to_string_pretty(artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), "result written");
        Ok(())
    }
}

#[derive(Serialize)]
struct AccuracyArtifact<'a> {
    experiment: &'a str,
    threshold: f64,
    num_correct: usize,
    num_incorrect: usize,
    accuracy: f64,
}

#[derive(Serialize)]
struct PredictionsArtifact<'a> {
    experiment: &'a str,
    threshold: f64,
    n_regions: usize,
    predictions: BTreeMap<&'a str, String>,
}

#[derive(Serialize)]
struct SensitivityArtifact<'a> {
    experiment: &'a str,
    accuracies: BTreeMap<&'a str, f64>,
}
