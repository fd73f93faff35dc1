use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vaxcast_io::{write_sensitivity_chart, DatasetReader, ExperimentName, ReportWriter};
use vaxcast_model::{
    classify, evaluate, fit, partition, sensitivity_analysis, ClassifierConfig, Evaluation,
    SensitivityReport,
};

#[derive(Parser)]
#[command(name = "vaxcast")]
#[command(about = "Predict county vaccination rates from demographic attributes")]
#[command(version)]
struct Cli {
    /// Path to the training dataset JSON file
    #[arg(long)]
    train: PathBuf,

    /// Path to the test dataset JSON file
    #[arg(long)]
    test: PathBuf,

    /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    experiment: String,

    /// Vaccination-rate threshold separating the low and high classes
    #[arg(long, default_value_t = 55.0)]
    threshold: f64,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip the SVG sensitivity chart
    #[arg(long)]
    no_chart: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

/// Print the accuracy results table.
fn print_accuracy(evaluation: &Evaluation) {
    let header = "-".repeat(16);
    println!("\n{header}");
    println!("{:^16}", "Results");
    println!("{header}");
    println!("Number Correct: {}", evaluation.num_correct);
    println!("Number Incorrect: {}", evaluation.num_incorrect);
    println!("Accuracy: {}\n", evaluation.accuracy);
}

/// Print the per-attribute sensitivity table.
fn print_sensitivity(report: &SensitivityReport) {
    let header = "-".repeat(54);
    println!("\n{:^54}", "Sensitivity Analysis");
    println!("{header}");
    println!("{:^25} | {:^26}", "Attribute", "Accuracy");
    println!("{header}");
    for (attribute, accuracy) in report.iter() {
        println!("{attribute:^26}{:^32}", format!("{accuracy:.2}"));
    }
    println!();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClassifierConfig::new(cli.threshold)?;
    let experiment_name = ExperimentName::new(cli.experiment)?;

    // Train
    let training_set = DatasetReader::new(&cli.train)
        .read(config.schema())
        .context("failed to read training data")?;
    info!(n_regions = training_set.len(), "training data loaded");

    let split = partition(&training_set, &config).context("failed to organize training data")?;
    let models = fit(&split, &config).context("failed to fit class models")?;

    // Classify
    let test_set = DatasetReader::new(&cli.test)
        .read(config.schema())
        .context("failed to read test data")?;
    info!(n_regions = test_set.len(), "test data loaded");

    let predictions = classify(&test_set, &models, &config).context("classification failed")?;
    let evaluation =
        evaluate(&test_set, &predictions, &config).context("accuracy evaluation failed")?;
    print_accuracy(&evaluation);

    // Sensitivity analysis
    let report =
        sensitivity_analysis(&test_set, &models, &config).context("sensitivity analysis failed")?;
    print_sensitivity(&report);

    // Write artifacts
    let writer = ReportWriter::new(&cli.output_dir, experiment_name)?;
    writer.write_accuracy(&evaluation, &config)?;
    writer.write_predictions(&predictions, &config)?;
    writer.write_sensitivity(&report)?;
    if !cli.no_chart {
        write_sensitivity_chart(&report, &writer.artifact_path("sensitivity", "svg"))?;
    }

    Ok(())
}
