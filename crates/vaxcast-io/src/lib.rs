//! File I/O and artifact rendering for the vaxcast pipeline.

mod chart;
mod domain;
mod error;
mod reader;
mod writer;

pub use chart::write_sensitivity_chart;
pub use domain::ExperimentName;
pub use error::IoError;
pub use reader::DatasetReader;
pub use writer::ReportWriter;
