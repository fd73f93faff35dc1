//! JSON dataset reader with full input validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument};

use vaxcast_model::{AttributeKind, AttributeValue, Dataset, Record, RegionId, Schema};

use crate::IoError;

/// Reads a county dataset from a JSON file.
///
/// Expected shape: a top-level object mapping region keys (FIPS codes)
/// to record objects holding every schema attribute plus the numeric
/// label field:
///
/// ```json
/// { "06037": { "Population-Density": 2100.0, ..., "Vax-Rate": 61.2 } }
/// ```
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Invalid JSON |
/// | [`IoError::NotAnObject`] | Top level is not an object |
/// | [`IoError::EmptyDataset`] | Zero region records |
/// | [`IoError::MalformedRecord`] | A region's value is not an object |
/// | [`IoError::MissingField`] | A schema attribute or the label is absent |
/// | [`IoError::WrongValueType`] | A field's JSON type contradicts the schema |
/// | [`IoError::NonFiniteValue`] | A numeric field is NaN or infinite |
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given JSON file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the JSON file against a schema.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn read(&self, schema: &Schema) -> Result<Dataset, IoError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let root: Value = serde_json::from_str(&content).map_err(|e| IoError::JsonParse {
            path: self.path.clone(),
            source: e,
        })?;
        let Value::Object(regions) = root else {
            return Err(IoError::NotAnObject {
                path: self.path.clone(),
            });
        };
        debug!(n_regions = regions.len(), "parsed dataset JSON");

        if regions.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let mut records = Vec::with_capacity(regions.len());
        for (region, value) in regions {
            let Value::Object(fields) = value else {
                return Err(IoError::MalformedRecord {
                    path: self.path.clone(),
                    region,
                });
            };

            let mut values = BTreeMap::new();
            for attr in schema.attributes() {
                let field = fields.get(attr.name()).ok_or_else(|| IoError::MissingField {
                    path: self.path.clone(),
                    region: region.clone(),
                    field: attr.name().to_string(),
                })?;
                let value = match attr.kind() {
                    AttributeKind::Continuous => AttributeValue::Continuous(
                        self.finite_number(field, &region, attr.name())?,
                    ),
                    AttributeKind::Categorical => {
                        let token = field.as_str().ok_or_else(|| IoError::WrongValueType {
                            path: self.path.clone(),
                            region: region.clone(),
                            field: attr.name().to_string(),
                            expected: "a string",
                        })?;
                        AttributeValue::Categorical(token.to_string())
                    }
                };
                values.insert(attr.name().to_string(), value);
            }

            let label_field = fields.get(schema.label()).ok_or_else(|| IoError::MissingField {
                path: self.path.clone(),
                region: region.clone(),
                field: schema.label().to_string(),
            })?;
            let label = self.finite_number(label_field, &region, schema.label())?;

            records.push((RegionId::new(region), Record::new(values, label)));
        }

        info!(n_regions = records.len(), "dataset loaded");
        Ok(Dataset::from_records(records))
    }

    fn finite_number(&self, value: &Value, region: &str, field: &str) -> Result<f64, IoError> {
        // serde_json rejects NaN/Inf literals, so as_f64 is enough, but
        // the finite check guards against wrapper formats that allow them.
        let number = value.as_f64().ok_or_else(|| IoError::WrongValueType {
            path: self.path.clone(),
            region: region.to_string(),
            field: field.to_string(),
            expected: "a number",
        })?;
        if !number.is_finite() {
            return Err(IoError::NonFiniteValue {
                path: self.path.clone(),
                region: region.to_string(),
                field: field.to_string(),
            });
        }
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    const VALID: &str = r#"{
        "01001": {
            "Population-Density": 91.8,
            "Percent-Over-65": 14.9,
            "Income": 58233.0,
            "Percent-Attend-College": 27.0,
            "Social Vulnerability Index": "B",
            "Vax-Rate": 47.2
        }
    }"#;

    #[test]
    fn read_valid_dataset() {
        let f = write_json(VALID);
        let dataset = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap();
        assert_eq!(dataset.len(), 1);
        let record = dataset.get(&RegionId::new("01001")).unwrap();
        assert!((record.label() - 47.2).abs() < 1e-9);
        assert_eq!(
            record.value("Social Vulnerability Index"),
            Some(&AttributeValue::Categorical("B".to_string()))
        );
        assert_eq!(
            record.value("Population-Density"),
            Some(&AttributeValue::Continuous(91.8))
        );
    }

    #[test]
    fn missing_file_error() {
        let err = DatasetReader::new(Path::new("/nonexistent/data.json"))
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_json_error() {
        let f = write_json("{ not json");
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(err, IoError::JsonParse { .. }));
    }

    #[test]
    fn top_level_array_error() {
        let f = write_json("[1, 2, 3]");
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(err, IoError::NotAnObject { .. }));
    }

    #[test]
    fn empty_dataset_error() {
        let f = write_json("{}");
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(err, IoError::EmptyDataset { .. }));
    }

    #[test]
    fn missing_attribute_error() {
        let f = write_json(r#"{ "01001": { "Income": 58233.0 } }"#);
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(err, IoError::MissingField { .. }));
    }

    #[test]
    fn string_where_number_expected_error() {
        let f = write_json(
            r#"{ "01001": {
                "Population-Density": "lots",
                "Percent-Over-65": 14.9,
                "Income": 58233.0,
                "Percent-Attend-College": 27.0,
                "Social Vulnerability Index": "B",
                "Vax-Rate": 47.2
            } }"#,
        );
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(
            err,
            IoError::WrongValueType { expected: "a number", .. }
        ));
    }

    #[test]
    fn number_where_string_expected_error() {
        let f = write_json(
            r#"{ "01001": {
                "Population-Density": 91.8,
                "Percent-Over-65": 14.9,
                "Income": 58233.0,
                "Percent-Attend-College": 27.0,
                "Social Vulnerability Index": 3,
                "Vax-Rate": 47.2
            } }"#,
        );
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(
            err,
            IoError::WrongValueType { expected: "a string", .. }
        ));
    }

    #[test]
    fn record_not_an_object_error() {
        let f = write_json(r#"{ "01001": 5 }"#);
        let err = DatasetReader::new(f.path())
            .read(&Schema::vaccination())
            .unwrap_err();
        assert!(matches!(err, IoError::MalformedRecord { .. }));
    }
}
